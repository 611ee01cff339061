//! Syntax language derived from a file name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display/syntax hint for editor content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `.ts` and `.tsx` files.
    TypeScript,
    /// `.js` and `.jsx` files.
    JavaScript,
    /// `.py` files.
    Python,
    /// `.java` files.
    Java,
    /// `.md` and `.mdx` files.
    Markdown,
    /// Anything else.
    #[default]
    PlainText,
}

impl Language {
    /// Derives the language from the extension of `file_name`.
    ///
    /// Only the text after the last `.` counts, compared case-insensitively.
    /// Names without a dot are plain text.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let Some((_, extension)) = file_name.rsplit_once('.') else {
            return Self::PlainText;
        };
        match extension.to_ascii_lowercase().as_str() {
            "ts" | "tsx" => Self::TypeScript,
            "js" | "jsx" => Self::JavaScript,
            "py" => Self::Python,
            "java" => Self::Java,
            "md" | "mdx" => Self::Markdown,
            _ => Self::PlainText,
        }
    }

    /// Identifier the backend and editor use for this language.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Markdown => "markdown",
            Self::PlainText => "plaintext",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" => Ok(Self::TypeScript),
            "javascript" => Ok(Self::JavaScript),
            "python" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "markdown" => Ok(Self::Markdown),
            "plaintext" => Ok(Self::PlainText),
            other => Err(format!("Unknown language: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(Language::from_file_name("foo.tsx"), Language::TypeScript);
        assert_eq!(Language::from_file_name("src/app.ts"), Language::TypeScript);
        assert_eq!(Language::from_file_name("index.jsx"), Language::JavaScript);
        assert_eq!(Language::from_file_name("todo_app.py"), Language::Python);
        assert_eq!(Language::from_file_name("Main.java"), Language::Java);
        assert_eq!(Language::from_file_name("README.md"), Language::Markdown);
        assert_eq!(Language::from_file_name("docs/page.mdx"), Language::Markdown);
    }

    #[test]
    fn unknown_or_missing_extension_is_plaintext() {
        assert_eq!(Language::from_file_name("Makefile"), Language::PlainText);
        assert_eq!(Language::from_file_name("main.rs"), Language::PlainText);
        assert_eq!(Language::from_file_name("archive.tar.gz"), Language::PlainText);
    }

    #[test]
    fn extension_match_ignores_case() {
        assert_eq!(Language::from_file_name("NOTES.MD"), Language::Markdown);
    }

    #[test]
    fn parses_backend_identifiers() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!(Language::TypeScript.to_string(), "typescript");
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn serializes_as_identifier() {
        let json = serde_json::to_string(&Language::PlainText).unwrap();
        assert_eq!(json, "\"plaintext\"");
    }
}

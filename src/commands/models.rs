//! `coedit models` command.

use tracing::warn;

use crate::context::ServiceContext;
use crate::ports::ModelInfo;

/// Execute the `models` command.
///
/// Prints a table of model id, name and provider.
///
/// # Errors
///
/// Returns an error string if the model list cannot be fetched.
pub async fn run(ctx: &ServiceContext) -> Result<(), String> {
    let models = ctx.codegen.list_models().await.map_err(|e| {
        warn!(error = %e, "failed to fetch models");
        format!("Failed to fetch available models: {e}")
    })?;

    if models.is_empty() {
        println!("No models available.");
        return Ok(());
    }
    print!("{}", format_table(&models));
    Ok(())
}

fn format_table(models: &[ModelInfo]) -> String {
    let id_width = models.iter().map(|m| m.id.len()).max().unwrap_or(2).max(2);
    let name_width = models.iter().map(|m| m.name.len()).max().unwrap_or(4).max(4);

    let mut out = format!("{:<id_width$}  {:<name_width$}  PROVIDER\n", "ID", "NAME");
    out.push_str(&format!("{:-<id_width$}  {:-<name_width$}  --------\n", "", ""));
    for model in models {
        out.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {}\n",
            model.id, model.name, model.provider
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_aligns_columns() {
        let models = vec![
            ModelInfo { id: "gpt-4".into(), name: "GPT-4".into(), provider: "openai".into() },
            ModelInfo {
                id: "mistral-small".into(),
                name: "Mistral Small".into(),
                provider: "mistral".into(),
            },
        ];
        let table = format_table(&models);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "ID             NAME           PROVIDER");
        assert_eq!(lines[2], "gpt-4          GPT-4          openai");
        assert_eq!(lines[3], "mistral-small  Mistral Small  mistral");
    }
}

//! Chat transcript and response handling.

pub mod extract;
pub mod message;
pub mod transcript;

pub use extract::extract_code;
pub use message::{ChatMessage, Role};
pub use transcript::Transcript;

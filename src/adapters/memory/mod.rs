//! In-process adapters for tests and offline sessions.

pub mod clock;
pub mod codegen;
pub mod file_store;

pub use clock::{SequentialIds, SteppingClock};
pub use codegen::ScriptedCodeGen;
pub use file_store::MemoryFileStore;

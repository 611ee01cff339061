//! Port traits defining external boundaries.
//!
//! Each trait is one boundary between the session core and something it
//! does not own: the backend file store, the code-generation endpoint, time
//! and identifiers. Implementations live in `src/adapters/`.

pub mod clock;
pub mod codegen;
pub mod file_store;
pub mod id_gen;

use std::future::Future;
use std::pin::Pin;

use crate::error::BackendError;

pub use clock::Clock;
pub use codegen::{CodeGenClient, GenerateRequest, GenerateResponse, ModelInfo};
pub use file_store::{FileNode, FileStore, NodeKind};
pub use id_gen::IdGenerator;

/// Boxed future returned by backend ports; keeps the traits dyn-compatible.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

//! Live adapters talking to the real backend and system.

pub mod clock;
pub mod codegen;
pub mod file_store;
pub mod http;
pub mod id_gen;

pub use clock::SystemClock;
pub use codegen::LiveCodeGenClient;
pub use file_store::LiveFileStore;
pub use http::BackendHttp;
pub use id_gen::UuidGenerator;

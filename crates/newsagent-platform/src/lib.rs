//! Native adapters for the ports declared in `newsagent-core`.
//!
//! - [`llm`]: OpenAI-compatible chat completions over HTTP
//! - [`graph`]: Dgraph query endpoint over HTTP
//! - [`storage`]: in-memory and on-disk conversation blobs

pub mod graph;
pub mod llm;
pub mod storage;

#[cfg(test)]
mod tests;

pub use graph::DgraphExecutor;
pub use llm::OpenAiCompatProvider;
pub use storage::{open_storage, FileStorage, MemoryStorage};

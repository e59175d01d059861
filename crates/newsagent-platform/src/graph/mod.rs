pub mod dgraph;

pub use dgraph::DgraphExecutor;

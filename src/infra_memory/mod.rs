mod graph_store_memory;

pub use graph_store_memory::*;

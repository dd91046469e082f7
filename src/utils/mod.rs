mod graph;
pub use graph::{GraphError, GraphResult, InterferenceGraph};
mod minheap;
pub use minheap::MinHeap;

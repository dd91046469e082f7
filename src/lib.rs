//! Register allocation by greedy coloring of an interference graph.
//!
//! The graph lives in [`utils::InterferenceGraph`]; [`regalloc::assign_registers`]
//! builds one from an edge stream and colors it with registers `1..=k`.

pub mod args;
pub mod emit;
pub mod parse;
pub mod regalloc;
pub mod utils;

pub use regalloc::{assign_registers, Register, RegisterAssignment};
pub use utils::{GraphError, InterferenceGraph};

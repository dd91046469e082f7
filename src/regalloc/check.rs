use std::fmt::Display;
use std::hash::Hash;

use thiserror::Error;

use crate::utils::InterferenceGraph;

use super::{Register, RegisterAssignment};

/// A defect found in a register assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError<T> {
  #[error("vertex {0} has no register")]
  Unassigned(T),
  #[error("vertex {0} is assigned but not in the graph")]
  UnknownVertex(T),
  #[error("vertex {0} got register {1}, outside 1..={2}")]
  OutOfRange(T, Register, Register),
  #[error("interfering vertices {0} and {1} share register {2}")]
  Conflict(T, T, Register),
}

/// Verify that `assignment` covers exactly the vertices of `graph`, stays in
/// `1..=num_registers` and gives interfering vertices different registers.
pub fn check_assignment<T>(
  graph: &InterferenceGraph<T>,
  assignment: &RegisterAssignment<T>,
  num_registers: Register,
) -> Result<(), CheckError<T>>
where
  T: Hash + Eq + Clone + Display,
{
  if let Some(v) = assignment.keys().find(|v| !graph.contains(v)) {
    return Err(CheckError::UnknownVertex(v.clone()));
  }

  for v in graph.vertices_in_order() {
    let reg = match assignment.get(v) {
      Some(reg) => *reg,
      None => return Err(CheckError::Unassigned(v.clone())),
    };
    if reg == 0 || reg > num_registers {
      return Err(CheckError::OutOfRange(v.clone(), reg, num_registers));
    }
  }

  for (v, w) in graph.edges() {
    let reg = assignment[&v];
    if reg == assignment[&w] {
      return Err(CheckError::Conflict(v, w, reg));
    }
  }

  log::debug!("Assignment of {} vertices is valid", assignment.len());
  Ok(())
}

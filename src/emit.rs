//! Assignment emission

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::prelude::*;

use anyhow::Result;
use serde::Serialize;

use crate::args::EmitTarget;
use crate::regalloc::{Register, RegisterAssignment};

/// Sort the assignment by vertex so that output is stable between runs.
fn sorted<T: Ord>(assignment: &RegisterAssignment<T>) -> BTreeMap<&T, Register> {
  assignment.iter().map(|(v, r)| (v, *r)).collect()
}

/// One `vertex register` line per vertex.
pub fn emit_text<T: Ord + Display>(
  assignment: &RegisterAssignment<T>,
  out: &mut impl Write,
) -> Result<()> {
  for (vertex, reg) in sorted(assignment) {
    writeln!(out, "{} {}", vertex, reg)?;
  }
  Ok(())
}

/// A single JSON object mapping vertex to register.
pub fn emit_json<T: Ord + Serialize>(
  assignment: &RegisterAssignment<T>,
  out: &mut impl Write,
) -> Result<()> {
  serde_json::to_writer_pretty(&mut *out, &sorted(assignment))?;
  writeln!(out)?;
  Ok(())
}

pub fn emit<T: Ord + Display + Serialize>(
  target: EmitTarget,
  assignment: &RegisterAssignment<T>,
  out: &mut impl Write,
) -> Result<()> {
  match target {
    EmitTarget::Text => emit_text(assignment, out),
    EmitTarget::Json => emit_json(assignment, out),
  }
}

/// Return the emitted assignment as a string.
pub fn return_assignment<T: Ord + Display + Serialize>(
  target: EmitTarget,
  assignment: &RegisterAssignment<T>,
) -> Result<String> {
  let mut buf = vec![];
  emit(target, assignment, &mut buf)?;
  Ok(String::from_utf8(buf)?)
}

// Colors an interference graph with a bounded number of registers
mod allocation;
mod check;
mod order;

pub use allocation::{assign_registers, AllocError, Allocator, Register, RegisterAssignment};
pub use check::{check_assignment, CheckError};
pub use order::VisitOrder;

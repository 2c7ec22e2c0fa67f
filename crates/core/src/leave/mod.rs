//! Leave request lifecycle management.
//!
//! This module implements the leave-request state machine, the
//! leave-balance ledger, and their error types.
//!
//! # Modules
//!
//! - `types` - Leave domain types (LeaveStatus, LeaveType, decisions)
//! - `error` - Leave-specific error types
//! - `balance` - The {total, taken, remaining} ledger arithmetic
//! - `workflow` - State transition and duration logic

pub mod balance;
pub mod error;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod workflow_props;

pub use balance::LeaveBalance;
pub use error::LeaveError;
pub use types::{DecisionAction, LeaveDecision, LeaveStatus, LeaveType};
pub use workflow::LeaveWorkflow;

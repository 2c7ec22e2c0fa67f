//! Leave domain types for the request lifecycle.
//!
//! This module defines the core types used for managing leave request
//! status transitions and admin decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Leave request status in the approval workflow.
///
/// Requests progress through these states from application to decision.
/// The valid transitions are:
/// - Pending → Approved (admin decision)
/// - Pending → Rejected (admin decision)
/// - Pending → Cancelled (owning employee)
///
/// Approved, Rejected, and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting an admin decision.
    Pending,
    /// Approved; the employee ledger has been debited.
    Approved,
    /// Rejected; no ledger change.
    Rejected,
    /// Cancelled by the owning employee before a decision.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Maternity leave.
    Maternity,
    /// Annual leave.
    Annual,
    /// Anything else.
    Other,
}

impl LeaveType {
    /// Returns the string representation of the leave type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sick => "sick",
            Self::Casual => "casual",
            Self::Maternity => "maternity",
            Self::Annual => "annual",
            Self::Other => "other",
        }
    }

    /// Parses a leave type from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sick" => Some(Self::Sick),
            "casual" => Some(Self::Casual),
            "maternity" => Some(Self::Maternity),
            "annual" => Some(Self::Annual),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two outcomes an admin may choose for a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecision {
    /// Approve the request and debit the ledger.
    Approved,
    /// Reject the request; the ledger is untouched.
    Rejected,
}

impl LeaveDecision {
    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a decision from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The status a request ends in after this decision.
    #[must_use]
    pub const fn resulting_status(&self) -> LeaveStatus {
        match self {
            Self::Approved => LeaveStatus::Approved,
            Self::Rejected => LeaveStatus::Rejected,
        }
    }
}

/// A validated decision with its audit data (who, when, why).
#[derive(Debug, Clone)]
pub struct DecisionAction {
    /// The status the request transitions to.
    pub new_status: LeaveStatus,
    /// The admin who made the decision.
    pub decided_by: Uuid,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
    /// Optional comments from the admin.
    pub comments: Option<String>,
}

impl DecisionAction {
    /// Returns true if this decision debits the employee ledger.
    #[must_use]
    pub const fn debits_ledger(&self) -> bool {
        matches!(self.new_status, LeaveStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(LeaveStatus::Pending.as_str(), "pending");
        assert_eq!(LeaveStatus::Approved.as_str(), "approved");
        assert_eq!(LeaveStatus::Rejected.as_str(), "rejected");
        assert_eq!(LeaveStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(LeaveStatus::parse("pending"), Some(LeaveStatus::Pending));
        assert_eq!(LeaveStatus::parse("APPROVED"), Some(LeaveStatus::Approved));
        assert_eq!(LeaveStatus::parse("Rejected"), Some(LeaveStatus::Rejected));
        assert_eq!(
            LeaveStatus::parse("cancelled"),
            Some(LeaveStatus::Cancelled)
        );
        assert_eq!(LeaveStatus::parse("draft"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
        assert!(LeaveStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_leave_type_round_trip() {
        for ty in [
            LeaveType::Sick,
            LeaveType::Casual,
            LeaveType::Maternity,
            LeaveType::Annual,
            LeaveType::Other,
        ] {
            assert_eq!(LeaveType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(LeaveType::parse("sabbatical"), None);
    }

    #[test]
    fn test_decision_resulting_status() {
        assert_eq!(
            LeaveDecision::Approved.resulting_status(),
            LeaveStatus::Approved
        );
        assert_eq!(
            LeaveDecision::Rejected.resulting_status(),
            LeaveStatus::Rejected
        );
    }

    #[test]
    fn test_decision_parse_rejects_other_statuses() {
        assert_eq!(
            LeaveDecision::parse("approved"),
            Some(LeaveDecision::Approved)
        );
        assert_eq!(
            LeaveDecision::parse("rejected"),
            Some(LeaveDecision::Rejected)
        );
        // Cancellation is not a decision an admin can make.
        assert_eq!(LeaveDecision::parse("cancelled"), None);
        assert_eq!(LeaveDecision::parse("pending"), None);
    }
}

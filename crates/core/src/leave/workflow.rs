//! Leave workflow state transitions and duration rules.
//!
//! This module implements the core state machine logic for moving a
//! leave request from pending to one of its terminal states, plus the
//! inclusive day-count rule used everywhere a duration is needed.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::leave::error::LeaveError;
use crate::leave::types::{DecisionAction, LeaveDecision, LeaveStatus};

/// Maximum length of an application's reason text.
pub const MAX_REASON_LEN: usize = 800;

/// Maximum length of admin comments on a decision.
pub const MAX_COMMENTS_LEN: usize = 500;

/// Stateless service for leave request transitions.
///
/// All methods are associated functions that validate inputs and
/// return the data needed to persist the transition; nothing here
/// touches storage.
pub struct LeaveWorkflow;

impl LeaveWorkflow {
    /// Computes the inclusive duration of a leave in days.
    ///
    /// Both endpoints count: a leave from day D to day D is 1 day,
    /// never 0.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDateRange` if `start > end`.
    pub fn duration_days(start: NaiveDate, end: NaiveDate) -> Result<i32, LeaveError> {
        if start > end {
            return Err(LeaveError::InvalidDateRange);
        }
        let days = (end - start).num_days() + 1;
        i32::try_from(days).map_err(|_| LeaveError::InvalidDateRange)
    }

    /// Validates a new application and returns its duration.
    ///
    /// Balance is deliberately not checked here: the ledger is only
    /// consulted and debited at approval time.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::MissingField` if the reason is empty or
    /// over length, `LeaveError::InvalidDateRange` on a bad date pair.
    pub fn validate_application(
        start: NaiveDate,
        end: NaiveDate,
        reason: &str,
    ) -> Result<i32, LeaveError> {
        if reason.trim().is_empty() {
            return Err(LeaveError::MissingField("reason"));
        }
        if reason.len() > MAX_REASON_LEN {
            return Err(LeaveError::MissingField("reason"));
        }
        Self::duration_days(start, end)
    }

    /// Validates an admin decision on a request.
    ///
    /// Only pending requests may be decided; deciding an already
    /// decided request is a conflict, never a silent no-op. The
    /// pending check runs before the decision string is validated,
    /// so a garbage decision on a decided request still reports the
    /// conflict.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::AlreadyDecided` if the request is not
    /// pending, `LeaveError::InvalidDecision` if the decision is
    /// neither "approved" nor "rejected".
    pub fn decide(
        current: LeaveStatus,
        decision: &str,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<DecisionAction, LeaveError> {
        if current != LeaveStatus::Pending {
            return Err(LeaveError::AlreadyDecided { status: current });
        }
        let decision = LeaveDecision::parse(decision)
            .ok_or_else(|| LeaveError::InvalidDecision(decision.to_string()))?;
        Ok(DecisionAction {
            new_status: decision.resulting_status(),
            decided_by,
            decided_at: Utc::now(),
            comments: comments
                .map(|c| {
                    let mut c = c;
                    c.truncate(MAX_COMMENTS_LEN);
                    c
                })
                .filter(|c| !c.trim().is_empty()),
        })
    }

    /// Validates a cancellation by the owning employee.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::AlreadyDecided` if the request is not
    /// pending.
    pub fn cancel(current: LeaveStatus) -> Result<LeaveStatus, LeaveError> {
        match current {
            LeaveStatus::Pending => Ok(LeaveStatus::Cancelled),
            status => Err(LeaveError::AlreadyDecided { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2026, 3, 1), date(2026, 3, 1), 1)]
    #[case(date(2026, 3, 1), date(2026, 3, 5), 5)]
    #[case(date(2026, 2, 27), date(2026, 3, 2), 4)]
    #[case(date(2025, 12, 30), date(2026, 1, 2), 4)]
    fn test_duration_counts_both_endpoints(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: i32,
    ) {
        assert_eq!(LeaveWorkflow::duration_days(start, end).unwrap(), expected);
    }

    #[test]
    fn test_duration_rejects_reversed_range() {
        let err = LeaveWorkflow::duration_days(date(2026, 3, 5), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, LeaveError::InvalidDateRange));
    }

    #[test]
    fn test_validate_application_requires_reason() {
        let err = LeaveWorkflow::validate_application(date(2026, 3, 1), date(2026, 3, 2), "  ")
            .unwrap_err();
        assert!(matches!(err, LeaveError::MissingField("reason")));

        let long = "x".repeat(MAX_REASON_LEN + 1);
        let err = LeaveWorkflow::validate_application(date(2026, 3, 1), date(2026, 3, 2), &long)
            .unwrap_err();
        assert!(matches!(err, LeaveError::MissingField("reason")));
    }

    #[test]
    fn test_validate_application_returns_duration() {
        let duration =
            LeaveWorkflow::validate_application(date(2026, 3, 1), date(2026, 3, 5), "trip")
                .unwrap();
        assert_eq!(duration, 5);
    }

    #[test]
    fn test_decide_pending_approves() {
        let admin = Uuid::new_v4();
        let action = LeaveWorkflow::decide(
            LeaveStatus::Pending,
            "approved",
            admin,
            Some("enjoy".to_string()),
        )
        .unwrap();

        assert_eq!(action.new_status, LeaveStatus::Approved);
        assert_eq!(action.decided_by, admin);
        assert_eq!(action.comments.as_deref(), Some("enjoy"));
        assert!(action.debits_ledger());
    }

    #[test]
    fn test_decide_pending_rejects_without_ledger_debit() {
        let action =
            LeaveWorkflow::decide(LeaveStatus::Pending, "rejected", Uuid::new_v4(), None).unwrap();

        assert_eq!(action.new_status, LeaveStatus::Rejected);
        assert!(!action.debits_ledger());
    }

    #[rstest]
    #[case(LeaveStatus::Approved)]
    #[case(LeaveStatus::Rejected)]
    #[case(LeaveStatus::Cancelled)]
    fn test_decide_terminal_status_conflicts(#[case] current: LeaveStatus) {
        let err = LeaveWorkflow::decide(current, "approved", Uuid::new_v4(), None).unwrap_err();
        assert!(matches!(err, LeaveError::AlreadyDecided { status } if status == current));
    }

    #[test]
    fn test_decide_rejects_unknown_decision() {
        let err =
            LeaveWorkflow::decide(LeaveStatus::Pending, "cancelled", Uuid::new_v4(), None)
                .unwrap_err();
        assert!(matches!(err, LeaveError::InvalidDecision(raw) if raw == "cancelled"));
    }

    #[test]
    fn test_decide_conflict_reported_before_decision_validation() {
        // A garbage decision on a decided request is a conflict, not
        // a validation error.
        let err =
            LeaveWorkflow::decide(LeaveStatus::Approved, "resubmit", Uuid::new_v4(), None)
                .unwrap_err();
        assert!(matches!(
            err,
            LeaveError::AlreadyDecided {
                status: LeaveStatus::Approved
            }
        ));
    }

    #[test]
    fn test_decide_blank_comments_dropped() {
        let action = LeaveWorkflow::decide(
            LeaveStatus::Pending,
            "rejected",
            Uuid::new_v4(),
            Some("   ".to_string()),
        )
        .unwrap();
        assert_eq!(action.comments, None);
    }

    #[test]
    fn test_cancel_only_pending() {
        assert_eq!(
            LeaveWorkflow::cancel(LeaveStatus::Pending).unwrap(),
            LeaveStatus::Cancelled
        );
        let err = LeaveWorkflow::cancel(LeaveStatus::Cancelled).unwrap_err();
        assert!(matches!(
            err,
            LeaveError::AlreadyDecided {
                status: LeaveStatus::Cancelled
            }
        ));
    }
}

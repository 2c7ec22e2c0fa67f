//! Property-based tests for the leave workflow state machine.

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use crate::leave::error::LeaveError;
use crate::leave::types::{LeaveDecision, LeaveStatus};
use crate::leave::workflow::LeaveWorkflow;

/// Strategy for generating random leave statuses.
fn arb_status() -> impl Strategy<Value = LeaveStatus> {
    prop_oneof![
        Just(LeaveStatus::Pending),
        Just(LeaveStatus::Approved),
        Just(LeaveStatus::Rejected),
        Just(LeaveStatus::Cancelled),
    ]
}

/// Strategy for generating random decisions.
fn arb_decision() -> impl Strategy<Value = LeaveDecision> {
    prop_oneof![Just(LeaveDecision::Approved), Just(LeaveDecision::Rejected)]
}

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for dates within a few decades of the epoch.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..=25_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An ordered date pair always yields a positive inclusive duration,
    /// and the duration equals the day distance plus one.
    #[test]
    fn prop_duration_inclusive((a, b) in (arb_date(), arb_date())) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let duration = LeaveWorkflow::duration_days(start, end).unwrap();

        prop_assert!(duration >= 1);
        prop_assert_eq!(i64::from(duration), (end - start).num_days() + 1);
    }

    /// A reversed date pair is always rejected.
    #[test]
    fn prop_duration_rejects_reversed((a, b) in (arb_date(), arb_date())) {
        prop_assume!(a != b);
        let (start, end) = if a > b { (a, b) } else { (b, a) };
        let result = LeaveWorkflow::duration_days(start, end);
        prop_assert!(matches!(result, Err(LeaveError::InvalidDateRange)));
    }

    /// Deciding a pending request always succeeds and lands in the
    /// decision's terminal status with the deciding admin recorded.
    #[test]
    fn prop_decide_pending_succeeds(decision in arb_decision(), admin in arb_uuid()) {
        let action =
            LeaveWorkflow::decide(LeaveStatus::Pending, decision.as_str(), admin, None).unwrap();
        prop_assert_eq!(action.new_status, decision.resulting_status());
        prop_assert!(action.new_status.is_terminal());
        prop_assert_eq!(action.decided_by, admin);
    }

    /// Deciding a non-pending request always fails with the conflict
    /// error carrying the current status.
    #[test]
    fn prop_decide_terminal_fails(
        current in arb_status(),
        decision in arb_decision(),
        admin in arb_uuid(),
    ) {
        prop_assume!(current != LeaveStatus::Pending);
        let result = LeaveWorkflow::decide(current, decision.as_str(), admin, None);
        match result {
            Err(LeaveError::AlreadyDecided { status }) => prop_assert_eq!(status, current),
            other => prop_assert!(false, "unexpected result: {:?}", other),
        }
    }

    /// Cancellation mirrors decision: pending only.
    #[test]
    fn prop_cancel_pending_only(current in arb_status()) {
        let result = LeaveWorkflow::cancel(current);
        if current == LeaveStatus::Pending {
            prop_assert_eq!(result.unwrap(), LeaveStatus::Cancelled);
        } else {
            prop_assert!(result.is_err());
        }
    }
}

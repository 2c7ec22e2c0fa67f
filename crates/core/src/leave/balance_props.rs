//! Property-based tests for the leave-balance ledger.

use proptest::prelude::*;

use crate::leave::balance::LeaveBalance;
use crate::leave::error::LeaveError;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful deduction preserves the ledger invariant and moves
    /// exactly `duration` days from remaining to taken.
    #[test]
    fn prop_deduct_preserves_invariant(
        total in 0i32..10_000,
        taken in 0i32..10_000,
        duration in 1i32..10_000,
    ) {
        prop_assume!(taken <= total);
        let before = LeaveBalance::from_parts(total, taken, total - taken);
        let mut after = before;

        match after.deduct(duration) {
            Ok(()) => {
                prop_assert!(before.remaining >= duration);
                prop_assert_eq!(after.taken, before.taken + duration);
                prop_assert_eq!(after.remaining, before.remaining - duration);
                prop_assert!(after.is_consistent());
            }
            Err(LeaveError::InsufficientBalance { remaining, requested }) => {
                prop_assert!(before.remaining < duration);
                prop_assert_eq!(remaining, before.remaining);
                prop_assert_eq!(requested, duration);
                // Failure leaves the ledger untouched.
                prop_assert_eq!(after, before);
            }
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    /// The admin override always yields a consistent ledger whenever
    /// total or taken is supplied, regardless of any remaining value
    /// the caller tries to smuggle in.
    #[test]
    fn prop_admin_override_consistent(
        total in 0i32..10_000,
        taken in 0i32..10_000,
        new_total in proptest::option::of(0i32..10_000),
        new_taken in proptest::option::of(0i32..10_000),
        bogus_remaining in proptest::option::of(-10_000i32..10_000),
    ) {
        prop_assume!(taken <= total);
        prop_assume!(new_total.is_some() || new_taken.is_some());

        let balance = LeaveBalance::from_parts(total, taken, total - taken);
        let updated = balance.admin_override(new_total, new_taken, bogus_remaining);

        prop_assert!(updated.is_consistent());
        prop_assert_eq!(updated.total, new_total.unwrap_or(total));
        prop_assert_eq!(updated.taken, new_taken.unwrap_or(taken));
    }
}

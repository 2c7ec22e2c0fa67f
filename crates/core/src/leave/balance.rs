//! The leave-balance ledger.
//!
//! Every employee carries a {total, taken, remaining} triple. The
//! invariant `remaining == total - taken` must hold after every
//! mutation; both mutation paths here re-establish it by construction.

use serde::{Deserialize, Serialize};

use crate::leave::error::LeaveError;

/// An employee's leave ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Total annual leave days granted.
    pub total: i32,
    /// Days consumed by approved requests.
    pub taken: i32,
    /// Days still available.
    pub remaining: i32,
}

impl LeaveBalance {
    /// Creates a fresh ledger with nothing taken.
    #[must_use]
    pub const fn new(total: i32) -> Self {
        Self {
            total,
            taken: 0,
            remaining: total,
        }
    }

    /// Reconstructs a ledger from stored fields.
    #[must_use]
    pub const fn from_parts(total: i32, taken: i32, remaining: i32) -> Self {
        Self {
            total,
            taken,
            remaining,
        }
    }

    /// Returns true if `remaining == total - taken`.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.remaining == self.total - self.taken
    }

    /// Debits the ledger for an approved request.
    ///
    /// The check is strict: a duration exactly equal to the remaining
    /// balance is approvable.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InsufficientBalance` if `remaining < duration`.
    pub fn deduct(&mut self, duration: i32) -> Result<(), LeaveError> {
        if self.remaining < duration {
            return Err(LeaveError::InsufficientBalance {
                remaining: self.remaining,
                requested: duration,
            });
        }
        self.taken += duration;
        self.remaining -= duration;
        Ok(())
    }

    /// Applies an admin override of the ledger fields.
    ///
    /// Whenever total or taken is supplied, remaining is recomputed
    /// from the effective values; a caller-supplied remaining is
    /// ignored in that case. This is the consistency guard: an admin
    /// cannot push the triple out of its invariant through this path.
    #[must_use]
    pub fn admin_override(
        &self,
        total: Option<i32>,
        taken: Option<i32>,
        remaining: Option<i32>,
    ) -> Self {
        let new_total = total.unwrap_or(self.total);
        let new_taken = taken.unwrap_or(self.taken);
        let new_remaining = if total.is_some() || taken.is_some() {
            new_total - new_taken
        } else {
            remaining.unwrap_or(self.remaining)
        };
        Self {
            total: new_total,
            taken: new_taken,
            remaining: new_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_balance_is_consistent() {
        let balance = LeaveBalance::new(50);
        assert_eq!(balance.total, 50);
        assert_eq!(balance.taken, 0);
        assert_eq!(balance.remaining, 50);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_deduct_moves_days_between_columns() {
        let mut balance = LeaveBalance::new(20);
        balance.deduct(5).unwrap();
        assert_eq!(balance.taken, 5);
        assert_eq!(balance.remaining, 15);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_deduct_exactly_remaining_is_allowed() {
        let mut balance = LeaveBalance::from_parts(20, 12, 8);
        balance.deduct(8).unwrap();
        assert_eq!(balance.remaining, 0);
        assert_eq!(balance.taken, 20);
        assert!(balance.is_consistent());
    }

    #[test]
    fn test_deduct_overdraw_is_rejected_without_side_effects() {
        let mut balance = LeaveBalance::from_parts(20, 15, 5);
        let err = balance.deduct(6).unwrap_err();
        assert!(matches!(
            err,
            LeaveError::InsufficientBalance {
                remaining: 5,
                requested: 6
            }
        ));
        // The ledger is untouched on failure.
        assert_eq!(balance, LeaveBalance::from_parts(20, 15, 5));
    }

    #[test]
    fn test_admin_override_recomputes_remaining() {
        let balance = LeaveBalance::from_parts(20, 5, 15);

        // Supplying total recomputes remaining, even against an
        // explicit (inconsistent) remaining value.
        let updated = balance.admin_override(Some(30), None, Some(999));
        assert_eq!(updated, LeaveBalance::from_parts(30, 5, 25));

        let updated = balance.admin_override(None, Some(10), Some(999));
        assert_eq!(updated, LeaveBalance::from_parts(20, 10, 10));
    }

    #[test]
    fn test_admin_override_remaining_only_passes_through() {
        // With neither total nor taken supplied there is nothing to
        // recompute from; the explicit remaining wins.
        let balance = LeaveBalance::from_parts(20, 5, 15);
        let updated = balance.admin_override(None, None, Some(12));
        assert_eq!(updated, LeaveBalance::from_parts(20, 5, 12));
    }

    #[test]
    fn test_admin_override_no_fields_is_identity() {
        let balance = LeaveBalance::from_parts(20, 5, 15);
        assert_eq!(balance.admin_override(None, None, None), balance);
    }
}

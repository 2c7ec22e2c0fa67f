//! Leave request repository.
//!
//! Applications, cancellations, and admin decisions all run through
//! here. Decisions that debit the ledger use an optimistic version
//! check on the employee row, so two concurrent approvals can never
//! overdraw the balance.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use staffhub_core::leave::{LeaveBalance, LeaveError, LeaveStatus, LeaveType, LeaveWorkflow};

use crate::entities::{employees, leave_requests, users};

/// Attempts before a version-guarded decision gives up.
const MAX_DECIDE_ATTEMPTS: u32 = 3;

/// Input for filing a new leave request.
#[derive(Debug, Clone)]
pub struct ApplyLeaveInput {
    /// The employee filing the request.
    pub employee_id: Uuid,
    /// Leave category.
    pub leave_type: LeaveType,
    /// First day of leave (inclusive).
    pub start_date: chrono::NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: chrono::NaiveDate,
    /// Why the leave is requested.
    pub reason: String,
}

/// A leave request joined with display fields for admin listings.
#[derive(Debug, Clone)]
pub struct LeaveWithNames {
    /// The request itself.
    pub leave: leave_requests::Model,
    /// The filing employee, if the profile still exists.
    pub employee: Option<employees::Model>,
    /// The deciding admin's user account, if decided.
    pub approver: Option<users::Model>,
}

/// Repository for the leave request lifecycle.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new leave request in the pending state.
    ///
    /// The duration is derived here from the date pair; the balance
    /// is not consulted until approval.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDateRange` or
    /// `LeaveError::MissingField` on invalid input, or
    /// `LeaveError::Database` if the insert fails.
    pub async fn apply(
        &self,
        input: ApplyLeaveInput,
    ) -> Result<leave_requests::Model, LeaveError> {
        let duration =
            LeaveWorkflow::validate_application(input.start_date, input.end_date, &input.reason)?;

        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();
        let leave = leave_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            leave_type: Set(input.leave_type.as_str().to_string()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            duration: Set(duration),
            reason: Set(input.reason),
            status: Set(LeaveStatus::Pending.as_str().to_string()),
            approved_by: Set(None),
            admin_comments: Set(String::new()),
            applied_at: Set(now),
            updated_at: Set(now),
        };

        leave.insert(&self.db).await.map_err(db_error)
    }

    /// Finds a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<leave_requests::Model>, LeaveError> {
        leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)
    }

    /// Lists an employee's own requests, newest application first.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if the query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<leave_requests::Model>, LeaveError> {
        leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_requests::Column::AppliedAt)
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    /// Lists every request with employee and approver display data.
    ///
    /// Requests whose employee has since been deleted still appear,
    /// with the employee slot empty.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<LeaveWithNames>, LeaveError> {
        let rows = leave_requests::Entity::find()
            .find_also_related(employees::Entity)
            .order_by_desc(leave_requests::Column::AppliedAt)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        let approver_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(leave, _)| leave.approved_by)
            .collect();
        let approvers: HashMap<Uuid, users::Model> = if approver_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(approver_ids))
                .all(&self.db)
                .await
                .map_err(db_error)?
                .into_iter()
                .map(|user| (user.id, user))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(leave, employee)| {
                let approver = leave
                    .approved_by
                    .and_then(|id| approvers.get(&id).cloned());
                LeaveWithNames {
                    leave,
                    employee,
                    approver,
                }
            })
            .collect())
    }

    /// Cancels a pending request on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::LeaveNotFound` if no such request,
    /// `LeaveError::NotRequestOwner` if `employee_id` did not file it,
    /// or `LeaveError::AlreadyDecided` if it is no longer pending.
    pub async fn cancel(
        &self,
        id: Uuid,
        employee_id: Uuid,
    ) -> Result<leave_requests::Model, LeaveError> {
        let leave = leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or(LeaveError::LeaveNotFound(id))?;

        if leave.employee_id != employee_id {
            return Err(LeaveError::NotRequestOwner);
        }

        let current = parse_status(&leave.status)?;
        let new_status = LeaveWorkflow::cancel(current)?;

        let mut model: leave_requests::ActiveModel = leave.into();
        model.status = Set(new_status.as_str().to_string());
        model.updated_at = Set(chrono::Utc::now().into());
        model.update(&self.db).await.map_err(db_error)
    }

    /// Applies an admin decision to a pending request.
    ///
    /// The checks run in a fixed order: the request must exist, then
    /// its employee must exist, then the request must still be
    /// pending, and only then is the decision string itself
    /// validated. Approval debits the employee ledger inside the same
    /// transaction, guarded by the employee row version; when the
    /// guard trips the whole attempt is retried against fresh state,
    /// up to a small bound.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::LeaveNotFound`, `LeaveError::EmployeeNotFound`,
    /// `LeaveError::AlreadyDecided`, `LeaveError::InvalidDecision`,
    /// `LeaveError::InsufficientBalance`, or
    /// `LeaveError::ConcurrentUpdate` when retries are exhausted.
    pub async fn decide(
        &self,
        id: Uuid,
        decision: &str,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<leave_requests::Model, LeaveError> {
        for _ in 0..MAX_DECIDE_ATTEMPTS {
            match self.try_decide(id, decision, decided_by, comments.clone()).await {
                Err(LeaveError::ConcurrentUpdate) => {}
                other => return other,
            }
        }
        Err(LeaveError::ConcurrentUpdate)
    }

    /// One version-guarded decision attempt.
    async fn try_decide(
        &self,
        id: Uuid,
        decision: &str,
        decided_by: Uuid,
        comments: Option<String>,
    ) -> Result<leave_requests::Model, LeaveError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let leave = leave_requests::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(LeaveError::LeaveNotFound(id))?;

        // Both outcomes require the employee; only approval touches
        // the ledger.
        let employee = employees::Entity::find_by_id(leave.employee_id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .ok_or(LeaveError::EmployeeNotFound)?;

        let current = parse_status(&leave.status)?;
        let action = LeaveWorkflow::decide(current, decision, decided_by, comments)?;

        if action.debits_ledger() {
            let mut balance = LeaveBalance::from_parts(
                employee.total_leaves,
                employee.leaves_taken,
                employee.remaining_leaves,
            );
            balance.deduct(leave.duration)?;

            let version = employee.row_version;
            let result = employees::Entity::update_many()
                .col_expr(employees::Column::LeavesTaken, Expr::value(balance.taken))
                .col_expr(
                    employees::Column::RemainingLeaves,
                    Expr::value(balance.remaining),
                )
                .col_expr(employees::Column::RowVersion, Expr::value(version + 1))
                .col_expr(
                    employees::Column::UpdatedAt,
                    Expr::value(action.decided_at),
                )
                .filter(employees::Column::Id.eq(employee.id))
                .filter(employees::Column::RowVersion.eq(version))
                .exec(&txn)
                .await
                .map_err(db_error)?;

            if result.rows_affected == 0 {
                txn.rollback().await.map_err(db_error)?;
                return Err(LeaveError::ConcurrentUpdate);
            }
        }

        let mut model: leave_requests::ActiveModel = leave.into();
        model.status = Set(action.new_status.as_str().to_string());
        model.approved_by = Set(Some(action.decided_by));
        model.admin_comments = Set(action.comments.unwrap_or_default());
        model.updated_at = Set(action.decided_at.into());
        let updated = model.update(&txn).await.map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;
        Ok(updated)
    }
}

fn db_error(err: DbErr) -> LeaveError {
    LeaveError::Database(err.to_string())
}

fn parse_status(raw: &str) -> Result<LeaveStatus, LeaveError> {
    LeaveStatus::parse(raw).ok_or_else(|| LeaveError::Database(format!("invalid stored status: {raw}")))
}

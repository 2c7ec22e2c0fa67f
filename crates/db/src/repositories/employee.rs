//! Employee repository for database operations.
//!
//! Creating an employee also creates its backing user account; both
//! rows are written in a single transaction so a failure on either
//! side leaves nothing behind.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use staffhub_core::auth::Role;
use staffhub_core::employee::{DEFAULT_TOTAL_LEAVES, EmployeeStatus};
use staffhub_core::leave::LeaveBalance;

use crate::entities::{employees, users};

/// Input for creating an employee with a linked user account.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Full name, shared by the employee and user rows.
    pub name: String,
    /// Email, shared by the employee and user rows.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Photo URL, empty if unset.
    pub photo: String,
    /// First day of employment.
    pub date_of_joining: NaiveDate,
    /// Salary in whole currency units.
    pub salary: i64,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Argon2id hash of the temporary password.
    pub password_hash: String,
}

/// Fields an admin may change on an employee profile.
///
/// The leave ledger is deliberately absent; it has its own endpoint
/// and its own update path.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeInput {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New photo URL.
    pub photo: Option<String>,
    /// New job title.
    pub position: Option<String>,
    /// New department name.
    pub department: Option<String>,
    /// New joining date.
    pub date_of_joining: Option<NaiveDate>,
    /// New salary.
    pub salary: Option<i64>,
    /// New employment status.
    pub status: Option<EmployeeStatus>,
    /// New linked user account.
    pub user_id: Option<Uuid>,
}

/// An employee together with its freshly created user account.
#[derive(Debug, Clone)]
pub struct CreatedEmployee {
    /// The employee profile.
    pub employee: employees::Model,
    /// The backing user account.
    pub user: users::Model,
}

/// Employee repository for CRUD and leave-ledger operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an employee and its linked user account atomically.
    ///
    /// The user gets the Employee role and the supplied temporary
    /// password hash; the employee starts with the default leave
    /// ledger and nothing taken.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails; neither row is kept.
    pub async fn create_with_user(
        &self,
        input: CreateEmployeeInput,
    ) -> Result<CreatedEmployee, DbErr> {
        let txn = self.db.begin().await?;
        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();
        let email = input.email.to_lowercase();

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            email: Set(email.clone()),
            password_hash: Set(input.password_hash),
            mobile_number: Set(input.phone_number.clone()),
            age: Set(0),
            role: Set(Role::Employee.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let user = user.insert(&txn).await?;

        let balance = LeaveBalance::new(DEFAULT_TOTAL_LEAVES);
        let employee = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(email),
            phone_number: Set(input.phone_number),
            position: Set(input.position),
            department: Set(input.department),
            photo: Set(input.photo),
            date_of_joining: Set(input.date_of_joining),
            salary: Set(input.salary),
            status: Set(input.status.as_str().to_string()),
            user_id: Set(Some(user.id)),
            total_leaves: Set(balance.total),
            leaves_taken: Set(balance.taken),
            remaining_leaves: Set(balance.remaining),
            row_version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let employee = employee.insert(&txn).await?;

        txn.commit().await?;
        Ok(CreatedEmployee { employee, user })
    }

    /// Finds an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds the employee profile linked to a user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find()
            .filter(employees::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
    }

    /// Lists all employees with their linked user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
    ) -> Result<Vec<(employees::Model, Option<users::Model>)>, DbErr> {
        employees::Entity::find()
            .find_also_related(users::Entity)
            .order_by_asc(employees::Column::Name)
            .all(&self.db)
            .await
    }

    /// Checks if an employee with this email exists.
    ///
    /// When `exclude_id` is set, that employee is ignored so an email
    /// change can be checked against every other row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut query = employees::Entity::find()
            .filter(employees::Column::Email.eq(email.to_lowercase()));
        if let Some(id) = exclude_id {
            query = query.filter(employees::Column::Id.ne(id));
        }
        let count = query.count(&self.db).await?;

        Ok(count > 0)
    }

    /// Updates an employee's profile fields.
    ///
    /// Returns `None` if the employee does not exist. The leave
    /// ledger and row version are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_profile(
        &self,
        id: Uuid,
        input: UpdateEmployeeInput,
    ) -> Result<Option<employees::Model>, DbErr> {
        let Some(existing) = employees::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut employee: employees::ActiveModel = existing.into();
        if let Some(name) = input.name {
            employee.name = Set(name);
        }
        if let Some(email) = input.email {
            employee.email = Set(email.to_lowercase());
        }
        if let Some(phone_number) = input.phone_number {
            employee.phone_number = Set(phone_number);
        }
        if let Some(photo) = input.photo {
            employee.photo = Set(photo);
        }
        if let Some(position) = input.position {
            employee.position = Set(position);
        }
        if let Some(department) = input.department {
            employee.department = Set(department);
        }
        if let Some(date_of_joining) = input.date_of_joining {
            employee.date_of_joining = Set(date_of_joining);
        }
        if let Some(salary) = input.salary {
            employee.salary = Set(salary);
        }
        if let Some(status) = input.status {
            employee.status = Set(status.as_str().to_string());
        }
        if let Some(user_id) = input.user_id {
            employee.user_id = Set(Some(user_id));
        }
        employee.updated_at = Set(chrono::Utc::now().into());

        let updated = employee.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Applies an admin override of the leave ledger.
    ///
    /// Remaining is recomputed whenever total or taken is supplied;
    /// see `LeaveBalance::admin_override`. The row version is bumped
    /// so an in-flight approval retries against the new ledger.
    ///
    /// Returns `None` if the employee does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_leave_balance(
        &self,
        id: Uuid,
        total: Option<i32>,
        taken: Option<i32>,
        remaining: Option<i32>,
    ) -> Result<Option<employees::Model>, DbErr> {
        let Some(existing) = employees::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let current = LeaveBalance::from_parts(
            existing.total_leaves,
            existing.leaves_taken,
            existing.remaining_leaves,
        );
        let next = current.admin_override(total, taken, remaining);
        let version = existing.row_version;

        let mut employee: employees::ActiveModel = existing.into();
        employee.total_leaves = Set(next.total);
        employee.leaves_taken = Set(next.taken);
        employee.remaining_leaves = Set(next.remaining);
        employee.row_version = Set(version + 1);
        employee.updated_at = Set(chrono::Utc::now().into());

        let updated = employee.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// Deletes an employee profile.
    ///
    /// The linked user account and any leave history are left in
    /// place; returns true if a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = employees::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

//! `SeaORM` Entity for the employees table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An employee profile with its leave ledger.
///
/// The ledger triple (total, taken, remaining) must satisfy
/// `remaining == total - taken` after every write; `row_version`
/// guards the ledger against concurrent read-check-write races.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email, unique and stored lowercased.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Job title.
    pub position: String,
    /// Department name (referenced by name, not id).
    pub department: String,
    /// Photo URL, empty if unset.
    pub photo: String,
    /// First day of employment.
    pub date_of_joining: Date,
    /// Salary in whole currency units.
    pub salary: i64,
    /// Employment status, stored as text.
    pub status: String,
    /// Linked user account, if any.
    pub user_id: Option<Uuid>,
    /// Total annual leave days granted.
    pub total_leaves: i32,
    /// Days consumed by approved requests.
    pub leaves_taken: i32,
    /// Days still available.
    pub remaining_leaves: i32,
    /// Optimistic-lock counter for ledger writes.
    pub row_version: i32,
    /// Creation timestamp.
    pub created_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The backing user account.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    /// Leave requests filed by this employee.
    #[sea_orm(has_many = "super::leave_requests::Entity")]
    LeaveRequests,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::leave_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

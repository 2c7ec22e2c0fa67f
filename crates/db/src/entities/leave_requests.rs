//! `SeaORM` Entity for the leave_requests table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A leave request and its decision audit trail.
///
/// Requests are never hard-deleted; deleting an employee leaves its
/// history behind, so `employee_id` carries no foreign key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    /// Primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// The employee who filed the request.
    pub employee_id: Uuid,
    /// Leave category, stored as text.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: Date,
    /// Last day of leave (inclusive).
    pub end_date: Date,
    /// Inclusive day count, derived from the date pair.
    pub duration: i32,
    /// Why the leave is requested.
    pub reason: String,
    /// Lifecycle status, stored as text.
    pub status: String,
    /// The admin who decided the request, if decided.
    pub approved_by: Option<Uuid>,
    /// Comments left by the deciding admin.
    pub admin_comments: String,
    /// When the request was filed.
    pub applied_at: DateTimeWithTimeZone,
    /// Last update timestamp.
    pub updated_at: DateTimeWithTimeZone,
}

/// Entity relations.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The filing employee.
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::EmployeeId",
        to = "super::employees::Column::Id"
    )]
    Employees,
    /// The deciding admin's user account.
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ApprovedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

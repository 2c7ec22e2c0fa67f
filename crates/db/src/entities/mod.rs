//! `SeaORM` entity definitions.
//!
//! Role, status, and leave-type columns are stored as text and
//! converted through the core enums at the repository edge, keeping
//! the schema portable between Postgres and SQLite.

pub mod departments;
pub mod employees;
pub mod leave_requests;
pub mod users;

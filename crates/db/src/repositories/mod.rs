//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod department;
pub mod employee;
pub mod leave;
pub mod user;

pub use department::{DepartmentRepository, UpdateDepartmentInput};
pub use employee::{
    CreateEmployeeInput, CreatedEmployee, EmployeeRepository, UpdateEmployeeInput,
};
pub use leave::{ApplyLeaveInput, LeaveRepository, LeaveWithNames};
pub use user::UserRepository;

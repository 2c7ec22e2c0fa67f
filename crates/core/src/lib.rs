//! Core business logic for StaffHub.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and role-based access checks
//! - `employee` - Employee status and leave allocation defaults
//! - `leave` - Leave request state machine and balance ledger

pub mod auth;
pub mod employee;
pub mod leave;

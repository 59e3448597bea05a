// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod dsl;
pub mod employee;
pub mod typed;

pub use dsl::QueryEmployeeService;
pub use employee::{DeleteOutcome, EmployeeService};
pub use typed::TypedEmployeeService;

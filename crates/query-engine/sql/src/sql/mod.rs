//! Definition of SQL AST, the string representation it is rendered to, and execution plans.

pub mod ast;
pub mod convert;
pub mod execution_plan;
pub mod helpers;
pub mod string;

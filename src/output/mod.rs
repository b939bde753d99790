//! Report persistence and console output

pub mod digest;
pub mod formatters;
pub mod json;
pub mod table;

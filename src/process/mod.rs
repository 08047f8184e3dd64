// src/process/mod.rs
pub mod date_parser;
pub mod pace;
pub mod raw_table;
pub mod utils;
pub mod validate;

pub use pace::{to_minutes, PaceValue};
pub use raw_table::{Cell, RawTable};
pub use validate::{validate, CleanRecord, CleanTable, Column, ValidationError};

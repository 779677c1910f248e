//! Core domain types and models
//!
//! Defines the table/column container, the scalar [`Value`] model with its
//! closed set of [`TypeTag`]s, and the library-wide error type.

pub mod errors;
pub mod result;
pub mod table;
pub mod value;

pub use errors::CleanError;
pub use result::Result;
pub use table::{Column, Table};
pub use value::{TypeTag, Value};

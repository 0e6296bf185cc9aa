//! Core domain types for the carstore provider: the car record tracked in
//! state, the diagnostics report lifecycle calls accumulate into, and the
//! attribute schemas raw configuration is validated against.

pub mod diagnostics;
pub mod record;
pub mod schema;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use record::CarRecord;
pub use schema::{Attribute, AttributeType, Schema};

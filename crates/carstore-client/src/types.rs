//! Wire payload types for the carstore API.

use serde::{Deserialize, Serialize};

/// Response body of a successful create. The API keeps this minimal: only
/// the server-assigned id comes back, never an echo of the submitted
/// attributes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCar {
    /// Server-assigned identifier.
    pub id: String,
}

/// A car as the remote API represents it. Unlike a state record, the id is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub year: i64,
}

/// Request body shared by create and update.
#[derive(Debug, Serialize)]
pub(crate) struct CarBody<'a> {
    pub model: &'a str,
    pub year: i64,
}

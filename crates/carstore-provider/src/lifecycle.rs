//! Lifecycle reconciliation for the car resource.
//!
//! Each lifecycle call is an independent transition: the host hands over
//! the planned and prior values the transition needs, the reconciler
//! validates them, drives exactly one API call, and returns what the host
//! should now persist. Nothing is retried and nothing is cached across
//! calls. Wherever the remote API returns a representation (read, update),
//! that representation wins over local values, so drift is surfaced
//! instead of silently accumulating.

use std::sync::Arc;

use serde_json::Value;

use carstore_client::{Car, CarstoreClient};
use carstore_core::{Attribute, CarRecord, Diagnostics, Schema};

use crate::config::ProviderHandle;

/// One lifecycle transition request. Each variant carries the raw values
/// its transition consumes.
#[derive(Debug, Clone)]
pub enum LifecycleRequest {
    /// Create the remote object from a planned record that has no id yet.
    Create {
        /// Desired record from configuration.
        planned: Value,
    },
    /// Refresh state from the remote object, detecting drift and deletion.
    Read {
        /// Record from the last persisted state.
        prior: Value,
    },
    /// Replace the remote object's attributes with the planned ones.
    Update { planned: Value, prior: Value },
    /// Delete the remote object.
    Delete { prior: Value },
}

/// What the host should do with persisted state after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewState {
    /// Persist this record as the new authoritative state.
    Record(CarRecord),
    /// Drop the record: the remote object no longer exists.
    Removed,
    /// Keep the previously persisted state untouched.
    Unchanged,
}

/// Outcome of one lifecycle transition: a state disposition plus the
/// diagnostics accumulated along the way.
///
/// A result whose diagnostics contain an error always carries
/// [`NewState::Unchanged`]; failed transitions never move state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleResult {
    pub new_state: NewState,
    pub diagnostics: Diagnostics,
}

impl LifecycleResult {
    /// `true` when the transition failed and recorded at least one error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    fn record(record: CarRecord) -> Self {
        Self {
            new_state: NewState::Record(record),
            diagnostics: Diagnostics::new(),
        }
    }

    fn removed() -> Self {
        Self {
            new_state: NewState::Removed,
            diagnostics: Diagnostics::new(),
        }
    }

    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            new_state: NewState::Unchanged,
            diagnostics,
        }
    }
}

/// The car resource reconciler.
///
/// Stateless across calls: every [`apply`](Self::apply) is a function of
/// its inputs plus a single exchange with the remote API.
#[derive(Debug, Clone)]
pub struct CarResource {
    client: CarstoreClient,
}

impl CarResource {
    /// Resource type name advertised to the host.
    pub const TYPE_NAME: &'static str = "carstore_car";

    /// Creates a reconciler backed by a configured provider.
    #[must_use]
    pub fn new(provider: &Arc<ProviderHandle>) -> Self {
        let client = CarstoreClient::with_http_client(
            provider.base_url().clone(),
            provider.http_client().clone(),
        );
        Self { client }
    }

    /// Declarative schema for car configuration: a computed `id`, a
    /// required `model`, a required integer `year`.
    pub fn schema() -> Schema {
        Schema::new()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("model", Attribute::required_string())
            .with_attribute("year", Attribute::required_int64())
    }

    /// Applies one lifecycle transition.
    pub async fn apply(&self, request: LifecycleRequest) -> LifecycleResult {
        match request {
            LifecycleRequest::Create { planned } => self.create(&planned).await,
            LifecycleRequest::Read { prior } => self.read(&prior).await,
            LifecycleRequest::Update { planned, prior } => self.update(&planned, &prior).await,
            LifecycleRequest::Delete { prior } => self.delete(&prior).await,
        }
    }

    async fn create(&self, planned: &Value) -> LifecycleResult {
        tracing::debug!("Beginning car creation");
        let mut diagnostics = Diagnostics::new();
        let Some(planned) = decode_record(planned, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };

        match self.client.create_car(&planned.model, planned.year).await {
            Ok(created) => {
                tracing::debug!("Created car with id {}", created.id);
                // Create responses carry only the id; model and year stay
                // as planned.
                LifecycleResult::record(planned.with_id(created.id))
            }
            Err(e) => {
                tracing::warn!("Create failed: {}", e);
                diagnostics.add_error("Error creating car", e.to_string());
                LifecycleResult::failed(diagnostics)
            }
        }
    }

    async fn read(&self, prior: &Value) -> LifecycleResult {
        tracing::debug!("Beginning car read");
        let mut diagnostics = Diagnostics::new();
        let Some(prior) = decode_record(prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };
        let Some(id) = require_id(&prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };

        match self.client.read_car(id).await {
            Ok(Some(car)) => {
                tracing::debug!("Read car {}", car.id);
                LifecycleResult::record(record_from_remote(car))
            }
            Ok(None) => {
                tracing::debug!("Car {} no longer exists remotely, removing from state", id);
                LifecycleResult::removed()
            }
            Err(e) => {
                tracing::warn!("Read failed for car {}: {}", id, e);
                diagnostics.add_error("Error reading car", e.to_string());
                LifecycleResult::failed(diagnostics)
            }
        }
    }

    async fn update(&self, planned: &Value, prior: &Value) -> LifecycleResult {
        tracing::debug!("Beginning car update");
        let mut diagnostics = Diagnostics::new();
        let Some(planned) = decode_record(planned, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };
        let Some(prior) = decode_record(prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };
        let Some(id) = require_id(&prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };

        match self.client.update_car(id, &planned.model, planned.year).await {
            Ok(car) => {
                tracing::debug!("Updated car {}", car.id);
                // The server echo wins over the planned values.
                LifecycleResult::record(record_from_remote(car))
            }
            Err(e) => {
                tracing::warn!("Update failed for car {}: {}", id, e);
                diagnostics.add_error("Error updating car", e.to_string());
                LifecycleResult::failed(diagnostics)
            }
        }
    }

    async fn delete(&self, prior: &Value) -> LifecycleResult {
        tracing::debug!("Beginning car deletion");
        let mut diagnostics = Diagnostics::new();
        let Some(prior) = decode_record(prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };
        let Some(id) = require_id(&prior, &mut diagnostics) else {
            return LifecycleResult::failed(diagnostics);
        };

        match self.client.delete_car(id).await {
            Ok(()) => {
                tracing::debug!("Deleted car {}", id);
                LifecycleResult::removed()
            }
            Err(e) => {
                tracing::warn!("Delete failed for car {}: {}", id, e);
                diagnostics.add_error("Error deleting car", e.to_string());
                LifecycleResult::failed(diagnostics)
            }
        }
    }
}

/// Validates a raw value against the car schema and decodes it. Appends
/// diagnostics and returns `None` when the value cannot be used; nothing
/// goes over the wire in that case.
fn decode_record(value: &Value, diagnostics: &mut Diagnostics) -> Option<CarRecord> {
    let report = CarResource::schema().validate(value);
    let failed = report.has_errors();
    diagnostics.extend(report);
    if failed {
        return None;
    }

    match serde_json::from_value(value.clone()) {
        Ok(record) => Some(record),
        Err(e) => {
            diagnostics.add_error(
                "Invalid car configuration",
                format!("Could not decode car record: {e}"),
            );
            None
        }
    }
}

fn require_id<'a>(record: &'a CarRecord, diagnostics: &mut Diagnostics) -> Option<&'a str> {
    match record.remote_id() {
        Some(id) => Some(id),
        None => {
            diagnostics.add_error(
                "Missing car id",
                "Prior state does not carry a car id; the record was never created",
            );
            None
        }
    }
}

fn record_from_remote(car: Car) -> CarRecord {
    CarRecord {
        id: Some(car.id),
        model: car.model,
        year: car.year,
    }
}

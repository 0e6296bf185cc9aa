//! Declarative lifecycle provider for the carstore API.
//!
//! # Overview
//!
//! A host orchestrator drives this provider through three touchpoints:
//!
//! 1. [`ProviderHandle::configure`] runs the one-time configuration
//!    handshake and yields the shared provider state.
//! 2. [`CarResource::new`] constructs a reconciler for one managed record.
//! 3. [`CarResource::apply`] executes a single [`LifecycleRequest`] and
//!    returns a [`LifecycleResult`]: the new state disposition plus a
//!    [`Diagnostics`](carstore_core::Diagnostics) report.
//!
//! The provider persists nothing itself. State lives with the host; every
//! call receives what it needs and says what should be stored afterwards.
//!
//! # Example
//!
//! ```ignore
//! use carstore_provider::{CarResource, LifecycleRequest, NewState, ProviderHandle};
//! use serde_json::json;
//!
//! let provider = ProviderHandle::configure(&json!({
//!     "base_url": "http://localhost:5000",
//! }))?;
//!
//! let resource = CarResource::new(&provider);
//! let result = resource
//!     .apply(LifecycleRequest::Create {
//!         planned: json!({"model": "Model S", "year": 2023}),
//!     })
//!     .await;
//!
//! match result.new_state {
//!     NewState::Record(record) => println!("created {:?}", record.id),
//!     _ => eprintln!("create failed: {:?}", result.diagnostics),
//! }
//! ```

pub mod config;
pub mod lifecycle;

pub use config::{ProviderConfig, ProviderHandle, provider_schema};
pub use lifecycle::{CarResource, LifecycleRequest, LifecycleResult, NewState};

/// Provider type name advertised to the host.
pub const PROVIDER_TYPE_NAME: &str = "carstore";

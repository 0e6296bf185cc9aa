use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;

use carstore_core::CarRecord;
use carstore_provider::{
    CarResource, LifecycleRequest, LifecycleResult, NewState, ProviderHandle,
};

use crate::cli::{CreateArgs, UpdateArgs};
use crate::output::{print_diagnostics, print_record, print_success};
use crate::state;

pub fn configure_provider(base_url: &str) -> Result<Arc<ProviderHandle>> {
    match ProviderHandle::configure(&json!({"base_url": base_url})) {
        Ok(provider) => Ok(provider),
        Err(diagnostics) => {
            print_diagnostics(&diagnostics);
            anyhow::bail!("Provider configuration failed")
        }
    }
}

pub async fn create(
    provider: &Arc<ProviderHandle>,
    state_path: &Path,
    args: &CreateArgs,
) -> Result<()> {
    if state::load(state_path)?.is_some() {
        anyhow::bail!(
            "Already tracking a car in {}; delete it before creating another",
            state_path.display()
        );
    }

    let resource = CarResource::new(provider);
    let result = resource
        .apply(LifecycleRequest::Create {
            planned: json!({"model": args.model, "year": args.year}),
        })
        .await;

    let result = ensure_success(result, "Create")?;
    if let NewState::Record(record) = result.new_state {
        state::save(state_path, &record)?;
        print_success(&format!(
            "Created car {}",
            record.remote_id().unwrap_or("(unknown)")
        ));
        print_record(&record);
    }
    Ok(())
}

pub async fn refresh(provider: &Arc<ProviderHandle>, state_path: &Path) -> Result<()> {
    let prior = require_state(state_path)?;
    let resource = CarResource::new(provider);
    let result = resource
        .apply(LifecycleRequest::Read {
            prior: serde_json::to_value(&prior)?,
        })
        .await;

    let result = ensure_success(result, "Refresh")?;
    match result.new_state {
        NewState::Record(record) => {
            state::save(state_path, &record)?;
            print_success("Refreshed car state");
            print_record(&record);
        }
        NewState::Removed => {
            state::remove(state_path)?;
            print_success("Car was deleted remotely; dropped it from local state");
        }
        NewState::Unchanged => {}
    }
    Ok(())
}

pub async fn update(
    provider: &Arc<ProviderHandle>,
    state_path: &Path,
    args: &UpdateArgs,
) -> Result<()> {
    let prior = require_state(state_path)?;
    let resource = CarResource::new(provider);
    let result = resource
        .apply(LifecycleRequest::Update {
            planned: json!({"model": args.model, "year": args.year}),
            prior: serde_json::to_value(&prior)?,
        })
        .await;

    let result = ensure_success(result, "Update")?;
    if let NewState::Record(record) = result.new_state {
        state::save(state_path, &record)?;
        print_success("Updated car");
        print_record(&record);
    }
    Ok(())
}

pub async fn delete(provider: &Arc<ProviderHandle>, state_path: &Path) -> Result<()> {
    let prior = require_state(state_path)?;
    let resource = CarResource::new(provider);
    let result = resource
        .apply(LifecycleRequest::Delete {
            prior: serde_json::to_value(&prior)?,
        })
        .await;

    let result = ensure_success(result, "Delete")?;
    if result.new_state == NewState::Removed {
        state::remove(state_path)?;
        print_success(&format!(
            "Deleted car {}",
            prior.remote_id().unwrap_or("(unknown)")
        ));
    }
    Ok(())
}

pub fn show(state_path: &Path) -> Result<()> {
    match state::load(state_path)? {
        Some(record) => print_record(&record),
        None => println!("No car is tracked (no state at {})", state_path.display()),
    }
    Ok(())
}

fn require_state(state_path: &Path) -> Result<CarRecord> {
    state::load(state_path)?.with_context(|| {
        format!(
            "No car is tracked yet (no state at {}); run create first",
            state_path.display()
        )
    })
}

fn ensure_success(result: LifecycleResult, action: &str) -> Result<LifecycleResult> {
    if result.has_errors() {
        print_diagnostics(&result.diagnostics);
        anyhow::bail!("{action} failed");
    }
    Ok(result)
}

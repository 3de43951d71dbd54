use std::path::Path;

use anyhow::{Context, Result};
use merit_core::{Fleet, LoadRequest};
use tracing::info;

/// Schema-check a payload and price its fleet without dispatching.
pub fn handle(payload: &Path) -> Result<()> {
    let request = LoadRequest::from_path(payload)
        .with_context(|| format!("reading payload '{}'", payload.display()))?;
    let fleet = Fleet::from_request(&request)
        .with_context(|| format!("validating payload '{}'", payload.display()))?;
    info!(plants = fleet.len(), "payload is valid");
    println!(
        "{}: ok ({} plants, load {} MW, capacity {:.1} MW)",
        payload.display(),
        fleet.len(),
        request.load_mw().value(),
        fleet.total_capacity().value()
    );
    Ok(())
}

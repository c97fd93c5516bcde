//! `slth catalog` -- inspect the service dependency catalog.

use anyhow::Context;
use serde::Serialize;

use sleuth_catalog::{ChainDirection, ServiceCatalog};
use sleuth_config::SleuthConfig;
use sleuth_core::ids::ServiceId;
use sleuth_core::responses::CatalogListResponse;

use crate::cli::{CatalogAction, Direction, GlobalFlags};
use crate::commands::load_catalog;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ChainResponse {
    service: ServiceId,
    direction: String,
    chain: Vec<ServiceId>,
}

pub fn handle(
    action: &CatalogAction,
    flags: &GlobalFlags,
    config: &SleuthConfig,
) -> anyhow::Result<()> {
    let catalog = load_catalog(flags, config)?;
    match action {
        CatalogAction::List => {
            let response = CatalogListResponse {
                services: catalog.services().to_vec(),
                total: catalog.len(),
            };
            output(&response, flags.format)
        }
        CatalogAction::Show { service } => {
            let resolved = resolve(&catalog, service)?;
            let details = catalog
                .details(&resolved)
                .context("service disappeared between resolve and details")?;
            output(&details, flags.format)
        }
        CatalogAction::Chain { service, direction } => {
            let resolved = resolve(&catalog, service)?;
            let dir = match direction {
                Direction::Upstream => ChainDirection::Upstream,
                Direction::Downstream => ChainDirection::Downstream,
            };
            let response = ChainResponse {
                chain: catalog.dependency_chain(&resolved, dir),
                service: resolved,
                direction: dir.to_string(),
            };
            output(&response, flags.format)
        }
    }
}

fn resolve(catalog: &ServiceCatalog, name: &str) -> anyhow::Result<ServiceId> {
    catalog
        .resolve(name)
        .map(|s| s.id.clone())
        .with_context(|| format!("unknown service '{name}'; try `slth catalog list`"))
}

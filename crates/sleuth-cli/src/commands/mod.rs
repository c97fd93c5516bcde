pub mod catalog;
pub mod investigate;

use std::path::PathBuf;

use anyhow::Context;

use sleuth_catalog::ServiceCatalog;
use sleuth_config::SleuthConfig;

use crate::cli::GlobalFlags;

/// Load the catalog from the flag override or the configured path.
pub fn load_catalog(flags: &GlobalFlags, config: &SleuthConfig) -> anyhow::Result<ServiceCatalog> {
    let path = flags
        .catalog
        .clone()
        .or_else(|| {
            config
                .general
                .is_configured()
                .then(|| PathBuf::from(&config.general.catalog_path))
        })
        .context(
            "no service catalog configured; pass --catalog or set general.catalog_path \
             in .sleuth/config.toml",
        )?;
    ServiceCatalog::from_path(&path)
        .with_context(|| format!("failed to load service catalog from {}", path.display()))
}

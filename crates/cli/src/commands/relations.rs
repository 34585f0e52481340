//! Relation resolution command.
//!
//! # Usage
//!
//! ```bash
//! # Offline, parent rows from a file
//! mx-cli relations --input request.json --rows rows.json
//!
//! # Against the host catalog database
//! mx-cli relations --input request.json
//! ```
//!
//! # Environment Variables
//!
//! - `EXPORT_DATABASE_URL` - required when `--rows` is omitted
//! - `EXPORT_LOOKUP_BATCH_SIZE` - products per parent lookup
//! - `EXPORT_DIRECT_LINK_FALLBACK` - export unmatched composites under their own ID

use std::path::Path;

use mcommerce_export::catalog::create_pool;
use mcommerce_export::{
    ExportConfig, ExportRequest, InMemoryCatalog, PgCatalog, RelationExport, RelationExporter,
};
use tracing::info;

/// Resolve the relations of one product and print them as JSON.
///
/// # Arguments
///
/// * `config` - Loaded export configuration
/// * `input` - Path to the request JSON file
/// * `rows` - Path to a parent rows JSON file; the catalog database is used when `None`
/// * `report` - Print the full export report instead of just the relation lists
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, the database URL is
/// missing, or a catalog lookup fails.
pub async fn resolve(
    config: &ExportConfig,
    input: &Path,
    rows: Option<&Path>,
    report: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = ExportRequest::from_json_file(input).await?;
    info!(references = request.len(), "Loaded relation request");

    let export: RelationExport = if let Some(rows) = rows {
        let catalog = InMemoryCatalog::from_json_file(rows).await?;
        info!(rows = catalog.len(), "Using parent rows from file");
        RelationExporter::new(catalog, config.relations)
            .export(&request)
            .await?
    } else {
        let pool = create_pool(config.require_database_url()?).await?;
        info!("Connected to catalog database");
        RelationExporter::new(PgCatalog::new(pool), config.relations)
            .export(&request)
            .await?
    };

    let json = if report {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_json::to_string_pretty(&export.relations)?
    };
    super::print_json(&json);

    Ok(())
}

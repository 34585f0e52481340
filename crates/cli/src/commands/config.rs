//! Configuration inspection command.

use mcommerce_export::ExportConfig;
use serde_json::json;

/// Print the effective configuration with the database URL redacted.
///
/// # Errors
///
/// Returns an error if the summary cannot be serialized.
pub fn show(config: &ExportConfig) -> Result<(), Box<dyn std::error::Error>> {
    let summary = json!({
        "database_url": config.database_url.as_ref().map(|_| "[REDACTED]"),
        "lookup_batch_size": config.relations.lookup_batch_size.get(),
        "direct_link_fallback": config.relations.direct_link_fallback,
        "sentry": config.sentry_dsn.is_some(),
    });

    super::print_json(&serde_json::to_string_pretty(&summary)?);
    Ok(())
}

//! Export command implementation
//!
//! This module implements the `export` command, which exports the configured
//! resource types from commercetools as CSV files.

use crate::cli::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::config::load_config;
use crate::core::export::{ExportCoordinator, ExportSummary};
use crate::domain::{ExportOutcome, ExportSpec, ResourceType};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Only export these resource types (comma-separated, e.g. order,customer)
    #[arg(long, value_delimiter = ',')]
    pub resource: Vec<ResourceType>,

    /// Dry run mode - fetch and flatten, but don't upload
    #[arg(long)]
    pub dry_run: bool,

    /// Write the field paths as a header row
    #[arg(long)]
    pub include_header: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if self.include_header {
            tracing::info!("Enabling header row from CLI");
            config.export.include_header = true;
        }

        let specs = match config
            .export
            .export_specs()
            .and_then(|specs| select_specs(specs, &self.resource))
        {
            Ok(specs) => specs,
            Err(e) => {
                tracing::error!(error = %e, "Invalid export selection");
                eprintln!("Invalid export selection: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let coordinator = match ExportCoordinator::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(EXIT_CONNECTION);
            }
        };

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No files will be uploaded");
            println!();
        }

        println!("🚀 Starting export to {}...", coordinator.sink_description());
        println!();

        let summary = coordinator.execute_export(&specs).await;
        print_summary(&summary);

        let exit_code = if summary.is_successful() {
            println!("✅ Export completed successfully!");
            EXIT_SUCCESS
        } else {
            println!("⚠️  Export completed with failures");
            EXIT_PARTIAL
        };

        Ok(exit_code)
    }
}

/// Restrict the configured specs to the requested resource types
///
/// An empty selection keeps every configured spec. Requesting a type that has
/// no configured fields is an error.
pub fn select_specs(
    specs: Vec<ExportSpec>,
    requested: &[ResourceType],
) -> Result<Vec<ExportSpec>, String> {
    if requested.is_empty() {
        return Ok(specs);
    }

    if let Some(missing) = requested
        .iter()
        .find(|rt| !specs.iter().any(|spec| spec.resource_type == **rt))
    {
        return Err(format!(
            "Resource type '{missing}' is not configured in [[export.resources]]"
        ));
    }

    Ok(specs
        .into_iter()
        .filter(|spec| requested.contains(&spec.resource_type))
        .collect())
}

fn print_summary(summary: &ExportSummary) {
    println!();
    println!("📊 Export Summary:");
    for result in summary.results.values() {
        match result.outcome {
            ExportOutcome::Success => println!(
                "  {}: {} ({} records, {} rows, {} bytes) -> {}",
                result.resource_type,
                result.outcome,
                result.records,
                result.rows,
                result.bytes,
                result.blob_name.as_deref().unwrap_or_default()
            ),
            ExportOutcome::Failed => println!(
                "  {}: {} ({})",
                result.resource_type,
                result.outcome,
                result.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
}

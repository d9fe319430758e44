use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tokio::fs;
use tracing::info;

use backend_application::commands::import_commands;
use backend_application::queries::export_queries;
use backend_domain::{ImportSummary, RawRow, SheetFormat};
use backend_infrastructure::AppConfig;

use crate::context::AppContext;

/// Imports one file into the configured store and prints the summary as JSON.
pub async fn run_import(config: AppConfig, path: &Path) -> Result<()> {
    let context = AppContext::new(&config).await?;
    let summary = import_file(&context, path).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Writes the export workbook. A directory (or no path) receives the
/// generated timestamped file name.
pub async fn run_export(config: AppConfig, path: Option<PathBuf>) -> Result<()> {
    let context = AppContext::new(&config).await?;
    let written = export_file(&context, path).await?;
    println!("{}", written.display());
    Ok(())
}

pub async fn import_file(context: &AppContext, path: &Path) -> Result<ImportSummary> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let summary = if extension == "json" {
        let rows: Vec<RawRow> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse rows from {}", path.display()))?;
        import_commands::import_rows(&context.state, rows).await?
    } else {
        let format = SheetFormat::from_extension(&extension)
            .ok_or_else(|| anyhow!("unsupported file type: {}", path.display()))?;
        import_commands::import_spreadsheet(&context.state, &bytes, format).await?
    };
    info!("imported {}", path.display());
    Ok(summary)
}

pub async fn export_file(context: &AppContext, path: Option<PathBuf>) -> Result<PathBuf> {
    let export = export_queries::export_workbook(&context.state).await?;
    let target = match path {
        Some(path) if !path.is_dir() => path,
        Some(dir) => dir.join(&export.file_name),
        None => PathBuf::from(&export.file_name),
    };
    fs::write(&target, &export.bytes)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    info!("wrote {} rows to {}", export.row_count, target.display());
    Ok(target)
}

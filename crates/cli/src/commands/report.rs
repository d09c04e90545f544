//! Report export command.
//!
//! # Usage
//!
//! ```bash
//! twill report export --kind inventory --out ./inventory.xlsx
//! twill report export --kind transactions --start-date 2026-07-01 --end-date 2026-07-31
//! ```

use std::path::{Path, PathBuf};

use twill_admin::api::types::{ReportKind, ReportRange};

use super::{CliError, Operator};

/// Download an Excel export to disk.
///
/// Without `--out`, the backend-provided filename is written to the current
/// directory.
///
/// # Errors
///
/// Returns an error if the kind is unknown, the download fails, or the file
/// cannot be written.
pub async fn export(
    kind: &str,
    range: ReportRange,
    out: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    let kind: ReportKind = kind
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("unknown report kind: {kind}")))?;

    let operator = Operator::connect().await?;
    let file = operator.authorized().export_report(kind, &range).await?;

    let path = out.unwrap_or_else(|| Path::new(&file.filename).to_path_buf());
    tokio::fs::write(&path, &file.bytes).await?;

    tracing::info!(
        "Exported {} report: {} ({} bytes)",
        kind,
        path.display(),
        file.bytes.len()
    );

    Ok(path)
}

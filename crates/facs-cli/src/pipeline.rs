//! Plan pipeline stages: load the panel, resolve output paths, write files.
//!
//! Each stage is a standalone function so the command layer can wrap them in
//! spans and the integration tests can call them directly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use facs_ingest::{normalize_table, read_csv_table};
use facs_model::{AntibodyClass, OutputFormat, OutputPaths, ReagentRow, StainingPlan};
use facs_report::{layout_plans, write_plan_csv_file, write_plan_workbook_file};

/// Reads and normalizes the reagent panel CSV.
pub fn load_panel(path: &Path) -> Result<Vec<ReagentRow>> {
    let table = read_csv_table(path)?;
    debug!(rows = table.rows.len(), "panel table read");
    let rows = normalize_table(&table)?;
    Ok(rows)
}

/// Output file stem derived from the panel file name.
pub fn output_base_name(panel: &Path) -> String {
    let stem = panel
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("panel");
    format!("{stem}-fmo-plan")
}

/// Default output directory: `output/` beside the panel file.
pub fn default_output_dir(panel: &Path) -> PathBuf {
    match panel.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("output"),
        _ => PathBuf::from("output"),
    }
}

/// Resolves the files a run will write for the requested formats.
pub fn resolve_output_paths(
    output_dir: &Path,
    panel: &Path,
    formats: &[OutputFormat],
) -> OutputPaths {
    let base = output_base_name(panel);
    let mut paths = OutputPaths::default();
    for format in formats {
        match format {
            OutputFormat::Csv => paths.csv = Some(output_dir.join(format!("{base}.csv"))),
            OutputFormat::Xml => {
                paths.workbook_xml = Some(output_dir.join(format!("{base}.xml")));
            }
        }
    }
    paths
}

/// Renders the plans once and writes the document to every resolved path.
pub fn write_outputs(
    plans: &BTreeMap<AntibodyClass, StainingPlan>,
    paths: &OutputPaths,
) -> Result<Vec<PathBuf>> {
    let document = layout_plans(plans);
    let mut written = Vec::new();
    if let Some(path) = &paths.csv {
        write_plan_csv_file(&document, path)?;
        info!(path = %path.display(), "csv written");
        written.push(path.clone());
    }
    if let Some(path) = &paths.workbook_xml {
        write_plan_workbook_file(&document, path)?;
        info!(path = %path.display(), "workbook written");
        written.push(path.clone());
    }
    Ok(written)
}

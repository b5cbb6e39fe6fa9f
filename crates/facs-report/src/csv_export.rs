//! Sectioned CSV rendition of the plan document.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use facs_model::{CellValue, PlanDocument};

use crate::layout::format_number;

/// Writes the document as CSV. Rows keep their natural widths, so the writer
/// runs in flexible mode; a separator row comes out as a lone `""` field.
pub fn write_plan_csv<W: Write>(document: &PlanDocument, sink: W) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(sink);
    for row in &document.rows {
        let record: Vec<String> = row.iter().map(cell_text).collect();
        writer.write_record(&record).context("write csv record")?;
    }
    writer.flush().context("flush csv output")?;
    Ok(())
}

/// Writes the document to `path`, creating parent directories as needed.
pub fn write_plan_csv_file(document: &PlanDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory: {}", parent.display()))?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("create csv file: {}", path.display()))?;
    write_plan_csv(document, file).with_context(|| format!("write csv: {}", path.display()))
}

fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(text) => text.clone(),
        CellValue::Number(value) => format_number(*value),
        CellValue::Empty => String::new(),
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Export formats for the rendered plan document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Csv,
    /// Excel 2003 SpreadsheetML workbook.
    Xml,
}

/// Files written for one plan run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputPaths {
    pub csv: Option<PathBuf>,
    pub workbook_xml: Option<PathBuf>,
}

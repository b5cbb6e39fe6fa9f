use serde::{Deserialize, Serialize};

/// Cell of a rendered plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Rendered plan document: the flat row sequence every writer consumes.
///
/// Rows are positional and ragged; a separator row is a single empty cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    pub rows: Vec<Vec<CellValue>>,
}

impl PlanDocument {
    pub fn new() -> Self {
        PlanDocument::default()
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) {
        self.rows.push(cells);
    }

    /// Visual separator between blocks.
    pub fn push_blank(&mut self) {
        self.rows.push(vec![CellValue::Empty]);
    }
}

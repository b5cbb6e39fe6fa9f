//! Excel-openable workbook rendition of the plan document.
//!
//! Targets the single-file SpreadsheetML dialect (Excel 2003 XML): one
//! worksheet, typed cells, no styling. Excel and LibreOffice open it
//! natively, which keeps the output usable at the bench without an xlsx
//! container.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use facs_model::{CellValue, PlanDocument};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::layout::{WORKSHEET_NAME, format_number};

/// SpreadsheetML namespace; doubles as the `ss` prefix for typed cells.
pub const SPREADSHEET_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
/// Office namespace carrying the document properties block.
pub const OFFICE_NS: &str = "urn:schemas-microsoft-com:office:office";
/// Excel namespace, expected by Excel's sniffer alongside the PI.
pub const EXCEL_NS: &str = "urn:schemas-microsoft-com:office:excel";

/// Writes the document as a SpreadsheetML workbook stamped with the current
/// time.
pub fn write_plan_workbook<W: Write>(document: &PlanDocument, sink: W) -> Result<()> {
    write_plan_workbook_with_created(document, sink, Utc::now())
}

/// Same as [`write_plan_workbook`] with an explicit creation timestamp, so
/// output can be compared byte for byte.
pub fn write_plan_workbook_with_created<W: Write>(
    document: &PlanDocument,
    sink: W,
    created: DateTime<Utc>,
) -> Result<()> {
    let mut xml = Writer::new_with_indent(sink, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::PI(BytesPI::new(
        "mso-application progid=\"Excel.Sheet\"",
    )))?;

    let mut workbook = BytesStart::new("Workbook");
    workbook.push_attribute(("xmlns", SPREADSHEET_NS));
    workbook.push_attribute(("xmlns:o", OFFICE_NS));
    workbook.push_attribute(("xmlns:x", EXCEL_NS));
    workbook.push_attribute(("xmlns:ss", SPREADSHEET_NS));
    xml.write_event(Event::Start(workbook))?;

    let mut properties = BytesStart::new("DocumentProperties");
    properties.push_attribute(("xmlns", OFFICE_NS));
    xml.write_event(Event::Start(properties))?;
    write_text_element(
        &mut xml,
        "Created",
        &created.to_rfc3339_opts(SecondsFormat::Secs, true),
    )?;
    xml.write_event(Event::End(BytesEnd::new("DocumentProperties")))?;

    let mut worksheet = BytesStart::new("Worksheet");
    worksheet.push_attribute(("ss:Name", WORKSHEET_NAME));
    xml.write_event(Event::Start(worksheet))?;
    xml.write_event(Event::Start(BytesStart::new("Table")))?;

    for row in &document.rows {
        xml.write_event(Event::Start(BytesStart::new("Row")))?;
        for cell in row {
            write_cell(&mut xml, cell)?;
        }
        xml.write_event(Event::End(BytesEnd::new("Row")))?;
    }

    xml.write_event(Event::End(BytesEnd::new("Table")))?;
    xml.write_event(Event::End(BytesEnd::new("Worksheet")))?;
    xml.write_event(Event::End(BytesEnd::new("Workbook")))?;
    Ok(())
}

/// Writes the workbook to `path`, creating parent directories as needed.
pub fn write_plan_workbook_file(document: &PlanDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output directory: {}", parent.display()))?;
        }
    }
    let file =
        File::create(path).with_context(|| format!("create workbook file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    write_plan_workbook(document, writer)
        .with_context(|| format!("write workbook: {}", path.display()))
}

fn write_cell<W: Write>(xml: &mut Writer<W>, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Text(text) => write_data_cell(xml, "String", text),
        CellValue::Number(value) => write_data_cell(xml, "Number", &format_number(*value)),
        CellValue::Empty => {
            xml.write_event(Event::Empty(BytesStart::new("Cell")))?;
            Ok(())
        }
    }
}

fn write_data_cell<W: Write>(xml: &mut Writer<W>, ss_type: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("Cell")))?;
    let mut data = BytesStart::new("Data");
    data.push_attribute(("ss:Type", ss_type));
    xml.write_event(Event::Start(data))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("Data")))?;
    xml.write_event(Event::End(BytesEnd::new("Cell")))?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

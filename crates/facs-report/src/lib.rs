//! Export backends for staining plans.
//!
//! [`layout::layout_plans`] flattens the per-class plans into one positional
//! document; [`csv_export`] and [`workbook_xml`] render that document without
//! re-deriving any volume.

pub mod csv_export;
pub mod layout;
pub mod workbook_xml;

pub use csv_export::{write_plan_csv, write_plan_csv_file};
pub use layout::{WORKSHEET_NAME, layout_plans};
pub use workbook_xml::{
    write_plan_workbook, write_plan_workbook_file, write_plan_workbook_with_created,
};

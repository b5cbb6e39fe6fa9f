//! Shared document layout for plan exports.
//!
//! Both writers consume the same flat row sequence, so the CSV and the
//! workbook agree cell for cell. Sections follow the bench protocol order:
//! dye dilution, master mix, FMO channel mixes, remaining volumes.

use std::collections::BTreeMap;

use facs_model::{AntibodyClass, CellValue, FmoChannel, PlanDocument, StainingPlan};

/// Worksheet title used by the workbook writer.
pub const WORKSHEET_NAME: &str = "FMO preparation plan";

const STEP1_HEADERS: [&str; 7] = [
    "marker",
    "dye",
    "dilution ratio",
    "FMO",
    "dye volume (µL)",
    "FSB volume (µL)",
    "final volume (µL)",
];

const MASTER_MIX_LEFTOVER_LABEL: &str = "remaining master mix";

/// Lays out every class plan into one flat document, classes in map order.
pub fn layout_plans(plans: &BTreeMap<AntibodyClass, StainingPlan>) -> PlanDocument {
    let mut document = PlanDocument::new();
    for (class, plan) in plans {
        layout_class(&mut document, *class, plan);
    }
    document
}

fn layout_class(document: &mut PlanDocument, class: AntibodyClass, plan: &StainingPlan) {
    document.push_row(vec![CellValue::text(format!(
        "[{class}] Step 1: Dye dilution"
    ))]);
    document.push_row(STEP1_HEADERS.iter().map(|h| CellValue::text(*h)).collect());
    for row in &plan.dye_dilutions {
        document.push_row(vec![
            CellValue::text(row.marker.as_str()),
            CellValue::text(row.dye.as_str()),
            CellValue::text(row.dilution.to_string()),
            CellValue::text(if row.is_fmo { "yes" } else { "no" }),
            CellValue::number(row.dye_volume),
            CellValue::number(row.diluent_volume),
            CellValue::number(row.final_volume),
        ]);
    }
    document.push_blank();

    document.push_row(vec![CellValue::text("Step 2: Master mix")]);
    document.push_row(vec![
        CellValue::text("FSB volume (µL)"),
        CellValue::number(plan.master_mix.diluent_volume),
    ]);
    document.push_row(vec![
        CellValue::text("Dyes included"),
        CellValue::text(plan.master_mix.dye_markers.join(", ")),
    ]);
    document.push_blank();

    document.push_row(vec![CellValue::text("Step 3: FMO channel mixes")]);
    let addition_columns = addition_columns(&plan.fmo_channels);
    let mut headers = vec![
        CellValue::text("FMO channel"),
        CellValue::text("master mix volume (µL)"),
    ];
    for marker in &addition_columns {
        headers.push(CellValue::text(format!("add {marker} (µL)")));
    }
    document.push_row(headers);
    for channel in &plan.fmo_channels {
        let mut cells = vec![
            CellValue::text(channel.marker.as_str()),
            CellValue::number(channel.master_mix_volume),
        ];
        for marker in &addition_columns {
            match channel.additions.iter().find(|a| a.marker == *marker) {
                Some(addition) => cells.push(CellValue::number(addition.volume)),
                None => cells.push(CellValue::Empty),
            }
        }
        document.push_row(cells);
    }
    document.push_blank();

    document.push_row(vec![CellValue::text("Step 4: Remaining volumes")]);
    document.push_row(vec![
        CellValue::text("marker"),
        CellValue::text("volume (µL)"),
    ]);
    for leftover in &plan.reconciliation.dye_leftovers {
        document.push_row(vec![
            CellValue::text(leftover.marker.as_str()),
            CellValue::number(leftover.volume),
        ]);
    }
    document.push_row(vec![
        CellValue::text(MASTER_MIX_LEFTOVER_LABEL),
        CellValue::number(plan.reconciliation.master_mix_remaining),
    ]);
    document.push_blank();
}

/// Union of addition markers across channels, in first-seen order. Channels
/// missing a column get an empty cell there.
fn addition_columns(channels: &[FmoChannel]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for channel in channels {
        for addition in &channel.additions {
            if !columns.contains(&addition.marker) {
                columns.push(addition.marker.clone());
            }
        }
    }
    columns
}

/// Renders a cell volume the way both export formats print it. Rust's
/// shortest round-trip form keeps 146.5 as-is and drops the point from 50.0.
pub(crate) fn format_number(value: f64) -> String {
    format!("{value}")
}

//! Cross-class FMO augmentation.
//!
//! Every antibody class is prepared against the full set of FMO channels, so
//! FMO markers owned by other classes are appended to the class rows as
//! placeholders. A placeholder reserves its well in the budget and appears in
//! the channel walk but carries no dye arithmetic.

use facs_model::{PlanEntry, ReagentRow};

/// Builds the reference table for one class: its own rows first (in input
/// order), then one placeholder per FMO marker owned elsewhere, in first
/// appearance order over the full panel.
pub fn augment_with_cross_class_fmo(
    full: &[ReagentRow],
    class_rows: &[ReagentRow],
) -> Vec<PlanEntry> {
    let mut entries: Vec<PlanEntry> = class_rows
        .iter()
        .cloned()
        .map(PlanEntry::Reagent)
        .collect();

    let mut appended: Vec<&str> = Vec::new();
    for row in full {
        if !row.is_fmo {
            continue;
        }
        if class_rows.iter().any(|class_row| class_row.marker == row.marker) {
            continue;
        }
        if appended.contains(&row.marker.as_str()) {
            continue;
        }
        appended.push(&row.marker);
        entries.push(PlanEntry::CrossClassFmo {
            marker: row.marker.clone(),
        });
    }
    entries
}

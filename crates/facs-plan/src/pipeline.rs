//! Per-class plan driver.
//!
//! Splits a normalized panel by antibody class and computes one staining plan
//! per plannable class, each augmented with the FMO channels owned by the
//! other classes.

use std::collections::BTreeMap;

use tracing::debug;

use facs_model::{AntibodyClass, PlanError, PlanOptions, ReagentRow, Result, StainingPlan};

use crate::augment::augment_with_cross_class_fmo;
use crate::calculator::compute_plan;

/// Computes one staining plan per plannable antibody class present in the
/// panel. Classes with no rows are skipped. Autofluorescent rows reach the
/// plans only as cross-class FMO placeholders.
pub fn build_class_plans(
    rows: &[ReagentRow],
    options: &PlanOptions,
) -> Result<BTreeMap<AntibodyClass, StainingPlan>> {
    if rows.is_empty() {
        return Err(PlanError::EmptyInput);
    }

    let mut plans = BTreeMap::new();
    for class in AntibodyClass::PLANNABLE {
        let class_rows: Vec<ReagentRow> = rows
            .iter()
            .filter(|row| row.class == class)
            .cloned()
            .collect();
        if class_rows.is_empty() {
            debug!(class = %class, "no reagents, skipping class");
            continue;
        }
        let reference = augment_with_cross_class_fmo(rows, &class_rows);
        let plan = compute_plan(&reference, &class_rows, options)?;
        debug!(
            class = %class,
            reagents = class_rows.len(),
            fmo_wells = plan.budget.fmo_count,
            "computed staining plan"
        );
        plans.insert(class, plan);
    }

    if plans.is_empty() {
        return Err(PlanError::EmptyInput);
    }
    Ok(plans)
}

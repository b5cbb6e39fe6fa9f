use std::time::Instant;

use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use facs_cli::pipeline::{default_output_dir, load_panel, resolve_output_paths, write_outputs};
use facs_model::{AntibodyClass, OutputFormat, PlanOptions};
use facs_plan::build_class_plans;

use crate::cli::{OutputFormatArg, PlanArgs};
use crate::summary::apply_table_style;
use crate::types::{ClassSummary, PlanRunResult};

pub fn run_plan(args: &PlanArgs) -> Result<PlanRunResult> {
    if args.samples == 0 {
        bail!("--samples must be at least 1");
    }
    if !(args.volume_per_well.is_finite() && args.volume_per_well > 0.0) {
        bail!("--volume-per-well must be a positive number of µL");
    }
    let options = PlanOptions::new(args.samples).with_volume_per_well(args.volume_per_well);
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.panel));
    let formats = format_outputs(args.format);

    let plan_span = info_span!("plan", panel = %args.panel.display());
    let _plan_guard = plan_span.enter();

    // =========================================================================
    // Stage 1: Ingest - Read and normalize the reagent panel
    // =========================================================================
    let ingest_start = Instant::now();
    let rows = load_panel(&args.panel)?;
    info!(
        row_count = rows.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "panel loaded"
    );

    // =========================================================================
    // Stage 2: Plan - Compute one staining plan per antibody class
    // =========================================================================
    let plan_start = Instant::now();
    let plans = build_class_plans(&rows, &options)?;
    info!(
        class_count = plans.len(),
        duration_ms = plan_start.elapsed().as_millis(),
        "plans computed"
    );

    // =========================================================================
    // Stage 3: Output - Render and write the plan document
    // =========================================================================
    let written = if args.dry_run {
        info!("dry run, skipping output");
        Vec::new()
    } else {
        let paths = resolve_output_paths(&output_dir, &args.panel, &formats);
        write_outputs(&plans, &paths)?
    };

    // Every class plan shares the budget derived from the full panel.
    let budget = match plans.values().next() {
        Some(plan) => plan.budget,
        None => bail!("no plannable antibody classes in panel"),
    };
    let classes = plans
        .iter()
        .map(|(class, plan)| ClassSummary {
            class: *class,
            reagent_count: plan.dye_dilutions.len(),
            fmo_channels: plan.fmo_channels.len(),
            master_mix_fsb: plan.master_mix.diluent_volume,
            master_mix_remaining: plan.reconciliation.master_mix_remaining,
        })
        .collect();

    Ok(PlanRunResult {
        panel: args.panel.clone(),
        output_dir,
        sample_count: args.samples,
        volume_per_well: args.volume_per_well,
        budget,
        classes,
        written,
        dry_run: args.dry_run,
    })
}

pub fn run_classes() {
    let mut table = Table::new();
    table.set_header(vec!["Class", "Accepted labels", "Planned"]);
    apply_table_style(&mut table);
    for class in AntibodyClass::ALL {
        table.add_row(vec![
            class.to_string(),
            class.input_labels().join(", "),
            if class.is_plannable() {
                "yes".to_string()
            } else {
                "FMO control only".to_string()
            },
        ]);
    }
    println!("{table}");
}

fn format_outputs(format: OutputFormatArg) -> Vec<OutputFormat> {
    match format {
        OutputFormatArg::Csv => vec![OutputFormat::Csv],
        OutputFormatArg::Xml => vec![OutputFormat::Xml],
        OutputFormatArg::Both => vec![OutputFormat::Csv, OutputFormat::Xml],
    }
}

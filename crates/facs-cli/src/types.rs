use std::path::PathBuf;

use facs_model::{AntibodyClass, WellBudget};

#[derive(Debug)]
pub struct PlanRunResult {
    pub panel: PathBuf,
    pub output_dir: PathBuf,
    pub sample_count: u32,
    pub volume_per_well: f64,
    pub budget: WellBudget,
    pub classes: Vec<ClassSummary>,
    pub written: Vec<PathBuf>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct ClassSummary {
    pub class: AntibodyClass,
    pub reagent_count: usize,
    pub fmo_channels: usize,
    pub master_mix_fsb: f64,
    pub master_mix_remaining: f64,
}

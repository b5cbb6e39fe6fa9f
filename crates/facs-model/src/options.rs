use serde::{Deserialize, Serialize};

/// Default staining volume per well, µL.
pub const DEFAULT_VOLUME_PER_WELL: f64 = 50.0;

/// Run parameters for a staining-plan computation.
///
/// `sample_count` covers the experimental samples only; FMO control wells
/// are derived from the reagent table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub sample_count: u32,
    /// Staining volume per well, µL. Must be positive.
    pub volume_per_well: f64,
}

impl PlanOptions {
    pub fn new(sample_count: u32) -> Self {
        PlanOptions {
            sample_count,
            volume_per_well: DEFAULT_VOLUME_PER_WELL,
        }
    }

    pub fn with_volume_per_well(mut self, volume_per_well: f64) -> Self {
        self.volume_per_well = volume_per_well;
        self
    }
}

/// Well and volume budget derived from run options and the FMO channel count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellBudget {
    /// FMO control channels in the reference table.
    pub fmo_count: usize,
    /// Samples plus FMO controls.
    pub total_wells: usize,
    /// `total_wells * volume_per_well`, µL.
    pub total_volume: f64,
}

impl WellBudget {
    pub fn derive(options: &PlanOptions, fmo_count: usize) -> Self {
        let total_wells = options.sample_count as usize + fmo_count;
        WellBudget {
            fmo_count,
            total_wells,
            total_volume: total_wells as f64 * options.volume_per_well,
        }
    }
}

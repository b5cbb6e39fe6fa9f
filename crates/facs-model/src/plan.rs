use serde::{Deserialize, Serialize};

use crate::{DilutionRatio, WellBudget};

/// Round to two decimals, the resolution at which plan volumes are stored.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Step 1: one diluted dye preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DyeDilutionRow {
    pub marker: String,
    pub dye: String,
    pub dilution: DilutionRatio,
    pub is_fmo: bool,
    /// Stock dye volume to pipette, µL.
    pub dye_volume: f64,
    /// FSB diluent volume, µL.
    pub diluent_volume: f64,
    /// Resulting diluted volume, µL.
    pub final_volume: f64,
}

/// Step 2: the shared master mix covering all non-FMO dyes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterMix {
    /// FSB volume to add, µL.
    pub diluent_volume: f64,
    /// Markers whose diluted dyes go into the mix, in first-seen order.
    pub dye_markers: Vec<String>,
}

/// One diluted dye added on top of a channel's master-mix portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DyeAddition {
    pub marker: String,
    pub volume: f64,
}

/// Step 3: the mix prepared for one FMO control channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmoChannel {
    pub marker: String,
    pub master_mix_volume: f64,
    pub additions: Vec<DyeAddition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeftoverRow {
    pub marker: String,
    pub volume: f64,
}

/// Step 4: unused volumes left once every channel is served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Leftover diluted FMO dye, only where anything remains.
    pub dye_leftovers: Vec<LeftoverRow>,
    pub master_mix_remaining: f64,
}

/// Complete four-step preparation plan for one antibody class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StainingPlan {
    pub budget: WellBudget,
    pub dye_dilutions: Vec<DyeDilutionRow>,
    pub master_mix: MasterMix,
    pub fmo_channels: Vec<FmoChannel>,
    pub reconciliation: Reconciliation,
}

impl StainingPlan {
    /// Combined diluted volume across FMO dye preparations, µL.
    pub fn fmo_dilution_volume(&self) -> f64 {
        self.dye_dilutions
            .iter()
            .filter(|row| row.is_fmo)
            .map(|row| row.final_volume)
            .sum()
    }

    /// Master-mix volume distributed across FMO channels, µL.
    pub fn master_mix_used(&self) -> f64 {
        self.fmo_channels
            .iter()
            .map(|channel| channel.master_mix_volume)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.125 is exact in binary, so the midpoint rule is actually exercised.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(146.666_666), 146.67);
        assert_eq!(round2(1.2345), 1.23);
        assert_eq!(round2(2.0), 2.0);
    }
}

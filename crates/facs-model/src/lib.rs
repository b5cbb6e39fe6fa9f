pub mod class;
pub mod dilution;
pub mod error;
pub mod options;
pub mod plan;
pub mod processing;
pub mod reagent;
pub mod table;

pub use class::AntibodyClass;
pub use dilution::{DilutionRatio, ParseDilutionError};
pub use error::{DilutionOffender, PlanError, Result};
pub use options::{DEFAULT_VOLUME_PER_WELL, PlanOptions, WellBudget};
pub use plan::{
    DyeAddition, DyeDilutionRow, FmoChannel, LeftoverRow, MasterMix, Reconciliation, StainingPlan,
    round2,
};
pub use processing::{OutputFormat, OutputPaths};
pub use reagent::{PlanEntry, ReagentRow};
pub use table::{CellValue, PlanDocument};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_labels_round_trip() {
        for class in [
            AntibodyClass::Primary,
            AntibodyClass::Secondary,
            AntibodyClass::Intracellular,
            AntibodyClass::Autofluorescent,
        ] {
            let parsed: AntibodyClass = class.as_str().parse().expect("parse canonical label");
            assert_eq!(parsed, class);
        }
        assert_eq!(
            "一抗".parse::<AntibodyClass>().expect("parse 一抗"),
            AntibodyClass::Primary
        );
        assert_eq!(
            " 自发荧光 ".parse::<AntibodyClass>().expect("parse 自发荧光"),
            AntibodyClass::Autofluorescent
        );
        assert!("stromal".parse::<AntibodyClass>().is_err());
    }

    #[test]
    fn budget_counts_fmo_wells() {
        let options = PlanOptions::new(2);
        let budget = WellBudget::derive(&options, 1);
        assert_eq!(budget.total_wells, 3);
        assert_eq!(budget.total_volume, 150.0);
    }

    #[test]
    fn plan_serializes() {
        let plan = StainingPlan {
            budget: WellBudget {
                fmo_count: 1,
                total_wells: 3,
                total_volume: 150.0,
            },
            dye_dilutions: vec![DyeDilutionRow {
                marker: "CD3".to_string(),
                dye: "FITC".to_string(),
                dilution: "1:100".parse().expect("parse ratio"),
                is_fmo: false,
                dye_volume: 1.5,
                diluent_volume: 0.0,
                final_volume: 1.5,
            }],
            master_mix: MasterMix {
                diluent_volume: 146.5,
                dye_markers: vec!["CD3".to_string()],
            },
            fmo_channels: vec![FmoChannel {
                marker: "CD4".to_string(),
                master_mix_volume: 50.0,
                additions: vec![],
            }],
            reconciliation: Reconciliation {
                dye_leftovers: vec![LeftoverRow {
                    marker: "CD4".to_string(),
                    volume: 2.0,
                }],
                master_mix_remaining: 98.0,
            },
        };
        let json = serde_json::to_string(&plan).expect("serialize plan");
        let round: StainingPlan = serde_json::from_str(&json).expect("deserialize plan");
        assert_eq!(round, plan);
        assert_eq!(round.fmo_dilution_volume(), 0.0);
        assert_eq!(round.master_mix_used(), 50.0);
    }

    #[test]
    fn plan_entry_placeholders_are_always_fmo() {
        let placeholder = PlanEntry::CrossClassFmo {
            marker: "YFP".to_string(),
        };
        assert!(placeholder.is_fmo());
        assert_eq!(placeholder.class(), None);
        assert_eq!(placeholder.marker(), "YFP");
    }
}

//! Randomized volume checks over generated reagent panels.

use proptest::prelude::*;

use facs_model::{AntibodyClass, PlanOptions, ReagentRow, round2};
use facs_plan::build_class_plans;

fn class_strategy() -> impl Strategy<Value = AntibodyClass> {
    prop_oneof![
        Just(AntibodyClass::Primary),
        Just(AntibodyClass::Secondary),
        Just(AntibodyClass::Intracellular),
    ]
}

/// Panels of one to eight reagents with unique markers, realistic dilution
/// denominators, and random FMO flags across the plannable classes.
fn panel_strategy() -> impl Strategy<Value = Vec<ReagentRow>> {
    prop::collection::vec((50u32..=1000, any::<bool>(), class_strategy()), 1..=8).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(idx, (denominator, is_fmo, class))| ReagentRow {
                    marker: format!("M{idx}"),
                    dye: format!("D{idx}"),
                    dilution: format!("1:{denominator}").parse().ok(),
                    is_fmo,
                    class,
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn regular_dyes_need_no_extra_diluent(
        panel in panel_strategy(),
        samples in 1u32..=50,
    ) {
        let options = PlanOptions::new(samples);
        let plans = build_class_plans(&panel, &options).expect("plannable panel");
        for plan in plans.values() {
            for row in &plan.dye_dilutions {
                if !row.is_fmo {
                    let expected =
                        round2(plan.budget.total_volume / f64::from(row.dilution.denominator()));
                    prop_assert_eq!(row.dye_volume, expected);
                    prop_assert_eq!(row.diluent_volume, 0.0);
                    prop_assert_eq!(row.final_volume, expected);
                }
            }
        }
    }

    #[test]
    fn fmo_dyes_fill_their_channel(
        panel in panel_strategy(),
        samples in 1u32..=50,
        volume_per_well in 20.0f64..=100.0,
    ) {
        let options = PlanOptions::new(samples).with_volume_per_well(volume_per_well);
        let plans = build_class_plans(&panel, &options).expect("plannable panel");
        for plan in plans.values() {
            let channel_volume = plan.budget.total_wells as f64 - 1.0;
            for row in &plan.dye_dilutions {
                if row.is_fmo {
                    prop_assert_eq!(row.final_volume, channel_volume);
                    prop_assert!(
                        (row.dye_volume + row.diluent_volume - channel_volume).abs() <= 0.01
                    );
                }
            }
        }
    }

    #[test]
    fn volumes_conserve(
        panel in panel_strategy(),
        samples in 1u32..=50,
        volume_per_well in 20.0f64..=100.0,
    ) {
        let options = PlanOptions::new(samples).with_volume_per_well(volume_per_well);
        let plans = build_class_plans(&panel, &options).expect("plannable panel");
        for plan in plans.values() {
            let poured = plan.reconciliation.master_mix_remaining
                + plan.master_mix_used()
                + plan.fmo_dilution_volume();
            prop_assert!(
                (poured - plan.budget.total_volume).abs() <= 0.01,
                "poured {} vs budget {}",
                poured,
                plan.budget.total_volume
            );
        }
    }

    #[test]
    fn recomputation_is_idempotent(
        panel in panel_strategy(),
        samples in 1u32..=20,
    ) {
        let options = PlanOptions::new(samples);
        let first = build_class_plans(&panel, &options).expect("plannable panel");
        let second = build_class_plans(&panel, &options).expect("plannable panel");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn every_class_budgets_the_full_fmo_set(
        panel in panel_strategy(),
        samples in 1u32..=20,
    ) {
        let fmo_total = panel.iter().filter(|row| row.is_fmo).count();
        let options = PlanOptions::new(samples);
        let plans = build_class_plans(&panel, &options).expect("plannable panel");
        for plan in plans.values() {
            prop_assert_eq!(plan.budget.fmo_count, fmo_total);
            prop_assert_eq!(plan.budget.total_wells, samples as usize + fmo_total);
        }
    }
}

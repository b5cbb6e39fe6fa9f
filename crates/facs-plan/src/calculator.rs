//! Staining-plan computation.
//!
//! Implements the four-step FMO preparation protocol for one antibody class:
//!
//! 1. Dilute each dye, with FMO dyes sized for their dedicated channel.
//! 2. Assemble the shared master mix from FSB and the non-FMO dyes.
//! 3. Portion the master mix per FMO channel, adding back 1 µL of every
//!    diluted dye the channel keeps.
//! 4. Reconcile what remains of the FMO dilutions and the master mix.
//!
//! The calculator assumes pre-validated input: rows come from the normalizer
//! (or an equivalent in-memory construction) and dilution ratios are already
//! parsed.

use std::collections::BTreeMap;

use facs_model::{
    AntibodyClass, DilutionOffender, DyeAddition, DyeDilutionRow, FmoChannel, LeftoverRow,
    MasterMix, PlanEntry, PlanError, PlanOptions, ReagentRow, Reconciliation, Result,
    StainingPlan, WellBudget, round2,
};

/// Per-marker dilution state carried from step 1 into steps 2 to 4.
#[derive(Debug, Clone)]
struct DyeState {
    marker: String,
    final_volume: f64,
    is_fmo: bool,
}

/// Step-1 products: the printable rows plus the state the later steps read.
struct DilutionOutcome {
    rows: Vec<DyeDilutionRow>,
    states: Vec<DyeState>,
    /// Combined diluted volume across FMO dyes, µL.
    fmo_final_volume: f64,
}

/// Computes the staining plan for one antibody class.
///
/// `reference` is the augmented table driving well counts and the channel
/// walk; `class_rows` are the rows actually prepared. The class driver wires
/// these up; direct callers must keep them consistent.
pub fn compute_plan(
    reference: &[PlanEntry],
    class_rows: &[ReagentRow],
    options: &PlanOptions,
) -> Result<StainingPlan> {
    if class_rows.is_empty() {
        return Err(PlanError::EmptyInput);
    }

    let fmo_markers: Vec<&str> = reference
        .iter()
        .filter(|entry| entry.is_fmo())
        .map(PlanEntry::marker)
        .collect();
    let budget = WellBudget::derive(options, fmo_markers.len());

    let outcome = dilute_dyes(class_rows, &budget, options)?;
    let master_mix = build_master_mix(&outcome, &budget);
    let (fmo_channels, usage) = mix_fmo_channels(reference, &fmo_markers, &outcome.states, options);
    let reconciliation = reconcile(&outcome, &fmo_channels, &usage, &budget);

    Ok(StainingPlan {
        budget,
        dye_dilutions: outcome.rows,
        master_mix,
        fmo_channels,
        reconciliation,
    })
}

/// Step 1: dilute every non-autofluorescent dye of the class.
///
/// An FMO dye is sized for its own channel (one well per sample plus every
/// other FMO well); a regular dye is sized against the full volume budget and
/// needs no extra diluent at this stage.
fn dilute_dyes(
    class_rows: &[ReagentRow],
    budget: &WellBudget,
    options: &PlanOptions,
) -> Result<DilutionOutcome> {
    let mut rows = Vec::new();
    let mut states = Vec::new();
    let mut fmo_final_volume = 0.0;

    for (idx, row) in class_rows.iter().enumerate() {
        if row.class == AntibodyClass::Autofluorescent {
            continue;
        }
        let Some(dilution) = row.dilution else {
            return Err(PlanError::InvalidDilution(vec![DilutionOffender {
                row: idx + 1,
                marker: row.marker.clone(),
                value: String::new(),
            }]));
        };
        let denominator = f64::from(dilution.denominator());

        let (dye_volume, diluent_volume, final_volume) = if row.is_fmo {
            let final_volume = budget.total_wells as f64 - 1.0;
            let dye_volume = round2(final_volume * options.volume_per_well / denominator);
            let diluent_volume = round2(final_volume - dye_volume);
            fmo_final_volume += final_volume;
            (dye_volume, diluent_volume, final_volume)
        } else {
            let final_volume = round2(budget.total_volume / denominator);
            (final_volume, 0.0, final_volume)
        };

        rows.push(DyeDilutionRow {
            marker: row.marker.clone(),
            dye: row.dye.clone(),
            dilution,
            is_fmo: row.is_fmo,
            dye_volume,
            diluent_volume,
            final_volume,
        });
        states.push(DyeState {
            marker: row.marker.clone(),
            final_volume,
            is_fmo: row.is_fmo,
        });
    }

    Ok(DilutionOutcome {
        rows,
        states,
        fmo_final_volume,
    })
}

/// Step 2: FSB tops the non-FMO dilutions up to the volume left once every
/// FMO channel's dye is set aside.
fn build_master_mix(outcome: &DilutionOutcome, budget: &WellBudget) -> MasterMix {
    let non_fmo_volume: f64 = outcome
        .states
        .iter()
        .filter(|state| !state.is_fmo)
        .map(|state| state.final_volume)
        .sum();
    MasterMix {
        diluent_volume: round2(budget.total_volume - outcome.fmo_final_volume - non_fmo_volume),
        dye_markers: outcome
            .states
            .iter()
            .filter(|state| !state.is_fmo)
            .map(|state| state.marker.clone())
            .collect(),
    }
}

/// Step 3: walk the FMO channels in reference order.
///
/// Channels owned by other classes are skipped; they are mixed where their
/// dye is prepared. Autofluorescent channels take every regular dye instead
/// of "all but one". Usage counts accumulate on the side so step 4 can
/// subtract them from the dilution volumes.
fn mix_fmo_channels(
    reference: &[PlanEntry],
    fmo_markers: &[&str],
    states: &[DyeState],
    options: &PlanOptions,
) -> (Vec<FmoChannel>, BTreeMap<String, u32>) {
    let mut channels = Vec::new();
    let mut usage: BTreeMap<String, u32> = BTreeMap::new();

    for &marker in fmo_markers {
        let class = reference
            .iter()
            .find(|entry| entry.marker() == marker)
            .and_then(PlanEntry::class);

        if class == Some(AntibodyClass::Autofluorescent) {
            let regular: Vec<&DyeState> = states.iter().filter(|state| !state.is_fmo).collect();
            let mut additions = Vec::with_capacity(regular.len());
            for state in &regular {
                *usage.entry(state.marker.clone()).or_insert(0) += 1;
                additions.push(DyeAddition {
                    marker: state.marker.clone(),
                    volume: 1.0,
                });
            }
            channels.push(FmoChannel {
                marker: marker.to_string(),
                master_mix_volume: round2(options.volume_per_well - regular.len() as f64),
                additions,
            });
            continue;
        }

        if !states.iter().any(|state| state.marker == marker) {
            // FMO owned by another class; not configured in this mix.
            continue;
        }

        let other_fmo: Vec<&str> = fmo_markers
            .iter()
            .copied()
            .filter(|&other| other != marker && states.iter().any(|state| state.marker == other))
            .collect();
        let mut additions = Vec::with_capacity(other_fmo.len());
        for other in &other_fmo {
            *usage.entry((*other).to_string()).or_insert(0) += 1;
            additions.push(DyeAddition {
                marker: (*other).to_string(),
                volume: 1.0,
            });
        }
        channels.push(FmoChannel {
            marker: marker.to_string(),
            master_mix_volume: round2(options.volume_per_well - other_fmo.len() as f64),
            additions,
        });
    }

    (channels, usage)
}

/// Step 4: whatever the channels did not take stays in the tubes.
fn reconcile(
    outcome: &DilutionOutcome,
    channels: &[FmoChannel],
    usage: &BTreeMap<String, u32>,
    budget: &WellBudget,
) -> Reconciliation {
    let master_mix_used: f64 = channels
        .iter()
        .map(|channel| channel.master_mix_volume)
        .sum();
    let master_mix_remaining =
        round2(budget.total_volume - outcome.fmo_final_volume - master_mix_used);

    let mut dye_leftovers = Vec::new();
    for state in &outcome.states {
        if !state.is_fmo {
            continue;
        }
        let used = usage.get(&state.marker).copied().unwrap_or(0);
        let remaining = round2(state.final_volume - f64::from(used));
        if remaining > 0.0 {
            dye_leftovers.push(LeftoverRow {
                marker: state.marker.clone(),
                volume: remaining,
            });
        }
    }

    Reconciliation {
        dye_leftovers,
        master_mix_remaining,
    }
}

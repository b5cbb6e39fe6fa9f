use serde::{Deserialize, Serialize};

use crate::{AntibodyClass, DilutionRatio};

/// One antibody/dye entry of a normalized reagent table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReagentRow {
    pub marker: String,
    pub dye: String,
    /// Required for every class except autofluorescent entries.
    pub dilution: Option<DilutionRatio>,
    pub is_fmo: bool,
    #[serde(default)]
    pub class: AntibodyClass,
}

/// Reference-table entry handed to the plan calculator.
///
/// A class is prepared against its own rows plus placeholders for FMO
/// channels owned by other classes. A placeholder reserves a well and shows
/// up in the channel walk, but carries no dye arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanEntry {
    Reagent(ReagentRow),
    CrossClassFmo { marker: String },
}

impl PlanEntry {
    pub fn marker(&self) -> &str {
        match self {
            PlanEntry::Reagent(row) => &row.marker,
            PlanEntry::CrossClassFmo { marker } => marker,
        }
    }

    pub fn is_fmo(&self) -> bool {
        match self {
            PlanEntry::Reagent(row) => row.is_fmo,
            PlanEntry::CrossClassFmo { .. } => true,
        }
    }

    /// Antibody class of this entry. `None` for cross-class placeholders,
    /// whose owning class is not part of the current preparation.
    pub fn class(&self) -> Option<AntibodyClass> {
        match self {
            PlanEntry::Reagent(row) => Some(row.class),
            PlanEntry::CrossClassFmo { .. } => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Antibody classes recognized on reagent tables.
///
/// Primary, secondary and intracellular antibodies each get their own
/// staining plan. Autofluorescent entries (YFP and the like) carry no
/// dilution arithmetic and participate only as FMO controls.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AntibodyClass {
    #[default]
    Primary,
    Secondary,
    Intracellular,
    Autofluorescent,
}

impl AntibodyClass {
    /// Every recognized class, plannable ones first.
    pub const ALL: [AntibodyClass; 4] = [
        AntibodyClass::Primary,
        AntibodyClass::Secondary,
        AntibodyClass::Intracellular,
        AntibodyClass::Autofluorescent,
    ];

    /// Classes that receive a staining plan, in preparation order.
    pub const PLANNABLE: [AntibodyClass; 3] = [
        AntibodyClass::Primary,
        AntibodyClass::Secondary,
        AntibodyClass::Intracellular,
    ];

    /// Returns true if this class receives its own staining plan.
    pub fn is_plannable(&self) -> bool {
        !matches!(self, AntibodyClass::Autofluorescent)
    }

    /// Returns the canonical class name used in output documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            AntibodyClass::Primary => "Primary",
            AntibodyClass::Secondary => "Secondary",
            AntibodyClass::Intracellular => "Intracellular",
            AntibodyClass::Autofluorescent => "Autofluorescent",
        }
    }

    /// Labels accepted in input cells for this class.
    pub fn input_labels(&self) -> &'static [&'static str] {
        match self {
            AntibodyClass::Primary => &["primary", "一抗"],
            AntibodyClass::Secondary => &["secondary", "二抗"],
            AntibodyClass::Intracellular => &["intracellular", "胞内抗体"],
            AntibodyClass::Autofluorescent => &["autofluorescent", "自发荧光"],
        }
    }
}

impl fmt::Display for AntibodyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AntibodyClass {
    type Err = String;

    /// Parse a class label as entered on reagent tables.
    /// Accepts English names (ASCII case-insensitive) and the Chinese labels
    /// used by bench sheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("primary") || trimmed == "一抗" {
            Ok(AntibodyClass::Primary)
        } else if trimmed.eq_ignore_ascii_case("secondary") || trimmed == "二抗" {
            Ok(AntibodyClass::Secondary)
        } else if trimmed.eq_ignore_ascii_case("intracellular") || trimmed == "胞内抗体" {
            Ok(AntibodyClass::Intracellular)
        } else if trimmed.eq_ignore_ascii_case("autofluorescent") || trimmed == "自发荧光" {
            Ok(AntibodyClass::Autofluorescent)
        } else {
            Err(format!("unknown antibody class: {}", s))
        }
    }
}

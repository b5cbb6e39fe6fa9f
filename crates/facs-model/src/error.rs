use thiserror::Error;

/// One dilution cell that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DilutionOffender {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub marker: String,
    /// Raw cell text as entered.
    pub value: String,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),
    #[error("invalid dilution ratios: {}", format_offenders(.0))]
    InvalidDilution(Vec<DilutionOffender>),
    #[error("unknown antibody class {value:?} (row {row}, marker {marker})")]
    UnknownClass {
        row: usize,
        marker: String,
        value: String,
    },
    #[error("no reagent rows to plan")]
    EmptyInput,
}

fn format_offenders(offenders: &[DilutionOffender]) -> String {
    let parts: Vec<String> = offenders
        .iter()
        .map(|offender| {
            format!(
                "row {} ({}): {:?}",
                offender.row, offender.marker, offender.value
            )
        })
        .collect();
    parts.join("; ")
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_lists_all_columns() {
        let err = PlanError::Schema(vec!["dye".to_string(), "fmo".to_string()]);
        assert_eq!(err.to_string(), "missing required columns: dye, fmo");
    }

    #[test]
    fn dilution_message_identifies_each_offender() {
        let err = PlanError::InvalidDilution(vec![
            DilutionOffender {
                row: 2,
                marker: "CD4".to_string(),
                value: "1:abc".to_string(),
            },
            DilutionOffender {
                row: 5,
                marker: "CD8".to_string(),
                value: "2%".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "invalid dilution ratios: row 2 (CD4): \"1:abc\"; row 5 (CD8): \"2%\""
        );
    }
}

use std::collections::BTreeSet;

use tracing::warn;

use facs_model::{AntibodyClass, DilutionOffender, DilutionRatio, PlanError, ReagentRow, Result};

use crate::csv_table::RawTable;
use crate::schema::resolve_columns;

/// Truthy spellings for the FMO flag. The Chinese form is what bench sheets
/// use; the rest cover panels edited in English.
const FMO_TRUE: &[&str] = &["是", "true", "yes", "y", "1"];

fn parse_fmo_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    FMO_TRUE
        .iter()
        .any(|candidate| trimmed.eq_ignore_ascii_case(candidate))
}

fn cell(record: &[String], index: usize) -> &str {
    record.get(index).map(|value| value.trim()).unwrap_or("")
}

/// Turns a raw table into validated reagent rows.
///
/// Every malformed dilution is collected before failing, so an operator can
/// fix the whole sheet in one pass. Rows without a marker cannot take part in
/// any lookup and are skipped with a warning.
pub fn normalize_table(table: &RawTable) -> Result<Vec<ReagentRow>> {
    let columns = resolve_columns(table)?;
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut offenders = Vec::new();
    let mut seen: BTreeSet<(AntibodyClass, String)> = BTreeSet::new();

    for (idx, record) in table.rows.iter().enumerate() {
        let row_number = idx + 1;
        let marker = cell(record, columns.marker);
        if marker.is_empty() {
            warn!(row = row_number, "skipping reagent row without a marker");
            continue;
        }

        let class_cell = columns.class.map(|col| cell(record, col)).unwrap_or("");
        let class = if class_cell.is_empty() {
            AntibodyClass::default()
        } else {
            class_cell
                .parse()
                .map_err(|_| PlanError::UnknownClass {
                    row: row_number,
                    marker: marker.to_string(),
                    value: class_cell.to_string(),
                })?
        };

        let dilution_cell = cell(record, columns.dilution);
        let dilution = if class == AntibodyClass::Autofluorescent {
            // Autofluorescent entries carry no dilution arithmetic; keep the
            // ratio only if one happens to parse.
            dilution_cell.parse().ok()
        } else {
            match dilution_cell.parse::<DilutionRatio>() {
                Ok(ratio) => Some(ratio),
                Err(_) => {
                    offenders.push(DilutionOffender {
                        row: row_number,
                        marker: marker.to_string(),
                        value: dilution_cell.to_string(),
                    });
                    None
                }
            }
        };

        if !seen.insert((class, marker.to_string())) {
            warn!(
                row = row_number,
                marker, "duplicate marker within antibody class"
            );
        }

        rows.push(ReagentRow {
            marker: marker.to_string(),
            dye: cell(record, columns.dye).to_string(),
            dilution,
            is_fmo: parse_fmo_flag(cell(record, columns.is_fmo)),
            class,
        });
    }

    if !offenders.is_empty() {
        return Err(PlanError::InvalidDilution(offenders));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|header| (*header).to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|value| (*value).to_string()).collect())
                .collect(),
        }
    }

    const HEADERS: &[&str] = &["marker", "dye", "dilution ratio", "fmo", "antibody class"];

    #[test]
    fn coerces_fmo_flags() {
        for (raw, expected) in [
            ("是", true),
            ("yes", true),
            ("Y", true),
            ("TRUE", true),
            ("1", true),
            ("", false),
            ("否", false),
            ("no", false),
            ("0", false),
            ("maybe", false),
        ] {
            let rows = normalize_table(&table(
                HEADERS,
                &[&["CD3", "FITC", "1:100", raw, ""]],
            ))
            .expect("normalize");
            assert_eq!(rows[0].is_fmo, expected, "flag {raw:?}");
        }
    }

    #[test]
    fn defaults_blank_class_to_primary() {
        let rows = normalize_table(&table(HEADERS, &[&["CD3", "FITC", "1:100", "", "  "]]))
            .expect("normalize");
        assert_eq!(rows[0].class, AntibodyClass::Primary);
    }

    #[test]
    fn parses_bilingual_class_labels() {
        let rows = normalize_table(&table(
            HEADERS,
            &[
                &["CD3", "FITC", "1:100", "", "二抗"],
                &["CD4", "PE", "1:50", "是", "Intracellular"],
            ],
        ))
        .expect("normalize");
        assert_eq!(rows[0].class, AntibodyClass::Secondary);
        assert_eq!(rows[1].class, AntibodyClass::Intracellular);
    }

    #[test]
    fn rejects_unknown_class_labels() {
        let err = normalize_table(&table(
            HEADERS,
            &[&["CD3", "FITC", "1:100", "", "stromal"]],
        ))
        .expect_err("unknown class");
        match err {
            PlanError::UnknownClass { row, marker, value } => {
                assert_eq!(row, 1);
                assert_eq!(marker, "CD3");
                assert_eq!(value, "stromal");
            }
            other => panic!("expected unknown class error, got {other:?}"),
        }
    }

    #[test]
    fn collects_every_bad_dilution() {
        let err = normalize_table(&table(
            HEADERS,
            &[
                &["CD3", "FITC", "1:abc", "", ""],
                &["CD4", "PE", "1:50", "是", ""],
                &["CD8", "APC", "2%", "", ""],
            ],
        ))
        .expect_err("bad dilutions");
        match err {
            PlanError::InvalidDilution(offenders) => {
                assert_eq!(offenders.len(), 2);
                assert_eq!(offenders[0].row, 1);
                assert_eq!(offenders[0].marker, "CD3");
                assert_eq!(offenders[0].value, "1:abc");
                assert_eq!(offenders[1].row, 3);
                assert_eq!(offenders[1].value, "2%");
            }
            other => panic!("expected dilution error, got {other:?}"),
        }
    }

    #[test]
    fn autofluorescent_rows_skip_dilution_validation() {
        let rows = normalize_table(&table(
            HEADERS,
            &[&["YFP", "", "", "是", "自发荧光"]],
        ))
        .expect("normalize");
        assert_eq!(rows[0].class, AntibodyClass::Autofluorescent);
        assert_eq!(rows[0].dilution, None);
        assert!(rows[0].is_fmo);
    }

    #[test]
    fn skips_rows_without_marker() {
        let rows = normalize_table(&table(
            HEADERS,
            &[
                &["", "FITC", "1:100", "", ""],
                &["CD4", "PE", "1:50", "", ""],
            ],
        ))
        .expect("normalize");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].marker, "CD4");
    }
}

use facs_model::{PlanError, Result};

use crate::csv_table::RawTable;

/// Column indices resolved from a raw reagent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub marker: usize,
    pub dye: usize,
    pub dilution: usize,
    pub is_fmo: usize,
    /// Absent on single-class panels; every row then defaults to primary.
    pub class: Option<usize>,
}

const MARKER_ALIASES: &[&str] = &["marker"];
const DYE_ALIASES: &[&str] = &["dye", "荧光染料"];
const DILUTION_ALIASES: &[&str] = &["dilution ratio", "dilution", "稀释比例"];
const FMO_ALIASES: &[&str] = &["fmo", "is fmo", "是否作为FMO"];
const CLASS_ALIASES: &[&str] = &[
    "antibody class",
    "class",
    "一抗/二抗/胞内抗体",
    "抗体类型",
];

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        aliases
            .iter()
            .any(|alias| header.eq_ignore_ascii_case(alias))
    })
}

/// Maps bilingual header aliases to column indices, collecting every missing
/// required column into a single error.
pub fn resolve_columns(table: &RawTable) -> Result<ColumnMap> {
    let marker = find_column(&table.headers, MARKER_ALIASES);
    let dye = find_column(&table.headers, DYE_ALIASES);
    let dilution = find_column(&table.headers, DILUTION_ALIASES);
    let is_fmo = find_column(&table.headers, FMO_ALIASES);
    let class = find_column(&table.headers, CLASS_ALIASES);

    let mut missing = Vec::new();
    if marker.is_none() {
        missing.push("marker".to_string());
    }
    if dye.is_none() {
        missing.push("dye".to_string());
    }
    if dilution.is_none() {
        missing.push("dilution ratio".to_string());
    }
    if is_fmo.is_none() {
        missing.push("fmo".to_string());
    }

    match (marker, dye, dilution, is_fmo) {
        (Some(marker), Some(dye), Some(dilution), Some(is_fmo)) => Ok(ColumnMap {
            marker,
            dye,
            dilution,
            is_fmo,
            class,
        }),
        _ => Err(PlanError::Schema(missing)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|header| (*header).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn resolves_english_headers() {
        let map = resolve_columns(&table(&["marker", "dye", "dilution ratio", "FMO", "class"]))
            .expect("resolve");
        assert_eq!(map.marker, 0);
        assert_eq!(map.is_fmo, 3);
        assert_eq!(map.class, Some(4));
    }

    #[test]
    fn resolves_chinese_headers() {
        let map = resolve_columns(&table(&[
            "marker",
            "荧光染料",
            "稀释比例",
            "是否作为FMO",
            "一抗/二抗/胞内抗体",
        ]))
        .expect("resolve");
        assert_eq!(map.dye, 1);
        assert_eq!(map.dilution, 2);
        assert_eq!(map.is_fmo, 3);
        assert_eq!(map.class, Some(4));
    }

    #[test]
    fn class_column_is_optional() {
        let map =
            resolve_columns(&table(&["marker", "dye", "dilution", "fmo"])).expect("resolve");
        assert_eq!(map.class, None);
    }

    #[test]
    fn collects_all_missing_columns() {
        let err = resolve_columns(&table(&["marker", "稀释比例"])).expect_err("missing columns");
        match err {
            PlanError::Schema(missing) => {
                assert_eq!(missing, vec!["dye".to_string(), "fmo".to_string()]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}

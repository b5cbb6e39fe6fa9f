pub mod csv_table;
pub mod normalize;
pub mod schema;

pub use csv_table::{RawTable, read_csv_reader, read_csv_table};
pub use normalize::normalize_table;
pub use schema::{ColumnMap, resolve_columns};

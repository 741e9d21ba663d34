pub mod csv_export;
pub mod csv_import;
pub mod file;

pub use csv_export::{export_layout_csv, layout_csv_string};
pub use csv_import::{import_csv, import_csv_str, CsvImport};
pub use file::{layout_to_json, load_snapshot, save_snapshot};

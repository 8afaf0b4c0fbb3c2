//! Student spreadsheet import: header mapping, per-field normalizers and the
//! row transform built from them. Everything here is pure; file and process
//! I/O live in `sheet` and `ipc`.

mod batch;
mod birth;
mod cell;
mod classify;
mod columns;
mod date;
mod name;
mod phone;
mod record;
mod review;
mod rules;
mod vocab;

pub use batch::{map_headers, transform_rows, HeaderReport, ImportReport, ImportedRow};
pub use birth::{parse_place_and_date_of_birth, PlaceAndDate};
pub use cell::RawCell;
pub use classify::{
    classify_education_or_occupation, normalize_education, normalize_gender, normalize_occupation,
    EducationOrOccupation,
};
pub use columns::{normalize_key, ColumnTarget, HeaderMatch, StudentField};
pub use date::{excel_serial_to_iso, is_iso_date, normalize_date};
pub use name::{split_full_name, title_case, NameParts};
pub use phone::normalize_phone;
pub use record::{normalize_field, transform_row, StudentRecord};
pub use review::{review, Warning};
pub use rules::{ImportRules, RulesOverlay, RulesSummary};
pub use vocab::{EDUCATION_OPTIONS, OCCUPATION_OPTIONS, UNKNOWN};

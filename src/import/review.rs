use super::columns::StudentField;
use super::date::is_iso_date;
use super::record::StudentRecord;
use super::vocab::{FEMALE, MALE};
use serde::Serialize;

/// Something on a normalized record a person should look at. Normalizers
/// never fail, so these are the only signal that a value fell through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<StudentField>,
    pub value: String,
}

impl Warning {
    fn new(code: &'static str, field: Option<StudentField>, value: &str) -> Self {
        Warning {
            code,
            field,
            value: value.to_string(),
        }
    }
}

pub fn review(record: &StudentRecord) -> Vec<Warning> {
    let mut out = Vec::new();

    if record.first_name.is_empty() && record.last_name.is_empty() {
        out.push(Warning::new("missing_name", None, ""));
    }

    for field in [StudentField::RegistrationDate, StudentField::DateOfBirth] {
        let value = record.get(field);
        if !value.is_empty() && !is_iso_date(value) {
            out.push(Warning::new("unparsed_date", Some(field), value));
        }
    }

    let gender = record.gender.as_str();
    if !gender.is_empty() && gender != MALE && gender != FEMALE {
        out.push(Warning::new(
            "unrecognized_gender",
            Some(StudentField::Gender),
            gender,
        ));
    }

    for number in record.phone.split(", ").filter(|n| !n.is_empty()) {
        if !number.starts_with('0') || !number.chars().all(|c| c.is_ascii_digit()) {
            out.push(Warning::new(
                "unrecognized_phone",
                Some(StudentField::Phone),
                number,
            ));
        }
    }

    out
}

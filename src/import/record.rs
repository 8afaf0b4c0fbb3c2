use super::birth::parse_place_and_date_of_birth;
use super::cell::RawCell;
use super::classify::{
    classify_education_or_occupation, normalize_education, normalize_gender, normalize_occupation,
};
use super::columns::{ColumnTarget, HeaderMatch, StudentField};
use super::date::normalize_date;
use super::name::{split_full_name, title_case};
use super::phone::normalize_phone;
use super::rules::ImportRules;
use super::vocab::UNKNOWN;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub registration_date: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub nickname: String,
    pub gender: String,
    pub place_of_birth: String,
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub student_id: String,
    pub education: String,
    pub occupation: String,
}

/// Values that never overwrite something already on the record.
fn is_blank(field: StudentField, value: &str) -> bool {
    value.is_empty()
        || (matches!(field, StudentField::Education | StudentField::Occupation)
            && value == UNKNOWN)
}

impl StudentRecord {
    pub fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::RegistrationDate => &self.registration_date,
            StudentField::FirstName => &self.first_name,
            StudentField::MiddleName => &self.middle_name,
            StudentField::LastName => &self.last_name,
            StudentField::Nickname => &self.nickname,
            StudentField::Gender => &self.gender,
            StudentField::PlaceOfBirth => &self.place_of_birth,
            StudentField::DateOfBirth => &self.date_of_birth,
            StudentField::Address => &self.address,
            StudentField::Phone => &self.phone,
            StudentField::StudentId => &self.student_id,
            StudentField::Education => &self.education,
            StudentField::Occupation => &self.occupation,
        }
    }

    fn slot_mut(&mut self, field: StudentField) -> &mut String {
        match field {
            StudentField::RegistrationDate => &mut self.registration_date,
            StudentField::FirstName => &mut self.first_name,
            StudentField::MiddleName => &mut self.middle_name,
            StudentField::LastName => &mut self.last_name,
            StudentField::Nickname => &mut self.nickname,
            StudentField::Gender => &mut self.gender,
            StudentField::PlaceOfBirth => &mut self.place_of_birth,
            StudentField::DateOfBirth => &mut self.date_of_birth,
            StudentField::Address => &mut self.address,
            StudentField::Phone => &mut self.phone,
            StudentField::StudentId => &mut self.student_id,
            StudentField::Education => &mut self.education,
            StudentField::Occupation => &mut self.occupation,
        }
    }

    /// Later columns win, but a blank value never clears an earlier one.
    pub fn set(&mut self, field: StudentField, value: String) {
        if is_blank(field, &value) {
            return;
        }
        *self.slot_mut(field) = value;
    }

    fn finish(mut self) -> Self {
        for field in [StudentField::Education, StudentField::Occupation] {
            let slot = self.slot_mut(field);
            if slot.is_empty() {
                *slot = UNKNOWN.to_string();
            }
        }
        self
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes one cell destined for a single field.
pub fn normalize_field(rules: &ImportRules, field: StudentField, cell: &RawCell) -> String {
    match field {
        StudentField::RegistrationDate | StudentField::DateOfBirth => normalize_date(rules, cell),
        StudentField::FirstName | StudentField::MiddleName | StudentField::LastName => {
            title_case(&collapse(&cell.as_text()))
        }
        StudentField::Gender => normalize_gender(rules, &cell.as_text()),
        StudentField::Phone => normalize_phone(cell),
        StudentField::Education => normalize_education(rules, &cell.as_text()),
        StudentField::Occupation => normalize_occupation(rules, &cell.as_text()),
        StudentField::Nickname
        | StudentField::PlaceOfBirth
        | StudentField::Address
        | StudentField::StudentId => collapse(&cell.as_text()),
    }
}

fn apply_cell(
    rules: &ImportRules,
    record: &mut StudentRecord,
    target: ColumnTarget,
    cell: &RawCell,
) {
    match target {
        ColumnTarget::Field(field) => record.set(field, normalize_field(rules, field, cell)),
        ColumnTarget::FullName => {
            let name = split_full_name(&cell.as_text());
            // A full name replaces all three parts so two name columns never mix.
            if !name.first_name.is_empty() {
                record.first_name = name.first_name;
                record.middle_name = name.middle_name;
                record.last_name = name.last_name;
            }
        }
        ColumnTarget::EducationOrOccupation => {
            let c = classify_education_or_occupation(rules, &cell.as_text());
            record.set(StudentField::Education, c.education);
            record.set(StudentField::Occupation, c.occupation);
        }
        ColumnTarget::PlaceAndDateOfBirth => {
            let p = parse_place_and_date_of_birth(rules, cell);
            record.set(StudentField::PlaceOfBirth, p.place_of_birth);
            record.set(StudentField::DateOfBirth, p.date_of_birth);
        }
    }
}

/// Builds a record from one row of `(header, cell)` pairs in column order.
/// Unmapped and ignored columns contribute nothing.
pub fn transform_row(rules: &ImportRules, row: &[(String, RawCell)]) -> StudentRecord {
    let mut record = StudentRecord::default();
    for (header, cell) in row {
        if cell.is_empty() {
            continue;
        }
        if let HeaderMatch::Target(target) = rules.header(header) {
            apply_cell(rules, &mut record, target, cell);
        }
    }
    record.finish()
}

pub fn is_blank_row(row: &[(String, RawCell)]) -> bool {
    row.iter().all(|(_, cell)| cell.is_empty())
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StudentField {
    RegistrationDate,
    FirstName,
    MiddleName,
    LastName,
    Nickname,
    Gender,
    PlaceOfBirth,
    DateOfBirth,
    Address,
    Phone,
    StudentId,
    Education,
    Occupation,
}

impl StudentField {
    pub const ALL: [StudentField; 13] = [
        StudentField::RegistrationDate,
        StudentField::FirstName,
        StudentField::MiddleName,
        StudentField::LastName,
        StudentField::Nickname,
        StudentField::Gender,
        StudentField::PlaceOfBirth,
        StudentField::DateOfBirth,
        StudentField::Address,
        StudentField::Phone,
        StudentField::StudentId,
        StudentField::Education,
        StudentField::Occupation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudentField::RegistrationDate => "registrationDate",
            StudentField::FirstName => "firstName",
            StudentField::MiddleName => "middleName",
            StudentField::LastName => "lastName",
            StudentField::Nickname => "nickname",
            StudentField::Gender => "gender",
            StudentField::PlaceOfBirth => "placeOfBirth",
            StudentField::DateOfBirth => "dateOfBirth",
            StudentField::Address => "address",
            StudentField::Phone => "phone",
            StudentField::StudentId => "studentId",
            StudentField::Education => "education",
            StudentField::Occupation => "occupation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        StudentField::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Where a column's cells end up in the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTarget {
    Field(StudentField),
    /// Split into first/middle/last name.
    FullName,
    /// Classified into either education or occupation.
    EducationOrOccupation,
    /// "City, 07-Sep-2001" style cell.
    PlaceAndDateOfBirth,
}

impl ColumnTarget {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnTarget::Field(f) => f.as_str(),
            ColumnTarget::FullName => "__fullName",
            ColumnTarget::EducationOrOccupation => "__educationOrOccupation",
            ColumnTarget::PlaceAndDateOfBirth => "__placeAndDateOfBirth",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "__fullName" => Some(ColumnTarget::FullName),
            "__educationOrOccupation" => Some(ColumnTarget::EducationOrOccupation),
            "__placeAndDateOfBirth" => Some(ColumnTarget::PlaceAndDateOfBirth),
            other => StudentField::from_name(other).map(ColumnTarget::Field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderMatch {
    Target(ColumnTarget),
    /// Known header that carries nothing we import (row numbers, signatures).
    Ignored,
    Unmapped,
}

impl HeaderMatch {
    pub fn status(&self) -> &'static str {
        match self {
            HeaderMatch::Target(_) => "mapped",
            HeaderMatch::Ignored => "ignored",
            HeaderMatch::Unmapped => "unmapped",
        }
    }

    pub fn target(&self) -> Option<ColumnTarget> {
        match self {
            HeaderMatch::Target(t) => Some(*t),
            _ => None,
        }
    }
}

/// Lookup key for headers and vocabulary values: trimmed, upper-cased, inner
/// whitespace collapsed. Excel headers often carry line breaks and a BOM.
pub fn normalize_key(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '\u{feff}' || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

use ColumnTarget::{EducationOrOccupation, FullName, PlaceAndDateOfBirth};
use StudentField::*;

const fn to_field(field: StudentField) -> Option<ColumnTarget> {
    Some(ColumnTarget::Field(field))
}

/// Built-in header aliases, keys already in lookup form. `None` marks a
/// column that is recognized and skipped.
pub static COLUMN_MAPPING: &[(&str, Option<ColumnTarget>)] = &[
    ("NO", None),
    ("NO.", None),
    ("NO URUT", None),
    ("KETERANGAN", None),
    ("KET", None),
    ("KET.", None),
    ("TTD", None),
    ("PARAF", None),
    ("REMARKS", None),
    ("NOTES", None),
    ("TANGGAL DAFTAR", to_field(RegistrationDate)),
    ("TGL DAFTAR", to_field(RegistrationDate)),
    ("TGL. DAFTAR", to_field(RegistrationDate)),
    ("TANGGAL PENDAFTARAN", to_field(RegistrationDate)),
    ("TANGAL DAFTAR", to_field(RegistrationDate)),
    ("REGISTRATION DATE", to_field(RegistrationDate)),
    ("REGISTER DATE", to_field(RegistrationDate)),
    ("DATE", to_field(RegistrationDate)),
    ("NAMA", Some(FullName)),
    ("NAMA LENGKAP", Some(FullName)),
    ("NAMA SISWA", Some(FullName)),
    ("NAMA PESERTA", Some(FullName)),
    ("NAMA LENGKAP SISWA", Some(FullName)),
    ("NAMA LENGKA", Some(FullName)),
    ("FULL NAME", Some(FullName)),
    ("FULLNAME", Some(FullName)),
    ("NAME", Some(FullName)),
    ("STUDENT NAME", Some(FullName)),
    ("FIRST NAME", to_field(FirstName)),
    ("NAMA DEPAN", to_field(FirstName)),
    ("MIDDLE NAME", to_field(MiddleName)),
    ("NAMA TENGAH", to_field(MiddleName)),
    ("LAST NAME", to_field(LastName)),
    ("NAMA BELAKANG", to_field(LastName)),
    ("SURNAME", to_field(LastName)),
    ("NICKNAME", to_field(Nickname)),
    ("NICK NAME", to_field(Nickname)),
    ("NAMA PANGGILAN", to_field(Nickname)),
    ("PANGGILAN", to_field(Nickname)),
    ("GENDER", to_field(Gender)),
    ("SEX", to_field(Gender)),
    ("JENIS KELAMIN", to_field(Gender)),
    ("JENIS KELAMN", to_field(Gender)),
    ("JK", to_field(Gender)),
    ("L/P", to_field(Gender)),
    ("TEMPAT LAHIR", to_field(PlaceOfBirth)),
    ("PLACE OF BIRTH", to_field(PlaceOfBirth)),
    ("BIRTHPLACE", to_field(PlaceOfBirth)),
    ("TANGGAL LAHIR", to_field(DateOfBirth)),
    ("TGL LAHIR", to_field(DateOfBirth)),
    ("TGL. LAHIR", to_field(DateOfBirth)),
    ("TANGAL LAHIR", to_field(DateOfBirth)),
    ("DATE OF BIRTH", to_field(DateOfBirth)),
    ("BIRTH DATE", to_field(DateOfBirth)),
    ("BIRTHDATE", to_field(DateOfBirth)),
    ("DOB", to_field(DateOfBirth)),
    ("TEMPAT, TANGGAL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TEMPAT/TANGGAL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TEMPAT TANGGAL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TEMPAT, TGL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TEMPAT/TGL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TEMPAT/ TGL LAHIR", Some(PlaceAndDateOfBirth)),
    ("TTL", Some(PlaceAndDateOfBirth)),
    ("PLACE AND DATE OF BIRTH", Some(PlaceAndDateOfBirth)),
    ("PLACE/DATE OF BIRTH", Some(PlaceAndDateOfBirth)),
    ("PLACE, DATE OF BIRTH", Some(PlaceAndDateOfBirth)),
    ("ALAMAT", to_field(Address)),
    ("ALAMAT LENGKAP", to_field(Address)),
    ("ALAMAT RUMAH", to_field(Address)),
    ("ALAMT", to_field(Address)),
    ("ADDRESS", to_field(Address)),
    ("NO HP", to_field(Phone)),
    ("NO. HP", to_field(Phone)),
    ("NO HP/WA", to_field(Phone)),
    ("NO. HP/WA", to_field(Phone)),
    ("NO TELP", to_field(Phone)),
    ("NO. TELP", to_field(Phone)),
    ("NO TELEPON", to_field(Phone)),
    ("NOMOR HP", to_field(Phone)),
    ("NOMOR TELEPON", to_field(Phone)),
    ("NO WA", to_field(Phone)),
    ("NO. WA", to_field(Phone)),
    ("TELEPON", to_field(Phone)),
    ("HP", to_field(Phone)),
    ("WA", to_field(Phone)),
    ("WHATSAPP", to_field(Phone)),
    ("PHONE", to_field(Phone)),
    ("PHONE NUMBER", to_field(Phone)),
    ("NIS", to_field(StudentId)),
    ("NO INDUK", to_field(StudentId)),
    ("NO. INDUK", to_field(StudentId)),
    ("NOMOR INDUK", to_field(StudentId)),
    ("ID SISWA", to_field(StudentId)),
    ("STUDENT ID", to_field(StudentId)),
    ("PENDIDIKAN", to_field(Education)),
    ("PENDIDIKAN TERAKHIR", to_field(Education)),
    ("PENDIDKAN", to_field(Education)),
    ("EDUCATION", to_field(Education)),
    ("LAST EDUCATION", to_field(Education)),
    ("PEKERJAAN", to_field(Occupation)),
    ("PEKERJAN", to_field(Occupation)),
    ("OCCUPATION", to_field(Occupation)),
    ("JOB", to_field(Occupation)),
    ("PENDIDIKAN/PEKERJAAN", Some(EducationOrOccupation)),
    ("PEKERJAAN/PENDIDIKAN", Some(EducationOrOccupation)),
    ("PENDIDIKAN / PEKERJAAN", Some(EducationOrOccupation)),
    ("PEKERJAAN / PENDIDIKAN", Some(EducationOrOccupation)),
    ("EDUCATION/OCCUPATION", Some(EducationOrOccupation)),
    ("OCCUPATION/EDUCATION", Some(EducationOrOccupation)),
    ("STATUS", Some(EducationOrOccupation)),
];

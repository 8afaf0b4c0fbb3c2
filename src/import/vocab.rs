//! Closed value vocabularies. Keys are in lookup form (see
//! [`normalize_key`](super::columns::normalize_key)); values are the
//! canonical labels stored on a student record.

pub const UNKNOWN: &str = "Unknown";

pub const MALE: &str = "male";
pub const FEMALE: &str = "female";

pub static GENDER_MAP: &[(&str, &str)] = &[
    ("LAKI-LAKI", MALE),
    ("LAKI LAKI", MALE),
    ("LAKI", MALE),
    ("L", MALE),
    ("LK", MALE),
    ("PRIA", MALE),
    ("COWOK", MALE),
    ("MALE", MALE),
    ("M", MALE),
    ("MAN", MALE),
    ("BOY", MALE),
    ("PEREMPUAN", FEMALE),
    ("P", FEMALE),
    ("PR", FEMALE),
    ("WANITA", FEMALE),
    ("CEWEK", FEMALE),
    ("FEMALE", FEMALE),
    ("F", FEMALE),
    ("WOMAN", FEMALE),
    ("GIRL", FEMALE),
];

pub static EDUCATION_OPTIONS: &[&str] = &[
    "Elementary School",
    "Junior High School",
    "Senior High School",
    "Diploma 1",
    "Diploma 2",
    "Diploma 3",
    "Diploma 4",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctoral Degree",
];

pub static EDUCATION_VALUE_MAP: &[(&str, &str)] = &[
    ("SD", "Elementary School"),
    ("MI", "Elementary School"),
    ("SEKOLAH DASAR", "Elementary School"),
    ("ELEMENTARY", "Elementary School"),
    ("PRIMARY SCHOOL", "Elementary School"),
    ("SMP", "Junior High School"),
    ("MTS", "Junior High School"),
    ("SLTP", "Junior High School"),
    ("SEKOLAH MENENGAH PERTAMA", "Junior High School"),
    ("JUNIOR HIGH", "Junior High School"),
    ("JHS", "Junior High School"),
    ("SMA", "Senior High School"),
    ("SMK", "Senior High School"),
    ("SMA/SMK", "Senior High School"),
    ("SLTA", "Senior High School"),
    ("STM", "Senior High School"),
    ("SMEA", "Senior High School"),
    ("SMU", "Senior High School"),
    ("SEKOLAH MENENGAH ATAS", "Senior High School"),
    ("SEKOLAH MENENGAH KEJURUAN", "Senior High School"),
    ("SENIOR HIGH", "Senior High School"),
    ("HIGH SCHOOL", "Senior High School"),
    ("SHS", "Senior High School"),
    ("D1", "Diploma 1"),
    ("D-1", "Diploma 1"),
    ("D I", "Diploma 1"),
    ("DIPLOMA I", "Diploma 1"),
    ("D2", "Diploma 2"),
    ("D-2", "Diploma 2"),
    ("D II", "Diploma 2"),
    ("DIPLOMA II", "Diploma 2"),
    ("D3", "Diploma 3"),
    ("D-3", "Diploma 3"),
    ("D III", "Diploma 3"),
    ("DIPLOMA III", "Diploma 3"),
    ("D4", "Diploma 4"),
    ("D-4", "Diploma 4"),
    ("D IV", "Diploma 4"),
    ("DIPLOMA IV", "Diploma 4"),
    ("S1", "Bachelor's Degree"),
    ("S-1", "Bachelor's Degree"),
    ("STRATA 1", "Bachelor's Degree"),
    ("SARJANA", "Bachelor's Degree"),
    ("BACHELOR", "Bachelor's Degree"),
    ("BACHELOR DEGREE", "Bachelor's Degree"),
    ("S2", "Master's Degree"),
    ("S-2", "Master's Degree"),
    ("STRATA 2", "Master's Degree"),
    ("MAGISTER", "Master's Degree"),
    ("MASTER", "Master's Degree"),
    ("MASTER DEGREE", "Master's Degree"),
    ("S3", "Doctoral Degree"),
    ("S-3", "Doctoral Degree"),
    ("STRATA 3", "Doctoral Degree"),
    ("DOKTORAL", "Doctoral Degree"),
    ("DOCTORATE", "Doctoral Degree"),
    ("PHD", "Doctoral Degree"),
    ("PH.D", "Doctoral Degree"),
];

pub static OCCUPATION_OPTIONS: &[&str] = &[
    "Student",
    "University Student",
    "Employee",
    "Civil Servant",
    "Entrepreneur",
    "Teacher",
    "Lecturer",
    "Doctor",
    "Nurse",
    "Homemaker",
    "Farmer",
    "Fisherman",
    "Police Officer",
    "Military",
    "Retired",
    "Unemployed",
    "Other",
];

pub static OCCUPATION_VALUE_MAP: &[(&str, &str)] = &[
    ("PELAJAR", "Student"),
    ("SISWA", "Student"),
    ("SISWI", "Student"),
    ("PELAJAR/SISWA", "Student"),
    ("STUDENT", "Student"),
    ("MAHASISWA", "University Student"),
    ("MAHASISWI", "University Student"),
    ("MAHASISWA/I", "University Student"),
    ("COLLEGE STUDENT", "University Student"),
    ("KARYAWAN", "Employee"),
    ("KARYAWATI", "Employee"),
    ("KARYAWAN SWASTA", "Employee"),
    ("PEGAWAI SWASTA", "Employee"),
    ("PEGAWAI", "Employee"),
    ("BURUH", "Employee"),
    ("STAFF", "Employee"),
    ("PRIVATE EMPLOYEE", "Employee"),
    ("PNS", "Civil Servant"),
    ("ASN", "Civil Servant"),
    ("PEGAWAI NEGERI", "Civil Servant"),
    ("PEGAWAI NEGERI SIPIL", "Civil Servant"),
    ("HONORER", "Civil Servant"),
    ("WIRASWASTA", "Entrepreneur"),
    ("WIRAUSAHA", "Entrepreneur"),
    ("PENGUSAHA", "Entrepreneur"),
    ("PEDAGANG", "Entrepreneur"),
    ("SELF-EMPLOYED", "Entrepreneur"),
    ("SELF EMPLOYED", "Entrepreneur"),
    ("BUSINESS OWNER", "Entrepreneur"),
    ("GURU", "Teacher"),
    ("GURU HONORER", "Teacher"),
    ("DOSEN", "Lecturer"),
    ("DOKTER", "Doctor"),
    ("PERAWAT", "Nurse"),
    ("BIDAN", "Nurse"),
    ("IBU RUMAH TANGGA", "Homemaker"),
    ("IRT", "Homemaker"),
    ("HOUSEWIFE", "Homemaker"),
    ("PETANI", "Farmer"),
    ("NELAYAN", "Fisherman"),
    ("POLISI", "Police Officer"),
    ("POLRI", "Police Officer"),
    ("POLICE", "Police Officer"),
    ("TNI", "Military"),
    ("TENTARA", "Military"),
    ("SOLDIER", "Military"),
    ("PENSIUNAN", "Retired"),
    ("PURNAWIRAWAN", "Retired"),
    ("TIDAK BEKERJA", "Unemployed"),
    ("BELUM BEKERJA", "Unemployed"),
    ("LAINNYA", "Other"),
    ("LAIN-LAIN", "Other"),
    ("OTHERS", "Other"),
    ("-", UNKNOWN),
];

/// Month names and abbreviations seen in source sheets, English and
/// Indonesian. Lookups also try the first three letters, so full names like
/// "Agustus" resolve through "agu".
pub static MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("peb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("mei", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("agu", 8),
    ("ago", 8),
    ("agt", 8),
    ("sep", 9),
    ("oct", 10),
    ("okt", 10),
    ("nov", 11),
    ("nop", 11),
    ("dec", 12),
    ("des", 12),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::columns::normalize_key;

    fn assert_lookup_form(table: &[(&str, &str)], targets: &[&str]) {
        for (key, value) in table {
            assert_eq!(normalize_key(key), *key, "key not in lookup form: {key}");
            assert!(
                targets.contains(value),
                "{key} maps outside the vocabulary: {value}"
            );
        }
    }

    #[test]
    fn every_alias_targets_a_canonical_label() {
        assert_lookup_form(GENDER_MAP, &[MALE, FEMALE]);
        assert_lookup_form(EDUCATION_VALUE_MAP, EDUCATION_OPTIONS);
        let mut occupations = OCCUPATION_OPTIONS.to_vec();
        occupations.push(UNKNOWN);
        assert_lookup_form(OCCUPATION_VALUE_MAP, &occupations);
    }

    #[test]
    fn education_and_occupation_aliases_do_not_overlap() {
        for (key, _) in EDUCATION_VALUE_MAP {
            assert!(
                OCCUPATION_VALUE_MAP.iter().all(|(k, _)| k != key),
                "{key} is both an education and an occupation alias"
            );
        }
    }
}

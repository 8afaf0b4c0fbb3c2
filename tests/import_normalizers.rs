#[path = "../src/import/mod.rs"]
mod import;

use import::{
    classify_education_or_occupation, excel_serial_to_iso, is_iso_date, normalize_date,
    normalize_education, normalize_gender, normalize_occupation, normalize_phone,
    parse_place_and_date_of_birth, split_full_name, transform_row, ImportRules, NameParts,
    RawCell, StudentField, EDUCATION_OPTIONS, OCCUPATION_OPTIONS, UNKNOWN,
};
use std::path::PathBuf;

fn fixture_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

fn rules() -> &'static ImportRules {
    ImportRules::builtin()
}

fn text(s: &str) -> RawCell {
    RawCell::Text(s.to_string())
}

#[test]
fn excel_serials_in_range_always_render_iso() {
    let mut serial = 0.0;
    while serial <= 2_958_465.0 {
        let out = normalize_date(rules(), &RawCell::Number(serial));
        assert!(is_iso_date(&out), "serial {serial} -> {out:?}");
        serial += 997.0;
    }
    assert_eq!(excel_serial_to_iso(2_958_465.0).as_deref(), Some("9999-12-31"));
    for time_only in [0.0, 0.25, 0.999] {
        let out = normalize_date(rules(), &RawCell::Number(time_only));
        assert_eq!(out, "1899-12-30", "serial {time_only}");
    }
    assert_eq!(excel_serial_to_iso(-1.0), None);
    assert_eq!(excel_serial_to_iso(2_958_466.0), None);
}

#[test]
fn dates_written_out_become_iso() {
    assert_eq!(normalize_date(rules(), &text("07-Sep-25")), "2025-09-07");
    assert_eq!(normalize_date(rules(), &text("20/01/2025")), "2025-01-20");
    assert_eq!(normalize_date(rules(), &text("17 Agustus 1998")), "1998-08-17");
    assert_eq!(normalize_date(rules(), &text("1-Des-99")), "1999-12-01");
    assert_eq!(normalize_date(rules(), &RawCell::Number(45677.0)), "2025-01-20");
    assert_eq!(normalize_date(rules(), &text("  belum tahu ")), "belum tahu");
    assert_eq!(normalize_date(rules(), &RawCell::Empty), "");
}

#[test]
fn phone_numbers_become_local_lists() {
    assert_eq!(
        normalize_phone(&text("081339496117X082147215233")),
        "081339496117, 082147215233"
    );
    assert_eq!(normalize_phone(&text("+6281234567890")), "081234567890");
    assert_eq!(normalize_phone(&text("6281234567890")), "081234567890");
    assert_eq!(normalize_phone(&RawCell::Number(81234567890.0)), "081234567890");
    assert_eq!(normalize_phone(&text("0812-3456-7890")), "081234567890");
    assert_eq!(normalize_phone(&RawCell::Empty), "");
}

#[test]
fn vocabulary_normalizers_use_sentinels() {
    assert_eq!(normalize_gender(rules(), "Laki-laki"), "male");
    assert_eq!(normalize_gender(rules(), "P"), "female");
    assert_eq!(normalize_gender(rules(), ""), "");
    assert_eq!(normalize_gender(rules(), " Lainnya "), "lainnya");

    assert_eq!(normalize_education(rules(), "S1"), "Bachelor's Degree");
    assert_eq!(normalize_education(rules(), ""), UNKNOWN);
    assert_eq!(normalize_education(rules(), "sma"), "Senior High School");

    assert_eq!(normalize_occupation(rules(), "PNS"), "Civil Servant");
    assert_eq!(normalize_occupation(rules(), "astronot"), UNKNOWN);
}

#[test]
fn combined_column_lands_in_one_field() {
    let guru = classify_education_or_occupation(rules(), "GURU");
    assert_eq!(guru.education, UNKNOWN);
    assert_eq!(guru.occupation, "Teacher");

    let s2 = classify_education_or_occupation(rules(), "S2");
    assert_eq!(s2.education, "Master's Degree");
    assert_eq!(s2.occupation, UNKNOWN);
}

#[test]
fn full_names_split_into_three_parts() {
    assert_eq!(
        split_full_name("budi santoso"),
        NameParts {
            first_name: "Budi".into(),
            middle_name: "".into(),
            last_name: "Santoso".into(),
        }
    );
    assert_eq!(
        split_full_name("ahmad budi santoso wijaya"),
        NameParts {
            first_name: "Ahmad".into(),
            middle_name: "Budi Santoso".into(),
            last_name: "Wijaya".into(),
        }
    );
}

#[test]
fn place_and_date_cells_split() {
    let p = parse_place_and_date_of_birth(rules(), &text("Kupang, 07-Sep-2001"));
    assert_eq!(p.place_of_birth, "Kupang");
    assert_eq!(p.date_of_birth, "2001-09-07");

    let only_place = parse_place_and_date_of_birth(rules(), &text("Kupang"));
    assert_eq!(only_place.place_of_birth, "Kupang");
    assert_eq!(only_place.date_of_birth, "");
}

#[test]
fn canonical_outputs_are_fixed_points() {
    for d in ["2025-09-07", "1999-12-01"] {
        assert_eq!(normalize_date(rules(), &text(d)), d);
    }
    for p in ["081339496117, 082147215233", "081234567890"] {
        assert_eq!(normalize_phone(&text(p)), p);
    }
    for g in ["male", "female"] {
        assert_eq!(normalize_gender(rules(), g), g);
    }
    for label in EDUCATION_OPTIONS.iter().copied().chain([UNKNOWN]) {
        assert_eq!(normalize_education(rules(), label), label);
    }
    for label in OCCUPATION_OPTIONS.iter().copied().chain([UNKNOWN]) {
        assert_eq!(normalize_occupation(rules(), label), label);
    }
    let once = split_full_name("ahmad budi santoso wijaya");
    let joined = format!("{} {} {}", once.first_name, once.middle_name, once.last_name);
    assert_eq!(split_full_name(&joined), once);
}

#[test]
fn rules_file_extends_lookups() {
    let mut rules = ImportRules::default();
    rules
        .load_file(&fixture_path("fixtures/rules_extra.json"))
        .expect("load rules_extra.json");

    assert_eq!(normalize_gender(&rules, "lanang"), "male");
    assert_eq!(normalize_occupation(&rules, "OJOL"), "Employee");
    assert_eq!(normalize_date(&rules, &text("3 Janvier 2024")), "2024-01-03");

    let record = transform_row(
        &rules,
        &[
            ("Nama Murid".to_string(), text("sari dewi")),
            ("Kontak".to_string(), text("+6285212345678")),
            ("Catatan Wali".to_string(), text("rajin")),
        ],
    );
    assert_eq!(record.get(StudentField::FirstName), "Sari");
    assert_eq!(record.get(StudentField::LastName), "Dewi");
    assert_eq!(record.get(StudentField::Phone), "085212345678");
}

#[test]
fn invalid_rules_file_leaves_rules_untouched() {
    let mut rules = ImportRules::default();
    let before = rules.summary();
    let err = rules
        .load_file(&fixture_path("fixtures/rules_invalid.json"))
        .expect_err("invalid gender target must be rejected");
    assert!(format!("{err:#}").contains("man"));
    assert_eq!(rules.summary(), before);
    assert_eq!(normalize_gender(&rules, "Cowok"), "male");
}

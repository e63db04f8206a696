//! End-to-end validation scenarios: the real `NativeChecker` behind the
//! `Validator`, with files served from memory.

use verity_adapters::{MemoryFile, MemoryFileInspector, NativeChecker};
use verity_core::application::{FieldErrors, ValidationOptions, ValidationReport, Validator};
use verity_core::domain::{
    Charset, ChoiceRules, Constrainable, ConstrainableValue, Constraint, ConstraintKind,
    ConstraintSet, Description, Email, EntityId, ErrorCode, FileRef, FileRules, GroupType,
    ImageRules, ImageUpload, Name, NameField, Password, Price, ProductDraft, RawValue, Tags,
    UploadError,
};

fn files() -> MemoryFileInspector {
    let files = MemoryFileInspector::new();
    files.insert(
        "uploads/cat.png",
        MemoryFile::new(40_000).mime_type("image/png").dimensions(800, 600),
    );
    files.insert(
        "uploads/huge.png",
        MemoryFile::new(90_000).mime_type("image/png").dimensions(5_000, 5_000),
    );
    files.insert(
        "uploads/broken.jpg",
        MemoryFile::new(1_024).mime_type("image/jpeg").corrupted(),
    );
    files.insert(
        "uploads/report.pdf",
        MemoryFile::new(2_048).mime_type("application/pdf"),
    );
    files
}

fn validator() -> Validator {
    Validator::new(Box::new(NativeChecker::new(files())))
}

fn value(raw: impl Into<RawValue>, constraints: impl IntoIterator<Item = Constraint>) -> ConstrainableValue {
    ConstrainableValue::with_constraints(raw, constraints.into_iter().collect::<ConstraintSet>())
}

fn codes(raw: impl Into<RawValue>, constraints: impl IntoIterator<Item = Constraint>) -> Vec<ErrorCode> {
    validator().validate(&mut value(raw, constraints)).unwrap()
}

#[test]
fn test_no_constraints_means_no_errors() {
    for raw in [
        RawValue::Null,
        RawValue::str(""),
        RawValue::Int(-3),
        RawValue::file("nowhere"),
    ] {
        assert!(codes(raw, Vec::<Constraint>::new()).is_empty());
    }
}

#[test]
fn test_string_range_boundaries() {
    let range = || [Constraint::string_range(3, 5)];
    assert!(codes("abc", range()).is_empty());
    assert!(codes("abcde", range()).is_empty());
    assert_eq!(codes("ab", range()), [ErrorCode::StringTooShort]);
    assert_eq!(codes("abcdef", range()), [ErrorCode::StringTooLong]);
}

#[test]
fn test_retaining_is_idempotent_and_consuming_clears() {
    let validator = validator();
    let mut v = value("", [Constraint::not_blank(), Constraint::string_min(6)]);

    let first = validator.validate_retaining(&v).unwrap();
    let second = validator.validate_retaining(&v).unwrap();
    assert_eq!(first, second);

    assert_eq!(validator.validate(&mut v).unwrap(), first);
    assert!(validator.validate(&mut v).unwrap().is_empty());
}

#[test]
fn test_declared_order_is_preserved() {
    assert_eq!(
        codes("", [Constraint::not_blank(), Constraint::string_min(6)]),
        [ErrorCode::NotBlank, ErrorCode::StringTooShort]
    );
    assert_eq!(
        codes("", [Constraint::string_min(6), Constraint::not_blank()]),
        [ErrorCode::StringTooShort, ErrorCode::NotBlank]
    );
}

#[test]
fn test_same_code_may_appear_twice() {
    assert_eq!(
        codes(RawValue::Null, [Constraint::not_blank(), Constraint::not_blank()]),
        [ErrorCode::NotBlank, ErrorCode::NotBlank]
    );
}

#[test]
fn test_literal_scenarios() {
    let v = validator();
    assert_eq!(
        v.validate_object(&EntityId::new("not valid id")).unwrap(),
        [ErrorCode::UuidInvalidCharacters]
    );
    assert_eq!(
        codes("", [Constraint::not_blank()]),
        [ErrorCode::NotBlank]
    );
    assert_eq!(
        v.validate_object(&Email::new(None)).unwrap(),
        [ErrorCode::NotBlank, ErrorCode::NotNull]
    );
    assert_eq!(
        codes(
            RawValue::file("uploads/missing.png"),
            [Constraint::file(
                FileRules::new().max_size(10).mime_types(["image/*"])
            )]
        ),
        [ErrorCode::FileNotFound]
    );
    let roles = Constraint::choice(ChoiceRules::new(GroupType::CHOICES.iter().copied())).unwrap();
    assert_eq!(codes("guest", [roles]), [ErrorCode::ChoiceNotSuch]);
}

#[test]
fn test_null_versus_blank_order_is_per_type() {
    let v = validator();
    assert_eq!(
        v.validate_object(&ImageUpload::new(None)).unwrap(),
        [ErrorCode::NotNull, ErrorCode::NotBlank]
    );
    assert_eq!(
        v.validate_object(&Email::new(None)).unwrap(),
        [ErrorCode::NotBlank, ErrorCode::NotNull]
    );
}

#[test]
fn test_value_objects_accept_good_values() {
    let v = validator();
    assert!(v.validate_object(&EntityId::generate()).unwrap().is_empty());
    assert!(
        v.validate_object(&Email::new(Some("ada@example.com".to_owned())))
            .unwrap()
            .is_empty()
    );
    assert!(
        v.validate_object(&Name::new(Some("Ada".to_owned()), NameField::User))
            .unwrap()
            .is_empty()
    );
    assert!(v.validate_object(&Password::new("hunter22")).unwrap().is_empty());
    assert!(v.validate_object(&GroupType::new("seller")).unwrap().is_empty());
    assert!(v.validate_object(&Price::new(0.0)).unwrap().is_empty());
    assert!(
        v.validate_object(&ImageUpload::new(FileRef::new("uploads/cat.png")))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_value_objects_reject_bad_values() {
    let v = validator();
    assert_eq!(
        v.validate_object(&Password::new("abc")).unwrap(),
        [ErrorCode::StringTooShort]
    );
    assert_eq!(
        v.validate_object(&Price::new(-1.0)).unwrap(),
        [ErrorCode::PositiveOrZero]
    );
    assert_eq!(
        v.validate_object(&Tags::new(["a", "b", "a"])).unwrap(),
        [ErrorCode::Unique]
    );
    assert_eq!(
        v.validate_object(&Description::with_max(Some("too long".to_owned()), 3))
            .unwrap(),
        [ErrorCode::StringTooLong]
    );
}

#[test]
fn test_image_problems_accumulate_after_file_checks() {
    let v = validator();
    assert_eq!(
        v.validate_object(&ImageUpload::new(FileRef::new("uploads/huge.png")))
            .unwrap(),
        [ErrorCode::ImageTooWide, ErrorCode::ImageTooHigh]
    );
    assert_eq!(
        v.validate_object(&ImageUpload::new(FileRef::new("uploads/broken.jpg")))
            .unwrap(),
        [ErrorCode::ImageCorrupted]
    );
    assert_eq!(
        v.validate_object(&ImageUpload::new(FileRef::new("uploads/report.pdf")))
            .unwrap(),
        [ErrorCode::FileInvalidMimeType]
    );
}

#[test]
fn test_too_large_maps_per_descriptor() {
    let limit = FileRules::new().max_size(1_000);
    assert_eq!(
        codes(RawValue::file("uploads/cat.png"), [Constraint::file(limit.clone())]),
        [ErrorCode::FileTooLarge]
    );
    assert_eq!(
        codes(
            RawValue::file("uploads/cat.png"),
            [Constraint::image(ImageRules::new().file(limit))]
        ),
        [ErrorCode::ImageTooLarge]
    );
}

#[test]
fn test_upload_failures_surface_as_codes() {
    let upload = FileRef::new("uploads/cat.png").with_upload_error(UploadError::IniSize);
    assert_eq!(
        codes(upload, [Constraint::file(FileRules::new())]),
        [ErrorCode::FileUploadIniSize]
    );
}

#[test]
fn test_comparisons_and_ranges() {
    assert_eq!(codes(3_i64, [Constraint::greater_than(5_i64)]), [ErrorCode::GreaterThan]);
    assert!(codes("5", [Constraint::equal_to(5_i64)]).is_empty());
    assert_eq!(codes("5", [Constraint::identical_to(5_i64)]), [ErrorCode::IdenticalTo]);
    assert_eq!(
        codes(12_i64, [Constraint::range(Some(1.0), Some(10.0)).unwrap()]),
        [ErrorCode::RangeNotInRange]
    );
    assert_eq!(
        codes("twelve", [Constraint::range(Some(1.0), None).unwrap()]),
        [ErrorCode::RangeInvalidCharacters]
    );
}

#[test]
fn test_temporal_checks() {
    assert_eq!(codes("2023-02-30", [Constraint::date()]), [ErrorCode::DateInvalid]);
    assert_eq!(
        codes("30.01.2023 12:00", [Constraint::date_time()]),
        [ErrorCode::DatetimeInvalidFormat]
    );
    assert_eq!(codes("12:61:00", [Constraint::time(true)]), [ErrorCode::TimeInvalid]);
    assert_eq!(codes("Nowhere/City", [Constraint::time_zone()]), [ErrorCode::TimezoneIdentifier]);
}

#[test]
fn test_length_charset_reports_invalid_characters() {
    let ascii = Constraint::string_range(1, 10).with_charset(Charset::Ascii).unwrap();
    assert_eq!(codes("café", [ascii.clone()]), [ErrorCode::StringInvalidCharacters]);
    assert!(codes("cafe", [ascii]).is_empty());

    let latin1 = Constraint::from_params(
        ConstraintKind::StringLength,
        [("exact", RawValue::Int(1)), ("charset", RawValue::str("ISO-8859-1"))],
    )
    .unwrap();
    assert_eq!(codes("😀", [latin1]), [ErrorCode::StringInvalidCharacters]);
}

#[test]
fn test_time_zone_restricted_to_a_country() {
    let france =
        Constraint::from_params(ConstraintKind::TimeZone, [("countryCode", RawValue::str("FR"))])
            .unwrap();
    assert!(codes("Europe/Paris", [france.clone()]).is_empty());
    assert_eq!(
        codes("America/New_York", [france]),
        [ErrorCode::TimezoneIdentifierInCountry]
    );
}

#[test]
fn test_fatal_faults_are_errors_not_codes() {
    let mut v = value(RawValue::str("abc"), [Constraint::count_range(Some(1), None).unwrap()]);
    assert!(validator().validate(&mut v).is_err());
}

#[test]
fn test_validate_many_omits_clean_entries() {
    let results = validator()
        .validate_many([
            ("email", Email::new(Some("nope".to_owned())).constrainable()),
            ("name", Name::new(Some("Ada".to_owned()), NameField::User).constrainable()),
        ])
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results["email"], [ErrorCode::Email]);
}

#[test]
fn test_validate_each_keys_by_position() {
    let mut ids: Vec<_> = [EntityId::generate(), EntityId::new("bad"), EntityId::generate()]
        .iter()
        .map(Constrainable::constrainable)
        .collect();
    let results = validator().validate_each(&mut ids).unwrap();
    assert_eq!(results.keys().copied().collect::<Vec<_>>(), [1]);
}

fn draft(images: Vec<ImageUpload>) -> ProductDraft {
    ProductDraft {
        name: Name::new(Some("Lamp".to_owned()), NameField::Product),
        price: Price::new(12.5),
        description: Description::new(None),
        tags: Tags::new(["home"]),
        images,
    }
}

#[test]
fn test_composite_reports_only_the_invalid_element() {
    let images = vec![
        ImageUpload::new(FileRef::new("uploads/cat.png")),
        ImageUpload::new(FileRef::new("uploads/missing.png")),
        ImageUpload::new(FileRef::new("uploads/cat.png")),
    ];
    let report: ValidationReport = validator()
        .validate_composite(&mut draft(images).constrainable())
        .unwrap();

    assert_eq!(report.len(), 1);
    let Some(FieldErrors::Elements(elements)) = report.get("images") else {
        panic!("expected element errors, got {report:?}");
    };
    assert_eq!(elements.keys().copied().collect::<Vec<_>>(), [1]);
    assert_eq!(elements[&1].codes(), [ErrorCode::FileNotFound]);
}

#[test]
fn test_composite_can_preserve_empty_entries() {
    let validator = Validator::with_options(
        Box::new(NativeChecker::new(files())),
        ValidationOptions {
            preserve_empty: true,
        },
    );
    let report = validator
        .validate_composite(&mut draft(Vec::new()).constrainable())
        .unwrap();
    assert!(report.is_valid());
    assert!(report.get("name").is_some());
    assert!(report.get("images").is_some());
}

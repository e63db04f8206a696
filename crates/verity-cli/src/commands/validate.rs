//! `verity validate`: run a document's values through the engine.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use verity_adapters::NativeChecker;
use verity_core::application::{FieldErrors, ValidationOptions, ValidationReport, Validator};
use verity_core::domain::ErrorCode;

use crate::{
    cli::{OutputFormat, ReportFormat, ValidateArgs},
    config::AppConfig,
    document::{Document, Entries, Entry},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Per-entry results, shaped after the document.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Results {
    Named(BTreeMap<String, Vec<ErrorCode>>),
    Positional(BTreeMap<usize, Vec<ErrorCode>>),
    NamedComposite(BTreeMap<String, ValidationReport>),
    PositionalComposite(BTreeMap<usize, ValidationReport>),
}

impl Results {
    fn invalid(&self) -> usize {
        match self {
            Self::Named(m) => m.values().filter(|c| !c.is_empty()).count(),
            Self::Positional(m) => m.values().filter(|c| !c.is_empty()).count(),
            Self::NamedComposite(m) => m.values().filter(|r| !r.is_valid()).count(),
            Self::PositionalComposite(m) => m.values().filter(|r| !r.is_valid()).count(),
        }
    }

    /// `(path, codes)` per leaf, depth first.
    fn lines(&self) -> Vec<(String, Vec<ErrorCode>)> {
        let mut out = Vec::new();
        match self {
            Self::Named(m) => out.extend(m.iter().map(|(k, v)| (k.clone(), v.clone()))),
            Self::Positional(m) => out.extend(m.iter().map(|(i, v)| (format!("[{i}]"), v.clone()))),
            Self::NamedComposite(m) => {
                for (name, report) in m {
                    flatten_report(name, report, &mut out);
                }
            }
            Self::PositionalComposite(m) => {
                for (index, report) in m {
                    flatten_report(&format!("[{index}]"), report, &mut out);
                }
            }
        }
        out
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    valid: bool,
    total: usize,
    invalid: usize,
    checked_at: DateTime<Utc>,
    errors: &'a Results,
}

#[instrument(skip_all, fields(file = %args.file.display(), composite = args.composite))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let document = Document::load(&args.file)?;
    let base_dir = args
        .base_dir
        .or(config.validation.base_dir)
        .unwrap_or_else(|| document.base_dir());
    let options = ValidationOptions {
        preserve_empty: args.preserve_empty || config.validation.preserve_empty,
    };
    let validator = Validator::with_options(Box::new(NativeChecker::local()), options);

    let total = document.entries.len();
    let path = document.path().to_path_buf();
    let results = if args.composite {
        run_composite(&validator, document.entries, &base_dir, options.preserve_empty)?
    } else {
        run_flat(&validator, document.entries, &base_dir)?
    };
    let invalid = results.invalid();
    info!(total, invalid, "document validated");

    let format = match (args.format, output.format()) {
        (Some(format), _) => format,
        (None, OutputFormat::Json) => ReportFormat::Json,
        (None, _) => ReportFormat::Human,
    };
    match format {
        ReportFormat::Json => output.json(&JsonReport {
            valid: invalid == 0,
            total,
            invalid,
            checked_at: Utc::now(),
            errors: &results,
        })?,
        ReportFormat::Human => render_human(&results, &path, total, &output)?,
    }

    if invalid > 0 {
        return Err(CliError::ValidationFailed { invalid, total });
    }
    Ok(())
}

fn run_flat(validator: &Validator, entries: Entries, base: &Path) -> CliResult<Results> {
    let warn_fields = |location: &str, entry: &Entry| {
        if entry.has_fields() {
            warn!(entry = location, "nested fields are only validated with --composite");
        }
    };

    match entries {
        Entries::Named(entries) => {
            let mut values = Vec::with_capacity(entries.len());
            for (name, entry) in entries {
                warn_fields(&name, &entry);
                let value = entry.into_value(&name, base)?;
                values.push((name, value));
            }
            Ok(Results::Named(validator.validate_many(values)?))
        }
        Entries::Positional(entries) => {
            let mut values = Vec::with_capacity(entries.len());
            for (index, entry) in entries.into_iter().enumerate() {
                let location = format!("[{index}]");
                warn_fields(&location, &entry);
                values.push(entry.into_value(&location, base)?);
            }
            Ok(Results::Positional(validator.validate_each(&mut values)?))
        }
    }
}

fn run_composite(
    validator: &Validator,
    entries: Entries,
    base: &Path,
    keep_valid: bool,
) -> CliResult<Results> {
    match entries {
        Entries::Named(entries) => {
            let mut out = BTreeMap::new();
            for (name, entry) in entries {
                let mut value = entry.into_value(&name, base)?;
                let report = validator.validate_composite(&mut value)?;
                if keep_valid || !report.is_valid() {
                    out.insert(name, report);
                }
            }
            Ok(Results::NamedComposite(out))
        }
        Entries::Positional(entries) => {
            let mut out = BTreeMap::new();
            for (index, entry) in entries.into_iter().enumerate() {
                let mut value = entry.into_value(&format!("[{index}]"), base)?;
                let report = validator.validate_composite(&mut value)?;
                if keep_valid || !report.is_valid() {
                    out.insert(index, report);
                }
            }
            Ok(Results::PositionalComposite(out))
        }
    }
}

fn render_human(
    results: &Results,
    path: &Path,
    total: usize,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("Validated {total} entries from {}", path.display()))?;
    for (path, codes) in results.lines() {
        if codes.is_empty() {
            output.success(&path)?;
        } else {
            let codes: Vec<_> = codes.iter().map(ErrorCode::as_str).collect();
            output.error(&format!("{path}: {}", codes.join(", ")))?;
        }
    }
    match results.invalid() {
        0 => output.success(&format!("All {total} entries are valid"))?,
        invalid => output.warning(&format!("{invalid} of {total} entries are invalid"))?,
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (_, true) => prefix.to_owned(),
        (true, false) => name.to_owned(),
        (false, false) => format!("{prefix}.{name}"),
    }
}

fn flatten_report(prefix: &str, report: &ValidationReport, out: &mut Vec<(String, Vec<ErrorCode>)>) {
    for (name, errors) in report.iter() {
        flatten_field(join(prefix, name), errors, out);
    }
}

fn flatten_field(path: String, errors: &FieldErrors, out: &mut Vec<(String, Vec<ErrorCode>)>) {
    match errors {
        FieldErrors::Value(codes) => out.push((path, codes.clone())),
        FieldErrors::Composite(report) => flatten_report(&path, report, out),
        FieldErrors::Elements(elements) => {
            for (index, element) in elements {
                flatten_field(format!("{path}[{index}]"), element, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_adapters::{MemoryFile, MemoryFileInspector};
    use verity_core::domain::{Children, ConstrainableValue, Constraint, ConstraintSet};

    fn validator() -> Validator {
        let files = MemoryFileInspector::new();
        files.insert(
            "cat.png",
            MemoryFile::new(10).mime_type("image/png").dimensions(10, 10),
        );
        Validator::new(Box::new(NativeChecker::new(files)))
    }

    fn leaf(raw: &str, constraint: Constraint) -> ConstrainableValue {
        ConstrainableValue::with_constraints(raw, [constraint].into_iter().collect::<ConstraintSet>())
    }

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join("", "name"), "name");
        assert_eq!(join("product", ""), "product");
        assert_eq!(join("product", "name"), "product.name");
    }

    #[test]
    fn composite_reports_flatten_to_dotted_paths() {
        let mut product = ConstrainableValue::new(true).with_children(
            Children::new()
                .single("name", leaf("", Constraint::not_blank()))
                .many(
                    "tags",
                    [leaf("ok", Constraint::not_blank()), leaf("", Constraint::not_blank())],
                ),
        );
        let report = validator().validate_composite(&mut product).unwrap();
        let results = Results::NamedComposite(BTreeMap::from([("product".to_owned(), report)]));

        assert_eq!(results.invalid(), 1);
        assert_eq!(
            results.lines(),
            [
                ("product.name".to_owned(), vec![ErrorCode::NotBlank]),
                ("product.tags[1]".to_owned(), vec![ErrorCode::NotBlank]),
            ]
        );
    }

    #[test]
    fn positional_lines_use_indices() {
        let results = Results::Positional(BTreeMap::from([(2, vec![ErrorCode::Email])]));
        assert_eq!(results.lines(), [("[2]".to_owned(), vec![ErrorCode::Email])]);
    }

    #[test]
    fn json_report_shape() {
        let results = Results::Named(BTreeMap::from([(
            "email".to_owned(),
            vec![ErrorCode::NotBlank, ErrorCode::Email],
        )]));
        let report = JsonReport {
            valid: false,
            total: 2,
            invalid: results.invalid(),
            checked_at: Utc::now(),
            errors: &results,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["invalid"], 1);
        assert_eq!(json["errors"]["email"], serde_json::json!(["NOT_BLANK", "EMAIL"]));
        assert!(json["checked_at"].is_string());
    }

    #[test]
    fn flat_run_validates_named_entries() {
        let doc = Document::parse(
            Path::new("values.json"),
            r#"{
                "avatar": { "value": { "path": "cat.png" }, "constraints": [{ "kind": "image", "maxWidth": 5 }] },
                "name":   { "value": "Ada", "constraints": [{ "kind": "notBlank" }] }
            }"#,
        )
        .unwrap();
        let results = run_flat(&validator(), doc.entries, Path::new("")).unwrap();
        assert_eq!(results.lines(), [("avatar".to_owned(), vec![ErrorCode::ImageTooWide])]);
    }
}

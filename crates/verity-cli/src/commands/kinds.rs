//! `verity kinds`: print the constraint catalogue.

use serde::Serialize;

use verity_core::application::constraint_adapters::find_adapter;
use verity_core::domain::{ConstraintKind, ErrorCode};

use crate::{
    cli::OutputFormat,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One constraint kind and the codes it can report.
#[derive(Debug, Serialize)]
struct KindRow {
    kind: ConstraintKind,
    family: &'static str,
    codes: Vec<ErrorCode>,
}

pub fn execute(output: OutputManager) -> CliResult<()> {
    let rows = rows()?;

    if output.format() == OutputFormat::Json {
        output.json(&rows)?;
        return Ok(());
    }

    output.header(&format!("{} constraint kinds", rows.len()))?;
    let width = rows.iter().map(|r| r.kind.as_str().len()).max().unwrap_or(0);
    for row in &rows {
        let codes: Vec<_> = row.codes.iter().map(ErrorCode::as_str).collect();
        output.row(
            row.kind.as_str(),
            width,
            &format!("[{}] {}", row.family, codes.join(" ")),
        )?;
    }
    Ok(())
}

fn rows() -> CliResult<Vec<KindRow>> {
    ConstraintKind::ALL
        .iter()
        .map(|&kind| {
            let entry = find_adapter(kind).ok_or_else(|| CliError::InvalidInput {
                message: format!("no adapter registered for '{kind}'"),
                source: None,
            })?;
            let mut codes: Vec<ErrorCode> = Vec::new();
            for &(_, code) in entry.errors {
                if !codes.contains(&code) {
                    codes.push(code);
                }
            }
            Ok(KindRow {
                kind,
                family: entry.family.as_str(),
                codes,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_is_listed_once() {
        let rows = rows().unwrap();
        assert_eq!(rows.len(), ConstraintKind::ALL.len());
    }

    #[test]
    fn rows_carry_family_and_codes() {
        let rows = rows().unwrap();
        let image = rows
            .iter()
            .find(|r| r.kind == ConstraintKind::Image)
            .unwrap();
        assert_eq!(image.family, "file");
        assert!(image.codes.contains(&ErrorCode::ImageTooLarge));
        assert!(!image.codes.contains(&ErrorCode::FileTooLarge));
    }

    #[test]
    fn kinds_serialize_camel_case() {
        let rows = rows().unwrap();
        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["kind"], "notBlank");
    }
}

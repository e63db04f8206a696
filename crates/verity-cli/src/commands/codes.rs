//! `verity codes`: print the error code vocabulary.

use serde::Serialize;

use verity_core::domain::{ErrorCode, ErrorFamily};
use verity_core::error::VerityError;

use crate::{
    cli::{CodesArgs, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize, PartialEq)]
struct CodeRow {
    code: ErrorCode,
    family: ErrorFamily,
}

pub fn execute(args: CodesArgs, output: OutputManager) -> CliResult<()> {
    let family = args
        .family
        .as_deref()
        .map(str::parse::<ErrorFamily>)
        .transpose()
        .map_err(VerityError::from)?;
    let rows = rows(family);

    if output.format() == OutputFormat::Json {
        output.json(&rows)?;
        return Ok(());
    }

    match family {
        Some(family) => output.header(&format!("{} {family} error codes", rows.len()))?,
        None => output.header(&format!("{} error codes", rows.len()))?,
    }
    let width = rows.iter().map(|r| r.code.as_str().len()).max().unwrap_or(0);
    for row in &rows {
        output.row(row.code.as_str(), width, row.family.as_str())?;
    }
    Ok(())
}

fn rows(family: Option<ErrorFamily>) -> Vec<CodeRow> {
    ErrorCode::ALL
        .iter()
        .filter(|code| family.is_none_or(|f| code.family() == f))
        .map(|&code| CodeRow {
            code,
            family: code.family(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfiltered_lists_whole_vocabulary() {
        assert_eq!(rows(None).len(), ErrorCode::ALL.len());
    }

    #[test]
    fn family_filter_keeps_only_that_family() {
        let image = rows(Some(ErrorFamily::Image));
        assert!(!image.is_empty());
        assert!(image.iter().all(|r| r.family == ErrorFamily::Image));
        assert!(image.iter().any(|r| r.code == ErrorCode::ImageTooWide));
    }

    #[test]
    fn rows_serialize_as_identifiers() {
        let json = serde_json::to_value(CodeRow {
            code: ErrorCode::FileTooLarge,
            family: ErrorFamily::File,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "code": "FILE_TOO_LARGE", "family": "file" }));
    }
}

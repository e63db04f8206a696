//! File and image checks.
//!
//! The file checks stop at the first problem: nothing useful can be said
//! about the size of a file that does not exist. Image dimension checks, on
//! the other hand, are independent of each other and all reported.

use verity_core::application::ports::{
    Check, CheckError, DimensionError, Dimensions, EngineCode, FileInspector,
};
use verity_core::domain::{FileRef, FileRules, ImageRules, RawValue};

use super::{Outcome, fail, pass};

fn file_ref<'a>(check: &Check, value: &'a RawValue) -> Result<Option<&'a FileRef>, CheckError> {
    match value {
        RawValue::Null => Ok(None),
        RawValue::Str(s) if s.is_empty() => Ok(None),
        RawValue::File(file) => Ok(Some(file)),
        other => Err(CheckError::unexpected(check, "file", other)),
    }
}

pub(super) fn file(
    files: &dyn FileInspector,
    check: &Check,
    value: &RawValue,
    rules: &FileRules,
) -> Outcome {
    match file_ref(check, value)? {
        Some(file) => inspect(files, file, rules),
        None => pass(),
    }
}

fn inspect(files: &dyn FileInspector, file: &FileRef, rules: &FileRules) -> Outcome {
    if let Some(error) = file.upload_error {
        return fail(EngineCode::Upload(error));
    }
    let path = file.path();
    if !files.exists(path) {
        return fail(EngineCode::NotFound);
    }
    if !files.is_readable(path) {
        return fail(EngineCode::NotReadable);
    }
    let Some(size) = files.size(path) else {
        return fail(EngineCode::NotReadable);
    };
    if size == 0 {
        return fail(EngineCode::Empty);
    }
    if rules.max_size.is_some_and(|max| size > max) {
        return fail(EngineCode::TooLarge);
    }
    if !rules.mime_types.is_empty() {
        let accepted = files
            .mime_type(path)
            .is_some_and(|mime| rules.mime_types.iter().any(|p| mime_matches(p, &mime)));
        if !accepted {
            return fail(EngineCode::InvalidMimeType);
        }
    }
    pass()
}

/// `image/*` matches any image type; anything else must match exactly.
fn mime_matches(pattern: &str, mime: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(top) => mime
            .split_once('/')
            .is_some_and(|(t, _)| t.eq_ignore_ascii_case(top)),
        None => pattern.eq_ignore_ascii_case(mime),
    }
}

pub(super) fn image(
    files: &dyn FileInspector,
    check: &Check,
    value: &RawValue,
    rules: &ImageRules,
) -> Outcome {
    let Some(file) = file_ref(check, value)? else {
        return pass();
    };
    let codes = inspect(files, file, &rules.file)?;
    if !codes.is_empty() {
        return Ok(codes);
    }

    match files.dimensions(file.path()) {
        Ok(size) => Ok(dimension_codes(size, rules)),
        Err(DimensionError::Corrupted) if rules.detect_corrupted => {
            fail(EngineCode::CorruptedImage)
        }
        Err(_) => fail(EngineCode::SizeNotDetected),
    }
}

fn dimension_codes(size: Dimensions, rules: &ImageRules) -> Vec<EngineCode> {
    let mut codes = Vec::new();
    let Dimensions { width, height } = size;

    if rules.min_width.is_some_and(|min| width < min) {
        codes.push(EngineCode::TooNarrow);
    }
    if rules.max_width.is_some_and(|max| width > max) {
        codes.push(EngineCode::TooWide);
    }
    if rules.min_height.is_some_and(|min| height < min) {
        codes.push(EngineCode::TooLow);
    }
    if rules.max_height.is_some_and(|max| height > max) {
        codes.push(EngineCode::TooHigh);
    }

    let pixels = size.pixels();
    if rules.min_pixels.is_some_and(|min| pixels < min) {
        codes.push(EngineCode::TooFewPixels);
    }
    if rules.max_pixels.is_some_and(|max| pixels > max) {
        codes.push(EngineCode::TooManyPixels);
    }

    if height > 0 {
        let ratio = f64::from(width) / f64::from(height);
        if rules.max_ratio.is_some_and(|max| ratio > max) {
            codes.push(EngineCode::RatioTooBig);
        }
        if rules.min_ratio.is_some_and(|min| ratio < min) {
            codes.push(EngineCode::RatioTooSmall);
        }
    }

    if !rules.allow_square && width == height {
        codes.push(EngineCode::SquareNotAllowed);
    }
    if !rules.allow_landscape && width > height {
        codes.push(EngineCode::LandscapeNotAllowed);
    }
    if !rules.allow_portrait && width < height {
        codes.push(EngineCode::PortraitNotAllowed);
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::{MemoryFile, MemoryFileInspector};
    use verity_core::domain::UploadError;

    fn inspector() -> MemoryFileInspector {
        let files = MemoryFileInspector::new();
        files.insert("doc.pdf", MemoryFile::new(2_000).mime_type("application/pdf"));
        files.insert("empty.txt", MemoryFile::new(0).mime_type("text/plain"));
        files.insert("locked.txt", MemoryFile::new(10).unreadable());
        files.insert(
            "wide.png",
            MemoryFile::new(500).mime_type("image/png").dimensions(800, 200),
        );
        files.insert(
            "broken.jpg",
            MemoryFile::new(500).mime_type("image/jpeg").corrupted(),
        );
        files
    }

    fn run_file(value: RawValue, rules: FileRules) -> Vec<EngineCode> {
        let check = Check::File(rules.clone());
        file(&inspector(), &check, &value, &rules).unwrap()
    }

    fn run_image(value: RawValue, rules: ImageRules) -> Vec<EngineCode> {
        let check = Check::Image(rules.clone());
        image(&inspector(), &check, &value, &rules).unwrap()
    }

    #[test]
    fn file_checks_stop_at_first_problem() {
        let rules = FileRules::new().max_size(1_000).mime_types(["image/*"]);
        assert_eq!(run_file(RawValue::file("missing"), rules.clone()), [EngineCode::NotFound]);
        assert_eq!(run_file(RawValue::file("locked.txt"), rules.clone()), [EngineCode::NotReadable]);
        assert_eq!(run_file(RawValue::file("empty.txt"), rules.clone()), [EngineCode::Empty]);
        assert_eq!(run_file(RawValue::file("doc.pdf"), rules), [EngineCode::TooLarge]);
    }

    #[test]
    fn upload_errors_win() {
        let value = RawValue::from(FileRef::new("doc.pdf").with_upload_error(UploadError::Partial));
        assert_eq!(
            run_file(value, FileRules::new()),
            [EngineCode::Upload(UploadError::Partial)]
        );
    }

    #[test]
    fn mime_wildcards() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(!mime_matches("image/*", "application/pdf"));
        assert!(mime_matches("application/pdf", "application/pdf"));
        let rules = FileRules::new().mime_types(["image/*"]);
        assert_eq!(run_file(RawValue::file("doc.pdf"), rules), [EngineCode::InvalidMimeType]);
    }

    #[test]
    fn empty_values_are_skipped() {
        assert!(run_file(RawValue::Null, FileRules::new()).is_empty());
        assert!(run_file(RawValue::str(""), FileRules::new()).is_empty());
    }

    #[test]
    fn image_dimension_problems_accumulate() {
        let rules = ImageRules::new()
            .width(None, Some(600))
            .height(Some(300), None)
            .ratio(None, Some(2.0))
            .orientations(true, false, true);
        assert_eq!(
            run_image(RawValue::file("wide.png"), rules),
            [
                EngineCode::TooWide,
                EngineCode::TooLow,
                EngineCode::RatioTooBig,
                EngineCode::LandscapeNotAllowed,
            ]
        );
    }

    #[test]
    fn corrupted_images_depend_on_detection() {
        let detect = ImageRules::new().detect_corrupted(true);
        assert_eq!(run_image(RawValue::file("broken.jpg"), detect), [EngineCode::CorruptedImage]);
        assert_eq!(
            run_image(RawValue::file("broken.jpg"), ImageRules::new()),
            [EngineCode::SizeNotDetected]
        );
    }

    #[test]
    fn image_runs_file_checks_first() {
        assert_eq!(
            run_image(RawValue::file("doc.pdf"), ImageRules::new()),
            [EngineCode::InvalidMimeType]
        );
    }
}

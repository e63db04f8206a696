//! File and image adapters.
//!
//! The image map repeats every file entry except `TooLarge`, which it maps to
//! its own `IMAGE_TOO_LARGE`. Each map therefore translates `TooLarge`
//! exactly once; `registry_is_internally_consistent` holds them to it.

use super::ErrorMap;
use crate::application::ports::{Check, EngineCode as E};
use crate::domain::{ErrorCode as D, FileRules, ImageRules, UploadError as U};

pub static FILE: ErrorMap = &[
    (E::NotFound, D::FileNotFound),
    (E::NotReadable, D::FileNotReadable),
    (E::Empty, D::FileEmpty),
    (E::TooLarge, D::FileTooLarge),
    (E::InvalidMimeType, D::FileInvalidMimeType),
    (E::Upload(U::IniSize), D::FileUploadIniSize),
    (E::Upload(U::FormSize), D::FileUploadFormSize),
    (E::Upload(U::Partial), D::FileUploadPartial),
    (E::Upload(U::NoFile), D::FileUploadNoFile),
    (E::Upload(U::NoTmpDir), D::FileUploadNoTmpDir),
    (E::Upload(U::CantWrite), D::FileUploadCantWrite),
    (E::Upload(U::Extension), D::FileUploadExtension),
];

pub static IMAGE: ErrorMap = &[
    (E::NotFound, D::FileNotFound),
    (E::NotReadable, D::FileNotReadable),
    (E::Empty, D::FileEmpty),
    (E::TooLarge, D::ImageTooLarge),
    (E::InvalidMimeType, D::FileInvalidMimeType),
    (E::Upload(U::IniSize), D::FileUploadIniSize),
    (E::Upload(U::FormSize), D::FileUploadFormSize),
    (E::Upload(U::Partial), D::FileUploadPartial),
    (E::Upload(U::NoFile), D::FileUploadNoFile),
    (E::Upload(U::NoTmpDir), D::FileUploadNoTmpDir),
    (E::Upload(U::CantWrite), D::FileUploadCantWrite),
    (E::Upload(U::Extension), D::FileUploadExtension),
    (E::TooNarrow, D::ImageTooNarrow),
    (E::TooWide, D::ImageTooWide),
    (E::TooLow, D::ImageTooLow),
    (E::TooHigh, D::ImageTooHigh),
    (E::TooFewPixels, D::ImageTooFewPixels),
    (E::TooManyPixels, D::ImageTooManyPixels),
    (E::RatioTooSmall, D::ImageRatioTooSmall),
    (E::RatioTooBig, D::ImageRatioTooBig),
    (E::LandscapeNotAllowed, D::ImageLandscapeNotAllowed),
    (E::PortraitNotAllowed, D::ImagePortraitNotAllowed),
    (E::SquareNotAllowed, D::ImageSquareNotAllowed),
    (E::SizeNotDetected, D::ImageSizeNotDetected),
    (E::CorruptedImage, D::ImageCorrupted),
];

pub fn file(rules: &FileRules) -> Check {
    Check::File(rules.clone())
}

pub fn image(rules: &ImageRules) -> Check {
    Check::Image(rules.clone())
}

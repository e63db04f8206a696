//! Named-parameter view of descriptors.
//!
//! `params()` lists a descriptor's parameters in declaration order;
//! `from_params()` rebuilds a descriptor from an untyped map (the CLI reads
//! descriptors from JSON). Parameter names are camelCase.

use std::collections::BTreeMap;

use super::{
    Charset, ChoiceRules, Constraint, ConstraintKind, CountryCode, DateTimeFormat, FileRules,
    ImageRules, TimezoneZone, ValueType,
};
use crate::domain::error::DomainError;
use crate::domain::value::RawValue;

/// Ordered `(name, value)` parameter list.
pub type Params = Vec<(&'static str, RawValue)>;

impl Constraint {
    /// The descriptor's parameters, in the order its factory declares them.
    ///
    /// Optional parameters that are unset are omitted.
    pub fn params(&self) -> Params {
        let mut out = Params::new();
        match self {
            Self::NotBlank
            | Self::NotNull
            | Self::Email
            | Self::Uuid
            | Self::Alphanumeric
            | Self::AlphanumericWithWhitespace
            | Self::Url
            | Self::Language
            | Self::Json
            | Self::Unique
            | Self::Positive
            | Self::PositiveOrZero
            | Self::Negative
            | Self::NegativeOrZero
            | Self::Date => {}
            Self::Type { expected } => out.push(("type", RawValue::str(expected.as_str()))),
            Self::StringLength { exact, charset } => {
                out.push(("exact", count_value(*exact)));
                push_charset(&mut out, *charset);
            }
            Self::Count { exact } => out.push(("exact", count_value(*exact))),
            Self::StringMin { min, charset } => {
                out.push(("min", count_value(*min)));
                push_charset(&mut out, *charset);
            }
            Self::StringMax { max, charset } => {
                out.push(("max", count_value(*max)));
                push_charset(&mut out, *charset);
            }
            Self::StringRange { min, max, charset } => {
                out.push(("min", count_value(*min)));
                out.push(("max", count_value(*max)));
                push_charset(&mut out, *charset);
            }
            Self::Regex { pattern, matches } => {
                out.push(("pattern", RawValue::str(pattern.as_str())));
                out.push(("match", RawValue::Bool(*matches)));
            }
            Self::EqualTo { value }
            | Self::NotEqualTo { value }
            | Self::IdenticalTo { value }
            | Self::NotIdenticalTo { value }
            | Self::LessThan { value }
            | Self::LessThanOrEqual { value }
            | Self::GreaterThan { value }
            | Self::GreaterThanOrEqual { value } => out.push(("value", value.clone())),
            Self::Range { min, max } => {
                push_opt(&mut out, "min", min.map(RawValue::Float));
                push_opt(&mut out, "max", max.map(RawValue::Float));
            }
            Self::CountRange { min, max } => {
                push_opt(&mut out, "min", min.map(count_value));
                push_opt(&mut out, "max", max.map(count_value));
            }
            Self::CountDivisibleBy { divisor } => out.push(("divisor", count_value(*divisor))),
            Self::DateTime { format } => out.push(("format", RawValue::str(format.as_str()))),
            Self::Time { with_seconds } => out.push(("withSeconds", RawValue::Bool(*with_seconds))),
            Self::TimeZone { zone, country, intl } => {
                push_opt(&mut out, "zone", zone.map(|z| RawValue::str(z.prefix())));
                push_opt(&mut out, "countryCode", country.map(|c| RawValue::str(c.as_str())));
                out.push(("intl", RawValue::Bool(*intl)));
            }
            Self::File(rules) => push_file(&mut out, rules),
            Self::Image(rules) => {
                push_file(&mut out, &rules.file);
                push_opt(&mut out, "minWidth", rules.min_width.map(|v| RawValue::Int(v.into())));
                push_opt(&mut out, "maxWidth", rules.max_width.map(|v| RawValue::Int(v.into())));
                push_opt(&mut out, "minHeight", rules.min_height.map(|v| RawValue::Int(v.into())));
                push_opt(&mut out, "maxHeight", rules.max_height.map(|v| RawValue::Int(v.into())));
                push_opt(&mut out, "minPixels", rules.min_pixels.map(size_value));
                push_opt(&mut out, "maxPixels", rules.max_pixels.map(size_value));
                push_opt(&mut out, "minRatio", rules.min_ratio.map(RawValue::Float));
                push_opt(&mut out, "maxRatio", rules.max_ratio.map(RawValue::Float));
                out.push(("allowSquare", RawValue::Bool(rules.allow_square)));
                out.push(("allowLandscape", RawValue::Bool(rules.allow_landscape)));
                out.push(("allowPortrait", RawValue::Bool(rules.allow_portrait)));
                out.push(("detectCorrupted", RawValue::Bool(rules.detect_corrupted)));
            }
            Self::Choice(rules) => {
                out.push(("choices", RawValue::List(rules.choices.clone())));
                out.push(("multiple", RawValue::Bool(rules.multiple)));
                push_opt(&mut out, "min", rules.min.map(count_value));
                push_opt(&mut out, "max", rules.max.map(count_value));
            }
        }
        out
    }

    /// Build a descriptor from untyped parameters.
    ///
    /// Rejects unknown names, missing required parameters and values of the
    /// wrong shape. Structural checks of the typed factories still apply.
    pub fn from_params<I, K>(kind: ConstraintKind, params: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        let mut r = ParamReader::new(kind, params);
        let constraint = match kind {
            ConstraintKind::NotBlank => Self::not_blank(),
            ConstraintKind::NotNull => Self::not_null(),
            ConstraintKind::Type => {
                let name = r.required_string("type")?;
                Self::of_type(name.parse::<ValueType>()?)
            }
            ConstraintKind::Email => Self::email(),
            ConstraintKind::StringLength => {
                Self::string_length(r.required_count("exact")?).with_charset(r.charset()?)?
            }
            ConstraintKind::StringMin => {
                Self::string_min(r.required_count("min")?).with_charset(r.charset()?)?
            }
            ConstraintKind::StringMax => {
                Self::string_max(r.required_count("max")?).with_charset(r.charset()?)?
            }
            ConstraintKind::StringRange => {
                Self::string_range(r.required_count("min")?, r.required_count("max")?)
                    .with_charset(r.charset()?)?
            }
            ConstraintKind::Uuid => Self::uuid(),
            ConstraintKind::Regex => {
                let pattern = r.required_string("pattern")?;
                let matches = r.bool_or("match", true)?;
                Self::regex_with(pattern, matches)?
            }
            ConstraintKind::Alphanumeric => Self::alphanumeric(),
            ConstraintKind::AlphanumericWithWhitespace => Self::alphanumeric_with_whitespace(),
            ConstraintKind::Url => Self::url(),
            ConstraintKind::Language => Self::language(),
            ConstraintKind::Json => Self::json(),
            ConstraintKind::EqualTo => Self::equal_to(r.required("value")?),
            ConstraintKind::NotEqualTo => Self::not_equal_to(r.required("value")?),
            ConstraintKind::IdenticalTo => Self::identical_to(r.required("value")?),
            ConstraintKind::NotIdenticalTo => Self::not_identical_to(r.required("value")?),
            ConstraintKind::LessThan => Self::less_than(r.required("value")?),
            ConstraintKind::LessThanOrEqual => Self::less_than_or_equal(r.required("value")?),
            ConstraintKind::GreaterThan => Self::greater_than(r.required("value")?),
            ConstraintKind::GreaterThanOrEqual => {
                Self::greater_than_or_equal(r.required("value")?)
            }
            ConstraintKind::Range => Self::range(r.number("min")?, r.number("max")?)?,
            ConstraintKind::Count => Self::count(r.required_count("exact")?),
            ConstraintKind::CountRange => Self::count_range(r.count("min")?, r.count("max")?)?,
            ConstraintKind::CountDivisibleBy => {
                Self::count_divisible_by(r.required_count("divisor")?)?
            }
            ConstraintKind::Unique => Self::unique(),
            ConstraintKind::Positive => Self::positive(),
            ConstraintKind::PositiveOrZero => Self::positive_or_zero(),
            ConstraintKind::Negative => Self::negative(),
            ConstraintKind::NegativeOrZero => Self::negative_or_zero(),
            ConstraintKind::Date => Self::date(),
            ConstraintKind::DateTime => match r.string("format")? {
                Some(format) => Self::date_time_with_format(&format)?,
                None => Self::DateTime {
                    format: DateTimeFormat::default(),
                },
            },
            ConstraintKind::Time => Self::time(r.bool_or("withSeconds", true)?),
            ConstraintKind::TimeZone => {
                let zone = r
                    .string("zone")?
                    .map(|z| z.parse::<TimezoneZone>())
                    .transpose()?;
                let country = r
                    .string("countryCode")?
                    .map(|c| c.parse::<CountryCode>())
                    .transpose()?;
                let intl = r.bool_or("intl", false)?;
                match (zone, country) {
                    (Some(_), Some(_)) => {
                        return Err(DomainError::malformed(
                            kind,
                            "'zone' and 'countryCode' cannot be combined",
                        ));
                    }
                    (None, Some(country)) => Self::time_zone_in_country(country, intl),
                    (zone, None) => Self::time_zone_in(zone, intl),
                }
            }
            ConstraintKind::File => Self::file(read_file_rules(&mut r, FileRules::default())?),
            ConstraintKind::Image => {
                let defaults = ImageRules::default();
                let file = read_file_rules(&mut r, defaults.file.clone())?;
                Self::image(ImageRules {
                    file,
                    min_width: r.dimension("minWidth")?,
                    max_width: r.dimension("maxWidth")?,
                    min_height: r.dimension("minHeight")?,
                    max_height: r.dimension("maxHeight")?,
                    min_pixels: r.size("minPixels")?,
                    max_pixels: r.size("maxPixels")?,
                    min_ratio: r.number("minRatio")?,
                    max_ratio: r.number("maxRatio")?,
                    allow_square: r.bool_or("allowSquare", defaults.allow_square)?,
                    allow_landscape: r.bool_or("allowLandscape", defaults.allow_landscape)?,
                    allow_portrait: r.bool_or("allowPortrait", defaults.allow_portrait)?,
                    detect_corrupted: r.bool_or("detectCorrupted", defaults.detect_corrupted)?,
                })
            }
            ConstraintKind::Choice => {
                let choices = r.list("choices")?;
                let multiple = r.bool_or("multiple", false)?;
                let (min, max) = (r.count("min")?, r.count("max")?);
                let mut rules = ChoiceRules::new(choices);
                if multiple {
                    rules = rules.multiple(min, max);
                } else if min.is_some() || max.is_some() {
                    let param = if min.is_some() { "min" } else { "max" };
                    return Err(r.invalid(param, "combined with 'multiple: true'"));
                }
                Self::choice(rules)?
            }
        };
        r.finish()?;
        Ok(constraint)
    }
}

fn push_opt(out: &mut Params, name: &'static str, value: Option<RawValue>) {
    if let Some(value) = value {
        out.push((name, value));
    }
}

/// UTF-8 is the default and is left out.
fn push_charset(out: &mut Params, charset: Charset) {
    if charset != Charset::Utf8 {
        out.push(("charset", RawValue::str(charset.as_str())));
    }
}

fn push_file(out: &mut Params, rules: &FileRules) {
    push_opt(out, "maxSize", rules.max_size.map(size_value));
    if !rules.mime_types.is_empty() {
        out.push((
            "mimeTypes",
            RawValue::List(rules.mime_types.iter().map(RawValue::str).collect()),
        ));
    }
}

fn count_value(n: usize) -> RawValue {
    RawValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn size_value(n: u64) -> RawValue {
    RawValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

fn read_file_rules(r: &mut ParamReader, mut rules: FileRules) -> Result<FileRules, DomainError> {
    if let Some(size) = r.byte_size("maxSize")? {
        rules.max_size = Some(size);
    }
    if let Some(types) = r.string_list("mimeTypes")? {
        rules.mime_types = types;
    }
    Ok(rules)
}

/// Parse `"512"`, `"200k"`, `"2M"`, `"1Ki"`, `"1Mi"` into bytes.
fn parse_byte_size(text: &str) -> Option<u64> {
    let text = text.trim();
    let (digits, factor) = if let Some(n) = text.strip_suffix("Ki") {
        (n, 1 << 10)
    } else if let Some(n) = text.strip_suffix("Mi") {
        (n, 1 << 20)
    } else if let Some(n) = text.strip_suffix(['k', 'K']) {
        (n, 1_000)
    } else if let Some(n) = text.strip_suffix('M') {
        (n, 1_000_000)
    } else {
        (text, 1)
    };
    digits.trim().parse::<u64>().ok()?.checked_mul(factor)
}

// ── ParamReader ──────────────────────────────────────────────────────────────

/// Consumes parameters by name; anything left over at `finish()` is unknown.
struct ParamReader {
    kind: ConstraintKind,
    params: BTreeMap<String, RawValue>,
}

impl ParamReader {
    fn new<I, K>(kind: ConstraintKind, params: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        Self {
            kind,
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    fn invalid(&self, param: &'static str, expected: &'static str) -> DomainError {
        DomainError::InvalidParam {
            kind: self.kind,
            param,
            expected,
        }
    }

    /// Explicit `null` counts as absent.
    fn take(&mut self, name: &'static str) -> Option<RawValue> {
        self.params.remove(name).filter(|v| !v.is_null())
    }

    fn required(&mut self, name: &'static str) -> Result<RawValue, DomainError> {
        self.take(name).ok_or(DomainError::MissingParam {
            kind: self.kind,
            param: name,
        })
    }

    fn string(&mut self, name: &'static str) -> Result<Option<String>, DomainError> {
        match self.take(name) {
            None => Ok(None),
            Some(RawValue::Str(s)) => Ok(Some(s)),
            Some(_) => Err(self.invalid(name, "a string")),
        }
    }

    fn required_string(&mut self, name: &'static str) -> Result<String, DomainError> {
        match self.required(name)? {
            RawValue::Str(s) => Ok(s),
            _ => Err(self.invalid(name, "a string")),
        }
    }

    fn charset(&mut self) -> Result<Charset, DomainError> {
        match self.string("charset")? {
            None => Ok(Charset::default()),
            Some(name) => name.parse(),
        }
    }

    fn count(&mut self, name: &'static str) -> Result<Option<usize>, DomainError> {
        match self.take(name) {
            None => Ok(None),
            Some(RawValue::Int(n)) => usize::try_from(n)
                .map(Some)
                .map_err(|_| self.invalid(name, "a non-negative integer")),
            Some(_) => Err(self.invalid(name, "a non-negative integer")),
        }
    }

    fn required_count(&mut self, name: &'static str) -> Result<usize, DomainError> {
        self.count(name)?.ok_or(DomainError::MissingParam {
            kind: self.kind,
            param: name,
        })
    }

    fn size(&mut self, name: &'static str) -> Result<Option<u64>, DomainError> {
        Ok(self.count(name)?.map(|n| n as u64))
    }

    fn dimension(&mut self, name: &'static str) -> Result<Option<u32>, DomainError> {
        match self.count(name)? {
            None => Ok(None),
            Some(n) => u32::try_from(n)
                .map(Some)
                .map_err(|_| self.invalid(name, "a pixel count")),
        }
    }

    fn byte_size(&mut self, name: &'static str) -> Result<Option<u64>, DomainError> {
        match self.take(name) {
            None => Ok(None),
            Some(RawValue::Int(n)) => u64::try_from(n)
                .map(Some)
                .map_err(|_| self.invalid(name, "a byte size such as 1024, \"200k\" or \"2Mi\"")),
            Some(RawValue::Str(s)) => parse_byte_size(&s)
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a byte size such as 1024, \"200k\" or \"2Mi\"")),
            Some(_) => Err(self.invalid(name, "a byte size such as 1024, \"200k\" or \"2Mi\"")),
        }
    }

    fn number(&mut self, name: &'static str) -> Result<Option<f64>, DomainError> {
        match self.take(name) {
            None => Ok(None),
            Some(v @ (RawValue::Int(_) | RawValue::Float(_))) => Ok(v.as_number()),
            Some(_) => Err(self.invalid(name, "a number")),
        }
    }

    fn bool_or(&mut self, name: &'static str, default: bool) -> Result<bool, DomainError> {
        match self.take(name) {
            None => Ok(default),
            Some(RawValue::Bool(b)) => Ok(b),
            Some(_) => Err(self.invalid(name, "a boolean")),
        }
    }

    fn list(&mut self, name: &'static str) -> Result<Vec<RawValue>, DomainError> {
        match self.required(name)? {
            RawValue::List(items) => Ok(items),
            _ => Err(self.invalid(name, "a list")),
        }
    }

    fn string_list(&mut self, name: &'static str) -> Result<Option<Vec<String>>, DomainError> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let RawValue::List(items) = value else {
            return Err(self.invalid(name, "a list of strings"));
        };
        items
            .into_iter()
            .map(|item| match item {
                RawValue::Str(s) => Ok(s),
                _ => Err(self.invalid(name, "a list of strings")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn finish(self) -> Result<(), DomainError> {
        match self.params.into_keys().next() {
            None => Ok(()),
            Some(param) => Err(DomainError::UnknownParam {
                kind: self.kind,
                param,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(pairs: &[(&str, RawValue)]) -> Vec<(String, RawValue)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect()
    }

    #[test]
    fn rebuilds_descriptor_from_its_own_params() {
        let original = Constraint::image(
            ImageRules::new()
                .width(Some(10), Some(200))
                .ratio(None, Some(2.0))
                .detect_corrupted(true),
        );
        let params: Vec<(String, RawValue)> = original
            .params()
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        let rebuilt = Constraint::from_params(ConstraintKind::Image, params).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn rejects_unknown_parameter() {
        let err = Constraint::from_params(
            ConstraintKind::NotBlank,
            p(&[("allowNull", RawValue::Bool(true))]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownParam {
                kind: ConstraintKind::NotBlank,
                param: "allowNull".into(),
            }
        );
    }

    #[test]
    fn rejects_missing_and_mistyped_parameters() {
        let missing =
            Constraint::from_params(ConstraintKind::StringRange, p(&[("min", RawValue::Int(2))]))
                .unwrap_err();
        assert!(matches!(missing, DomainError::MissingParam { param: "max", .. }));

        let mistyped = Constraint::from_params(
            ConstraintKind::StringMin,
            p(&[("min", RawValue::str("six"))]),
        )
        .unwrap_err();
        assert!(matches!(mistyped, DomainError::InvalidParam { param: "min", .. }));

        let negative =
            Constraint::from_params(ConstraintKind::Count, p(&[("exact", RawValue::Int(-1))]))
                .unwrap_err();
        assert!(matches!(negative, DomainError::InvalidParam { .. }));
    }

    #[test]
    fn factory_shape_checks_still_apply() {
        let err = Constraint::from_params(ConstraintKind::Range, p(&[])).unwrap_err();
        assert!(matches!(err, DomainError::MalformedDescriptor { .. }));
    }

    #[test]
    fn length_kinds_take_a_charset() {
        let ascii = Constraint::from_params(
            ConstraintKind::StringRange,
            p(&[
                ("min", RawValue::Int(1)),
                ("max", RawValue::Int(8)),
                ("charset", RawValue::str("ASCII")),
            ]),
        )
        .unwrap();
        assert_eq!(
            ascii,
            Constraint::string_range(1, 8).with_charset(Charset::Ascii).unwrap()
        );
        assert_eq!(
            ascii.params().last(),
            Some(&("charset", RawValue::str("ASCII")))
        );
        // the default stays implicit
        assert!(Constraint::string_max(4).params().iter().all(|(k, _)| *k != "charset"));

        let unknown = Constraint::from_params(
            ConstraintKind::StringMax,
            p(&[("max", RawValue::Int(4)), ("charset", RawValue::str("EBCDIC"))]),
        )
        .unwrap_err();
        assert!(matches!(unknown, DomainError::UnknownIdentifier { what: "charset", .. }));
    }

    #[test]
    fn time_zone_takes_a_country_code() {
        let france = Constraint::from_params(
            ConstraintKind::TimeZone,
            p(&[("countryCode", RawValue::str("fr"))]),
        )
        .unwrap();
        let fr: CountryCode = "FR".parse().unwrap();
        assert_eq!(france, Constraint::time_zone_in_country(fr, false));
        assert_eq!(
            france.params().first(),
            Some(&("countryCode", RawValue::str("FR")))
        );

        let both = Constraint::from_params(
            ConstraintKind::TimeZone,
            p(&[
                ("zone", RawValue::str("europe")),
                ("countryCode", RawValue::str("FR")),
            ]),
        )
        .unwrap_err();
        assert!(matches!(both, DomainError::MalformedDescriptor { .. }));
    }

    #[test]
    fn choice_bounds_require_multiple() {
        let err = Constraint::from_params(
            ConstraintKind::Choice,
            p(&[
                ("choices", RawValue::List(vec![RawValue::str("a")])),
                ("min", RawValue::Int(1)),
            ]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidParam {
                kind: ConstraintKind::Choice,
                param: "min",
                ..
            }
        ));

        let multiple = Constraint::from_params(
            ConstraintKind::Choice,
            p(&[
                ("choices", RawValue::List(vec![RawValue::str("a"), RawValue::str("b")])),
                ("multiple", RawValue::Bool(true)),
                ("min", RawValue::Int(1)),
            ]),
        )
        .unwrap();
        assert_eq!(
            multiple,
            Constraint::choice(ChoiceRules::new(["a", "b"]).multiple(Some(1), None)).unwrap()
        );
    }

    #[test]
    fn byte_sizes_accept_suffixes() {
        assert_eq!(parse_byte_size("512"), Some(512));
        assert_eq!(parse_byte_size("200k"), Some(200_000));
        assert_eq!(parse_byte_size("2M"), Some(2_000_000));
        assert_eq!(parse_byte_size("1Ki"), Some(1024));
        assert_eq!(parse_byte_size("1Mi"), Some(1_048_576));
        assert_eq!(parse_byte_size("big"), None);

        let file = Constraint::from_params(
            ConstraintKind::File,
            p(&[("maxSize", RawValue::str("1Ki"))]),
        )
        .unwrap();
        assert_eq!(file, Constraint::file(FileRules::new().max_size(1024)));
    }

    #[test]
    fn params_are_ordered_and_skip_unset_optionals() {
        let names: Vec<&str> = Constraint::count_range(None, Some(3))
            .unwrap()
            .params()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, ["max"]);
    }
}

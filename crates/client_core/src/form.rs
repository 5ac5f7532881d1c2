//! Raw form entries and their coercion into a [`PredictionRequest`].

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{
        Education, NumericBounds, CERTIFICATIONS, CURRENT_CTC, EDUCATION, FORM_SCHEMA,
        INTERNATIONAL_DEGREE_ANY, NO_OF_COMPANIES_WORKED, NUMBER_OF_PUBLICATIONS,
        PASSING_YEAR_OF_GRADUATION, PASSING_YEAR_OF_PG, PASSING_YEAR_OF_PHD, TOTAL_EXPERIENCE,
        TOTAL_EXPERIENCE_IN_FIELD,
    },
    error::{ValidationError, ValidationErrorKind},
    protocol::PredictionRequest,
};

const FLOAT_FIELDS: [&str; 3] = [TOTAL_EXPERIENCE, TOTAL_EXPERIENCE_IN_FIELD, CURRENT_CTC];
const INTEGER_FIELDS: [&str; 4] = [
    NO_OF_COMPANIES_WORKED,
    PASSING_YEAR_OF_GRADUATION,
    NUMBER_OF_PUBLICATIONS,
    CERTIFICATIONS,
];

/// What to do with a required numeric field that does not coerce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Refuse to build the request; nothing is sent.
    #[default]
    Reject,
    /// Send the field as `null` and let the endpoint decide.
    Forward,
}

impl fmt::Display for CoercionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionPolicy::Reject => f.write_str("reject"),
            CoercionPolicy::Forward => f.write_str("forward"),
        }
    }
}

impl FromStr for CoercionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(CoercionPolicy::Reject),
            "forward" => Ok(CoercionPolicy::Forward),
            other => Err(format!(
                "unknown coercion policy '{other}' (expected 'reject' or 'forward')"
            )),
        }
    }
}

/// Field name to raw text, as read from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    entries: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot holding every schema field at its initial value.
    pub fn from_schema_defaults() -> Self {
        FORM_SCHEMA
            .iter()
            .map(|spec| (spec.name, spec.initial))
            .collect()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Builds the request body from a snapshot.
///
/// Every entry that is not one of the typed fields is copied through as-is.
pub fn parse_request(
    form: &FormSnapshot,
    policy: CoercionPolicy,
) -> Result<PredictionRequest, ValidationError> {
    let total_experience = coerce_float(form, TOTAL_EXPERIENCE, policy)?;
    let total_experience_in_field_applied =
        coerce_float(form, TOTAL_EXPERIENCE_IN_FIELD, policy)?;
    let current_ctc = coerce_float(form, CURRENT_CTC, policy)?;
    let no_of_companies_worked = coerce_integer(form, NO_OF_COMPANIES_WORKED, policy)?;
    let passing_year_of_graduation = coerce_integer(form, PASSING_YEAR_OF_GRADUATION, policy)?;
    let number_of_publications = coerce_integer(form, NUMBER_OF_PUBLICATIONS, policy)?;
    let certifications = coerce_integer(form, CERTIFICATIONS, policy)?;
    let international_degree_any = coerce_flag(form, INTERNATIONAL_DEGREE_ANY, policy)?;
    let education = coerce_education(form, policy)?;

    let passthrough = form
        .iter()
        .filter(|(name, _)| !is_typed_field(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok(PredictionRequest {
        total_experience,
        total_experience_in_field_applied,
        current_ctc,
        no_of_companies_worked,
        passing_year_of_graduation,
        number_of_publications,
        certifications,
        international_degree_any,
        passing_year_of_pg: form.get(PASSING_YEAR_OF_PG).unwrap_or_default().to_string(),
        passing_year_of_phd: form.get(PASSING_YEAR_OF_PHD).unwrap_or_default().to_string(),
        education,
        passthrough,
    })
}

fn is_typed_field(name: &str) -> bool {
    FLOAT_FIELDS.contains(&name)
        || INTEGER_FIELDS.contains(&name)
        || [
            INTERNATIONAL_DEGREE_ANY,
            PASSING_YEAR_OF_PG,
            PASSING_YEAR_OF_PHD,
            EDUCATION,
        ]
        .contains(&name)
}

fn required_raw<'a>(form: &'a FormSnapshot, field: &str) -> Result<&'a str, ValidationError> {
    match form.get(field).map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(raw),
        _ => Err(ValidationError::missing(field)),
    }
}

fn forward_or<T>(
    result: Result<T, ValidationError>,
    policy: CoercionPolicy,
) -> Result<Option<T>, ValidationError> {
    match (result, policy) {
        (Ok(value), _) => Ok(Some(value)),
        (Err(err), CoercionPolicy::Reject) => Err(err),
        (Err(err), CoercionPolicy::Forward) => {
            tracing::debug!(field = %err.field, "forwarding uncoercible value as null: {err}");
            Ok(None)
        }
    }
}

fn coerce_float(
    form: &FormSnapshot,
    field: &str,
    policy: CoercionPolicy,
) -> Result<Option<f64>, ValidationError> {
    let parse: fn(&str) -> Option<f64> = match policy {
        CoercionPolicy::Reject => parse_finite,
        CoercionPolicy::Forward => parse_leading_float,
    };
    let parsed = required_raw(form, field).and_then(|raw| {
        parse(raw)
            .ok_or_else(|| ValidationError::new(field, ValidationErrorKind::NotNumeric, raw))
    });
    forward_or(parsed, policy)
}

fn coerce_integer(
    form: &FormSnapshot,
    field: &str,
    policy: CoercionPolicy,
) -> Result<Option<i64>, ValidationError> {
    let parse: fn(&str) -> Option<i64> = match policy {
        CoercionPolicy::Reject => parse_integer,
        CoercionPolicy::Forward => parse_leading_integer,
    };
    let parsed = required_raw(form, field).and_then(|raw| {
        parse(raw)
            .ok_or_else(|| ValidationError::new(field, ValidationErrorKind::NotNumeric, raw))
    });
    forward_or(parsed, policy)
}

fn coerce_flag(
    form: &FormSnapshot,
    field: &str,
    policy: CoercionPolicy,
) -> Result<Option<i64>, ValidationError> {
    let value = coerce_integer(form, field, policy)?;
    match (value, policy) {
        (Some(flag @ (0 | 1)), _) => Ok(Some(flag)),
        (Some(other), CoercionPolicy::Reject) => Err(ValidationError::new(
            field,
            ValidationErrorKind::NotAFlag,
            other.to_string(),
        )),
        (value, _) => Ok(value),
    }
}

fn coerce_education(
    form: &FormSnapshot,
    policy: CoercionPolicy,
) -> Result<Option<String>, ValidationError> {
    match policy {
        CoercionPolicy::Forward => Ok(form.get(EDUCATION).map(str::to_string)),
        CoercionPolicy::Reject => {
            let raw = required_raw(form, EDUCATION)?;
            raw.parse::<Education>()
                .map(|level| Some(level.as_str().to_string()))
                .map_err(|_| {
                    ValidationError::new(EDUCATION, ValidationErrorKind::UnknownOption, raw)
                })
        }
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    // Number inputs may hand back "3.0" for an integer field.
    parse_finite(raw)
        .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
        .map(|value| value as i64)
}

/// Leading integer of `raw`, read the way a browser's `parseInt` reads it:
/// optional sign, then digits (hex after `0x`), trailing text ignored.
fn parse_leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Longest decimal prefix of `raw`, read the way a browser's `parseFloat`
/// reads it. Non-finite results count as no number.
fn parse_leading_float(raw: &str) -> Option<f64> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let is_digit_at = |idx: usize| bytes.get(idx).is_some_and(u8::is_ascii_digit);

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    while is_digit_at(end) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while is_digit_at(frac_end) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - end - 1;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while is_digit_at(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    raw[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Value a numeric input should be rewritten to when it loses focus.
///
/// Returns `None` when the input stays as typed: within range, not a
/// number, or unbounded on the violated side.
pub fn clamp_to_bounds(raw: &str, bounds: NumericBounds) -> Option<String> {
    let value = parse_finite(raw)?;
    match (bounds.min, bounds.max) {
        (Some(min), _) if value < min => Some(format_bound(min)),
        (_, Some(max)) if value > max => Some(format_bound(max)),
        _ => None,
    }
}

fn format_bound(bound: f64) -> String {
    bound.to_string()
}

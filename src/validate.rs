//! Field validators shared by every step constructor.
//!
//! Each check returns `Error::Validation` naming the offending field, so a
//! constructor can apply them one per line with `?`.

use crate::error::{Error, Result};

/// Checks that `value` is one of `allowed`.
pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            format!("'{}' is not one of: {}", value, allowed.join(", ")),
        ))
    }
}

/// Rejects NaN and infinities; every other float check builds on this.
pub fn finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(field, format!("{} is not a finite number", value)));
    }
    Ok(())
}

/// Checks `min <= value <= max` for a finite `value`.
pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(Error::validation(
            field,
            format!("{} is outside [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

/// Checks that an optional count, when present, is strictly positive.
pub fn positive(field: &str, value: Option<usize>) -> Result<()> {
    match value {
        Some(0) => Err(Error::validation(field, "must be greater than 0")),
        _ => Ok(()),
    }
}

pub fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Named colours understood by the renderer, besides `#rgb` / `#rrggbb` hex.
const NAMED_COLORS: [&str; 14] = [
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple", "pink", "gray",
    "grey", "brown", "cyan", "magenta",
];

pub fn color(field: &str, value: &str) -> Result<()> {
    let is_hex = value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if is_hex || NAMED_COLORS.contains(&value) {
        return Ok(());
    }
    Err(Error::validation(
        field,
        format!("'{}' is neither a hex colour (#rgb, #rrggbb) nor one of: {}", value, NAMED_COLORS.join(", ")),
    ))
}

/// Returns the companion value, failing when the mode that needs it is active
/// and it was not supplied.
pub fn required_with<'a, T>(field: &str, mode: &str, value: Option<&'a T>) -> Result<&'a T> {
    value.ok_or_else(|| Error::validation(field, format!("is required when {}", mode)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_reports_allowed_values() {
        let err = one_of("how", "some", &["all", "regex"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for 'how': 'some' is not one of: all, regex"
        );
        assert!(one_of("how", "regex", &["all", "regex"]).is_ok());
    }

    #[test]
    fn test_in_range_is_inclusive() {
        assert!(in_range("threshold", 0.0, 0.0, 1.0).is_ok());
        assert!(in_range("threshold", 1.0, 0.0, 1.0).is_ok());
        assert!(in_range("threshold", 1.5, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_in_range_rejects_non_finite() {
        assert!(in_range("threshold", f64::NAN, 0.0, 1.0).is_err());
        assert!(in_range("threshold", f64::INFINITY, 0.0, f64::INFINITY).is_err());
        assert!(finite("mean", f64::NEG_INFINITY).is_err());
        assert!(finite("mean", -3.5).is_ok());
    }

    #[test]
    fn test_color_formats() {
        assert!(color("badge_color", "red").is_ok());
        assert!(color("badge_color", "#0af").is_ok());
        assert!(color("badge_color", "#00AAff").is_ok());
        assert!(color("badge_color", "#00aaf").is_err());
        assert!(color("badge_color", "#zzzzzz").is_err());
        assert!(color("badge_color", "reddish").is_err());
        assert!(color("badge_color", "").is_err());
    }

    #[test]
    fn test_required_with() {
        let regex = Some("[a-z]+".to_string());
        assert_eq!(
            required_with("regex", "how is 'regex'", regex.as_ref()).unwrap(),
            "[a-z]+"
        );
        let missing: Option<String> = None;
        assert!(required_with("regex", "how is 'regex'", missing.as_ref()).is_err());
    }

    #[test]
    fn test_positive_and_non_empty() {
        assert!(positive("limit", None).is_ok());
        assert!(positive("limit", Some(3)).is_ok());
        assert!(positive("limit", Some(0)).is_err());
        assert!(non_empty("name", "  ").is_err());
    }
}

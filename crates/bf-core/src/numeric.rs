use crate::{CoreError, CoreResult};

/// Floating point type for parsed inputs and metrics.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Parse user-entered decimal text.
///
/// Accepts plain decimal notation with optional sign, fraction and exponent,
/// surrounded by optional whitespace. Rejects `inf`/`nan` spellings, hex
/// literals and anything that does not land on a finite value.
pub fn parse_decimal(text: &str, what: &'static str) -> CoreResult<Real> {
    let trimmed = text.trim();
    let well_formed = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !well_formed {
        return Err(CoreError::NotANumber {
            what,
            text: text.to_string(),
        });
    }

    let value: Real = trimmed.parse().map_err(|_| CoreError::NotANumber {
        what,
        text: text.to_string(),
    })?;
    ensure_finite(value, what)
}

/// Format `value` with exactly `places` fractional digits.
///
/// Exact binary ties (values of the form `odd / 2^(places+1)`) round away
/// from zero, which is what JavaScript's `Number.prototype.toFixed` does.
/// Everything else is correctly rounded from the exact binary value.
pub fn to_fixed(value: Real, places: usize) -> String {
    let scaled = value * 2f64.powi(places as i32 + 1);
    let tie = scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0;
    let nudged = match (tie, value > 0.0) {
        (true, true) => value.next_up(),
        (true, false) => value.next_down(),
        (false, _) => value,
    };
    format!("{nudged:.places$}")
}

/// A value already rounded to a fixed number of decimal places.
///
/// `value()` is the rounded number, `Display` renders the padded text
/// (`5000.000`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed {
    value: Real,
    places: usize,
}

impl Fixed {
    pub fn round(value: Real, places: usize, what: &'static str) -> CoreResult<Self> {
        let value = ensure_finite(value, what)?;
        let text = to_fixed(value, places);
        let rounded = parse_decimal(&text, what)?;
        Ok(Self {
            value: rounded,
            places,
        })
    }

    pub fn value(self) -> Real {
        self.value
    }

    pub fn places(self) -> usize {
        self.places
    }
}

impl core::fmt::Display for Fixed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&to_fixed(self.value, self.places))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Fixed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

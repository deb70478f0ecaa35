//! Unit normalization for media feature values
//!
//! Media feature values arrive as text on both sides of a comparison: the
//! value written in the query and the value reported by the environment.
//! Before comparing, both sides go through the same conversion so that
//! `48em` and `768px`, or `2dppx` and `192dpi`, land in one numeric domain.
//!
//! | family | canonical unit | accepted suffixes |
//! |---|---|---|
//! | length | px | `em`, `rem`, `px`, `cm`, `mm`, `in`, `pt`, `pc`, none |
//! | resolution | dpi | `dpi`, `dpcm`, `dppx`, none |
//! | ratio | decimal | plain number or `<integer> / <integer>` |
//! | integer | integer | none |
//!
//! Points and picas use the historical factors `pt = value * 72` and
//! `pc = value * 72 / 12`, not the 96/72 ratio of CSS Values.

use crate::error::ValueError;
use std::fmt;

/// Pixels per em/rem (the default root font size)
pub const PX_PER_EM: f64 = 16.0;
/// Pixels per inch
pub const PX_PER_IN: f64 = 96.0;
/// Centimeters per inch
pub const CM_PER_IN: f64 = 2.54;
/// Historical point factor, see the module docs
pub const PT_FACTOR: f64 = 72.0;

/// Length units understood by [`to_pixels`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
  Px,
  Em,
  Rem,
  Cm,
  Mm,
  In,
  Pt,
  Pc,
}

impl LengthUnit {
  /// Longer suffixes come first so `rem` is not read as `em`.
  const SUFFIXES: [(&'static str, LengthUnit); 8] = [
    ("rem", LengthUnit::Rem),
    ("em", LengthUnit::Em),
    ("px", LengthUnit::Px),
    ("cm", LengthUnit::Cm),
    ("mm", LengthUnit::Mm),
    ("in", LengthUnit::In),
    ("pt", LengthUnit::Pt),
    ("pc", LengthUnit::Pc),
  ];

  /// Reads the unit a value ends with. Unrecognized or missing units yield `None`.
  pub fn from_suffix(rest: &str) -> Option<Self> {
    let rest = rest.trim_end().to_ascii_lowercase();
    Self::SUFFIXES
      .iter()
      .find(|(suffix, _)| rest.ends_with(suffix))
      .map(|(_, unit)| *unit)
  }

  /// Converts a magnitude in this unit to pixels.
  pub fn to_px(self, value: f64) -> f64 {
    match self {
      LengthUnit::Px => value,
      LengthUnit::Em | LengthUnit::Rem => value * PX_PER_EM,
      LengthUnit::Cm => value * PX_PER_IN / CM_PER_IN,
      LengthUnit::Mm => value * PX_PER_IN / CM_PER_IN / 10.0,
      LengthUnit::In => value * PX_PER_IN,
      LengthUnit::Pt => value * PT_FACTOR,
      LengthUnit::Pc => value * PT_FACTOR / 12.0,
    }
  }
}

impl fmt::Display for LengthUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let suffix = match self {
      LengthUnit::Px => "px",
      LengthUnit::Em => "em",
      LengthUnit::Rem => "rem",
      LengthUnit::Cm => "cm",
      LengthUnit::Mm => "mm",
      LengthUnit::In => "in",
      LengthUnit::Pt => "pt",
      LengthUnit::Pc => "pc",
    };
    f.write_str(suffix)
  }
}

/// Resolution units understood by [`to_dpi`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionUnit {
  /// Dots per inch
  Dpi,
  /// Dots per centimeter
  Dpcm,
  /// Dots per pixel (device pixel ratio)
  Dppx,
}

impl ResolutionUnit {
  const SUFFIXES: [(&'static str, ResolutionUnit); 3] = [
    ("dpcm", ResolutionUnit::Dpcm),
    ("dppx", ResolutionUnit::Dppx),
    ("dpi", ResolutionUnit::Dpi),
  ];

  /// Reads the unit a value ends with. Unrecognized or missing units yield `None`.
  pub fn from_suffix(rest: &str) -> Option<Self> {
    let rest = rest.trim_end().to_ascii_lowercase();
    Self::SUFFIXES
      .iter()
      .find(|(suffix, _)| rest.ends_with(suffix))
      .map(|(_, unit)| *unit)
  }

  /// Converts a magnitude in this unit to dots per inch.
  pub fn to_dpi(self, value: f64) -> f64 {
    match self {
      ResolutionUnit::Dpi => value,
      ResolutionUnit::Dpcm => value / CM_PER_IN,
      ResolutionUnit::Dppx => value * PX_PER_IN,
    }
  }
}

impl fmt::Display for ResolutionUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ResolutionUnit::Dpi => write!(f, "dpi"),
      ResolutionUnit::Dpcm => write!(f, "dpcm"),
      ResolutionUnit::Dppx => write!(f, "dppx"),
    }
  }
}

/// Splits a value into its leading unsigned magnitude and the remaining text.
///
/// The magnitude is `digits ("." digits)?`; anything after it is returned
/// untouched for unit detection.
fn split_magnitude(value: &str) -> Result<(f64, &str), ValueError> {
  let trimmed = value.trim_start();
  let bytes = trimmed.as_bytes();
  let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
  if end == 0 {
    return Err(ValueError::InvalidNumber {
      value: value.to_string(),
    });
  }

  if bytes.get(end) == Some(&b'.') {
    let fraction = bytes[end + 1..]
      .iter()
      .take_while(|b| b.is_ascii_digit())
      .count();
    if fraction > 0 {
      end += 1 + fraction;
    }
  }

  let magnitude = trimmed[..end]
    .parse::<f64>()
    .map_err(|_| ValueError::InvalidNumber {
      value: value.to_string(),
    })?;
  Ok((magnitude, &trimmed[end..]))
}

/// Converts a length value to pixels.
///
/// # Examples
///
/// ```
/// use cssmq::units::to_pixels;
///
/// assert_eq!(to_pixels("800").unwrap(), 800.0);
/// assert_eq!(to_pixels("48em").unwrap(), 768.0);
/// assert_eq!(to_pixels("1in").unwrap(), 96.0);
/// assert!(to_pixels("wide").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValueError::InvalidNumber`] when the value does not start with a number.
pub fn to_pixels(value: &str) -> Result<f64, ValueError> {
  let (magnitude, rest) = split_magnitude(value)?;
  Ok(match LengthUnit::from_suffix(rest) {
    Some(unit) => unit.to_px(magnitude),
    None => magnitude,
  })
}

/// Converts a resolution value to dots per inch.
///
/// # Examples
///
/// ```
/// use cssmq::units::to_dpi;
///
/// assert_eq!(to_dpi("72").unwrap(), 72.0);
/// assert_eq!(to_dpi("2dppx").unwrap(), 192.0);
/// ```
///
/// # Errors
///
/// Returns [`ValueError::InvalidNumber`] when the value does not start with a number.
pub fn to_dpi(value: &str) -> Result<f64, ValueError> {
  let (magnitude, rest) = split_magnitude(value)?;
  Ok(match ResolutionUnit::from_suffix(rest) {
    Some(unit) => unit.to_dpi(magnitude),
    None => magnitude,
  })
}

/// Converts a ratio value to a decimal.
///
/// A value that reads directly as a non-zero number is used as is. Anything
/// else, including a literal `0`, must be an `<integer> / <integer>` ratio.
///
/// # Examples
///
/// ```
/// use cssmq::units::to_decimal;
///
/// assert_eq!(to_decimal("1.5").unwrap(), 1.5);
/// assert_eq!(to_decimal("16 / 10").unwrap(), 1.6);
/// assert!(to_decimal("0").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValueError::InvalidRatio`] for malformed ratios and
/// [`ValueError::ZeroDenominator`] for `n/0`.
pub fn to_decimal(value: &str) -> Result<f64, ValueError> {
  let trimmed = value.trim();
  if let Ok(decimal) = trimmed.parse::<f64>() {
    if decimal != 0.0 {
      return Ok(decimal);
    }
  }

  let invalid = || ValueError::InvalidRatio {
    value: value.to_string(),
  };
  let (numerator, denominator) = trimmed.split_once('/').ok_or_else(invalid)?;
  let numerator = parse_digits(numerator.trim()).ok_or_else(invalid)?;
  let denominator = parse_digits(denominator.trim()).ok_or_else(invalid)?;
  if denominator == 0.0 {
    return Err(ValueError::ZeroDenominator {
      value: value.to_string(),
    });
  }
  Ok(numerator / denominator)
}

fn parse_digits(s: &str) -> Option<f64> {
  if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  s.parse::<f64>().ok()
}

/// Converts an integer value.
///
/// # Errors
///
/// Returns [`ValueError::InvalidInteger`] when the trimmed value is not an integer.
pub fn to_integer(value: &str) -> Result<f64, ValueError> {
  let trimmed = value.trim();
  let digits = trimmed
    .strip_prefix(|c: char| c == '-' || c == '+')
    .unwrap_or(trimmed);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return Err(ValueError::InvalidInteger {
      value: value.to_string(),
    });
  }
  trimmed.parse::<f64>().map_err(|_| ValueError::InvalidInteger {
    value: value.to_string(),
  })
}

/// Conversion strategy used by the matcher
///
/// Every method defaults to the free function of the same name. Implementors
/// override only the conversions they want to change, e.g. to use a
/// different root font size.
///
/// # Examples
///
/// ```
/// use cssmq::units::{to_pixels, UnitConverter};
/// use cssmq::error::ValueError;
///
/// struct LargeText;
///
/// impl UnitConverter for LargeText {
///   fn to_pixels(&self, value: &str) -> Result<f64, ValueError> {
///     if value.trim_end().ends_with("em") {
///       return to_pixels(value).map(|px| px * 1.25);
///     }
///     to_pixels(value)
///   }
/// }
/// ```
pub trait UnitConverter {
  fn to_pixels(&self, value: &str) -> Result<f64, ValueError> {
    to_pixels(value)
  }

  fn to_dpi(&self, value: &str) -> Result<f64, ValueError> {
    to_dpi(value)
  }

  fn to_decimal(&self, value: &str) -> Result<f64, ValueError> {
    to_decimal(value)
  }

  fn to_integer(&self, value: &str) -> Result<f64, ValueError> {
    to_integer(value)
  }
}

/// The standard CSS conversions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CssUnits;

impl UnitConverter for CssUnits {}

impl<C: UnitConverter + ?Sized> UnitConverter for &C {
  fn to_pixels(&self, value: &str) -> Result<f64, ValueError> {
    (**self).to_pixels(value)
  }

  fn to_dpi(&self, value: &str) -> Result<f64, ValueError> {
    (**self).to_dpi(value)
  }

  fn to_decimal(&self, value: &str) -> Result<f64, ValueError> {
    (**self).to_decimal(value)
  }

  fn to_integer(&self, value: &str) -> Result<f64, ValueError> {
    (**self).to_integer(value)
  }
}

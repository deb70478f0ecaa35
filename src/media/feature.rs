//! Known media features and how their values are compared

use serde::Serialize;
use std::fmt;

/// The closed set of media features the matcher can interpret
///
/// # Examples
///
/// ```
/// use cssmq::media::{MediaFeature, ValueKind};
///
/// let feature = MediaFeature::from_name("device-width").unwrap();
/// assert_eq!(feature, MediaFeature::DeviceWidth);
/// assert_eq!(feature.value_kind(), ValueKind::Length);
/// assert!(MediaFeature::from_name("hover").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaFeature {
  Width,
  Height,
  DeviceWidth,
  DeviceHeight,
  Resolution,
  AspectRatio,
  DeviceAspectRatio,
  Grid,
  Color,
  ColorIndex,
  Monochrome,
  Orientation,
  Scan,
}

/// How both sides of a feature comparison are normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
  /// Lengths, compared in pixels
  Length,
  /// Resolutions, compared in dots per inch
  Resolution,
  /// Ratios, compared as decimals
  Ratio,
  /// Plain integers
  Integer,
  /// Integers where an absent query value means 1 and an empty
  /// environment value means 0
  Color,
  /// Keywords, compared case-insensitively as strings
  Keyword,
}

impl MediaFeature {
  /// Every known feature
  pub const ALL: [MediaFeature; 13] = [
    MediaFeature::Width,
    MediaFeature::Height,
    MediaFeature::DeviceWidth,
    MediaFeature::DeviceHeight,
    MediaFeature::Resolution,
    MediaFeature::AspectRatio,
    MediaFeature::DeviceAspectRatio,
    MediaFeature::Grid,
    MediaFeature::Color,
    MediaFeature::ColorIndex,
    MediaFeature::Monochrome,
    MediaFeature::Orientation,
    MediaFeature::Scan,
  ];

  /// Looks up a feature by its lower-case name (without `min-` / `max-`).
  pub fn from_name(name: &str) -> Option<Self> {
    let feature = match name {
      "width" => MediaFeature::Width,
      "height" => MediaFeature::Height,
      "device-width" => MediaFeature::DeviceWidth,
      "device-height" => MediaFeature::DeviceHeight,
      "resolution" => MediaFeature::Resolution,
      "aspect-ratio" => MediaFeature::AspectRatio,
      "device-aspect-ratio" => MediaFeature::DeviceAspectRatio,
      "grid" => MediaFeature::Grid,
      "color" => MediaFeature::Color,
      "color-index" => MediaFeature::ColorIndex,
      "monochrome" => MediaFeature::Monochrome,
      "orientation" => MediaFeature::Orientation,
      "scan" => MediaFeature::Scan,
      _ => return None,
    };
    Some(feature)
  }

  /// Returns the CSS name of the feature.
  pub fn name(self) -> &'static str {
    match self {
      MediaFeature::Width => "width",
      MediaFeature::Height => "height",
      MediaFeature::DeviceWidth => "device-width",
      MediaFeature::DeviceHeight => "device-height",
      MediaFeature::Resolution => "resolution",
      MediaFeature::AspectRatio => "aspect-ratio",
      MediaFeature::DeviceAspectRatio => "device-aspect-ratio",
      MediaFeature::Grid => "grid",
      MediaFeature::Color => "color",
      MediaFeature::ColorIndex => "color-index",
      MediaFeature::Monochrome => "monochrome",
      MediaFeature::Orientation => "orientation",
      MediaFeature::Scan => "scan",
    }
  }

  /// Returns how values of this feature are normalized before comparing.
  pub fn value_kind(self) -> ValueKind {
    match self {
      MediaFeature::Width
      | MediaFeature::Height
      | MediaFeature::DeviceWidth
      | MediaFeature::DeviceHeight => ValueKind::Length,
      MediaFeature::Resolution => ValueKind::Resolution,
      MediaFeature::AspectRatio | MediaFeature::DeviceAspectRatio => ValueKind::Ratio,
      MediaFeature::Grid | MediaFeature::ColorIndex | MediaFeature::Monochrome => {
        ValueKind::Integer
      }
      MediaFeature::Color => ValueKind::Color,
      MediaFeature::Orientation | MediaFeature::Scan => ValueKind::Keyword,
    }
  }

  /// Returns the environment variable that overrides this feature's value.
  ///
  /// `device-width` reads `CSSMQ_DEVICE_WIDTH`.
  pub fn env_var(self) -> String {
    format!(
      "CSSMQ_{}",
      self.name().to_ascii_uppercase().replace('-', "_")
    )
  }
}

impl fmt::Display for MediaFeature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

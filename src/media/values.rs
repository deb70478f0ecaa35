//! Environment values a query is matched against

use super::feature::MediaFeature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Reserved key holding the simulated media type
pub const TYPE_KEY: &str = "type";

/// Environment variable overriding the media type
pub const TYPE_ENV: &str = "CSSMQ_TYPE";

/// Values reported by a rendering environment
///
/// Keys are feature names plus the reserved key `type`. All values are kept
/// as text; numeric interpretation happens per feature while matching.
///
/// # Examples
///
/// ```
/// use cssmq::media::MediaValues;
///
/// let values = MediaValues::new()
///   .with_type("screen")
///   .with("width", "1024")
///   .with("orientation", "landscape");
/// assert_eq!(values.media_type(), Some("screen"));
/// assert_eq!(values.get("width"), Some("1024"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaValues {
  entries: BTreeMap<String, String>,
}

impl MediaValues {
  /// Creates an empty set of values.
  pub fn new() -> Self {
    Self::default()
  }

  /// Values for a screen viewport of the given size in CSS pixels
  ///
  /// Sets reasonable defaults for a desktop browser:
  /// - type `screen`, 8-bit color, 96dpi, progressive scan
  /// - device size equal to the viewport
  /// - orientation and aspect ratio derived from the size
  pub fn screen(width: u32, height: u32) -> Self {
    Self::viewport("screen", width, height).with("scan", "progressive")
  }

  /// Values for a printed page of the given size in CSS pixels
  pub fn print(width: u32, height: u32) -> Self {
    Self::viewport("print", width, height)
  }

  fn viewport(media_type: &str, width: u32, height: u32) -> Self {
    let orientation = if height >= width {
      "portrait"
    } else {
      "landscape"
    };
    Self::new()
      .with_type(media_type)
      .with("width", width.to_string())
      .with("height", height.to_string())
      .with("device-width", width.to_string())
      .with("device-height", height.to_string())
      .with("aspect-ratio", format!("{}/{}", width, height))
      .with("device-aspect-ratio", format!("{}/{}", width, height))
      .with("orientation", orientation)
      .with("color", "8")
      .with("resolution", "96dpi")
  }

  /// Applies overrides from `CSSMQ_*` environment variables.
  ///
  /// Recognized variables:
  /// - `CSSMQ_TYPE` = media type (e.g. `print`)
  /// - `CSSMQ_<FEATURE>` for every known feature, upper-cased with `-`
  ///   replaced by `_` (e.g. `CSSMQ_DEVICE_WIDTH=1280`)
  ///
  /// Empty or whitespace-only variables are ignored.
  pub fn with_env_overrides(mut self) -> Self {
    if let Some(value) = env_value(TYPE_ENV) {
      self.insert(TYPE_KEY, value);
    }

    for feature in MediaFeature::ALL {
      if let Some(value) = env_value(&feature.env_var()) {
        self.insert(feature.name(), value);
      }
    }

    self
  }

  /// Returns the values with `type` set.
  pub fn with_type(self, media_type: impl Into<String>) -> Self {
    self.with(TYPE_KEY, media_type)
  }

  /// Returns the values with one entry set.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.insert(key, value);
    self
  }

  /// Sets an entry, returning the previous value.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    self.entries.insert(key.into(), value.into())
  }

  /// Removes an entry, returning its value.
  pub fn remove(&mut self, key: &str) -> Option<String> {
    self.entries.remove(key)
  }

  /// Returns the value for a key.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.get(key).map(String::as_str)
  }

  /// Returns the simulated media type.
  pub fn media_type(&self) -> Option<&str> {
    self.get(TYPE_KEY)
  }

  /// Iterates entries in key order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .entries
      .iter()
      .map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

fn env_value(key: &str) -> Option<String> {
  env::var(key)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MediaValues {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut values = Self::new();
    values.extend(iter);
    values
  }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MediaValues {
  fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
    for (key, value) in iter {
      self.insert(key, value);
    }
  }
}

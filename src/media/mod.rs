//! CSS Media Queries
//!
//! This module parses media query lists and evaluates them against a set of
//! environment values, the strings a browser or renderer would report for
//! the media type and each media feature.
//!
//! # Overview
//!
//! A media query list is a comma-separated set of clauses; the list matches
//! when ANY clause matches. Each clause consists of:
//! - An optional **modifier** (`not`, `only`)
//! - A **media type** (`screen`, `print`, ...), `all` when omitted
//! - Zero or more **feature expressions** joined by `and`, all of which must match
//!
//! # Examples
//!
//! ```
//! use cssmq::media::{MediaQueryList, MediaValues};
//!
//! let values = MediaValues::new().with_type("screen").with("width", "980");
//! let queries = MediaQueryList::parse("screen and (min-width: 767px)").unwrap();
//! assert!(queries.matches(&values).unwrap());
//! ```
//!
//! # CSS Syntax Examples
//!
//! ```css
//! @media screen { ... }
//! @media (min-width: 768px) { ... }
//! @media screen and (min-width: 767px) and (max-width: 979px) { ... }
//! @media not screen and (color) { ... }
//! @media print, screen and (min-resolution: 2dppx) { ... }
//! ```

mod cache;
mod eval;
mod feature;
mod parser;
mod values;

pub use cache::{CacheStats, MediaQueryCache};
pub use eval::{matches, matches_expression, matches_query, MediaMatcher};
pub use feature::{MediaFeature, ValueKind};
pub use values::{MediaValues, TYPE_KEY};

use crate::error::{EvalError, ParseError};
use serde::Serialize;
use std::fmt;
use std::ops::Deref;

/// Media type used when a clause starts directly with a feature expression
pub const MEDIA_TYPE_ALL: &str = "all";

/// An ordered list of media queries, one per comma-separated clause
///
/// Order is kept for reporting; matching is a logical OR over all clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MediaQueryList {
  queries: Vec<MediaQuery>,
}

impl MediaQueryList {
  /// Creates a list from already-built queries.
  pub fn new(queries: Vec<MediaQuery>) -> Self {
    Self { queries }
  }

  /// Parses a comma-separated media query list
  ///
  /// # Examples
  ///
  /// ```
  /// use cssmq::media::MediaQueryList;
  ///
  /// let queries = MediaQueryList::parse("screen, print").unwrap();
  /// assert_eq!(queries.len(), 2);
  /// ```
  ///
  /// # Errors
  ///
  /// Returns an error naming the first clause that does not match the grammar.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    parser::parse_query_list(input)
  }

  /// Returns true if any query in the list matches the values.
  ///
  /// # Errors
  ///
  /// Fails when a value cannot be converted or an unknown feature is present
  /// in the values.
  pub fn matches(&self, values: &MediaValues) -> Result<bool, EvalError> {
    MediaMatcher::new(values).matches(self)
  }

  /// Consumes the list, returning the queries.
  pub fn into_vec(self) -> Vec<MediaQuery> {
    self.queries
  }
}

impl Deref for MediaQueryList {
  type Target = [MediaQuery];

  fn deref(&self) -> &Self::Target {
    &self.queries
  }
}

impl From<Vec<MediaQuery>> for MediaQueryList {
  fn from(queries: Vec<MediaQuery>) -> Self {
    Self::new(queries)
  }
}

impl IntoIterator for MediaQueryList {
  type Item = MediaQuery;
  type IntoIter = std::vec::IntoIter<MediaQuery>;

  fn into_iter(self) -> Self::IntoIter {
    self.queries.into_iter()
  }
}

impl<'a> IntoIterator for &'a MediaQueryList {
  type Item = &'a MediaQuery;
  type IntoIter = std::slice::Iter<'a, MediaQuery>;

  fn into_iter(self) -> Self::IntoIter {
    self.queries.iter()
  }
}

impl fmt::Display for MediaQueryList {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, query) in self.queries.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{}", query)?;
    }
    Ok(())
  }
}

/// A single media query (one comma-separated clause)
///
/// # Examples
///
/// ```
/// use cssmq::media::{Expression, MediaQuery, RangeModifier};
///
/// // Equivalent to: screen and (min-width: 768px)
/// let query = MediaQuery {
///   inverse: false,
///   media_type: "screen".to_string(),
///   expressions: vec![Expression::new("width", RangeModifier::Min, Some("768px"))],
/// };
/// assert_eq!(query.to_string(), "screen and (min-width: 768px)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MediaQuery {
  /// True when the clause starts with `not`
  pub inverse: bool,

  /// Lower-cased media type, `all` when the clause starts with a group
  #[serde(rename = "type")]
  pub media_type: String,

  /// Feature expressions; all must match (AND logic)
  pub expressions: Vec<Expression>,
}

impl MediaQuery {
  /// Creates a query for a media type with no expressions.
  pub fn with_type(media_type: &str) -> Self {
    Self {
      inverse: false,
      media_type: media_type.to_ascii_lowercase(),
      expressions: Vec::new(),
    }
  }

  /// Parses a single clause.
  ///
  /// # Errors
  ///
  /// Returns an error when the text is not exactly one valid clause.
  pub fn parse(input: &str) -> Result<Self, ParseError> {
    parser::parse_clause(input.trim())
  }

  /// Returns true if the query names no specific media type.
  pub fn is_all(&self) -> bool {
    self.media_type == MEDIA_TYPE_ALL
  }
}

impl fmt::Display for MediaQuery {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut wrote_type = false;
    if self.inverse {
      write!(f, "not {}", self.media_type)?;
      wrote_type = true;
    } else if matches!(self.media_type.as_str(), "not" | "only") {
      // A bare modifier keyword would be read back as a modifier.
      write!(f, "only {}", self.media_type)?;
      wrote_type = true;
    } else if !self.is_all() || self.expressions.is_empty() {
      f.write_str(&self.media_type)?;
      wrote_type = true;
    }

    for (i, expression) in self.expressions.iter().enumerate() {
      if wrote_type || i > 0 {
        f.write_str(" and ")?;
      }
      write!(f, "{}", expression)?;
    }
    Ok(())
  }
}

/// The `min-` / `max-` prefix of a feature name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeModifier {
  /// Exact comparison
  #[default]
  None,
  /// `min-`: environment value must be at least the query value
  Min,
  /// `max-`: environment value must be at most the query value
  Max,
}

impl RangeModifier {
  /// Splits a lower-cased feature name into its modifier and bare name.
  ///
  /// The prefix is only stripped when something follows it, so `min-` alone
  /// stays a feature name.
  pub fn split(name: &str) -> (Self, &str) {
    if let Some(rest) = name.strip_prefix("min-").filter(|r| !r.is_empty()) {
      (RangeModifier::Min, rest)
    } else if let Some(rest) = name.strip_prefix("max-").filter(|r| !r.is_empty()) {
      (RangeModifier::Max, rest)
    } else {
      (RangeModifier::None, name)
    }
  }

  /// Returns the prefix text, empty for [`RangeModifier::None`].
  pub fn prefix(self) -> &'static str {
    match self {
      RangeModifier::None => "",
      RangeModifier::Min => "min-",
      RangeModifier::Max => "max-",
    }
  }
}

impl fmt::Display for RangeModifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RangeModifier::None => write!(f, "none"),
      RangeModifier::Min => write!(f, "min"),
      RangeModifier::Max => write!(f, "max"),
    }
  }
}

/// One parenthesized feature test, e.g. `(min-width: 767px)` or `(color)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Expression {
  /// Lower-cased feature name without its `min-` / `max-` prefix
  pub feature: String,

  /// Range prefix that was stripped from the name
  pub range_modifier: RangeModifier,

  /// Unparsed right-hand side, absent for boolean tests like `(color)`
  pub raw_value: Option<String>,
}

impl Expression {
  /// Creates an expression from its parts.
  pub fn new(feature: &str, range_modifier: RangeModifier, raw_value: Option<&str>) -> Self {
    Self {
      feature: feature.to_ascii_lowercase(),
      range_modifier,
      raw_value: raw_value.map(str::to_string),
    }
  }

  /// Returns the feature name as written, including any range prefix.
  pub fn name(&self) -> String {
    format!("{}{}", self.range_modifier.prefix(), self.feature)
  }

  /// Returns the known feature this expression tests, if any.
  pub fn known_feature(&self) -> Option<MediaFeature> {
    MediaFeature::from_name(&self.feature)
  }
}

impl fmt::Display for Expression {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.raw_value {
      Some(value) => write!(f, "({}: {})", self.name(), value),
      None => write!(f, "({})", self.name()),
    }
  }
}

//! Media query evaluation

use super::feature::{MediaFeature, ValueKind};
use super::values::MediaValues;
use super::{Expression, MediaQuery, MediaQueryList, RangeModifier};
use crate::debug::media_debug_enabled;
use crate::error::{EvalError, ValueError};
use crate::units::{CssUnits, UnitConverter};

/// Evaluates parsed media queries against a set of environment values
///
/// The unit conversions are pluggable through [`UnitConverter`]; the default
/// is [`CssUnits`].
///
/// # Examples
///
/// ```
/// use cssmq::media::{MediaMatcher, MediaQueryList, MediaValues};
///
/// let values = MediaValues::new().with_type("screen").with("width", "800");
/// let queries = MediaQueryList::parse("print, (max-width: 979px)").unwrap();
/// assert!(MediaMatcher::new(&values).matches(&queries).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MediaMatcher<'a, C = CssUnits> {
  values: &'a MediaValues,
  converter: C,
}

impl<'a> MediaMatcher<'a> {
  /// Creates a matcher using the standard CSS unit conversions.
  pub fn new(values: &'a MediaValues) -> Self {
    Self {
      values,
      converter: CssUnits,
    }
  }
}

impl<'a, C: UnitConverter> MediaMatcher<'a, C> {
  /// Returns a matcher that converts values with `converter`.
  pub fn with_converter<D: UnitConverter>(self, converter: D) -> MediaMatcher<'a, D> {
    MediaMatcher {
      values: self.values,
      converter,
    }
  }

  /// Returns the values queries are matched against.
  pub fn values(&self) -> &'a MediaValues {
    self.values
  }

  /// Returns true if ANY query in the list matches.
  ///
  /// Evaluation stops at the first matching clause, so later clauses are not
  /// checked for conversion errors once one has matched.
  pub fn matches(&self, queries: &MediaQueryList) -> Result<bool, EvalError> {
    for query in queries {
      if self.matches_query(query)? {
        return Ok(true);
      }
    }
    Ok(false)
  }

  /// Evaluates a single clause.
  ///
  /// The media type is checked first: a non-inverted clause whose type does
  /// not match, and an inverted clause whose type does match, are both
  /// rejected without looking at the expressions. Otherwise the expressions
  /// are combined with AND and `not` flips the result.
  pub fn matches_query(&self, query: &MediaQuery) -> Result<bool, EvalError> {
    let type_matches = query.is_all() || self.values.media_type() == Some(query.media_type.as_str());

    if query.inverse == type_matches {
      if media_debug_enabled() {
        eprintln!(
          "[media] {} -> false (type '{}' vs {:?})",
          query,
          query.media_type,
          self.values.media_type()
        );
      }
      return Ok(false);
    }

    // Every expression is evaluated so conversion errors are never masked by
    // an earlier non-match.
    let mut expressions_match = true;
    for expression in &query.expressions {
      if !self.matches_expression(expression)? {
        expressions_match = false;
      }
    }

    let result = expressions_match != query.inverse;
    if media_debug_enabled() {
      eprintln!("[media] {} -> {}", query, result);
    }
    Ok(result)
  }

  /// Evaluates a single feature expression.
  ///
  /// A feature missing from the values never matches. A feature present in
  /// the values but unknown to [`MediaFeature`] is an error.
  pub fn matches_expression(&self, expression: &Expression) -> Result<bool, EvalError> {
    let Some(actual) = self.values.get(&expression.feature) else {
      return Ok(false);
    };

    let feature = MediaFeature::from_name(&expression.feature).ok_or_else(|| {
      EvalError::UnknownFeature {
        feature: expression.feature.clone(),
      }
    })?;
    let query_value = expression.raw_value.as_deref();

    let (target, actual) = match feature.value_kind() {
      ValueKind::Keyword => {
        let result = match query_value {
          Some(expected) => expected.to_lowercase() == actual.to_lowercase(),
          None => !actual.trim().is_empty(),
        };
        trace_expression(expression, actual, result);
        return Ok(result);
      }
      ValueKind::Length => (
        self.converter.to_pixels(required(feature, query_value)?)?,
        self.converter.to_pixels(actual)?,
      ),
      ValueKind::Resolution => (
        self.converter.to_dpi(required(feature, query_value)?)?,
        self.converter.to_dpi(actual)?,
      ),
      ValueKind::Ratio => (
        self.converter.to_decimal(required(feature, query_value)?)?,
        self.converter.to_decimal(actual)?,
      ),
      ValueKind::Integer => (
        self.converter.to_integer(required(feature, query_value)?)?,
        self.converter.to_integer(actual)?,
      ),
      ValueKind::Color => (
        match query_value {
          Some(v) if !v.is_empty() => self.converter.to_integer(v)?,
          _ => 1.0,
        },
        if actual.is_empty() {
          0.0
        } else {
          self.converter.to_integer(actual)?
        },
      ),
    };

    let result = match expression.range_modifier {
      RangeModifier::Min => actual >= target,
      RangeModifier::Max => actual <= target,
      RangeModifier::None => actual == target,
    };
    if media_debug_enabled() {
      eprintln!(
        "[media]   {} -> {} (query {}, actual {})",
        expression, result, target, actual
      );
    }
    Ok(result)
  }
}

fn required(feature: MediaFeature, value: Option<&str>) -> Result<&str, ValueError> {
  value.ok_or_else(|| ValueError::MissingValue {
    feature: feature.name().to_string(),
  })
}

fn trace_expression(expression: &Expression, actual: &str, result: bool) {
  if media_debug_enabled() {
    eprintln!("[media]   {} -> {} (actual '{}')", expression, result, actual);
  }
}

/// Returns true if any query in the list matches `values`.
///
/// # Errors
///
/// See [`MediaMatcher::matches`].
pub fn matches(queries: &MediaQueryList, values: &MediaValues) -> Result<bool, EvalError> {
  MediaMatcher::new(values).matches(queries)
}

/// Evaluates a single clause against `values`.
///
/// # Errors
///
/// See [`MediaMatcher::matches_query`].
pub fn matches_query(query: &MediaQuery, values: &MediaValues) -> Result<bool, EvalError> {
  MediaMatcher::new(values).matches_query(query)
}

/// Evaluates a single feature expression against `values`.
///
/// # Errors
///
/// See [`MediaMatcher::matches_expression`].
pub fn matches_expression(expression: &Expression, values: &MediaValues) -> Result<bool, EvalError> {
  MediaMatcher::new(values).matches_expression(expression)
}

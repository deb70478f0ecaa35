//! Error types for cssmq
//!
//! Two families of failure exist:
//! - Parse errors, raised while turning query text into a [`MediaQueryList`]
//! - Evaluation errors, raised while matching a parsed list against
//!   environment values (unreadable numbers, unknown features)
//!
//! A feature missing from the environment values is never an error; it is a
//! plain non-match.
//!
//! [`MediaQueryList`]: crate::media::MediaQueryList

use std::fmt;
use thiserror::Error;

/// Result type alias for cssmq operations
///
/// # Examples
///
/// ```
/// use cssmq::Result;
///
/// fn is_wide(values: &cssmq::MediaValues) -> Result<bool> {
///   cssmq::matches("(min-width: 1024px)", values)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
///
/// Each variant wraps the error of one stage. Messages are forwarded
/// unchanged so a syntax error always reads `Invalid CSS media query: <clause>`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  /// The query text is malformed
  #[error(transparent)]
  Parse(#[from] ParseError),

  /// The parsed query could not be evaluated against the values
  #[error(transparent)]
  Eval(#[from] EvalError),
}

impl From<ValueError> for Error {
  fn from(err: ValueError) -> Self {
    Error::Eval(EvalError::Value(err))
  }
}

/// Errors raised while parsing a media query list
///
/// The message names the trimmed text of the first clause that failed,
/// not the whole input.
///
/// # Examples
///
/// ```
/// use cssmq::error::SyntaxIssue;
///
/// let err = cssmq::parse("screen, screen and (foo:)").unwrap_err();
/// assert_eq!(err.to_string(), "Invalid CSS media query: screen and (foo:)");
/// assert_eq!(err.reason(), SyntaxIssue::EmptyValue);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  /// A comma-separated clause does not match the query grammar
  #[error("Invalid CSS media query: {clause}")]
  InvalidQuery { clause: String, reason: SyntaxIssue },
}

impl ParseError {
  pub(crate) fn invalid(clause: &str, reason: SyntaxIssue) -> Self {
    ParseError::InvalidQuery {
      clause: clause.to_string(),
      reason,
    }
  }

  /// Returns the trimmed text of the offending clause.
  pub fn clause(&self) -> &str {
    match self {
      ParseError::InvalidQuery { clause, .. } => clause,
    }
  }

  /// Returns the point at which the scanner gave up.
  pub fn reason(&self) -> SyntaxIssue {
    match self {
      ParseError::InvalidQuery { reason, .. } => *reason,
    }
  }
}

/// Where a clause stopped matching the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxIssue {
  /// The clause is empty (e.g. a trailing comma)
  EmptyClause,
  /// The clause starts with something other than a modifier, type, or group
  ExpectedTypeOrGroup,
  /// A modifier (`only` / `not`) is not followed by a media type
  ExpectedMediaType,
  /// Text follows a type or group without an `and` keyword
  ExpectedAnd,
  /// No parenthesized group follows `and`
  ExpectedGroup,
  /// A group is opened but never closed
  UnclosedGroup,
  /// A group contains nothing
  EmptyGroup,
  /// A group contains another `(`
  NestedGroup,
  /// A group does not start with a feature identifier
  ExpectedFeatureName,
  /// A `:` is present with no value after it
  EmptyValue,
  /// Something other than `:` or `)` follows the feature name
  UnexpectedToken,
}

impl fmt::Display for SyntaxIssue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      SyntaxIssue::EmptyClause => "empty query",
      SyntaxIssue::ExpectedTypeOrGroup => "expected media type or '('",
      SyntaxIssue::ExpectedMediaType => "expected media type after modifier",
      SyntaxIssue::ExpectedAnd => "expected 'and'",
      SyntaxIssue::ExpectedGroup => "expected '(' after 'and'",
      SyntaxIssue::UnclosedGroup => "expected ')' to close media feature",
      SyntaxIssue::EmptyGroup => "empty media feature",
      SyntaxIssue::NestedGroup => "nested '(' in media feature",
      SyntaxIssue::ExpectedFeatureName => "expected media feature name",
      SyntaxIssue::EmptyValue => "missing value after ':'",
      SyntaxIssue::UnexpectedToken => "unexpected token in media feature",
    };
    f.write_str(text)
  }
}

/// Errors raised when a feature value cannot be read as its numeric form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
  /// No leading number could be read
  #[error("Invalid numeric value: '{value}'")]
  InvalidNumber { value: String },

  /// The value is not an integer
  #[error("Invalid integer value: '{value}'")]
  InvalidInteger { value: String },

  /// The value is neither a number nor an `<integer> / <integer>` ratio
  #[error("Invalid ratio value: '{value}'")]
  InvalidRatio { value: String },

  /// A ratio has a zero denominator
  #[error("Ratio has a zero denominator: '{value}'")]
  ZeroDenominator { value: String },

  /// A numeric feature was queried without a value
  #[error("Missing value for media feature '{feature}'")]
  MissingValue { feature: String },
}

/// Errors raised while evaluating a parsed query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
  /// The environment supplies a feature with no known interpretation
  #[error("Unknown media feature: '{feature}'")]
  UnknownFeature { feature: String },

  /// A query or environment value could not be converted
  #[error(transparent)]
  Value(#[from] ValueError),
}

//! Parse CSS media queries and match them against environment values.
//!
//! ```
//! use cssmq::MediaValues;
//!
//! let values = MediaValues::new().with_type("screen").with("width", "48em");
//! assert!(cssmq::matches("screen and (min-width: 500px)", &values).unwrap());
//!
//! let err = cssmq::parse("screen and crap").unwrap_err();
//! assert_eq!(err.to_string(), "Invalid CSS media query: screen and crap");
//! ```

pub mod debug;
pub mod error;
pub mod media;
pub mod units;

pub use error::{Error, EvalError, ParseError, Result, ValueError};
pub use media::{
  Expression, MediaFeature, MediaMatcher, MediaQuery, MediaQueryCache, MediaQueryList,
  MediaValues, RangeModifier,
};

/// Parses a comma-separated media query list.
///
/// # Errors
///
/// Returns `Invalid CSS media query: <clause>` for the first malformed clause.
pub fn parse(query: &str) -> std::result::Result<MediaQueryList, ParseError> {
  MediaQueryList::parse(query)
}

/// Parses `query` and returns true if any clause matches `values`.
///
/// # Errors
///
/// Fails on malformed queries, on values that cannot be converted, and on
/// unknown features present in `values`.
pub fn matches(query: &str, values: &MediaValues) -> Result<bool> {
  let queries = parse(query)?;
  Ok(queries.matches(values)?)
}

/// Like [`matches`], reusing parsed queries from [`MediaQueryCache::global`].
///
/// # Errors
///
/// Same as [`matches`].
pub fn matches_cached(query: &str, values: &MediaValues) -> Result<bool> {
  MediaQueryCache::global().matches(query, values)
}

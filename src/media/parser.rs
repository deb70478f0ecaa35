//! Media query scanner
//!
//! Each comma-separated clause is scanned left to right:
//!
//! ```text
//! query   := (modifier? type | group) ("and" tail)?
//! tail    := text containing one or more groups
//! modifier:= "only" | "not"
//! type    := [_a-z][_a-z0-9-]*
//! group   := "(" WS* feature WS* (":" WS* value)? WS* ")"
//! feature := [_a-z-][_a-z0-9-]*
//! ```
//!
//! Keywords and identifiers are matched case-insensitively. After the first
//! `and`, every group in the remaining text is collected and anything between
//! groups is ignored. Groups do not nest and the list never has commas inside
//! a group, so clauses are split on every comma.

use super::{Expression, MediaQuery, MediaQueryList, RangeModifier, MEDIA_TYPE_ALL};
use crate::error::{ParseError, SyntaxIssue};

pub(crate) fn parse_query_list(input: &str) -> Result<MediaQueryList, ParseError> {
  input
    .split(',')
    .map(|clause| parse_clause(clause.trim()))
    .collect::<Result<Vec<_>, _>>()
    .map(MediaQueryList::new)
}

/// Parses one trimmed clause, reporting failures against its full text.
pub(crate) fn parse_clause(clause: &str) -> Result<MediaQuery, ParseError> {
  MediaQueryParser::new(clause)
    .parse_query()
    .map_err(|reason| ParseError::invalid(clause, reason))
}

/// Parser for a single media query clause
struct MediaQueryParser<'a> {
  input: &'a str,
  pos: usize,
}

impl<'a> MediaQueryParser<'a> {
  fn new(input: &'a str) -> Self {
    Self { input, pos: 0 }
  }

  fn parse_query(&mut self) -> Result<MediaQuery, SyntaxIssue> {
    self.skip_whitespace();
    if self.is_eof() {
      return Err(SyntaxIssue::EmptyClause);
    }

    let mut inverse = false;
    let mut expressions = Vec::new();

    let media_type = if self.peek() == Some('(') {
      expressions.push(self.parse_group()?);
      MEDIA_TYPE_ALL.to_string()
    } else {
      let ident = self
        .parse_ident(is_type_start)
        .ok_or(SyntaxIssue::ExpectedTypeOrGroup)?
        .to_ascii_lowercase();

      match ident.as_str() {
        "not" | "only" => {
          inverse = ident == "not";
          self.skip_whitespace();
          self
            .parse_ident(is_type_start)
            .map(|t| t.to_ascii_lowercase())
            .filter(|t| t != "and")
            .ok_or(SyntaxIssue::ExpectedMediaType)?
        }
        _ => ident,
      }
    };

    self.skip_whitespace();
    if !self.is_eof() {
      match self.parse_ident(is_type_start) {
        Some(keyword) if keyword.eq_ignore_ascii_case("and") => {}
        _ => return Err(SyntaxIssue::ExpectedAnd),
      }
      self.parse_tail_groups(&mut expressions)?;
    }

    Ok(MediaQuery {
      inverse,
      media_type,
      expressions,
    })
  }

  /// Collects every group after the first `and`. Text between groups is skipped.
  fn parse_tail_groups(&mut self, expressions: &mut Vec<Expression>) -> Result<(), SyntaxIssue> {
    let mut found = false;
    while let Some(c) = self.peek() {
      if c == '(' {
        expressions.push(self.parse_group()?);
        found = true;
      } else {
        self.advance();
      }
    }

    if found {
      Ok(())
    } else {
      Err(SyntaxIssue::ExpectedGroup)
    }
  }

  /// Parses `( feature [: value] )`, leaving the position after `)`.
  fn parse_group(&mut self) -> Result<Expression, SyntaxIssue> {
    let input = self.input;

    // Consume '('
    self.advance();
    let start = self.pos;

    loop {
      match self.peek() {
        Some(')') => break,
        Some('(') => return Err(SyntaxIssue::NestedGroup),
        Some(_) => self.advance(),
        None => return Err(SyntaxIssue::UnclosedGroup),
      }
    }
    let inner = &input[start..self.pos];

    // Consume ')'
    self.advance();

    parse_expression(inner)
  }

  fn skip_whitespace(&mut self) {
    while let Some(c) = self.peek() {
      if c.is_whitespace() {
        self.advance();
      } else {
        break;
      }
    }
  }

  fn peek(&self) -> Option<char> {
    self.input[self.pos..].chars().next()
  }

  fn advance(&mut self) {
    if let Some(c) = self.peek() {
      self.pos += c.len_utf8();
    }
  }

  fn is_eof(&self) -> bool {
    self.pos >= self.input.len()
  }

  fn parse_ident(&mut self, is_start: fn(char) -> bool) -> Option<&'a str> {
    let input = self.input;
    let ident = peek_ident(&input[self.pos..], is_start)?;
    self.pos += ident.len();
    Some(ident)
  }
}

/// Parses the text between a group's parentheses.
fn parse_expression(inner: &str) -> Result<Expression, SyntaxIssue> {
  let inner = inner.trim();
  if inner.is_empty() {
    return Err(SyntaxIssue::EmptyGroup);
  }

  let name = peek_ident(inner, is_feature_start).ok_or(SyntaxIssue::ExpectedFeatureName)?;
  let rest = inner[name.len()..].trim_start();

  let raw_value = if rest.is_empty() {
    None
  } else if let Some(value) = rest.strip_prefix(':') {
    let value = value.trim();
    if value.is_empty() {
      return Err(SyntaxIssue::EmptyValue);
    }
    Some(value)
  } else {
    return Err(SyntaxIssue::UnexpectedToken);
  };

  let name = name.to_ascii_lowercase();
  let (range_modifier, feature) = RangeModifier::split(&name);
  Ok(Expression::new(feature, range_modifier, raw_value))
}

/// Returns the identifier at the start of `input`, if any.
fn peek_ident(input: &str, is_start: fn(char) -> bool) -> Option<&str> {
  let first = input.chars().next()?;
  if !is_start(first) {
    return None;
  }
  let len = input
    .find(|c: char| !is_ident_char(c))
    .unwrap_or(input.len());
  Some(&input[..len])
}

fn is_type_start(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

fn is_feature_start(c: char) -> bool {
  is_type_start(c) || c == '-'
}

fn is_ident_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn issue(input: &str) -> SyntaxIssue {
    parse_query_list(input).unwrap_err().reason()
  }

  #[test]
  fn test_parse_bare_type() {
    let list = parse_query_list("screen").unwrap();
    assert_eq!(list.len(), 1);
    assert!(!list[0].inverse);
    assert_eq!(list[0].media_type, "screen");
    assert!(list[0].expressions.is_empty());
  }

  #[test]
  fn test_parse_modifiers() {
    let query = parse_clause("not screen").unwrap();
    assert!(query.inverse);
    assert_eq!(query.media_type, "screen");

    let query = parse_clause("only print").unwrap();
    assert!(!query.inverse);
    assert_eq!(query.media_type, "print");

    let query = parse_clause("NOT  Screen").unwrap();
    assert!(query.inverse);
    assert_eq!(query.media_type, "screen");
  }

  #[test]
  fn test_parse_leading_group_defaults_to_all() {
    let query = parse_clause("(min-width: 767px)").unwrap();
    assert_eq!(query.media_type, "all");
    assert_eq!(
      query.expressions,
      vec![Expression::new("width", RangeModifier::Min, Some("767px"))]
    );
  }

  #[test]
  fn test_parse_and_chain() {
    let query = parse_clause("screen and (min-width: 767px) AND (max-width:979px)").unwrap();
    assert_eq!(query.expressions.len(), 2);
    assert_eq!(query.expressions[1].range_modifier, RangeModifier::Max);
    assert_eq!(query.expressions[1].raw_value.as_deref(), Some("979px"));

    let query = parse_clause("(color) and (orientation: landscape)").unwrap();
    assert_eq!(query.expressions.len(), 2);
    assert_eq!(query.expressions[0].raw_value, None);
  }

  #[test]
  fn test_parse_tail_collects_every_group() {
    let query = parse_clause("screen and (min-width: 100px) (max-width: 200px)").unwrap();
    assert_eq!(
      query.expressions,
      vec![
        Expression::new("width", RangeModifier::Min, Some("100px")),
        Expression::new("width", RangeModifier::Max, Some("200px")),
      ]
    );

    let query = parse_clause("screen and (color) junk").unwrap();
    assert_eq!(
      query.expressions,
      vec![Expression::new("color", RangeModifier::None, None)]
    );

    let query = parse_clause("(color) and stray (grid: 1)").unwrap();
    assert_eq!(query.media_type, "all");
    assert_eq!(query.expressions.len(), 2);
  }

  #[test]
  fn test_parse_group_whitespace() {
    let query = parse_clause("screen and(  Min-Width :  48em  )").unwrap();
    assert_eq!(
      query.expressions,
      vec![Expression::new("width", RangeModifier::Min, Some("48em"))]
    );
  }

  #[test]
  fn test_parse_vendor_features() {
    let query = parse_clause("only screen and (-webkit-min-device-pixel-ratio: 2)").unwrap();
    assert_eq!(query.expressions[0].feature, "-webkit-min-device-pixel-ratio");
    assert_eq!(query.expressions[0].range_modifier, RangeModifier::None);

    let query = parse_clause("only screen and (min--moz-device-pixel-ratio: 2)").unwrap();
    assert_eq!(query.expressions[0].feature, "-moz-device-pixel-ratio");
    assert_eq!(query.expressions[0].range_modifier, RangeModifier::Min);
  }

  #[test]
  fn test_parse_value_keeps_inner_text() {
    let query = parse_clause("(aspect-ratio: 16 / 9)").unwrap();
    assert_eq!(query.expressions[0].raw_value.as_deref(), Some("16 / 9"));
  }

  #[test]
  fn test_invalid_reasons() {
    assert_eq!(issue("some crap"), SyntaxIssue::ExpectedAnd);
    assert_eq!(issue("48em"), SyntaxIssue::ExpectedTypeOrGroup);
    assert_eq!(issue("screen and crap"), SyntaxIssue::ExpectedGroup);
    assert_eq!(issue("screen and (48em)"), SyntaxIssue::ExpectedFeatureName);
    assert_eq!(issue("screen and (foo:)"), SyntaxIssue::EmptyValue);
    assert_eq!(issue("()"), SyntaxIssue::EmptyGroup);
    assert_eq!(issue("(foo) (bar)"), SyntaxIssue::ExpectedAnd);
    assert_eq!(issue("(foo:) and (bar)"), SyntaxIssue::EmptyValue);
  }

  #[test]
  fn test_invalid_structure() {
    assert_eq!(issue(""), SyntaxIssue::EmptyClause);
    assert_eq!(issue("screen,"), SyntaxIssue::EmptyClause);
    assert_eq!(issue("screen and"), SyntaxIssue::ExpectedGroup);
    assert_eq!(issue("not"), SyntaxIssue::ExpectedMediaType);
    assert_eq!(issue("not (color)"), SyntaxIssue::ExpectedMediaType);
    assert_eq!(issue("screen and (width: 1px"), SyntaxIssue::UnclosedGroup);
    assert_eq!(issue("screen and ((width))"), SyntaxIssue::NestedGroup);
    assert_eq!(issue("(min width: 3px)"), SyntaxIssue::UnexpectedToken);
    assert_eq!(issue("(width: )"), SyntaxIssue::EmptyValue);
    assert_eq!(issue("screen and junk (color"), SyntaxIssue::UnclosedGroup);
    assert_eq!(issue("screenand (color)"), SyntaxIssue::ExpectedAnd);
  }

  #[test]
  fn test_error_names_offending_clause() {
    let err = parse_query_list("screen,\n  print and (foo:)  , tv").unwrap_err();
    assert_eq!(err.to_string(), "Invalid CSS media query: print and (foo:)");
  }
}

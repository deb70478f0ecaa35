use cssmq::{matches, Error, EvalError, MediaValues, ValueError};

fn values(pairs: &[(&str, &str)]) -> MediaValues {
  pairs.iter().copied().collect()
}

fn check(query: &str, pairs: &[(&str, &str)]) -> bool {
  matches(query, &values(pairs)).unwrap()
}

#[test]
fn orientation_match() {
  assert!(check("(orientation: portrait)", &[("orientation", "portrait")]));
  assert!(!check("(orientation: landscape)", &[("orientation", "portrait")]));
}

#[test]
fn scan_match() {
  assert!(check("(scan: progressive)", &[("scan", "progressive")]));
  assert!(!check("(scan: progressive)", &[("scan", "interlace")]));
}

#[test]
fn width_match() {
  assert!(check("(width: 800px)", &[("width", "800")]));
  assert!(!check("(width: 800px)", &[("width", "810")]));
}

#[test]
fn width_range_match() {
  assert!(check("(min-width: 48em)", &[("width", "80em")]));
  assert!(!check("(min-width: 48em)", &[("width", "20em")]));
  assert!(!check("(min-width: 48em)", &[("resolution", "72")]));
}

#[test]
fn different_unit_match() {
  assert!(check("(min-width: 500px)", &[("width", "48em")]));
  assert!(check("(min-width: 500px)", &[("width", "48rem")]));
  assert!(check("(max-height: 1000px)", &[("height", "20cm")]));
  assert!(!check("(max-height: 1000px)", &[("height", "850pt")]));
  assert!(check("(max-height: 1000px)", &[("height", "60pc")]));
}

#[test]
fn resolution_match() {
  assert!(check("(resolution: 50dpi)", &[("resolution", "50")]));
  assert!(check("(min-resolution: 50dpi)", &[("resolution", "72")]));
  assert!(!check("(min-resolution: 72dpi)", &[("width", "300")]));
  assert!(!check("(min-resolution: 72dpi)", &[("width", "75dpcm")]));
  assert!(check("(resolution: 192dpi)", &[("resolution", "2dppx")]));
}

#[test]
fn aspect_ratio_match() {
  assert!(check("(min-aspect-ratio: 4/3)", &[("aspect-ratio", "16 / 9")]));
  assert!(!check("(max-aspect-ratio: 4/3)", &[("aspect-ratio", "16/9")]));
  assert!(!check("(max-aspect-ratio: 72dpi)", &[("width", "300")]));
  assert!(!check(
    "(min-aspect-ratio: 2560/1440)",
    &[("aspect-ratio", "1.3333333333333333")]
  ));
  assert!(check(
    "(device-aspect-ratio: 16/10)",
    &[("device-aspect-ratio", "1.6")]
  ));
}

#[test]
fn not_query_match() {
  assert!(!check(
    "not screen and (color)",
    &[("type", "screen"), ("color", "1")]
  ));
  assert!(check(
    "not screen and (color), screen and (min-height: 48em)",
    &[("type", "screen"), ("height", "1000")]
  ));
  assert!(!check(
    "not all and (min-width: 48em)",
    &[("type", "all"), ("width", "1000")]
  ));
}

#[test]
fn type_match() {
  assert!(check("screen", &[("type", "screen")]));
  assert!(!check("screen and (color:1)", &[("type", "tv"), ("color", "1")]));
  assert!(!check("(min-width: 500px)", &[("type", "screen")]));
}

#[test]
fn media_query_combinations() {
  assert!(check(
    "screen and (min-width: 767px)",
    &[("type", "screen"), ("width", "980")]
  ));
  assert!(check(
    "screen and (min-width: 767px) and (max-width: 979px)",
    &[("type", "screen"), ("width", "800")]
  ));
  assert!(check("screen and (color)", &[("type", "screen"), ("color", "1")]));
  assert!(check(
    "screen and (min-width: 767px), screen and (color)",
    &[("type", "screen"), ("color", "1")]
  ));
  assert!(!check(
    "screen and (max-width: 1200px), handheld and (monochrome: 1)",
    &[("type", "screen"), ("monochrome", "0")]
  ));
}

#[test]
fn preset_values() {
  let desktop = MediaValues::screen(1280, 800);
  assert!(matches("screen and (min-width: 1024px) and (orientation: landscape)", &desktop).unwrap());
  assert!(matches("(min-aspect-ratio: 16/10)", &desktop).unwrap());
  assert!(!matches("print", &desktop).unwrap());

  let page = MediaValues::print(816, 1056);
  assert!(matches("print and (orientation: portrait)", &page).unwrap());
  assert!(!matches("(scan: progressive)", &page).unwrap());
}

#[test]
fn parse_errors_surface_from_matches() {
  let err = matches("screen and (48em)", &values(&[("type", "screen")])).unwrap_err();
  assert!(matches!(err, Error::Parse(_)));
  assert_eq!(err.to_string(), "Invalid CSS media query: screen and (48em)");
}

#[test]
fn conversion_errors_surface_from_matches() {
  let err = matches("(min-width: 500px)", &values(&[("width", "auto")])).unwrap_err();
  assert_eq!(
    err,
    Error::Eval(EvalError::Value(ValueError::InvalidNumber {
      value: "auto".to_string()
    }))
  );

  let err = matches("(max-aspect-ratio: 4/3)", &values(&[("aspect-ratio", "0")])).unwrap_err();
  assert!(matches!(
    err,
    Error::Eval(EvalError::Value(ValueError::InvalidRatio { .. }))
  ));
}

#[test]
fn unknown_feature_in_values_is_fatal() {
  let err = matches(
    "(-webkit-min-device-pixel-ratio: 2)",
    &values(&[("-webkit-min-device-pixel-ratio", "2")]),
  )
  .unwrap_err();
  assert_eq!(
    err.to_string(),
    "Unknown media feature: '-webkit-min-device-pixel-ratio'"
  );
}

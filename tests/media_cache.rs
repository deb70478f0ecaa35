use cssmq::{matches, matches_cached, MediaQueryCache, MediaValues};

#[test]
fn cached_and_uncached_agree() {
  let values = MediaValues::screen(1024, 768).with("color", "8");
  let queries = [
    "screen",
    "print",
    "not print and (color)",
    "screen and (min-width: 767px) and (max-width: 979px)",
    "(min-resolution: 2dppx), (orientation: landscape)",
  ];

  for query in queries {
    let expected = matches(query, &values).unwrap();
    assert_eq!(matches_cached(query, &values).unwrap(), expected, "{query}");
    assert_eq!(matches_cached(query, &values).unwrap(), expected, "{query}");
  }
  assert!(MediaQueryCache::global().get("print").is_some());
}

#[test]
fn cached_parse_error_matches_uncached() {
  let values = MediaValues::new();
  let uncached = matches("(foo) (bar)", &values).unwrap_err();
  let cached = matches_cached("(foo) (bar)", &values).unwrap_err();
  assert_eq!(cached, uncached);
}

#![no_main]

use arbitrary::Arbitrary;
use cssmq::media::{MediaQueryList, MediaValues};
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 4 * 1024;

#[derive(Arbitrary, Debug)]
struct MediaQueryInput {
  query: String,
  values: Vec<(String, String)>,
}

fn truncate_str(s: &str) -> String {
  s.chars().take(MAX_LEN).collect()
}

fuzz_target!(|input: MediaQueryInput| {
  let query = truncate_str(&input.query);
  let Ok(parsed) = MediaQueryList::parse(&query) else {
    return;
  };

  // Display output must parse back to the same structure.
  let reparsed = MediaQueryList::parse(&parsed.to_string()).expect("display output parses");
  assert_eq!(parsed, reparsed);

  let values: MediaValues = input
    .values
    .iter()
    .take(32)
    .map(|(k, v)| (truncate_str(k), truncate_str(v)))
    .collect();
  let _ = parsed.matches(&values);
});

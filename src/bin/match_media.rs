use clap::{Parser, ValueEnum};
use cssmq::{MediaMatcher, MediaQueryList, MediaValues};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Parse a CSS media query and match it against environment values.
///
/// Values are layered in order: preset, --values-file, --env, --type, --value.
#[derive(Parser, Debug)]
#[command(name = "match_media", version, about)]
struct Args {
  /// Media query list, e.g. "screen and (min-width: 768px), print"
  query: String,

  /// Start from a preset environment
  #[arg(long, value_enum)]
  preset: Option<Preset>,

  /// Viewport size for --preset as WxH (e.g., 1200x800)
  #[arg(long, value_parser = parse_viewport, default_value = "1200x800")]
  viewport: (u32, u32),

  /// JSON object of feature values, e.g. {"type": "screen", "width": "800"}
  #[arg(long)]
  values_file: Option<PathBuf>,

  /// Apply CSSMQ_TYPE / CSSMQ_<FEATURE> environment overrides
  #[arg(long)]
  env: bool,

  /// Media type to simulate
  #[arg(long = "type")]
  media_type: Option<String>,

  /// Feature value as KEY=VALUE (repeatable)
  #[arg(long = "value", value_parser = parse_key_value)]
  values: Vec<(String, String)>,

  /// Only parse the query and print its structure
  #[arg(long)]
  parse_only: bool,

  /// Exit with status 2 when the query does not match
  #[arg(long)]
  exit_code: bool,

  /// Output compact JSON instead of pretty-printing.
  #[arg(long)]
  compact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
  Screen,
  Print,
}

#[derive(Serialize)]
struct ClauseReport {
  query: String,
  /// `None` when the clause could not be evaluated
  matches: Option<bool>,
}

#[derive(Serialize)]
struct MatchReport<'a> {
  query: &'a str,
  values: &'a MediaValues,
  parsed: &'a MediaQueryList,
  clauses: Vec<ClauseReport>,
  matches: bool,
}

fn parse_viewport(s: &str) -> Result<(u32, u32), String> {
  let (w, h) = s
    .split_once('x')
    .ok_or_else(|| "viewport must be WxH (e.g., 1200x800)".to_string())?;
  let w = w.parse::<u32>().map_err(|_| "invalid width")?;
  let h = h.parse::<u32>().map_err(|_| "invalid height")?;
  if w == 0 || h == 0 {
    return Err("width and height must be > 0".to_string());
  }
  Ok((w, h))
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
  let (key, value) = s
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
  let key = key.trim();
  if key.is_empty() {
    return Err(format!("empty key in '{}'", s));
  }
  Ok((key.to_string(), value.trim().to_string()))
}

fn build_values(args: &Args) -> Result<MediaValues, Box<dyn Error>> {
  let (width, height) = args.viewport;
  let mut values = match args.preset {
    Some(Preset::Screen) => MediaValues::screen(width, height),
    Some(Preset::Print) => MediaValues::print(width, height),
    None => MediaValues::new(),
  };

  if let Some(path) = &args.values_file {
    let text = fs::read_to_string(path)
      .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let from_file: MediaValues = serde_json::from_str(&text)?;
    values.extend(from_file.iter());
  }

  if args.env {
    values = values.with_env_overrides();
  }

  if let Some(media_type) = &args.media_type {
    values = values.with_type(media_type.as_str());
  }
  values.extend(args.values.iter().cloned());

  Ok(values)
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
  if compact {
    serde_json::to_string(value)
  } else {
    serde_json::to_string_pretty(value)
  }
}

fn run(args: &Args) -> Result<bool, Box<dyn Error>> {
  let parsed = MediaQueryList::parse(&args.query)?;
  if args.parse_only {
    println!("{}", to_json(&parsed, args.compact)?);
    return Ok(true);
  }

  let values = build_values(args)?;
  let matcher = MediaMatcher::new(&values);
  let matches = matcher.matches(&parsed)?;
  let clauses = parsed
    .iter()
    .map(|query| ClauseReport {
      query: query.to_string(),
      matches: matcher.matches_query(query).ok(),
    })
    .collect();

  let report = MatchReport {
    query: &args.query,
    values: &values,
    parsed: &parsed,
    clauses,
    matches,
  };
  println!("{}", to_json(&report, args.compact)?);
  Ok(matches)
}

fn main() {
  let args = Args::parse();
  match run(&args) {
    Ok(matched) => {
      if args.exit_code && !matched {
        std::process::exit(2);
      }
    }
    Err(err) => {
      eprintln!("match_media: {}", err);
      std::process::exit(1);
    }
  }
}

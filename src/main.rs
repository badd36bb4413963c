
//! Command-line front end: parses each expression given on the
//! command line (or one per line of standard input) and prints the
//! resulting tree.

use calc_parser::{parse_with, ParseStatus, ParserSettings, NodePool};

use anyhow::{anyhow, bail, Context};

use std::env;
use std::fs;
use std::io::{self, BufRead};

const USAGE: &str = "usage: calc-parse [--settings FILE] [--parens] [--json] [--pool BYTES] [EXPR...]";

#[derive(Debug, Default)]
struct Options {
  settings: ParserSettings,
  json: bool,
  pool_capacity: Option<usize>,
  inputs: Vec<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
  let mut options = Options::default();
  let mut parens = false;
  let mut args = args.peekable();
  while let Some(arg) = args.next() {
    match arg.as_str() {
      "--settings" => {
        let path = args.next().ok_or_else(|| anyhow!("--settings needs a file"))?;
        let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        options.settings = ParserSettings::from_json(&text).with_context(|| format!("parsing {path}"))?;
      }
      "--parens" => parens = true,
      "--json" => options.json = true,
      "--pool" => {
        let bytes = args.next().ok_or_else(|| anyhow!("--pool needs a size in bytes"))?;
        options.pool_capacity = Some(bytes.parse().with_context(|| format!("invalid pool size {bytes:?}"))?);
      }
      "--help" | "-h" => bail!(USAGE),
      "--" => options.inputs.extend(args.by_ref()),
      flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
      _ => options.inputs.push(arg),
    }
  }
  if parens {
    options.settings.add_missing_parentheses = true;
  }
  Ok(options)
}

fn run_one(options: &Options, input: &str) -> anyhow::Result<bool> {
  let mut pool = match options.pool_capacity {
    Some(capacity) => NodePool::bounded(capacity),
    None => NodePool::unbounded(),
  };
  let result = parse_with(input, &options.settings, &mut pool);
  let status = ParseStatus::of(&result);
  match result {
    Ok(expr) => {
      if options.json {
        println!("{}", serde_json::to_string(&expr)?);
      } else {
        println!("{expr}");
      }
      log::info!("{input:?}: {} nodes, pool {pool}", expr.node_count());
      Ok(true)
    }
    Err(err) => {
      eprintln!("{input:?}: {status:?}: {err}");
      Ok(false)
    }
  }
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let options = parse_args(env::args().skip(1))?;

  let mut all_ok = true;
  if options.inputs.is_empty() {
    for line in io::stdin().lock().lines() {
      let line = line.context("reading standard input")?;
      if line.trim().is_empty() {
        continue;
      }
      all_ok &= run_one(&options, &line)?;
    }
  } else {
    for input in &options.inputs {
      all_ok &= run_one(&options, input)?;
    }
  }

  if all_ok {
    Ok(())
  } else {
    bail!("some expressions failed to parse")
  }
}

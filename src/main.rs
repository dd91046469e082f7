//! Top Level Environment

use std::env;
use std::io;
use std::time;

use anyhow::{Context, Result};

use regcolor::args::{self, AllocConfig, Config};
use regcolor::emit;
use regcolor::parse::parser;
use regcolor::regalloc::{check_assignment, AllocError, Allocator};
use regcolor::InterferenceGraph;

const EXIT_INFEASIBLE: i32 = 1;
const EXIT_ERROR: i32 = 2;

// Helper macro to time evaluating an expression (like a function call.)
macro_rules! time {
  ( $x:expr ) => {{
    let t1 = time::Instant::now();
    let result = $x;
    (result, t1.elapsed())
  }};
}

fn run(cfg: &Config) -> Result<i32> {
  let alloc_cfg = AllocConfig::from_config(cfg.config_file.as_deref())?;
  let file = cfg.file.as_deref().context("Expected file input")?;

  let (edges, parse_time) = time!(parser::load(file));
  let graph = InterferenceGraph::try_from_edges(edges?)
    .with_context(|| format!("Invalid interference graph {}", file.display()))?;

  let (num_registers, order, check) = cfg.resolve(&alloc_cfg, graph.max_degree());
  let allocator = Allocator::new(num_registers).with_order(order);

  let (result, alloc_time) = time!(allocator.run(&graph));
  let assignment = match result {
    Ok(assignment) => assignment,
    Err(e @ AllocError::Infeasible { .. }) => {
      log::info!("{}", e);
      println!("infeasible");
      return Ok(EXIT_INFEASIBLE);
    }
    Err(AllocError::Graph(e)) => return Err(e.into()),
  };

  if check {
    check_assignment(&graph, &assignment, num_registers)
      .context("Allocator produced an invalid assignment")?;
  }

  log::debug!("Emitting {} output", cfg.emit.as_ref());
  emit::emit(cfg.emit, &assignment, &mut io::stdout().lock())?;

  if cfg.verbose {
    let used = assignment.values().max().copied().unwrap_or(0);
    eprintln!(
      "{} vertices, {} edges, max degree {}, {} of {} registers used",
      graph.num_vertices(),
      graph.num_edges(),
      graph.max_degree(),
      used,
      num_registers
    );
    eprintln!("Parse time: {} us", parse_time.as_micros());
    eprintln!("Allocation: {} us", alloc_time.as_micros());
  }

  Ok(0)
}

fn main() {
  let cfg = match args::parse_args(env::args().skip(1)) {
    Ok(cfg) => cfg,
    Err(e) => {
      eprintln!("{}", e);
      eprintln!("usage: regcolor [-v] [--check] [-k N] [-o ORDER] [-e text|json] [-c CONFIG] <graph.csv>");
      std::process::exit(EXIT_ERROR);
    }
  };

  env_logger::builder()
    .target(env_logger::Target::Stderr)
    .format_timestamp(None)
    .filter_level(if cfg.verbose {
      log::LevelFilter::Debug
    } else {
      log::LevelFilter::Warn
    })
    .parse_default_env()
    .init();

  let code = match run(&cfg) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("{:#}", e);
      EXIT_ERROR
    }
  };
  std::process::exit(code);
}

//! Parse command line arguments and the allocator configuration file
//! We expect this to be good enough for a single-purpose tool.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use strum_macros::{AsRefStr, EnumString};

use crate::regalloc::{Register, VisitOrder};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "regcolor.toml";

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum EmitTarget {
  Text,
  Json,
}

/// Configuration options for this run.
#[derive(Debug, PartialEq)]
pub struct Config {
  pub verbose: bool,
  pub check: bool,

  pub emit: EmitTarget,
  pub order: Option<VisitOrder>,
  pub num_registers: Option<Register>,
  pub config_file: Option<PathBuf>,
  pub file: Option<PathBuf>,
}

/// Allocator options read from the `[alloc]` table of the config file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocConfig {
  pub num_registers: Option<Register>,
  pub order: VisitOrder,
  pub check: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
  alloc: AllocConfig,
}

impl AllocConfig {
  pub fn from_toml(config: &str) -> Result<Self> {
    let file: ConfigFile = toml::from_str(config)?;
    Ok(file.alloc)
  }

  /// Load the config file. An explicitly named file must exist; the default
  /// one is optional.
  pub fn from_config(path: Option<&Path>) -> Result<Self> {
    let (path, required) = match path {
      Some(path) => (path, true),
      None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !required && !path.exists() {
      log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
      return Ok(AllocConfig::default());
    }

    let config = std::fs::read_to_string(path)
      .with_context(|| format!("Couldn't read config file {}", path.display()))?;
    Self::from_toml(&config).with_context(|| format!("Invalid config file {}", path.display()))
  }
}

impl Config {
  /// Set your defaults here!
  fn default() -> Self {
    Config {
      verbose: false, // Debug logging and a summary line
      check: false,   // Validate the assignment before emitting it

      emit: EmitTarget::Text, // Output format
      order: None,            // Visit order, overrides the config file
      num_registers: None,    // Register budget, overrides the config file
      config_file: None,      // Config file, defaults to DEFAULT_CONFIG_FILE
      file: None,             // Edge list to allocate
    }
  }

  /// Merge the command line with the config file; the command line wins.
  /// Without any budget, `max_degree + 1` registers are used.
  pub fn resolve(&self, alloc: &AllocConfig, max_degree: usize) -> (Register, VisitOrder, bool) {
    let num_registers = self
      .num_registers
      .or(alloc.num_registers)
      .unwrap_or(max_degree as Register + 1);
    let order = self.order.unwrap_or(alloc.order);
    (num_registers, order, self.check || alloc.check)
  }
}

fn expect_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String> {
  args
    .next()
    .ok_or_else(|| anyhow!("Expected a value after {}", flag))
}

/// Parses command line input (without the program name) into a configuration.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Config> {
  let mut args = args.into_iter();
  let mut config = Config::default();
  while let Some(arg) = args.next() {
    match arg.as_str() {
      "-v" | "--verbose" => config.verbose = true,
      "--check" => config.check = true,
      "-k" | "--registers" => {
        let value = expect_value(&mut args, &arg)?;
        let k = value
          .parse::<Register>()
          .with_context(|| format!("Invalid register count : {}", value))?;
        config.num_registers = Some(k);
      }
      "-o" | "--order" => {
        let value = expect_value(&mut args, &arg)?;
        let order =
          VisitOrder::from_str(&value).map_err(|_| anyhow!("Unknown visit order : {}", value))?;
        config.order = Some(order);
      }
      "-e" | "--emit" => {
        let value = expect_value(&mut args, &arg)?;
        config.emit =
          EmitTarget::from_str(&value).map_err(|_| anyhow!("Unknown emit type : {}", value))?;
      }
      "-c" | "--config" => {
        config.config_file = Some(PathBuf::from(expect_value(&mut args, &arg)?));
      }
      flag if flag.starts_with('-') => bail!("Unknown option : {}", flag),
      file => {
        if config.file.is_some() {
          bail!("Expected a single graph file, found another : {}", file);
        }
        config.file = Some(PathBuf::from(file));
      }
    };
  }

  if config.file.is_none() {
    bail!("Expected file input");
  }

  Ok(config)
}

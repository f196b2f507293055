//! Runtime configuration.
//!
//! Values come from the command line first, then the optional TOML file, then the
//! `MATCH3_ADAPTER_*` environment (server keys only), then built-in defaults.

use std::env::temp_dir;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::Level;

use match3::adapter::{BoardDefaults, ServerConfig, MAX_BOARD_DIM};
use match3::types::{Gem, DEFAULT_GEM_KINDS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_GEM_KINDS};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML file with default settings
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub board: BoardArgs,

    /// One of error, warn, info, debug, trace
    #[arg(long)]
    pub log_level: Option<String>,

    /// Where `play` writes its log (serve logs to stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Play on the terminal (default)
    Play,
    /// Serve the JSON line protocol over TCP
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BoardArgs {
    #[arg(long)]
    pub width: Option<usize>,
    #[arg(long)]
    pub height: Option<usize>,
    /// Number of gem kinds on the board (2-6)
    #[arg(long)]
    pub kinds: Option<usize>,
    /// Seed for the gem sequence; taken from the clock when omitted
    #[arg(long)]
    pub seed: Option<u32>,
    /// Only allow swapping orthogonal neighbours
    #[arg(long)]
    pub adjacent: bool,
}

/// Contents of the TOML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub kinds: Option<usize>,
    pub seed: Option<u32>,
    pub adjacent_only: Option<bool>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_line_bytes: Option<usize>,
}

pub fn parse_file<P: AsRef<Path>>(p: P) -> Result<FileConfig> {
    let p = p.as_ref();
    let s = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
    let config = toml::from_str(&s).with_context(|| format!("parsing {}", p.display()))?;
    Ok(config)
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub kinds: usize,
    pub seed: u32,
    pub adjacent_only: bool,
    pub log_level: Level,
    pub log_file: PathBuf,
    pub server: ServerConfig,
}

impl Config {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => parse_file(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file, ServerConfig::from_env())
    }

    fn merge(cli: &Cli, file: FileConfig, env: ServerConfig) -> Result<Self> {
        let width = cli.board.width.or(file.width).unwrap_or(DEFAULT_WIDTH);
        let height = cli.board.height.or(file.height).unwrap_or(DEFAULT_HEIGHT);
        if !(1..=MAX_BOARD_DIM).contains(&width) || !(1..=MAX_BOARD_DIM).contains(&height) {
            bail!(
                "board {}x{} is outside 1x1..{2}x{2}",
                width,
                height,
                MAX_BOARD_DIM
            );
        }
        let kinds = cli.board.kinds.or(file.kinds).unwrap_or(DEFAULT_GEM_KINDS);
        if !(MIN_GEM_KINDS..=Gem::ALL.len()).contains(&kinds) {
            bail!(
                "kinds must be between {} and {}",
                MIN_GEM_KINDS,
                Gem::ALL.len()
            );
        }
        let seed = cli.board.seed.or(file.seed).unwrap_or_else(clock_seed);
        let adjacent_only = cli.board.adjacent || file.adjacent_only.unwrap_or(false);

        let level_name = cli
            .log_level
            .as_deref()
            .or(file.log_level.as_deref())
            .unwrap_or("info");
        let log_level: Level = level_name
            .parse()
            .with_context(|| format!("unknown log level {:?}", level_name))?;
        let log_file = cli
            .log_file
            .clone()
            .or(file.log_file)
            .unwrap_or_else(|| temp_dir().join("match3.log"));

        let serve = match &cli.command {
            Some(Command::Serve(args)) => args.clone(),
            _ => ServeArgs::default(),
        };
        let server = ServerConfig {
            host: serve.host.or(file.server.host).unwrap_or(env.host),
            port: serve.port.or(file.server.port).unwrap_or(env.port),
            max_line_bytes: file.server.max_line_bytes.unwrap_or(env.max_line_bytes),
            board: BoardDefaults {
                width,
                height,
                kinds,
                seed,
                adjacent_only,
            },
        };

        Ok(Self {
            width,
            height,
            kinds,
            seed,
            adjacent_only,
            log_level,
            log_file,
            server,
        })
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

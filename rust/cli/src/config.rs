use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use adaptive_engine::player::STARTING_STACK;

/// Largest table the engine deals to; 10 players use 20 hole cards plus 5 board cards.
pub const MAX_PLAYERS: usize = 10;

pub const DEFAULT_WEIGHTS_PATH: &str = "adaptive_weights.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Seats at the table, humans included
    pub players: usize,
    /// Automated seats; the rest are human in `play`
    pub ai_players: usize,
    pub starting_stack: u32,
    pub starting_blind: u32,
    pub seed: Option<u64>,
    pub weights_path: PathBuf,
    pub max_hands: Option<u32>,
    pub log_filter: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub players: ValueSource,
    pub ai_players: ValueSource,
    pub starting_stack: ValueSource,
    pub starting_blind: ValueSource,
    pub seed: ValueSource,
    pub weights_path: ValueSource,
    pub max_hands: ValueSource,
    pub log_filter: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            players: ValueSource::Default,
            ai_players: ValueSource::Default,
            starting_stack: ValueSource::Default,
            starting_blind: ValueSource::Default,
            seed: ValueSource::Default,
            weights_path: ValueSource::Default,
            max_hands: ValueSource::Default,
            log_filter: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: 4,
            ai_players: 3,
            starting_stack: STARTING_STACK,
            starting_blind: 20,
            seed: None,
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            max_hands: None,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Defaults, then the TOML file named by `ADAPTIVE_CONFIG`, then the
/// `ADAPTIVE_*` environment overrides. Empty variables are ignored.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("ADAPTIVE_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        f.apply(&mut cfg, &mut sources);
    }

    if let Ok(seed) = std::env::var("ADAPTIVE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(stack) = std::env::var("ADAPTIVE_STACK")
        && !stack.is_empty()
    {
        cfg.starting_stack = stack
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting stack".into()))?;
        sources.starting_stack = ValueSource::Env;
    }
    if let Ok(blind) = std::env::var("ADAPTIVE_BLIND")
        && !blind.is_empty()
    {
        cfg.starting_blind = blind
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid starting blind".into()))?;
        sources.starting_blind = ValueSource::Env;
    }
    if let Ok(path) = std::env::var("ADAPTIVE_WEIGHTS")
        && !path.is_empty()
    {
        cfg.weights_path = PathBuf::from(path);
        sources.weights_path = ValueSource::Env;
    }
    if let Ok(max) = std::env::var("ADAPTIVE_MAX_HANDS")
        && !max.is_empty()
    {
        cfg.max_hands = Some(
            max.parse()
                .map_err(|_| ConfigError::Invalid("Invalid max hands".into()))?,
        );
        sources.max_hands = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    players: Option<usize>,
    #[serde(default)]
    ai_players: Option<usize>,
    #[serde(default)]
    starting_stack: Option<u32>,
    #[serde(default)]
    starting_blind: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    weights_path: Option<PathBuf>,
    #[serde(default)]
    max_hands: Option<u32>,
    #[serde(default)]
    log_filter: Option<String>,
}

impl FileConfig {
    fn apply(self, cfg: &mut Config, sources: &mut ConfigSources) {
        if let Some(v) = self.players {
            cfg.players = v;
            sources.players = ValueSource::File;
        }
        if let Some(v) = self.ai_players {
            cfg.ai_players = v;
            sources.ai_players = ValueSource::File;
        }
        if let Some(v) = self.starting_stack {
            cfg.starting_stack = v;
            sources.starting_stack = ValueSource::File;
        }
        if let Some(v) = self.starting_blind {
            cfg.starting_blind = v;
            sources.starting_blind = ValueSource::File;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = self.weights_path {
            cfg.weights_path = v;
            sources.weights_path = ValueSource::File;
        }
        if let Some(v) = self.max_hands {
            cfg.max_hands = Some(v);
            sources.max_hands = ValueSource::File;
        }
        if let Some(v) = self.log_filter {
            cfg.log_filter = v;
            sources.log_filter = ValueSource::File;
        }
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(2..=MAX_PLAYERS).contains(&cfg.players) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: players must be between 2 and {}",
            MAX_PLAYERS
        )));
    }
    if cfg.ai_players > cfg.players {
        return Err(ConfigError::Invalid(
            "Invalid configuration: ai_players must not exceed players".into(),
        ));
    }
    if cfg.starting_stack == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_stack must be >0".into(),
        ));
    }
    if cfg.starting_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_blind must be >0".into(),
        ));
    }
    if cfg.players as u64 * u64::from(cfg.starting_stack) > u64::from(u32::MAX) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: {} players with starting_stack {} exceed {} chips in play",
            cfg.players,
            cfg.starting_stack,
            u32::MAX
        )));
    }
    if cfg.max_hands == Some(0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_hands must be >0".into(),
        ));
    }
    Ok(())
}

//! Configuration system for CycleForge.
//!
//! Load solver configuration from TOML or YAML to choose the seeder, the
//! local-search moves and neighborhood, and an optional metaheuristic
//! wrapper without code changes. Configuration is read once, at
//! construction time.
//!
//! # Examples
//!
//! ```
//! use cycleforge_config::{IntraMoveKind, NeighborhoodKind, SearchStrategy, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [local_search]
//!     intra_move = "edge-swap"
//!     strategy = "steepest"
//!     move_memory = true
//!
//!     [local_search.neighborhood]
//!     kind = "candidate"
//!     candidate_count = 10
//!
//!     [seeder]
//!     type = "regret"
//!     greed_weight = 1.0
//!     regret_weight = 1.0
//! "#).unwrap();
//!
//! assert_eq!(config.local_search.intra_move, IntraMoveKind::EdgeSwap);
//! assert_eq!(config.local_search.strategy, SearchStrategy::Steepest);
//! assert_eq!(config.local_search.neighborhood.kind, NeighborhoodKind::Candidate);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use cycleforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("cycleforge.toml").unwrap_or_default();
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use cycleforge_core::CycleForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for CycleForgeError {
    fn from(err: ConfigError) -> Self {
        CycleForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Algorithm producing the initial tour.
    #[serde(default)]
    pub seeder: SeederConfig,

    /// Local search refining the seed tour.
    #[serde(default)]
    pub local_search: LocalSearchConfig,

    /// Optional metaheuristic wrapped around seeding and local search.
    #[serde(default)]
    pub meta: Option<MetaConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_seeder(mut self, seeder: SeederConfig) -> Self {
        self.seeder = seeder;
        self
    }

    pub fn with_local_search(mut self, local_search: LocalSearchConfig) -> Self {
        self.local_search = local_search;
        self
    }

    pub fn with_meta(mut self, meta: MetaConfig) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Checks option combinations that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.local_search.validate()?;
        self.seeder.validate()?;
        if let Some(meta) = &self.meta {
            meta.validate()?;
        }
        Ok(())
    }
}

/// Kind of intra-tour move explored next to node replacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntraMoveKind {
    /// 2-opt: reverse a tour segment.
    #[default]
    EdgeSwap,

    /// Exchange two tour positions.
    NodeSwap,
}

/// How an improving move is chosen within one neighborhood pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Apply the first improving move in generation order.
    Greedy,

    /// Scan the whole pass and apply the best move.
    #[default]
    Steepest,
}

/// Which moves a neighborhood pass enumerates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NeighborhoodKind {
    /// Every valid move, in seeded random order.
    #[default]
    Full,

    /// Only moves creating a candidate edge.
    Candidate,
}

macro_rules! kebab_enum_str {
    ($ty:ty, $what:literal, $($variant:path => $text:literal),+ $(,)?) => {
        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($variant),)+
                    other => Err(ConfigError::Invalid(format!(
                        concat!("unknown ", $what, " `{}`"),
                        other
                    ))),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let text = match self {
                    $($variant => $text,)+
                };
                f.write_str(text)
            }
        }
    };
}

kebab_enum_str!(IntraMoveKind, "intra move kind",
    IntraMoveKind::EdgeSwap => "edge-swap",
    IntraMoveKind::NodeSwap => "node-swap",
);

kebab_enum_str!(SearchStrategy, "search strategy",
    SearchStrategy::Greedy => "greedy",
    SearchStrategy::Steepest => "steepest",
);

kebab_enum_str!(NeighborhoodKind, "neighborhood kind",
    NeighborhoodKind::Full => "full",
    NeighborhoodKind::Candidate => "candidate",
);

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    #[serde(default)]
    pub intra_move: IntraMoveKind,

    #[serde(default)]
    pub strategy: SearchStrategy,

    #[serde(default)]
    pub neighborhood: NeighborhoodConfig,

    /// Remember improving moves between rounds.
    ///
    /// Requires `edge-swap` moves and the `steepest` strategy.
    #[serde(default)]
    pub move_memory: bool,
}

impl LocalSearchConfig {
    pub fn with_intra_move(mut self, intra_move: IntraMoveKind) -> Self {
        self.intra_move = intra_move;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_neighborhood(mut self, neighborhood: NeighborhoodConfig) -> Self {
        self.neighborhood = neighborhood;
        self
    }

    pub fn with_move_memory(mut self, move_memory: bool) -> Self {
        self.move_memory = move_memory;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.neighborhood.candidate_count == 0 {
            return Err(ConfigError::Invalid(
                "candidate_count must be at least 1".to_string(),
            ));
        }
        if self.move_memory && self.intra_move != IntraMoveKind::EdgeSwap {
            return Err(ConfigError::Invalid(format!(
                "move memory requires `edge-swap` intra moves, found `{}`",
                self.intra_move
            )));
        }
        if self.move_memory && self.strategy != SearchStrategy::Steepest {
            return Err(ConfigError::Invalid(format!(
                "move memory requires the `steepest` strategy, found `{}`",
                self.strategy
            )));
        }
        Ok(())
    }
}

/// Neighborhood configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct NeighborhoodConfig {
    #[serde(default)]
    pub kind: NeighborhoodKind,

    /// Number of nearest neighbours kept per node for candidate search.
    #[serde(default = "default_candidate_count")]
    pub candidate_count: usize,
}

fn default_candidate_count() -> usize {
    10
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            kind: NeighborhoodKind::default(),
            candidate_count: default_candidate_count(),
        }
    }
}

impl NeighborhoodConfig {
    pub fn full() -> Self {
        Self::default()
    }

    pub fn candidate(candidate_count: usize) -> Self {
        Self {
            kind: NeighborhoodKind::Candidate,
            candidate_count,
        }
    }
}

/// `full` or `candidate(k)`, as shown in solver names and log events.
impl fmt::Display for NeighborhoodConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NeighborhoodKind::Full => write!(f, "{}", self.kind),
            NeighborhoodKind::Candidate => write!(f, "{}({})", self.kind, self.candidate_count),
        }
    }
}

/// Seeding algorithm configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeederConfig {
    /// Seeded random selection.
    #[default]
    Random,

    /// Nearest neighbour, appending at the path end.
    NearestNeighborEnd,

    /// Nearest neighbour, inserting at the cheapest path position.
    NearestNeighborAny,

    /// Greedy cycle by cheapest insertion.
    GreedyCycle,

    /// Weighted 2-regret greedy cycle.
    Regret(RegretConfig),
}

impl SeederConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SeederConfig::Regret(regret) = self {
            if regret.greed_weight < 0.0 || regret.regret_weight < 0.0 {
                return Err(ConfigError::Invalid(
                    "regret weights must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Weights of the regret heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegretConfig {
    #[serde(default = "default_weight")]
    pub greed_weight: f64,

    #[serde(default = "default_weight")]
    pub regret_weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl Default for RegretConfig {
    fn default() -> Self {
        Self {
            greed_weight: default_weight(),
            regret_weight: default_weight(),
        }
    }
}

/// Metaheuristic wrapper configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetaConfig {
    /// Repeat seeding plus local search and keep the best tour.
    MultiStart(MultiStartConfig),

    /// Perturb and re-optimize until a time limit.
    Iterated(IteratedConfig),
}

impl MetaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            MetaConfig::MultiStart(c) if c.iterations == 0 => Err(ConfigError::Invalid(
                "multi_start iterations must be at least 1".to_string(),
            )),
            MetaConfig::Iterated(c) if c.time_limit_ms == 0 => Err(ConfigError::Invalid(
                "iterated time_limit_ms must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Multi-start configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MultiStartConfig {
    pub iterations: usize,
}

/// Iterated local search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct IteratedConfig {
    pub time_limit_ms: u64,
}

impl IteratedConfig {
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }
}

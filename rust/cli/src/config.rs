//! Layered configuration: defaults, then a TOML file named by
//! `BJCOACH_CONFIG`, then `BJCOACH_*` environment variables. Command-line
//! flags are applied on top by the commands themselves.

use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "BJCOACH_CONFIG";
pub const SEED_ENV: &str = "BJCOACH_SEED";
pub const ROUNDS_ENV: &str = "BJCOACH_ROUNDS";
pub const LOG_ENV: &str = "BJCOACH_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Rounds per `play` session
    pub rounds: u32,
    /// Shoe seed; a random one is drawn when unset
    pub seed: Option<u64>,
    /// JSONL file receiving one record per round
    pub log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rounds: 1,
            seed: None,
            log: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub rounds: ValueSource,
    pub seed: ValueSource,
    pub log: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            rounds: ValueSource::Default,
            seed: ValueSource::Default,
            log: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(&|key| std::env::var(key).ok())
}

/// Resolves configuration with `lookup` standing in for the environment.
pub fn load_from(lookup: &dyn Fn(&str) -> Option<String>) -> Result<ConfigResolved, ConfigError> {
    let env = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.rounds {
            cfg.rounds = v;
            sources.rounds = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.log {
            cfg.log = Some(v);
            sources.log = ValueSource::File;
        }
    }

    if let Some(seed) = env(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed '{}'", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(rounds) = env(ROUNDS_ENV) {
        cfg.rounds = rounds
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid rounds '{}'", rounds)))?;
        sources.rounds = ValueSource::Env;
    }
    if let Some(log) = env(LOG_ENV) {
        cfg.log = Some(log);
        sources.log = ValueSource::Env;
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
    rounds: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    log: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.rounds == 0 {
        return Err(ConfigError::Invalid("rounds must be >=1".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_in(vars: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let resolved = load_from(&|_| None).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.rounds, ValueSource::Default);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert_eq!(resolved.sources.log, ValueSource::Default);
    }

    #[test]
    fn test_file_values_are_tracked() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rounds = 5\nseed = 42\nlog = \"rounds.jsonl\"").unwrap();
        let vars = HashMap::from([(CONFIG_ENV, file.path().display().to_string())]);

        let resolved = load_from(&lookup_in(vars)).unwrap();
        assert_eq!(resolved.config.rounds, 5);
        assert_eq!(resolved.config.seed, Some(42));
        assert_eq!(resolved.config.log.as_deref(), Some("rounds.jsonl"));
        assert_eq!(resolved.sources.rounds, ValueSource::File);
        assert_eq!(resolved.sources.seed, ValueSource::File);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rounds = 5\nseed = 42").unwrap();
        let vars = HashMap::from([
            (CONFIG_ENV, file.path().display().to_string()),
            (SEED_ENV, "7".to_string()),
        ]);

        let resolved = load_from(&lookup_in(vars)).unwrap();
        assert_eq!(resolved.config.seed, Some(7));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.rounds, 5);
        assert_eq!(resolved.sources.rounds, ValueSource::File);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let vars = HashMap::from([(SEED_ENV, String::new()), (CONFIG_ENV, String::new())]);
        let resolved = load_from(&lookup_in(vars)).unwrap();
        assert_eq!(resolved.config.seed, None);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let vars = HashMap::from([(ROUNDS_ENV, "many".to_string())]);
        let e = load_from(&lookup_in(vars)).unwrap_err();
        assert!(matches!(e, ConfigError::Invalid(ref m) if m.contains("rounds")));
    }

    #[test]
    fn test_zero_rounds_fails_validation() {
        let vars = HashMap::from([(ROUNDS_ENV, "0".to_string())]);
        let e = load_from(&lookup_in(vars)).unwrap_err();
        assert!(e.to_string().contains("rounds must be >=1"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml").display().to_string();
        let vars = HashMap::from([(CONFIG_ENV, missing)]);
        assert!(matches!(
            load_from(&lookup_in(vars)),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rounds = \"three\"").unwrap();
        let vars = HashMap::from([(CONFIG_ENV, file.path().display().to_string())]);
        assert!(matches!(
            load_from(&lookup_in(vars)),
            Err(ConfigError::Parse(_))
        ));
    }
}

use hilo_engine::player::STARTING_CHIPS;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub starting_chips: u32,
    pub seed: Option<u64>,
    /// Print the running count under the table after every action
    pub show_count: bool,
    /// JSONL file receiving one record per resolved round
    pub history: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub starting_chips: ValueSource,
    pub seed: ValueSource,
    pub show_count: ValueSource,
    pub history: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            starting_chips: ValueSource::Default,
            seed: ValueSource::Default,
            show_count: ValueSource::Default,
            history: ValueSource::Default,
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
            starting_chips: STARTING_CHIPS,
            seed: None,
            show_count: false,
            history: None,
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Resolves defaults, then the TOML file named by `HILO_CONFIG`, then
/// `HILO_*` variables, reading variables through `env`. Empty variables are
/// ignored.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| env(key).filter(|v| !v.is_empty());
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var("HILO_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.show_count {
            cfg.show_count = v;
            sources.show_count = ValueSource::File;
        }
        if let Some(v) = f.history {
            cfg.history = Some(v);
            sources.history = ValueSource::File;
        }
    }

    if let Some(chips) = var("HILO_CHIPS") {
        cfg.starting_chips = chips
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid chips".into()))?;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(seed) = var("HILO_SEED") {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(show) = var("HILO_SHOW_COUNT") {
        cfg.show_count =
            parse_bool(&show).ok_or_else(|| ConfigError::Invalid("Invalid show_count".into()))?;
        sources.show_count = ValueSource::Env;
    }
    if let Some(path) = var("HILO_HISTORY") {
        cfg.history = Some(path);
        sources.history = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    show_count: Option<bool>,
    #[serde(default)]
    history: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.starting_chips == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_chips must be >0".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let resolved = load_from(env_of(&[])).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.config.starting_chips, 1000);
        assert_eq!(resolved.sources.starting_chips, ValueSource::Default);
        assert_eq!(resolved.sources.history, ValueSource::Default);
    }

    #[test]
    fn test_file_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hilo.toml");
        fs::write(
            &path,
            "starting_chips = 500\nseed = 7\nshow_count = true\n",
        )
        .unwrap();
        let path_str = path.to_str().unwrap();

        let resolved = load_from(env_of(&[
            ("HILO_CONFIG", path_str),
            ("HILO_SEED", "99"),
        ]))
        .unwrap();
        assert_eq!(resolved.config.starting_chips, 500);
        assert_eq!(resolved.sources.starting_chips, ValueSource::File);
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert!(resolved.config.show_count);
        assert_eq!(resolved.sources.show_count, ValueSource::File);
    }

    #[test]
    fn test_env_values_are_parsed() {
        let resolved = load_from(env_of(&[
            ("HILO_CHIPS", "250"),
            ("HILO_SHOW_COUNT", "on"),
            ("HILO_HISTORY", "data/rounds.jsonl"),
        ]))
        .unwrap();
        assert_eq!(resolved.config.starting_chips, 250);
        assert!(resolved.config.show_count);
        assert_eq!(resolved.config.history.as_deref(), Some("data/rounds.jsonl"));
        assert_eq!(resolved.sources.history, ValueSource::Env);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let resolved = load_from(env_of(&[("HILO_SEED", ""), ("HILO_CHIPS", "")])).unwrap();
        assert_eq!(resolved.config.seed, None);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    fn test_zero_chips_rejected() {
        let err = load_from(env_of(&[("HILO_CHIPS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("starting_chips"));
    }

    #[test]
    fn test_malformed_env_rejected() {
        assert!(load_from(env_of(&[("HILO_SEED", "abc")])).is_err());
        assert!(load_from(env_of(&[("HILO_SHOW_COUNT", "maybe")])).is_err());
        assert!(load_from(env_of(&[("HILO_CHIPS", "-5")])).is_err());
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "starting_chips = \"lots\"\n").unwrap();
        let err = load_from(env_of(&[("HILO_CONFIG", path.to_str().unwrap())])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("nah"), None);
    }
}

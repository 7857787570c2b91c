use {
    log::LevelFilter,
    serde::Deserialize,
    std::{path::Path, str::FromStr},
    thiserror::Error,
};

pub const DEFAULT_SEAT_NAME: &str = "default";
pub const DEFAULT_REPEAT_RATE: i32 = 25;
pub const DEFAULT_REPEAT_DELAY: i32 = 600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {0}")]
    Read(String, #[source] std::io::Error),
    #[error("Could not parse the config")]
    Parse(#[source] toml::de::Error),
    #[error("Unknown log level `{0}`")]
    UnknownLogLevel(String),
    #[error("`{0}` must not be negative")]
    Negative(&'static str),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CoreConfig {
    pub log_level: Option<String>,
    pub shm: ShmConfig,
    pub seat: SeatConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ShmConfig {
    /// Upper bound for the size of a single pool.
    pub max_pool_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SeatConfig {
    pub name: Option<String>,
    /// XKB keymap in text form.
    pub keymap: Option<String>,
    pub repeat_rate: Option<i32>,
    pub repeat_delay: Option<i32>,
}

impl CoreConfig {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => return Err(ConfigError::Read(path.display().to_string(), e)),
        };
        Self::parse(&s)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        if self.seat.repeat_rate.is_some_and(|r| r < 0) {
            return Err(ConfigError::Negative("seat.repeat-rate"));
        }
        if self.seat.repeat_delay.is_some_and(|r| r < 0) {
            return Err(ConfigError::Negative("seat.repeat-delay"));
        }
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            None => Ok(LevelFilter::Info),
            Some(l) => {
                LevelFilter::from_str(l).map_err(|_| ConfigError::UnknownLogLevel(l.clone()))
            }
        }
    }
}

impl ShmConfig {
    pub fn allows(&self, size: usize) -> bool {
        match self.max_pool_size {
            Some(max) => size as u64 <= max,
            None => true,
        }
    }
}

impl SeatConfig {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SEAT_NAME)
    }

    pub fn repeat_rate(&self) -> i32 {
        self.repeat_rate.unwrap_or(DEFAULT_REPEAT_RATE)
    }

    pub fn repeat_delay(&self) -> i32 {
        self.repeat_delay.unwrap_or(DEFAULT_REPEAT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        let config = CoreConfig::parse("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
        assert_eq!(config.seat.name(), "default");
        assert_eq!(config.seat.repeat_rate(), 25);
        assert_eq!(config.seat.repeat_delay(), 600);
        assert!(config.shm.allows(usize::MAX));
    }

    #[test]
    fn full() {
        let config = CoreConfig::parse(
            r#"
                log-level = "debug"

                [shm]
                max-pool-size = 4096

                [seat]
                name = "seat0"
                keymap = "xkb_keymap {}"
                repeat-rate = 40
                repeat-delay = 200
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
        assert!(config.shm.allows(4096));
        assert!(!config.shm.allows(4097));
        assert_eq!(config.seat.name(), "seat0");
        assert_eq!(config.seat.keymap.as_deref(), Some("xkb_keymap {}"));
        assert_eq!(config.seat.repeat_rate(), 40);
        assert_eq!(config.seat.repeat_delay(), 200);
    }

    #[test]
    fn errors() {
        assert!(matches!(
            CoreConfig::parse("log-level = \"loud\""),
            Err(ConfigError::UnknownLogLevel(_))
        ));
        assert!(matches!(
            CoreConfig::parse("unknown = 1"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CoreConfig::parse("[seat]\nrepeat-rate = -1"),
            Err(ConfigError::Negative(_))
        ));
        assert!(matches!(
            CoreConfig::load("/nonexistent/wlcore.toml"),
            Err(ConfigError::Read(..))
        ));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::cycle::CycleProfile;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub generator: Generator,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Profile {
    pub cycle_length: Option<u32>,
    pub period_length: Option<u32>,
}

impl Profile {
    /// The cycle profile, or `None` until both lengths are known.
    pub fn cycle_profile(&self) -> Option<CycleProfile> {
        match (self.cycle_length, self.period_length) {
            (Some(cycle_length), Some(period_length)) => Some(CycleProfile {
                cycle_length,
                period_length,
            }),
            _ => None,
        }
    }
}

/// External text generator: a program that reads a prompt on stdin and
/// writes its answer to stdout. Empty means disabled.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Generator {
    #[serde(default)]
    pub command: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Apply a `config set` key. Lengths must be positive.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "cycle_length" => self.profile.cycle_length = Some(parse_days(key, value)?),
            "period_length" => self.profile.period_length = Some(parse_days(key, value)?),
            "generator.command" => {
                self.generator.command = value.split_whitespace().map(String::from).collect();
            }
            "logging.filter" => self.logging.filter = value.to_string(),
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("CYCLEPREDICT_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cyclepredict")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }
}

/// Upper bound accepted for cycle and period lengths.
pub const MAX_LENGTH_DAYS: u32 = 365;

fn parse_days(key: &str, value: &str) -> anyhow::Result<u32> {
    let days: u32 = value
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key} must be a whole number of days"))?;
    if days == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    if days > MAX_LENGTH_DAYS {
        anyhow::bail!("{key} must be at most {MAX_LENGTH_DAYS} days");
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_requires_both_lengths() {
        let mut p = Profile::default();
        assert!(p.cycle_profile().is_none());
        p.cycle_length = Some(30);
        assert!(p.cycle_profile().is_none());
        p.period_length = Some(4);
        assert_eq!(
            p.cycle_profile(),
            Some(CycleProfile {
                cycle_length: 30,
                period_length: 4
            })
        );
    }

    #[test]
    fn set_rejects_out_of_range_and_unknown_keys() {
        let mut c = Config::default();
        assert!(c.set("cycle_length", "0").is_err());
        assert!(c.set("cycle_length", "abc").is_err());
        assert!(c.set("cycle_length", "4000000000").is_err());
        assert!(c.set("period_length", "366").is_err());
        c.set("cycle_length", "365").unwrap();
        assert_eq!(c.profile.cycle_length, Some(365));
        assert!(c.set("height", "170").is_err());
        c.set("generator.command", "ollama run llama3").unwrap();
        assert_eq!(c.generator.command, vec!["ollama", "run", "llama3"]);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.logging.filter, "warn");
        assert!(c.generator.command.is_empty());
        assert!(c.profile.cycle_length.is_none());
    }
}

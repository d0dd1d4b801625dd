//! The defaults table consulted by the defaulter.
//!
//! The table is built once at startup, from the built-in constants or from a
//! YAML document with optional environment overrides, validated, and then
//! shared read-only.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{defaults, env};
use crate::error::{Error, Result};

/// Values written into a KafkaChannel spec when the caller leaves them unset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChannelDefaults {
    #[serde(default = "num_partitions")]
    pub num_partitions: i32,

    #[serde(default = "replication_factor")]
    pub replication_factor: i32,

    /// ISO-8601 duration.
    #[serde(default = "retention_duration")]
    pub retention_duration: String,
}

fn num_partitions() -> i32 {
    defaults::NUM_PARTITIONS
}

fn replication_factor() -> i32 {
    defaults::REPLICATION_FACTOR
}

fn retention_duration() -> String {
    defaults::RETENTION_DURATION.to_string()
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ChannelDefaults {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        Self {
            num_partitions: num_partitions(),
            replication_factor: replication_factor(),
            retention_duration: retention_duration(),
        }
    }

    /// Parse a YAML document. Keys that are absent keep their built-in value.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to null, which means "no overrides".
        let parsed: Option<Self> = serde_yaml::from_str(yaml)?;
        let table = parsed.unwrap_or_default();
        table.validate()?;
        Ok(table)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_yaml(&contents)?;
        info!(
            path = %path.display(),
            num_partitions = table.num_partitions,
            replication_factor = table.replication_factor,
            retention_duration = %table.retention_duration,
            "Loaded channel defaults"
        );
        Ok(table)
    }

    /// Apply `KAFKA_CHANNEL_DEFAULT_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(env::NUM_PARTITIONS) {
            self.num_partitions = parse_env(env::NUM_PARTITIONS, &value)?;
        }
        if let Some(value) = lookup(env::REPLICATION_FACTOR) {
            self.replication_factor = parse_env(env::REPLICATION_FACTOR, &value)?;
        }
        if let Some(value) = lookup(env::RETENTION_DURATION) {
            self.retention_duration = value.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject tables that would themselves leave a channel unset or nonsensical.
    pub fn validate(&self) -> Result<()> {
        if self.num_partitions <= 0 {
            return Err(Error::InvalidDefault {
                field: "numPartitions",
                message: format!("must be positive, got {}", self.num_partitions),
            });
        }
        if self.replication_factor <= 0 {
            return Err(Error::InvalidDefault {
                field: "replicationFactor",
                message: format!("must be positive, got {}", self.replication_factor),
            });
        }
        if !is_iso8601_duration(&self.retention_duration) {
            return Err(Error::InvalidDefault {
                field: "retentionDuration",
                message: format!(
                    "expected an ISO-8601 duration such as PT168H, got {:?}",
                    self.retention_duration
                ),
            });
        }
        Ok(())
    }
}

fn parse_env(name: &'static str, value: &str) -> Result<i32> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| Error::InvalidEnv {
        name,
        value: value.to_string(),
        message: e.to_string(),
    })
}

/// Shape check for `PnYnMnWnDTnHnMnS`. Only the last component may carry a
/// fraction, and at least one component must be present.
fn is_iso8601_duration(s: &str) -> bool {
    let Some(rest) = s.strip_prefix('P') else {
        return false;
    };

    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => {
            if time.is_empty() {
                return false;
            }
            (date, Some(time))
        }
        None => (rest, None),
    };

    let mut components = 0;
    let mut fraction_seen = false;
    for (part, units) in [(Some(date), "YMWD"), (time, "HMS")] {
        let Some(part) = part else { continue };
        let mut digits = String::new();
        let mut allowed = units;
        for c in part.chars() {
            if c.is_ascii_digit() || c == '.' || c == ',' {
                digits.push(c);
                continue;
            }
            let Some(pos) = allowed.find(c) else {
                return false;
            };
            if digits.is_empty() || fraction_seen {
                return false;
            }
            if digits.contains(['.', ',']) {
                fraction_seen = true;
                if digits.replace(',', ".").parse::<f64>().is_err() {
                    return false;
                }
            }
            allowed = &allowed[pos + 1..];
            digits.clear();
            components += 1;
        }
        if !digits.is_empty() {
            return false;
        }
    }
    components > 0
}

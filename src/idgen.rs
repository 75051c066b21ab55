use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

/// Length of keys produced by [`Algorithm::Alphanumeric`]
pub const ALPHANUMERIC_LEN: usize = 16;

/// Errors raised by a random id generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Clock error: {0}")]
    Clock(String),

    #[error("Unsupported random key algorithm = {0}.")]
    UnknownAlgorithm(String),

    /// For failures of caller supplied [`IdGenerator`] implementations
    #[error("Generator error: {0}")]
    Other(String),
}

/// Source of the random key segment used by `random_key`
pub trait IdGenerator: Debug + Send + Sync {
    /// Produce one fresh id
    fn generate(&self) -> Result<String, GenerationError>;
}

/// Algorithm options for random key generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Hyphenated random UUID
    #[default]
    UuidV4,
    /// Random UUID without hyphens
    UuidV4Simple,
    /// 128 bits straight from the OS RNG, lowercase hex
    Hex,
    /// Fixed length alphanumeric string
    Alphanumeric,
    /// Nanosecond timestamp followed by a random tail, sorts by creation time
    Timestamp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::UuidV4,
        Algorithm::UuidV4Simple,
        Algorithm::Hex,
        Algorithm::Alphanumeric,
        Algorithm::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::UuidV4 => "uuidv4",
            Algorithm::UuidV4Simple => "uuidv4simple",
            Algorithm::Hex => "hex",
            Algorithm::Alphanumeric => "alphanumeric",
            Algorithm::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uuidv4" | "uuid" => Ok(Algorithm::UuidV4),
            "uuidv4simple" => Ok(Algorithm::UuidV4Simple),
            "hex" => Ok(Algorithm::Hex),
            "alphanumeric" => Ok(Algorithm::Alphanumeric),
            "timestamp" => Ok(Algorithm::Timestamp),
            _ => Err(GenerationError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl IdGenerator for Algorithm {
    fn generate(&self) -> Result<String, GenerationError> {
        trace!(algorithm = %self, "generating random key");
        match self {
            Algorithm::UuidV4 => Ok(Uuid::new_v4().hyphenated().to_string()),
            Algorithm::UuidV4Simple => Ok(Uuid::new_v4().simple().to_string()),
            Algorithm::Hex => {
                let mut raw = [0u8; 16];
                fill_os_random(&mut raw)?;
                Ok(to_hex(&raw))
            }
            Algorithm::Alphanumeric => Ok(rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(ALPHANUMERIC_LEN)
                .map(char::from)
                .collect()),
            Algorithm::Timestamp => {
                let nanos = Utc::now()
                    .timestamp_nanos_opt()
                    .ok_or_else(|| GenerationError::Clock("timestamp out of range".to_string()))?;
                let nanos = u64::try_from(nanos).map_err(|_| {
                    GenerationError::Clock(format!("timestamp before epoch: {}", nanos))
                })?;

                let mut tail = [0u8; 4];
                fill_os_random(&mut tail)?;
                Ok(format!("{:016x}{}", nanos, to_hex(&tail)))
            }
        }
    }
}

/// Generate one id with the given algorithm
pub fn next(algorithm: Algorithm) -> Result<String, GenerationError> {
    algorithm.generate()
}

fn fill_os_random(buf: &mut [u8]) -> Result<(), GenerationError> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| GenerationError::Entropy(e.to_string()))
}

fn to_hex(raw: &[u8]) -> String {
    raw.iter().map(|b| format!("{:02x}", b)).collect()
}

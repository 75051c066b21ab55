use crate::errors::Result;
use crate::idgen::Algorithm;
use serde::{Deserialize, Serialize};

/// Default separator between namespace segments
pub const DEFAULT_NAMESPACE_DELIMITER: &str = "::";

/// Default separator between the namespace and the key
pub const DEFAULT_KEY_DELIMITER: &str = "::";

/// Resolved configuration for one encode or decode call
///
/// Any subset of fields may be given in a configuration document:
///
/// ```
/// let opts = nskey::Options::from_json(r#"{"prefix": "/", "key_delimiter": "/"}"#).unwrap();
/// assert_eq!(opts.namespace_delimiter, "::");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Written verbatim in front of the first segment, no delimiter is inserted
    pub prefix: String,

    /// Separator between namespace segments
    pub namespace_delimiter: String,

    /// Separator between the namespace and the key
    pub key_delimiter: String,

    /// Algorithm used to produce the key in `random_key`
    pub random_key_algorithm: Algorithm,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            namespace_delimiter: DEFAULT_NAMESPACE_DELIMITER.to_string(),
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            random_key_algorithm: Algorithm::default(),
        }
    }
}

impl Options {
    /// `a::b::c::key`
    pub fn redis_style() -> Self {
        Overrides::new().redis_style().apply(&Options::default())
    }

    /// `/a/b/c/key`
    pub fn etcd_style() -> Self {
        Overrides::new().etcd_style().apply(&Options::default())
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn delimiters_match(&self) -> bool {
        self.namespace_delimiter == self.key_delimiter
    }
}

/// Partial configuration layered on top of a base [`Options`]
///
/// Setters may be chained; a later call overwrites an earlier one for the
/// same field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    prefix: Option<String>,
    namespace_delimiter: Option<String>,
    key_delimiter: Option<String>,
    random_key_algorithm: Option<Algorithm>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn namespace_delimiter(mut self, delimiter: &str) -> Self {
        self.namespace_delimiter = Some(delimiter.to_string());
        self
    }

    pub fn key_delimiter(mut self, delimiter: &str) -> Self {
        self.key_delimiter = Some(delimiter.to_string());
        self
    }

    pub fn random_key_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.random_key_algorithm = Some(algorithm);
        self
    }

    /// Both delimiters `::`, empty prefix
    pub fn redis_style(self) -> Self {
        self.key_delimiter("::").namespace_delimiter("::").prefix("")
    }

    /// Both delimiters `/`, prefix `/`
    pub fn etcd_style(self) -> Self {
        self.key_delimiter("/").namespace_delimiter("/").prefix("/")
    }

    /// Fold `other` on top of `self`; fields set in `other` win
    pub fn merge(mut self, other: &Overrides) -> Self {
        if let Some(prefix) = &other.prefix {
            self.prefix = Some(prefix.clone());
        }
        if let Some(delimiter) = &other.namespace_delimiter {
            self.namespace_delimiter = Some(delimiter.clone());
        }
        if let Some(delimiter) = &other.key_delimiter {
            self.key_delimiter = Some(delimiter.clone());
        }
        if let Some(algorithm) = other.random_key_algorithm {
            self.random_key_algorithm = Some(algorithm);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.namespace_delimiter.is_none()
            && self.key_delimiter.is_none()
            && self.random_key_algorithm.is_none()
    }

    /// Return `base` with every field set here replaced
    pub fn apply(&self, base: &Options) -> Options {
        Options {
            prefix: self.prefix.clone().unwrap_or_else(|| base.prefix.clone()),
            namespace_delimiter: self
                .namespace_delimiter
                .clone()
                .unwrap_or_else(|| base.namespace_delimiter.clone()),
            key_delimiter: self
                .key_delimiter
                .clone()
                .unwrap_or_else(|| base.key_delimiter.clone()),
            random_key_algorithm: self
                .random_key_algorithm
                .unwrap_or(base.random_key_algorithm),
        }
    }
}

impl From<Options> for Overrides {
    fn from(opts: Options) -> Self {
        Self {
            prefix: Some(opts.prefix),
            namespace_delimiter: Some(opts.namespace_delimiter),
            key_delimiter: Some(opts.key_delimiter),
            random_key_algorithm: Some(opts.random_key_algorithm),
        }
    }
}

pub fn with_prefix(prefix: &str) -> Overrides {
    Overrides::new().prefix(prefix)
}

pub fn with_namespace_delimiter(delimiter: &str) -> Overrides {
    Overrides::new().namespace_delimiter(delimiter)
}

pub fn with_key_delimiter(delimiter: &str) -> Overrides {
    Overrides::new().key_delimiter(delimiter)
}

pub fn with_random_key_algorithm(algorithm: Algorithm) -> Overrides {
    Overrides::new().random_key_algorithm(algorithm)
}

pub fn with_redis_style() -> Overrides {
    Overrides::new().redis_style()
}

pub fn with_etcd_style() -> Overrides {
    Overrides::new().etcd_style()
}

use crate::defaults;
use crate::errors::{NamespaceError, Result};
use crate::idgen::IdGenerator;
use crate::options::{Options, Overrides};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Ordered namespace segments scoping a key
///
/// An empty namespace is valid. Segments are not validated, so a segment
/// holding a delimiter will not survive an encode/decode round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// New namespace with `segment` appended
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Namespace string under the current defaults plus `overrides`
    pub fn to_string_with(&self, overrides: &Overrides) -> String {
        Codec::from_overrides(overrides).namespace_string(self)
    }

    /// Full name of `key` under the current defaults plus `overrides`
    pub fn full_name(&self, key: &str, overrides: &Overrides) -> String {
        Codec::from_overrides(overrides).full_name(self, key)
    }

    /// Full name with a generated key under the current defaults plus `overrides`
    pub fn random_key(&self, overrides: &Overrides) -> Result<String> {
        Codec::from_overrides(overrides).random_key(self)
    }

    /// Split `full_name` under the current defaults plus `overrides`
    pub fn from_full_name(full_name: &str, overrides: &Overrides) -> Result<(Namespace, String)> {
        Codec::from_overrides(overrides).from_full_name(full_name)
    }
}

impl Deref for Namespace {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for Namespace {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for Namespace {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Namespace {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for Namespace {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<Vec<&str>> for Namespace {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Namespace {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.0.len() == N && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

/// Encoder/decoder bound to one resolved [`Options`]
///
/// Full names are laid out as `prefix + join(namespace, namespace_delimiter)
/// + key_delimiter + key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codec {
    opts: Options,
}

impl Codec {
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }

    /// Codec over a snapshot of the process-wide defaults
    pub fn with_defaults() -> Self {
        Self::new((*defaults::default_options()).clone())
    }

    /// Codec over a snapshot of the process-wide defaults plus `overrides`
    pub fn from_overrides(overrides: &Overrides) -> Self {
        Self::new(defaults::resolve(overrides))
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Prefix followed by the joined segments
    pub fn namespace_string(&self, namespace: &Namespace) -> String {
        let joined = namespace.join(self.opts.namespace_delimiter.as_str());
        if self.opts.prefix.is_empty() {
            return joined;
        }
        let mut out = String::with_capacity(self.opts.prefix.len() + joined.len());
        out.push_str(&self.opts.prefix);
        out.push_str(&joined);
        out
    }

    /// The key delimiter is always written, even for an empty namespace
    pub fn full_name(&self, namespace: &Namespace, key: &str) -> String {
        let mut out = self.namespace_string(namespace);
        out.reserve(self.opts.key_delimiter.len() + key.len());
        out.push_str(&self.opts.key_delimiter);
        out.push_str(key);
        out
    }

    /// Full name with a key from the configured random key algorithm
    pub fn random_key(&self, namespace: &Namespace) -> Result<String> {
        self.random_key_with(namespace, &self.opts.random_key_algorithm)
    }

    pub fn random_key_with(
        &self,
        namespace: &Namespace,
        generator: &dyn IdGenerator,
    ) -> Result<String> {
        let key = generator.generate()?;
        Ok(self.full_name(namespace, &key))
    }

    /// Split a full name back into its namespace and key.
    ///
    /// With equal delimiters every token but the last is namespace. With
    /// distinct delimiters exactly one key delimiter must appear; more is
    /// rejected as [`NamespaceError::AmbiguousFormat`]. A name without any key
    /// delimiter yields [`NamespaceError::NoNamespace`] carrying the bare key.
    pub fn from_full_name(&self, full_name: &str) -> Result<(Namespace, String)> {
        let rest = if self.opts.prefix.is_empty() {
            full_name
        } else {
            full_name
                .strip_prefix(self.opts.prefix.as_str())
                .ok_or_else(|| NamespaceError::MissingPrefix {
                    prefix: self.opts.prefix.clone(),
                })?
        };

        let mut parts = split(rest, &self.opts.key_delimiter);
        if parts.len() == 1 {
            return Err(NamespaceError::NoNamespace {
                key: parts[0].to_string(),
            });
        }

        if self.opts.delimiters_match() {
            let key = parts.pop().unwrap_or_default().to_string();
            return Ok((Namespace::new(parts), key));
        }

        match parts.as_slice() {
            [namespace, key] => Ok((
                Namespace::new(split(namespace, &self.opts.namespace_delimiter)),
                key.to_string(),
            )),
            _ => Err(NamespaceError::AmbiguousFormat { parts: parts.len() }),
        }
    }
}

/// Split on `delimiter`; an empty delimiter splits into single characters
fn split<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    if !delimiter.is_empty() {
        return text.split(delimiter).collect();
    }
    if text.is_empty() {
        return vec![text];
    }
    text.char_indices()
        .map(|(i, c)| &text[i..i + c.len_utf8()])
        .collect()
}

//! Namespaced key composition and parsing for key-value stores.
//!
//! A full name is `prefix + join(namespace, namespace_delimiter) + key_delimiter + key`,
//! e.g. redis style `a::b::c::key` or etcd style `/a/b/c/key`.
//!
//! ```
//! use nskey::{with_etcd_style, Namespace, Overrides};
//!
//! let ns = Namespace::from(["a", "b", "c"]);
//! assert_eq!(ns.full_name("q", &Overrides::new()), "a::b::c::q");
//! assert_eq!(ns.full_name("q", &with_etcd_style()), "/a/b/c/q");
//!
//! let (ns, key) = Namespace::from_full_name("/a/b/c/q", &with_etcd_style()).unwrap();
//! assert_eq!(ns, ["a", "b", "c"]);
//! assert_eq!(key, "q");
//! ```

// Error handling module
mod errors;

pub mod defaults;
pub mod idgen;
mod namespace;
mod options;

pub use defaults::{
    default_options, replace_default_options, reset_default_options, resolve, set_default_options,
};
pub use errors::{NamespaceError, Result};
pub use idgen::{Algorithm, GenerationError, IdGenerator};
pub use namespace::{Codec, Namespace};
pub use options::*;

//! Process-wide default [`Options`].
//!
//! The defaults are shared by every thread in the process. Each call that
//! takes [`Overrides`] resolves against one snapshot, so a concurrent
//! `set_default_options` never shows up half applied inside a call.
//! Code that wants no hidden state should build a [`crate::Codec`] from an
//! explicit [`Options`] instead.

use crate::options::{Options, Overrides};
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

static DEFAULT_OPTIONS: Lazy<ArcSwap<Options>> =
    Lazy::new(|| ArcSwap::from_pointee(Options::default()));

/// Serializes tests that touch the process-wide defaults
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Snapshot of the current defaults
pub fn default_options() -> Arc<Options> {
    DEFAULT_OPTIONS.load_full()
}

/// Merge `overrides` into the defaults
pub fn set_default_options(overrides: &Overrides) {
    let prev = DEFAULT_OPTIONS.rcu(|current| Arc::new(overrides.apply(current)));
    log_change("set", &overrides.apply(&prev));
}

/// Swap in a complete set of defaults
pub fn replace_default_options(opts: Options) {
    log_change("replace", &opts);
    DEFAULT_OPTIONS.store(Arc::new(opts));
}

/// Restore the built-in defaults
pub fn reset_default_options() {
    let opts = Options::default();
    log_change("reset", &opts);
    DEFAULT_OPTIONS.store(Arc::new(opts));
}

/// Current defaults with `overrides` applied
pub fn resolve(overrides: &Overrides) -> Options {
    overrides.apply(&DEFAULT_OPTIONS.load())
}

fn log_change(action: &str, opts: &Options) {
    debug!(
        action,
        prefix = %opts.prefix,
        namespace_delimiter = %opts.namespace_delimiter,
        key_delimiter = %opts.key_delimiter,
        algorithm = %opts.random_key_algorithm,
        "default namespace options changed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idgen::Algorithm;
    use crate::options::{
        with_etcd_style, with_key_delimiter, with_prefix, with_random_key_algorithm,
    };

    fn lock() -> std::sync::MutexGuard<'static, ()> {
        TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_set_and_reset() {
        let _guard = lock();
        reset_default_options();
        assert_eq!(*default_options(), Options::default());

        set_default_options(&with_etcd_style());
        assert_eq!(*default_options(), Options::etcd_style());

        set_default_options(&with_key_delimiter("-"));
        let opts = default_options();
        assert_eq!(opts.prefix, "/");
        assert_eq!(opts.key_delimiter, "-");

        reset_default_options();
        assert_eq!(*default_options(), Options::default());
    }

    #[test]
    fn test_reset_clears_algorithm() {
        let _guard = lock();
        set_default_options(&with_random_key_algorithm(Algorithm::Timestamp));
        assert_eq!(default_options().random_key_algorithm, Algorithm::Timestamp);
        reset_default_options();
        assert_eq!(default_options().random_key_algorithm, Algorithm::UuidV4);
    }

    #[test]
    fn test_resolve_does_not_mutate() {
        let _guard = lock();
        reset_default_options();
        let opts = resolve(&with_etcd_style());
        assert_eq!(opts, Options::etcd_style());
        assert_eq!(*default_options(), Options::default());
    }

    #[test]
    fn test_replace() {
        let _guard = lock();
        let opts = Options::from_json(r#"{"prefix": "svc:"}"#).unwrap();
        replace_default_options(opts.clone());
        assert_eq!(*default_options(), opts);
        reset_default_options();
    }

    #[test]
    fn test_snapshot_survives_swap() {
        let _guard = lock();
        reset_default_options();
        let before = default_options();
        set_default_options(&with_etcd_style());
        assert_eq!(*before, Options::default());
        reset_default_options();
    }

    #[test]
    fn test_concurrent_setters_keep_both_fields() {
        let _guard = lock();
        for _ in 0..200 {
            reset_default_options();
            let barrier = Arc::new(std::sync::Barrier::new(2));

            let b = barrier.clone();
            let prefix_setter = std::thread::spawn(move || {
                b.wait();
                set_default_options(&with_prefix("p/"));
            });
            let b = barrier.clone();
            let delimiter_setter = std::thread::spawn(move || {
                b.wait();
                set_default_options(&with_key_delimiter("-"));
            });
            prefix_setter.join().unwrap();
            delimiter_setter.join().unwrap();

            let opts = default_options();
            assert_eq!(opts.prefix, "p/");
            assert_eq!(opts.key_delimiter, "-");
            assert_eq!(opts.namespace_delimiter, "::");
        }
        reset_default_options();
    }

    #[test]
    fn test_concurrent_readers_see_whole_records() {
        let _guard = lock();
        reset_default_options();

        let writer = std::thread::spawn(|| {
            for _ in 0..500 {
                set_default_options(&with_etcd_style());
                reset_default_options();
            }
        });
        let readers: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    for _ in 0..500 {
                        let opts = default_options();
                        assert!(*opts == Options::default() || *opts == Options::etcd_style());
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        reset_default_options();
    }
}

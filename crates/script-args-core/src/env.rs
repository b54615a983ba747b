//! Environment variable lookup

use std::collections::HashMap;

/// Source of environment-variable fallbacks.
pub trait Environment {
    /// Value of `name`, or `None` if unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the current process environment.
///
/// Variables that are not valid Unicode are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

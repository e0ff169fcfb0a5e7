//! Resolver configuration

/// Default nesting bound for placeholder expansion.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Tunables for [`crate::variable_resolver::VariableResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Deepest nesting level that is still expanded. Text below this level
    /// is returned unchanged.
    pub max_depth: usize,
}

impl ResolverConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the nesting bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

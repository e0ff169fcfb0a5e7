//! Resolver settings taken from the environment and flags.

use strand_application::{DEFAULT_MAX_DEPTH, ResolverConfig};
use tracing::warn;

/// Environment variable holding the default nesting bound.
pub const MAX_DEPTH_ENV: &str = "STRAND_MAX_DEPTH";

/// Builds the resolver configuration. A flag wins over the environment.
pub fn resolver_config(flag: Option<usize>) -> ResolverConfig {
    let env = std::env::var(MAX_DEPTH_ENV).ok();
    ResolverConfig::new().with_max_depth(max_depth(flag, env.as_deref()))
}

fn max_depth(flag: Option<usize>, env: Option<&str>) -> usize {
    if let Some(depth) = flag {
        return depth;
    }
    match env.map(str::parse::<usize>) {
        Some(Ok(depth)) => depth,
        Some(Err(_)) => {
            warn!(
                variable = MAX_DEPTH_ENV,
                value = env.unwrap_or_default(),
                "ignoring invalid nesting bound"
            );
            DEFAULT_MAX_DEPTH
        }
        None => DEFAULT_MAX_DEPTH,
    }
}

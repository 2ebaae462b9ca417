//! Host capability probe for scheduling decisions.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, IoTaskPool};

/// Feature flags describing what the host runtime offers.
///
/// Only `idle_scheduling` changes behavior - the geometry rebuild driver
/// yields to the frame loop when it is set and falls back to a minimal-delay
/// timer when it is not. The remaining flags are reported for diagnostics.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RuntimeCapabilities {
    /// More than one hardware thread is available.
    pub worker_threads: bool,
    /// A pool for long-running background computation exists.
    pub async_compute: bool,
    /// Deferred work can be scheduled without blocking interaction.
    pub idle_scheduling: bool,
    /// A presentation surface (and with it GPU rendering) is up.
    pub accelerated_rendering: bool,
}

impl RuntimeCapabilities {
    pub fn detect(has_surface: bool) -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            worker_threads: threads > 1,
            async_compute: AsyncComputeTaskPool::try_get().is_some(),
            idle_scheduling: IoTaskPool::try_get().is_some(),
            accelerated_rendering: has_surface,
        }
    }
}

pub fn detect_capabilities(
    mut capabilities: ResMut<RuntimeCapabilities>,
    windows: Query<&Window>,
) {
    *capabilities = RuntimeCapabilities::detect(!windows.is_empty());
    info!(
        "runtime capabilities: workers={} async_compute={} idle_scheduling={} accelerated={}",
        capabilities.worker_threads,
        capabilities.async_compute,
        capabilities.idle_scheduling,
        capabilities.accelerated_rendering,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_flag_follows_argument() {
        assert!(RuntimeCapabilities::detect(true).accelerated_rendering);
        assert!(!RuntimeCapabilities::detect(false).accelerated_rendering);
    }

    #[test]
    fn test_worker_threads_match_parallelism() {
        let expected = std::thread::available_parallelism()
            .map(|n| n.get() > 1)
            .unwrap_or(false);
        assert_eq!(RuntimeCapabilities::detect(false).worker_threads, expected);
    }

    #[test]
    fn test_default_is_conservative() {
        let caps = RuntimeCapabilities::default();
        assert!(!caps.idle_scheduling);
        assert!(!caps.async_compute);
    }
}

//! Performance instrumentation and host capability detection.

mod capabilities;
mod monitor;

pub use capabilities::{detect_capabilities, RuntimeCapabilities};
pub use monitor::{PerformanceMonitor, TimingStats};

use bevy::prelude::*;

pub struct PerfPlugin;

impl Plugin for PerfPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PerformanceMonitor>()
            .init_resource::<RuntimeCapabilities>()
            .add_systems(Startup, detect_capabilities);
    }
}

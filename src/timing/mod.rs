//! Timing primitives for high-frequency event handling.
//!
//! All three are owned values driven explicitly by the frame loop - nothing
//! here spawns threads or registers global callbacks, and each exposes a
//! cancel path that guarantees no delivery after it returns.
//!
//! - [`Debounce`] - trailing-edge, last-call-wins delivery
//! - [`Throttle`] - leading-edge gate that drops calls inside its window
//! - [`ChunkedBatch`] - in-order chunked iteration that yields between chunks

mod batch;
mod debounce;
mod throttle;

pub use batch::{BatchStatus, ChunkedBatch};
pub use debounce::Debounce;
pub use throttle::Throttle;

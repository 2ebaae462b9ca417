//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

use crate::geo::LatLng;

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Slippy-map tile edge in pixels, used to derive degrees-per-pixel
pub const TILE_SIZE: f32 = 256.0;

/// Widest zoom the camera allows (country scale)
pub const MIN_ZOOM: i32 = 6;

/// Narrowest zoom the camera allows (building scale)
pub const MAX_ZOOM: i32 = 19;

/// Zoom level the map opens at
pub const DEFAULT_ZOOM: i32 = 11;

/// Initial map center (Cologne)
pub const DEFAULT_CENTER: LatLng = LatLng::new(50.9375, 6.9603);

/// Areas per chunk when rebuilding render geometry for many polygons.
/// Higher values finish sooner but may cause frame drops.
pub const AOI_CHUNK_SIZE: usize = 100;

/// Debounce window for viewport refresh after camera motion (ms)
pub const VIEW_DEBOUNCE_MS: u64 = 300;

/// Throttle interval for cursor readout updates (ms)
pub const CURSOR_THROTTLE_MS: u64 = 100;

/// Two clicks within this window count as a double-click (ms)
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 300;

/// Maximum cursor travel between the two clicks of a double-click (px)
pub const DOUBLE_CLICK_SLOP_PX: f32 = 6.0;

/// Pacing for batch work when idle scheduling is unavailable (ms)
pub const REBUILD_FALLBACK_MS: u64 = 1;

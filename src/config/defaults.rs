// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default base URL of the classification backend.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

/// Default timeout applied to every backend request (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Default upload limit in MiB. Matches the backend's request size limit.
pub const DEFAULT_MAX_UPLOAD_MB: u32 = 16;

/// Minimum upload limit in MiB.
pub const MIN_MAX_UPLOAD_MB: u32 = 1;

/// Maximum upload limit in MiB.
pub const MAX_MAX_UPLOAD_MB: u32 = 64;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// How long a toast stays visible after the latest `show` (in milliseconds).
pub const TOAST_DURATION_MS: u64 = 3000;

/// Delay between a successful analysis and the start of the ring animation.
pub const RING_ANIMATION_DELAY_MS: u64 = 100;

/// Duration of the confidence ring sweep.
pub const RING_ANIMATION_DURATION_MS: u64 = 1000;

/// Start delay increment between consecutive probability bars.
pub const BAR_STAGGER_MS: u64 = 100;

/// Duration of one probability bar's grow animation.
pub const BAR_ANIMATION_DURATION_MS: u64 = 1000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_REQUEST_TIMEOUT_SECS <= DEFAULT_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);
    assert!(MIN_MAX_UPLOAD_MB <= DEFAULT_MAX_UPLOAD_MB);
    assert!(DEFAULT_MAX_UPLOAD_MB <= MAX_MAX_UPLOAD_MB);
    assert!(RING_ANIMATION_DELAY_MS < TOAST_DURATION_MS);
};

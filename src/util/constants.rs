// ElasChat - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ElasChat";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ElasChat";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Avatar identity
// =============================================================================

/// Version of the avatar palette and hash below.
///
/// Bump this whenever `AVATAR_PALETTE_RGB` or the name hash changes: every
/// existing display name maps to a different colour afterwards.
pub const PALETTE_VERSION: u32 = 1;

/// Number of entries in the avatar palette.
pub const PALETTE_SIZE: usize = 7;

/// Ordered avatar background palette as 0xRRGGBB values.
pub const AVATAR_PALETTE_RGB: [u32; PALETTE_SIZE] = [
    0xFF6B6B, 0x4ECDC4, 0x45B7D1, 0x96CEB4, 0xFFEAA7, 0xDDA0DD, 0x98D8C8,
];

/// Maximum number of characters in a derived initials string.
pub const MAX_INITIALS: usize = 2;

// =============================================================================
// Relative time buckets
// =============================================================================

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;

/// Milliseconds in one hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Label used for anything under a minute old (and for future timestamps).
pub const JUST_NOW_LABEL: &str = "Just now";

/// Number of days after which an absolute date replaces "{n}d ago".
pub const DEFAULT_RELATIVE_DAYS: i64 = 7;

/// Lower bound for the configurable relative-day window.
pub const MIN_RELATIVE_DAYS: i64 = 1;

/// Upper bound for the configurable relative-day window.
pub const MAX_RELATIVE_DAYS: i64 = 30;

/// Default strftime pattern for absolute dates (US short date, `1/15/2024`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

// =============================================================================
// Compact counts
// =============================================================================

/// Threshold at and above which counts render with a `K` suffix.
pub const THOUSAND: u64 = 1_000;

/// Threshold at and above which counts render with an `M` suffix.
pub const MILLION: u64 = 1_000_000;

// =============================================================================
// Profile limits
// =============================================================================

/// Maximum bio length in characters (matches the edit-profile counter).
pub const MAX_BIO_CHARS: usize = 150;

// =============================================================================
// Session storage
// =============================================================================

/// Storage key holding the JSON-encoded user record.
pub const USER_STORAGE_KEY: &str = "@elaschat_user";

/// Storage key holding the `"true"` signed-in flag.
pub const AUTH_STORAGE_KEY: &str = "@elaschat_auth";

/// Value stored under `AUTH_STORAGE_KEY` while signed in.
pub const AUTH_FLAG_VALUE: &str = "true";

/// Default file name for the key-value store inside the data directory.
pub const DEFAULT_STORE_FILE_NAME: &str = "storage.json";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when RUST_LOG is not set and --debug is not passed.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// File names
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

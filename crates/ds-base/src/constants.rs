// =============================================================================
// API & MODELS
// =============================================================================

/// Base URL of the Gemini REST API
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for the standard mode
pub const DEFAULT_STANDARD_MODEL: &str = "gemini-2.5-flash";

/// Model used for the extended-reasoning mode
pub const DEFAULT_THINKING_MODEL: &str = "gemini-2.5-pro";

/// Model used for the web-grounded search mode
pub const DEFAULT_SEARCH_MODEL: &str = "gemini-2.5-flash";

/// Reasoning budget (tokens) requested in thinking mode
pub const THINKING_BUDGET_TOKENS: u32 = 32_768;

/// Timeout for a single generateContent call
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Environment variables searched (in order) for the API key
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

// =============================================================================
// REVEAL
// =============================================================================

/// Cadence of the reveal timer: one character per firing
pub const REVEAL_INTERVAL_MS: u64 = 20;

// =============================================================================
// STORAGE
// =============================================================================

/// Per-project directory for settings and logs
pub const STORE_DIR: &str = ".donkeyshot";

/// Settings file inside STORE_DIR
pub const SETTINGS_FILE: &str = "config.yaml";

/// Log directory inside STORE_DIR
pub const LOG_DIR: &str = "logs";

/// Log file name inside LOG_DIR
pub const LOG_FILE: &str = "donkeyshot.log";

/// Environment variable holding the tracing filter directive
pub const LOG_FILTER_VAR: &str = "DONKEYSHOT_LOG";

// =============================================================================
// EVENT LOOP
// =============================================================================

/// Poll interval while a request or reveal is running (ms)
pub const EVENT_POLL_MS: u64 = 8;

/// Poll interval while idle (ms)
pub const IDLE_POLL_MS: u64 = 50;

/// Minimum time between two renders (ms)
pub const RENDER_THROTTLE_MS: u64 = 36;

/// Spinner frame duration (ms)
pub const SPINNER_FRAME_MS: u64 = 80;

// =============================================================================
// SCROLLING
// =============================================================================

/// Lines scrolled per arrow key
pub const SCROLL_ARROW_AMOUNT: u16 = 3;

/// Lines scrolled per PageUp/PageDown
pub const SCROLL_PAGE_AMOUNT: u16 = 10;

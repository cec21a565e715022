//! System-wide default constants.
//!
//! The interpreter never reads these directly; they seed `InterpreterConfig`
//! and the other config sections, which are then passed around explicitly.

// ============================================================================
// Interpreter
// ============================================================================

/// Light period used when the characteristic names none (seconds).
pub const DEFAULT_PERIOD_S: f64 = 4.0;

/// Periods at or below this are treated as parse noise (seconds).
pub const MIN_MEANINGFUL_PERIOD_S: f64 = 0.5;

/// Nominal range used when none is given (nautical miles).
pub const DEFAULT_RANGE_NM: f64 = 6.0;

/// Focal height used when none is given (metres).
pub const DEFAULT_HEIGHT_M: f64 = 12.0;

// ============================================================================
// Flash Sequence
// ============================================================================

/// Duration of one Bridge Command sequence character (seconds).
pub const TICK_SECONDS: f64 = 0.25;

/// Shortest sequence emitted (1 s at 0.25 s/tick).
pub const MIN_TICKS: usize = 4;

/// Longest sequence emitted (20 s at 0.25 s/tick).
pub const MAX_TICKS: usize = 80;

/// Lit time of a single flash (seconds).
pub const FLASH_LIT_S: f64 = 0.5;

/// Lit time of a long flash (seconds).
pub const LONG_FLASH_LIT_S: f64 = 2.0;

/// Fraction of an occulting period that is lit.
pub const OCCULTING_LIT_FRACTION: f64 = 0.6;

/// Feet to metres
pub const FT_TO_M: f64 = 0.3048;

// ============================================================================
// Area & Output
// ============================================================================

/// Default bounding box: New York Harbor approaches (District 1 test area).
pub const DEFAULT_BBOX: (f64, f64, f64, f64) = (-74.36, 40.35, -73.88, 40.73);

/// Decimal places for `Long(i)` / `Lat(i)` in Buoy.ini.
pub const DEFAULT_COORDINATE_DECIMALS: usize = 8;

/// Upper bound accepted for `output.coordinate_decimals`.
pub const MAX_COORDINATE_DECIMALS: usize = 12;

/// Maximum row-level parse warnings logged per input file before going quiet.
pub const MAX_LOGGED_ROW_WARNINGS: usize = 10;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "LIGHTLIST_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lightlist.toml";

//! Capacities and timing constants shared by the configuration layer
//!
//! Capacities are in bytes for strings and in entries for lists.

//==============================================================================
// String capacities
//==============================================================================

/// Maximum length of a hostname or server name
pub const NAME_CAPACITY: usize = 255;

/// Maximum length of a URL path (checkip or update)
pub const PATH_CAPACITY: usize = 256;

/// Maximum length of a provider username
pub const USERNAME_CAPACITY: usize = 128;

/// Maximum length of a provider password
pub const PASSWORD_CAPACITY: usize = 128;

/// Maximum length of one expected-response pattern
pub const RESPONSE_CAPACITY: usize = 64;

//==============================================================================
// List capacities
//==============================================================================

/// Maximum number of hostnames per provider
pub const MAX_HOSTNAMES: usize = 50;

/// Maximum number of expected-response patterns per custom provider
pub const MAX_RESPONSES: usize = 5;

//==============================================================================
// Endpoints
//==============================================================================

/// Port used when an endpoint omits one or gives an invalid one
pub const DEFAULT_PORT: u16 = 80;

/// Port substituted for [`DEFAULT_PORT`] when SSL is enabled
pub const DEFAULT_SSL_PORT: u16 = 443;

//==============================================================================
// Periods (seconds)
//==============================================================================

/// Lower bound for the update period
pub const MIN_PERIOD: u64 = 120;

/// Upper bound for the update period (10 days)
pub const MAX_PERIOD: u64 = 10 * 24 * 3600;

/// Update period used when the file does not set one
pub const DEFAULT_PERIOD: u64 = 600;

/// Retry period after a failed update, not user configurable
pub const ERROR_UPDATE_PERIOD: u64 = 600;

/// Forced update period used when the file does not set one (30 days)
pub const FORCED_UPDATE_PERIOD: u64 = 30 * 24 * 3600;

/// Iteration count used when the file does not set one (run forever)
pub const DEFAULT_ITERATIONS: u64 = 0;

/// Cache directory used when the file does not set one
pub const DEFAULT_CACHE_DIR: &str = "/var/cache/ddnsd";

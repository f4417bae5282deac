//! Constants shared across the application.

/// Default location of the configuration store
pub const DEFAULT_CONFIG_PATH: &str = "config/notifier.json";

/// Environment variable overriding the configuration store location
pub const CONFIG_PATH_ENV: &str = "NOTIFIER_CONFIG_PATH";

/// Default bind address of the metrics server
pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:8081";

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory in file mode
pub const DEFAULT_LOG_DIR: &str = "logs";

/// File name prefix of the rolling log file
pub const LOG_FILE_PREFIX: &str = "stellar-notifier.log";

/// Maximum page size accepted by Horizon
pub const HORIZON_PAGE_LIMIT: u32 = 200;

/// Number of claimable balances fetched for the report
pub const CLAIMABLE_BALANCE_LIMIT: u32 = 50;

/// Largest claimable balance report lookahead, roughly a century
pub const MAX_LOOKAHEAD_DAYS: i64 = 36_500;

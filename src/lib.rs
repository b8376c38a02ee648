pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;

/// Process exit code when the store cannot be connected or migrated
pub const EXIT_STORE_INIT_FAILURE: i32 = 4;

/// Process exit code when the configuration cannot be loaded
pub const EXIT_CONFIG_FAILURE: i32 = 1;

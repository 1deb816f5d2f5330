// ABOUTME: Environment variable name constants and their default values
// ABOUTME: Centralized definitions of all environment variables read by Tickoff

// Server Configuration
pub const TICKOFF_HOST: &str = "TICKOFF_HOST";
pub const TICKOFF_PORT: &str = "TICKOFF_PORT";
pub const PORT: &str = "PORT"; // Legacy

// Database Configuration
pub const TICKOFF_DATABASE_PATH: &str = "TICKOFF_DATABASE_PATH";
pub const TICKOFF_DB_MAX_CONNECTIONS: &str = "TICKOFF_DB_MAX_CONNECTIONS";

// CORS Configuration
pub const TICKOFF_CORS_ORIGINS: &str = "TICKOFF_CORS_ORIGINS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_PATH: &str = "todos.db";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Every variable the server reads, for diagnostics and test cleanup
pub const ALL_VARIABLES: &[&str] = &[
    TICKOFF_HOST,
    TICKOFF_PORT,
    PORT,
    TICKOFF_DATABASE_PATH,
    TICKOFF_DB_MAX_CONNECTIONS,
    TICKOFF_CORS_ORIGINS,
];

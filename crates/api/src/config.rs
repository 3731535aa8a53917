use surprise_core::booking::VisibilityPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub content: ContentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`ContentConfig::from_env`] for the
    /// nested sections.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            content: ContentConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// JWT
// ---------------------------------------------------------------------------

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub secret: String,
    pub access_token_expiry_mins: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// Settings for active-content resolution and the booking lifecycle job.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Booking statuses eligible for the public carousel.
    pub visibility: VisibilityPolicy,
    /// Seconds between booking lifecycle passes.
    pub lifecycle_interval_secs: u64,
    /// Insert the built-in default slides at startup when none exist.
    pub seed_default_slides: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            visibility: VisibilityPolicy::default(),
            lifecycle_interval_secs: 60,
            seed_default_slides: false,
        }
    }
}

impl ContentConfig {
    /// | Env Var                           | Default          |
    /// |-----------------------------------|------------------|
    /// | `VISIBLE_BOOKING_STATUSES`        | `pending,active` |
    /// | `BOOKING_LIFECYCLE_INTERVAL_SECS` | `60`             |
    /// | `SEED_DEFAULT_SLIDES`             | `false`          |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let visibility = match std::env::var("VISIBLE_BOOKING_STATUSES") {
            Ok(list) => VisibilityPolicy::parse(&list)
                .unwrap_or_else(|e| panic!("VISIBLE_BOOKING_STATUSES is invalid: {e}")),
            Err(_) => defaults.visibility,
        };

        let lifecycle_interval_secs: u64 = std::env::var("BOOKING_LIFECYCLE_INTERVAL_SECS")
            .map(|v| {
                v.parse()
                    .expect("BOOKING_LIFECYCLE_INTERVAL_SECS must be a valid u64")
            })
            .unwrap_or(defaults.lifecycle_interval_secs);
        assert!(
            lifecycle_interval_secs > 0,
            "BOOKING_LIFECYCLE_INTERVAL_SECS must be greater than zero"
        );

        let seed_default_slides = std::env::var("SEED_DEFAULT_SLIDES")
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.seed_default_slides);

        Self {
            visibility,
            lifecycle_interval_secs,
            seed_default_slides,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

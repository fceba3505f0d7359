use std::path::PathBuf;

use stockmedia_core::cdn::SignatureAlgorithm;

use crate::auth::jwt::JwtConfig;

/// `APP_ENV` value that hides development-only endpoints.
pub const APP_ENV_PRODUCTION: &str = "production";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Deployment environment (default: `development`).
    pub app_env: String,
    /// Directory of prebuilt frontend pages served as the router fallback.
    pub static_dir: Option<PathBuf>,
    /// Download token signing configuration.
    pub jwt: JwtConfig,
    /// Identity provider settings.
    pub identity: IdentityConfig,
    /// Media CDN credentials.
    pub cdn: CdnConfig,
    /// Payment gateway settings.
    pub payments: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `APP_ENV`              | `development`              |
    /// | `STATIC_DIR`           | unset (no static pages)    |
    ///
    /// Vendor settings are read by [`JwtConfig::from_env`],
    /// [`IdentityConfig::from_env`], [`CdnConfig::from_env`] and
    /// [`PaymentConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
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

        let app_env = optional_env("APP_ENV").unwrap_or_else(|| "development".into());
        let static_dir = optional_env("STATIC_DIR").map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            app_env,
            static_dir,
            jwt: JwtConfig::from_env(),
            identity: IdentityConfig::from_env(),
            cdn: CdnConfig::from_env(),
            payments: PaymentConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case(APP_ENV_PRODUCTION)
    }
}

/// Identity provider (hosted auth) settings.
#[derive(Debug, Clone, Default)]
pub struct IdentityConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    /// HS256 secret the provider signs access tokens with. Without it no
    /// session can be verified and every protected API route answers 401.
    pub jwt_secret: Option<String>,
}

impl IdentityConfig {
    /// | Env Var                     | Required |
    /// |-----------------------------|----------|
    /// | `SUPABASE_URL`              | no       |
    /// | `SUPABASE_ANON_KEY`         | no       |
    /// | `SUPABASE_SERVICE_ROLE_KEY` | no       |
    /// | `SUPABASE_JWT_SECRET`       | no       |
    pub fn from_env() -> Self {
        Self {
            url: optional_env("SUPABASE_URL"),
            anon_key: optional_env("SUPABASE_ANON_KEY"),
            service_role_key: optional_env("SUPABASE_SERVICE_ROLE_KEY"),
            jwt_secret: optional_env("SUPABASE_JWT_SECRET"),
        }
    }
}

/// Media CDN account credentials.
#[derive(Debug, Clone, Default)]
pub struct CdnConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub upload_preset: Option<String>,
    pub signature_algorithm: SignatureAlgorithm,
}

impl CdnConfig {
    /// | Env Var                          | Default |
    /// |----------------------------------|---------|
    /// | `CLOUDINARY_CLOUD_NAME`          | --      |
    /// | `CLOUDINARY_API_KEY`             | --      |
    /// | `CLOUDINARY_API_SECRET`          | --      |
    /// | `CLOUDINARY_UPLOAD_PRESET`       | --      |
    /// | `CLOUDINARY_SIGNATURE_ALGORITHM` | `sha1`  |
    pub fn from_env() -> Self {
        let signature_algorithm = optional_env("CLOUDINARY_SIGNATURE_ALGORITHM")
            .map(|s| {
                s.parse()
                    .expect("CLOUDINARY_SIGNATURE_ALGORITHM must be sha1 or sha256")
            })
            .unwrap_or_default();

        Self {
            cloud_name: optional_env("CLOUDINARY_CLOUD_NAME"),
            api_key: optional_env("CLOUDINARY_API_KEY"),
            api_secret: optional_env("CLOUDINARY_API_SECRET"),
            upload_preset: optional_env("CLOUDINARY_UPLOAD_PRESET"),
            signature_algorithm,
        }
    }
}

/// Payment gateway settings.
#[derive(Debug, Clone, Default)]
pub struct PaymentConfig {
    /// Webhook signature key. When unset, webhook bodies are accepted
    /// unsigned (development only).
    pub signature_key: Option<String>,
}

impl PaymentConfig {
    /// | Env Var              | Required |
    /// |----------------------|----------|
    /// | `ANET_SIGNATURE_KEY` | no       |
    pub fn from_env() -> Self {
        Self {
            signature_key: optional_env("ANET_SIGNATURE_KEY"),
        }
    }
}

/// Read an env var, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub minio: MinIOConfig,
    pub ai: AiConfig,
    pub geocoding: GeocodingConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// MinIO/S3 storage configuration for report photos
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL used when building retrieval URLs (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
    /// Prefix for publicly readable objects (e.g., "public")
    pub public_prefix: String,
}

/// Hosted language model configuration
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer credential; classification is disabled when absent
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

/// Reverse geocoding (Nominatim) configuration
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
}

/// Value of `key` parsed as `T`, or `default` when unset
fn env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid value, got {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// String value of `key`, or `default` when unset or blank
fn env_string(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Non-empty value of `key`; blank counts as unset
fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_env(key: &str) -> Result<String, String> {
    env_optional(key).ok_or_else(|| format!("{} environment variable is required", key))
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // .env is optional; only a malformed file is worth a warning
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env(),
            minio: MinIOConfig::from_env(),
            ai: AiConfig::from_env(),
            geocoding: GeocodingConfig::from_env(),
        })
    }
}

impl AppConfig {
    const DEFAULT_HOST: &'static str = "127.0.0.1";
    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env_string("HOST", Self::DEFAULT_HOST),
            port: env_or("PORT", Self::DEFAULT_PORT)?,
            cors_allowed_origins: parse_origins(&env_string("CORS_ALLOWED_ORIGINS", "*")),
            max_request_body_size: env_or(
                "MAX_REQUEST_BODY_SIZE",
                Self::DEFAULT_MAX_REQUEST_BODY_SIZE,
            )?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Comma-separated origin list
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            url: required_env("DATABASE_URL")?,
            max_connections: env_or("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: env_or("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: env_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600;
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            issuer: required_env("AUTH_ISSUER")?,
            audience: required_env("AUTH_AUDIENCE")?,
            jwks_cache_ttl: Duration::from_secs(env_or(
                "JWKS_CACHE_TTL",
                Self::DEFAULT_JWKS_CACHE_TTL_SECS,
            )?),
            jwt_leeway: Duration::from_secs(env_or("JWT_LEEWAY", Self::DEFAULT_JWT_LEEWAY_SECS)?),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        Self {
            username: env_optional("SWAGGER_USERNAME"),
            password: env_optional("SWAGGER_PASSWORD"),
            title: env_string("SWAGGER_TITLE", "SafeSpot API"),
            version: env_string("SWAGGER_VERSION", env!("CARGO_PKG_VERSION")),
            description: env_string("SWAGGER_DESCRIPTION", "Community safety reporting API"),
        }
    }

    /// `username:password` when both are set
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl MinIOConfig {
    pub fn from_env() -> Self {
        let endpoint = env_string("MINIO_ENDPOINT", "http://localhost:9000");

        Self {
            public_endpoint: env_string("MINIO_PUBLIC_ENDPOINT", &endpoint),
            endpoint,
            access_key: env_string("MINIO_ACCESS_KEY", "minioadmin"),
            secret_key: env_string("MINIO_SECRET_KEY", "minioadmin"),
            bucket: env_string("MINIO_BUCKET", "safespot-uploads"),
            region: env_string("MINIO_REGION", "us-east-1"),
            public_prefix: env_string("MINIO_PUBLIC_PREFIX", "public"),
        }
    }
}

impl AiConfig {
    const DEFAULT_API_URL: &'static str = "https://api.openai.com/v1/chat/completions";
    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    pub fn from_env() -> Self {
        Self {
            api_key: env_optional("OPENAI_API_KEY"),
            api_url: env_string("OPENAI_API_URL", Self::DEFAULT_API_URL),
            model: env_string("OPENAI_MODEL", Self::DEFAULT_MODEL),
        }
    }
}

impl GeocodingConfig {
    const DEFAULT_BASE_URL: &'static str = "https://nominatim.openstreetmap.org";
    const DEFAULT_USER_AGENT: &'static str = "SafeSpotCore/1.0 (community-safety-reporter)";

    pub fn from_env() -> Self {
        Self {
            base_url: env_string("NOMINATIM_BASE_URL", Self::DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            user_agent: env_string("GEOCODING_USER_AGENT", Self::DEFAULT_USER_AGENT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }

    #[test]
    fn test_env_or_parses_and_defaults() {
        std::env::set_var("SAFESPOT_TEST_PORT", " 8081 ");
        assert_eq!(env_or("SAFESPOT_TEST_PORT", 3000u16), Ok(8081));

        std::env::set_var("SAFESPOT_TEST_BAD_PORT", "eighty");
        assert!(env_or("SAFESPOT_TEST_BAD_PORT", 3000u16).is_err());

        assert_eq!(env_or("SAFESPOT_TEST_UNSET_PORT", 3000u16), Ok(3000));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        std::env::set_var("SAFESPOT_TEST_BLANK", "   ");
        assert_eq!(env_optional("SAFESPOT_TEST_BLANK"), None);
        assert_eq!(env_string("SAFESPOT_TEST_BLANK", "fallback"), "fallback");
        assert!(required_env("SAFESPOT_TEST_BLANK").is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.test, https://b.test,,"),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: 1024,
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }
}

/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, 署名鍵, 擬似処理時間など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // Ed25519: private key signs person tokens, public key verifies them.
    pub jwt_private_key_pem: String,
    pub jwt_public_key_pem: String,
    pub token_ttl_seconds: u64,

    pub simulated_work: Duration,
    pub request_timeout: Duration,

    pub seed_password: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("simulated_work", &self.simulated_work)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(lookup("PORT"), "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let jwt_private_key_pem = lookup("JWT_PRIVATE_KEY_PEM")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_PRIVATE_KEY_PEM"))?
            .replace("\\n", "\n");

        let jwt_public_key_pem = lookup("JWT_PUBLIC_KEY_PEM")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        // Issued `exp` is `iat + ttl` in signed seconds.
        let token_ttl_seconds: u64 =
            parse_or(lookup("TOKEN_TTL_SECONDS"), "TOKEN_TTL_SECONDS", 3600)?;
        if i64::try_from(token_ttl_seconds).is_err() {
            return Err(ConfigError::Invalid("TOKEN_TTL_SECONDS"));
        }

        let simulated_work = Duration::from_millis(parse_or(
            lookup("SIMULATED_WORK_MS"),
            "SIMULATED_WORK_MS",
            1_000,
        )?);

        let request_timeout = Duration::from_millis(parse_or(
            lookup("REQUEST_TIMEOUT_MS"),
            "REQUEST_TIMEOUT_MS",
            30_000,
        )?);

        let seed_password = lookup("SEED_PASSWORD").filter(|s| !s.is_empty());

        Ok(Self {
            addr,
            app_env,
            jwt_private_key_pem,
            jwt_public_key_pem,
            token_ttl_seconds,
            simulated_work,
            request_timeout,
            seed_password,
        })
    }
}

/// Unset → `default`; set but unparsable → `Invalid(key)`.
fn parse_or<T: FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(s) => s.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

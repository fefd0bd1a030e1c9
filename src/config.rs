use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use regex::Regex;
use serde::Deserialize;
use std::{env, fmt};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub gate: GateConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served behind the gate
    pub root: String,
}

#[derive(Deserialize, Clone)]
pub struct GateConfig {
    /// HS256 signing secret for session tokens
    pub secret: String,
    /// Shared password checked on sign-in
    pub password: String,
    /// Session lifetime in seconds, used for both the token expiry and the cookie Max-Age
    #[serde(default = "default_max_age")]
    pub max_age: u64,
    /// Mount point of the signin/signout endpoints
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Regex matched against request paths that require a session
    #[serde(default = "default_protected_paths")]
    pub protected_paths: String,
    #[serde(default)]
    pub secure_cookie: bool,
}

impl GateConfig {
    pub fn new(secret: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            password: password.into(),
            max_age: default_max_age(),
            base_path: default_base_path(),
            protected_paths: default_protected_paths(),
            secure_cookie: false,
        }
    }

    pub fn signin_path(&self) -> String {
        format!("{}/signin", self.base_path.trim_end_matches('/'))
    }

    pub fn signout_path(&self) -> String {
        format!("{}/signout", self.base_path.trim_end_matches('/'))
    }

    pub fn protected_pattern(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.protected_paths)
    }
}

impl fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateConfig")
            .field("secret", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("max_age", &self.max_age)
            .field("base_path", &self.base_path)
            .field("protected_paths", &self.protected_paths)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

fn default_max_age() -> u64 {
    1200
}

fn default_base_path() -> String {
    "/api/pwd".to_string()
}

fn default_protected_paths() -> String {
    "^/".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `ENVIRONMENT=production` switches on secure cookies and JSON logs
pub fn is_production() -> bool {
    env::var("ENVIRONMENT")
        .map(|env| env == "production")
        .unwrap_or(false)
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. NEXTPWD_SECRET / NEXTPWD_PASSWORD
    /// 2. Prefixed environment variables (NEXTPWD__GATE__MAX_AGE, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.root", "public")?
            .set_default("gate.max_age", default_max_age())?
            .set_default("gate.base_path", default_base_path())?
            .set_default("gate.protected_paths", default_protected_paths())?
            .set_default("gate.secure_cookie", is_production())?
            .set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: env-only deployments carry no file
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("NEXTPWD")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(secret) = env::var("NEXTPWD_SECRET") {
            builder = builder.set_override("gate.secret", secret)?;
        }
        if let Ok(password) = env::var("NEXTPWD_PASSWORD") {
            builder = builder.set_override("gate.password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.gate.secret.is_empty() {
            return Err("Gate secret must not be empty".to_string());
        }
        if self.gate.password.is_empty() {
            return Err("Gate password must not be empty".to_string());
        }
        if self.gate.max_age == 0 {
            return Err("Gate max_age must be greater than 0".to_string());
        }
        let base = self.gate.base_path.trim_matches('/');
        if !self.gate.base_path.starts_with('/') || base.is_empty() {
            return Err(format!(
                "Gate base_path must be a non-root path starting with '/': {}",
                self.gate.base_path
            ));
        }
        if let Err(e) = self.gate.protected_pattern() {
            return Err(format!("Invalid protected_paths pattern: {e}"));
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.gate.secret.len() < 32 {
            tracing::warn!("Gate secret is shorter than 32 bytes, consider a longer one");
        }
        Ok(())
    }
}

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub notification: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".into(), port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailTls {
    #[default]
    Starttls,
    Tls,
    None,
}

impl MailTls {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "starttls" => Ok(Self::Starttls),
            "tls" | "ssl" => Ok(Self::Tls),
            "none" | "plain" => Ok(Self::None),
            other => Err(anyhow!("mail.tls must be starttls, tls or none (got {other})")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host; no host means outgoing mail is disabled.
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_mail_port")]
    pub port: u16,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub tls: MailTls,
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_mail_port(),
            user: None,
            pass: None,
            from: String::new(),
            tls: MailTls::default(),
            timeout_secs: default_mail_timeout(),
        }
    }
}

fn default_mail_port() -> u16 { 587 }
fn default_mail_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct NotificationConfig {
    /// Comma separated recipient list for "company created" emails.
    #[serde(default)]
    pub emails: String,
}

impl NotificationConfig {
    /// Trimmed, non-empty recipient addresses.
    pub fn recipients(&self) -> Vec<String> {
        parse_recipients(&self.emails)
    }
}

pub fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults; then
    /// fill blanks from the environment and validate.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.mail.normalize_from_env()?;
        self.mail.validate()?;
        self.notification.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("PORT must be a number in 1..=65535 (got {port})"))?;
        }
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl MailConfig {
    fn normalize_from_env(&mut self) -> Result<()> {
        fn non_blank(key: &str) -> Option<String> {
            std::env::var(key).ok().filter(|v| !v.trim().is_empty())
        }
        if self.host.is_none() {
            self.host = non_blank("MAIL_HOST");
        }
        if let Some(port) = non_blank("MAIL_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| anyhow!("MAIL_PORT must be a number (got {port})"))?;
        }
        if self.user.is_none() {
            self.user = non_blank("MAIL_USER");
        }
        if self.pass.is_none() {
            self.pass = non_blank("MAIL_PASS");
        }
        if self.from.trim().is_empty() {
            if let Some(from) = non_blank("MAIL_FROM") {
                self.from = from;
            }
        }
        if let Some(tls) = non_blank("MAIL_TLS") {
            self.tls = MailTls::parse(&tls)?;
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.host.as_deref().is_some_and(|h| !h.trim().is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }
        if self.from.trim().is_empty() {
            return Err(anyhow!("mail.from is required when mail.host is set"));
        }
        if self.user.is_some() != self.pass.is_some() {
            return Err(anyhow!("mail.user and mail.pass must be provided together"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("mail.timeout_secs must be positive"));
        }
        Ok(())
    }
}

impl NotificationConfig {
    fn normalize_from_env(&mut self) {
        if self.emails.trim().is_empty() {
            if let Ok(emails) = std::env::var("NOTIFICATION_EMAILS") {
                self.emails = emails;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://u:p@localhost:5432/companies"
            max_connections = 5

            [mail]
            host = "smtp.example.com"
            port = 465
            from = "noreply@example.com"
            tls = "tls"

            [notification]
            emails = "a@x.com, b@x.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.min_connections, 2);
        assert_eq!(cfg.mail.tls, MailTls::Tls);
        assert_eq!(cfg.mail.timeout_secs, 10);
        assert_eq!(cfg.notification.recipients(), vec!["a@x.com", "b@x.com"]);
        cfg.database.validate().unwrap();
        cfg.mail.validate().unwrap();
    }

    #[test]
    fn recipients_drop_blank_entries() {
        assert_eq!(parse_recipients(" a@x.com ,, ,b@x.com,"), vec!["a@x.com", "b@x.com"]);
        assert!(parse_recipients("").is_empty());
        assert!(parse_recipients(" , ").is_empty());
    }

    #[test]
    fn database_url_must_be_postgres() {
        let cfg = DatabaseConfig { url: "mysql://localhost/db".into(), ..Default::default() };
        assert!(cfg.validate().is_err());
        let empty = DatabaseConfig::default();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn mail_requires_sender_when_enabled() {
        let disabled = MailConfig::default();
        assert!(!disabled.is_enabled());
        disabled.validate().unwrap();

        let missing_from = MailConfig { host: Some("smtp.example.com".into()), ..Default::default() };
        assert!(missing_from.validate().is_err());

        let half_auth = MailConfig {
            host: Some("smtp.example.com".into()),
            from: "noreply@example.com".into(),
            user: Some("user".into()),
            ..Default::default()
        };
        assert!(half_auth.validate().is_err());
    }

    #[test]
    fn mail_tls_parsing() {
        assert_eq!(MailTls::parse("STARTTLS").unwrap(), MailTls::Starttls);
        assert_eq!(MailTls::parse("ssl").unwrap(), MailTls::Tls);
        assert_eq!(MailTls::parse("none").unwrap(), MailTls::None);
        assert!(MailTls::parse("maybe").is_err());
    }
}

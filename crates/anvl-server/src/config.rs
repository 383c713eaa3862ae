//! Server configuration for the ANVL lead service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Settings are overridden via `ANVL_*` variables; the mail credential pair
//! keeps the `EMAIL_USER` / `EMAIL_PASS` names the site has always used.
//! A mail setup that cannot deliver is a startup error, not a silent fallback.

use std::net::SocketAddr;
use std::time::Duration;

use anvl_core::relay::RelaySettings;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Which mailer the relay uses.
    pub mail_transport: MailTransport,
    /// Addressing for relayed contact emails.
    pub relay: RelaySettings,
}

/// Supported mailer backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransport {
    /// Log emails instead of sending them (development only, opt-in).
    Log,
    /// Deliver through an SMTP relay.
    Smtp(SmtpMailConfig),
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS).
    Tls,
    /// Plain connection upgraded with `STARTTLS`; the upgrade is required.
    StartTls,
    /// No encryption. Local test relays only.
    None,
}

impl SmtpSecurity {
    /// Port used when `ANVL_SMTP_PORT` is not set.
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Self::Tls => 465,
            Self::StartTls => 587,
            Self::None => 25,
        }
    }
}

/// Configuration for the SMTP relay.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpMailConfig {
    pub host: String,
    pub port: u16,
    pub security: SmtpSecurity,
    /// Login name, usually the sending mailbox.
    pub user: String,
    /// Login secret (an app password for Gmail).
    pub pass: String,
    /// Connection and command timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpMailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("user", &self.user)
            .field("pass", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors from loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `ANVL_MAIL_TRANSPORT` named a backend this server does not have.
    #[error("unknown mail transport {0:?} (expected `smtp` or `log`)")]
    UnknownTransport(String),

    /// A variable the selected backend needs is unset or blank.
    #[error("{0} must be set for SMTP delivery")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Default port when neither `ANVL_BIND_ADDR` nor `PORT` is set.
const DEFAULT_PORT: u16 = 3000;

/// Gmail's submission relay, which the site's credential pair logs in to.
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP timeout in seconds.
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `ANVL_BIND_ADDR` — full bind address (overrides `PORT`)
    /// - `PORT` — port to bind on `0.0.0.0` (hosting-platform convention)
    /// - `ANVL_LOG_LEVEL` — log filter (default: `info`)
    /// - `ANVL_MAIL_TRANSPORT` — `smtp` or `log` (default: `smtp`)
    /// - `EMAIL_USER` / `EMAIL_PASS` — SMTP login (required for `smtp`)
    /// - `ANVL_SMTP_HOST` — relay host (default: `smtp.gmail.com`)
    /// - `ANVL_SMTP_SECURITY` — `tls`, `starttls`, or `none` (default: `tls`)
    /// - `ANVL_SMTP_PORT` — relay port (default: by security, `465` for `tls`)
    /// - `ANVL_MAIL_TIMEOUT_SECS` — SMTP timeout (default: `10`)
    /// - `ANVL_MAIL_FROM`, `ANVL_MAIL_TO`, `ANVL_MAIL_SUBJECT` — addressing
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the mail backend is unknown or incomplete.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: ANVL_BIND_ADDR > PORT > default 127.0.0.1:3000
        let bind_addr = if let Some(addr) = lookup("ANVL_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
        };

        let log_level = lookup("ANVL_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let transport_kind = non_blank(&lookup, "ANVL_MAIL_TRANSPORT").map(|t| t.to_lowercase());
        let mail_transport = match transport_kind.as_deref() {
            Some("log") => MailTransport::Log,
            Some("smtp") | None => MailTransport::Smtp(smtp_config(&lookup)?),
            Some(other) => return Err(ConfigError::UnknownTransport(other.to_owned())),
        };

        let defaults = RelaySettings::default();
        let relay = RelaySettings {
            from: lookup("ANVL_MAIL_FROM").unwrap_or(defaults.from),
            to: lookup("ANVL_MAIL_TO").unwrap_or(defaults.to),
            subject: lookup("ANVL_MAIL_SUBJECT").unwrap_or(defaults.subject),
        };

        Ok(Self {
            bind_addr,
            log_level,
            mail_transport,
            relay,
        })
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn smtp_config<F>(lookup: &F) -> Result<SmtpMailConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let user = non_blank(lookup, "EMAIL_USER").ok_or(ConfigError::Missing("EMAIL_USER"))?;
    let pass = non_blank(lookup, "EMAIL_PASS").ok_or(ConfigError::Missing("EMAIL_PASS"))?;

    let security = match non_blank(lookup, "ANVL_SMTP_SECURITY").map(|v| v.to_lowercase()) {
        None => SmtpSecurity::Tls,
        Some(v) => match v.as_str() {
            "tls" => SmtpSecurity::Tls,
            "starttls" => SmtpSecurity::StartTls,
            "none" => SmtpSecurity::None,
            _ => {
                return Err(ConfigError::Invalid {
                    var: "ANVL_SMTP_SECURITY",
                    value: v,
                });
            }
        },
    };

    let port = match non_blank(lookup, "ANVL_SMTP_PORT") {
        None => security.default_port(),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
            var: "ANVL_SMTP_PORT",
            value: v.clone(),
        })?,
    };

    let timeout = Duration::from_secs(
        lookup("ANVL_MAIL_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_MAIL_TIMEOUT_SECS),
    );

    let host =
        non_blank(lookup, "ANVL_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_owned());

    Ok(SmtpMailConfig {
        host,
        port,
        security,
        user,
        pass,
        timeout,
    })
}

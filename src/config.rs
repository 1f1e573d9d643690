//! Environment configuration

use crate::messaging::TwilioConfig;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub twilio: TwilioConfig,
    /// Bitrix24 lead webhook; submission is skipped when absent
    pub crm_webhook_url: Option<String>,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Evict sessions idle this long; no eviction when unset
    pub session_idle_ttl: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let bind_addr = var("BIND_ADDR")
            .and_then(|raw| {
                raw.trim()
                    .parse::<IpAddr>()
                    .map_err(|_| tracing::warn!(value = %raw, "Invalid BIND_ADDR, using 0.0.0.0"))
                    .ok()
            })
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let session_idle_ttl = var("SESSION_IDLE_TTL_SECS").and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %raw, "Invalid SESSION_IDLE_TTL_SECS, eviction disabled");
                    None
                }
            }
        });

        Self {
            twilio: TwilioConfig {
                account_sid: var("TWILIO_ACCOUNT_SID").unwrap_or_default(),
                auth_token: var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
                from_number: var("TWILIO_WHATSAPP_NUMBER").unwrap_or_default(),
                api_base: var("TWILIO_API_BASE"),
            },
            crm_webhook_url: var("BITRIX_WEBHOOK_URL"),
            bind_addr,
            port,
            session_idle_ttl,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

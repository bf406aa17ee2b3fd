//! Backend entry-point: wires the onboarding REST endpoints and OpenAPI docs.
//!
//! Configuration is environment-driven and validated here, once, at startup.
//! Vendor clients and the database pool are constructed before the server
//! starts and shared read-only across workers; any group left unconfigured
//! falls back to its fixture so local bring-up needs no credentials.

mod server;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use reqwest::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::ports::{
    FixtureMailer, FixtureObjectStore, FixturePaymentAccounts, FixtureSmsVerifier, Mailer,
    ObjectStore, PaymentAccounts, SmsVerifier,
};
use backend::inbound::http::health::HealthState;
use backend::outbound::email::HttpMailer;
use backend::outbound::payments::HttpPaymentAccounts;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::outbound::sms::HttpSmsVerifier;
use backend::outbound::storage::HttpObjectStore;
use server::{ServerConfig, VendorClients};

/// Request timeout applied to every vendor client.
const VENDOR_TIMEOUT: Duration = Duration::from_secs(10);
/// Photo uploads move megabytes; give the storage client more headroom.
const STORAGE_TIMEOUT: Duration = Duration::from_secs(30);

fn parse_base_url(raw: &str, name: &str) -> std::io::Result<Url> {
    Url::parse(raw).map_err(|err| std::io::Error::other(format!("invalid {name}: {err}")))
}

fn env_pair(url_var: &str, key_var: &str) -> Option<(String, String)> {
    match (env::var(url_var), env::var(key_var)) {
        (Ok(url), Ok(key)) => Some((url, key)),
        _ => {
            warn!(url_var, key_var, "vendor not configured, using fixture");
            None
        }
    }
}

/// Build vendor clients from the environment, falling back per vendor.
fn build_vendors() -> std::io::Result<VendorClients> {
    let sms: Arc<dyn SmsVerifier> = match env_pair("SMS_VERIFY_BASE_URL", "SMS_VERIFY_API_KEY") {
        Some((url, key)) => {
            let base = parse_base_url(&url, "SMS_VERIFY_BASE_URL")?;
            let client = HttpSmsVerifier::new(base, key, VENDOR_TIMEOUT)
                .map_err(|err| std::io::Error::other(format!("sms client: {err}")))?;
            Arc::new(client)
        }
        None => Arc::new(FixtureSmsVerifier),
    };

    let payments: Arc<dyn PaymentAccounts> =
        match env_pair("PAYMENTS_BASE_URL", "PAYMENTS_SECRET_KEY") {
            Some((url, key)) => {
                let base = parse_base_url(&url, "PAYMENTS_BASE_URL")?;
                let client = HttpPaymentAccounts::new(base, key, VENDOR_TIMEOUT)
                    .map_err(|err| std::io::Error::other(format!("payments client: {err}")))?;
                Arc::new(client)
            }
            None => Arc::new(FixturePaymentAccounts),
        };

    let storage: Arc<dyn ObjectStore> = match env_pair("BLOB_STORE_BASE_URL", "BLOB_STORE_TOKEN") {
        Some((url, token)) => {
            let base = parse_base_url(&url, "BLOB_STORE_BASE_URL")?;
            let client = HttpObjectStore::new(base, token, STORAGE_TIMEOUT)
                .map_err(|err| std::io::Error::other(format!("storage client: {err}")))?;
            Arc::new(client)
        }
        None => Arc::new(FixtureObjectStore),
    };

    let mailer: Arc<dyn Mailer> = match env_pair("EMAIL_BASE_URL", "EMAIL_API_KEY") {
        Some((url, key)) => {
            let sender = env::var("EMAIL_SENDER")
                .unwrap_or_else(|_| "onboarding@marketplace.invalid".into());
            let base = parse_base_url(&url, "EMAIL_BASE_URL")?;
            let client = HttpMailer::new(base, key, sender, VENDOR_TIMEOUT)
                .map_err(|err| std::io::Error::other(format!("email client: {err}")))?;
            Arc::new(client)
        }
        None => Arc::new(FixtureMailer),
    };

    Ok(VendorClients::new(sms, payments, storage, mailer))
}

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);
    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".into())
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr)
        .with_vendors(build_vendors()?);

    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            config = config.with_db_pool(pool);
        }
        Err(_) => {
            warn!("DATABASE_URL not set, serving with fixture ports");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(%bind_addr, "onboarding backend listening");
    server.await
}

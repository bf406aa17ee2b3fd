//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use backend::domain::ports::{
    FixtureMailer, FixtureObjectStore, FixturePaymentAccounts, FixtureSmsVerifier, Mailer,
    ObjectStore, PaymentAccounts, SmsVerifier,
};
use backend::outbound::persistence::DbPool;
use std::net::SocketAddr;
use std::sync::Arc;

/// Vendor client handles constructed once at startup and shared read-only
/// across workers.
#[derive(Clone)]
pub struct VendorClients {
    pub(crate) sms: Arc<dyn SmsVerifier>,
    pub(crate) payments: Arc<dyn PaymentAccounts>,
    pub(crate) storage: Arc<dyn ObjectStore>,
    pub(crate) mailer: Arc<dyn Mailer>,
}

impl VendorClients {
    /// Construct a bundle from explicit adapter handles.
    pub fn new(
        sms: Arc<dyn SmsVerifier>,
        payments: Arc<dyn PaymentAccounts>,
        storage: Arc<dyn ObjectStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            sms,
            payments,
            storage,
            mailer,
        }
    }

    /// Fixture-backed bundle for local bring-up without vendor credentials.
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            sms: Arc::new(FixtureSmsVerifier),
            payments: Arc::new(FixturePaymentAccounts),
            storage: Arc::new(FixtureObjectStore),
            mailer: Arc::new(FixtureMailer),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) vendors: VendorClients,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    ///
    /// Vendors default to fixtures; attach real clients with
    /// [`ServerConfig::with_vendors`].
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            vendors: VendorClients::fixtures(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses the Diesel-backed provider repository;
    /// otherwise every port falls back to its fixture.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach vendor client handles.
    #[must_use]
    pub fn with_vendors(mut self, vendors: VendorClients) -> Self {
        self.vendors = vendors;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

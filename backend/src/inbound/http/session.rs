//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as resolving the authenticated provider.
//! The identity provider establishes the session upstream; this adapter only
//! reads it.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, ProviderId};

pub(crate) const PROVIDER_ID_KEY: &str = "provider_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated provider's id in the session cookie.
    pub fn persist_provider(&self, provider_id: &ProviderId) -> Result<(), Error> {
        self.0
            .insert(PROVIDER_ID_KEY, provider_id.as_ref())
            .map_err(|error| Error::unknown(format!("failed to persist session: {error}")))
    }

    /// Fetch the current provider id from the session, if present.
    pub fn provider_id(&self) -> Result<Option<ProviderId>, Error> {
        let id = self
            .0
            .get::<String>(PROVIDER_ID_KEY)
            .map_err(|error| Error::unknown(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match ProviderId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid provider id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated provider id or fail with
    /// `authentication_required`.
    pub fn require_provider_id(&self) -> Result<ProviderId, Error> {
        self.provider_id()?
            .ok_or_else(|| Error::authentication_required("Sign in to continue onboarding."))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

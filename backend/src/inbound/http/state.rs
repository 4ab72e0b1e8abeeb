//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{SubmissionsQuery, SubmitFormCommand};

/// Dependency bundle for the form handlers.
#[derive(Clone)]
pub struct HttpState {
    pub submissions: Arc<dyn SubmitFormCommand>,
    pub submissions_query: Arc<dyn SubmissionsQuery>,
}

impl HttpState {
    /// Build state from one service implementing both ports.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// use contact_form::domain::SubmissionStore;
    /// use contact_form::inbound::http::state::HttpState;
    /// use contact_form::outbound::memory::InMemorySubmissionRepository;
    ///
    /// let store = SubmissionStore::new(
    ///     Arc::new(InMemorySubmissionRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _state = HttpState::from_service(Arc::new(store));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: SubmitFormCommand + SubmissionsQuery + 'static,
    {
        Self {
            submissions: service.clone(),
            submissions_query: service,
        }
    }
}

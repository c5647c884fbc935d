// Run orchestration
//
// One dashboard run is a single linear sequence: acquire a session
// (cached, fresh, or none), fetch the two raw payloads, normalize.
// A session invalidated between the probe and the fetches is not
// retried here -- the task runs on a tight periodic schedule and the
// next invocation self-heals.

use inkhole_api::{PiholeClient, SessionManager, SessionStore};
use tracing::debug;

use crate::error::CoreError;
use crate::model::Summary;
use crate::normalize;

/// Façade over the API client and session manager for one run.
pub struct StatusMonitor<S: SessionStore> {
    client: PiholeClient,
    sessions: SessionManager<S>,
}

impl<S: SessionStore> StatusMonitor<S> {
    pub fn new(client: PiholeClient, sessions: SessionManager<S>) -> Self {
        Self { client, sessions }
    }

    /// Fetch and normalize the current appliance statistics.
    pub async fn fetch_summary(&self) -> Result<Summary, CoreError> {
        let session = self.sessions.acquire(&self.client).await?;
        debug!(authenticated = session.is_some(), "session acquired");

        let stats = self.client.get_summary(session.as_ref()).await?;
        let status = self.client.get_blocking(session.as_ref()).await?;

        normalize::normalize(&stats, &status)
    }
}

//! Authentication operations against the identity provider.

use gatehouse_core::{FlowId, Result, SessionToken};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::IdentityClient;
use crate::error::IdentityError;
use crate::flow::{Flow, FlowCompletion, FlowKind, FlowOutcome, RejectedFlow};
use crate::payload::{LoginSubmission, RegistrationSubmission};
use crate::session::Session;
use crate::user::User;

/// Session introspection endpoint.
pub const WHOAMI_PATH: &str = "/sessions/whoami";

/// Login, registration and session validation over an [`IdentityClient`].
///
/// Every operation is a single provider round-trip; no state is kept
/// between calls and nothing is retried.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: IdentityClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: IdentityClient) -> Self {
        Self { client }
    }

    /// Creates an API login flow.
    pub async fn create_login_flow(&self) -> Result<Flow, IdentityError> {
        self.create_flow(FlowKind::Login).await
    }

    /// Submits credentials to a login flow.
    #[instrument(skip_all, fields(flow_id = %flow_id))]
    pub async fn submit_login_flow(
        &self,
        flow_id: &FlowId,
        identifier: &str,
        password: &str,
    ) -> Result<FlowOutcome, IdentityError> {
        let payload = LoginSubmission::new(identifier, password);
        self.submit_flow(FlowKind::Login, flow_id, &payload).await
    }

    /// Creates an API registration flow.
    pub async fn create_registration_flow(&self) -> Result<Flow, IdentityError> {
        self.create_flow(FlowKind::Registration).await
    }

    /// Submits registration data to a registration flow.
    #[instrument(skip_all, fields(flow_id = %flow_id))]
    pub async fn submit_registration_flow(
        &self,
        flow_id: &FlowId,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<FlowOutcome, IdentityError> {
        let payload = RegistrationSubmission::new(email, password, first_name, last_name);
        self.submit_flow(FlowKind::Registration, flow_id, &payload)
            .await
    }

    /// Looks up the session behind a token.
    ///
    /// A 401 from the provider means the token does not name a live session
    /// and yields `None`. Every other non-2xx status is an error.
    #[instrument(skip_all)]
    pub async fn validate_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<Session>, IdentityError> {
        let response = self
            .client
            .get_with_session_token(WHOAMI_PATH, token)
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("session token rejected by provider");
            return Ok(None);
        }

        let session: Session = response.require_success()?.decode()?;
        debug!(
            session_id = session.id(),
            active = session.active(),
            expires_at = ?session.expires_at(),
            "session validated"
        );
        Ok(Some(session))
    }

    /// Projects the identity embedded in a session into a [`User`].
    #[must_use]
    pub fn extract_user(session: &Session) -> User {
        User::from_session(session)
    }

    #[instrument(skip_all, fields(kind = %kind))]
    async fn create_flow(&self, kind: FlowKind) -> Result<Flow, IdentityError> {
        let flow: Flow = self
            .client
            .get(kind.init_path())
            .await?
            .require_success()?
            .decode()?;

        debug!(
            flow_id = %flow.id(),
            flow_type = flow.flow_type(),
            expires_at = ?flow.expires_at(),
            "created flow"
        );
        Ok(flow)
    }

    async fn submit_flow<B>(
        &self,
        kind: FlowKind,
        flow_id: &FlowId,
        payload: &B,
    ) -> Result<FlowOutcome, IdentityError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .client
            .post_json(kind.submit_path(), &[("flow", flow_id.as_str())], payload)
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            let rejected: RejectedFlow = response.decode()?;
            let text = rejected.ui.rejection_text(kind.default_rejection());
            debug!(%kind, reason = %text, "flow submission rejected");
            return Ok(FlowOutcome::Rejected(text));
        }

        let completion: FlowCompletion = response.require_success()?.decode()?;
        Ok(FlowOutcome::Completed(completion))
    }
}

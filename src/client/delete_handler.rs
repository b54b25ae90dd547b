use std::sync::Arc;

use http::StatusCode;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::error;

use super::dom::{ClickEvent, Document};
use super::participants_api::{ClientError, ParticipantsApi};
use super::refresh::ActivitiesRefresh;

pub const DELETE_MARKER_CLASS: &str = "delete-btn";
pub const EMAIL_ATTRIBUTE: &str = "data-email";

/// Which branch an unregister took. Nothing here is surfaced to the page;
/// failures have already been logged by the time a caller sees them.
#[derive(Debug)]
pub enum UnregisterOutcome {
    Unregistered { body: Value },
    Rejected { status: StatusCode, body: Value },
    Failed(ClientError),
}

impl UnregisterOutcome {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, UnregisterOutcome::Unregistered { .. })
    }
}

#[derive(Clone)]
pub struct DeleteClickHandler {
    api: ParticipantsApi,
    refresh: Arc<dyn ActivitiesRefresh>,
    runtime: Option<Handle>,
}

impl DeleteClickHandler {
    /// Captures the current tokio runtime, if any, so clicks dispatched from
    /// threads outside the runtime still have somewhere to run.
    pub fn new(api: ParticipantsApi, refresh: Arc<dyn ActivitiesRefresh>) -> Self {
        Self {
            api,
            refresh,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Binds one listener on the document, so rows added later are covered too.
    /// Clicks are spawned on the runtime captured by `new`.
    pub fn install(&self, document: &Document) {
        let handler = self.clone();
        document.add_click_listener(move |event| {
            handler.handle_click(event);
        });
    }

    /// Spawns one unregister per qualifying click on the captured runtime, or the
    /// caller's runtime when none was captured. Repeated clicks are not de-duplicated.
    pub fn handle_click(&self, event: &ClickEvent) -> Option<JoinHandle<UnregisterOutcome>> {
        if !event.target.has_class(DELETE_MARKER_CLASS) {
            return None;
        }
        let email = event
            .target
            .attribute(EMAIL_ATTRIBUTE)
            .unwrap_or_default()
            .to_string();

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            error!(email, "No tokio runtime to unregister participant on");
            return None;
        };

        let handler = self.clone();
        Some(runtime.spawn(async move {
            handler.unregister_participant(&email).await
        }))
    }

    pub async fn unregister_participant(&self, email: &str) -> UnregisterOutcome {
        match self.api.unregister(email).await {
            Ok(resp) if resp.status.is_success() => {
                self.refresh.fetch_activities();
                UnregisterOutcome::Unregistered { body: resp.body }
            }
            Ok(resp) => {
                error!(status = %resp.status, body = %resp.body, "Error unregistering participant");
                UnregisterOutcome::Rejected {
                    status: resp.status,
                    body: resp.body,
                }
            }
            Err(e) => {
                error!(error = %e, "Error unregistering participant");
                UnregisterOutcome::Failed(e)
            }
        }
    }
}

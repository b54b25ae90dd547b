use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::participants_api::{ClientError, ParticipantsApi};
use crate::services::activities_service::ActivitiesListing;

/// The list-refresh collaborator invoked after a successful unregister.
/// Implementations must not block; fetching happens in the background.
pub trait ActivitiesRefresh: Send + Sync {
    fn fetch_activities(&self);
}

impl<F> ActivitiesRefresh for F
where
    F: Fn() + Send + Sync,
{
    fn fetch_activities(&self) {
        self()
    }
}

/// Re-fetches `/activities` and publishes the listing to subscribers.
/// `fetch_activities` spawns onto the ambient tokio runtime, so it must be
/// called from inside one (the delete handler's tasks always are).
#[derive(Clone)]
pub struct ActivitiesRefresher {
    api: ParticipantsApi,
    listing: Arc<watch::Sender<Option<ActivitiesListing>>>,
}

impl ActivitiesRefresher {
    pub fn new(api: ParticipantsApi) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            api,
            listing: Arc::new(tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ActivitiesListing>> {
        self.listing.subscribe()
    }

    pub fn current(&self) -> Option<ActivitiesListing> {
        self.listing.borrow().clone()
    }

    pub async fn reload(&self) -> Result<(), ClientError> {
        let listing = self.api.activities().await?;
        info!(activities = listing.len(), "activities list refreshed");
        self.listing.send_replace(Some(listing));
        Ok(())
    }
}

impl ActivitiesRefresh for ActivitiesRefresher {
    fn fetch_activities(&self) {
        let refresher = self.clone();
        tokio::spawn(async move {
            if let Err(e) = refresher.reload().await {
                warn!("Activities refresh failed: {}", e);
            }
        });
    }
}

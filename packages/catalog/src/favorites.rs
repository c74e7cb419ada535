//! Favorites state mirrored from the server, with optimistic toggling

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;

use crate::api::{FavoriteResponse, FavoritesApi};
use crate::error::ApiError;

/// How long a transient notification stays on screen
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    #[serde(skip)]
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration: NOTIFICATION_DURATION,
        }
    }
}

/// What happened to a toggle request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change
    Applied {
        favorited: bool,
        notification: Notification,
    },
    /// The call failed or was refused; state is back to its pre-click value
    Reverted {
        favorited: bool,
        notification: Notification,
    },
    /// A call for this resource is still in flight (button disabled)
    Busy,
}

impl ToggleOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Applied { notification, .. } | Self::Reverted { notification, .. } => {
                Some(notification)
            }
            Self::Busy => None,
        }
    }
}

/// A toggle whose server call has not been answered yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingToggle {
    resource_id: String,
    was_favorited: bool,
}

impl PendingToggle {
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// The state being requested from the server
    pub fn favorited(&self) -> bool {
        !self.was_favorited
    }
}

/// Cancels its toggle on drop unless it was settled
struct InFlight<'a> {
    store: &'a mut FavoritesStore,
    toggle: PendingToggle,
    armed: bool,
}

impl InFlight<'_> {
    fn settle(mut self, result: Result<FavoriteResponse, ApiError>) -> ToggleOutcome {
        self.armed = false;
        let toggle = self.toggle.clone();
        self.store.finish_toggle(toggle, result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let toggle = self.toggle.clone();
            self.store.cancel_toggle(toggle);
        }
    }
}

/// Favorited ids for the current page view plus in-flight requests
#[derive(Debug, Default, Clone)]
pub struct FavoritesStore {
    favorited: HashSet<String>,
    pending: HashSet<String>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_favorited(&self, resource_id: &str) -> bool {
        self.favorited.contains(resource_id)
    }

    /// Whether the toggle button for this resource is disabled
    pub fn is_pending(&self, resource_id: &str) -> bool {
        self.pending.contains(resource_id)
    }

    pub fn favorited(&self) -> impl Iterator<Item = &str> {
        self.favorited.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.favorited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorited.is_empty()
    }

    /// Replace the known state of `resource_ids` with the server's view.
    ///
    /// On failure the error is logged and the current state is kept.
    pub async fn refresh(&mut self, api: &dyn FavoritesApi, resource_ids: &[String]) {
        if resource_ids.is_empty() {
            return;
        }

        match api.check(resource_ids).await {
            Ok(favorited) => {
                for id in resource_ids {
                    if favorited.get(id).copied().unwrap_or(false) {
                        self.favorited.insert(id.clone());
                    } else {
                        self.favorited.remove(id);
                    }
                }
                tracing::debug!(
                    checked = resource_ids.len(),
                    favorited = self.favorited.len(),
                    "Favorites refreshed"
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to check favorites");
            }
        }
    }

    /// Optimistically flip a resource, then confirm with the server.
    ///
    /// The state flips before the call; a refused or failed call puts it back.
    /// Dropping the returned future before it completes also puts it back and
    /// clears the pending mark.
    pub async fn toggle(&mut self, api: &dyn FavoritesApi, resource_id: &str) -> ToggleOutcome {
        let Some(pending) = self.begin_toggle(resource_id) else {
            return ToggleOutcome::Busy;
        };

        let adding = pending.favorited();
        let in_flight = InFlight {
            store: self,
            toggle: pending,
            armed: true,
        };

        let result = if adding {
            api.add(resource_id).await
        } else {
            api.remove(resource_id).await
        };

        in_flight.settle(result)
    }

    /// First half of a toggle: flip the state and mark the id pending.
    ///
    /// Returns `None` while a call for this id is in flight.
    pub fn begin_toggle(&mut self, resource_id: &str) -> Option<PendingToggle> {
        if self.is_pending(resource_id) {
            return None;
        }

        let was_favorited = self.is_favorited(resource_id);
        self.set(resource_id, !was_favorited);
        self.pending.insert(resource_id.to_string());

        Some(PendingToggle {
            resource_id: resource_id.to_string(),
            was_favorited,
        })
    }

    /// Second half of a toggle: apply the server's answer and clear the pending mark
    pub fn finish_toggle(
        &mut self,
        toggle: PendingToggle,
        result: Result<FavoriteResponse, ApiError>,
    ) -> ToggleOutcome {
        let PendingToggle {
            resource_id,
            was_favorited,
        } = toggle;
        self.pending.remove(&resource_id);

        match result {
            Ok(response) if response.success => {
                tracing::info!(resource_id = %resource_id, favorited = !was_favorited, "Favorite toggled");
                ToggleOutcome::Applied {
                    favorited: !was_favorited,
                    notification: Notification::success(response.message),
                }
            }
            Ok(response) => {
                self.set(&resource_id, was_favorited);
                tracing::warn!(resource_id = %resource_id, message = %response.message, "Favorite toggle refused");
                ToggleOutcome::Reverted {
                    favorited: was_favorited,
                    notification: Notification::error(response.message),
                }
            }
            Err(e) => {
                self.set(&resource_id, was_favorited);
                tracing::error!(resource_id = %resource_id, error = %e, "Favorite toggle failed");
                ToggleOutcome::Reverted {
                    favorited: was_favorited,
                    notification: Notification::error("Could not update favorites. Please try again."),
                }
            }
        }
    }

    /// Abandon a toggle without an answer: back to the pre-click state, not pending
    pub fn cancel_toggle(&mut self, toggle: PendingToggle) {
        tracing::warn!(resource_id = %toggle.resource_id, "Favorite toggle abandoned");
        self.pending.remove(&toggle.resource_id);
        self.set(&toggle.resource_id, toggle.was_favorited);
    }

    fn set(&mut self, resource_id: &str, favorited: bool) {
        if favorited {
            self.favorited.insert(resource_id.to_string());
        } else {
            self.favorited.remove(resource_id);
        }
    }
}

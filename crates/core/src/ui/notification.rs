use extkit_api::{ConfigurationChange, ConfigurationStore, Window};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// How long a status bar notification stays visible.
pub const STATUS_BAR_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where user-facing notifications go, as chosen in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLocation {
    Notifications,
    StatusBar,
    Silent,
}

impl NotificationLocation {
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("notifications") => Self::Notifications,
            Some("statusbar") => Self::StatusBar,
            _ => Self::Silent,
        }
    }
}

pub struct NotificationManager {
    window: Arc<dyn Window>,
    config: Arc<dyn ConfigurationStore>,
    location_key: Option<String>,
    location: RwLock<NotificationLocation>,
}

impl NotificationManager {
    /// Reads the location from `location_key`; without a key nothing is ever shown.
    pub async fn new(
        window: Arc<dyn Window>,
        config: Arc<dyn ConfigurationStore>,
        location_key: Option<String>,
    ) -> Self {
        let location = match &location_key {
            Some(key) => NotificationLocation::from_setting(config.get(key).await.as_deref()),
            None => NotificationLocation::Silent,
        };
        Self {
            window,
            config,
            location_key,
            location: RwLock::new(location),
        }
    }

    pub async fn location(&self) -> NotificationLocation {
        *self.location.read().await
    }

    /// Re-reads the location if `change` touches its key.
    pub async fn on_configuration_changed(&self, change: &ConfigurationChange) {
        let Some(key) = &self.location_key else {
            return;
        };
        if !change.affects(key) {
            return;
        }
        let location = NotificationLocation::from_setting(self.config.get(key).await.as_deref());
        debug!("Notification location changed to {:?}", location);
        *self.location.write().await = location;
    }

    pub async fn show_message(&self, text: &str) {
        match self.location().await {
            NotificationLocation::Notifications => {
                self.window.show_information_message(text).await;
            }
            NotificationLocation::StatusBar => {
                self.window
                    .set_status_bar_message(text, STATUS_BAR_MESSAGE_TIMEOUT)
                    .await;
            }
            NotificationLocation::Silent => {}
        }
    }
}

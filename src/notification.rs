//! Transient user notifications.
//!
//! Toasts are shown for a fixed lifetime (5 seconds unless configured) and
//! then dropped. They are never persisted.

use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

/// Default time a toast stays visible.
pub const TOAST_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastMessage {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ToastMessage {
    fn expired(&self, now_ms: i64, lifetime: Duration) -> bool {
        self.timestamp + lifetime.as_millis() as i64 <= now_ms
    }
}

/// Owns the currently visible toasts.
#[derive(Debug, Clone)]
pub struct Toaster {
    toasts: Vec<ToastMessage>,
    lifetime: Duration,
    next_id: u64,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(TOAST_TIMEOUT)
    }
}

impl Toaster {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime,
            next_id: 1,
        }
    }

    /// Shows a toast stamped with the current time and returns its id.
    pub fn toast(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: ToastVariant,
    ) -> u64 {
        self.toast_at(title, description, variant, Utc::now().timestamp_millis())
    }

    /// Shows a toast with an explicit creation time.
    pub fn toast_at(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        variant: ToastVariant,
        timestamp: i64,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let message = ToastMessage {
            id,
            title: title.into(),
            description: description.into(),
            variant,
            timestamp,
        };
        log::debug!("toast {}: {} - {}", id, message.title, message.description);
        self.toasts.push(message);
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drops every toast whose lifetime has elapsed at `now_ms`.
    pub fn prune(&mut self, now_ms: i64) {
        let lifetime = self.lifetime;
        self.toasts.retain(|toast| !toast.expired(now_ms, lifetime));
    }

    /// Toasts still visible at `now_ms`, oldest first.
    pub fn active(&self, now_ms: i64) -> Vec<&ToastMessage> {
        self.toasts
            .iter()
            .filter(|toast| !toast.expired(now_ms, self.lifetime))
            .collect()
    }

    /// All toasts not yet pruned or dismissed.
    pub fn all(&self) -> &[ToastMessage] {
        &self.toasts
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let mut toaster = Toaster::default();
        let first = toaster.toast_at("a", "", ToastVariant::Default, 0);
        let second = toaster.toast_at("b", "", ToastVariant::Default, 0);
        assert!(second > first);
        assert_eq!(toaster.all().len(), 2);
    }

    #[test]
    fn test_toasts_expire_after_lifetime() {
        let mut toaster = Toaster::default();
        toaster.toast_at("Saved", "Collection saved", ToastVariant::Default, 1_000);
        toaster.toast_at("Later", "", ToastVariant::Destructive, 3_000);

        assert_eq!(toaster.active(5_999).len(), 2);
        assert_eq!(toaster.active(6_000).len(), 1);

        toaster.prune(8_000);
        assert!(toaster.all().is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut toaster = Toaster::new(Duration::from_secs(60));
        let id = toaster.toast_at("x", "y", ToastVariant::Default, 0);
        toaster.dismiss(id);
        assert!(toaster.all().is_empty());
    }
}

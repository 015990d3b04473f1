//! Notification preference toggles on the settings page.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use serde::{Deserialize, Serialize};

use crate::util::storage::{KeyValueStorage, load_json, save_json};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Email,
    OrderUpdates,
    Marketing,
    ProductUpdates,
}

impl NotificationKind {
    pub const ALL: [Self; 4] = [Self::Email, Self::OrderUpdates, Self::Marketing, Self::ProductUpdates];

    pub fn title(self) -> &'static str {
        match self {
            Self::Email => "Email Notifications",
            Self::OrderUpdates => "Order Updates",
            Self::Marketing => "Marketing Emails",
            Self::ProductUpdates => "Product Updates",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Email => "Receive notifications via email",
            Self::OrderUpdates => "Receive updates about your orders",
            Self::Marketing => "Receive marketing emails and promotions",
            Self::ProductUpdates => "Receive updates about new products",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub email: bool,
    pub order_updates: bool,
    pub marketing: bool,
    pub product_updates: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self { email: true, order_updates: true, marketing: false, product_updates: true }
    }
}

impl NotificationPreferences {
    pub fn get(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Email => self.email,
            NotificationKind::OrderUpdates => self.order_updates,
            NotificationKind::Marketing => self.marketing,
            NotificationKind::ProductUpdates => self.product_updates,
        }
    }

    pub fn toggle(&mut self, kind: NotificationKind) {
        let slot = match kind {
            NotificationKind::Email => &mut self.email,
            NotificationKind::OrderUpdates => &mut self.order_updates,
            NotificationKind::Marketing => &mut self.marketing,
            NotificationKind::ProductUpdates => &mut self.product_updates,
        };
        *slot = !*slot;
    }

    /// Stored preferences, or defaults when none are stored.
    pub fn load(storage: &impl KeyValueStorage, key: &str) -> Self {
        load_json(storage, key).unwrap_or_default()
    }

    pub fn save(&self, storage: &impl KeyValueStorage, key: &str) {
        save_json(storage, key, self);
    }
}

/// Page-lifetime editing state for the preference toggles.
///
/// Lives as long as the settings page, not the notifications tab, so
/// unsaved toggles survive tab switches. Storage is read once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreferencesDraft {
    current: NotificationPreferences,
    stored: NotificationPreferences,
    loaded: bool,
    saved: bool,
}

impl PreferencesDraft {
    pub fn current(&self) -> &NotificationPreferences {
        &self.current
    }

    /// Read stored preferences the first time; later calls return `false`.
    pub fn load_once(&mut self, storage: &impl KeyValueStorage, key: &str) -> bool {
        if self.loaded {
            return false;
        }
        self.loaded = true;
        self.stored = NotificationPreferences::load(storage, key);
        self.current = self.stored;
        true
    }

    pub fn toggle(&mut self, kind: NotificationKind) {
        self.current.toggle(kind);
        self.saved = false;
    }

    pub fn save(&mut self, storage: &impl KeyValueStorage, key: &str) {
        self.current.save(storage, key);
        self.stored = self.current;
        self.saved = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.current != self.stored
    }

    /// True right after a save, until the next toggle.
    pub fn just_saved(&self) -> bool {
        self.saved
    }
}

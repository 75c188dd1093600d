use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::MenuAudience;

/// Tenant identifier (`company_id` on the wire)
pub type CompanyId = u64;

/// Module keys a tenant can toggle for its client dashboard
pub const CLIENT_MODULE_KEYS: &[&str] = &[
    "module_projects",
    "module_tasks",
    "module_invoices",
    "module_payments",
    "module_estimates",
    "module_contracts",
    "module_tickets",
    "module_messages",
];

/// Module keys a tenant can toggle for its employee dashboard
pub const EMPLOYEE_MODULE_KEYS: &[&str] = &[
    "module_leads",
    "module_clients",
    "module_projects",
    "module_tasks",
    "module_timesheets",
    "module_attendance",
    "module_leave",
    "module_shifts",
    "module_tickets",
    "module_messages",
];

impl MenuAudience {
    pub fn known_keys(&self) -> &'static [&'static str] {
        match self {
            MenuAudience::Client => CLIENT_MODULE_KEYS,
            MenuAudience::Employee => EMPLOYEE_MODULE_KEYS,
        }
    }
}

/// Per-tenant module toggles for one audience.
///
/// A key is disabled only by an explicit `false`; a missing key is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleVisibilityMap(BTreeMap<String, bool>);

impl ModuleVisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// All known keys of the audience set to `true`
    pub fn defaults_for(audience: MenuAudience) -> Self {
        audience
            .known_keys()
            .iter()
            .map(|key| (key.to_string(), true))
            .collect()
    }

    pub fn is_enabled(&self, key: &str) -> bool {
        self.0.get(key) != Some(&false)
    }

    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Set a key, returning its previous value
    pub fn set(&mut self, key: impl Into<String>, enabled: bool) -> Option<bool> {
        self.0.insert(key.into(), enabled)
    }

    /// Restore a key to a previous value; `None` removes it
    pub fn restore(&mut self, key: &str, previous: Option<bool>) {
        match previous {
            Some(value) => {
                self.0.insert(key.to_string(), value);
            }
            None => {
                self.0.remove(key);
            }
        }
    }

    /// Overwrite every key present in `changes`
    pub fn merge(&mut self, changes: &ModuleVisibilityMap) {
        for (key, enabled) in changes.iter() {
            self.0.insert(key.to_string(), enabled);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, enabled)| (key.as_str(), *enabled))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn disabled_count(&self) -> usize {
        self.0.values().filter(|enabled| !**enabled).count()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for ModuleVisibilityMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, enabled)| (key.into(), enabled)).collect())
    }
}

/// Both visibility maps of one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSettings {
    pub company_id: CompanyId,
    #[serde(default)]
    pub client_menus: ModuleVisibilityMap,
    #[serde(default)]
    pub employee_menus: ModuleVisibilityMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ModuleSettings {
    pub fn defaults(company_id: CompanyId) -> Self {
        Self {
            company_id,
            client_menus: ModuleVisibilityMap::defaults_for(MenuAudience::Client),
            employee_menus: ModuleVisibilityMap::defaults_for(MenuAudience::Employee),
            updated_at: None,
        }
    }

    pub fn menus(&self, audience: MenuAudience) -> &ModuleVisibilityMap {
        match audience {
            MenuAudience::Client => &self.client_menus,
            MenuAudience::Employee => &self.employee_menus,
        }
    }

    pub fn menus_mut(&mut self, audience: MenuAudience) -> &mut ModuleVisibilityMap {
        match audience {
            MenuAudience::Client => &mut self.client_menus,
            MenuAudience::Employee => &mut self.employee_menus,
        }
    }
}

/// `PUT /api/module-settings` body. Absent maps are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSettingsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_menus: Option<ModuleVisibilityMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_menus: Option<ModuleVisibilityMap>,
}

impl ModuleSettingsUpdate {
    pub fn for_audience(
        company_id: CompanyId,
        audience: MenuAudience,
        changes: ModuleVisibilityMap,
    ) -> Self {
        let mut update = Self {
            company_id: Some(company_id),
            ..Self::default()
        };
        match audience {
            MenuAudience::Client => update.client_menus = Some(changes),
            MenuAudience::Employee => update.employee_menus = Some(changes),
        }
        update
    }

    pub fn changes(&self) -> impl Iterator<Item = (MenuAudience, &ModuleVisibilityMap)> {
        [
            (MenuAudience::Client, self.client_menus.as_ref()),
            (MenuAudience::Employee, self.employee_menus.as_ref()),
        ]
        .into_iter()
        .filter_map(|(audience, map)| map.map(|map| (audience, map)))
    }
}

/// `POST /api/module-settings/reset` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
}

/// `{ success, data?, error? }` response envelope shared by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

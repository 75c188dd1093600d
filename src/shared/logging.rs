//! Structured logging helpers for the CRM console
//!
//! Keeps field names consistent between the sidebar, the settings store and
//! the module settings handlers.

use crate::domain::models::{CompanyId, MenuAudience, Role};

/// Operation tag attached to every structured event
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    SettingsFetch,
    SettingsUpdate,
    SettingsReset,
    MenuComposition,
    Navigation,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::SettingsFetch => "settings_fetch",
            LogOperation::SettingsUpdate => "settings_update",
            LogOperation::SettingsReset => "settings_reset",
            LogOperation::MenuComposition => "menu_composition",
            LogOperation::Navigation => "navigation",
        }
    }
}

/// Log a fetch that was applied to the store
pub fn log_settings_fetched(company_id: CompanyId, disabled: usize) {
    tracing::info!(
        operation = LogOperation::SettingsFetch.as_str(),
        company_id = company_id,
        disabled_modules = disabled,
        "Module settings loaded"
    );
}

/// Log a fetch failure; defaults are used instead
pub fn log_settings_fetch_fallback(company_id: CompanyId, error: &str) {
    tracing::warn!(
        operation = LogOperation::SettingsFetch.as_str(),
        company_id = company_id,
        error = error,
        "Module settings fetch failed - falling back to defaults"
    );
}

/// Log a response that arrived after a newer fetch started
pub fn log_settings_fetch_stale(company_id: CompanyId, generation: u64, current: u64) {
    tracing::debug!(
        operation = LogOperation::SettingsFetch.as_str(),
        company_id = company_id,
        generation = generation,
        current_generation = current,
        "Discarded stale module settings response"
    );
}

/// Log a saved update
pub fn log_settings_updated(company_id: CompanyId, audience: MenuAudience, keys: usize) {
    tracing::info!(
        operation = LogOperation::SettingsUpdate.as_str(),
        company_id = company_id,
        audience = ?audience,
        changed_keys = keys,
        "Module settings updated"
    );
}

/// Log a failed update and its rollback
pub fn log_settings_update_rollback(
    company_id: CompanyId,
    audience: MenuAudience,
    reverted: usize,
    error: &str,
) {
    tracing::error!(
        operation = LogOperation::SettingsUpdate.as_str(),
        company_id = company_id,
        audience = ?audience,
        reverted_keys = reverted,
        error = error,
        "Module settings update failed - optimistic change reverted"
    );
}

/// Log a reset outcome
pub fn log_settings_reset(company_id: CompanyId, error: Option<&str>) {
    match error {
        None => tracing::info!(
            operation = LogOperation::SettingsReset.as_str(),
            company_id = company_id,
            "Module settings reset to defaults"
        ),
        Some(error) => tracing::error!(
            operation = LogOperation::SettingsReset.as_str(),
            company_id = company_id,
            error = error,
            "Module settings reset failed - state left unchanged"
        ),
    }
}

/// Log a registry node the composer refused to render
pub fn log_malformed_menu_item(path: &str, reason: &str) {
    tracing::warn!(
        operation = LogOperation::MenuComposition.as_str(),
        path = path,
        reason = reason,
        "Skipped malformed menu item"
    );
}

/// Log a sidebar route observation
pub fn log_route_change(role: Role, pathname: &str, expanded: Option<&str>) {
    tracing::debug!(
        operation = LogOperation::Navigation.as_str(),
        role = %role,
        pathname = pathname,
        expanded = expanded,
        "Sidebar observed route change"
    );
}

use dioxus::prelude::*;

use crate::domain::models::{CompanyId, MenuAudience, ModuleVisibilityMap, Role};
use crate::shared::services::{HttpModuleSettingsApi, ModuleSettingsApi};
use crate::shared::state::ModuleVisibilityStore;

/// Tenant module settings, provided by the layout through context
#[derive(Clone, Copy, PartialEq)]
pub struct ModuleSettingsHandle {
    pub store: Signal<ModuleVisibilityStore>,
    /// Last user-facing error, cleared by the toast
    pub toast: Signal<Option<String>>,
}

impl ModuleSettingsHandle {
    /// Map the menu filter should use for `role`
    pub fn visibility_for(&self, role: Role) -> Option<ModuleVisibilityMap> {
        self.store.read().visibility_for(role).cloned()
    }

    /// Flip one module for an audience; saved in the background, reverted on failure
    pub fn set_module(&self, actor: Role, audience: MenuAudience, key: String, enabled: bool) {
        let mut store = self.store;
        let mut toast = self.toast;
        let changes: ModuleVisibilityMap = [(key, enabled)].into_iter().collect();

        let pending = match store.write().apply_update(audience.role(), changes) {
            Ok(pending) => pending,
            Err(e) => {
                toast.set(Some(e.to_string()));
                return;
            }
        };

        spawn(async move {
            let api = HttpModuleSettingsApi::new().with_role(actor);
            let result = api.update(pending.company_id, &pending.request).await;
            if let Err(e) = store.write().finish_update(pending, result) {
                toast.set(Some(format!("Could not save module settings: {}", e)));
            }
        });
    }

    /// Put both maps of the tenant back to all-enabled
    pub fn reset(&self, actor: Role) {
        let mut store = self.store;
        let mut toast = self.toast;

        let ticket = match store.read().begin_reset() {
            Ok(ticket) => ticket,
            Err(e) => {
                toast.set(Some(e.to_string()));
                return;
            }
        };

        spawn(async move {
            let api = HttpModuleSettingsApi::new().with_role(actor);
            let result = api.reset(ticket.company_id).await;
            if let Err(e) = store.write().finish_reset(ticket, result) {
                toast.set(Some(format!("Could not reset module settings: {}", e)));
            }
        });
    }

    /// Fetch again, e.g. after a fallback
    pub fn reload(&self) {
        if let Some(company_id) = self.store.read().company_id() {
            spawn(load_settings(self.store, company_id));
        }
    }
}

async fn load_settings(mut store: Signal<ModuleVisibilityStore>, company_id: CompanyId) {
    let ticket = store.write().begin_fetch(company_id);
    let result = HttpModuleSettingsApi::new().fetch(company_id).await;
    store.write().finish_fetch(ticket, result);
}

/// Own the tenant's module settings and fetch them whenever the tenant changes.
/// Responses for a previous tenant are discarded by the store.
pub fn use_module_settings(company_id: CompanyId) -> ModuleSettingsHandle {
    let store = use_signal(ModuleVisibilityStore::new);
    let toast = use_signal(|| None::<String>);

    use_effect(use_reactive!(|(company_id,)| {
        spawn(load_settings(store, company_id));
    }));

    ModuleSettingsHandle { store, toast }
}

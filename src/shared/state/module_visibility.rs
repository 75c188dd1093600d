//! Client-side store for a tenant's module visibility maps.
//!
//! Network calls are split into a synchronous `begin_*` step that returns a
//! ticket and a `finish_*` step that consumes it, so the store is never
//! borrowed across an `.await`. Tickets let late responses be recognised
//! and ignored.

use crate::domain::models::{
    CompanyId, MenuAudience, ModuleSettings, ModuleSettingsUpdate, ModuleVisibilityMap, Role,
};
use crate::shared::errors::{AppError, Result};
use crate::shared::logging::{
    log_settings_fetch_fallback, log_settings_fetch_stale, log_settings_fetched,
    log_settings_reset, log_settings_update_rollback, log_settings_updated,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    /// Fetch failed; defaults are in use
    Fallback(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub company_id: CompanyId,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    FellBack,
    Stale,
}

/// An optimistic change waiting for the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    id: u64,
    pub company_id: CompanyId,
    pub audience: MenuAudience,
    /// Touched keys with their value before the change
    previous: Vec<(String, Option<bool>)>,
    applied: ModuleVisibilityMap,
    pub request: ModuleSettingsUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket {
    pub company_id: CompanyId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleVisibilityStore {
    company_id: Option<CompanyId>,
    settings: ModuleSettings,
    generation: u64,
    version: u64,
    status: LoadStatus,
    next_update: u64,
    /// Optimistic changes not yet settled, oldest first
    in_flight: Vec<(u64, MenuAudience, ModuleVisibilityMap)>,
}

impl Default for ModuleVisibilityStore {
    fn default() -> Self {
        Self {
            company_id: None,
            settings: ModuleSettings::defaults(0),
            generation: 0,
            version: 0,
            status: LoadStatus::Idle,
            next_update: 0,
            in_flight: Vec::new(),
        }
    }
}

impl ModuleVisibilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Bumped on every change to the maps
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> &ModuleSettings {
        &self.settings
    }

    /// Map the menu filter should use for `role`; `None` for unfiltered roles
    pub fn visibility_for(&self, role: Role) -> Option<&ModuleVisibilityMap> {
        role.audience().map(|audience| self.settings.menus(audience))
    }

    /// Start loading a tenant. Switching tenant drops the previous tenant's maps.
    pub fn begin_fetch(&mut self, company_id: CompanyId) -> FetchTicket {
        if self.company_id != Some(company_id) {
            self.company_id = Some(company_id);
            self.settings = ModuleSettings::defaults(company_id);
            self.in_flight.clear();
            self.version += 1;
        }
        self.generation += 1;
        self.status = LoadStatus::Loading;
        FetchTicket {
            company_id,
            generation: self.generation,
        }
    }

    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ModuleSettings>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation || Some(ticket.company_id) != self.company_id {
            log_settings_fetch_stale(ticket.company_id, ticket.generation, self.generation);
            return FetchOutcome::Stale;
        }

        self.version += 1;
        match result {
            Ok(mut settings) => {
                settings.company_id = ticket.company_id;
                log_settings_fetched(
                    ticket.company_id,
                    settings.client_menus.disabled_count() + settings.employee_menus.disabled_count(),
                );
                self.settings = settings;
                self.overlay_in_flight();
                self.status = LoadStatus::Ready;
                FetchOutcome::Applied
            }
            Err(e) => {
                let message = e.to_string();
                log_settings_fetch_fallback(ticket.company_id, &message);
                self.settings = ModuleSettings::defaults(ticket.company_id);
                self.overlay_in_flight();
                self.status = LoadStatus::Fallback(message);
                FetchOutcome::FellBack
            }
        }
    }

    /// Apply `changes` locally right away and describe the request to send
    pub fn apply_update(&mut self, role: Role, changes: ModuleVisibilityMap) -> Result<PendingUpdate> {
        let company_id = self.company_id.ok_or(AppError::NoTenant)?;
        let audience = role
            .audience()
            .ok_or_else(|| AppError::NoAudience(role.to_string()))?;

        let menus = self.settings.menus_mut(audience);
        let previous = changes
            .iter()
            .map(|(key, enabled)| (key.to_string(), menus.set(key, enabled)))
            .collect();
        self.version += 1;

        self.next_update += 1;
        let id = self.next_update;
        self.in_flight.push((id, audience, changes.clone()));

        Ok(PendingUpdate {
            id,
            company_id,
            audience,
            previous,
            request: ModuleSettingsUpdate::for_audience(company_id, audience, changes.clone()),
            applied: changes,
        })
    }

    /// Settle an optimistic change.
    ///
    /// A touched key only takes the server's value, or goes back to its
    /// previous one on failure, while it still holds what this change set.
    /// A later edit of the same key is never overwritten or undone.
    pub fn finish_update(&mut self, pending: PendingUpdate, result: Result<ModuleSettings>) -> Result<()> {
        if Some(pending.company_id) != self.company_id {
            return result.map(|_| ());
        }
        self.in_flight.retain(|(id, _, _)| *id != pending.id);

        match result {
            Ok(server) => {
                let menus = self.settings.menus_mut(pending.audience);
                let confirmed = server.menus(pending.audience);
                for (key, _) in &pending.previous {
                    if menus.get(key) != pending.applied.get(key) {
                        continue;
                    }
                    if let Some(enabled) = confirmed.get(key) {
                        menus.set(key.as_str(), enabled);
                    }
                }
                self.settings.updated_at = server.updated_at;
                self.version += 1;
                log_settings_updated(pending.company_id, pending.audience, pending.previous.len());
                Ok(())
            }
            Err(e) => {
                let menus = self.settings.menus_mut(pending.audience);
                let mut reverted = 0;
                for (key, previous) in &pending.previous {
                    if menus.get(key) == pending.applied.get(key) {
                        menus.restore(key, *previous);
                        reverted += 1;
                    }
                }
                self.version += 1;
                log_settings_update_rollback(pending.company_id, pending.audience, reverted, &e.to_string());
                Err(e)
            }
        }
    }

    /// Re-apply unsettled optimistic changes over freshly loaded maps
    fn overlay_in_flight(&mut self) {
        for (_, audience, changes) in &self.in_flight {
            self.settings.menus_mut(*audience).merge(changes);
        }
    }

    pub fn begin_reset(&self) -> Result<ResetTicket> {
        let company_id = self.company_id.ok_or(AppError::NoTenant)?;
        Ok(ResetTicket { company_id })
    }

    /// Apply a reset response. A failed reset leaves the maps untouched.
    pub fn finish_reset(&mut self, ticket: ResetTicket, result: Result<ModuleSettings>) -> Result<()> {
        match result {
            Ok(mut settings) => {
                log_settings_reset(ticket.company_id, None);
                if Some(ticket.company_id) == self.company_id {
                    settings.company_id = ticket.company_id;
                    self.settings = settings;
                    self.status = LoadStatus::Ready;
                    // Any fetch still in flight predates the reset
                    self.generation += 1;
                    self.version += 1;
                }
                Ok(())
            }
            Err(e) => {
                log_settings_reset(ticket.company_id, Some(&e.to_string()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::services::ModuleSettingsApi;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn map(entries: &[(&str, bool)]) -> ModuleVisibilityMap {
        entries.iter().map(|(key, enabled)| (*key, *enabled)).collect()
    }

    fn loaded(company_id: CompanyId) -> ModuleVisibilityStore {
        let mut store = ModuleVisibilityStore::new();
        let ticket = store.begin_fetch(company_id);
        store.finish_fetch(ticket, Ok(ModuleSettings::defaults(company_id)));
        store
    }

    /// In-process settings backend that can be told to fail
    struct FakeApi {
        settings: RefCell<ModuleSettings>,
        fail: bool,
    }

    impl FakeApi {
        fn new(company_id: CompanyId, fail: bool) -> Self {
            Self {
                settings: RefCell::new(ModuleSettings::defaults(company_id)),
                fail,
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail {
                Err(AppError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl ModuleSettingsApi for FakeApi {
        async fn fetch(&self, _company_id: CompanyId) -> Result<ModuleSettings> {
            self.check()?;
            Ok(self.settings.borrow().clone())
        }

        async fn update(&self, _company_id: CompanyId, update: &ModuleSettingsUpdate) -> Result<ModuleSettings> {
            self.check()?;
            let mut settings = self.settings.borrow_mut();
            for (audience, changes) in update.changes() {
                settings.menus_mut(audience).merge(changes);
            }
            Ok(settings.clone())
        }

        async fn reset(&self, company_id: CompanyId) -> Result<ModuleSettings> {
            self.check()?;
            *self.settings.borrow_mut() = ModuleSettings::defaults(company_id);
            Ok(ModuleSettings::defaults(company_id))
        }
    }

    #[test]
    fn test_unfiltered_roles_have_no_visibility() {
        let store = loaded(1);
        assert!(store.visibility_for(Role::Admin).is_none());
        assert!(store.visibility_for(Role::SuperAdmin).is_none());
        assert!(store.visibility_for(Role::Client).is_some());
    }

    #[test]
    fn test_fetch_applies_server_maps() {
        let api = FakeApi::new(3, false);
        api.settings.borrow_mut().client_menus.set("module_invoices", false);
        let mut store = ModuleVisibilityStore::new();

        let ticket = store.begin_fetch(3);
        assert_eq!(store.status(), &LoadStatus::Loading);
        let outcome = store.finish_fetch(ticket, block_on(api.fetch(3)));

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(store.status(), &LoadStatus::Ready);
        assert!(!store.visibility_for(Role::Client).unwrap().is_enabled("module_invoices"));
    }

    #[test]
    fn test_fetch_failure_falls_back_to_defaults() {
        let api = FakeApi::new(3, true);
        let mut store = ModuleVisibilityStore::new();

        let ticket = store.begin_fetch(3);
        let outcome = store.finish_fetch(ticket, block_on(api.fetch(3)));

        assert_eq!(outcome, FetchOutcome::FellBack);
        assert!(matches!(store.status(), LoadStatus::Fallback(_)));
        assert_eq!(store.snapshot(), &ModuleSettings::defaults(3));
    }

    #[test]
    fn test_stale_fetch_is_ignored() {
        let mut store = ModuleVisibilityStore::new();
        let old = store.begin_fetch(1);
        let current = store.begin_fetch(2);

        let mut stale = ModuleSettings::defaults(1);
        stale.client_menus.set("module_tasks", false);
        assert_eq!(store.finish_fetch(old, Ok(stale)), FetchOutcome::Stale);
        assert!(store.visibility_for(Role::Client).unwrap().is_enabled("module_tasks"));

        assert_eq!(
            store.finish_fetch(current, Ok(ModuleSettings::defaults(2))),
            FetchOutcome::Applied
        );
        assert_eq!(store.company_id(), Some(2));
    }

    #[test]
    fn test_update_without_tenant_fails() {
        let mut store = ModuleVisibilityStore::new();
        let err = store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap_err();
        assert!(matches!(err, AppError::NoTenant));
    }

    #[test]
    fn test_update_for_admin_has_no_audience() {
        let mut store = loaded(1);
        let err = store.apply_update(Role::Admin, map(&[("module_tasks", false)])).unwrap_err();
        assert!(matches!(err, AppError::NoAudience(_)));
    }

    #[test]
    fn test_optimistic_update_then_confirm() {
        let api = FakeApi::new(1, false);
        let mut store = loaded(1);

        let pending = store.apply_update(Role::Employee, map(&[("module_leave", false)])).unwrap();
        assert!(!store.visibility_for(Role::Employee).unwrap().is_enabled("module_leave"));

        let result = block_on(api.update(1, &pending.request));
        store.finish_update(pending, result).unwrap();

        assert!(!store.visibility_for(Role::Employee).unwrap().is_enabled("module_leave"));
        assert!(!api.settings.borrow().employee_menus.is_enabled("module_leave"));
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let api = FakeApi::new(1, true);
        let mut store = loaded(1);
        let before = store.snapshot().clone();

        let pending = store.apply_update(Role::Client, map(&[("module_invoices", false)])).unwrap();
        let result = block_on(api.update(1, &pending.request));

        assert!(store.finish_update(pending, result).is_err());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_rollback_keeps_concurrent_edit() {
        let mut store = loaded(1);

        let first = store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap();
        // A second toggle of the same key lands before the first fails
        let _second = store.apply_update(Role::Client, map(&[("module_tasks", true)])).unwrap();

        let result = Err(AppError::Rejected("boom".to_string()));
        assert!(store.finish_update(first, result).is_err());

        assert_eq!(store.visibility_for(Role::Client).unwrap().get("module_tasks"), Some(true));
    }

    #[test]
    fn test_out_of_order_confirmations_keep_latest_edit() {
        let mut store = loaded(1);

        let first = store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap();
        let second = store.apply_update(Role::Client, map(&[("module_tasks", true)])).unwrap();

        let mut after_second = ModuleSettings::defaults(1);
        after_second.client_menus.set("module_tasks", true);
        store.finish_update(second, Ok(after_second)).unwrap();

        // The first response arrives last and carries the older value
        let mut after_first = ModuleSettings::defaults(1);
        after_first.client_menus.set("module_tasks", false);
        store.finish_update(first, Ok(after_first)).unwrap();

        assert_eq!(store.visibility_for(Role::Client).unwrap().get("module_tasks"), Some(true));
    }

    #[test]
    fn test_fetch_keeps_unsettled_edit() {
        let mut store = loaded(1);
        let ticket = store.begin_fetch(1);
        let pending = store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap();

        // The fetch was answered before the server saw the edit
        assert_eq!(
            store.finish_fetch(ticket, Ok(ModuleSettings::defaults(1))),
            FetchOutcome::Applied
        );
        assert_eq!(store.visibility_for(Role::Client).unwrap().get("module_tasks"), Some(false));

        let mut confirmed = ModuleSettings::defaults(1);
        confirmed.client_menus.set("module_tasks", false);
        store.finish_update(pending, Ok(confirmed)).unwrap();

        let ticket = store.begin_fetch(1);
        store.finish_fetch(ticket, Ok(ModuleSettings::defaults(1)));
        assert_eq!(store.visibility_for(Role::Client).unwrap().get("module_tasks"), Some(true));
    }

    #[test]
    fn test_rollback_removes_key_absent_before() {
        let mut store = ModuleVisibilityStore::new();
        let ticket = store.begin_fetch(1);
        let mut sparse = ModuleSettings::defaults(1);
        sparse.client_menus = ModuleVisibilityMap::new();
        store.finish_fetch(ticket, Ok(sparse));

        let pending = store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap();
        let _ = store.finish_update(pending, Err(AppError::Transport("down".to_string())));

        assert!(store.visibility_for(Role::Client).unwrap().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let api = FakeApi::new(1, false);
        let mut store = loaded(1);
        let pending = store.apply_update(Role::Client, map(&[("module_tickets", false)])).unwrap();
        let result = block_on(api.update(1, &pending.request));
        store.finish_update(pending, result).unwrap();

        let ticket = store.begin_reset().unwrap();
        store.finish_reset(ticket, block_on(api.reset(1))).unwrap();

        assert_eq!(store.snapshot().client_menus, ModuleSettings::defaults(1).client_menus);
    }

    #[test]
    fn test_failed_reset_leaves_state_unchanged() {
        let mut store = loaded(1);
        let pending = store.apply_update(Role::Client, map(&[("module_tickets", false)])).unwrap();
        store.finish_update(pending, Ok({
            let mut confirmed = ModuleSettings::defaults(1);
            confirmed.client_menus.set("module_tickets", false);
            confirmed
        })).unwrap();
        let before = store.snapshot().clone();

        let ticket = store.begin_reset().unwrap();
        let result = block_on(FakeApi::new(1, true).reset(1));
        assert!(store.finish_reset(ticket, result).is_err());

        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn test_reset_makes_inflight_fetch_stale() {
        let mut store = loaded(1);
        let inflight = store.begin_fetch(1);
        let ticket = store.begin_reset().unwrap();
        store.finish_reset(ticket, Ok(ModuleSettings::defaults(1))).unwrap();

        let mut old = ModuleSettings::defaults(1);
        old.employee_menus.set("module_shifts", false);
        assert_eq!(store.finish_fetch(inflight, Ok(old)), FetchOutcome::Stale);
    }

    #[test]
    fn test_version_moves_on_every_change() {
        let mut store = ModuleVisibilityStore::new();
        let v0 = store.version();
        let ticket = store.begin_fetch(1);
        store.finish_fetch(ticket, Ok(ModuleSettings::defaults(1)));
        let v1 = store.version();
        store.apply_update(Role::Client, map(&[("module_tasks", false)])).unwrap();

        assert!(v1 > v0);
        assert!(store.version() > v1);
    }
}

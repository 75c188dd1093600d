//! Module settings endpoints
//!
//! Every response uses the `{ success, data?, error? }` envelope, including
//! errors, so the client has a single decoding path.

use std::sync::Arc;

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use dashmap::DashMap;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::domain::models::{
    ApiEnvelope, CompanyId, ModuleSettings, ModuleSettingsUpdate, ResetRequest, Role,
};
use crate::infrastructure::storage::{InMemoryModuleSettingsRepository, ModuleSettingsRepository};
use crate::shared::errors::{AppError, Result};
use crate::shared::services::ROLE_HEADER;

/// Shared state for the module settings handlers
#[derive(Clone)]
pub struct ModuleSettingsState {
    repo: Arc<dyn ModuleSettingsRepository>,
    /// Held from load to save so writes to one tenant never interleave
    write_locks: Arc<DashMap<CompanyId, Arc<Mutex<()>>>>,
}

impl ModuleSettingsState {
    pub fn new(repo: Arc<dyn ModuleSettingsRepository>) -> Self {
        Self {
            repo,
            write_locks: Arc::new(DashMap::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryModuleSettingsRepository::new()))
    }

    /// Stored settings, or defaults for a tenant that never saved any
    pub async fn current(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        Ok(self
            .repo
            .load(company_id)
            .await?
            .unwrap_or_else(|| ModuleSettings::defaults(company_id)))
    }

    fn tenant_lock(&self, company_id: CompanyId) -> Arc<Mutex<()>> {
        self.write_locks.entry(company_id).or_default().value().clone()
    }

    /// Merge the provided maps key by key over the stored ones
    pub async fn apply(&self, company_id: CompanyId, update: &ModuleSettingsUpdate) -> Result<ModuleSettings> {
        validate_update(update)?;

        let lock = self.tenant_lock(company_id);
        let _guard = lock.lock().await;
        let mut settings = self.current(company_id).await?;
        for (audience, changes) in update.changes() {
            settings.menus_mut(audience).merge(changes);
        }
        settings.updated_at = Some(Utc::now());

        self.repo.save(&settings).await?;
        Ok(settings)
    }

    pub async fn reset(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        let lock = self.tenant_lock(company_id);
        let _guard = lock.lock().await;
        self.repo.delete(company_id).await?;
        Ok(ModuleSettings::defaults(company_id))
    }
}

/// Reject keys that no menu of the audience is gated by
pub fn validate_update(update: &ModuleSettingsUpdate) -> Result<()> {
    for (audience, changes) in update.changes() {
        if let Some(key) = changes.keys().find(|key| !audience.known_keys().contains(key)) {
            return Err(AppError::UnknownModuleKey {
                audience,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CompanyQuery {
    pub company_id: Option<CompanyId>,
}

type ApiResponse = (StatusCode, Json<ApiEnvelope<ModuleSettings>>);

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::MissingCompany
        | AppError::CompanyMismatch { .. }
        | AppError::UnknownModuleKey { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(result: Result<ModuleSettings>) -> ApiResponse {
    match result {
        Ok(settings) => (StatusCode::OK, Json(ApiEnvelope::ok(settings))),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Module settings request failed: {}", e);
            } else {
                tracing::warn!("Module settings request rejected: {}", e);
            }
            (status, Json(ApiEnvelope::err(e.to_string())))
        }
    }
}

/// The query string wins; a body `company_id` must agree with it
fn resolve_company(query: Option<CompanyId>, body: Option<CompanyId>) -> Result<CompanyId> {
    match (query, body) {
        (Some(query), Some(body)) if query != body => Err(AppError::CompanyMismatch { query, body }),
        (Some(id), _) | (None, Some(id)) => Ok(id),
        (None, None) => Err(AppError::MissingCompany),
    }
}

/// Only admins and super-admins may write
fn require_manager(headers: &HeaderMap) -> Result<Role> {
    let raw = headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match raw.parse::<Role>() {
        Ok(role) if role.can_manage_modules() => Ok(role),
        Ok(role) => Err(AppError::Forbidden(role.to_string())),
        Err(_) => Err(AppError::Forbidden(if raw.is_empty() { "anonymous".to_string() } else { raw.to_string() })),
    }
}

/// GET /api/module-settings?company_id=
pub async fn get_module_settings_handler(
    Extension(state): Extension<ModuleSettingsState>,
    Query(query): Query<CompanyQuery>,
) -> ApiResponse {
    let result = async {
        let company_id = resolve_company(query.company_id, None)?;
        state.current(company_id).await
    }
    .await;
    respond(result)
}

/// PUT /api/module-settings?company_id=
pub async fn update_module_settings_handler(
    Extension(state): Extension<ModuleSettingsState>,
    Query(query): Query<CompanyQuery>,
    headers: HeaderMap,
    Json(update): Json<ModuleSettingsUpdate>,
) -> ApiResponse {
    let result = async {
        let role = require_manager(&headers)?;
        let company_id = resolve_company(query.company_id, update.company_id)?;
        let settings = state.apply(company_id, &update).await?;
        tracing::info!(
            company_id = company_id,
            role = %role,
            audiences = update.changes().count(),
            "Module settings saved"
        );
        Ok(settings)
    }
    .await;
    respond(result)
}

/// POST /api/module-settings/reset?company_id=
pub async fn reset_module_settings_handler(
    Extension(state): Extension<ModuleSettingsState>,
    Query(query): Query<CompanyQuery>,
    headers: HeaderMap,
    Json(request): Json<ResetRequest>,
) -> ApiResponse {
    let result = async {
        let role = require_manager(&headers)?;
        let company_id = resolve_company(query.company_id, request.company_id)?;
        let settings = state.reset(company_id).await?;
        tracing::info!(company_id = company_id, role = %role, "Module settings reset");
        Ok(settings)
    }
    .await;
    respond(result)
}

/// Standalone router for the module settings API
pub fn module_settings_router(state: ModuleSettingsState) -> Router {
    Router::new()
        .route(
            "/api/module-settings",
            get(get_module_settings_handler).put(update_module_settings_handler),
        )
        .route("/api/module-settings/reset", post(reset_module_settings_handler))
        .layer(Extension(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        role: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, ApiEnvelope<ModuleSettings>) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            request = request.header(ROLE_HEADER, role);
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_get_returns_defaults_for_new_tenant() {
        let router = module_settings_router(ModuleSettingsState::in_memory());

        let (status, envelope) = call(&router, "GET", "/api/module-settings?company_id=5", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap(), ModuleSettings::defaults(5));
    }

    #[tokio::test]
    async fn test_get_requires_company() {
        let router = module_settings_router(ModuleSettingsState::in_memory());

        let (status, envelope) = call(&router, "GET", "/api/module-settings", None, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!envelope.success);
        assert!(envelope.error.is_some());
    }

    #[tokio::test]
    async fn test_put_requires_manager_role() {
        let router = module_settings_router(ModuleSettingsState::in_memory());
        let body = serde_json::json!({ "company_id": 1, "client_menus": { "module_invoices": false } });

        let (anonymous, _) = call(&router, "PUT", "/api/module-settings?company_id=1", None, Some(body.clone())).await;
        let (client, _) = call(&router, "PUT", "/api/module-settings?company_id=1", Some("client"), Some(body)).await;

        assert_eq!(anonymous, StatusCode::FORBIDDEN);
        assert_eq!(client, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_put_merges_and_isolates_tenants() {
        let router = module_settings_router(ModuleSettingsState::in_memory());
        let body = serde_json::json!({ "company_id": 1, "client_menus": { "module_invoices": false } });

        let (status, envelope) = call(&router, "PUT", "/api/module-settings?company_id=1", Some("admin"), Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let saved = envelope.data.unwrap();
        assert!(!saved.client_menus.is_enabled("module_invoices"));
        assert!(saved.client_menus.is_enabled("module_tasks"));
        assert!(saved.updated_at.is_some());

        let (_, other) = call(&router, "GET", "/api/module-settings?company_id=2", None, None).await;
        assert!(other.data.unwrap().client_menus.is_enabled("module_invoices"));
    }

    #[tokio::test]
    async fn test_put_rejects_unknown_key_and_company_mismatch() {
        let router = module_settings_router(ModuleSettingsState::in_memory());

        let unknown = serde_json::json!({ "employee_menus": { "module_payroll": false } });
        let (status, envelope) = call(&router, "PUT", "/api/module-settings?company_id=1", Some("admin"), Some(unknown)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(envelope.error.unwrap().contains("module_payroll"));

        let mismatch = serde_json::json!({ "company_id": 2, "client_menus": {} });
        let (status, _) = call(&router, "PUT", "/api/module-settings?company_id=1", Some("admin"), Some(mismatch)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let state = ModuleSettingsState::in_memory();
        let router = module_settings_router(state.clone());
        let update = ModuleSettingsUpdate::for_audience(
            3,
            crate::domain::models::MenuAudience::Employee,
            [("module_leave", false)].into_iter().collect(),
        );
        state.apply(3, &update).await.unwrap();

        let (status, envelope) = call(
            &router,
            "POST",
            "/api/module-settings/reset?company_id=3",
            Some("super-admin"),
            Some(serde_json::json!({ "company_id": 3 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.data.unwrap(), ModuleSettings::defaults(3));
        assert_eq!(state.current(3).await.unwrap(), ModuleSettings::defaults(3));
    }

    /// Wraps a repository and stalls every load, widening the gap between
    /// read and write
    struct SlowRepository {
        inner: InMemoryModuleSettingsRepository,
    }

    #[async_trait::async_trait]
    impl ModuleSettingsRepository for SlowRepository {
        async fn load(&self, company_id: CompanyId) -> Result<Option<ModuleSettings>> {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.inner.load(company_id).await
        }

        async fn save(&self, settings: &ModuleSettings) -> Result<()> {
            self.inner.save(settings).await
        }

        async fn delete(&self, company_id: CompanyId) -> Result<()> {
            self.inner.delete(company_id).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_updates_to_one_tenant_both_persist() {
        let state = ModuleSettingsState::new(Arc::new(SlowRepository {
            inner: InMemoryModuleSettingsRepository::new(),
        }));
        let client = crate::domain::models::MenuAudience::Client;
        let tasks = ModuleSettingsUpdate::for_audience(1, client, [("module_tasks", false)].into_iter().collect());
        let tickets = ModuleSettingsUpdate::for_audience(1, client, [("module_tickets", false)].into_iter().collect());

        let (a, b) = tokio::join!(state.apply(1, &tasks), state.apply(1, &tickets));
        a.unwrap();
        b.unwrap();

        let stored = state.current(1).await.unwrap();
        assert!(!stored.client_menus.is_enabled("module_tasks"));
        assert!(!stored.client_menus.is_enabled("module_tickets"));
    }

    #[test]
    fn test_resolve_company() {
        assert_eq!(resolve_company(Some(1), None).unwrap(), 1);
        assert_eq!(resolve_company(None, Some(2)).unwrap(), 2);
        assert_eq!(resolve_company(Some(3), Some(3)).unwrap(), 3);
        assert!(matches!(resolve_company(Some(1), Some(2)), Err(AppError::CompanyMismatch { .. })));
        assert!(matches!(resolve_company(None, None), Err(AppError::MissingCompany)));
    }
}

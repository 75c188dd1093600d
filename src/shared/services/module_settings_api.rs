#[cfg(target_arch = "wasm32")]
use reqwasm::http::Request;

use crate::config::ClientConfig;
use crate::domain::models::{
    ApiEnvelope, CompanyId, ModuleSettings, ModuleSettingsUpdate, ResetRequest, Role,
};
use crate::shared::errors::{AppError, Result};

/// Header carrying the caller's role on write requests
pub const ROLE_HEADER: &str = "x-user-role";

/// Transport for a tenant's module settings.
///
/// `success: false` responses and transport failures both come back as `Err`.
#[allow(async_fn_in_trait)]
pub trait ModuleSettingsApi {
    async fn fetch(&self, company_id: CompanyId) -> Result<ModuleSettings>;

    async fn update(
        &self,
        company_id: CompanyId,
        update: &ModuleSettingsUpdate,
    ) -> Result<ModuleSettings>;

    async fn reset(&self, company_id: CompanyId) -> Result<ModuleSettings>;
}

// HTTP client for the module settings endpoints
#[derive(Clone)]
pub struct HttpModuleSettingsApi {
    base_url: String,
    role: Option<Role>,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::Client,
}

impl HttpModuleSettingsApi {
    pub fn new() -> Self {
        Self::with_base_url(ClientConfig::default().api_base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            role: None,
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::Client::new(),
        }
    }

    /// Role sent with write requests
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    fn settings_url(&self, company_id: CompanyId) -> String {
        format!("{}/api/module-settings?company_id={}", self.base_url, company_id)
    }

    fn reset_url(&self, company_id: CompanyId) -> String {
        format!("{}/api/module-settings/reset?company_id={}", self.base_url, company_id)
    }

    fn role_header(&self) -> &'static str {
        self.role.map(|role| role.slug()).unwrap_or_default()
    }
}

impl Default for HttpModuleSettingsApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a raw response into settings.
///
/// A successful envelope without `data` (reset acknowledgements) means the
/// tenant is back on defaults.
pub fn decode_settings_response(
    status: u16,
    body: &str,
    company_id: CompanyId,
) -> Result<ModuleSettings> {
    let envelope: ApiEnvelope<ModuleSettings> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => {
            return Err(AppError::Transport(format!("HTTP {}", status)));
        }
        Err(e) => return Err(e.into()),
    };

    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(AppError::Rejected(message));
    }

    Ok(envelope
        .data
        .unwrap_or_else(|| ModuleSettings::defaults(company_id)))
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpModuleSettingsApi {
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        company_id: CompanyId,
    ) -> Result<ModuleSettings> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        decode_settings_response(status, &body, company_id)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ModuleSettingsApi for HttpModuleSettingsApi {
    async fn fetch(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        let request = self.client.get(self.settings_url(company_id));
        self.send(request, company_id).await
    }

    async fn update(
        &self,
        company_id: CompanyId,
        update: &ModuleSettingsUpdate,
    ) -> Result<ModuleSettings> {
        let request = self
            .client
            .put(self.settings_url(company_id))
            .header(ROLE_HEADER, self.role_header())
            .json(update);
        self.send(request, company_id).await
    }

    async fn reset(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        let request = self
            .client
            .post(self.reset_url(company_id))
            .header(ROLE_HEADER, self.role_header())
            .json(&ResetRequest {
                company_id: Some(company_id),
            });
        self.send(request, company_id).await
    }
}

#[cfg(target_arch = "wasm32")]
impl ModuleSettingsApi for HttpModuleSettingsApi {
    async fn fetch(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        let response = Request::get(&self.settings_url(company_id))
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        decode_settings_response(status, &body, company_id)
    }

    async fn update(
        &self,
        company_id: CompanyId,
        update: &ModuleSettingsUpdate,
    ) -> Result<ModuleSettings> {
        let response = Request::put(&self.settings_url(company_id))
            .header("Content-Type", "application/json")
            .header(ROLE_HEADER, self.role_header())
            .body(serde_json::to_string(update)?)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        decode_settings_response(status, &body, company_id)
    }

    async fn reset(&self, company_id: CompanyId) -> Result<ModuleSettings> {
        let body = serde_json::to_string(&ResetRequest {
            company_id: Some(company_id),
        })?;
        let response = Request::post(&self.reset_url(company_id))
            .header("Content-Type", "application/json")
            .header(ROLE_HEADER, self.role_header())
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        decode_settings_response(status, &body, company_id)
    }
}

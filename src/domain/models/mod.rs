// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod menu;
pub mod module_settings;
pub mod role;

pub use menu::MenuItem;
pub use module_settings::{
    ApiEnvelope, CompanyId, ModuleSettings, ModuleSettingsUpdate, ModuleVisibilityMap,
    ResetRequest, CLIENT_MODULE_KEYS, EMPLOYEE_MODULE_KEYS,
};
pub use role::{MenuAudience, Role};

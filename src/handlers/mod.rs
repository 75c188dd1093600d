/// Tenant module visibility REST endpoints
pub mod module_settings;

pub use module_settings::{
    get_module_settings_handler, module_settings_router, reset_module_settings_handler,
    update_module_settings_handler, validate_update, CompanyQuery, ModuleSettingsState,
};

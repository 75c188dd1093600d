// Shared services
// The module settings client compiles for both targets: reqwasm in the browser,
// reqwest on the server and in tests
pub mod module_settings_api;

pub use module_settings_api::{
    decode_settings_response, HttpModuleSettingsApi, ModuleSettingsApi, ROLE_HEADER,
};

//! Server-side persistence for tenant module settings

pub mod module_settings_repo;

pub use module_settings_repo::{
    InMemoryModuleSettingsRepository, JsonFileModuleSettingsRepository, ModuleSettingsRepository,
};

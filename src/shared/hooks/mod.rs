// Custom Dioxus hooks
pub mod use_module_settings;
pub mod use_sidebar;

pub use use_module_settings::{use_module_settings, ModuleSettingsHandle};
pub use use_sidebar::{save_sidebar_collapsed, use_sidebar, use_sidebar_collapsed, UseSidebarReturn};

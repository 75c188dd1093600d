//! Navigation menu composition: role registries, module filtering,
//! route matching and the sidebar accordion.

pub mod accordion;
pub mod composer;
pub mod filter;
pub mod registry;
pub mod route_match;

pub use accordion::{AccordionEvent, AccordionState};
pub use composer::{compose_menu, expanded_count, NavNode};
pub use filter::filter_menu;
pub use registry::{
    find_by_path, module_keys, module_label, registry, validate_registry, RegistryIssue,
    module_settings_path, MODULE_SETTINGS_PATH,
};
pub use route_match::{find_active_parent, is_active, normalize_pathname};

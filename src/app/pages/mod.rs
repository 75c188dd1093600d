pub mod dashboard;
pub mod home;
pub mod module_settings;
pub mod section;

pub use dashboard::Dashboard;
pub use home::Home;
pub use module_settings::ModuleSettingsPage;
pub use section::Section;

pub mod card;
pub mod common;
pub mod toggle;

pub use card::NavCard;
pub use common::{ErrorMessage, LoadingText, Toast};
pub use toggle::ModuleToggle;

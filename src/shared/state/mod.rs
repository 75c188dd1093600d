// Client-side state shared between components
pub mod module_visibility;

pub use module_visibility::{
    FetchOutcome, FetchTicket, LoadStatus, ModuleVisibilityStore, PendingUpdate, ResetTicket,
};

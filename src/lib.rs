// Public API exports (shared between client and server)
pub mod domain;
pub mod navigation;
pub mod shared;
pub mod config;

// App is always available in fullstack mode
pub mod app;

// Server-only modules (NOT compiled for WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod infrastructure;
#[cfg(not(target_arch = "wasm32"))]
pub mod handlers;

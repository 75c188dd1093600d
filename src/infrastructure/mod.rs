// Server-only infrastructure
pub mod storage;

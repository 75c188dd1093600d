// Domain layer: models shared by client and server
pub mod models;

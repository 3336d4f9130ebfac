pub mod app_error;
pub mod health;
pub mod owner;
pub mod patterns;
pub mod server;
pub mod state;

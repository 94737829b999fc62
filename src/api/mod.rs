pub mod handler;
pub mod middleware;
pub mod server;
pub mod validate;
pub mod webhook;

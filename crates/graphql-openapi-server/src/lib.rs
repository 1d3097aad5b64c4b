pub mod cors;
pub mod errors;
pub mod server;

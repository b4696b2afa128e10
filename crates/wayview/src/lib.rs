pub mod cache;
pub mod client;
pub mod protocol;
pub mod route;
pub mod selection;
pub mod types;

pub mod analytics;
pub mod editor;
pub mod filter;
pub mod gate;
pub mod log;
pub mod provider;
pub mod session;
pub mod store;

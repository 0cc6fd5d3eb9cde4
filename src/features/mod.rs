pub mod ai;
pub mod auth;
pub mod content;
pub mod location;
pub mod reports;

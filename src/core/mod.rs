pub mod access;
pub mod auth;
pub mod capture;
pub mod log;
pub mod notify;
pub mod session;

pub use access::{AccessLayer, BatchReport};
pub use session::{RoleScreen, Session};

pub mod config;
pub mod contract;
pub mod init;
pub mod inspect;
pub mod log;
pub mod login;
pub mod submit;

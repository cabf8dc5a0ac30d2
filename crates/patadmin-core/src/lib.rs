//! Core patadmin library (session, gateway, auth workflow, users, config).

pub mod auth;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod session;
pub mod users;

//! Shared data model for patadmin (users, sessions, auth intents, UI signals).
//!
//! Everything here is plain data: no I/O, no async. Wire field names follow
//! the backend's camelCase JSON.

mod auth;
mod ui;
mod user;

pub use auth::{
    AuthIntent, AuthIntentKind, Credentials, LoginResponse, RegistrationPayload,
    RegistrationRequest, Session,
};
pub use ui::{Notification, Route, Severity};
pub use user::{Role, UserDraft, UserPage, UserRecord};

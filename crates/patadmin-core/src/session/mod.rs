//! Client-side session state and its on-disk copy.
//!
//! - `store`: the process-wide [`SessionStore`]
//! - `persist`: [`SessionFile`] and the listener that keeps it in sync

mod persist;
mod store;

pub use persist::{SessionFile, persist_session};
pub use store::{InvalidSessionError, ListenerId, SessionStore};

//! Authentication workflow engine.
//!
//! Follows a reducer/effects split:
//! - `update` is the only place workflow state changes
//! - effects describe what should happen (network calls, header writes,
//!   session mutations, navigation, notifications, acknowledgments)
//! - `AuthRuntime` executes effects and feeds spawned call results back in
//!
//! Calls of the same kind run one at a time; later requests queue in arrival
//! order. Sign-out never touches the network.

mod api;
mod effects;
mod events;
mod handlers;
mod runtime;
mod state;
mod task;
mod update;

pub use api::AuthApi;
pub use effects::{AuthEffect, AuthSignal};
pub use events::AuthEvent;
pub use runtime::{AuthEventReceiver, AuthEventSender, AuthRuntime, Navigator, Notifier};
pub use state::{AuthPhase, AuthState};
pub use task::{TaskCompleted, TaskId, TaskKind};
pub use update::{SIGN_IN_FAILED_MESSAGE, SIGN_UP_FAILED_MESSAGE, update};

//! Terminal implementations of the auth workflow's UI collaborators.

use std::sync::{Mutex, PoisonError};

use patadmin_core::auth::{Navigator, Notifier};
use patadmin_types::{Notification, Route, Severity};

/// Remembers where the workflow last sent the user.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    last: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn take(&self) -> Option<Route> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "navigate");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}

/// Prints notifications: info to stdout, warnings and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.severity {
            Severity::Info => println!("{}", notification.message),
            Severity::Warning | Severity::Error => eprintln!("{notification}"),
        }
    }
}

//! Auth workflow runtime.
//!
//! Owns the reducer state and every collaborator the effects touch. Intents
//! go in through [`AuthRuntime::dispatch`]; network calls run as spawned
//! tokio tasks whose results come back through the inbox channel and are fed
//! to the reducer like any other event.

use std::future::Future;
use std::sync::Arc;

use patadmin_types::{AuthIntent, Notification, Route};
use tokio::sync::{broadcast, mpsc};

use super::api::AuthApi;
use super::effects::{AuthEffect, AuthSignal};
use super::events::AuthEvent;
use super::handlers;
use super::state::{AuthPhase, AuthState};
use super::update;
use crate::gateway::AuthHeaderWriter;
use crate::session::SessionStore;

const SIGNAL_CAPACITY: usize = 16;

/// Sender for the runtime's event inbox.
pub type AuthEventSender = mpsc::UnboundedSender<AuthEvent>;

/// Receiver for the runtime's event inbox.
pub type AuthEventReceiver = mpsc::UnboundedReceiver<AuthEvent>;

/// Moves the user between screens.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Shows transient alerts.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

pub struct AuthRuntime<A: AuthApi> {
    state: AuthState,
    api: Arc<A>,
    session: SessionStore,
    header: AuthHeaderWriter,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    signals: broadcast::Sender<AuthSignal>,
    inbox_tx: AuthEventSender,
    inbox_rx: AuthEventReceiver,
}

impl<A: AuthApi> AuthRuntime<A> {
    pub fn new(
        api: Arc<A>,
        session: SessionStore,
        header: AuthHeaderWriter,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: AuthState::default(),
            api,
            session,
            header,
            navigator,
            notifier,
            signals,
            inbox_tx,
            inbox_rx,
        }
    }

    /// Receives every acknowledgment emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthSignal> {
        self.signals.subscribe()
    }

    pub fn phase(&self) -> AuthPhase {
        self.state.phase
    }

    /// True while a sign-in or sign-up call is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Feeds an intent to the reducer and executes the resulting effects.
    ///
    /// Must be called from within a tokio runtime; network effects are
    /// spawned onto it.
    pub fn dispatch(&mut self, intent: AuthIntent) {
        tracing::debug!(kind = ?intent.kind(), "auth intent");
        self.handle_event(intent.into());
    }

    /// Waits until no call is running and nothing is queued.
    pub async fn run_until_idle(&mut self) {
        while !self.state.is_idle() {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.handle_event(event);
        }
    }

    /// Processes intents until the sender closes, then drains in-flight work.
    pub async fn run(mut self, mut intents: mpsc::UnboundedReceiver<AuthIntent>) {
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => self.dispatch(intent),
                    None => break,
                },
                Some(event) = self.inbox_rx.recv() => self.handle_event(event),
            }
        }
        self.run_until_idle().await;
    }

    fn handle_event(&mut self, event: AuthEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: AuthEffect) {
        tracing::trace!(?effect, "executing auth effect");
        match effect {
            AuthEffect::CallSignIn { task, credentials } => {
                self.spawn(handlers::sign_in(Arc::clone(&self.api), task, credentials));
            }
            AuthEffect::CallSignUp { task, request } => {
                self.spawn(handlers::sign_up(Arc::clone(&self.api), task, request));
            }
            AuthEffect::SetAuthHeader { token } => self.header.set_bearer(&token),
            AuthEffect::ClearAuthHeader => self.header.clear(),
            AuthEffect::StoreSession(session) => {
                if let Err(err) = self.session.set(session) {
                    tracing::error!(error = %err, "refusing to store session");
                }
            }
            AuthEffect::ClearSession => self.session.clear(),
            AuthEffect::Navigate(route) => self.navigator.navigate(route),
            AuthEffect::Notify(notification) => self.notifier.notify(&notification),
            AuthEffect::Signal(signal) => {
                // No subscribers is fine.
                let _ = self.signals.send(signal);
            }
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AuthEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            let _ = tx.send(event);
        });
    }
}

//! Wiring shared by every command that talks to the backend.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use patadmin_core::auth::{AuthRuntime, Navigator, Notifier};
use patadmin_core::config::Config;
use patadmin_core::gateway::{ApiClient, auth_header};
use patadmin_core::session::{SessionFile, SessionStore, persist_session};
use patadmin_core::users::UsersApi;
use patadmin_types::{AuthIntent, Notification, Session, UserRecord};

use super::console::{ConsoleNavigator, ConsoleNotifier};

pub struct App {
    pub config: Config,
    pub client: ApiClient,
    pub auth: AuthRuntime<ApiClient>,
    pub navigator: Arc<ConsoleNavigator>,
    pub notifier: Arc<ConsoleNotifier>,
}

impl App {
    /// Builds the gateway and auth runtime, then rehydrates the stored
    /// session so the header is set before any command runs.
    pub fn start(config: Config, api_url: Option<&str>) -> Result<Self> {
        let base = config.resolve_base_url(api_url)?;
        let (writer, reader) = auth_header();
        let client = ApiClient::new(base, config.request_timeout(), reader)?;
        tracing::debug!(base = %client.base_url(), "using api");

        let file = SessionFile::default_location();
        let persisted = load_persisted(&file);

        let session = SessionStore::new();
        persist_session(&session, file);

        let navigator = Arc::new(ConsoleNavigator::default());
        let notifier = Arc::new(ConsoleNotifier);
        let mut auth = AuthRuntime::new(
            Arc::new(client.clone()),
            session,
            writer,
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        );
        auth.dispatch(AuthIntent::SessionRehydrated(persisted));

        Ok(Self {
            config,
            client,
            auth,
            navigator,
            notifier,
        })
    }

    /// Prints a plain status line the same way workflow notices are shown.
    pub fn inform(&self, message: impl Into<String>) {
        self.notifier.notify(&Notification::info(message));
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.client.clone())
    }

    /// The signed-in profile, or an error telling the user to log in.
    pub fn profile(&self) -> Result<UserRecord> {
        const NOT_SIGNED_IN: &str = "Not signed in. Run `patadmin login --email <EMAIL>` first.";
        if !self.client.is_authenticated() {
            bail!(NOT_SIGNED_IN);
        }
        self.auth.session().get().user.context(NOT_SIGNED_IN)
    }
}

/// Reads the stored session, dropping files that cannot be used.
pub fn load_persisted(file: &SessionFile) -> Option<Session> {
    let session = match file.load() {
        Ok(session) => session?,
        Err(err) => {
            tracing::warn!("ignoring unreadable session file: {err:#}");
            discard(file);
            return None;
        }
    };
    if !session.is_signed_in() {
        discard(file);
    }
    Some(session)
}

fn discard(file: &SessionFile) {
    if let Err(err) = file.remove() {
        tracing::warn!("failed to remove session file: {err:#}");
    }
}

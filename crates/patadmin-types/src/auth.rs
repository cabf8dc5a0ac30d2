use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::UserRecord;

/// Email/password pair for a single sign-in attempt. Never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Self-registration form values.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub last_name: String,
    pub cpf: String,
    pub birth_date: String,
    pub municipality: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Body of `POST auth/register`: the request plus the defaults the server
/// expects for self-registered accounts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload<'a> {
    #[serde(flatten)]
    pub request: &'a RegistrationRequest,
    pub is_admin: bool,
    pub active: bool,
}

impl<'a> From<&'a RegistrationRequest> for RegistrationPayload<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            request,
            is_admin: false,
            active: true,
        }
    }
}

/// Success body of `POST auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserRecord,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"<redacted>")
            .field("user", &self.user.id)
            .finish()
    }
}

/// Client-side authenticated identity.
///
/// A session is either empty or complete: `token` is present if and only if
/// `user` is present. Constructors only produce those two shapes; partial
/// values can still arrive through deserialization and are rejected by the
/// session store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, user: UserRecord) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// True for the two valid shapes: empty or fully populated.
    pub fn is_complete(&self) -> bool {
        self.token.is_some() == self.user.is_some()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user.as_ref().map(|u| u.id))
            .finish()
    }
}

/// A request for the auth workflow engine to act.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIntent {
    SignInRequested(Credentials),
    SignUpRequested(RegistrationRequest),
    SignOutRequested,
    /// Fired once at start-up with whatever session was persisted, if any.
    SessionRehydrated(Option<Session>),
}

impl AuthIntent {
    pub fn kind(&self) -> AuthIntentKind {
        match self {
            AuthIntent::SignInRequested(_) => AuthIntentKind::SignIn,
            AuthIntent::SignUpRequested(_) => AuthIntentKind::SignUp,
            AuthIntent::SignOutRequested => AuthIntentKind::SignOut,
            AuthIntent::SessionRehydrated(_) => AuthIntentKind::Rehydrate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthIntentKind {
    SignIn,
    SignUp,
    SignOut,
    Rehydrate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: 3,
            name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            email: "ana@example.com".to_string(),
            cpf: "000".to_string(),
            birth_date: "1990-01-01".to_string(),
            municipality: "Crato".to_string(),
            is_admin: false,
            active: true,
        }
    }

    #[test]
    fn test_registration_payload_adds_defaults() {
        let request = RegistrationRequest {
            name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            cpf: "000".to_string(),
            birth_date: "1990-01-01".to_string(),
            municipality: "Crato".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        };

        let value = serde_json::to_value(RegistrationPayload::from(&request)).unwrap();
        assert_eq!(value["isAdmin"], false);
        assert_eq!(value["active"], true);
        assert_eq!(value["lastName"], "Souza");
        assert_eq!(value["birthDate"], "1990-01-01");
        assert_eq!(value["password"], "secret1");
    }

    #[test]
    fn test_session_shapes() {
        assert!(Session::empty().is_complete());
        assert!(!Session::empty().is_signed_in());

        let full = Session::authenticated("T", user());
        assert!(full.is_complete());
        assert!(full.is_signed_in());

        let partial = Session {
            token: Some("T".to_string()),
            user: None,
        };
        assert!(!partial.is_complete());
        assert!(!partial.is_signed_in());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("a@b.c", "hunter22");
        assert!(!format!("{creds:?}").contains("hunter22"));

        let session = Session::authenticated("secret-token", user());
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}

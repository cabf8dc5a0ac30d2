use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A user (patient) record as returned by the backend.
///
/// The front end only ever holds a read-through copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub cpf: String,
    /// Older backends send this as `datanasc`.
    #[serde(alias = "datanasc")]
    pub birth_date: String,
    /// Older backends send this as `municipio`.
    #[serde(alias = "municipio")]
    pub municipality: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Standard
        }
    }
}

/// Account role. Only admins may modify other users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Standard,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Standard => "Standard user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Form values for creating or updating a user.
///
/// `id` is `None` for a new user. `password` is omitted from the payload
/// when unset so an update keeps the stored password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub cpf: String,
    pub birth_date: String,
    pub municipality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub is_admin: bool,
    pub active: bool,
}

impl UserDraft {
    /// Starts a draft pre-filled from an existing record (password left unset).
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            id: Some(user.id),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            cpf: user.cpf.clone(),
            birth_date: user.birth_date.clone(),
            municipality: user.municipality.clone(),
            password: None,
            is_admin: user.is_admin,
            active: user.active,
        }
    }
}

/// One page of the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Total number of users matching the search, across all pages.
    #[serde(alias = "totalItens", deserialize_with = "de_count", default)]
    pub total: u64,
}

/// Accepts a count sent either as a JSON number or as a numeric string.
fn de_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_accepts_legacy_field_names() {
        let json = r#"{
            "id": 7,
            "name": "Ana",
            "lastName": "Souza",
            "email": "ana@example.com",
            "cpf": "123.456.789-00",
            "datanasc": "1990-02-01",
            "municipio": "Fortaleza",
            "isAdmin": true,
            "active": false
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.birth_date, "1990-02-01");
        assert_eq!(user.municipality, "Fortaleza");
        assert_eq!(user.role(), Role::Admin);
        assert!(!user.active);
        assert_eq!(user.full_name(), "Ana Souza");
    }

    #[test]
    fn test_user_record_serializes_camel_case() {
        let user = UserRecord {
            id: 1,
            name: "Rui".to_string(),
            last_name: "Lima".to_string(),
            email: "rui@example.com".to_string(),
            cpf: "1".to_string(),
            birth_date: "2000-01-01".to_string(),
            municipality: "Sobral".to_string(),
            is_admin: false,
            active: true,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["lastName"], "Lima");
        assert_eq!(value["birthDate"], "2000-01-01");
        assert_eq!(value["isAdmin"], false);
    }

    #[test]
    fn test_user_page_total_from_string() {
        let page: UserPage = serde_json::from_str(r#"{"users": [], "totalItens": "42"}"#).unwrap();
        assert_eq!(page.total, 42);

        let page: UserPage = serde_json::from_str(r#"{"users": [], "total": 3}"#).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_draft_omits_unset_password() {
        let draft = UserDraft {
            name: "Ana".to_string(),
            ..UserDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("password").is_none());
        assert!(value.get("id").is_none());
    }
}

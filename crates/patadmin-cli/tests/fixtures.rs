//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

pub fn user_json(id: u64, name: &str, last_name: &str, is_admin: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "lastName": last_name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "cpf": "123.456.789-00",
        "birthDate": "1985-02-03",
        "municipality": "Juazeiro do Norte",
        "isAdmin": is_admin,
        "active": true
    })
}

pub fn admin_json() -> serde_json::Value {
    user_json(1, "Maria", "Lima", true)
}

pub fn standard_json() -> serde_json::Value {
    user_json(2, "Joao", "Silva", false)
}

/// Writes a signed-in session into `home`, as `patadmin login` would.
pub fn write_session(home: &Path, token: &str, user: &serde_json::Value) {
    let session = serde_json::json!({ "token": token, "user": user });
    fs::write(
        home.join("session.json"),
        serde_json::to_string_pretty(&session).unwrap(),
    )
    .unwrap();
}

pub fn read_session(home: &Path) -> Option<serde_json::Value> {
    let contents = fs::read_to_string(home.join("session.json")).ok()?;
    Some(serde_json::from_str(&contents).unwrap())
}

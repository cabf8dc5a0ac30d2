use std::fmt;

use patadmin_types::{Session, UserRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::View => "view users",
            Action::Create => "create users",
            Action::Edit => "edit users",
            Action::Remove => "remove users",
        })
    }
}

/// What the signed-in profile may do on the users screen.
///
/// Presentation-level gating only; the backend enforces the real rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Permissions {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_remove: bool,
}

impl Permissions {
    pub fn for_profile(user: &UserRecord) -> Self {
        Self {
            can_view: true,
            can_create: user.is_admin,
            can_edit: user.is_admin,
            can_remove: user.is_admin,
        }
    }

    /// Nothing is allowed without a signed-in profile.
    pub fn for_session(session: &Session) -> Self {
        match &session.user {
            Some(user) if session.is_signed_in() => Self::for_profile(user),
            _ => Self::default(),
        }
    }

    pub fn allows(self, action: Action) -> bool {
        match action {
            Action::View => self.can_view,
            Action::Create => self.can_create,
            Action::Edit => self.can_edit,
            Action::Remove => self.can_remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(is_admin: bool) -> UserRecord {
        UserRecord {
            id: 3,
            name: "Rita".to_string(),
            last_name: "Alves".to_string(),
            email: "rita@example.com".to_string(),
            cpf: "1".to_string(),
            birth_date: "1970-01-01".to_string(),
            municipality: "Barbalha".to_string(),
            is_admin,
            active: true,
        }
    }

    #[test]
    fn test_admin_may_modify() {
        let perms = Permissions::for_profile(&profile(true));
        for action in [Action::View, Action::Create, Action::Edit, Action::Remove] {
            assert!(perms.allows(action), "{action}");
        }
    }

    #[test]
    fn test_standard_user_is_read_only() {
        let perms = Permissions::for_profile(&profile(false));
        assert!(perms.allows(Action::View));
        assert!(!perms.allows(Action::Create));
        assert!(!perms.allows(Action::Edit));
        assert!(!perms.allows(Action::Remove));
    }

    #[test]
    fn test_signed_out_allows_nothing() {
        assert_eq!(Permissions::for_session(&Session::empty()), Permissions::default());
        let signed_in = Session::authenticated("T", profile(true));
        assert!(Permissions::for_session(&signed_in).can_remove);
    }
}

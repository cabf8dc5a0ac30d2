use std::fmt;

use patadmin_types::{RegistrationRequest, UserDraft};

const MIN_NAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Wire name of the field (`lastName`, `birthDate`, ...).
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Values of the registration and user create/edit forms, checked before any
/// call is made.
#[derive(Debug, Clone, Default)]
pub struct UserForm<'a> {
    pub name: &'a str,
    pub last_name: &'a str,
    pub cpf: &'a str,
    pub birth_date: &'a str,
    pub municipality: &'a str,
    pub email: &'a str,
    pub password: Option<&'a str>,
    pub password_required: bool,
}

impl<'a> UserForm<'a> {
    pub fn for_registration(request: &'a RegistrationRequest) -> Self {
        Self {
            name: &request.name,
            last_name: &request.last_name,
            cpf: &request.cpf,
            birth_date: &request.birth_date,
            municipality: &request.municipality,
            email: &request.email,
            password: Some(&request.password),
            password_required: true,
        }
    }

    /// New users need a password; edits keep the stored one when it is unset.
    pub fn for_draft(draft: &'a UserDraft) -> Self {
        Self {
            name: &draft.name,
            last_name: &draft.last_name,
            cpf: &draft.cpf,
            birth_date: &draft.birth_date,
            municipality: &draft.municipality,
            email: &draft.email,
            password: draft.password.as_deref(),
            password_required: draft.id.is_none(),
        }
    }

    /// Checks every field and reports all problems at once.
    ///
    /// # Errors
    /// Returns the list of rejected fields, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut reject = |field: &'static str, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        };

        min_len(self.name, MIN_NAME_LEN, "name", "Name is required", &mut reject);
        min_len(
            self.last_name,
            MIN_NAME_LEN,
            "lastName",
            "Last name is required",
            &mut reject,
        );
        if self.cpf.trim().is_empty() {
            reject("cpf", "CPF is required");
        }
        if self.birth_date.trim().is_empty() {
            reject("birthDate", "Birth date is required");
        }
        if self.municipality.trim().is_empty() {
            reject("municipality", "Municipality is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            reject("email", "Email is required");
        } else if !email.contains('@') {
            reject("email", "Enter a valid email");
        }

        match self.password {
            Some(password) if !password.is_empty() => {
                if password.chars().count() < MIN_PASSWORD_LEN {
                    reject("password", "At least 6 characters");
                }
            }
            _ if self.password_required => reject("password", "Password is required"),
            _ => {}
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn min_len(
    value: &str,
    min: usize,
    field: &'static str,
    required: &str,
    reject: &mut impl FnMut(&'static str, &str),
) {
    let value = value.trim();
    if value.is_empty() {
        reject(field, required);
    } else if value.chars().count() < min {
        reject(field, "At least 3 characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationRequest {
        RegistrationRequest {
            name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            cpf: "123.456.789-00".to_string(),
            birth_date: "1990-01-01".to_string(),
            municipality: "Crato".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_registration_passes() {
        assert_eq!(UserForm::for_registration(&registration()).validate(), Ok(()));
    }

    #[test]
    fn test_reports_every_bad_field() {
        let request = RegistrationRequest {
            name: "Al".to_string(),
            last_name: String::new(),
            cpf: " ".to_string(),
            birth_date: String::new(),
            municipality: String::new(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        let errors = UserForm::for_registration(&request).validate().unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                "name",
                "lastName",
                "cpf",
                "birthDate",
                "municipality",
                "email",
                "password"
            ]
        );
        assert_eq!(errors[0].to_string(), "name: At least 3 characters");
        assert_eq!(errors[1].message, "Last name is required");
    }

    #[test]
    fn test_password_optional_when_editing() {
        let request = registration();
        let mut draft = UserDraft {
            id: Some(7),
            name: request.name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            cpf: request.cpf.clone(),
            birth_date: request.birth_date.clone(),
            municipality: request.municipality.clone(),
            password: None,
            is_admin: false,
            active: true,
        };
        assert_eq!(UserForm::for_draft(&draft).validate(), Ok(()));

        draft.password = Some("123".to_string());
        let errors = UserForm::for_draft(&draft).validate().unwrap_err();
        assert_eq!(fields(&errors), vec!["password"]);

        draft.id = None;
        draft.password = None;
        let errors = UserForm::for_draft(&draft).validate().unwrap_err();
        assert_eq!(errors[0].message, "Password is required");
    }
}

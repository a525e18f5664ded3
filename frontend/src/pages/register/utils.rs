use crate::{api::RegisterRequest, pages::login::utils::is_valid_email};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agreed_to_terms: bool,
}

impl RegisterForm {
    /// Every problem with the form, in field order.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.first_name.trim().chars().count() < MIN_NAME_LEN {
            problems.push(format!(
                "First name must be at least {} characters",
                MIN_NAME_LEN
            ));
        }
        if self.last_name.trim().chars().count() < MIN_NAME_LEN {
            problems.push(format!(
                "Last name must be at least {} characters",
                MIN_NAME_LEN
            ));
        }
        if !is_valid_email(&self.email) {
            problems.push("Please enter a valid email address".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            problems.push(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        if self.confirm_password != self.password {
            problems.push("Passwords do not match".to_string());
        }
        if !self.agreed_to_terms {
            problems.push("You must accept the terms of service".to_string());
        }
        problems
    }

    pub fn is_valid(&self) -> bool {
        self.problems().is_empty()
    }

    /// New accounts always start as employees.
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest::new(
            self.first_name.trim(),
            self.last_name.trim(),
            self.email.trim(),
            &self.password,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Role;

    fn filled() -> RegisterForm {
        RegisterForm {
            first_name: "Emil".into(),
            last_name: "Employee".into(),
            email: "emil@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn complete_form_is_valid() {
        let form = filled();
        assert!(form.is_valid());
        let request = form.to_request();
        assert_eq!(request.role, Role::Employee);
        assert_eq!(request.email, "emil@example.com");
    }

    #[test]
    fn problems_are_listed_per_field() {
        let mut form = filled();
        form.confirm_password = "other".into();
        form.agreed_to_terms = false;
        assert_eq!(
            form.problems(),
            vec![
                "Passwords do not match".to_string(),
                "You must accept the terms of service".to_string()
            ]
        );

        assert_eq!(RegisterForm::default().problems().len(), 5);
    }

    #[test]
    fn short_password_is_rejected() {
        let mut form = filled();
        form.password = "abc".into();
        form.confirm_password = "abc".into();
        assert_eq!(
            form.problems(),
            vec!["Password must be at least 6 characters".to_string()]
        );
    }
}

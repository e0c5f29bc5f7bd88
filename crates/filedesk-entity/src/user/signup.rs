//! Registration form and request.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// What the user fills in to register.
#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    /// Account email.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Chosen password.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    /// Password typed a second time.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    /// Full name as typed; sent as `first_name`.
    #[validate(length(min = 1, message = "Full name is required."))]
    pub full_name: String,
}

impl SignupForm {
    /// Check the form and return the first problem as a display message.
    pub fn first_error(&self) -> Option<String> {
        // Password mismatch is reported before field-format problems.
        if self.password != self.confirm_password {
            return Some("Passwords do not match".to_string());
        }
        let errors = self.trimmed().validate().err()?;
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| field_rank(&a.0).cmp(&field_rank(&b.0)));
        fields.into_iter().find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })
        })
    }

    /// The form as it is checked and sent: email and name trimmed.
    fn trimmed(&self) -> SignupForm {
        SignupForm {
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            ..self.clone()
        }
    }

    /// The request sent to the backend once the form is valid.
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.full_name.trim().to_string(),
            last_name: String::new(),
        }
    }
}

fn field_rank(field: &str) -> usize {
    match field {
        "full_name" => 0,
        "email" => 1,
        "password" => 2,
        _ => 3,
    }
}

/// Body of `POST signup/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name (the form does not collect one).
    pub last_name: String,
}

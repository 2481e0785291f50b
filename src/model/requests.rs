//! Request payloads with shape validation.
//!
//! Validation here covers field shape only (lengths, required fields, email
//! form). Cross-entity rules such as scoped uniqueness and parent gating
//! live in the service layer.

use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(AppError::Validation(format!(
            "{field} must be {min}-{max} characters"
        )));
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), AppError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::Validation(
            "email must be a valid address".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateApplicationRequest {
    pub name: String,
    pub description: String,
}

impl CreateApplicationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("name", &self.name, 3, 50)?;
        check_length("description", &self.description, 3, 50)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateApplicationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateApplicationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(AppError::Validation(
                "no fields provided in the request body".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            check_length("name", name, 3, 50)?;
        }
        if let Some(description) = &self.description {
            check_length("description", description, 3, 50)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateEventRequest {
    pub application_id: Uuid,
    pub name: String,
    pub description: String,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("name", &self.name, 3, 100)?;
        check_length("description", &self.description, 3, 200)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateEventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(AppError::Validation(
                "no fields provided in the request body".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            check_length("name", name, 3, 100)?;
        }
        if let Some(description) = &self.description {
            check_length("description", description, 3, 200)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateNotificationRequest {
    pub event_id: Uuid,
    pub name: String,
    pub description: String,
    pub template_subject: String,
    pub template_body: String,
}

impl CreateNotificationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("name", &self.name, 3, 100)?;
        check_length("description", &self.description, 3, 200)?;
        check_length("templateSubject", &self.template_subject, 5, 100)?;
        check_length("templateBody", &self.template_body, 10, 1000)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNotificationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_subject: Option<String>,
    pub template_body: Option<String>,
}

impl UpdateNotificationRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none()
            && self.description.is_none()
            && self.template_subject.is_none()
            && self.template_body.is_none()
        {
            return Err(AppError::Validation(
                "no fields provided in the request body".to_string(),
            ));
        }
        if let Some(name) = &self.name {
            check_length("name", name, 3, 100)?;
        }
        if let Some(description) = &self.description {
            check_length("description", description, 3, 200)?;
        }
        if let Some(subject) = &self.template_subject {
            check_length("templateSubject", subject, 5, 100)?;
        }
        if let Some(body) = &self.template_body {
            check_length("templateBody", body, 10, 1000)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub notification_id: Uuid,
    pub email: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CreateMessageRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("email", &self.email, 5, 255)?;
        check_email(&self.email)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("email", &self.email, 5, 255)?;
        check_email(&self.email)?;
        check_length("password", &self.password, 5, 255)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_name_length_bounds() {
        let req = CreateApplicationRequest {
            name: "ab".to_string(),
            description: "short description".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreateApplicationRequest {
            name: "abc".to_string(),
            description: "short description".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_notification_template_bounds() {
        let req = CreateNotificationRequest {
            event_id: Uuid::new_v4(),
            name: "welcome".to_string(),
            description: "welcome mail".to_string(),
            template_subject: "Hiya".to_string(), // 4 chars, below minimum
            template_body: "Hello {name}, welcome!".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_update_rejected() {
        let req = UpdateApplicationRequest {
            name: None,
            description: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_message_email_length_bounds() {
        // 255 is the column limit; an overlong address must fail shape
        // validation instead of surfacing as a storage error.
        let overlong = format!("{}@example.com", "a".repeat(250));
        let req = CreateMessageRequest {
            notification_id: Uuid::new_v4(),
            email: overlong,
            metadata: BTreeMap::new(),
        };
        assert!(req.validate().is_err());

        let req = CreateMessageRequest {
            notification_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            metadata: BTreeMap::new(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_email_shape() {
        assert!(check_email("user@example.com").is_ok());
        assert!(check_email("not-an-email").is_err());
        assert!(check_email("@example.com").is_err());
        assert!(check_email("user@nodot").is_err());
    }
}

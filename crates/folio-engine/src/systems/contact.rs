//! Contact form state and the mail-service request it produces.
//!
//! The engine never performs I/O: `begin_submit` hands back the request body,
//! the host posts it, then reports the response through `finish_submit`.

use serde::{Deserialize, Serialize};

use crate::api::config::ContactConfig;
use crate::api::error::{FolioError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    /// Retryable; the form keeps its contents.
    Error(String),
}

impl SubmitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitStatus::Idle => "idle",
            SubmitStatus::Submitting => "submitting",
            SubmitStatus::Success => "success",
            SubmitStatus::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub user_name: String,
    pub user_email: String,
    pub message: String,
}

/// Body of the mail service's `email/send` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

impl EmailRequest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct ContactForm {
    config: ContactConfig,
    pub name: String,
    pub email: String,
    pub message: String,
    status: SubmitStatus,
}

impl ContactForm {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status: SubmitStatus::Idle,
        }
    }

    pub fn fill(&mut self, name: &str, email: &str, message: &str) {
        self.name = name.to_owned();
        self.email = email.to_owned();
        self.message = message.to_owned();
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(FolioError::InvalidField {
                    field,
                    reason: "must not be empty",
                });
            }
        }
        if !self.email.contains('@') {
            return Err(FolioError::InvalidField {
                field: "email",
                reason: "must contain '@'",
            });
        }
        Ok(())
    }

    /// Validate and move to `Submitting`. Invalid input leaves the status
    /// untouched.
    pub fn begin_submit(&mut self) -> Result<EmailRequest> {
        if self.status == SubmitStatus::Submitting {
            return Err(FolioError::SubmissionInFlight);
        }
        self.validate()?;
        self.status = SubmitStatus::Submitting;
        Ok(EmailRequest {
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            user_id: self.config.public_key.clone(),
            template_params: TemplateParams {
                user_name: self.name.trim().to_owned(),
                user_email: self.email.trim().to_owned(),
                message: self.message.trim().to_owned(),
            },
        })
    }

    /// Settle a submission with the service's response body (or the
    /// transport failure).
    pub fn finish_submit(&mut self, response: Result<String>) -> &SubmitStatus {
        if self.status != SubmitStatus::Submitting {
            log::warn!("contact: response with no submission in flight");
            return &self.status;
        }
        let failure = match response {
            Ok(body) if body.trim() == "OK" => None,
            Ok(body) => Some(FolioError::Submission(body)),
            Err(err) => Some(err),
        };
        match failure {
            None => {
                log::info!("contact: message sent");
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.status = SubmitStatus::Success;
            }
            Some(err) => {
                log::warn!("contact: {err}");
                self.status = SubmitStatus::Error(self.config.error_message.clone());
            }
        }
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut f = ContactForm::new(ContactConfig::default());
        f.fill("Ada", "ada@example.com", "Hello there");
        f
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut f = ContactForm::new(ContactConfig::default());
        f.fill("Ada", "  ", "hi");
        let err = f.begin_submit().unwrap_err();
        assert!(matches!(err, FolioError::InvalidField { field: "email", .. }));
        assert_eq!(f.status(), &SubmitStatus::Idle);
    }

    #[test]
    fn email_needs_an_at_sign() {
        let mut f = filled();
        f.email = "ada.example.com".into();
        assert!(f.begin_submit().is_err());
    }

    #[test]
    fn request_carries_credentials_and_params() {
        let mut f = filled();
        let req = f.begin_submit().unwrap();
        assert_eq!(f.status(), &SubmitStatus::Submitting);
        assert_eq!(req.service_id, "service_portfolio");
        assert_eq!(req.user_id, "public_key");
        let json: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        let params = &json["template_params"];
        assert_eq!(params["user_name"], "Ada");
        assert_eq!(params["user_email"], "ada@example.com");
        assert_eq!(params["message"], "Hello there");
    }

    #[test]
    fn double_submit_is_rejected() {
        let mut f = filled();
        f.begin_submit().unwrap();
        assert!(matches!(f.begin_submit(), Err(FolioError::SubmissionInFlight)));
    }

    #[test]
    fn ok_response_clears_form() {
        let mut f = filled();
        f.begin_submit().unwrap();
        assert_eq!(f.finish_submit(Ok("OK".into())), &SubmitStatus::Success);
        assert!(f.name.is_empty() && f.email.is_empty() && f.message.is_empty());
    }

    #[test]
    fn failure_keeps_fields_and_allows_retry() {
        let mut f = filled();
        f.begin_submit().unwrap();
        let status = f.finish_submit(Ok("The user ID is invalid".into())).clone();
        assert_eq!(
            status,
            SubmitStatus::Error("Failed to send message. Please try again later.".into())
        );
        assert_eq!(f.name, "Ada");
        assert!(f.begin_submit().is_ok());
        f.finish_submit(Err(FolioError::Submission("network".into())));
        assert_eq!(f.status().as_str(), "error");
    }
}

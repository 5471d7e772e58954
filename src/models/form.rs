//! Request composer state.
//!
//! `RequestForm` holds what the user has typed so far: method, URL, header
//! rows and raw body text. It is converted to a [`RequestSpec`] on submit.

use super::headers::HeaderList;
use super::request::{HttpMethod, RequestBody, RequestSpec};
use crate::executor::{validate_spec, ExecutorError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestForm {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderList,
    pub body: String,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the same input checks the executor performs, so problems can be
    /// shown next to the offending field before anything is sent.
    pub fn validate(&self) -> Result<(), ExecutorError> {
        validate_spec(&self.to_spec())
    }

    /// Builds the spec for a send. An empty body becomes `None`.
    pub fn to_spec(&self) -> RequestSpec {
        RequestSpec {
            method: self.method,
            url: self.url.trim().to_string(),
            headers: self.headers.to_map(),
            body: if self.body.is_empty() {
                None
            } else {
                Some(RequestBody::Raw(self.body.clone()))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::headers::HeaderField;

    #[test]
    fn test_new_form_defaults() {
        let form = RequestForm::new();
        assert_eq!(form.method, HttpMethod::GET);
        assert!(form.url.is_empty());
        assert_eq!(form.headers.len(), 1);
        assert!(form.body.is_empty());
    }

    #[test]
    fn test_validate_requires_url() {
        let form = RequestForm::new();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "URL is required");
    }

    #[test]
    fn test_validate_rejects_invalid_json_body() {
        let form = RequestForm {
            method: HttpMethod::POST,
            url: "https://api.example.com/users".to_string(),
            body: "{invalid".to_string(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON in request body");
    }

    #[test]
    fn test_get_body_is_not_validated() {
        let form = RequestForm {
            method: HttpMethod::GET,
            url: "https://api.example.com/users".to_string(),
            body: "{invalid".to_string(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_to_spec_folds_headers() {
        let mut form = RequestForm {
            method: HttpMethod::PUT,
            url: " https://api.example.com/users/1 ".to_string(),
            body: r#"{"name":"x"}"#.to_string(),
            ..Default::default()
        };
        form.headers.update(0, HeaderField::Key, "X-Api-Key");
        form.headers.update(0, HeaderField::Value, "k");
        form.headers.add();

        let spec = form.to_spec();
        assert_eq!(spec.url, "https://api.example.com/users/1");
        assert_eq!(spec.headers.len(), 1);
        assert_eq!(
            spec.body,
            Some(RequestBody::Raw(r#"{"name":"x"}"#.to_string()))
        );
    }
}

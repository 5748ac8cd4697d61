// Blocking client for the now-playing rendering service.
//
// All calls run on worker threads (see io::worker); the GUI thread never
// touches the network directly.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct TemplateList {
    #[serde(default)]
    templates: Vec<String>,
}

#[derive(Deserialize)]
struct TemplateContent {
    #[serde(default)]
    content: String,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new() -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("nowplay/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { http }
    }

    /// `GET {endpoint}/api/v1/templates`, in the server's order.
    pub fn list_templates(&self, endpoint: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/api/v1/templates", base_url(endpoint));
        let response = check_status(self.http.get(url).send()?)?;
        let list: TemplateList = response
            .json()
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        Ok(list.templates)
    }

    /// `GET {endpoint}/api/v1/templates/{id}`, the raw template source.
    pub fn template_content(&self, endpoint: &str, id: &str) -> Result<String, ApiError> {
        let url = format!("{}/api/v1/templates/{}", base_url(endpoint), id);
        let response = check_status(self.http.get(url).send()?)?;
        let body: TemplateContent = response
            .json()
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        Ok(body.content)
    }

    /// `GET {endpoint}/now-playing.svg?template={id}`, rendered SVG text.
    pub fn render_preview(&self, endpoint: &str, template: &str) -> Result<String, ApiError> {
        let url = format!("{}/now-playing.svg", base_url(endpoint));
        let response = check_status(self.http.get(url).query(&[("template", template)]).send()?)?;
        response.text().map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

/// Endpoint as typed by the user, minus any trailing slashes.
pub fn base_url(endpoint: &str) -> &str {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        endpoint
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        assert_eq!(base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(base_url("http://localhost:8000"), "http://localhost:8000");
        assert_eq!(base_url(" http://x/// "), "http://x");
    }

    #[test]
    fn test_template_list_tolerates_missing_field() {
        let list: TemplateList = serde_json::from_str("{}").unwrap();
        assert!(list.templates.is_empty());

        let list: TemplateList =
            serde_json::from_str(r#"{"templates": ["default", "minimalist"]}"#).unwrap();
        assert_eq!(list.templates, vec!["default", "minimalist"]);
    }

    #[test]
    fn test_template_content_tolerates_missing_field() {
        let body: TemplateContent = serde_json::from_str("{}").unwrap();
        assert!(body.content.is_empty());
    }
}

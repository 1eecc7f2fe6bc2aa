//! Single-call execution: the auth gate, dispatch, and result unwrapping.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::descriptor::CallDescriptor;
use crate::errors::{classify, ApiError, ApiResult};
use crate::pagination::{Paged, PaginationLinks};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// A GitHub API client.
///
/// Holds the immutable configuration (including the optional access token)
/// and the transport. No state is shared or mutated across calls, so calls
/// from one instance are safe to issue sequentially; callers wanting
/// parallelism create independent instances.
pub struct Client {
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    /// Creates a client over the production HTTP transport.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config.user_agent, config.timeout)?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Performs exactly one API call and returns `(status_code, value)`,
    /// where the value holds exactly the fields declared by the
    /// descriptor's response shape.
    pub fn call(
        &self,
        descriptor: &CallDescriptor,
        path_params: &[(&str, &str)],
        query: &[(String, String)],
    ) -> ApiResult<(u16, Value)> {
        let url = self.build_url(&descriptor.fill_path(path_params)?);
        let response = self.dispatch(descriptor, &url, query)?;
        unwrap_response(descriptor, &response)
    }

    /// Wraps the single-call executor in a lazy per-page sequence.
    ///
    /// The first page URL is built eagerly; no request is performed until
    /// the returned iterator is advanced.
    pub fn call_paged<'a>(
        &'a self,
        descriptor: &'a CallDescriptor,
        path_params: &[(&str, &str)],
        query: &[(String, String)],
    ) -> ApiResult<Paged<'a>> {
        let url = self.build_url(&descriptor.fill_path(path_params)?);
        Ok(Paged::new(self, descriptor, url, query.to_vec()))
    }

    /// Fetches one page for the paged executor: the unwrapped pair plus the
    /// next-page URL from the response's `Link` header.
    pub(crate) fn fetch_page(
        &self,
        descriptor: &CallDescriptor,
        url: &str,
        query: &[(String, String)],
    ) -> ApiResult<((u16, Value), Option<String>)> {
        let response = self.dispatch(descriptor, url, query)?;
        let next = PaginationLinks::from_response(&response).next;
        let pair = unwrap_response(descriptor, &response)?;
        Ok((pair, next))
    }

    /// Auth gate plus transport dispatch. The gate runs before any I/O so
    /// authentication failures never depend on network availability.
    fn dispatch(
        &self,
        descriptor: &CallDescriptor,
        url: &str,
        query: &[(String, String)],
    ) -> ApiResult<RawResponse> {
        let token = self.config.token();
        if descriptor.requires_auth && token.is_none() {
            return Err(ApiError::AuthenticationRequired(format!(
                "endpoint `{}` requires an access token",
                descriptor.path
            )));
        }

        let mut headers = vec![
            (
                "Accept".to_string(),
                "application/vnd.github+json".to_string(),
            ),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];
        // Attached whenever present, so gated and ungated reads of the same
        // resource agree.
        if let Some(token) = token {
            headers.push((
                "Authorization".to_string(),
                format!("token {}", token.expose()),
            ));
        }

        let request = ApiRequest {
            method: descriptor.method,
            url: url.to_string(),
            headers,
            params: query.to_vec(),
        };

        debug!(method = descriptor.method.as_str(), url, "dispatching API call");
        Ok(self.transport.perform(&request)?)
    }

    fn build_url(&self, path: &str) -> String {
        // Next-page URLs from Link headers are already absolute.
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Decodes, classifies, and shape-validates one raw response.
fn unwrap_response(descriptor: &CallDescriptor, response: &RawResponse) -> ApiResult<(u16, Value)> {
    let status = response.status();

    // An unparsable body cannot be trusted, whatever the status line says.
    let body: Value = match response.json() {
        Ok(body) => body,
        Err(error) => {
            return Err(ApiError::bad_request(format!(
                "malformed JSON body: {}",
                error
            )))
        }
    };

    if !(200..300).contains(&status) {
        return Err(classify(status, server_message(&body, status)));
    }

    let value = descriptor
        .shape
        .extract(&body)
        .map_err(|violation| ApiError::bad_request(violation.to_string()))?;

    Ok((status, value))
}

/// GitHub error payload format.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: Option<String>,
}

/// Pulls the server-reported message out of a GitHub error payload.
fn server_message(body: &Value, status: u16) -> String {
    serde_json::from_value::<ErrorPayload>(body.clone())
        .ok()
        .and_then(|payload| payload.message)
        .unwrap_or_else(|| format!("HTTP {} error", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType, ResponseShape};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const LOGIN_ONLY: CallDescriptor = CallDescriptor::get(
        "/orgs/{name}",
        ResponseShape::Object(&[Field::new("login", FieldType::String)]),
    );

    #[test]
    fn unwrap_success_extracts_declared_fields() {
        let response = RawResponse::new(200, r#"{"login": "octo", "id": 1}"#);
        let (status, value) = unwrap_response(&LOGIN_ONLY, &response).unwrap();
        assert_eq!(status, 200);
        assert_eq!(value, json!({"login": "octo"}));
    }

    #[test]
    fn unwrap_malformed_body_is_bad_request_even_on_200() {
        let response = RawResponse::new(200, "{truncated");
        let error = unwrap_response(&LOGIN_ONLY, &response).unwrap_err();
        assert_eq!(error.code(), Some(400));
    }

    #[test]
    fn unwrap_error_payload_goes_through_the_classifier() {
        let response = RawResponse::new(404, r#"{"message": "Not Found"}"#);
        let error = unwrap_response(&LOGIN_ONLY, &response).unwrap_err();
        assert_eq!(error.code(), Some(404));
        assert!(error.to_string().contains("Not Found"));
    }

    #[test]
    fn unwrap_shape_violation_is_bad_request() {
        let response = RawResponse::new(200, r#"{"login": 42}"#);
        let error = unwrap_response(&LOGIN_ONLY, &response).unwrap_err();
        assert_eq!(error.code(), Some(400));
        assert!(error.to_string().contains("login"));
    }

    #[test]
    fn server_message_falls_back_to_status() {
        assert_eq!(server_message(&json!({}), 502), "HTTP 502 error");
        assert_eq!(server_message(&json!({"message": "boom"}), 500), "boom");
    }

    #[test]
    fn build_url_joins_base_and_path() {
        let client = Client::with_transport(
            ClientConfig::default(),
            Box::new(crate::mocks::MockTransport::new()),
        )
        .unwrap();

        assert_eq!(
            client.build_url("/orgs/octo"),
            "https://api.github.com/orgs/octo"
        );
        assert_eq!(
            client.build_url("orgs/octo"),
            "https://api.github.com/orgs/octo"
        );
        assert_eq!(
            client.build_url("https://api.github.com/orgs/octo/repos?page=2"),
            "https://api.github.com/orgs/octo/repos?page=2"
        );
    }
}

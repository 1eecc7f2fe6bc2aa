//! Mock transport and fixtures for exercising the executors without
//! network I/O.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};

/// A recording [`Transport`] double.
///
/// Responses are queued ahead of time and served in FIFO order; every
/// request is recorded for later verification. Clones share the same queue
/// and history, so tests keep a clone while the client owns the boxed
/// original.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Creates an empty mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn push(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// All requests performed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests performed so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn perform(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            TransportError::Other(format!(
                "no queued response for {} {}",
                request.method.as_str(),
                request.url
            ))
        })
    }
}

/// Canned responses in the formats GitHub serves.
pub mod responses {
    use serde_json::{json, Value};

    use crate::transport::RawResponse;

    /// A 200 response with the given JSON body.
    pub fn ok(body: &Value) -> RawResponse {
        RawResponse::new(200, body.to_string())
    }

    /// An error response with a GitHub-format payload.
    pub fn status(code: u16, message: &str) -> RawResponse {
        RawResponse::new(
            code,
            json!({
                "message": message,
                "documentation_url": "https://docs.github.com/rest"
            })
            .to_string(),
        )
    }

    /// A 401 Unauthorized response.
    pub fn unauthorized(message: &str) -> RawResponse {
        status(401, message)
    }

    /// A 403 Forbidden response.
    pub fn forbidden(message: &str) -> RawResponse {
        status(403, message)
    }

    /// A 403 with GitHub's rate-limit message.
    pub fn rate_limited() -> RawResponse {
        status(403, "API rate limit exceeded")
    }

    /// A 422 Validation Failed response.
    pub fn validation_failed(message: &str) -> RawResponse {
        status(422, message)
    }

    /// A 404 Not Found response.
    pub fn not_found(message: &str) -> RawResponse {
        status(404, message)
    }

    /// A 200 response whose body is not valid JSON.
    pub fn malformed() -> RawResponse {
        RawResponse::new(200, "<html>not json</html>")
    }

    /// A 200 page, optionally advertising the next page in a `Link` header.
    pub fn page(body: &Value, next: Option<&str>) -> RawResponse {
        let raw = ok(body);
        match next {
            Some(next) => raw.with_header("link", &format!("<{}>; rel=\"next\"", next)),
            None => raw,
        }
    }
}

/// Response-body fixtures matching the declared endpoint shapes.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A public organization body. Includes fields outside the declared
    /// shape, which the unwrapper must drop.
    pub fn organization(login: &str) -> Value {
        json!({
            "login": login,
            "id": 1,
            "node_id": "MDEyOk9yZ2FuaXphdGlvbjE=",
            "name": format!("The {} Organization", login),
            "description": null,
            "html_url": format!("https://github.com/{}", login),
            "blog": null,
            "location": "Internet",
            "email": null,
            "public_repos": 8,
            "created_at": "2011-01-25T18:44:36Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    /// A public user body.
    pub fn user(login: &str) -> Value {
        json!({
            "login": login,
            "id": 2,
            "name": null,
            "company": null,
            "blog": null,
            "location": null,
            "email": null,
            "bio": null,
            "public_repos": 3,
            "followers": 20,
            "following": 0,
            "created_at": "2011-01-25T18:44:36Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    /// A repository body.
    pub fn repository(owner: &str, name: &str) -> Value {
        json!({
            "name": name,
            "full_name": format!("{}/{}", owner, name),
            "id": 3,
            "description": "A test repository",
            "html_url": format!("https://github.com/{}/{}", owner, name),
            "language": "Rust",
            "owner": {"login": owner},
            "stargazers_count": 100,
            "watchers_count": 100,
            "forks_count": 10,
            "open_issues_count": 5,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "pushed_at": "2024-01-01T00:00:00Z"
        })
    }

    /// A page of repository bodies named `{prefix}-0` through `{prefix}-{n-1}`.
    pub fn repository_page(owner: &str, prefix: &str, n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| repository(owner, &format!("{}-{}", prefix, i)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Method;

    fn request(url: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: url.to_string(),
            headers: vec![],
            params: vec![],
        }
    }

    #[test]
    fn serves_responses_in_fifo_order_and_records_requests() {
        let mock = MockTransport::new();
        mock.push(RawResponse::new(200, "1"));
        mock.push(RawResponse::new(404, "2"));

        let first = mock.perform(&request("https://a/one")).unwrap();
        let second = mock.perform(&request("https://a/two")).unwrap();

        assert_eq!(first.status(), 200);
        assert_eq!(second.status(), 404);
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.requests()[1].url, "https://a/two");
    }

    #[test]
    fn exhausted_queue_is_a_transport_error() {
        let mock = MockTransport::new();
        assert!(mock.perform(&request("https://a/one")).is_err());
        // The failed attempt is still recorded.
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn clones_share_state() {
        let mock = MockTransport::new();
        let observer = mock.clone();
        mock.push(RawResponse::new(200, "{}"));
        mock.perform(&request("https://a/one")).unwrap();
        assert_eq!(observer.request_count(), 1);
    }
}

//! Lazy pagination over multi-page listings.
//!
//! A paged call presents a multi-page resource as one lazy sequence of
//! `(status_code, value)` pairs, one pair per page. Pages are fetched only
//! as the sequence is consumed, advancing via the response's `Link`
//! `rel="next"` metadata until exhausted.

use serde_json::Value;

use crate::client::Client;
use crate::descriptor::CallDescriptor;
use crate::errors::ApiResult;
use crate::transport::RawResponse;

/// Pagination links parsed from an RFC 8288 `Link` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// URL of the next page.
    pub next: Option<String>,
    /// URL of the previous page.
    pub prev: Option<String>,
    /// URL of the first page.
    pub first: Option<String>,
    /// URL of the last page.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parses a `Link` header value.
    pub fn from_header(header_value: &str) -> Self {
        let mut links = Self::default();

        for part in header_value.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(target) = segment
                    .strip_prefix('<')
                    .and_then(|rest| rest.strip_suffix('>'))
                {
                    url = Some(target.to_string());
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"').to_string());
                }
            }

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel.as_str() {
                    "next" => links.next = Some(url),
                    "prev" => links.prev = Some(url),
                    "first" => links.first = Some(url),
                    "last" => links.last = Some(url),
                    _ => {}
                }
            }
        }

        links
    }

    /// Parses pagination links from a raw response, if any.
    pub(crate) fn from_response(response: &RawResponse) -> Self {
        response
            .header("link")
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// True if a next page is advertised.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Pagination state: the URL the next advance will fetch, or done.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageState {
    HasNextPage(String),
    Exhausted,
}

/// A lazy, finite sequence of `(status_code, value)` pairs, one per page.
///
/// Each advance performs exactly one dispatch through the single-call
/// executor. An error mid-sequence is yielded at the iteration point and
/// exhausts the iterator; pages already yielded remain valid. The sequence
/// is fused and not restartable — re-iterating requires a fresh paged call.
pub struct Paged<'a> {
    client: &'a Client,
    descriptor: &'a CallDescriptor,
    state: PageState,
    /// Query parameters for the first request only; next-page URLs already
    /// carry their own query string.
    first_query: Option<Vec<(String, String)>>,
}

impl<'a> Paged<'a> {
    pub(crate) fn new(
        client: &'a Client,
        descriptor: &'a CallDescriptor,
        first_url: String,
        first_query: Vec<(String, String)>,
    ) -> Self {
        Self {
            client,
            descriptor,
            state: PageState::HasNextPage(first_url),
            first_query: Some(first_query),
        }
    }
}

impl Iterator for Paged<'_> {
    type Item = ApiResult<(u16, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = match &self.state {
            PageState::Exhausted => return None,
            PageState::HasNextPage(url) => url.clone(),
        };
        let query = self.first_query.take().unwrap_or_default();

        match self.client.fetch_page(self.descriptor, &url, &query) {
            Err(error) => {
                self.state = PageState::Exhausted;
                Some(Err(error))
            }
            Ok(((status, value), next)) => {
                // An empty page means the collection ran out; it is not a
                // result page and is not yielded.
                if value.as_array().is_some_and(Vec::is_empty) {
                    self.state = PageState::Exhausted;
                    return None;
                }

                self.state = match next {
                    Some(next) => PageState::HasNextPage(next),
                    None => PageState::Exhausted,
                };
                Some(Ok((status, value)))
            }
        }
    }
}

impl std::iter::FusedIterator for Paged<'_> {}

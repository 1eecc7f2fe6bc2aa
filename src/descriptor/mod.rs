//! Endpoint call descriptors.

use crate::errors::{ApiError, ApiResult};
use crate::schema::ResponseShape;
use crate::transport::Method;

/// Static configuration describing one API endpoint: its path template,
/// HTTP method, whether it requires authentication, and the expected
/// response shape. Defined once per endpoint, immutable.
#[derive(Debug, Clone, Copy)]
pub struct CallDescriptor {
    /// Path template relative to the base URL, with `{name}` placeholders.
    pub path: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Whether the authenticated-call gate applies.
    pub requires_auth: bool,
    /// Declared shape of the response body.
    pub shape: ResponseShape,
}

impl CallDescriptor {
    /// Creates a GET descriptor for a public endpoint; usable in `const`
    /// tables.
    pub const fn get(path: &'static str, shape: ResponseShape) -> Self {
        Self {
            path,
            method: Method::Get,
            requires_auth: false,
            shape,
        }
    }

    /// Marks the descriptor as requiring an access token.
    pub const fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Fills the path template with named parameters.
    ///
    /// Every supplied parameter must correspond to a placeholder, and every
    /// placeholder must be filled; anything else is local misuse reported as
    /// [`ApiError::InvalidRequest`] before any dispatch.
    pub fn fill_path(&self, params: &[(&str, &str)]) -> ApiResult<String> {
        let mut path = self.path.to_string();
        for (name, value) in params {
            let placeholder = format!("{{{}}}", name);
            if !path.contains(&placeholder) {
                return Err(ApiError::InvalidRequest(format!(
                    "unknown path parameter `{}` for `{}`",
                    name, self.path
                )));
            }
            path = path.replace(&placeholder, value);
        }

        if let Some(start) = path.find('{') {
            let rest = &path[start..];
            let name = rest
                .find('}')
                .map(|end| &rest[1..end])
                .unwrap_or(&rest[1..]);
            return Err(ApiError::InvalidRequest(format!(
                "missing path parameter `{}` for `{}`",
                name, self.path
            )));
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType};

    const SHAPE: ResponseShape =
        ResponseShape::Object(&[Field::new("login", FieldType::String)]);

    #[test]
    fn fills_named_placeholders() {
        let descriptor = CallDescriptor::get("/repos/{owner}/{repository}", SHAPE);
        let path = descriptor
            .fill_path(&[("owner", "rust-lang"), ("repository", "rust")])
            .unwrap();
        assert_eq!(path, "/repos/rust-lang/rust");
    }

    #[test]
    fn rejects_unknown_parameters() {
        let descriptor = CallDescriptor::get("/orgs/{name}", SHAPE);
        let error = descriptor
            .fill_path(&[("name", "octo"), ("page", "2")])
            .unwrap_err();
        assert!(error.to_string().contains("page"));
    }

    #[test]
    fn rejects_unfilled_placeholders() {
        let descriptor = CallDescriptor::get("/repos/{owner}/{repository}", SHAPE);
        let error = descriptor.fill_path(&[("owner", "rust-lang")]).unwrap_err();
        assert!(error.to_string().contains("repository"));
    }

    #[test]
    fn authenticated_flag() {
        let descriptor = CallDescriptor::get("/user", SHAPE).authenticated();
        assert!(descriptor.requires_auth);
        assert!(!CallDescriptor::get("/user", SHAPE).requires_auth);
    }
}

//! GitHub endpoint configuration.
//!
//! Everything in this module is declarative: path templates, auth flags,
//! and response shapes. The executors in [`crate::client`] and
//! [`crate::pagination`] consume the table without interpreting it.

use serde_json::Value;

use crate::client::Client;
use crate::descriptor::CallDescriptor;
use crate::errors::ApiResult;
use crate::pagination::Paged;
use crate::schema::{Field, FieldType, ResponseShape};

/// Page size requested for paged listings (the GitHub maximum).
pub const PER_PAGE: u32 = 100;

const ORGANIZATION_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("name", FieldType::String),
    Field::new("description", FieldType::String),
    Field::new("html_url", FieldType::String),
    Field::new("blog", FieldType::String),
    Field::new("location", FieldType::String),
    Field::new("email", FieldType::String),
    Field::new("public_repos", FieldType::Integer),
    Field::new("created_at", FieldType::String),
    Field::new("updated_at", FieldType::String),
];

// The authenticated view adds the private counters.
const ORGANIZATION_PRIVATE_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("name", FieldType::String),
    Field::new("description", FieldType::String),
    Field::new("html_url", FieldType::String),
    Field::new("blog", FieldType::String),
    Field::new("location", FieldType::String),
    Field::new("email", FieldType::String),
    Field::new("public_repos", FieldType::Integer),
    Field::new("total_private_repos", FieldType::Integer),
    Field::new("owned_private_repos", FieldType::Integer),
    Field::new("collaborators", FieldType::Integer),
    Field::new("created_at", FieldType::String),
    Field::new("updated_at", FieldType::String),
];

const USER_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("name", FieldType::String),
    Field::new("company", FieldType::String),
    Field::new("blog", FieldType::String),
    Field::new("location", FieldType::String),
    Field::new("email", FieldType::String),
    Field::new("bio", FieldType::String),
    Field::new("public_repos", FieldType::Integer),
    Field::new("followers", FieldType::Integer),
    Field::new("following", FieldType::Integer),
    Field::new("created_at", FieldType::String),
    Field::new("updated_at", FieldType::String),
];

const USER_PRIVATE_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("name", FieldType::String),
    Field::new("company", FieldType::String),
    Field::new("blog", FieldType::String),
    Field::new("location", FieldType::String),
    Field::new("email", FieldType::String),
    Field::new("bio", FieldType::String),
    Field::new("public_repos", FieldType::Integer),
    Field::new("total_private_repos", FieldType::Integer),
    Field::new("owned_private_repos", FieldType::Integer),
    Field::new("followers", FieldType::Integer),
    Field::new("following", FieldType::Integer),
    Field::new("created_at", FieldType::String),
    Field::new("updated_at", FieldType::String),
];

const REPOSITORY_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("full_name", FieldType::String),
    Field::new("description", FieldType::String),
    Field::new("html_url", FieldType::String),
    Field::new("language", FieldType::String),
    Field::new("owner", FieldType::Map),
    Field::new("stargazers_count", FieldType::Integer),
    Field::new("watchers_count", FieldType::Integer),
    Field::new("forks_count", FieldType::Integer),
    Field::new("open_issues_count", FieldType::Integer),
    Field::new("created_at", FieldType::String),
    Field::new("updated_at", FieldType::String),
    Field::new("pushed_at", FieldType::String),
];

const MEMBER_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("html_url", FieldType::String),
    Field::new("type", FieldType::String),
];

const CONTRIBUTOR_FIELDS: &[Field] = &[
    Field::new("login", FieldType::String),
    Field::new("html_url", FieldType::String),
    Field::new("contributions", FieldType::Integer),
];

/// Public view of an organization.
pub const PUBLIC_ORGANIZATION: CallDescriptor =
    CallDescriptor::get("/orgs/{name}", ResponseShape::Object(ORGANIZATION_FIELDS));

/// Member view of an organization, including private counters.
pub const ORGANIZATION: CallDescriptor = CallDescriptor::get(
    "/orgs/{name}",
    ResponseShape::Object(ORGANIZATION_PRIVATE_FIELDS),
)
.authenticated();

/// Public repositories of an organization, paged.
pub const PUBLIC_ORGANIZATION_REPOSITORIES: CallDescriptor = CallDescriptor::get(
    "/orgs/{name}/repos",
    ResponseShape::List(REPOSITORY_FIELDS),
);

/// All repositories visible to the caller in an organization, paged.
pub const ORGANIZATION_REPOSITORIES: CallDescriptor = CallDescriptor::get(
    "/orgs/{name}/repos",
    ResponseShape::List(REPOSITORY_FIELDS),
)
.authenticated();

/// Public members of an organization, paged.
pub const PUBLIC_ORGANIZATION_MEMBERS: CallDescriptor = CallDescriptor::get(
    "/orgs/{name}/public_members",
    ResponseShape::List(MEMBER_FIELDS),
);

/// All members of an organization, paged.
pub const ORGANIZATION_MEMBERS: CallDescriptor = CallDescriptor::get(
    "/orgs/{name}/members",
    ResponseShape::List(MEMBER_FIELDS),
)
.authenticated();

/// Public profile of a user.
pub const PUBLIC_USER: CallDescriptor =
    CallDescriptor::get("/users/{name}", ResponseShape::Object(USER_FIELDS));

/// Profile of the authenticated user, including private counters.
pub const AUTHENTICATED_USER: CallDescriptor =
    CallDescriptor::get("/user", ResponseShape::Object(USER_PRIVATE_FIELDS)).authenticated();

/// Public repositories of a user, paged.
pub const PUBLIC_USER_REPOSITORIES: CallDescriptor = CallDescriptor::get(
    "/users/{name}/repos",
    ResponseShape::List(REPOSITORY_FIELDS),
);

/// Public view of a repository.
pub const PUBLIC_REPOSITORY: CallDescriptor = CallDescriptor::get(
    "/repos/{owner}/{repository}",
    ResponseShape::Object(REPOSITORY_FIELDS),
);

/// Collaborator view of a repository.
pub const REPOSITORY: CallDescriptor = CallDescriptor::get(
    "/repos/{owner}/{repository}",
    ResponseShape::Object(REPOSITORY_FIELDS),
)
.authenticated();

/// Contributors of a repository, paged.
pub const REPOSITORY_CONTRIBUTORS: CallDescriptor = CallDescriptor::get(
    "/repos/{owner}/{repository}/contributors",
    ResponseShape::List(CONTRIBUTOR_FIELDS),
);

fn paged_query() -> Vec<(String, String)> {
    vec![("per_page".to_string(), PER_PAGE.to_string())]
}

impl Client {
    /// Fetches the public profile of an organization.
    pub fn get_public_organization(&self, name: &str) -> ApiResult<(u16, Value)> {
        self.call(&PUBLIC_ORGANIZATION, &[("name", name)], &[])
    }

    /// Fetches an organization as a member, including private counters.
    pub fn get_organization(&self, name: &str) -> ApiResult<(u16, Value)> {
        self.call(&ORGANIZATION, &[("name", name)], &[])
    }

    /// Lists the public repositories of an organization, one page per item.
    pub fn get_organizations_public_repositories(&self, name: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(
            &PUBLIC_ORGANIZATION_REPOSITORIES,
            &[("name", name)],
            &paged_query(),
        )
    }

    /// Lists all repositories visible to the caller in an organization.
    pub fn get_organizations_repositories(&self, name: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(&ORGANIZATION_REPOSITORIES, &[("name", name)], &paged_query())
    }

    /// Lists the public members of an organization.
    pub fn get_organizations_public_members(&self, name: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(
            &PUBLIC_ORGANIZATION_MEMBERS,
            &[("name", name)],
            &paged_query(),
        )
    }

    /// Lists all members of an organization.
    pub fn get_organizations_members(&self, name: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(&ORGANIZATION_MEMBERS, &[("name", name)], &paged_query())
    }

    /// Fetches the public profile of a user.
    pub fn get_public_user(&self, name: &str) -> ApiResult<(u16, Value)> {
        self.call(&PUBLIC_USER, &[("name", name)], &[])
    }

    /// Fetches the authenticated user's profile.
    pub fn get_user(&self) -> ApiResult<(u16, Value)> {
        self.call(&AUTHENTICATED_USER, &[], &[])
    }

    /// Lists the public repositories of a user.
    pub fn get_users_public_repositories(&self, name: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(&PUBLIC_USER_REPOSITORIES, &[("name", name)], &paged_query())
    }

    /// Fetches the public view of a repository.
    pub fn get_public_repository(&self, owner: &str, repository: &str) -> ApiResult<(u16, Value)> {
        self.call(
            &PUBLIC_REPOSITORY,
            &[("owner", owner), ("repository", repository)],
            &[],
        )
    }

    /// Fetches a repository as a collaborator.
    pub fn get_repository(&self, owner: &str, repository: &str) -> ApiResult<(u16, Value)> {
        self.call(
            &REPOSITORY,
            &[("owner", owner), ("repository", repository)],
            &[],
        )
    }

    /// Lists the contributors of a repository.
    pub fn get_repository_contributors(&self, owner: &str, repository: &str) -> ApiResult<Paged<'_>> {
        self.call_paged(
            &REPOSITORY_CONTRIBUTORS,
            &[("owner", owner), ("repository", repository)],
            &paged_query(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gated_endpoints_are_flagged() {
        assert!(!PUBLIC_ORGANIZATION.requires_auth);
        assert!(ORGANIZATION.requires_auth);
        assert!(!PUBLIC_USER.requires_auth);
        assert!(AUTHENTICATED_USER.requires_auth);
        assert!(ORGANIZATION_MEMBERS.requires_auth);
    }

    #[test]
    fn paged_endpoints_declare_list_shapes() {
        for descriptor in [
            &PUBLIC_ORGANIZATION_REPOSITORIES,
            &ORGANIZATION_REPOSITORIES,
            &PUBLIC_ORGANIZATION_MEMBERS,
            &ORGANIZATION_MEMBERS,
            &PUBLIC_USER_REPOSITORIES,
            &REPOSITORY_CONTRIBUTORS,
        ] {
            assert!(matches!(descriptor.shape, ResponseShape::List(_)));
        }
    }

    #[test]
    fn path_templates_fill() {
        assert_eq!(
            PUBLIC_REPOSITORY
                .fill_path(&[("owner", "rust-lang"), ("repository", "rust")])
                .unwrap(),
            "/repos/rust-lang/rust"
        );
        assert_eq!(AUTHENTICATED_USER.fill_path(&[]).unwrap(), "/user");
    }
}

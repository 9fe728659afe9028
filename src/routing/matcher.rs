//! Route matching module
//!
//! Resolves a method and path against the API route templates:
//!
//! | Template                 | Methods                     |
//! |--------------------------|-----------------------------|
//! | `{base}/users`           | GET, HEAD, POST             |
//! | `{base}/users/{user_id}` | GET, HEAD, PUT, PATCH, DELETE |
//! | `{base}/unknown`         | GET, HEAD                   |

use hyper::Method;

/// API operation selected by a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListUsers,
    GetUser,
    ListResources,
    CreateUser,
    ReplaceUser,
    PatchUser,
    DeleteUser,
}

impl Operation {
    /// Whether the operation reads a JSON request body
    pub const fn has_body(self) -> bool {
        matches!(self, Self::CreateUser | Self::ReplaceUser | Self::PatchUser)
    }
}

/// Result of matching a request against the route templates
#[derive(Debug, PartialEq, Eq)]
pub enum RouteOutcome<'a> {
    /// Route found; `user_id` holds the raw `{user_id}` segment when the template has one
    Matched {
        operation: Operation,
        user_id: Option<&'a str>,
    },
    /// Path exists but not for this method; `allow` lists the accepted methods
    MethodNotAllowed { allow: &'static str },
    NotFound,
}

const ALLOW_COLLECTION: &str = "GET, HEAD, POST, OPTIONS";
const ALLOW_ITEM: &str = "GET, HEAD, PUT, PATCH, DELETE, OPTIONS";
const ALLOW_READ_ONLY: &str = "GET, HEAD, OPTIONS";

/// Match `path` under `base` (no trailing slash, `""` for root)
pub fn match_route<'a>(method: &Method, path: &'a str, base: &str) -> RouteOutcome<'a> {
    let Some(rest) = strip_base(path, base) else {
        return RouteOutcome::NotFound;
    };

    let mut segments = rest.split('/');
    let first = segments.next();
    let second = segments.next();
    if segments.next().is_some() {
        return RouteOutcome::NotFound;
    }

    match (first, second) {
        (Some("users"), None) => match *method {
            Method::GET | Method::HEAD => matched(Operation::ListUsers, None),
            Method::POST => matched(Operation::CreateUser, None),
            _ => RouteOutcome::MethodNotAllowed {
                allow: ALLOW_COLLECTION,
            },
        },
        (Some("users"), Some(id)) if !id.is_empty() => match *method {
            Method::GET | Method::HEAD => matched(Operation::GetUser, Some(id)),
            Method::PUT => matched(Operation::ReplaceUser, Some(id)),
            Method::PATCH => matched(Operation::PatchUser, Some(id)),
            Method::DELETE => matched(Operation::DeleteUser, Some(id)),
            _ => RouteOutcome::MethodNotAllowed { allow: ALLOW_ITEM },
        },
        (Some("unknown"), None) => match *method {
            Method::GET | Method::HEAD => matched(Operation::ListResources, None),
            _ => RouteOutcome::MethodNotAllowed {
                allow: ALLOW_READ_ONLY,
            },
        },
        _ => RouteOutcome::NotFound,
    }
}

const fn matched(operation: Operation, user_id: Option<&str>) -> RouteOutcome<'_> {
    RouteOutcome::Matched { operation, user_id }
}

/// Strip the base path and the following `/`, requiring a segment boundary
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    path.strip_prefix(base)?.strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_routes() {
        assert_eq!(
            match_route(&Method::GET, "/api/users", "/api"),
            matched(Operation::ListUsers, None)
        );
        assert_eq!(
            match_route(&Method::HEAD, "/api/users", "/api"),
            matched(Operation::ListUsers, None)
        );
        assert_eq!(
            match_route(&Method::POST, "/api/users", "/api"),
            matched(Operation::CreateUser, None)
        );
        assert_eq!(
            match_route(&Method::GET, "/api/unknown", "/api"),
            matched(Operation::ListResources, None)
        );
    }

    #[test]
    fn test_item_routes_capture_user_id() {
        let cases = [
            (Method::GET, Operation::GetUser),
            (Method::PUT, Operation::ReplaceUser),
            (Method::PATCH, Operation::PatchUser),
            (Method::DELETE, Operation::DeleteUser),
        ];
        for (method, operation) in cases {
            assert_eq!(
                match_route(&method, "/api/users/42", "/api"),
                matched(operation, Some("42"))
            );
        }
        // captured verbatim, parsing happens in the handler
        assert_eq!(
            match_route(&Method::GET, "/api/users/abc", "/api"),
            matched(Operation::GetUser, Some("abc"))
        );
    }

    #[test]
    fn test_method_not_allowed() {
        assert_eq!(
            match_route(&Method::DELETE, "/api/users", "/api"),
            RouteOutcome::MethodNotAllowed {
                allow: ALLOW_COLLECTION
            }
        );
        assert_eq!(
            match_route(&Method::POST, "/api/users/2", "/api"),
            RouteOutcome::MethodNotAllowed { allow: ALLOW_ITEM }
        );
        assert_eq!(
            match_route(&Method::POST, "/api/unknown", "/api"),
            RouteOutcome::MethodNotAllowed {
                allow: ALLOW_READ_ONLY
            }
        );
    }

    #[test]
    fn test_not_found() {
        for path in [
            "/api",
            "/api/",
            "/api/users/",
            "/api/users/2/extra",
            "/api/unknown/1",
            "/apiusers",
            "/other/users",
            "/",
        ] {
            assert_eq!(
                match_route(&Method::GET, path, "/api"),
                RouteOutcome::NotFound,
                "path {path}"
            );
        }
    }

    #[test]
    fn test_custom_and_root_base() {
        assert_eq!(
            match_route(&Method::GET, "/v2/users/7", "/v2"),
            matched(Operation::GetUser, Some("7"))
        );
        assert_eq!(
            match_route(&Method::GET, "/users", ""),
            matched(Operation::ListUsers, None)
        );
        assert_eq!(
            match_route(&Method::GET, "/api/users", ""),
            RouteOutcome::NotFound
        );
    }

    #[test]
    fn test_body_operations() {
        assert!(Operation::CreateUser.has_body());
        assert!(Operation::PatchUser.has_body());
        assert!(!Operation::DeleteUser.has_body());
        assert!(!Operation::ListUsers.has_body());
    }
}

// API request/response types
// Typed bodies checked at the request boundary

use serde::{Deserialize, Serialize};

use crate::data::{Support, User};

/// Body of `POST /users`
///
/// Fields are optional so that a missing field can be reported as a
/// 400 together with an empty one.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

/// Body of `PUT` and `PATCH /users/{user_id}`
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedUser {
    pub name: String,
    pub job: String,
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatedUser {
    pub name: String,
    pub job: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Body of `GET /users/{user_id}`
#[derive(Debug, Serialize)]
pub struct SingleUser<'a> {
    pub data: &'a User,
    pub support: &'a Support,
}

/// Error body, a single human-readable `detail`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: String,
}

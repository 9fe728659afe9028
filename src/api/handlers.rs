// Mock API handlers module
// Pure functions of (request data, dataset); nothing here writes to the dataset

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::num::IntErrorKind;

use super::error::ApiError;
use super::response::json_response;
use super::types::{CreateUserRequest, CreatedUser, SingleUser, UpdateUserRequest, UpdatedUser};
use crate::data::Dataset;
use crate::http::build_empty_response;

/// Page served when `?page=` is absent
pub const DEFAULT_PAGE: i64 = 2;
/// The only resource page in the dataset
pub const RESOURCE_PAGE: i64 = 1;

/// Stub values echoed by create/update; they never depend on the input
pub const CREATED_USER_ID: &str = "409";
pub const CREATED_AT: &str = "2025-05-30T08:46:33.132Z";
pub const PUT_UPDATED_AT: &str = "2025-05-30T09:58:46.242Z";
pub const PATCH_UPDATED_AT: &str = "2025-05-30T10:29:24.851Z";

type HandlerResult = Result<Response<Full<Bytes>>, ApiError>;

/// `GET /users?page={page}`
pub fn list_users(dataset: &Dataset, query: Option<&str>) -> HandlerResult {
    let user_page = page_param(query)?
        .and_then(|page| dataset.user_page(page))
        .ok_or(ApiError::NotFound("Page not found"))?;
    Ok(json_response(StatusCode::OK, user_page))
}

/// `GET /users/{user_id}`
pub fn get_user(dataset: &Dataset, raw_id: &str) -> HandlerResult {
    let (user, support) = user_id_param(raw_id)?
        .and_then(|id| dataset.find_user(id))
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(json_response(
        StatusCode::OK,
        &SingleUser {
            data: user,
            support,
        },
    ))
}

/// `GET /unknown`
pub fn list_resources(dataset: &Dataset) -> HandlerResult {
    // Always present in the embedded seed
    let resources = dataset
        .resource_page(RESOURCE_PAGE)
        .ok_or(ApiError::NotFound("Resource not found"))?;
    Ok(json_response(StatusCode::OK, resources))
}

/// `POST /users`
pub fn create_user(body: &[u8]) -> HandlerResult {
    let request: CreateUserRequest = parse_body(body)?;

    let name = request.name.filter(|name| !name.is_empty());
    let job = request.job.filter(|job| !job.is_empty());
    let (Some(name), Some(job)) = (name, job) else {
        return Err(ApiError::BadRequest(
            "Name and job are required".to_string(),
        ));
    };

    Ok(json_response(
        StatusCode::CREATED,
        &CreatedUser {
            name,
            job,
            id: CREATED_USER_ID.to_string(),
            created_at: CREATED_AT.to_string(),
        },
    ))
}

/// `PUT` / `PATCH /users/{user_id}`
///
/// `user_id` is type-checked but never looked up.
pub fn update_user(raw_id: &str, body: &[u8], updated_at: &str) -> HandlerResult {
    user_id_param(raw_id)?;
    let request: UpdateUserRequest = parse_body(body)?;

    Ok(json_response(
        StatusCode::OK,
        &UpdatedUser {
            name: request.name,
            job: request.job,
            updated_at: updated_at.to_string(),
        },
    ))
}

/// `DELETE /users/{user_id}`
///
/// Existence is checked against the page numbers of the user table, not
/// against user ids: only `2` succeeds with the embedded seed.
pub fn delete_user(dataset: &Dataset, raw_id: &str) -> HandlerResult {
    let known = user_id_param(raw_id)?.is_some_and(|key| dataset.has_user_page(key));
    if !known {
        return Err(ApiError::NotFound("User not found"));
    }
    Ok(build_empty_response(StatusCode::NO_CONTENT))
}

/// `{user_id}` path segment, decoded the same way as a query value
#[derive(Debug, Deserialize)]
struct UserPath {
    user_id: String,
}

/// Extract `page` from a raw query string; the last occurrence wins
///
/// `Ok(None)` is a well-formed integer outside the `i64` range.
fn page_param(query: Option<&str>) -> Result<Option<i64>, ApiError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or(""))
        .map_err(|e| ApiError::Unprocessable(format!("Invalid query string: {e}")))?;

    match pairs.into_iter().rev().find(|(key, _)| key == "page") {
        Some((_, value)) => parse_int("page", &value),
        None => Ok(Some(DEFAULT_PAGE)),
    }
}

/// Percent-decode and type-check a raw `{user_id}` segment
fn user_id_param(raw: &str) -> Result<Option<i64>, ApiError> {
    // `+` is literal in a path and `&` would split the pair
    let escaped = raw.replace('+', "%2B").replace('&', "%26");
    let path: UserPath = serde_urlencoded::from_str(&format!("user_id={escaped}"))
        .map_err(|e| ApiError::Unprocessable(format!("Invalid user_id: {e}")))?;
    parse_int("user_id", &path.user_id)
}

fn parse_int(name: &str, raw: &str) -> Result<Option<i64>, ApiError> {
    match raw.parse::<i64>() {
        Ok(value) => Ok(Some(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(None)
        }
        Err(_) => Err(ApiError::Unprocessable(format!(
            "Invalid {name}: '{raw}' is not a valid integer"
        ))),
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Unprocessable(format!("Invalid request body: {e}")))
}

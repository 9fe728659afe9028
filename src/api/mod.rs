// API module entry
// reqres-style mock endpoints: users, resources, and stubbed writes

mod error;
mod handlers;
mod response;
mod types;

use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Request, Response};

use crate::config::AppState;
use crate::logger;
use crate::routing::{self, Operation, RouteOutcome};

// Re-export public types
pub use error::ApiError;
pub use handlers::{
    CREATED_AT, CREATED_USER_ID, DEFAULT_PAGE, PATCH_UPDATED_AT, PUT_UPDATED_AT,
};
pub use types::{CreatedUser, ErrorBody, UpdatedUser};

/// Boxed error produced by request bodies
type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// API route handler
///
/// Dispatches to handler functions based on request path and method.
/// Generic over the body so tests can drive it with in-memory requests.
pub async fn handle_api<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BodyError>,
{
    let (parts, body) = req.into_parts();
    dispatch(&parts, body, state)
        .await
        .unwrap_or_else(ApiError::into_response)
}

async fn dispatch<B>(
    parts: &Parts,
    body: B,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BodyError>,
{
    let dataset = &state.dataset;
    let outcome = routing::match_route(&parts.method, parts.uri.path(), state.config.api.base());

    let (operation, user_id) = match outcome {
        RouteOutcome::Matched { operation, user_id } => (operation, user_id.unwrap_or_default()),
        RouteOutcome::MethodNotAllowed { allow } => {
            return Err(ApiError::MethodNotAllowed { allow });
        }
        RouteOutcome::NotFound => return Err(ApiError::NotFound("Not Found")),
    };

    let payload = if operation.has_body() {
        read_body(body, state.config.http.max_body_size).await?
    } else {
        Bytes::new()
    };

    match operation {
        Operation::ListUsers => handlers::list_users(dataset, parts.uri.query()),
        Operation::GetUser => handlers::get_user(dataset, user_id),
        Operation::ListResources => handlers::list_resources(dataset),
        Operation::CreateUser => handlers::create_user(&payload),
        Operation::ReplaceUser => handlers::update_user(user_id, &payload, PUT_UPDATED_AT),
        Operation::PatchUser => handlers::update_user(user_id, &payload, PATCH_UPDATED_AT),
        Operation::DeleteUser => handlers::delete_user(dataset, user_id),
    }
}

/// Collect the request body, refusing more than `max_body_size` bytes
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BodyError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<http_body_util::LengthLimitError>() => {
            logger::log_warning(&format!(
                "Request body exceeds {max_body_size} bytes, rejected"
            ));
            Err(ApiError::PayloadTooLarge)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(ApiError::BadRequest("Failed to read request body".to_string()))
        }
    }
}

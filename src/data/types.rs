// Record types for the canned dataset
// Field order matches the JSON served to clients

use serde::{Deserialize, Serialize};

/// A single user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Avatar image URL
    pub avatar: String,
}

/// A color swatch served by the resource listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub year: i32,
    /// Hex color, e.g. `#98B2D1`
    pub color: String,
    pub pantone_value: String,
}

/// Promotional metadata attached to list and detail responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Support {
    pub url: String,
    pub text: String,
}

/// One page of records plus its pagination metadata
///
/// The metadata is copied verbatim from the seed and never recomputed
/// from `data.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: i64,
    pub per_page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub data: Vec<T>,
    pub support: Support,
}

pub type UserPage = Page<User>;
pub type ResourcePage = Page<Resource>;

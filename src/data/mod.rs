//! Canned dataset module
//!
//! The user and resource tables are parsed once from the embedded seed,
//! validated, and then shared read-only between all requests.

mod types;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Deserialize;

pub use types::{Page, Resource, ResourcePage, Support, User, UserPage};

/// Seed shipped inside the binary
const EMBEDDED_SEED: &str = include_str!("seed.json");

/// Errors raised while loading a seed
#[derive(Debug)]
pub enum DatasetError {
    /// Seed is not valid JSON or does not match the record schema
    Parse(serde_json::Error),
    /// Table key differs from the `page` field of the record it points to
    PageKeyMismatch { key: i64, page: i64 },
    /// The same user id appears more than once across pages
    DuplicateUserId(i64),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid seed data: {e}"),
            Self::PageKeyMismatch { key, page } => {
                write!(f, "Seed page key {key} does not match page number {page}")
            }
            Self::DuplicateUserId(id) => write!(f, "Duplicate user id in seed: {id}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

#[derive(Deserialize)]
struct Seed {
    users: BTreeMap<i64, UserPage>,
    resources: BTreeMap<i64, ResourcePage>,
}

/// Read-only user and resource tables keyed by page number
#[derive(Debug, Clone)]
pub struct Dataset {
    users: BTreeMap<i64, UserPage>,
    resources: BTreeMap<i64, ResourcePage>,
}

impl Dataset {
    /// Load the seed compiled into the binary
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_SEED)
    }

    /// Parse and validate a seed document
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let seed: Seed = serde_json::from_str(json)?;

        check_page_keys(&seed.users)?;
        check_page_keys(&seed.resources)?;

        let mut seen = HashSet::new();
        for user in seed.users.values().flat_map(|page| page.data.iter()) {
            if !seen.insert(user.id) {
                return Err(DatasetError::DuplicateUserId(user.id));
            }
        }

        Ok(Self {
            users: seed.users,
            resources: seed.resources,
        })
    }

    pub fn user_page(&self, page: i64) -> Option<&UserPage> {
        self.users.get(&page)
    }

    /// Whether `key` is a page number of the user table
    pub fn has_user_page(&self, key: i64) -> bool {
        self.users.contains_key(&key)
    }

    /// Find a user by id, together with the support record of its page
    pub fn find_user(&self, id: i64) -> Option<(&User, &Support)> {
        self.users.values().find_map(|page| {
            page.data
                .iter()
                .find(|user| user.id == id)
                .map(|user| (user, &page.support))
        })
    }

    pub fn resource_page(&self, page: i64) -> Option<&ResourcePage> {
        self.resources.get(&page)
    }
}

fn check_page_keys<T>(table: &BTreeMap<i64, Page<T>>) -> Result<(), DatasetError> {
    for (key, page) in table {
        if *key != page.page {
            return Err(DatasetError::PageKeyMismatch {
                key: *key,
                page: page.page,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_with_users(users: &str) -> String {
        format!(
            r#"{{
                "users": {{ "1": {{
                    "page": 1, "per_page": 2, "total": 2, "total_pages": 1,
                    "data": [{users}],
                    "support": {{ "url": "https://example.com", "text": "hi" }}
                }} }},
                "resources": {{}}
            }}"#
        )
    }

    fn user_json(id: i64) -> String {
        format!(
            r#"{{ "id": {id}, "email": "u{id}@example.com", "first_name": "F",
                 "last_name": "L", "avatar": "https://example.com/{id}.jpg" }}"#
        )
    }

    #[test]
    fn test_embedded_seed_loads() {
        let dataset = Dataset::embedded().expect("embedded seed must be valid");

        let page = dataset.user_page(2).expect("page 2 exists");
        assert_eq!(page.data.len(), 7);
        assert_eq!(page.per_page, 7);
        assert_eq!(page.total, 13);
        assert_eq!(page.total_pages, 2);

        let resources = dataset.resource_page(1).expect("resource page 1 exists");
        assert_eq!(resources.data.len(), 6);
        assert_eq!(resources.data[0].name, "cerulean");
        assert_eq!(resources.data[0].year, 2000);
    }

    #[test]
    fn test_find_user() {
        let dataset = Dataset::embedded().unwrap();

        let (user, support) = dataset.find_user(2).expect("user 2 exists");
        assert_eq!(user.email, "janet.weaver@reqres.in");
        assert_eq!(user.first_name, "Janet");
        assert_eq!(user.last_name, "Weaver");
        assert!(support.url.starts_with("https://contentcaddy.io"));

        assert!(dataset.find_user(1).is_none());
        assert!(dataset.find_user(9999).is_none());
    }

    #[test]
    fn test_page_keys_are_not_user_ids() {
        let dataset = Dataset::embedded().unwrap();
        assert!(dataset.has_user_page(2));
        // user 7 exists, but 7 is not a page number
        assert!(dataset.find_user(7).is_some());
        assert!(!dataset.has_user_page(7));
    }

    #[test]
    fn test_duplicate_user_id_rejected() {
        let json = seed_with_users(&format!("{},{}", user_json(5), user_json(5)));
        match Dataset::from_json(&json) {
            Err(DatasetError::DuplicateUserId(5)) => {}
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn test_page_key_mismatch_rejected() {
        let json = seed_with_users(&user_json(1)).replace(r#""1": {"#, r#""3": {"#);
        assert!(matches!(
            Dataset::from_json(&json),
            Err(DatasetError::PageKeyMismatch { key: 3, page: 1 })
        ));
    }

    #[test]
    fn test_malformed_seed_rejected() {
        let err = Dataset::from_json("{ not json").unwrap_err();
        assert!(err.to_string().starts_with("Invalid seed data"));
    }
}

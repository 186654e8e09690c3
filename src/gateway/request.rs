//! Request construction for the catalog backend
//!
//! Requests are plain values so the flows that build them can be checked
//! without a browser; `client::send` performs them.

use crate::models::SlotKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP method of an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A fully described API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Book to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub slot_key: SlotKey,
}

/// JSON field names of the create-book body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub slot_key: String,
}

impl Default for BookFields {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            author: "author".to_string(),
            slot_key: "slot_key".to_string(),
        }
    }
}

/// Backend paths, the admin header name and the create-book body layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    /// Catalog collection: GET to fetch, POST to add
    pub catalog_path: String,

    /// Item prefix: DELETE `<item_path>/<id>`
    pub item_path: String,

    /// Header carrying the admin credential
    pub admin_header: String,

    /// Field names used when posting a new book
    pub book_fields: BookFields,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            catalog_path: "/api/biblioteca".to_string(),
            item_path: "/api/libros".to_string(),
            admin_header: "X-API-KEY".to_string(),
            book_fields: BookFields::default(),
        }
    }
}

impl ApiEndpoints {
    /// GET the catalog; `timestamp_ms` defeats intermediate caches
    pub fn fetch_catalog(&self, timestamp_ms: u64) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: format!("{}?timestamp={}", self.catalog_path, timestamp_ms),
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST a new book; field names come from `book_fields`
    pub fn create_book(&self, book: &NewBook, credential: Option<&str>) -> ApiRequest {
        let fields = &self.book_fields;
        let mut body = serde_json::Map::new();
        body.insert(fields.title.clone(), Value::from(book.title.as_str()));
        body.insert(fields.author.clone(), Value::from(book.author.as_str()));
        body.insert(fields.slot_key.clone(), Value::from(book.slot_key.to_string()));
        let body = Value::Object(body);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        headers.extend(self.admin_headers(credential));

        ApiRequest {
            method: Method::Post,
            url: self.catalog_path.clone(),
            headers,
            body: Some(body.to_string()),
        }
    }

    /// DELETE a book by its catalog id
    pub fn delete_book(&self, id: &str, credential: Option<&str>) -> ApiRequest {
        ApiRequest {
            method: Method::Delete,
            url: format!("{}/{}", self.item_path.trim_end_matches('/'), urlencoding::encode(id)),
            headers: self.admin_headers(credential).collect(),
            body: None,
        }
    }

    fn admin_headers<'a>(&'a self, credential: Option<&'a str>) -> impl Iterator<Item = (String, String)> + 'a {
        credential
            .into_iter()
            .map(move |value| (self.admin_header.clone(), value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_catalog_has_cache_buster() {
        let request = ApiEndpoints::default().fetch_catalog(1_700_000_000_000);
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "/api/biblioteca?timestamp=1700000000000");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_create_book_body_and_headers() {
        let book = NewBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            slot_key: SlotKey::new(3, 7),
        };

        let request = ApiEndpoints::default().create_book(&book, Some("key"));
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "/api/biblioteca");
        assert_eq!(request.header("x-api-key"), Some("key"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["author"], "Herbert");
        assert_eq!(body["slot_key"], "3-7");
    }

    #[test]
    fn test_create_book_uses_configured_field_names() {
        let endpoints: ApiEndpoints = serde_json::from_str(
            r#"{"book_fields": {"title": "titulo", "author": "autor", "slot_key": "clave_cubiculo"}}"#,
        )
        .unwrap();
        let book = NewBook {
            title: "Ficciones".into(),
            author: "Borges".into(),
            slot_key: SlotKey::new(0, 0),
        };

        let request = endpoints.create_book(&book, Some("desarrollo"));
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();

        assert_eq!(request.url, "/api/biblioteca");
        assert_eq!(body["titulo"], "Ficciones");
        assert_eq!(body["autor"], "Borges");
        assert_eq!(body["clave_cubiculo"], "0-0");
        assert!(body.get("title").is_none());
    }

    #[test]
    fn test_admin_header_omitted_without_credential() {
        let request = ApiEndpoints::default().delete_book("5", None);
        assert_eq!(request.header("X-API-KEY"), None);
    }

    #[test]
    fn test_delete_book_url_encodes_id() {
        let request = ApiEndpoints::default().delete_book("a/b c", Some("key"));
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "/api/libros/a%2Fb%20c");
        assert_eq!(request.header("X-API-KEY"), Some("key"));
    }
}

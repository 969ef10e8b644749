//! Paginated collections and list payload shapes

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_CONTENT_FIELD};
use crate::errors::{ErpError, Result};

/// Page coordinates sent as `page`/`size` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// A zero `size` is coerced to the default page size.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size: if size == 0 { DEFAULT_PAGE_SIZE } else { size } }
    }

    pub fn first(size: u32) -> Self {
        Self::new(0, size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Cached collection with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Initial empty shape of a store's collection.
    pub fn empty(size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            size: PageRequest::new(0, size).size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Pagination for a flat (unpaginated) response to `request`.
    pub fn synthesize(items: Vec<T>, request: PageRequest) -> Self {
        let total_elements = items.len() as u64;
        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: total_pages(total_elements, request.size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}

/// `ceil(total_elements / size)`, zero when `size` is zero.
pub fn total_pages(total_elements: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total_elements.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Server-side page as serialized by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPage<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub number: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Unwrapped list payload: either a server page or a bare array.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload<T> {
    Paginated(ServerPage<T>),
    Flat(Vec<T>),
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// A payload is paginated when it is an object carrying a `content`
    /// field; an array is flat. `null` is an empty flat list.
    pub fn from_value(value: Value) -> Result<Self> {
        let paginated =
            matches!(&value, Value::Object(map) if map.contains_key(PAGE_CONTENT_FIELD));
        if paginated {
            return serde_json::from_value(value)
                .map(Self::Paginated)
                .map_err(|e| ErpError::Decode(format!("invalid page payload: {e}")));
        }

        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(Self::Flat)
                .map_err(|e| ErpError::Decode(format!("invalid list payload: {e}"))),
            Value::Null => Ok(Self::Flat(Vec::new())),
            other => Err(ErpError::Decode(format!(
                "expected a list or a page, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<T> ListPayload<T> {
    /// Replace-in-full conversion into a cached collection for `request`.
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        match self {
            Self::Paginated(server) => Page {
                items: server.content,
                page: server.number,
                size: server.size,
                total_elements: server.total_elements,
                total_pages: server.total_pages,
            },
            Self::Flat(items) => Page::synthesize(items, request),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

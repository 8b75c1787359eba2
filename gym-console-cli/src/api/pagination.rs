use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated collection
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Collection endpoints answer with either a bare array or a page envelope
#[derive(Debug)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Page(Page<T>),
}

impl<T: DeserializeOwned> ListResponse<T> {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => Ok(ListResponse::Bare(serde_json::from_value(value)?)),
            other => Ok(ListResponse::Page(serde_json::from_value(other)?)),
        }
    }
}

impl<T> ListResponse<T> {
    /// Items in server order. Only the first page is returned.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Bare(items) => items,
            ListResponse::Page(page) => {
                if page.next.is_some() {
                    tracing::debug!(
                        "Ignoring further pages ({} items total)",
                        page.count.unwrap_or_default()
                    );
                }
                page.results
            }
        }
    }
}

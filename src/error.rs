use thiserror::Error;

use crate::contact::ContactField;

/// Every failure the page can run into. None of them are fatal: callers log the
/// error and fall back to a visible default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("local storage is unavailable")]
    StorageUnavailable,
    #[error("failed to write `{key}` to local storage")]
    StorageWrite { key: String },
    #[error("media query `{0}` is unavailable")]
    MediaQueryUnavailable(&'static str),
    #[error("missing required fields: {}", field_list(.0))]
    MissingFields(Vec<ContactField>),
    #[error("a message is already being sent")]
    AlreadySending,
    #[error("image host `{0}` is not on the allow-list")]
    ImageHostNotAllowed(String),
    #[error("invalid image URL `{0}`")]
    InvalidImageUrl(String),
    #[error("element `{0}` is not mounted")]
    ElementNotMounted(&'static str),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

fn field_list(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub type PageResult<T> = Result<T, PageError>;

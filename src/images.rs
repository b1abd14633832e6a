use serde_json::json;
use url::Url;

use crate::config::{FALLBACK_IMAGE, IMAGE_HOSTS};
use crate::error::{PageError, PageResult};
use crate::logging::{log_event, LogLevel};

/// Accepts site-relative paths and http(s) URLs on an allowed host.
pub fn ensure_image_allowed(src: &str, allowed_hosts: &[&str]) -> PageResult<()> {
    let src = src.trim();
    if src.starts_with('/') && !src.starts_with("//") {
        return Ok(());
    }

    let url = Url::parse(src).map_err(|_| PageError::InvalidImageUrl(src.to_string()))?;
    if !(url.scheme() == "http" || url.scheme() == "https") {
        return Err(PageError::InvalidImageUrl(src.to_string()));
    }

    let host = url
        .host_str()
        .ok_or_else(|| PageError::InvalidImageUrl(src.to_string()))?;
    if allowed_hosts
        .iter()
        .any(|allowed| host.eq_ignore_ascii_case(allowed))
    {
        Ok(())
    } else {
        Err(PageError::ImageHostNotAllowed(host.to_string()))
    }
}

/// The source to render for `src`, or the placeholder when it is not allowed.
pub fn resolve_image(src: &str) -> String {
    match ensure_image_allowed(src, IMAGE_HOSTS) {
        Ok(()) => src.trim().to_string(),
        Err(error) => {
            log_image_fallback(src, &error.to_string());
            FALLBACK_IMAGE.to_string()
        }
    }
}

pub fn log_image_fallback(src: &str, reason: &str) {
    log_event(
        LogLevel::Warn,
        "image_fallback",
        json!({ "src": src, "reason": reason }),
    );
}

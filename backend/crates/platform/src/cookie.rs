//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` values and reading the `Cookie` header.

use axum::http::{HeaderMap, HeaderValue, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes of one named cookie
#[derive(Debug, Clone)]
pub struct CookieSpec {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl CookieSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Session cookie carrying `value`; HttpOnly, no Max-Age
    pub fn set(&self, value: &str) -> String {
        self.render(value, None)
    }

    /// Cookie that makes the browser drop the current value
    pub fn clear(&self) -> String {
        self.render("", Some(0))
    }

    /// Same as [`CookieSpec::set`], as a header value
    ///
    /// Returns `None` when `value` contains bytes not allowed in a header.
    pub fn set_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.set(value)).ok()
    }

    fn render(&self, value: &str, max_age: Option<i64>) -> String {
        let mut parts = vec![
            format!("{}={}", self.name, value),
            "HttpOnly".to_string(),
            format!("Path={}", self.path),
            format!("SameSite={}", self.same_site.as_str()),
        ];
        if self.secure {
            parts.push("Secure".to_string());
        }
        if let Some(max_age) = max_age {
            parts.push(format!("Max-Age={}", max_age));
            if max_age == 0 {
                parts.push("Expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string());
            }
        }
        parts.join("; ")
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is scanned; the first non-empty match wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_attributes() {
        let spec = CookieSpec::new("session_id").same_site(SameSite::Strict);
        let cookie = spec.set("abc123");
        assert!(cookie.starts_with("session_id=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_insecure_cookie_for_development() {
        let cookie = CookieSpec::new("session_id").secure(false).set("v");
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        let cookie = CookieSpec::new("session_id").clear();
        assert!(cookie.starts_with("session_id=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session_id=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "session_id"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_id="));
        assert_eq!(extract_cookie(&headers, "session_id"), None);
    }
}

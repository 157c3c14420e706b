// src/utils/cookie.rs

use url::form_urlencoded;

/// Name of the cookie Django-style hosts keep the anti-forgery token in.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Looks up `name` in a `Cookie` header value and percent-decodes it.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| form_urlencoded::parse(pair.as_bytes()).next())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

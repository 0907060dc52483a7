use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw `href` value against the page it was found on
///
/// # Resolution Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. A link that already carries an `http`/`https` scheme is returned
///    unchanged, provided it parses
/// 3. Anything else (relative paths, `//host/path`, `?query`, `#fragment`)
///    is resolved against `base_url`; query and fragment are preserved
/// 4. Links that fail to resolve, or resolve to a non-HTTP scheme
///    (`mailto:`, `javascript:` ...), produce `None`
///
/// # Examples
///
/// ```
/// use page_sift::url::normalize_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     normalize_link("setup", &base).as_deref(),
///     Some("https://example.com/docs/setup")
/// );
/// assert_eq!(normalize_link("http://[::1", &base), None);
/// ```
pub fn normalize_link(raw_link: &str, base_url: &Url) -> Option<String> {
    let raw_link = raw_link.trim();

    if has_http_scheme(raw_link) {
        return match Url::parse(raw_link) {
            Ok(url) if url.host_str().is_some() => Some(raw_link.to_string()),
            _ => None,
        };
    }

    let resolved = base_url.join(raw_link).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.into()),
        _ => None,
    }
}

/// Checks for an explicit `http:` or `https:` scheme, ignoring case
fn has_http_scheme(link: &str) -> bool {
    let lower = link
        .get(..6)
        .unwrap_or(link)
        .to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:")
}

/// Validates a user-supplied starting URL, defaulting the scheme to `https://`
///
/// # Examples
///
/// ```
/// use page_sift::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com").unwrap(), "https://example.com");
/// assert_eq!(ensure_scheme(" http://example.com/a ").unwrap(), "http://example.com/a");
/// assert!(ensure_scheme("ftp://example.com").is_err());
/// ```
pub fn ensure_scheme(input: &str) -> UrlResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlError::Empty);
    }

    let with_scheme = if has_leading_scheme(input) {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(with_scheme)
}

/// Returns true if `input` starts with `<scheme>://`
///
/// Only the leading component counts, so a `://` inside a path or query
/// string does not.
fn has_leading_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

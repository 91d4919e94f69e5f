use crate::UrlError;
use url::Url;

/// Parses user input into the base URL of a discovery run
///
/// A missing scheme defaults to `https://`, and the path gets a trailing
/// slash so relative references resolve beneath it.
///
/// # Examples
///
/// ```
/// use route_sounder::url::parse_base_url;
///
/// let url = parse_base_url("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
///
/// let url = parse_base_url("http://example.com/app").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/app/");
/// ```
pub fn parse_base_url(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();

    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else if input.contains("://") {
        let scheme = input.split("://").next().unwrap_or_default();
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            scheme
        )));
    } else {
        format!("https://{}", input)
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Returns true when both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}

/// Returns true for schemes the crawler can fetch
pub fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

use std::collections::BTreeSet;
use url::Url;

/// Normalizes a raw path or URL into the endpoints it implies
///
/// # Normalization Steps
///
/// 1. Resolve `raw` against `base` (absolute URLs stay as they are)
/// 2. Drop the candidate if its origin differs from the base origin
/// 3. Remove query string and fragment
/// 4. Empty path becomes /
/// 5. Emit the full path and every non-empty ancestor prefix
///
/// Routers often treat intermediate segments as navigable pages, so
/// `/a/b/c` yields `/a`, `/a/b` and `/a/b/c`.
///
/// # Arguments
///
/// * `raw` - A path, relative reference or absolute URL
/// * `base` - The base URL of the application being mapped
///
/// # Returns
///
/// The endpoints derived from `raw`; empty when it is cross-origin or
/// cannot be resolved.
///
/// # Examples
///
/// ```
/// use route_sounder::url::normalize_endpoint;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// let endpoints = normalize_endpoint("/a/b/c?x=1", &base);
/// assert_eq!(
///     endpoints.into_iter().collect::<Vec<_>>(),
///     vec!["/a", "/a/b", "/a/b/c"]
/// );
/// ```
pub fn normalize_endpoint(raw: &str, base: &Url) -> BTreeSet<String> {
    let mut endpoints = BTreeSet::new();

    let raw = raw.trim();
    if raw.is_empty() {
        return endpoints;
    }

    let mut resolved = match base.join(raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Cannot resolve {:?} against {}: {}", raw, base, e);
            return endpoints;
        }
    };

    if resolved.origin() != base.origin() {
        return endpoints;
    }

    resolved.set_query(None);
    resolved.set_fragment(None);

    let path = match resolved.path() {
        "" => "/",
        path => path,
    };

    endpoints.insert(path.to_string());

    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        endpoints.insert(current.clone());
    }

    endpoints
}

/// Normalizes every candidate and unions the results
pub fn normalize_all<'a, I>(candidates: I, base: &Url) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .flat_map(|raw| normalize_endpoint(raw, base))
        .collect()
}

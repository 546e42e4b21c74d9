//! Root-domain extraction for crawl scoping.

use url::Url;

/// Extract the root domain (subdomain + domain + suffix) of a URL.
///
/// Returns the full host portion, lowercased, with no scheme, port or
/// path. Scheme-less inputs like `localhost:8080` are retried with an
/// `https://` prefix so bare hosts still resolve.
pub fn root_domain(webpage_url: &str) -> Option<String> {
    let parsed = Url::parse(webpage_url)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("https://{webpage_url}")).ok())?;

    parsed.host_str().map(|host| host.to_ascii_lowercase())
}

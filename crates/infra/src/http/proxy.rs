//! Proxy translation

use ats2_domain::{Ats2Error, ProxyHttp, Result};

/// Translate proxy settings into a reqwest proxy for every scheme.
///
/// Basic auth is attached only when both user and password are non-empty.
pub fn to_reqwest_proxy(proxy: &ProxyHttp) -> Result<reqwest::Proxy> {
    let translated = reqwest::Proxy::all(proxy.url())
        .map_err(|err| Ats2Error::Proxy(format!("Invalid proxy {proxy:?}: {err}")))?;

    Ok(match proxy.credentials() {
        Some((user, pass)) => translated.basic_auth(user, pass),
        None => translated,
    })
}

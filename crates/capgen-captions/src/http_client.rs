use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Shared HTTP client for upstream model calls
///
/// One pool across providers; the timeout bounds every external call
/// so a stuck upstream cannot pin a request forever.
pub(crate) fn http_client() -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            Client::builder()
                .timeout(Duration::from_secs(90))
                .connect_timeout(Duration::from_secs(10))
                .tcp_keepalive(Some(Duration::from_secs(60)))
                .build()
                .expect("default HTTP client must build")
        })
        .clone()
}

use crate::config::Config;
use awc::error::SendRequestError;
use awc::Client;
use log::debug;

/// Succeeds as soon as the server answers `GET /`, whatever the status.
pub async fn check_liveness(client: &Client, config: &Config) -> Result<(), SendRequestError> {
    let url = format!("{}/", config.base_url);

    let res = client
        .get(url.as_str())
        .force_close()
        .timeout(config.probe_timeout)
        .send()
        .await?;

    debug!("liveness probe on {} answered {}", url, res.status());

    Ok(())
}

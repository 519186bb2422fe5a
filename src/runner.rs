use crate::case::TestCase;
use crate::config::Config;
use crate::outcome::{CaseResult, Outcome, Summary};
use awc::Client;
use log::{debug, warn};

pub struct Run {
    pub results: Vec<CaseResult>,
    pub summary: Summary,
}

pub fn build_client(config: &Config) -> Client {
    Client::builder()
        .connector(
            awc::Connector::new().timeout(config.request_timeout), // max time to connect including dns name resolution
        )
        .timeout(config.request_timeout) // the total time before a response must be received
        .finish()
}

/// Sends one case. The url is handed to the client untouched so encoded
/// and dot segments reach the server as written.
pub async fn execute(client: &Client, config: &Config, case: &TestCase) -> CaseResult {
    let url = config.url_for(case);

    debug!("GET {}", url);

    let outcome = match client
        .get(url.as_str())
        .force_close()
        .timeout(config.request_timeout)
        .send()
        .await
    {
        Ok(res) => Outcome::from_status(case.expected_status, res.status().as_u16()),
        Err(e) => {
            warn!("request to {} failed: {:?}", url, e);
            Outcome::transport_error(&e.to_string())
        }
    };

    CaseResult {
        description: case.description.clone(),
        url,
        expected_status: case.expected_status,
        outcome,
    }
}

/// Runs the cases one after the other and prints each result as it lands.
pub async fn run_cases(client: &Client, config: &Config) -> Run {
    let mut summary = Summary::default();
    let mut results = Vec::with_capacity(config.cases.len());

    for case in &config.cases {
        let result = execute(client, config, case).await;

        println!("{}", result);
        summary.record(&result.outcome);
        results.push(result);
    }

    Run { results, summary }
}

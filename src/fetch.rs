extern crate anyhow;
extern crate reqwest;

use anyhow::Context;
use crate::result;

/// A GET against one of the upstream APIs.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub query: Vec<(&'static str, String)>,
    pub bearer_token: Option<&'a str>,
}

/// Injectable fetcher so the pipelines can be fed canned responses.
pub type FetchFn<'f> = &'f dyn Fn(&FetchRequest) -> result::BoardResult<String>;

pub fn real_fetch(request: &FetchRequest, timeout: std::time::Duration) -> result::BoardResult<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;

    let mut builder = client.get(request.url)
        .header(reqwest::header::USER_AGENT, "infoboard")
        .query(&request.query);
    if let Some(token) = request.bearer_token {
        builder = builder.bearer_auth(token);
    }

    debug!("Fetching {}", request.url);
    let response = builder.send()
        .with_context(|| format!("while fetching url: {}", request.url))?;

    let status = response.status();
    if !status.is_success() {
        return Err(result::BoardError::FetchError(
            format!("{} returned {}", request.url, status)));
    }

    return Ok(response.text()?);
}

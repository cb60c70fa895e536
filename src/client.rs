//! Blocking status/timeline client built on the signing core.
//!
//! One HTTP round trip per call, no retries. Authentication failures
//! come back as [`Error::RemoteRejection`] with the response body
//! preserved; the signer itself never learns about them.

use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::Error;
use crate::signer::{Credentials, RequestBuilder, SignedRequest};
use crate::timeline::{decode_timeline, decode_tweet, Tweet};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Optional range and size controls shared by the timeline endpoints.
#[derive(Clone, Debug, Default)]
pub struct TimelineQuery {
    count: Option<u32>,
    since_id: Option<u64>,
    max_id: Option<u64>,
}

impl TimelineQuery {
    pub fn new() -> Self {
        TimelineQuery::default()
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn since_id(mut self, id: u64) -> Self {
        self.since_id = Some(id);
        self
    }

    pub fn max_id(mut self, id: u64) -> Self {
        self.max_id = Some(id);
        self
    }

    fn apply(&self, builder: &mut RequestBuilder<'_>) -> Result<(), Error> {
        if let Some(count) = self.count {
            builder.param("count", &count.to_string())?;
        }
        if let Some(since_id) = self.since_id {
            builder.param("since_id", &since_id.to_string())?;
        }
        if let Some(max_id) = self.max_id {
            builder.param("max_id", &max_id.to_string())?;
        }
        Ok(())
    }
}

/// Posts status updates and fetches timelines, signing every request.
pub struct Client {
    credentials: Credentials,
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Client {
    pub fn new(credentials: Credentials) -> Self {
        Client::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Points the client at a different host, e.g. a local test
    /// server.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Client {
            credentials,
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST `statuses/update.json` with the given status text.
    pub fn update_status(&self, status: &str) -> Result<Tweet, Error> {
        let mut builder = RequestBuilder::new(
            &self.credentials,
            "POST",
            format!("{}/statuses/update.json", self.base_url),
        );
        builder.param("status", status)?;
        let body = self.execute(builder.build()?)?;
        decode_tweet(&body)
    }

    pub fn home_timeline(&self, query: &TimelineQuery) -> Result<Vec<Tweet>, Error> {
        self.timeline("statuses/home_timeline.json", query, None)
    }

    pub fn mentions_timeline(&self, query: &TimelineQuery) -> Result<Vec<Tweet>, Error> {
        self.timeline("statuses/mentions_timeline.json", query, None)
    }

    pub fn user_timeline(
        &self,
        screen_name: &str,
        query: &TimelineQuery,
    ) -> Result<Vec<Tweet>, Error> {
        self.timeline("statuses/user_timeline.json", query, Some(screen_name))
    }

    fn timeline(
        &self,
        path: &str,
        query: &TimelineQuery,
        screen_name: Option<&str>,
    ) -> Result<Vec<Tweet>, Error> {
        let mut builder = RequestBuilder::new(
            &self.credentials,
            "GET",
            format!("{}/{}", self.base_url, path),
        );
        if let Some(screen_name) = screen_name {
            builder.param("screen_name", screen_name)?;
        }
        query.apply(&mut builder)?;
        let body = self.execute(builder.build()?)?;
        decode_timeline(&body)
    }

    // One blocking round trip. The body is read in full before any
    // decoding so the connection is released promptly on every path.
    fn execute(&self, request: SignedRequest) -> Result<String, Error> {
        let SignedRequest {
            method,
            url,
            authorization,
            body,
        } = request;
        debug!("{} {}", method, url);

        let prepared = match method.as_str() {
            "GET" => self.http.get(&url),
            _ => self
                .http
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.unwrap_or_default()),
        };
        let response = prepared.header(AUTHORIZATION, authorization).send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("{} responded {} ({} bytes)", url, status, body.len());

        if !status.is_success() {
            return Err(Error::RemoteRejection {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("ck", "cs", "at", "as")
    }

    #[test]
    fn timeline_query_parameters_land_in_the_url() {
        let credentials = credentials();
        let mut builder = RequestBuilder::new(
            &credentials,
            "GET",
            "https://api.twitter.com/1.1/statuses/home_timeline.json",
        );
        TimelineQuery::new()
            .count(20)
            .since_id(5)
            .apply(&mut builder)
            .unwrap();
        let request = builder.build().unwrap();
        assert_eq!(
            request.url,
            "https://api.twitter.com/1.1/statuses/home_timeline.json?count=20&since_id=5"
        );
    }

    #[test]
    fn empty_timeline_query_adds_nothing() {
        let credentials = credentials();
        let mut builder = RequestBuilder::new(
            &credentials,
            "GET",
            "https://api.twitter.com/1.1/statuses/home_timeline.json",
        );
        TimelineQuery::new().apply(&mut builder).unwrap();
        let request = builder.build().unwrap();
        assert_eq!(
            request.url,
            "https://api.twitter.com/1.1/statuses/home_timeline.json"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = Client::with_base_url(credentials(), "http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}

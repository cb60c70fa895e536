//! The request signing core: canonical parameter set, signature base
//! string, HMAC-SHA1 signature and Authorization header assembly.

use std::collections::HashMap;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use uuid::Uuid;

use crate::encode::percent_encode;
use crate::error::Error;
use crate::util;

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

const OAUTH_PREFIX: &str = "oauth_";
const PARAM_CONSUMER_KEY: &str = "oauth_consumer_key";
const PARAM_NONCE: &str = "oauth_nonce";
const PARAM_SIGNATURE: &str = "oauth_signature";
const PARAM_SIGNATURE_METHOD: &str = "oauth_signature_method";
const PARAM_TIMESTAMP: &str = "oauth_timestamp";
const PARAM_TOKEN: &str = "oauth_token";
const PARAM_VERSION: &str = "oauth_version";

/// Consumer and access key material, supplied once and held for the
/// lifetime of the client. Never validated locally; bad credentials
/// simply produce requests the remote service rejects.
#[derive(Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    access_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_secret: access_secret.into(),
        }
    }
}

/// A fully signed, ready-to-send request. Produced once by
/// [`RequestBuilder::build`], consumed once, then discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedRequest {
    pub method: String,
    pub url: String,
    pub authorization: String,
    pub body: Option<String>,
}

/// Accumulates caller parameters for one request and signs them.
///
/// Parameter values are percent-encoded at insertion time. `build`
/// consumes the builder: every signed request carries its own nonce
/// and timestamp, so there is no such thing as re-signing.
pub struct RequestBuilder<'a> {
    credentials: &'a Credentials,
    http_method: String,
    endpoint: String,
    encoded_params: HashMap<String, String>,
    nonce: Option<String>,
    timestamp: Option<i64>,
}

impl<'a> RequestBuilder<'a> {
    /// `endpoint` must be free of a query string; use [`from_url`]
    /// when the target URL may carry one.
    ///
    /// [`from_url`]: RequestBuilder::from_url
    pub fn new(
        credentials: &'a Credentials,
        http_method: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        RequestBuilder {
            credentials,
            http_method: http_method.into().to_ascii_uppercase(),
            endpoint: endpoint.into(),
            encoded_params: HashMap::new(),
            nonce: None,
            timestamp: None,
        }
    }

    /// Splits `url` into its query-free endpoint and folds any query
    /// pairs (already encoded on the wire) into the parameter set.
    pub fn from_url(
        credentials: &'a Credentials,
        http_method: impl Into<String>,
        url: &url::Url,
    ) -> Result<Self, Error> {
        let (endpoint, query) = util::split_query(url);
        let mut builder = RequestBuilder::new(credentials, http_method, endpoint);
        for (key, value) in query {
            builder.param_encoded(key, value)?;
        }
        Ok(builder)
    }

    /// Overrides the generated nonce. Intended for tests that need a
    /// reproducible signature.
    pub fn oauth_nonce(&mut self, nonce: impl Into<String>) -> &mut Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Overrides the generated timestamp. Intended for tests.
    pub fn oauth_timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Adds a caller parameter, percent-encoding the value.
    ///
    /// Names must not repeat and must not use the reserved `oauth_`
    /// prefix; either collision leaves the set untouched and returns
    /// [`Error::DuplicateParameter`].
    pub fn param(&mut self, name: &str, value: &str) -> Result<&mut Self, Error> {
        self.insert(percent_encode(name), percent_encode(value))
    }

    /// Adds a caller parameter whose name and value are already
    /// percent-encoded.
    pub fn param_encoded(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        self.insert(name.into(), value.into())
    }

    fn insert(&mut self, name: String, value: String) -> Result<&mut Self, Error> {
        if name.starts_with(OAUTH_PREFIX) || self.encoded_params.contains_key(&name) {
            return Err(Error::DuplicateParameter(name));
        }
        self.encoded_params.insert(name, value);
        Ok(self)
    }

    /// Signs the accumulated parameter set and assembles the final
    /// request descriptor.
    ///
    /// The signature covers the caller parameters plus the six
    /// protocol parameters, sorted by key; the Authorization header
    /// carries only the `oauth_`-prefixed subset plus the signature.
    /// For GET the caller parameters become the query string; for any
    /// other method they become the form-encoded body.
    pub fn build(self) -> Result<SignedRequest, Error> {
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp())
            .to_string();
        let nonce = self
            .nonce
            .unwrap_or_else(|| Uuid::new_v4().to_simple().to_string());

        let mut params: Vec<(String, String)> = vec![
            (
                PARAM_CONSUMER_KEY.into(),
                percent_encode(&self.credentials.consumer_key),
            ),
            (PARAM_NONCE.into(), percent_encode(&nonce)),
            (PARAM_SIGNATURE_METHOD.into(), SIGNATURE_METHOD.into()),
            (PARAM_TIMESTAMP.into(), timestamp),
            (
                PARAM_TOKEN.into(),
                percent_encode(&self.credentials.access_token),
            ),
            (PARAM_VERSION.into(), OAUTH_VERSION.into()),
        ];
        params.extend(
            self.encoded_params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        params.sort();

        let base = base_string(&self.http_method, &self.endpoint, &params);
        let key = signing_key(self.credentials);
        let signature = hmac_sha1(&key, &base)?;

        // The signature joins the set before the header is filtered
        // down to the protocol subset.
        params.push((PARAM_SIGNATURE.into(), percent_encode(&signature)));
        params.sort();
        let authorization = format!(
            "OAuth {}",
            params
                .iter()
                .filter(|(k, _)| k.starts_with(OAUTH_PREFIX))
                .map(|(k, v)| format!("{}=\"{}\"", k, v))
                .collect::<Vec<String>>()
                .join(",")
        );

        // Caller query string, sorted by key so repeated builds of
        // the same request target the same URL.
        let mut query: Vec<(String, String)> = self.encoded_params.into_iter().collect();
        query.sort();
        let query_string = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<String>>()
            .join("&");

        let (url, body) = if query_string.is_empty() {
            (self.endpoint, None)
        } else if self.http_method == "GET" {
            (format!("{}?{}", self.endpoint, query_string), None)
        } else {
            (self.endpoint, Some(query_string))
        };

        Ok(SignedRequest {
            method: self.http_method,
            url,
            authorization,
            body,
        })
    }
}

fn base_string(http_method: &str, endpoint: &str, params: &[(String, String)]) -> String {
    let param_str = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<String>>()
        .join("&");
    format!(
        "{}&{}&{}",
        percent_encode(http_method),
        percent_encode(endpoint),
        percent_encode(&param_str)
    )
}

fn signing_key(credentials: &Credentials) -> String {
    format!(
        "{}&{}",
        percent_encode(&credentials.consumer_secret),
        percent_encode(&credentials.access_secret)
    )
}

fn hmac_sha1(key: &str, message: &str) -> Result<String, Error> {
    // SHA-1 accepts keys of any length, so the error arm is dead in
    // practice.
    let mut mac = HmacSha1::new_varkey(key.as_bytes())
        .map_err(|_| Error::Signing("invalid HMAC key length".into()))?;
    mac.input(message.as_bytes());
    Ok(base64::encode(&mac.result().code()))
}

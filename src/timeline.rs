//! Typed records for status and timeline responses.

use serde::Deserialize;

use crate::error::Error;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TwitterUser {
    pub id: u64,
    pub name: String,
    pub screen_name: String,
}

/// One status in a timeline. Unknown response fields are ignored;
/// missing required fields fail the decode.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Tweet {
    pub id: u64,
    pub created_at: String,
    pub text: String,
    pub user: TwitterUser,
}

pub fn decode_tweet(body: &str) -> Result<Tweet, Error> {
    Ok(serde_json::from_str(body)?)
}

pub fn decode_timeline(body: &str) -> Result<Vec<Tweet>, Error> {
    Ok(serde_json::from_str(body)?)
}

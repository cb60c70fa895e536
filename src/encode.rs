//! Percent-encoding exactly as the signing protocol expects it.

use percent_encoding::{utf8_percent_encode, AsciiSet};

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
//
// Note this is stricter than form-urlencoding: '(', ')', '$', '!',
// '*' and '\'' are all encoded here.
pub(crate) const SIGNING_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` for use in parameters, base strings and the
/// Authorization header. Total over all inputs; the empty string maps
/// to the empty string.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, SIGNING_SET).to_string()
}

//! Percent-encoding for the parts of connection URLs built from credentials.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::service::ServiceInfoError;

/// WHATWG userinfo set, plus `%` so literal percent signs survive a round trip.
const USERINFO: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A single path segment: `/` is data, not a separator.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub(crate) fn userinfo(raw: &str) -> String {
    utf8_percent_encode(raw, USERINFO).to_string()
}

pub(crate) fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Decode a percent-encoded URL component read from `key`.
pub(crate) fn decode<'a>(
    key: &'static str,
    raw: &'a str,
) -> Result<Cow<'a, str>, ServiceInfoError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| ServiceInfoError::InvalidAttribute {
            key,
            reason: format!("percent-decoded text is not utf-8: {e}"),
        })
}

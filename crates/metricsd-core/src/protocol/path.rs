//! URL path splitting and segment escaping shared by every handler.
//!
//! Segments travel percent-encoded; names are stored and looked up decoded.

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{MetricsError, Result};

/// Bytes escaped inside one path segment (path-segment set plus `%`).
const SEGMENT: &AsciiSet = &CONTROLS
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

/// Split a URL path into segments.
///
/// A single trailing `/` is stripped (unless the path is just `/`), then the
/// path is split on `/`. Empty segments are kept, so the leading slash yields
/// a leading `""`: `"/update/counter/foo/10"` becomes
/// `["", "update", "counter", "foo", "10"]`.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if path.len() > 1 => rest,
        _ => path,
    };
    trimmed.split('/').collect()
}

/// [`split_path`] followed by percent-decoding of every segment. `%2F`
/// decodes to a `/` inside its segment and never splits it.
pub fn decode_path(path: &str) -> Result<Vec<String>> {
    split_path(path)
        .into_iter()
        .map(|raw| decode_segment(raw).map(Cow::into_owned))
        .collect()
}

pub fn decode_segment(raw: &str) -> Result<Cow<'_, str>> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| MetricsError::MalformedPath(format!("segment {raw:?} is not utf-8: {e}")))
}

pub fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

pub(crate) fn segment<S: AsRef<str>>(segments: &[S], idx: usize) -> Result<&str> {
    segments
        .get(idx)
        .map(AsRef::as_ref)
        .ok_or_else(|| MetricsError::MalformedPath(format!("missing segment {idx}")))
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MetricsError::MalformedPath("metric name must not be empty".into()));
    }
    if name.contains('/') {
        return Err(MetricsError::MalformedPath(format!(
            "metric name must not contain '/': {name}"
        )));
    }
    Ok(())
}

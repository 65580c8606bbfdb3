//! Form body decoding
//!
//! Pulls one field out of a POST body, keeping its bytes exactly as sent.
//! Only `application/x-www-form-urlencoded` and `multipart/form-data` carry
//! form data; any other body is rejected rather than read as an empty form.

use std::convert::Infallible;

use hyper::body::Bytes;
use percent_encoding::percent_decode;
use thiserror::Error;

/// Form field holding the page text
pub const BODY_FIELD: &str = "body";

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("unsupported form content type: {0}")]
    UnsupportedContentType(String),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),
}

/// Value of `name` in a form body, decoded according to its `Content-Type`.
///
/// A form without the field yields `Ok(None)`.
pub async fn form_field(
    content_type: Option<&str>,
    form: Bytes,
    name: &str,
) -> Result<Option<Vec<u8>>, FormError> {
    let content_type = content_type.unwrap_or_default();
    match media_type(content_type).as_str() {
        URLENCODED => Ok(urlencoded_value(&form, name)),
        MULTIPART => multipart_value(content_type, form, name).await,
        _ => Err(FormError::UnsupportedContentType(content_type.to_string())),
    }
}

/// Lowercased `type/subtype` without parameters
fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// First value of `name` in an urlencoded body
pub fn urlencoded_value(form: &[u8], name: &str) -> Option<Vec<u8>> {
    form.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_component(key) == name.as_bytes()).then(|| decode_component(value))
        })
}

/// `+` is a space, then `%XX` escapes become raw bytes
fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

async fn multipart_value(
    content_type: &str,
    form: Bytes,
    name: &str,
) -> Result<Option<Vec<u8>>, FormError> {
    let boundary = multer::parse_boundary(content_type)?;
    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(form) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name) {
            return Ok(Some(field.bytes().await?.to_vec()));
        }
    }
    Ok(None)
}

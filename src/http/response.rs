//! Response shaping for the cached document.
//!
//! # Responsibilities
//! - Decide whether the client gets a gzip body
//! - Compress the document (fresh on every request)
//! - Attach the CORS header when enabled

use std::io::{self, Write};

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Response, StatusCode},
};
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression};

use crate::config::ResponseOptions;
use crate::observability::metrics;

/// True when `Accept-Encoding` is exactly `gzip`.
///
/// Lists such as `gzip, deflate` do not qualify; clients that want the
/// compressed document ask for it explicitly.
pub fn accepts_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "gzip")
}

/// Gzip `data` at the default level.
pub fn gzip(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Build the 200 response for `body` according to `options`.
pub fn document_response(
    body: Bytes,
    request_headers: &HeaderMap,
    options: ResponseOptions,
) -> Response<Body> {
    let mut builder = Response::builder().status(StatusCode::OK);

    if options.cors {
        builder = builder.header(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
    }

    let body = if options.compression && accepts_gzip(request_headers) {
        match gzip(&body) {
            Ok(compressed) => {
                builder =
                    builder.header(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
                metrics::record_request("gzip");
                Body::from(compressed)
            }
            Err(e) => {
                tracing::error!(error = %e, "Gzip encoding failed, sending raw document");
                metrics::record_request("identity");
                Body::from(body)
            }
        }
    } else {
        metrics::record_request("identity");
        Body::from(body)
    };

    builder.body(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build response");
        Response::new(Body::empty())
    })
}

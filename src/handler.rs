use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Request, Response, StatusCode};

pub const BODY: &[u8] = b"Simple Node.js app";
pub const CONTENT_TYPE: &str = "text/plain";

/// Answers every request with the same plaintext response.
///
/// The request is never inspected, so it is generic over the body type and
/// the body is never polled.
pub async fn handle<B>(_req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(response())
}

fn response() -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from_static(BODY)));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, header::HeaderValue::from_static(CONTENT_TYPE));
    response
}

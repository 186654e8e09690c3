//! Browser transport
//!
//! Performs an `ApiRequest` with `fetch` (through gloo). Only meaningful on
//! wasm32; natively the crate is exercised without ever sending.

use super::request::{ApiRequest, Method};
use super::response::ApiResponse;
use super::ApiError;
use gloo::net::http::Request;

/// Send a request and collect status and body. Non-2xx is not an error here;
/// only transport failures are.
pub async fn send(request: &ApiRequest) -> Result<ApiResponse, ApiError> {
    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Delete => Request::delete(&request.url),
    };

    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let response = match &request.body {
        Some(body) => builder.body(body.clone()).map_err(network)?.send().await,
        None => builder.send().await,
    }
    .map_err(network)?;

    let status = response.status();
    let body = response.text().await.map_err(network)?;

    log::debug!("{:?} {} -> {}", request.method, request.url, status);
    Ok(ApiResponse { status, body })
}

fn network(e: gloo::net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

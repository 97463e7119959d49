//! Demo worker routes.
//!
//! Registered in this order, so earlier entries win:
//! 1. `GET .*/bar`            → plain text
//! 2. `GET .*/foo`            → `{"some":"json"}`
//! 3. `POST .*/foo.*`         → `{"some":"json"}`
//! 4. `GET /demos/router/buzz` → pass-through to the upstream origin
//! 5. any method on `/`       → greeting echoing the method

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use crate::http::{response, Passthrough};
use crate::routing::{BoxError, Router, RouterError};

pub const BUZZ_PATH: &str = "/demos/router/buzz";

/// Build the demo route table.
pub fn demo_router(upstream: Passthrough) -> Result<Router, RouterError> {
    let mut router = Router::new();
    router
        .get(".*/bar", bar)?
        .get(".*/foo", some_json)?
        .post(".*/foo.*", some_json)?
        .get(BUZZ_PATH, upstream)?
        .all("/", greet)?;
    Ok(router)
}

async fn bar(_req: Request<Body>) -> Result<Response, BoxError> {
    Ok(response::text("responding for /bar"))
}

async fn some_json(_req: Request<Body>) -> Result<Response, BoxError> {
    Ok(response::json(&serde_json::json!({ "some": "json" })))
}

async fn greet(req: Request<Body>) -> Result<Response, BoxError> {
    Ok(response::text(format!(
        "Hello worker!! Request method was: {}",
        req.method()
    )))
}

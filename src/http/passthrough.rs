//! Pass-through handler forwarding requests to an upstream origin.

use std::str::FromStr;

use axum::body::Body;
use axum::http::uri::{Authority, InvalidUri, PathAndQuery, Scheme};
use axum::http::{header, Request, Uri, Version};
use axum::response::Response;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::routing::{BoxError, Handler, HandlerFuture};

/// Forwards the request to `origin` and returns the upstream response.
///
/// Upstream failures are returned to the caller as errors; no fallback
/// response is synthesized here.
#[derive(Clone)]
pub struct Passthrough {
    client: Client<HttpConnector, Body>,
    origin: Authority,
}

impl Passthrough {
    pub fn new(origin: &str) -> Result<Self, InvalidUri> {
        let origin = Authority::from_str(origin)?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, origin })
    }

    fn upstream_uri(&self, uri: &Uri) -> Result<Uri, BoxError> {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(Scheme::HTTP);
        parts.authority = Some(self.origin.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Ok(Uri::from_parts(parts)?)
    }
}

impl Handler for Passthrough {
    fn call(&self, req: Request<Body>) -> HandlerFuture {
        let client = self.client.clone();
        let upstream = self.upstream_uri(req.uri());

        Box::pin(async move {
            let (mut parts, body) = req.into_parts();
            parts.uri = upstream?;
            parts.version = Version::HTTP_11;
            parts.headers.remove(header::HOST);

            tracing::debug!(uri = %parts.uri, method = %parts.method, "Forwarding request");

            let response = client.request(Request::from_parts(parts, body)).await?;
            let (parts, body) = response.into_parts();
            Ok(Response::from_parts(parts, Body::new(body)))
        })
    }
}

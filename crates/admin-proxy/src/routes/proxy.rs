use axum::{
    body::{Body, Bytes},
    extract::State,
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use http::{header, HeaderMap, HeaderName, Method, StatusCode, Uri};
use reqwest::Url;
use serde_json::json;
use tracing::{debug, warn};

const API_PREFIX: &str = "/api/";

const FORWARDED_HEADERS: [HeaderName; 3] =
    [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    upstream: Url,
}

impl ProxyState {
    /// `upstream` is the backend's API root, e.g. `http://127.0.0.1:8080/api/`.
    pub fn new(upstream: &str) -> Result<Self, String> {
        let mut upstreamUrl =
            Url::parse(upstream).map_err(|e| format!("invalid upstream {upstream}: {e}"))?;
        if !upstreamUrl.path().ends_with('/') {
            let path = format!("{}/", upstreamUrl.path());
            upstreamUrl.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("failed to build http client: {e}"))?;
        Ok(Self {
            client,
            upstream: upstreamUrl,
        })
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    /// Maps an incoming `/api/...` URI onto the upstream, keeping the
    /// original percent-encoding. Paths that climb out of the API root are
    /// rejected, including dot segments spelled `%2e`.
    fn target(&self, uri: &Uri) -> Option<Url> {
        let rest = uri.path().strip_prefix(API_PREFIX)?;
        if rest.split('/').any(|segment| segment == ".." || segment == ".") {
            return None;
        }
        let mut url = self.upstream.join(rest).ok()?;
        if url.origin() != self.upstream.origin() || !url.path().starts_with(self.upstream.path())
        {
            return None;
        }
        url.set_query(uri.query());
        Some(url)
    }
}

pub fn routes() -> Router<ProxyState> {
    Router::new().route("/api/*path", any(forward))
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(target) = state.target(&uri) else {
        return error(StatusCode::BAD_REQUEST, "invalid path");
    };
    debug!("proxy {method} {} -> {target}", uri.path());

    let mut request = state.client.request(method, target);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let upstreamResponse = match request.body(body).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("upstream request failed: {e}");
            return error(StatusCode::BAD_GATEWAY, "upstream unavailable");
        }
    };

    let status = upstreamResponse.status();
    let contentType = upstreamResponse.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = match upstreamResponse.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read upstream response: {e}");
            return error(StatusCode::BAD_GATEWAY, "upstream unavailable");
        }
    };

    let mut response = Response::builder().status(status);
    if let Some(contentType) = contentType {
        response = response.header(header::CONTENT_TYPE, contentType);
    }
    response
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

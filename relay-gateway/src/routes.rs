//! Axum route handlers for the relay gateway.

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, Path, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, on, MethodFilter},
    Json, Router,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use relay_core::{catalogue, translate, ForwardRequest, Inbound, Method, RouteSpec, Translation};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use url::form_urlencoded;
use uuid::Uuid;

use crate::{auth::authenticate, error::GatewayError, state::AppState};

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router: `/healthcheck` plus every catalogue route.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new().route("/healthcheck", get(healthcheck));

    for route in catalogue::ROUTES {
        let filter = match route.method {
            Method::Get => MethodFilter::GET,
            Method::Post => MethodFilter::POST,
        };
        let handler = move |State(state): State<AppState>,
                            Path(params): Path<Vec<(String, String)>>,
                            RawQuery(query): RawQuery,
                            headers: HeaderMap,
                            body: Body| async move {
            authenticated_forward(&state, route, &headers, &params, query.as_deref(), body).await
        };
        router = router.route(route.path, on(filter, handler));
    }

    // Bodies are read by `authenticated_forward` after the caller is known,
    // bounded by `AppState::max_body_bytes` instead of axum's default cap.
    router
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /healthcheck` — liveness probe. No authentication, no upstream.
pub async fn healthcheck() -> &'static str {
    "OK"
}

/// Authenticate the caller, forward to the route's upstream and translate
/// the reply.
///
/// Nothing leaves the gateway until the caller's identity is resolved, and
/// no upstream call is made when the inbound body or query is invalid.
///
/// # Errors
/// - [`GatewayError::UnrecognizedUser`] when the session token is missing or
///   rejected.
/// - [`GatewayError::InvalidRequest`] / [`GatewayError::Core`] when the
///   inbound request does not satisfy the route.
/// - [`GatewayError::PayloadTooLarge`] when the body exceeds the configured cap.
/// - [`GatewayError::Client`] when an outbound call fails below HTTP.
pub async fn authenticated_forward(
    state: &AppState,
    route: &RouteSpec,
    headers: &HeaderMap,
    path_params: &[(String, String)],
    raw_query: Option<&str>,
    body: Body,
) -> Result<Response, GatewayError> {
    let user = authenticate(state.resolver.as_ref(), headers).await?;

    let inbound_body = if route.has_body() {
        let bytes = read_body(body, state.max_body_bytes).await?;
        let value = serde_json::from_slice::<Value>(&bytes)
            .map_err(|e| GatewayError::InvalidRequest(format!("malformed JSON body: {e}")))?;
        Some(value)
    } else {
        None
    };

    let query: Vec<(String, String)> = raw_query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let path_refs: Vec<(&str, &str)> = path_params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let query_refs: Vec<(&str, &str)> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    let request = ForwardRequest::build(
        route,
        &user,
        Inbound { path_params: &path_refs, query: &query_refs, body: inbound_body.as_ref() },
    )
    .inspect_err(|e| tracing::warn!(route = route.name, error = %e, "rejecting malformed request"))?;

    let reply = state.upstream.forward(request).await.inspect_err(|e| {
        tracing::warn!(route = route.name, error = %e, "upstream call failed");
    })?;
    let upstream_status = reply.status;
    let translation = translate(reply);

    tracing::info!(
        route = route.name,
        user_id = %user,
        upstream_status,
        status = translation.status(),
        "request forwarded"
    );

    Ok(render(translation))
}

/// Buffer the inbound body, refusing it once it grows past `limit`.
async fn read_body(body: Body, limit: Option<usize>) -> Result<Bytes, GatewayError> {
    let collected = match limit {
        None => body
            .collect()
            .await
            .map_err(|e| GatewayError::InvalidRequest(format!("unreadable body: {e}")))?,
        Some(limit) => Limited::new(body, limit).collect().await.map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                GatewayError::PayloadTooLarge { limit }
            } else {
                GatewayError::InvalidRequest(format!("unreadable body: {e}"))
            }
        })?,
    };
    Ok(collected.to_bytes())
}

/// Turn a [`Translation`] into the caller-facing response.
fn render(translation: Translation) -> Response {
    match translation {
        Translation::Relay { status, content_type, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = content_type
                .and_then(|ct| HeaderValue::from_str(&ct).ok())
                .unwrap_or_else(|| HeaderValue::from_static("application/json"));
            let mut resp = (status, body).into_response();
            resp.headers_mut().insert(header::CONTENT_TYPE, content_type);
            resp
        }
        Translation::Error(code) => {
            let status = StatusCode::from_u16(code.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(code.body())).into_response()
        }
    }
}

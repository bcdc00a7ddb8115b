//! Construction of the outbound request from a route and an inbound call.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::id::UserId;
use crate::route::{IdentityPlacement, Method, QueryKind, RouteSpec, UpstreamTarget};

/// Name of the injected identity field, in both query and body form.
pub const USER_ID_FIELD: &str = "user_id";

/// A fully-resolved call to an upstream service.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ForwardRequest {
    pub target: UpstreamTarget,
    pub method: Method,
    /// Unencoded path segments below the upstream base URI.
    pub path_segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// The parts of an inbound request a route may draw from.
#[derive(Debug, Default, Clone, Copy)]
pub struct Inbound<'a> {
    pub path_params: &'a [(&'a str, &'a str)],
    pub query: &'a [(&'a str, &'a str)],
    pub body: Option<&'a Value>,
}

impl ForwardRequest {
    /// Builds the forwarded request for `route` on behalf of `user`.
    ///
    /// # Errors
    /// - [`CoreError::MissingPathParam`] if the upstream template names an
    ///   unknown parameter.
    /// - [`CoreError::InvalidQuery`] if an optional query parameter fails its
    ///   kind check.
    /// - [`CoreError::BodyNotObject`] / [`CoreError::MissingField`] for POST
    ///   routes whose inbound body does not carry the required fields.
    pub fn build(route: &RouteSpec, user: &UserId, inbound: Inbound<'_>) -> Result<Self, CoreError> {
        let path_segments = route.upstream_segments(inbound.path_params)?;

        let mut query = Vec::new();
        if route.identity == IdentityPlacement::Query {
            query.push((USER_ID_FIELD.to_owned(), user.as_str().to_owned()));
        }
        for param in route.optional_query {
            let Some((_, value)) = inbound.query.iter().find(|(k, _)| *k == param.name) else {
                continue;
            };
            if param.kind == QueryKind::Integer {
                value.parse::<i64>().map_err(|e| CoreError::InvalidQuery {
                    name: param.name,
                    reason: e.to_string(),
                })?;
            }
            query.push((param.name.to_owned(), (*value).to_owned()));
        }

        let body = if route.has_body() {
            Some(Value::Object(forward_body(route, user, inbound.body)?))
        } else {
            None
        };

        Ok(Self {
            target: route.target,
            method: route.method,
            path_segments,
            query,
            body,
        })
    }
}

/// Copies the route's declared fields out of `inbound` and injects the user id.
///
/// Undeclared inbound fields are dropped, so a caller-supplied `user_id` never
/// reaches the upstream.
///
/// # Errors
/// Returns [`CoreError::BodyNotObject`] when `inbound` is missing or not an
/// object, and [`CoreError::MissingField`] for the first absent required field.
pub fn forward_body(
    route: &RouteSpec,
    user: &UserId,
    inbound: Option<&Value>,
) -> Result<Map<String, Value>, CoreError> {
    let source = inbound.and_then(Value::as_object).ok_or(CoreError::BodyNotObject)?;

    let mut out = Map::new();
    if route.identity == IdentityPlacement::Body {
        out.insert(USER_ID_FIELD.to_owned(), Value::String(user.as_str().to_owned()));
    }
    for &field in route.required_fields {
        let value = source.get(field).ok_or(CoreError::MissingField { field })?;
        out.insert(field.to_owned(), value.clone());
    }
    for &field in route.optional_fields {
        out.insert(field.to_owned(), source.get(field).cloned().unwrap_or(Value::Null));
    }
    Ok(out)
}

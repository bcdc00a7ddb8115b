//! Static description of one gateway route and how it maps onto an upstream.

use serde::Serialize;

use crate::error::CoreError;

/// Which upstream service a route forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UpstreamTarget {
    /// The project service (`GATEWAY` base URI).
    Project,
    /// The config service (`CONFIG` base URI).
    Config,
}

/// HTTP method used for the forwarded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Where the resolved user id goes in the forwarded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IdentityPlacement {
    /// `user_id` query parameter.
    Query,
    /// `user_id` field of the JSON body.
    Body,
    /// Identity is verified but not forwarded.
    None,
}

/// Accepted shape of an optional query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryKind {
    /// Must parse as a signed integer.
    Integer,
    /// Forwarded as-is.
    Text,
}

/// An optional query parameter copied from the inbound request when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryParam {
    pub name: &'static str,
    pub kind: QueryKind,
}

/// Everything the gateway needs to know to forward one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    /// Short name used in logs.
    pub name: &'static str,
    /// Inbound path pattern in router syntax.
    pub path: &'static str,
    pub method: Method,
    pub target: UpstreamTarget,
    /// Upstream path template, `{param}` segments are substituted.
    pub upstream_path: &'static str,
    pub identity: IdentityPlacement,
    /// Body fields copied verbatim; absence fails the request.
    pub required_fields: &'static [&'static str],
    /// Body fields copied verbatim; absence forwards `null`.
    pub optional_fields: &'static [&'static str],
    pub optional_query: &'static [QueryParam],
}

impl RouteSpec {
    /// Whether the forwarded call carries a JSON body.
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.method == Method::Post
    }

    /// Substitutes `params` into [`RouteSpec::upstream_path`] and returns the
    /// resulting path segments, unencoded.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingPathParam`] if a `{name}` segment has no
    /// matching entry in `params`.
    pub fn upstream_segments(&self, params: &[(&str, &str)]) -> Result<Vec<String>, CoreError> {
        self.upstream_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => params
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| (*v).to_owned())
                    .ok_or_else(|| CoreError::MissingPathParam { name: name.to_owned() }),
                None => Ok(segment.to_owned()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue;

    #[test]
    fn upstream_segments_substitutes_every_placeholder() {
        let segments = match catalogue::LOOKUP_LIST.upstream_segments(&[("lookup_list_id", "kb-9"), ("project_id", "p1")]) {
            Ok(s) => s,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(segments, vec!["project", "p1", "knowledge_base", "kb-9"]);
    }

    #[test]
    fn upstream_segments_keeps_raw_values_for_later_encoding() {
        let segments = match catalogue::DETAILS.upstream_segments(&[("project_id", "a b/c")]) {
            Ok(s) => s,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(segments, vec!["project", "a b/c"]);
    }

    #[test]
    fn upstream_segments_missing_param_errors() {
        let err = catalogue::TASK.upstream_segments(&[("project_id", "p1")]);
        assert_eq!(err, Err(CoreError::MissingPathParam { name: "task_id".to_owned() }));
    }

    #[test]
    fn config_route_ignores_path_params() {
        let segments = match catalogue::BASE_CONFIG.upstream_segments(&[("project_id", "p1")]) {
            Ok(s) => s,
            Err(e) => panic!("unexpected error: {e}"),
        };
        assert_eq!(segments, vec!["base_config"]);
    }
}

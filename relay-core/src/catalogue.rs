//! The fixed set of authenticated routes the gateway exposes.

use crate::route::{IdentityPlacement, Method, QueryKind, QueryParam, RouteSpec, UpstreamTarget};

pub const EXPORT: RouteSpec = RouteSpec {
    name: "export",
    path: "/project/{project_id}/export",
    method: Method::Get,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/export",
    identity: IdentityPlacement::Query,
    required_fields: &[],
    optional_fields: &[],
    optional_query: &[QueryParam { name: "num_samples", kind: QueryKind::Integer }],
};

pub const LOOKUP_LIST: RouteSpec = RouteSpec {
    name: "lookup_list",
    path: "/project/{project_id}/lookup_list/{lookup_list_id}",
    method: Method::Get,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/knowledge_base/{lookup_list_id}",
    identity: IdentityPlacement::Query,
    required_fields: &[],
    optional_fields: &[],
    optional_query: &[],
};

pub const IMPORT_FILE: RouteSpec = RouteSpec {
    name: "import_file",
    path: "/project/{project_id}/import_file",
    method: Method::Post,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/import_file",
    identity: IdentityPlacement::Body,
    required_fields: &["file_name", "file_type"],
    optional_fields: &["file_import_options"],
    optional_query: &[],
};

pub const IMPORT_JSON: RouteSpec = RouteSpec {
    name: "import_json",
    path: "/project/{project_id}/import_json",
    method: Method::Post,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/import_json",
    identity: IdentityPlacement::Body,
    required_fields: &["records", "request_uuid", "is_last"],
    optional_fields: &[],
    optional_query: &[],
};

pub const ASSOCIATIONS: RouteSpec = RouteSpec {
    name: "associations",
    path: "/project/{project_id}/associations",
    method: Method::Post,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/associations",
    identity: IdentityPlacement::Body,
    required_fields: &["associations", "indices", "name", "label_task_name", "source_type"],
    optional_fields: &[],
    optional_query: &[],
};

pub const DETAILS: RouteSpec = RouteSpec {
    name: "details",
    path: "/project/{project_id}",
    method: Method::Get,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}",
    identity: IdentityPlacement::Query,
    required_fields: &[],
    optional_fields: &[],
    optional_query: &[],
};

/// Identity is still resolved for this route; the result is not forwarded.
pub const BASE_CONFIG: RouteSpec = RouteSpec {
    name: "base_config",
    path: "/project/{project_id}/import/base_config",
    method: Method::Get,
    target: UpstreamTarget::Config,
    upstream_path: "/base_config",
    identity: IdentityPlacement::None,
    required_fields: &[],
    optional_fields: &[],
    optional_query: &[],
};

pub const TASK: RouteSpec = RouteSpec {
    name: "import_task",
    path: "/project/{project_id}/import/task/{task_id}",
    method: Method::Get,
    target: UpstreamTarget::Project,
    upstream_path: "/project/{project_id}/import/task/{task_id}",
    identity: IdentityPlacement::Query,
    required_fields: &[],
    optional_fields: &[],
    optional_query: &[],
};

/// Every authenticated route, in registration order.
pub const ROUTES: &[RouteSpec] = &[
    EXPORT,
    LOOKUP_LIST,
    IMPORT_FILE,
    IMPORT_JSON,
    ASSOCIATIONS,
    DETAILS,
    BASE_CONFIG,
    TASK,
];

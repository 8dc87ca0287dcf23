//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (issues, health)
//! - **Schemas**: Request, response, and error payloads
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, IssueStatus};
use crate::inbound::http::issues::{IssueResponse, ReportIssueRequest};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CivicWatch backend API",
        description = "HTTP interface for citizen issue reporting and health probes.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::issues::report_issue,
        crate::inbound::http::issues::list_issues,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ReportIssueRequest, IssueResponse, IssueStatus, Error, ErrorCode)),
    tags(
        (name = "issues", description = "Citizen issue submission and listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

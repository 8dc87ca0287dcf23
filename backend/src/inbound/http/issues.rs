//! Issue API handlers.
//!
//! ```text
//! POST /api/v1/issues  Submit a civic complaint
//! GET  /api/v1/issues?reportedBy=asha@example.org  List a reporter's issues
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{SubmitIssueRequest, SubmitValidationError};
use crate::domain::{EmailAddress, EmailValidationError, Error, Issue, IssueDraft, IssueStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Submission request body for `POST /api/v1/issues`.
///
/// Example JSON:
/// `{"title":"Pothole","description":"Large pothole","location":"Main St",
/// "typeOfIssue":"road","reportedBy":"asha@example.org"}`
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportIssueRequest {
    /// Short complaint title.
    pub title: String,
    /// Detailed description of the problem.
    #[serde(default)]
    pub description: String,
    /// Free-form location text.
    pub location: String,
    /// Complaint category, e.g. "road", "water", "electricity".
    pub type_of_issue: String,
    /// Opaque image reference produced by the upload flow, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Email identifying the reporting user.
    pub reported_by: String,
}

impl ReportIssueRequest {
    fn into_domain(self) -> Result<SubmitIssueRequest, Error> {
        let reported_by = EmailAddress::new(&self.reported_by).map_err(map_email_error)?;
        let draft = IssueDraft {
            title: self.title,
            description: self.description,
            location: self.location,
            type_of_issue: self.type_of_issue,
            image: self.image,
        };
        SubmitIssueRequest::new(draft, reported_by).map_err(map_validation_error)
    }
}

/// Serialised issue returned by both endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Issue identifier.
    pub id: Uuid,
    /// Short complaint title.
    pub title: String,
    /// Detailed description of the problem.
    pub description: String,
    /// Free-form location text.
    pub location: String,
    /// Complaint category.
    pub type_of_issue: String,
    /// Lifecycle status.
    pub status: IssueStatus,
    /// Opaque image reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Email of the reporting user.
    pub reported_by: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl From<Issue> for IssueResponse {
    fn from(issue: Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title,
            description: issue.description,
            location: issue.location,
            type_of_issue: issue.type_of_issue,
            status: issue.status,
            image: issue.image,
            reported_by: issue.reported_by.to_string(),
            created_at: issue.created_at,
        }
    }
}

fn map_email_error(err: EmailValidationError) -> Error {
    let code = match err {
        EmailValidationError::EmptyEmail => "empty_email",
        EmailValidationError::MalformedEmail => "malformed_email",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "reportedBy", "code": code }))
}

fn map_validation_error(err: SubmitValidationError) -> Error {
    let field = match err {
        SubmitValidationError::EmptyTitle => "title",
        SubmitValidationError::EmptyLocation => "location",
        SubmitValidationError::EmptyTypeOfIssue => "typeOfIssue",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": field, "code": "empty_field" }))
}

/// Submit a civic complaint on behalf of a registered user.
///
/// Submissions are rate limited to ten per reporter per UTC calendar day;
/// the cap resets automatically on the next day.
#[utoipa::path(
    post,
    path = "/api/v1/issues",
    request_body = ReportIssueRequest,
    responses(
        (status = 201, description = "Issue created", body = IssueResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown reporter", body = Error),
        (status = 429, description = "Daily report limit reached", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["issues"],
    operation_id = "reportIssue"
)]
#[post("/issues")]
pub async fn report_issue(
    state: web::Data<HttpState>,
    payload: web::Json<ReportIssueRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner().into_domain()?;
    let issue = state.submission.submit(request).await?;
    Ok(HttpResponse::Created().json(IssueResponse::from(issue)))
}

/// Query parameters for `GET /api/v1/issues`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListIssuesParams {
    /// Reporter email to filter by (exact match).
    pub reported_by: String,
}

/// List issues filed by one reporter.
#[utoipa::path(
    get,
    path = "/api/v1/issues",
    params(ListIssuesParams),
    responses(
        (status = 200, description = "Issues for the reporter", body = [IssueResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["issues"],
    operation_id = "listIssuesByReporter"
)]
#[get("/issues")]
pub async fn list_issues(
    state: web::Data<HttpState>,
    query: web::Query<ListIssuesParams>,
) -> ApiResult<web::Json<Vec<IssueResponse>>> {
    let reporter = EmailAddress::new(&query.reported_by).map_err(map_email_error)?;
    let issues = state.issues.list_by_reporter(&reporter).await?;
    Ok(web::Json(issues.into_iter().map(IssueResponse::from).collect()))
}

//! Domain aggregates, ports, and the submission service.
//!
//! Types here are transport agnostic: inbound adapters translate them to
//! HTTP, outbound adapters to SQL rows and wire payloads. Invariants and
//! serialisation contracts (serde) live in each type's Rustdoc.

pub mod error;
pub mod issue;
pub mod ports;
pub mod submission;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::issue::{Issue, IssueDraft, IssueStatus};
pub use self::submission::IssueSubmissionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DAILY_REPORT_CAP, EmailAddress, EmailValidationError, User};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;

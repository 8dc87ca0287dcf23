//! Outbound adapter for the downstream authority portal.

mod http_notifier;

pub use http_notifier::AuthorityHttpNotifier;

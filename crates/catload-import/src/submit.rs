//! Best-effort submission of records to the admin API.
//!
//! Each record is one create request. A failed request is logged and
//! tallied; it never stops the rest of the batch. There is no retry, no
//! backoff and no deduplication: every item is attempted exactly once, in
//! order.

use std::future::Future;
use std::time::Duration;

use catload_core::{AppConfig, CategoryRecord, ProductRecord};

use crate::client::AdminClient;
use crate::error::ClientError;

/// Why a single create request failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// Connection failure, TLS error, or an unreadable response.
    Network(String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// The API answered with a status other than 200 or 201.
    UnexpectedStatus(u16),
    /// The record was never sent because it failed a local check.
    Rejected(String),
}

impl std::fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitFailure::Network(reason) => write!(f, "network error: {reason}"),
            SubmitFailure::Timeout => write!(f, "request timed out"),
            SubmitFailure::UnexpectedStatus(status) => {
                write!(f, "unexpected HTTP status {status}")
            }
            SubmitFailure::Rejected(reason) => write!(f, "rejected before submission: {reason}"),
        }
    }
}

impl From<&ClientError> for SubmitFailure {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Http(e) if e.is_timeout() => SubmitFailure::Timeout,
            ClientError::UnexpectedStatus { status, .. } => {
                SubmitFailure::UnexpectedStatus(*status)
            }
            other => SubmitFailure::Network(other.to_string()),
        }
    }
}

/// Result of one create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success,
    Failure(SubmitFailure),
}

impl SubmissionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }
}

impl<T> From<Result<T, ClientError>> for SubmissionOutcome {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(_) => SubmissionOutcome::Success,
            Err(err) => SubmissionOutcome::Failure(SubmitFailure::from(&err)),
        }
    }
}

/// Submits one product record.
pub async fn submit_product(client: &AdminClient, record: &ProductRecord) -> SubmissionOutcome {
    client.create_product(record).await.into()
}

/// Submits one category record.
pub async fn submit_category(client: &AdminClient, record: &CategoryRecord) -> SubmissionOutcome {
    client.create_category(record).await.into()
}

/// Pacing and progress settings for [`bulk_submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOptions {
    /// Log a progress line after every this-many items. `0` disables it.
    pub progress_every: usize,
    /// Fixed pause between consecutive requests.
    pub inter_request_delay_ms: u64,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self {
            progress_every: 10,
            inter_request_delay_ms: 0,
        }
    }
}

impl BulkOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            progress_every: config.progress_every,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

/// A record that could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Zero-based position in the submitted batch.
    pub index: usize,
    pub label: String,
    pub reason: SubmitFailure,
}

/// Tally of a bulk submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<RowFailure>,
}

impl BulkSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Counts each of `labels` as failed without attempting it.
    pub fn record_skipped(
        &mut self,
        labels: impl IntoIterator<Item = String>,
        reason: &SubmitFailure,
    ) {
        for label in labels {
            self.failures.push(RowFailure {
                index: self.total(),
                label,
                reason: reason.clone(),
            });
            self.failed += 1;
        }
    }

    /// Adds another summary's counts, re-indexing its failures after ours.
    pub fn merge(&mut self, other: BulkSummary) {
        let offset = self.total();
        self.failures
            .extend(other.failures.into_iter().map(|mut f| {
                f.index += offset;
                f
            }));
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

impl std::fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "imported {}, failed {}", self.succeeded, self.failed)
    }
}

/// Submits `items` one at a time, in order, with `submit`.
///
/// Every item is attempted exactly once regardless of earlier failures, so
/// `succeeded + failed == items.len()` on return. `label` names an item in
/// logs and in [`RowFailure`]s.
pub async fn bulk_submit<'a, T, L, F, Fut>(
    items: &'a [T],
    options: BulkOptions,
    label: L,
    mut submit: F,
) -> BulkSummary
where
    L: Fn(&T) -> &str,
    F: FnMut(&'a T) -> Fut,
    Fut: Future<Output = SubmissionOutcome>,
{
    let mut summary = BulkSummary::default();
    let total = items.len();

    for (index, item) in items.iter().enumerate() {
        if index > 0 && options.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(options.inter_request_delay_ms)).await;
        }

        match submit(item).await {
            SubmissionOutcome::Success => {
                summary.succeeded += 1;
                tracing::debug!(row = index, item = label(item), "submitted");
            }
            SubmissionOutcome::Failure(reason) => {
                summary.failed += 1;
                tracing::warn!(row = index, item = label(item), %reason, "submission failed");
                summary.failures.push(RowFailure {
                    index,
                    label: label(item).to_string(),
                    reason,
                });
            }
        }

        let done = index + 1;
        if options.progress_every > 0 && done % options.progress_every == 0 && done < total {
            tracing::info!(
                done,
                total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "progress"
            );
        }
    }

    summary
}

//! Pure helpers for interpreting blocklist mutations.

use crate::core::error::ApiError;
use squidpanel_api_models::BulkOutcome;

/// Treat an HTTP 200 carrying `status: "error"` as a failure.
///
/// # Errors
///
/// Returns [`ApiError::Rejected`] with the backend message when the batch failed.
pub fn bulk_result(outcome: BulkOutcome) -> Result<BulkOutcome, ApiError> {
    if outcome.is_error() {
        return Err(ApiError::Rejected(
            outcome
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_default(),
        ));
    }
    Ok(outcome)
}

/// Counts shown in the success toast after a bulk call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulkTally {
    /// Entries the backend applied.
    pub applied: usize,
    /// Entries skipped as invalid, rejected, or absent.
    pub skipped: usize,
}

/// Tally a bulk add.
#[must_use]
pub fn upload_tally(outcome: &BulkOutcome) -> BulkTally {
    let applied = outcome.result.as_ref().map_or(0, |result| {
        result.successfully_added.max(result.added.len())
    });
    BulkTally {
        applied,
        skipped: outcome.skipped(),
    }
}

/// Tally a bulk remove; `requested` is used when the backend omits a count.
#[must_use]
pub fn removal_tally(outcome: &BulkOutcome, requested: usize) -> BulkTally {
    let skipped = outcome.skipped();
    BulkTally {
        applied: outcome
            .successfully_removed
            .unwrap_or_else(|| requested.saturating_sub(skipped)),
        skipped,
    }
}

/// Fill `{count}` and `{skipped}` placeholders in a translated template.
#[must_use]
pub fn format_tally(template: &str, tally: BulkTally) -> String {
    template
        .replace("{count}", &tally.applied.to_string())
        .replace("{skipped}", &tally.skipped.to_string())
}

/// Fill the `{url}` placeholder in a translated template.
#[must_use]
pub fn format_entry(template: &str, url: &str) -> String {
    template.replace("{url}", url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use squidpanel_api_models::{BulkAddSummary, BulkFailure};

    #[test]
    fn error_status_becomes_rejection() {
        let outcome = BulkOutcome {
            status: "error".into(),
            message: Some("no valid URLs found".into()),
            invalid_entries: vec!["??".into()],
            ..BulkOutcome::default()
        };
        let err = bulk_result(outcome).expect_err("error status");
        assert_eq!(err.user_message(), "no valid URLs found");
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        let outcome = BulkOutcome {
            status: "error".into(),
            ..BulkOutcome::default()
        };
        let err = bulk_result(outcome).expect_err("error status");
        assert_eq!(err.user_message(), crate::core::error::UNKNOWN_ERROR);
    }

    #[test]
    fn upload_tally_counts_added_and_skipped() {
        let outcome = BulkOutcome {
            status: "success".into(),
            invalid_entries: vec!["bad".into()],
            result: Some(BulkAddSummary {
                added: vec!["a.com".into(), "b.com".into()],
                failed: vec![BulkFailure {
                    url: "c.com".into(),
                    reason: "already blocked".into(),
                }],
                total_processed: 3,
                successfully_added: 2,
            }),
            ..BulkOutcome::default()
        };
        let outcome = bulk_result(outcome).expect("success");
        assert_eq!(
            upload_tally(&outcome),
            BulkTally {
                applied: 2,
                skipped: 2
            }
        );
    }

    #[test]
    fn removal_tally_prefers_backend_count() {
        let outcome = BulkOutcome {
            status: "success".into(),
            not_found: vec!["gone.com".into()],
            successfully_removed: Some(3),
            ..BulkOutcome::default()
        };
        assert_eq!(removal_tally(&outcome, 4).applied, 3);
        let bare = BulkOutcome {
            status: "success".into(),
            not_found: vec!["gone.com".into()],
            ..BulkOutcome::default()
        };
        assert_eq!(
            removal_tally(&bare, 4),
            BulkTally {
                applied: 3,
                skipped: 1
            }
        );
    }

    #[test]
    fn templates_fill_placeholders() {
        let tally = BulkTally {
            applied: 5,
            skipped: 1,
        };
        assert_eq!(
            format_tally("{count} added, {skipped} skipped", tally),
            "5 added, 1 skipped"
        );
        assert_eq!(format_entry("{url} blocked", "ads.net"), "ads.net blocked");
    }
}

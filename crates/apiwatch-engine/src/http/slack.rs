//! Slack incoming-webhook notifier.
//!
//! Message layout: a bell header, the plain-text summary in a code block,
//! then a link back to the monitored document.

#![allow(clippy::result_large_err)]

use super::{NOTIFY_TIMEOUT, USER_AGENT};
use apiwatch_core::diff::{render_human_summary, ChangeReport, ChangeSeverity};
use apiwatch_core::errors::{ExError, ExErrorKind, Result, WatchError};
use apiwatch_core::notifier::Notifier;
use apiwatch_core_types::Sensitive;
use reqwest::blocking::Client;
use serde::Serialize;

const HEADER: &str = "API document change detected";
const BOT_USERNAME: &str = "API Monitor Bot";
const BOT_ICON: &str = ":robot_face:";

/// JSON body accepted by Slack incoming webhooks.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlackPayload {
    pub text: String,
    pub username: String,
    pub icon_emoji: String,
}

/// Posts change reports to a Slack webhook.
pub struct SlackNotifier {
    client: Client,
    webhook: Sensitive<String>,
    doc_url: String,
}

impl SlackNotifier {
    /// Notifier with the default client (10 s timeout).
    ///
    /// # Errors
    ///
    /// `Internal` if the HTTP client cannot be constructed.
    pub fn new(webhook: Sensitive<String>, doc_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("build_http_client")
                    .with_message(e.to_string())
            })?;
        Ok(Self::with_client(webhook, doc_url, client))
    }

    /// Notifier using a caller-configured client.
    pub fn with_client(
        webhook: Sensitive<String>,
        doc_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            client,
            webhook,
            doc_url: doc_url.into(),
        }
    }

    /// Build the message body for a report.
    pub fn payload(&self, report: &ChangeReport) -> SlackPayload {
        let marker = if report.severity == ChangeSeverity::Breaking {
            " (breaking)"
        } else {
            ""
        };
        let header = match &report.document_title {
            Some(title) => format!("{HEADER}: {title}"),
            None => HEADER.to_string(),
        };
        let text = format!(
            ":bell: *{}*{}\n\n```\n{}\n```\n\n:link: <{}|Open API document>",
            header,
            marker,
            render_human_summary(report),
            self.doc_url
        );
        SlackPayload {
            text,
            username: BOT_USERNAME.to_string(),
            icon_emoji: BOT_ICON.to_string(),
        }
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, report: &ChangeReport) -> Result<()> {
        let payload = self.payload(report);

        // reqwest errors embed the request URL; the webhook URL is a secret.
        let response = self
            .client
            .post(self.webhook.expose().as_str())
            .json(&payload)
            .send()
            .map_err(|e| WatchError::NotifyFailed {
                reason: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::NotifyStatus {
                status: status.as_u16(),
            }
            .into());
        }

        tracing::info!(severity = %report.severity, "slack notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiwatch_core::diff::model::{ChangeClassification, SetChanges, VersionChange};

    fn notifier() -> SlackNotifier {
        SlackNotifier::with_client(
            Sensitive::new("https://hooks.slack.test/services/T/B/secret".to_string()),
            "https://api.test/oas/docs",
            Client::new(),
        )
    }

    fn version_bump() -> ChangeReport {
        ChangeReport {
            classification: ChangeClassification::Changed,
            severity: ChangeSeverity::Informational,
            version_change: Some(VersionChange {
                old: "1.0".to_string(),
                new: "1.1".to_string(),
            }),
            ..ChangeReport::unchanged()
        }
    }

    #[test]
    fn test_payload_layout() {
        let payload = notifier().payload(&version_bump());

        assert_eq!(payload.username, "API Monitor Bot");
        assert_eq!(payload.icon_emoji, ":robot_face:");
        assert!(payload.text.starts_with(":bell: *API document change detected*\n\n```\n"));
        assert!(payload.text.contains("Version changed: 1.0 -> 1.1\n```"));
        assert!(payload
            .text
            .ends_with(":link: <https://api.test/oas/docs|Open API document>"));
    }

    #[test]
    fn test_breaking_changes_are_flagged_in_header() {
        let report = ChangeReport {
            classification: ChangeClassification::Changed,
            severity: ChangeSeverity::Breaking,
            endpoint_changes: SetChanges {
                added: vec![],
                removed: vec!["/gone".to_string()],
            },
            ..ChangeReport::unchanged()
        };
        let payload = notifier().payload(&report);
        assert!(payload
            .text
            .starts_with(":bell: *API document change detected* (breaking)"));
    }

    #[test]
    fn test_header_names_the_document() {
        let report = version_bump().with_document_title(Some("Pension API".to_string()));
        let payload = notifier().payload(&report);
        assert!(payload
            .text
            .starts_with(":bell: *API document change detected: Pension API*\n"));
    }

    #[test]
    fn test_payload_never_contains_webhook() {
        let payload = notifier().payload(&version_bump());
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("hooks.slack.test"));
    }
}

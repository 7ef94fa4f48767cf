//! Notifier module
//!
//! Best-effort status reporting toward the host UI (toasts, banners, status
//! bars). The upload service fires notifications and never consumes a return
//! value, so a misbehaving notifier cannot change an upload's outcome.

use async_trait::async_trait;

/// Kind of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    /// Validation passed, transfer is starting
    Started,
    /// Transfer finished and the endpoint accepted the file
    Succeeded,
    /// Upload was rejected or failed
    Failed,
}

/// Notifier capability injected into the upload service.
///
/// Implementations are expected to be cheap and non-blocking from the
/// caller's point of view; the service awaits each call but ignores it
/// otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fire-and-forget status message
    async fn notify(&self, kind: NotifyKind, message: &str);
}

/// Notifier that drops every message
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _kind: NotifyKind, _message: &str) {}
}

/// Notifier that forwards messages to the tracing subscriber
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Started => tracing::info!(text = %message, "upload started"),
            NotifyKind::Succeeded => tracing::info!(text = %message, "upload succeeded"),
            NotifyKind::Failed => tracing::warn!(text = %message, "upload failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_notifier() {
        let notifier = NoopNotifier;
        notifier.notify(NotifyKind::Started, "hello").await;
    }

    #[tokio::test]
    async fn test_tracing_notifier() {
        let notifier = TracingNotifier;
        notifier.notify(NotifyKind::Failed, "boom").await;
    }

    #[tokio::test]
    async fn test_mock_notifier_records_kind() {
        let mut mock = MockNotifier::new();
        mock.expect_notify()
            .withf(|kind, message| *kind == NotifyKind::Succeeded && message == "done")
            .times(1)
            .returning(|_, _| ());

        mock.notify(NotifyKind::Succeeded, "done").await;
    }
}

//! Notification service contracts and no-op adapter.

use std::{future::Future, pin::Pin};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for user-visible notifications and confirmations.
pub trait NotificationService {
    /// Dispatches a blocking notification message.
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>>;

    /// Asks the user a yes/no question, returning their answer.
    fn confirm<'a>(&'a self, message: &'a str) -> NotificationFuture<'a, Result<bool, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for unsupported targets.
///
/// Confirmations answer `false` so destructive actions never proceed by
/// default on hosts without a prompt surface.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _title: &'a str,
        _body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn confirm<'a>(&'a self, _message: &'a str) -> NotificationFuture<'a, Result<bool, String>> {
        Box::pin(async { Ok(false) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_notifications_succeed_and_deny_confirmations() {
        let service = NoopNotificationService;
        let service_obj: &dyn NotificationService = &service;
        block_on(service_obj.notify("Storage", "quota exceeded")).expect("notify");
        assert!(!block_on(service_obj.confirm("Delete file?")).expect("confirm"));
    }
}

//! Blocking notification and confirmation adapters for the browser.

use vault_host::{NotificationFuture, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by `window.alert`/`window.confirm`.
///
/// These are deliberately blocking: quota and read failures must interrupt
/// the user before they continue acting on stale state.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let rendered = if body.trim().is_empty() {
                    title.to_string()
                } else {
                    format!("{title}: {body}")
                };
                let window = web_sys::window()
                    .ok_or_else(|| "window unavailable".to_string())?;
                return window
                    .alert_with_message(&rendered)
                    .map_err(|err| format!("alert dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (title, body);
                Ok(())
            }
        })
    }

    fn confirm<'a>(&'a self, message: &'a str) -> NotificationFuture<'a, Result<bool, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window()
                    .ok_or_else(|| "window unavailable".to_string())?;
                return window
                    .confirm_with_message(message)
                    .map_err(|err| format!("confirm dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = message;
                Ok(false)
            }
        })
    }
}

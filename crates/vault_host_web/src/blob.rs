//! Object-URL minting with guaranteed timed release.

use vault_host::ObjectUrlService;

/// How long a minted object URL stays valid before it is revoked.
///
/// Revocation is scheduled at creation time, so the URL is released whether
/// or not the consuming view was ever opened or was closed early.
pub const OBJECT_URL_TTL_MS: i32 = 60_000;

#[derive(Debug, Clone, Copy, Default)]
/// Browser object-URL service backed by `URL.createObjectURL`.
pub struct WebObjectUrlService;

impl ObjectUrlService for WebObjectUrlService {
    fn create_for_bytes(&self, bytes: &[u8], mime: &str) -> Result<String, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let array = js_sys::Uint8Array::from(bytes);
            let parts = js_sys::Array::of1(&array);
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(mime);
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|e| format!("blob construction failed: {e:?}"))?;
            let url = web_sys::Url::create_object_url_with_blob(&blob)
                .map_err(|e| format!("createObjectURL failed: {e:?}"))?;
            schedule_revoke(&url);
            Ok(url)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (bytes, mime);
            Err("object URLs are only available in the browser".to_string())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule_revoke(url: &str) {
    use wasm_bindgen::{closure::Closure, JsCast};

    let Some(window) = web_sys::window() else {
        return;
    };
    let owned = url.to_string();
    let revoke = Closure::once_into_js(move || {
        let _ = web_sys::Url::revoke_object_url(&owned);
    });
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            OBJECT_URL_TTL_MS,
        )
        .is_err()
    {
        // Timer refused; revoke immediately rather than leak the URL.
        let _ = web_sys::Url::revoke_object_url(url);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn non_wasm_object_urls_report_unsupported() {
        let service = WebObjectUrlService;
        let service_obj: &dyn ObjectUrlService = &service;
        let err = service_obj
            .create_for_bytes(b"bytes", "image/png")
            .expect_err("no browser");
        assert!(err.contains("browser"));
    }
}

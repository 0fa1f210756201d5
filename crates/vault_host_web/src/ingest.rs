//! `FileReader`-based ingestion reads.

use vault_host::IngestedRead;

/// Reads a browser file handle to a base64 data URI.
///
/// The read is non-blocking; each call is an independent completion and
/// callers submitting several files at once must expect completions to
/// arrive in any order. A failed read resolves to an error and produces no
/// [`IngestedRead`].
///
/// # Errors
///
/// Returns an error when the read fails or when called outside the browser.
pub async fn read_file_to_data_url(file: &web_sys::File) -> Result<IngestedRead, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let data_url = read_to_data_url_inner(file).await?;
        Ok(IngestedRead {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            last_modified_unix_ms: Some(file.last_modified().max(0.0) as u64),
            data_url,
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = file;
        Err("file reads are only available in the browser".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
async fn read_to_data_url_inner(file: &web_sys::File) -> Result<String, String> {
    use std::{cell::RefCell, rc::Rc};

    use futures::channel::oneshot;
    use wasm_bindgen::{closure::Closure, JsCast};

    let reader = web_sys::FileReader::new()
        .map_err(|e| format!("FileReader unavailable: {e:?}"))?;
    let (sender, receiver) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let onload = {
        let reader = reader.clone();
        let sender = sender.clone();
        Closure::once(move |_event: web_sys::ProgressEvent| {
            let outcome = reader
                .result()
                .map_err(|e| format!("read result unavailable: {e:?}"))
                .and_then(|value| {
                    value
                        .as_string()
                        .ok_or_else(|| "read did not produce a data URL".to_string())
                });
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(outcome);
            }
        })
    };
    let onerror = {
        let sender = sender.clone();
        let name = file.name();
        Closure::once(move |_event: web_sys::ProgressEvent| {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(Err(format!("reading {name:?} failed")));
            }
        })
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    reader
        .read_as_data_url(file)
        .map_err(|e| format!("read_as_data_url failed: {e:?}"))?;

    // The closures must outlive the read; awaiting here keeps them alive
    // until one of them fires.
    let outcome = receiver
        .await
        .map_err(|_| "file read was abandoned".to_string())?;
    reader.set_onload(None);
    reader.set_onerror(None);
    outcome
}

//! File vault app UI: picker/drop ingestion, filter controls, and the record list.
//!
//! All state transitions live in `vault_core`; this crate only wires browser
//! events to registry operations and renders the filtered view.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::rc::Rc;

use leptos::*;
use vault_core::{
    filter_records, plan_view, FileRecord, FileRegistry, FilterPrefs, TypeSelector, VaultError,
    ViewPlan,
};
use vault_host::{
    load_prefs_with, save_prefs_with, NoopNotificationService, NoopObjectUrlService,
    NoopPrefsStore, NoopRegistryStore, NotificationService, ObjectUrlService, PrefsStore,
    RegistryStore,
};
use vault_host_web::{
    read_file_to_data_url, WebNotificationService, WebObjectUrlService, WebPrefsStore,
    WebRegistryStore,
};
use wasm_bindgen::JsCast;

#[derive(Clone)]
/// Host services consumed by [`FilesApp`].
pub struct FilesAppServices {
    /// Registry document persistence.
    pub registry_store: Rc<dyn RegistryStore>,
    /// Filter preference persistence.
    pub prefs: Rc<dyn PrefsStore>,
    /// Blocking notifications and confirmations.
    pub notifications: Rc<dyn NotificationService>,
    /// Ephemeral object URLs for image display and downloads.
    pub object_urls: Rc<dyn ObjectUrlService>,
}

impl FilesAppServices {
    /// Browser-backed service selection.
    pub fn browser() -> Self {
        Self {
            registry_store: Rc::new(WebRegistryStore),
            prefs: Rc::new(WebPrefsStore),
            notifications: Rc::new(WebNotificationService),
            object_urls: Rc::new(WebObjectUrlService),
        }
    }

    /// Inert service selection for tests and unsupported targets.
    pub fn noop() -> Self {
        Self {
            registry_store: Rc::new(NoopRegistryStore),
            prefs: Rc::new(NoopPrefsStore),
            notifications: Rc::new(NoopNotificationService),
            object_urls: Rc::new(NoopObjectUrlService),
        }
    }
}

/// File vault application component.
#[component]
pub fn FilesApp(services: FilesAppServices) -> impl IntoView {
    let registry = store_value(FileRegistry::new(services.registry_store.clone()));
    let services = store_value(services);

    let records = create_rw_signal(Vec::<FileRecord>::new());
    let selector = create_rw_signal(TypeSelector::All);
    let max_size_input = create_rw_signal(String::new());
    let picked_label = create_rw_signal(String::new());
    let drag_active = create_rw_signal(false);

    let refresh = move || records.set(registry.with_value(|r| r.list()));

    // Boot: hydrate persisted records and filter prefs.
    spawn_local(async move {
        let prefs_store = services.with_value(|s| s.prefs.clone());
        match load_prefs_with::<_, FilterPrefs>(prefs_store.as_ref()).await {
            Ok(Some(prefs)) => {
                selector.set(prefs.selector);
                if prefs.max_size > 0 {
                    max_size_input.set(prefs.max_size.to_string());
                }
            }
            Ok(None) => {}
            Err(err) => logging::warn!("filter prefs load failed: {err}"),
        }
        registry.with_value(|r| r.clone()).reload().await;
        refresh();
    });

    let persist_filters = move || {
        let prefs = FilterPrefs {
            selector: selector.get_untracked(),
            max_size: parse_size_bound(&max_size_input.get_untracked()),
        };
        let prefs_store = services.with_value(|s| s.prefs.clone());
        spawn_local(async move {
            if let Err(err) = save_prefs_with(prefs_store.as_ref(), &prefs).await {
                logging::warn!("filter prefs save failed: {err}");
            }
        });
    };

    let ingest_files = move |files: web_sys::FileList| {
        let count = files.length();
        if count == 0 {
            return;
        }
        picked_label.set(if count == 1 {
            files.item(0).map(|f| f.name()).unwrap_or_default()
        } else {
            format!("{count} files selected")
        });
        for index in 0..count {
            let Some(file) = files.item(index) else {
                continue;
            };
            // One independent completion per file; these may resolve in any
            // order and each admission persists on its own.
            spawn_local(async move {
                let bundle = services.with_value(|s| s.clone());
                match read_file_to_data_url(&file).await {
                    Ok(read) => match registry.with_value(|r| r.clone()).admit(read).await {
                        Ok(_) => refresh(),
                        Err(err) => {
                            logging::warn!("admission failed: {err}");
                            notify_later(bundle, "Could not save file".to_string(), err.to_string());
                        }
                    },
                    Err(err) => {
                        let err = VaultError::Read(err);
                        logging::warn!("ingestion failed: {err}");
                        notify_later(bundle, "Could not read file".to_string(), err.to_string());
                    }
                }
            });
        }
    };

    let on_pick = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(files) = input.files() {
            ingest_files(files);
        }
        input.set_value("");
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(false);
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            ingest_files(files);
        }
    };

    let on_view = move |id: String| {
        let Some(record) = registry.with_value(|r| r.find(&id)) else {
            return;
        };
        let plan = plan_view(&record);
        present_plan(services.with_value(|s| s.clone()), record, plan);
    };

    let on_delete = move |id: String| {
        let Some(record) = registry.with_value(|r| r.find(&id)) else {
            return;
        };
        let bundle = services.with_value(|s| s.clone());
        spawn_local(async move {
            let message = format!("Delete {}?", display_name(&record));
            match bundle.notifications.confirm(&message).await {
                Ok(true) => match registry.with_value(|r| r.clone()).remove(&record.id).await {
                    Ok(_) => refresh(),
                    Err(err) => {
                        logging::warn!("delete failed: {err}");
                        notify_later(bundle, "Could not delete file".to_string(), err.to_string());
                    }
                },
                Ok(false) => {}
                Err(err) => logging::warn!("delete confirmation failed: {err}"),
            }
        });
    };

    let filtered = create_memo(move |_| {
        filter_records(
            &records.get(),
            selector.get(),
            parse_size_bound(&max_size_input.get()),
        )
    });

    view! {
        <div class="app-shell app-vault-shell">
            <div class="app-toolbar vault-ingest">
                <label class="vault-picker">
                    "Add files"
                    <input type="file" multiple=true on:change=on_pick />
                </label>
                <div
                    class=move || {
                        if drag_active.get() { "vault-droparea dragover" } else { "vault-droparea" }
                    }
                    on:dragover=move |ev: ev::DragEvent| {
                        ev.prevent_default();
                        drag_active.set(true);
                    }
                    on:dragleave=move |_| drag_active.set(false)
                    on:drop=on_drop
                >
                    "Drop files here"
                </div>
                <span class="vault-picked">{move || picked_label.get()}</span>
            </div>

            <div class="app-toolbar vault-filters">
                <select on:change=move |ev| {
                    if let Some(next) = TypeSelector::from_token(&event_target_value(&ev)) {
                        selector.set(next);
                        persist_filters();
                    }
                }>
                    <FilterOption value=TypeSelector::All label="All types" selector=selector />
                    <FilterOption value=TypeSelector::Image label="Images" selector=selector />
                    <FilterOption value=TypeSelector::Text label="Text" selector=selector />
                    <FilterOption
                        value=TypeSelector::Application
                        label="Applications"
                        selector=selector
                    />
                    <FilterOption value=TypeSelector::Other label="Other" selector=selector />
                </select>
                <input
                    type="number"
                    min="0"
                    placeholder="Max size (bytes)"
                    prop:value=move || max_size_input.get()
                    on:input=move |ev| {
                        max_size_input.set(event_target_value(&ev));
                        persist_filters();
                    }
                />
            </div>

            <div class="vault-list">
                <Show
                    when=move || !filtered.get().is_empty()
                    fallback=|| view! { <div class="vault-empty">"No files to display."</div> }
                >
                    <For each=move || filtered.get() key=|record| record.id.clone() let:record>
                        <FileRow
                            record=record
                            on_view=Callback::new(on_view)
                            on_delete=Callback::new(on_delete)
                        />
                    </For>
                </Show>
            </div>

            <div class="app-statusbar">
                <span>{move || {
                    format!("{} of {} file(s)", filtered.get().len(), records.get().len())
                }}</span>
                <span>{move || {
                    let label = picked_label.get();
                    if label.is_empty() { "Ready".to_string() } else { label }
                }}</span>
            </div>
        </div>
    }
}

#[component]
fn FilterOption(
    value: TypeSelector,
    label: &'static str,
    selector: RwSignal<TypeSelector>,
) -> impl IntoView {
    view! {
        <option value=value.as_token() selected=move || selector.get() == value>
            {label}
        </option>
    }
}

#[component]
fn FileRow(
    record: FileRecord,
    on_view: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let summary = row_summary(&record);
    let view_id = record.id.clone();
    let delete_id = record.id.clone();
    view! {
        <div class="vault-row">
            <span class="vault-row-summary">{summary}</span>
            <button type="button" on:click=move |_| on_view.call(view_id.clone())>
                "View"
            </button>
            <button type="button" on:click=move |_| on_delete.call(delete_id.clone())>
                "Delete"
            </button>
        </div>
    }
}

fn present_plan(services: FilesAppServices, record: FileRecord, plan: ViewPlan) {
    match plan {
        ViewPlan::Image { mime, bytes } => {
            match services.object_urls.create_for_bytes(&bytes, &mime) {
                Ok(url) => {
                    if let Err(err) = open_in_new_tab(&url) {
                        logging::warn!("image view failed: {err}");
                        notify_summary(services, &record);
                    }
                }
                Err(err) => {
                    logging::warn!("image object URL failed: {err}");
                    notify_summary(services, &record);
                }
            }
        }
        ViewPlan::TextPreview { text, truncated } => {
            let title = format!("Contents of {}", display_name(&record));
            notify_later(services, title, preview_body(&text, truncated));
        }
        ViewPlan::Download { name, mime, bytes } => {
            match services.object_urls.create_for_bytes(&bytes, &mime) {
                Ok(url) => {
                    if let Err(err) = trigger_download(&url, &name) {
                        logging::warn!("download failed: {err}");
                        notify_summary(services, &record);
                    }
                }
                Err(err) => {
                    logging::warn!("download object URL failed: {err}");
                    notify_summary(services, &record);
                }
            }
        }
        ViewPlan::Summary { .. } => notify_summary(services, &record),
    }
}

fn notify_summary(services: FilesAppServices, record: &FileRecord) {
    notify_later(services, "File details".to_string(), summary_body(record));
}

fn notify_later(services: FilesAppServices, title: String, body: String) {
    spawn_local(async move {
        if let Err(err) = services.notifications.notify(&title, &body).await {
            logging::warn!("notification failed: {err}");
        }
    });
}

fn open_in_new_tab(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    window
        .open_with_url(url)
        .map_err(|e| format!("window.open failed: {e:?}"))?
        .ok_or_else(|| "popup blocked".to_string())?;
    Ok(())
}

fn trigger_download(url: &str, name: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "document unavailable".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("anchor creation failed: {e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor cast failed".to_string())?;
    anchor.set_href(url);
    anchor.set_download(if name.is_empty() { "download" } else { name });
    anchor.click();
    Ok(())
}

fn parse_size_bound(input: &str) -> u64 {
    input.trim().parse().unwrap_or(0)
}

fn display_name(record: &FileRecord) -> String {
    if record.name.is_empty() {
        "(unnamed)".to_string()
    } else {
        record.name.clone()
    }
}

fn type_label(record: &FileRecord) -> String {
    if record.kind.is_empty() {
        "unknown type".to_string()
    } else {
        record.kind.clone()
    }
}

fn row_summary(record: &FileRecord) -> String {
    format!(
        "{} ({}, {} bytes)",
        display_name(record),
        type_label(record),
        record.size
    )
}

fn preview_body(text: &str, truncated: bool) -> String {
    if truncated {
        format!("{text}...")
    } else {
        text.to_string()
    }
}

fn summary_body(record: &FileRecord) -> String {
    format!(
        "File: {}\nType: {}\nSize: {} bytes\n\nContent preview is not available for this file.",
        display_name(record),
        type_label(record),
        record.size
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, kind: &str, size: u64) -> FileRecord {
        FileRecord {
            id: "1-1".to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            size,
            last_modified: None,
            data: "data:;base64,".to_string(),
            date: "2026-08-27T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn row_summary_falls_back_for_unknown_types_and_names() {
        assert_eq!(
            row_summary(&record("notes.txt", "text/plain", 12)),
            "notes.txt (text/plain, 12 bytes)"
        );
        assert_eq!(row_summary(&record("", "", 3)), "(unnamed) (unknown type, 3 bytes)");
    }

    #[test]
    fn preview_body_marks_truncation() {
        assert_eq!(preview_body("Hello", false), "Hello");
        assert_eq!(preview_body("Hello", true), "Hello...");
    }

    #[test]
    fn size_bound_parsing_treats_garbage_as_unbounded() {
        assert_eq!(parse_size_bound("4096"), 4096);
        assert_eq!(parse_size_bound("  100 "), 100);
        assert_eq!(parse_size_bound(""), 0);
        assert_eq!(parse_size_bound("-3"), 0);
        assert_eq!(parse_size_bound("many"), 0);
    }

    #[test]
    fn noop_services_compose() {
        let services = FilesAppServices::noop();
        assert!(services
            .object_urls
            .create_for_bytes(b"x", "image/png")
            .is_err());
    }
}

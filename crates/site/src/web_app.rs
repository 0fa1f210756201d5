use leptos::*;
use vault_app_files::{FilesApp, FilesAppServices};

#[component]
pub fn SiteApp() -> impl IntoView {
    let services = FilesAppServices::browser();

    view! {
        <main class="site-root">
            <h1>"File Vault"</h1>
            <FilesApp services=services />
        </main>
    }
}

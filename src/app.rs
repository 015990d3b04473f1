//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::SettingsConfig;
use crate::pages::settings::SettingsPage;
use crate::state::auth::AuthProvider;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Build-time config, or the defaults when it does not parse.
pub fn load_config() -> SettingsConfig {
    SettingsConfig::from_build_env().unwrap_or_else(|e| {
        log::warn!("{e}; using default settings config");
        SettingsConfig::default()
    })
}

/// Root application component.
///
/// Provides the settings config and auth store, then routes to the settings page.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = load_config();
    let user_storage_key = config.user_storage_key.clone();
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/account-settings.css"/>
        <Title text="Account Settings"/>

        <AuthProvider storage_key=user_storage_key>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                    <Route path=StaticSegment("") view=SettingsPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

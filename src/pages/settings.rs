//! Account settings page: profile form, avatar upload, notification toggles.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the signed-in user from the auth store, fetches that user's profile,
//! and lets them edit and save it. All profile state lives in one
//! `SettingsController` signal; fetches, avatar reads, and saves run as local
//! tasks and report back into it.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use leptos::prelude::*;

use crate::components::avatar_picker::AvatarPicker;
use crate::components::notification_toggle::NotificationToggle;
use crate::config::SettingsConfig;
use crate::net::api::HttpProfileApi;
use crate::state::auth::use_auth;
use crate::state::notifications::{NotificationKind, PreferencesDraft};
use crate::state::profile_form::FormField;
use crate::state::profile_query::{FetchTicket, QueryStatus};
use crate::state::save::PatchRequest;
use crate::state::settings::SettingsController;
use crate::util::storage::BrowserStorage;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettingsTab {
    #[default]
    Account,
    Notifications,
}

impl SettingsTab {
    pub const ALL: [Self; 2] = [Self::Account, Self::Notifications];

    pub fn label(self) -> &'static str {
        match self {
            Self::Account => "Account",
            Self::Notifications => "Notifications",
        }
    }
}

/// Coarse page state; only changes when the fetch status changes kind, so
/// typing in the form does not rebuild the page.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PagePhase {
    Loading,
    Failed(String),
    Ready,
}

impl PagePhase {
    fn from_status(status: &QueryStatus) -> Self {
        match status {
            QueryStatus::Disabled | QueryStatus::Loading => Self::Loading,
            QueryStatus::Error(e) => Self::Failed(format!("Could not load your profile: {e}")),
            QueryStatus::Success(_) => Self::Ready,
        }
    }
}

fn save_status(controller: &SettingsController) -> Option<String> {
    let save = controller.save_state();
    if save.in_flight() {
        return Some("Saving…".to_owned());
    }
    if let Some(e) = save.last_error() {
        return Some(format!("Save failed: {e}"));
    }
    if controller.form_state().is_dirty() {
        return Some("Unsaved changes".to_owned());
    }
    (save.saved_count() > 0).then(|| "Changes saved".to_owned())
}

fn spawn_fetch(api: HttpProfileApi, controller: RwSignal<SettingsController>, ticket: FetchTicket) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::state::settings::fetch_profile(&api, &ticket).await;
        controller.try_update(|c| c.apply_fetch(ticket, result));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api, controller, ticket);
    }
}

fn spawn_save(api: HttpProfileApi, controller: RwSignal<SettingsController>, request: PatchRequest) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::state::settings::submit_patch(&api, &request).await;
        if let Some(ticket) = controller.try_update(|c| c.apply_save(&request, result)).flatten() {
            spawn_fetch(api, controller, ticket);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api, controller, request);
    }
}

/// Settings page. Shows a configuration error if mounted outside `AuthProvider`.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let auth = match use_auth() {
        Ok(auth) => auth,
        Err(e) => {
            log::error!("settings page: {e}");
            return view! {
                <main class="settings-page">
                    <p class="settings-page__error">{e.to_string()}</p>
                </main>
            }
            .into_any();
        }
    };
    let config = use_context::<SettingsConfig>().unwrap_or_default();
    let api = HttpProfileApi::new(config.api_base.clone());
    let controller = RwSignal::new(SettingsController::new(config.avatar_max_bytes));
    let tab = RwSignal::new(SettingsTab::Account);
    // Owned by the page so unsaved toggles survive tab switches.
    let prefs = RwSignal::new(PreferencesDraft::default());

    // Fetch whenever the signed-in user id changes.
    let fetch_api = api.clone();
    Effect::new(move |_| {
        let id = auth.user_id();
        if let Some(ticket) = controller.try_update(|c| c.set_user_id(id)).flatten() {
            spawn_fetch(fetch_api.clone(), controller, ticket);
        }
    });
    on_cleanup(move || {
        controller.try_update(SettingsController::teardown);
    });

    let retry_api = api.clone();
    let on_retry = Callback::new(move |()| {
        if let Some(ticket) = controller.try_update(SettingsController::retry_fetch).flatten() {
            spawn_fetch(retry_api.clone(), controller, ticket);
        }
    });

    let on_save = Callback::new(move |()| match controller.try_update(SettingsController::begin_save) {
        Some(Ok(request)) => spawn_save(api.clone(), controller, request),
        Some(Err(e)) => log::warn!("save rejected: {e}"),
        None => {}
    });

    let phase = Memo::new(move |_| controller.with(|c| PagePhase::from_status(c.query().status())));
    let preferences_key = config.preferences_key.clone();
    let load_key = preferences_key.clone();
    Effect::new(move |_| {
        prefs.update(|p| {
            p.load_once(&BrowserStorage, &load_key);
        });
    });
    let avatar_max_bytes = config.avatar_max_bytes;

    view! {
        <main class="settings-page">
            <div class="settings-page__header">
                <h2>"Settings"</h2>
                <p class="settings-page__subtitle">"Manage your account settings and preferences"</p>
            </div>
            {move || match phase.get() {
                PagePhase::Loading => view! { <div class="settings-page__loading">"Loading..."</div> }.into_any(),
                PagePhase::Failed(message) => {
                    view! {
                        <div class="settings-page__error">
                            <p>{message}</p>
                            <button class="btn" on:click=move |_| on_retry.run(())>"Retry"</button>
                        </div>
                    }
                        .into_any()
                }
                PagePhase::Ready => {
                    let preferences_key = preferences_key.clone();
                    view! {
                        <div class="settings-page__body">
                            <nav class="settings-tabs">
                                {SettingsTab::ALL
                                    .into_iter()
                                    .map(|t| {
                                        view! {
                                            <button
                                                class=move || {
                                                    if tab.get() == t { "settings-tabs__tab settings-tabs__tab--active" } else { "settings-tabs__tab" }
                                                }
                                                on:click=move |_| tab.set(t)
                                            >
                                                {t.label()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </nav>
                            <div class="settings-page__content">
                                <Show
                                    when=move || tab.get() == SettingsTab::Account
                                    fallback=move || view! { <NotificationsPanel prefs=prefs storage_key=preferences_key.clone()/> }
                                >
                                    <AccountPanel controller=controller on_save=on_save avatar_max_bytes=avatar_max_bytes/>
                                </Show>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </main>
    }
    .into_any()
}

/// Profile form card.
#[component]
fn AccountPanel(
    controller: RwSignal<SettingsController>,
    on_save: Callback<()>,
    avatar_max_bytes: u64,
) -> impl IntoView {
    let saving = move || controller.with(|c| c.save_state().in_flight());
    let status = move || controller.with(save_status);

    view! {
        <section class="settings-card">
            <h3 class="settings-card__title">"Account Information"</h3>
            <p class="settings-card__description">"Update your account information and profile details."</p>
            <AvatarPicker controller=controller max_bytes=avatar_max_bytes/>
            <div class="settings-card__grid">
                <ProfileInput controller=controller field=FormField::Name label="Name"/>
                <ProfileInput controller=controller field=FormField::Location label="Location"/>
            </div>
            <ProfileInput controller=controller field=FormField::Email label="Email" input_type="email" read_only=true/>
            <ProfileInput controller=controller field=FormField::Role label="Role" read_only=true/>
            <ProfileInput controller=controller field=FormField::VerificationStatus label="Verification Status"/>
            <div class="settings-card__actions">
                <button class="btn btn--primary" disabled=saving on:click=move |_| on_save.run(())>
                    "Save Changes"
                </button>
                <Show when=move || status().is_some()>
                    <span class="settings-card__status">{move || status().unwrap_or_default()}</span>
                </Show>
            </div>
        </section>
    }
}

/// One labeled text input bound to a form field.
#[component]
fn ProfileInput(
    controller: RwSignal<SettingsController>,
    field: FormField,
    label: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] read_only: bool,
) -> impl IntoView {
    view! {
        <div class="settings-field">
            <label class="settings-field__label" for=field.name()>{label}</label>
            <input
                class="settings-field__input"
                id=field.name()
                name=field.name()
                type=input_type.unwrap_or("text")
                disabled=read_only
                prop:value=move || controller.with(|c| c.form().get(field).to_owned())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    controller.update(|c| c.edit(field, value));
                }
            />
        </div>
    }
}

/// Notification preference card persisted to local storage.
#[component]
fn NotificationsPanel(prefs: RwSignal<PreferencesDraft>, storage_key: String) -> impl IntoView {
    let on_save = move |_| prefs.update(|p| p.save(&BrowserStorage, &storage_key));
    let status = move || {
        prefs.with(|p| {
            if p.just_saved() {
                Some("Preferences saved")
            } else if p.is_dirty() {
                Some("Unsaved preferences")
            } else {
                None
            }
        })
    };

    view! {
        <section class="settings-card">
            <h3 class="settings-card__title">"Notification Preferences"</h3>
            <p class="settings-card__description">"Manage how you receive notifications."</p>
            <div class="settings-card__toggles">
                {NotificationKind::ALL
                    .into_iter()
                    .map(|kind| view! { <NotificationToggle kind=kind prefs=prefs/> })
                    .collect_view()}
            </div>
            <div class="settings-card__actions">
                <button class="btn btn--primary" on:click=on_save>"Save Preferences"</button>
                <Show when=move || status().is_some()>
                    <span class="settings-card__status">{move || status().unwrap_or_default()}</span>
                </Show>
            </div>
        </section>
    }
}

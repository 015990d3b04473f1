//! Labeled on/off switch for one notification preference.

use leptos::prelude::*;

use crate::state::notifications::{NotificationKind, PreferencesDraft};

#[component]
pub fn NotificationToggle(kind: NotificationKind, prefs: RwSignal<PreferencesDraft>) -> impl IntoView {
    let enabled = move || prefs.with(|p| p.current().get(kind));

    view! {
        <div class="settings-toggle">
            <div>
                <p class="settings-toggle__title">{kind.title()}</p>
                <p class="settings-toggle__hint">{kind.description()}</p>
            </div>
            <button
                type="button"
                role="switch"
                class=move || {
                    if enabled() { "settings-toggle__switch settings-toggle__switch--on" } else { "settings-toggle__switch" }
                }
                aria-checked=move || if enabled() { "true" } else { "false" }
                on:click=move |_| prefs.update(|p| p.toggle(kind))
            >
                <span class="settings-toggle__knob"></span>
            </button>
        </div>
    }
}

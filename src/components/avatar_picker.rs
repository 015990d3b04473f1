//! Clickable avatar circle backed by a hidden image file input.

#[cfg(test)]
#[path = "avatar_picker_test.rs"]
mod avatar_picker_test;

use leptos::prelude::*;

use crate::state::settings::SettingsController;

const FALLBACK_AVATAR: &str = "/logo.jpg";

fn avatar_src(preview: &str) -> String {
    if preview.is_empty() { FALLBACK_AVATAR.to_owned() } else { preview.to_owned() }
}

fn avatar_hint(max_bytes: u64) -> String {
    format!("JPG, GIF or PNG. Max size of {}K", max_bytes / 1024)
}

/// Avatar preview; clicking opens the file picker and stages the chosen image.
#[component]
pub fn AvatarPicker(controller: RwSignal<SettingsController>, max_bytes: u64) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let on_open = move |_| {
        #[cfg(feature = "hydrate")]
        {
            if let Some(input) = input_ref.get() {
                input.click();
            }
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let files = crate::util::file::selected_files(&input);
            let metas: Vec<_> = files.iter().map(crate::util::file::file_meta).collect();
            // Reset so picking the same file again still fires `change`.
            input.set_value("");

            let Some(ticket) = controller.try_update(|c| c.select_avatar(&metas)).flatten() else {
                return;
            };
            let Some(file) = files.into_iter().next() else {
                return;
            };
            leptos::task::spawn_local(async move {
                let result = crate::util::file::read_data_url(&file, &ticket.mime).await;
                controller.try_update(|c| c.apply_avatar(&ticket, result));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, controller);
        }
    };

    let src = move || controller.with(|c| avatar_src(c.preview_url()));
    let error = move || controller.with(|c| c.avatar_error().map(ToString::to_string));

    view! {
        <div class="avatar-picker">
            <div class="avatar-picker__circle" on:click=on_open>
                <img class="avatar-picker__image" src=src alt="avatar" width="100" height="100"/>
                <input
                    node_ref=input_ref
                    type="file"
                    accept="image/*"
                    class="avatar-picker__input"
                    tabindex="-1"
                    on:change=on_change
                />
                <div class="avatar-picker__overlay">
                    <span>
                        {move || if controller.with(SettingsController::avatar_pending) { "Reading…" } else { "Change" }}
                    </span>
                </div>
            </div>
            <div>
                <p class="avatar-picker__hint">{avatar_hint(max_bytes)}</p>
                <Show when=move || error().is_some()>
                    <p class="avatar-picker__error">{move || error().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}

use std::cell::RefCell;
use std::collections::HashMap;

use futures::executor::block_on;

use super::*;

// =============================================================
// Helpers
// =============================================================

const MAX: u64 = 800 * 1024;

#[derive(Default)]
struct FakeApi {
    profiles: HashMap<String, ProfileEntity>,
    fetches: RefCell<Vec<String>>,
    patches: RefCell<Vec<(String, ProfileForm)>>,
}

impl FakeApi {
    fn with(entity: ProfileEntity) -> Self {
        let mut api = Self::default();
        api.profiles.insert(entity.id.clone().unwrap_or_default(), entity);
        api
    }
}

impl ProfileApi for FakeApi {
    async fn fetch_profile(&self, id: &str) -> Result<ProfileEntity, SettingsError> {
        self.fetches.borrow_mut().push(id.to_owned());
        self.profiles.get(id).cloned().ok_or(SettingsError::Status { status: 404 })
    }

    async fn patch_profile(&self, id: &str, form: &ProfileForm) -> Result<ProfileEntity, SettingsError> {
        self.patches.borrow_mut().push((id.to_owned(), form.clone()));
        Ok(ProfileEntity {
            id: Some(id.to_owned()),
            name: Some(form.name.clone()),
            email: Some(form.email.clone()),
            location: Some(form.location.clone()),
            img_url: Some(form.img_url.clone()),
            legacy_img_url: None,
            role: Some(form.role.clone()),
            verification_status: Some(form.verification_status.clone()),
        })
    }
}

fn ana() -> ProfileEntity {
    ProfileEntity {
        id: Some("u1".to_owned()),
        name: Some("Ana".to_owned()),
        email: Some("a@x.com".to_owned()),
        location: Some(String::new()),
        img_url: Some(String::new()),
        legacy_img_url: None,
        role: Some("admin".to_owned()),
        verification_status: Some("verified".to_owned()),
    }
}

/// Drive `set_user_id` and any resulting fetch to completion.
fn load(ctl: &mut SettingsController, api: &FakeApi, id: Option<&str>) {
    if let Some(ticket) = ctl.set_user_id(id.map(str::to_owned)) {
        let result = block_on(fetch_profile(api, &ticket));
        ctl.apply_fetch(ticket, result);
    }
}

fn png(size: u64) -> FileMeta {
    FileMeta { name: "me.png".to_owned(), mime: "image/png".to_owned(), size }
}

// =============================================================
// Fetch + sync scenarios
// =============================================================

#[test]
fn loading_u1_syncs_form_from_entity() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));

    assert_eq!(
        ctl.form(),
        &ProfileForm {
            name: "Ana".to_owned(),
            email: "a@x.com".to_owned(),
            location: String::new(),
            img_url: String::new(),
            role: "admin".to_owned(),
            verification_status: "verified".to_owned(),
        }
    );
    assert_eq!(ctl.preview_url(), "");
}

#[test]
fn absent_id_never_fetches_and_form_stays_empty() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, None);
    load(&mut ctl, &api, None);

    assert!(api.fetches.borrow().is_empty());
    assert_eq!(ctl.form(), &ProfileForm::default());
    assert!(ctl.query().is_loading());
}

#[test]
fn unchanged_id_is_fetched_once_across_rerenders() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    for _ in 0..3 {
        load(&mut ctl, &api, Some("u1"));
    }
    assert_eq!(*api.fetches.borrow(), vec!["u1".to_owned()]);
}

#[test]
fn legacy_avatar_alias_syncs_into_form_and_preview() {
    let entity = ProfileEntity { img_url: None, legacy_img_url: Some("https://cdn/a.png".to_owned()), ..ana() };
    let api = FakeApi::with(entity);
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));

    assert_eq!(ctl.form().img_url, "https://cdn/a.png");
    assert_eq!(ctl.preview_url(), "https://cdn/a.png");
}

#[test]
fn fetch_failure_surfaces_error_and_retry_refetches() {
    let mut api = FakeApi::default();
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    assert_eq!(ctl.query().error(), Some(&SettingsError::Status { status: 404 }));

    api.profiles.insert("u1".to_owned(), ana());
    let ticket = ctl.retry_fetch().unwrap();
    let result = block_on(fetch_profile(&api, &ticket));
    assert!(ctl.apply_fetch(ticket, result));
    assert_eq!(ctl.form().name, "Ana");
    assert_eq!(api.fetches.borrow().len(), 2);
}

#[test]
fn switching_back_to_cached_user_resyncs_without_fetch() {
    let mut api = FakeApi::with(ana());
    api.profiles
        .insert("u2".to_owned(), ProfileEntity { id: Some("u2".to_owned()), name: Some("Bo".to_owned()), ..ProfileEntity::default() });
    let mut ctl = SettingsController::new(MAX);

    load(&mut ctl, &api, Some("u1"));
    load(&mut ctl, &api, Some("u2"));
    assert_eq!(ctl.form().name, "Bo");

    load(&mut ctl, &api, Some("u1"));
    assert_eq!(ctl.form().name, "Ana");
    assert_eq!(api.fetches.borrow().len(), 2);
}

// =============================================================
// Edits
// =============================================================

#[test]
fn edit_changes_only_that_field() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));

    ctl.edit(FormField::Location, "Lagos".to_owned());

    let expected = ProfileForm { location: "Lagos".to_owned(), ..ProfileForm::from_entity(&ana()) };
    assert_eq!(ctl.form(), &expected);
    assert!(ctl.form_state().is_dirty());
}

// =============================================================
// Avatar
// =============================================================

#[test]
fn selecting_image_stages_same_value_in_preview_and_form() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));

    let ticket = ctl.select_avatar(&[png(3)]).unwrap();
    assert!(ctl.avatar_pending());
    let encoded = crate::state::avatar::encode_data_url(&ticket.mime, b"png");
    ctl.apply_avatar(&ticket, Ok(encoded.clone()));

    assert!(!encoded.is_empty());
    assert_eq!(ctl.preview_url(), encoded);
    assert_eq!(ctl.form().img_url, encoded);
    assert!(!ctl.avatar_pending());
}

#[test]
fn oversized_avatar_is_rejected_with_visible_error() {
    let mut ctl = SettingsController::new(MAX);
    assert!(ctl.select_avatar(&[png(MAX + 1)]).is_none());
    assert_eq!(ctl.avatar_error(), Some(&SettingsError::AvatarTooLarge { size: MAX + 1, max: MAX }));
    assert_eq!(ctl.form().img_url, "");
}

#[test]
fn valid_selection_clears_previous_avatar_error() {
    let mut ctl = SettingsController::new(MAX);
    let _ = ctl.select_avatar(&[png(MAX + 1)]);
    let _ticket = ctl.select_avatar(&[png(1)]).unwrap();
    assert!(ctl.avatar_error().is_none());
}

#[test]
fn avatar_completion_after_teardown_is_dropped() {
    let mut ctl = SettingsController::new(MAX);
    let ticket = ctl.select_avatar(&[png(1)]).unwrap();
    ctl.teardown();
    ctl.apply_avatar(&ticket, Ok("data:image/png;base64,AA==".to_owned()));
    assert_eq!(ctl.preview_url(), "");
}

#[test]
fn avatar_read_failure_is_reported() {
    let mut ctl = SettingsController::new(MAX);
    let ticket = ctl.select_avatar(&[png(1)]).unwrap();
    ctl.apply_avatar(&ticket, Err(SettingsError::FileRead("denied".to_owned())));
    assert_eq!(ctl.avatar_error(), Some(&SettingsError::FileRead("denied".to_owned())));
}

// =============================================================
// Save
// =============================================================

#[test]
fn save_after_editing_location_sends_full_form() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    ctl.edit(FormField::Location, "Lagos".to_owned());

    let request = ctl.begin_save().unwrap();
    let result = block_on(submit_patch(&api, &request));
    assert_eq!(ctl.apply_save(&request, result), None);

    let patches = api.patches.borrow();
    assert_eq!(patches.len(), 1);
    let (id, sent) = &patches[0];
    assert_eq!(id, "u1");
    assert_eq!(sent, &ProfileForm { location: "Lagos".to_owned(), ..ProfileForm::from_entity(&ana()) });
}

#[test]
fn save_response_becomes_synced_state() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    ctl.edit(FormField::Name, "Ana B".to_owned());

    let request = ctl.begin_save().unwrap();
    let result = block_on(submit_patch(&api, &request));
    assert_eq!(ctl.apply_save(&request, result), None);

    assert_eq!(ctl.form().name, "Ana B");
    assert!(!ctl.form_state().is_dirty());
    assert_eq!(ctl.save_state().saved_count(), 1);
    assert_eq!(ctl.query().entity().and_then(|e| e.name.as_deref()), Some("Ana B"));
}

#[test]
fn save_to_entity_id_distinct_from_user_id_resyncs_under_user_key() {
    let mut api = FakeApi::default();
    api.profiles.insert("u1".to_owned(), ProfileEntity { id: Some("cust-9".to_owned()), ..ana() });
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    ctl.edit(FormField::Location, "Lagos".to_owned());

    let request = ctl.begin_save().unwrap();
    assert_eq!(request.key, "u1");
    assert_eq!(request.id, "cust-9");
    let result = block_on(submit_patch(&api, &request));
    assert_eq!(ctl.apply_save(&request, result), None);

    assert_eq!(api.patches.borrow()[0].0, "cust-9");
    assert!(!ctl.form_state().is_dirty());
    assert_eq!(ctl.query().entity().and_then(|e| e.location.as_deref()), Some("Lagos"));

    // Re-render with the same user keeps the saved copy.
    assert_eq!(ctl.set_user_id(Some("u1".to_owned())), None);
    assert_eq!(ctl.form().location, "Lagos");
}

#[test]
fn save_acknowledged_without_profile_keeps_form_and_refetches() {
    let mut api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    ctl.edit(FormField::Location, "Lagos".to_owned());

    let request = ctl.begin_save().unwrap();
    let ack: ProfileEntity = serde_json::from_str(r#"{"message":"Customer updated"}"#).unwrap();
    let refetch = ctl.apply_save(&request, Ok(ack)).expect("refetch after bare ack");

    assert_eq!(refetch.id, "u1");
    assert_eq!(ctl.form().name, "Ana");
    assert_eq!(ctl.form().location, "Lagos");
    assert!(!ctl.form_state().is_dirty());
    assert_eq!(ctl.save_state().saved_count(), 1);
    assert_eq!(ctl.query().entity().and_then(|e| e.id.as_deref()), Some("u1"));

    // The service now holds the saved location.
    api.profiles.insert("u1".to_owned(), ProfileEntity { location: Some("Lagos".to_owned()), ..ana() });
    let result = block_on(fetch_profile(&api, &refetch));
    assert!(ctl.apply_fetch(refetch, result));
    assert_eq!(ctl.form().location, "Lagos");

    ctl.edit(FormField::Name, "Ana B".to_owned());
    assert!(ctl.begin_save().is_ok());
}

#[test]
fn failed_save_keeps_form_and_needs_no_refetch() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));
    ctl.edit(FormField::Location, "Lagos".to_owned());

    let request = ctl.begin_save().unwrap();
    assert_eq!(ctl.apply_save(&request, Err(SettingsError::Status { status: 500 })), None);
    assert_eq!(ctl.form().location, "Lagos");
    assert!(ctl.form_state().is_dirty());
    assert_eq!(ctl.save_state().last_error(), Some(&SettingsError::Status { status: 500 }));
}

#[test]
fn save_before_profile_loaded_fails_fast() {
    let mut ctl = SettingsController::new(MAX);
    assert_eq!(ctl.begin_save(), Err(SettingsError::MissingEntityId));
}

#[test]
fn save_when_entity_has_no_id_fails_fast() {
    let mut api = FakeApi::default();
    api.profiles.insert("u1".to_owned(), ProfileEntity { id: None, ..ana() });
    let mut ctl = SettingsController::new(MAX);

    load(&mut ctl, &api, Some("u1"));
    assert_eq!(ctl.begin_save(), Err(SettingsError::MissingEntityId));
    assert!(api.patches.borrow().is_empty());
}

#[test]
fn duplicate_save_is_rejected_while_in_flight() {
    let api = FakeApi::with(ana());
    let mut ctl = SettingsController::new(MAX);
    load(&mut ctl, &api, Some("u1"));

    let _first = ctl.begin_save().unwrap();
    assert_eq!(ctl.begin_save(), Err(SettingsError::SaveInFlight));
}

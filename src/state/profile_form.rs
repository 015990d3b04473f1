//! Editable projection of the fetched profile.
//!
//! DESIGN
//! ======
//! The form is never the source of truth. Each successful fetch (or save
//! response) replaces it wholesale; between syncs the user may edit any subset
//! of fields. The last synced snapshot is kept so the page can tell whether a
//! sync is about to discard local edits.

#[cfg(test)]
#[path = "profile_form_test.rs"]
mod profile_form_test;

use serde::{Deserialize, Serialize};

use crate::net::types::ProfileEntity;

/// Locally editable profile fields; also the PATCH body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub location: String,
    pub img_url: String,
    pub role: String,
    pub verification_status: String,
}

/// One tracked form field, named after its `<input name=...>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Location,
    ImgUrl,
    Role,
    VerificationStatus,
}

impl FormField {
    pub const ALL: [Self; 6] =
        [Self::Name, Self::Email, Self::Location, Self::ImgUrl, Self::Role, Self::VerificationStatus];

    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Location => "location",
            Self::ImgUrl => "img_url",
            Self::Role => "role",
            Self::VerificationStatus => "verification_status",
        }
    }
}

impl ProfileForm {
    /// Project an entity onto the form; missing values become empty strings.
    pub fn from_entity(entity: &ProfileEntity) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: text(&entity.name),
            email: text(&entity.email),
            location: text(&entity.location),
            img_url: entity.avatar_url().unwrap_or_default().to_owned(),
            role: text(&entity.role),
            verification_status: text(&entity.verification_status),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Location => &self.location,
            FormField::ImgUrl => &self.img_url,
            FormField::Role => &self.role,
            FormField::VerificationStatus => &self.verification_status,
        }
    }

    /// Overwrite exactly one field.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Location => &mut self.location,
            FormField::ImgUrl => &mut self.img_url,
            FormField::Role => &mut self.role,
            FormField::VerificationStatus => &mut self.verification_status,
        };
        *slot = value;
    }
}

/// Form plus avatar preview plus the snapshot they were last synced from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileFormState {
    pub form: ProfileForm,
    /// Image shown in the avatar circle; a URL or a `data:` URL.
    pub preview_url: String,
    synced: ProfileForm,
}

impl ProfileFormState {
    /// Replace form and preview from `entity`. Local edits are discarded.
    pub fn sync(&mut self, entity: &ProfileEntity) {
        let next = ProfileForm::from_entity(entity);
        if self.is_dirty() {
            log::warn!("profile refresh discarded local edits to {:?}", self.dirty_fields());
        }
        self.preview_url.clone_from(&next.img_url);
        self.synced = next.clone();
        self.form = next;
    }

    pub fn edit(&mut self, field: FormField, value: String) {
        self.form.set(field, value);
    }

    /// Treat `saved` as the server's copy without touching the form.
    pub fn accept(&mut self, saved: &ProfileForm) {
        self.synced.clone_from(saved);
    }

    /// Stage an encoded avatar into both the preview and the form.
    pub fn stage_avatar(&mut self, data_url: String) {
        self.form.img_url.clone_from(&data_url);
        self.preview_url = data_url;
    }

    pub fn is_dirty(&self) -> bool {
        self.form != self.synced
    }

    pub fn dirty_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.form.get(*f) != self.synced.get(*f))
            .collect()
    }
}

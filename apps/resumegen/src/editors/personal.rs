use serde::{Deserialize, Serialize};

use crate::models::PersonalInfo;
use crate::store::{ProfileStore, SectionUpdate};

/// One field of the personal-info record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Title,
    Email,
    Phone,
    Location,
    Website,
    Linkedin,
    Github,
}

impl PersonalField {
    fn slot(self, info: &mut PersonalInfo) -> &mut String {
        match self {
            PersonalField::FullName => &mut info.full_name,
            PersonalField::Title => &mut info.title,
            PersonalField::Email => &mut info.email,
            PersonalField::Phone => &mut info.phone,
            PersonalField::Location => &mut info.location,
            PersonalField::Website => &mut info.website,
            PersonalField::Linkedin => &mut info.linkedin,
            PersonalField::Github => &mut info.github,
        }
    }
}

/// Writes one field through the store immediately. Empty values are legal
/// placeholders; there is no validation gate.
pub fn set_field(store: &mut ProfileStore, field: PersonalField, value: &str) {
    let mut info = store.document().personal_info.clone();
    *field.slot(&mut info) = value.to_string();
    store.update(SectionUpdate::PersonalInfo(info));
}

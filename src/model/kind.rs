/// Mimetype tags used by the contacts data table to mark what a row holds.
pub const STRUCTURED_NAME_MIMETYPE: &str = "vnd.android.cursor.item/name";
pub const PHONE_MIMETYPE: &str = "vnd.android.cursor.item/phone_v2";
pub const EMAIL_MIMETYPE: &str = "vnd.android.cursor.item/email_v2";
pub const POSTAL_MIMETYPE: &str = "vnd.android.cursor.item/postal-address_v2";

/// Phone type codes.
pub const PHONE_TYPE_HOME: i64 = 1;
pub const PHONE_TYPE_MOBILE: i64 = 2;
pub const PHONE_TYPE_WORK: i64 = 3;

/// Email type codes.
pub const EMAIL_TYPE_CUSTOM: i64 = 0;
pub const EMAIL_TYPE_HOME: i64 = 1;
pub const EMAIL_TYPE_WORK: i64 = 2;
pub const EMAIL_TYPE_OTHER: i64 = 3;
pub const EMAIL_TYPE_MOBILE: i64 = 4;

/// Postal address type codes.
pub const POSTAL_TYPE_HOME: i64 = 1;
pub const POSTAL_TYPE_WORK: i64 = 2;
pub const POSTAL_TYPE_OTHER: i64 = 3;

/// The kind of contact data a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    StructuredName,
    Phone,
    Email,
    Postal,
}

impl FieldKind {
    /// Parse a row's mimetype tag. Unrecognised tags yield `None`.
    pub fn from_mimetype(mimetype: &str) -> Option<Self> {
        match mimetype {
            STRUCTURED_NAME_MIMETYPE => Some(Self::StructuredName),
            PHONE_MIMETYPE => Some(Self::Phone),
            EMAIL_MIMETYPE => Some(Self::Email),
            POSTAL_MIMETYPE => Some(Self::Postal),
            _ => None,
        }
    }

    pub fn mimetype(self) -> &'static str {
        match self {
            Self::StructuredName => STRUCTURED_NAME_MIMETYPE,
            Self::Phone => PHONE_MIMETYPE,
            Self::Email => EMAIL_MIMETYPE,
            Self::Postal => POSTAL_MIMETYPE,
        }
    }
}

pub fn phone_label(type_code: i64) -> String {
    match type_code {
        PHONE_TYPE_HOME => "home",
        PHONE_TYPE_WORK => "work",
        PHONE_TYPE_MOBILE => "mobile",
        _ => "other",
    }
    .to_string()
}

/// Custom emails take their free-text label, lower-cased; a null label becomes "".
pub fn email_label(type_code: i64, custom_label: Option<&str>) -> String {
    match type_code {
        EMAIL_TYPE_HOME => "home".to_string(),
        EMAIL_TYPE_WORK => "work".to_string(),
        EMAIL_TYPE_MOBILE => "mobile".to_string(),
        EMAIL_TYPE_CUSTOM => custom_label.map(str::to_lowercase).unwrap_or_default(),
        _ => "other".to_string(),
    }
}

pub fn postal_label(type_code: i64) -> String {
    match type_code {
        POSTAL_TYPE_HOME => "home",
        POSTAL_TYPE_WORK => "work",
        POSTAL_TYPE_OTHER => "other",
        _ => "other",
    }
    .to_string()
}

//! Column names of the contacts data table and the fixed projections queried from it.

pub const CONTACT_ID: &str = "contact_id";
pub const SOURCE_ID: &str = "source_id";
pub const MIMETYPE: &str = "mimetype";
pub const DISPLAY_NAME: &str = "display_name";

pub const GIVEN_NAME: &str = "given_name";
pub const MIDDLE_NAME: &str = "middle_name";
pub const FAMILY_NAME: &str = "family_name";

pub const STREET: &str = "street";
pub const CITY: &str = "city";
pub const REGION: &str = "region";
pub const POSTCODE: &str = "postcode";
pub const COUNTRY: &str = "country";
pub const POSTAL_TYPE: &str = "postal_type";
pub const FORMATTED_ADDRESS: &str = "formatted_address";

pub const NUMBER: &str = "number";
pub const PHONE_TYPE: &str = "phone_type";
pub const PHONE_LABEL: &str = "phone_label";

pub const EMAIL_ADDRESS: &str = "email_address";
pub const EMAIL_TYPE: &str = "email_type";
pub const EMAIL_LABEL: &str = "email_label";

/// Columns read for the device owner's profile. No id columns: profile rows
/// fold under the sentinel profile id.
pub const PROFILE_PROJECTION: &[&str] = &[
    MIMETYPE,
    DISPLAY_NAME,
    GIVEN_NAME,
    MIDDLE_NAME,
    FAMILY_NAME,
    STREET,
    CITY,
    REGION,
    POSTCODE,
    COUNTRY,
    POSTAL_TYPE,
    FORMATTED_ADDRESS,
    NUMBER,
    PHONE_TYPE,
    PHONE_LABEL,
    EMAIL_ADDRESS,
    EMAIL_TYPE,
    EMAIL_LABEL,
];

/// Columns read for every other contact: the profile columns plus both ids.
pub const FULL_PROJECTION: &[&str] = &[
    CONTACT_ID,
    SOURCE_ID,
    MIMETYPE,
    DISPLAY_NAME,
    GIVEN_NAME,
    MIDDLE_NAME,
    FAMILY_NAME,
    STREET,
    CITY,
    REGION,
    POSTCODE,
    COUNTRY,
    POSTAL_TYPE,
    FORMATTED_ADDRESS,
    NUMBER,
    PHONE_TYPE,
    PHONE_LABEL,
    EMAIL_ADDRESS,
    EMAIL_TYPE,
    EMAIL_LABEL,
];

/// Every column the data table knows about.
pub const ALL_COLUMNS: &[&str] = FULL_PROJECTION;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_projection_extends_profile_projection_with_ids() {
        assert_eq!(&FULL_PROJECTION[..2], &[CONTACT_ID, SOURCE_ID]);
        assert_eq!(&FULL_PROJECTION[2..], PROFILE_PROJECTION);
    }
}

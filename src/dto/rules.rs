use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::{ValidateUrl, ValidationError};

use crate::{
    domain::catalog::{is_category, is_editable_status},
    entity::sea_orm_active_enums::ArtworkStatus,
};

static SAUDI_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+966|0)[5-9][0-9]{8}$").expect("phone pattern compiles")
});

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn saudi_phone(value: &str) -> Result<(), ValidationError> {
    if SAUDI_PHONE.is_match(value) {
        Ok(())
    } else {
        Err(invalid("phone", "Phone must be a valid Saudi mobile number"))
    }
}

pub fn category(value: &str) -> Result<(), ValidationError> {
    if is_category(value) {
        Ok(())
    } else {
        Err(invalid("category", "Unknown artwork category"))
    }
}

pub fn image_urls(images: &[String]) -> Result<(), ValidationError> {
    if images.iter().all(|url| url.validate_url()) {
        Ok(())
    } else {
        Err(invalid("url", "Every image must be a valid URL"))
    }
}

pub fn editable_status(status: &ArtworkStatus) -> Result<(), ValidationError> {
    if is_editable_status(*status) {
        Ok(())
    } else {
        Err(invalid("status", "Status must be available, pending or sold"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saudi_numbers() {
        assert!(saudi_phone("0551234567").is_ok());
        assert!(saudi_phone("+966551234567").is_ok());
        assert!(saudi_phone("0451234567").is_err());
        assert!(saudi_phone("055123456").is_err());
        assert!(saudi_phone("+96655123456789").is_err());
    }

    #[test]
    fn image_list_must_be_urls() {
        assert!(image_urls(&["https://cdn.test/a.png".to_string()]).is_ok());
        assert!(image_urls(&["not a url".to_string()]).is_err());
    }
}

use crate::entity::sea_orm_active_enums::ArtworkStatus;

/// Artwork categories as `(value, label)`.
pub const CATEGORIES: [(&str, &str); 7] = [
    ("painting", "Painting"),
    ("sculpture", "Sculpture"),
    ("photography", "Photography"),
    ("digital_art", "Digital Art"),
    ("traditional_art", "Traditional Art"),
    ("calligraphy", "Calligraphy"),
    ("mixed_media", "Mixed Media"),
];

pub fn is_category(value: &str) -> bool {
    CATEGORIES.iter().any(|(v, _)| *v == value)
}

/// Statuses an artist or admin may set directly. `Deleted` only comes from a
/// soft delete.
pub fn is_editable_status(status: ArtworkStatus) -> bool {
    matches!(
        status,
        ArtworkStatus::Available | ArtworkStatus::Pending | ArtworkStatus::Sold
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories() {
        assert!(is_category("calligraphy"));
        assert!(is_category("digital_art"));
        assert!(!is_category("Digital Art"));
        assert!(!is_category("pottery"));
    }

    #[test]
    fn deleted_is_not_editable() {
        assert!(is_editable_status(ArtworkStatus::Sold));
        assert!(!is_editable_status(ArtworkStatus::Deleted));
    }
}

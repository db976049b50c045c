use super::entity::Category;
use crate::domain::{validate_display_name, DomainResult};

/// Validates all Category invariants
///
/// Name uniqueness is a store-wide rule and is checked by the catalog
/// service against the repository, not here.
pub fn validate_category(category: &Category) -> DomainResult<()> {
    validate_display_name("Category", &category.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_category() {
        let category = Category::new("Chest".to_string());
        assert!(validate_category(&category).is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let category = Category::new("   ".to_string());
        assert!(validate_category(&category).is_err());
    }

    #[test]
    fn test_name_is_trimmed() {
        let category = Category::new("  Legs ".to_string());
        assert_eq!(category.name, "Legs");
    }
}

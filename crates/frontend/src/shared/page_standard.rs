//! Page category constants shared by every portal page.
//!
//! Every page declares:
//!   - HTML `id` in the format `{portal}_{section}--{category}` (e.g. `"admin_users--system"`)
//!   - `data-page-category` with one of the constants below

/// Paginated records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Role and access administration.
pub const PAGE_CAT_SYSTEM: &str = "system";

/// Landing and fallback pages, exempt from structural checks.
pub const PAGE_CAT_CUSTOM: &str = "custom";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_SYSTEM, PAGE_CAT_CUSTOM];

/// Build a page id from its entity and category.
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{entity}--{category}")
}

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

/// Return true if the category value is recognised.
pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

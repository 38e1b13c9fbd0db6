//! Fixed category priority table
//!
//! Courses the kitchen should fire first sort first. Unknown categories
//! sort after every known one.

/// Known categories in course order
pub const CATEGORY_ORDER: &[&str] = &[
    "Starters", "Salads", "Pizza", "Burgers", "Pasta", "Mains", "Sides", "Desserts", "Drinks",
];

/// Priority rank for a category (lower fires first), case-insensitive
pub fn category_priority(category: &str) -> usize {
    CATEGORY_ORDER
        .iter()
        .position(|c| c.eq_ignore_ascii_case(category.trim()))
        .unwrap_or(CATEGORY_ORDER.len())
}

/// Compare two categories by priority, then name for unknowns
pub fn compare_categories(a: &str, b: &str) -> std::cmp::Ordering {
    category_priority(a)
        .cmp(&category_priority(b))
        .then_with(|| a.cmp(b))
}

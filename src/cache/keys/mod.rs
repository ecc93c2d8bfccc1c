/// Cache key module
/// Key generators for every cached content family

pub mod blog_keys;
pub mod catalog_keys;
pub mod settings_keys;

pub use blog_keys::BLOG_PATTERN;
pub use catalog_keys::{PROJECTS_PATTERN, SERVICES_PATTERN};
pub use settings_keys::SETTINGS_PATTERN;

/// Invalidation pattern for a content family name such as `"blog"`.
pub fn family_pattern(family: &str) -> Option<&'static str> {
    match family {
        "blog" => Some(BLOG_PATTERN),
        "services" => Some(SERVICES_PATTERN),
        "projects" => Some(PROJECTS_PATTERN),
        "settings" => Some(SETTINGS_PATTERN),
        _ => None,
    }
}

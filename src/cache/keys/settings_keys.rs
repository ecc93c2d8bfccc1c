pub const THEME_SETTINGS_KEY: &str = "settings:theme";
pub const GENERAL_SETTINGS_KEY: &str = "settings:general";
pub const COMPANY_SETTINGS_KEY: &str = "settings:company";

/// Any settings change invalidates all three
pub const SETTINGS_PATTERN: &str = "settings:*";

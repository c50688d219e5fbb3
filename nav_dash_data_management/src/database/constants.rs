pub const SETTINGS_TABLE_NAME: &str = "Settings";
pub const KEY: &str = "key";
pub const VALUE: &str = "value";

// Well-known record keys. Values are plain JSON strings, no schema
// versioning.
pub const FAVORITES_KEY: &str = "favorites";
pub const THEME_KEY: &str = "theme";
pub const MAP_TYPE_KEY: &str = "map_type";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

use serde::{Deserialize, Serialize};

/// Configuration for the recipes module (`modules.recipes` in the app config).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipesConfig {
    #[serde(default = "default_min_cooking_time")]
    pub min_cooking_time: i32,
    #[serde(default = "default_max_cooking_time")]
    pub max_cooking_time: i32,
    #[serde(default = "default_max_recipe_name_length")]
    pub max_recipe_name_length: usize,
    /// Upper bound for a decoded recipe image.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Prefix for rendered image references.
    #[serde(default = "default_media_url")]
    pub media_url: String,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            min_cooking_time: default_min_cooking_time(),
            max_cooking_time: default_max_cooking_time(),
            max_recipe_name_length: default_max_recipe_name_length(),
            max_image_bytes: default_max_image_bytes(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            media_url: default_media_url(),
        }
    }
}

fn default_min_cooking_time() -> i32 {
    1
}

fn default_max_cooking_time() -> i32 {
    32_000
}

fn default_max_recipe_name_length() -> usize {
    200
}

fn default_max_image_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_page_size() -> u64 {
    6
}

fn default_max_page_size() -> u64 {
    100
}

fn default_media_url() -> String {
    "/media".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: RecipesConfig =
            serde_json::from_value(serde_json::json!({ "default_page_size": 12 })).unwrap();
        assert_eq!(cfg.default_page_size, 12);
        assert_eq!(cfg.max_page_size, 100);
        assert_eq!(cfg.max_cooking_time, 32_000);
        assert_eq!(cfg.media_url, "/media");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<RecipesConfig, _> =
            serde_json::from_value(serde_json::json!({ "page_size": 12 }));
        assert!(parsed.is_err());
    }
}

//! Project-wide settings shared by every generator.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Project context, usually loaded from a `yip.toml` file:
///
/// ```toml
/// name = "Demo"
/// android_package = "com.example.demo"
/// ios_class_prefix = "DM"
///
/// [translations]
/// "Sign in" = "Anmelden"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Project name, used for output directories.
    #[serde(default = "default_name")]
    pub name: String,

    /// Java package of the generated Android classes.
    #[serde(default = "default_package")]
    pub android_package: String,

    /// Prefix for generated Objective-C class names.
    #[serde(default)]
    pub ios_class_prefix: String,

    /// Source text to translated text.
    #[serde(default)]
    pub translations: IndexMap<String, String>,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            name: default_name(),
            android_package: default_package(),
            ios_class_prefix: String::new(),
            translations: IndexMap::new(),
        }
    }
}

fn default_name() -> String {
    "App".to_string()
}

fn default_package() -> String {
    "com.example.app".to_string()
}

impl ProjectContext {
    /// Load a context from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Translated text, or `text` itself when there is no translation.
    pub fn translate<'a>(&'a self, text: &'a str) -> &'a str {
        self.translations.get(text).map_or(text, String::as_str)
    }

    /// Directory of the Android package, e.g. `com/example/app`.
    pub fn android_package_dir(&self) -> String {
        self.android_package.replace('.', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_for_missing_keys() {
        let context = ProjectContext::from_toml("name = \"Demo\"").unwrap();
        assert_eq!(context.name, "Demo");
        assert_eq!(context.android_package, "com.example.app");
        assert!(context.translations.is_empty());
    }

    #[test]
    fn test_translate_falls_back_to_source() {
        let context = ProjectContext::from_toml("[translations]\n\"Sign in\" = \"Anmelden\"").unwrap();
        assert_eq!(context.translate("Sign in"), "Anmelden");
        assert_eq!(context.translate("Cancel"), "Cancel");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "android_package = \"org.demo\"\nios_class_prefix = \"DM\"").unwrap();
        let context = ProjectContext::load(file.path()).unwrap();
        assert_eq!(context.android_package_dir(), "org/demo");
        assert_eq!(context.ios_class_prefix, "DM");
    }

    #[test]
    fn test_invalid_config() {
        assert!(ProjectContext::from_toml("name = 3").is_err());
    }
}

// File: src/config.rs
// Purpose: Site configuration parsing from vitrine.toml with environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// Prefix inserted between the base path and asset paths
    #[serde(default)]
    pub doc_root: String,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub company: CompanyConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

/// Public identity of the site, used in page metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    #[serde(default = "default_site_url")]
    pub url: String,

    #[serde(default = "default_tagline")]
    pub slogan: String,

    #[serde(default = "default_tagline")]
    pub description: String,

    /// Image name (without extension) used for social sharing cards
    #[serde(default = "default_social_img")]
    pub social_img_name: String,

    #[serde(default = "default_designer")]
    pub designer: String,
}

/// Company details printed in the footer and on the contact page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyConfig {
    #[serde(default = "default_company_name")]
    pub name: String,

    #[serde(default = "default_company_address")]
    pub address: String,
}

/// Vite integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Dev server origin used when `debug` is on
    #[serde(default = "default_dev_server")]
    pub dev_server: String,

    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Default entry point
    #[serde(default = "default_entry")]
    pub entry: String,
}

/// Static build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// Default values
fn default_env() -> String {
    "production".to_string()
}

fn default_locale() -> String {
    "fr_FR".to_string()
}

fn default_site_name() -> String {
    "example".to_string()
}

fn default_tagline() -> String {
    "Example".to_string()
}

fn default_site_url() -> String {
    "https://www.example.test".to_string()
}

fn default_social_img() -> String {
    "social-share".to_string()
}

fn default_designer() -> String {
    "Designer".to_string()
}

fn default_company_name() -> String {
    "Example Corp.".to_string()
}

fn default_company_address() -> String {
    "123 rue Azerty-Jean - 01234 Ville".to_string()
}

fn default_dev_server() -> String {
    "http://localhost:5173".to_string()
}

fn default_manifest_path() -> String {
    "public/assets/.vite/manifest.json".to_string()
}

fn default_entry() -> String {
    "resources/js/main.js".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

// Default implementations
impl Default for Config {
    fn default() -> Self {
        Self {
            env: default_env(),
            debug: false,
            locale: default_locale(),
            doc_root: String::new(),
            site: SiteConfig::default(),
            company: CompanyConfig::default(),
            assets: AssetsConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            slogan: default_tagline(),
            description: default_tagline(),
            social_img_name: default_social_img(),
            designer: default_designer(),
        }
    }
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            address: default_company_address(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dev_server: default_dev_server(),
            manifest_path: default_manifest_path(),
            entry: default_entry(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply `APP_ENV`, `APP_DEBUG`, `APP_DOMAIN` and `DOC_ROOT`
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(env) = lookup("APP_ENV").filter(|v| !v.is_empty()) {
            self.env = env;
        }
        if let Some(debug) = lookup("APP_DEBUG") {
            self.debug = debug == "true";
        }
        if let Some(domain) = lookup("APP_DOMAIN").filter(|v| !v.is_empty()) {
            self.site.url = format!("http://{}", domain);
        }
        if let Some(root) = lookup("DOC_ROOT") {
            self.doc_root = root;
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// `fr_FR` -> `fr`, for the `lang` attribute
    pub fn language(&self) -> &str {
        self.locale.split(['_', '-']).next().unwrap_or(&self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.env, "production");
        assert!(!config.debug);
        assert_eq!(config.locale, "fr_FR");
        assert_eq!(config.language(), "fr");
        assert_eq!(config.site.url, "https://www.example.test");
        assert_eq!(config.company.name, "Example Corp.");
        assert_eq!(config.assets.dev_server, "http://localhost:5173");
        assert_eq!(config.build.output_dir, "dist");
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.env, "production");
        assert_eq!(config.assets.entry, "resources/js/main.js");
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            debug = true
            locale = "en_GB"

            [site]
            name = "Atelier"
            slogan = "Handmade furniture"

            [company]
            address = "1 High Street"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.debug);
        assert_eq!(config.language(), "en");
        assert_eq!(config.site.name, "Atelier");
        assert_eq!(config.site.slogan, "Handmade furniture");
        assert_eq!(config.site.url, "https://www.example.test");
        assert_eq!(config.company.name, "Example Corp.");
        assert_eq!(config.company.address, "1 High Street");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("APP_ENV", "local"),
            ("APP_DEBUG", "true"),
            ("APP_DOMAIN", "atelier.localhost"),
            ("DOC_ROOT", "public/"),
        ]);
        let mut config = Config::default();
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.env, "local");
        assert!(!config.is_production());
        assert!(config.debug);
        assert_eq!(config.site.url, "http://atelier.localhost");
        assert_eq!(config.doc_root, "public/");
    }

    #[test]
    fn test_env_debug_must_be_literal_true() {
        let mut config = Config::default();
        config.debug = true;
        config.apply_env_from(|key| (key == "APP_DEBUG").then(|| "1".to_string()));
        assert!(!config.debug);

        // Empty values leave the defaults alone
        let mut config = Config::default();
        config.apply_env_from(|key| (key != "APP_DEBUG").then(String::new));
        assert_eq!(config.env, "production");
        assert_eq!(config.site.url, "https://www.example.test");
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load(dir.path().join("vitrine.toml")).unwrap();
        assert_eq!(missing.env, "production");

        let path = dir.path().join("empty.toml");
        fs::write(&path, "   \n").unwrap();
        assert_eq!(Config::load(&path).unwrap().locale, "fr_FR");

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "debug = [").unwrap();
        let err = Config::load(&bad).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}

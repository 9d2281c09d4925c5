// File: src/assets.rs
// Purpose: Asset URLs and Vite script/stylesheet tags

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use maud::{html, Markup};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Public URL of a static asset: `base_path + doc_root + path`
pub fn asset(base_path: &str, doc_root: &str, path: &str) -> String {
    format!("{}{}{}", base_path, doc_root, path.trim_matches('/'))
}

/// One entry of Vite's `manifest.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestChunk {
    pub file: String,
    #[serde(default)]
    pub css: Vec<String>,
}

/// Build manifest mapping source entry points to hashed output files
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    chunks: HashMap<String, ManifestChunk>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read Vite manifest: {:?}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse Vite manifest: {:?}", path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn chunk(&self, entry: &str) -> Option<&ManifestChunk> {
        self.chunks.get(entry)
    }

    /// Tags for a built entry point
    pub fn tags(&self, entry: &str, no_js: bool) -> Result<Markup> {
        let chunk = self
            .chunk(entry)
            .ok_or_else(|| anyhow!("Entry {:?} not found in Vite manifest", entry))?;
        let css = chunk
            .css
            .first()
            .ok_or_else(|| anyhow!("Entry {:?} has no stylesheet in Vite manifest", entry))?;

        Ok(html! {
            @if !no_js {
                script type="module" src={ "/assets/" (chunk.file) } {}
            }
            link rel="stylesheet" href={ "/assets/" (css) };
        })
    }
}

/// Tags pointing at the Vite dev server.
///
/// `push` leaves out the `@vite/client` script for fragments added to a
/// page that already loaded it.
pub fn dev_server_tags(dev_server: &str, entry: &str, push: bool) -> Markup {
    let origin = dev_server.trim_end_matches('/');
    html! {
        @if !push {
            script type="module" src={ (origin) "/assets/@vite/client" } {}
        }
        script type="module" src={ (origin) "/assets/" (entry) } {}
    }
}

/// Script and stylesheet tags for `entry` (the configured entry when None).
///
/// In debug mode the tags point at the Vite dev server; otherwise the
/// manifest under `app_root` is read to find the built files.
pub fn vite_assets(
    config: &Config,
    app_root: &Path,
    entry: Option<&str>,
    no_js: bool,
    push: bool,
) -> Result<Markup> {
    let entry = entry.unwrap_or(&config.assets.entry);

    if config.debug {
        debug!(entry, "Serving assets from Vite dev server");
        return Ok(dev_server_tags(&config.assets.dev_server, entry, push));
    }

    let manifest = Manifest::load(app_root.join(&config.assets.manifest_path))?;
    manifest.tags(entry, no_js)
}

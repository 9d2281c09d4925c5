use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use vitrine::pages::{contact_page, home_page};
use vitrine::{vite_assets, Config, FormContext};

/// Render every page into `out` and return the written files
pub fn execute(config: &Config, root: &Path, out: &Path) -> Result<Vec<PathBuf>> {
    println!("{}", "Building site...".green().bold());
    println!("Env: {}", config.env.cyan());
    println!("Output: {}", out.display().to_string().cyan());
    println!();

    let assets = vite_assets(config, root, None, false, false)?;

    let pages = [
        ("index.html", home_page(config, &assets)),
        ("contact/index.html", contact_page(config, &assets, &FormContext::empty())),
    ];

    let mut written = Vec::with_capacity(pages.len());
    for (file, markup) in pages {
        let path = out.join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        fs::write(&path, markup.into_string())
            .with_context(|| format!("Failed to write page: {:?}", path))?;

        info!("Wrote {:?}", path);
        println!("  {} {}", "✓".green(), file);
        written.push(path);
    }

    println!();
    println!("{}", "Build complete".green().bold());
    Ok(written)
}

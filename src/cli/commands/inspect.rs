//! Inspect command implementation
//!
//! Collects a document and prints where every leaf and caption would be
//! written. Visibility is never touched and nothing is encoded.

use super::{open_document, resolve_manifest, EXIT_ABORTED, EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use crate::adapters::document::LayerTree;
use crate::adapters::encoder::{CommandEncoder, CompositeEncoder};
use crate::config::load_config_or_default;
use crate::config::schema::FormatPreference;
use crate::core::collect::{duplicate_targets, irregular_targets, TreeCollector};
use crate::core::export::check_base_layer;
use crate::domain::records::{CaptionRecord, CollectionResult, LeafRecord};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug, Default)]
pub struct InspectArgs {
    /// Document manifest to inspect (overrides document.manifest)
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Output format used for target names (auto, jpg, png)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FormatPreference>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Plan<'a> {
    document: &'a str,
    leaves: &'a [LeafRecord],
    captions: &'a [CaptionRecord],
    partial: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let manifest = resolve_manifest(self.manifest.as_deref(), &config);
        let document = match open_document(manifest.as_deref()) {
            Ok(Some(document)) => document,
            Ok(None) => {
                eprintln!("❌ No document given; use --manifest or document.manifest");
                return Ok(EXIT_ABORTED);
            }
            Err(e) => {
                eprintln!("Failed to open document: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if let Err(reason) = check_base_layer(&document) {
            eprintln!("❌ {reason}");
            return Ok(EXIT_ABORTED);
        }

        let format = self.format.unwrap_or(config.export.format).resolve(|| {
            CommandEncoder::new(config.encoder.program.clone(), Vec::new()).supports_jpeg()
        });
        let output_root = config
            .document
            .output_dir
            .clone()
            .unwrap_or_else(|| document.base_dir().to_path_buf());
        let collection = TreeCollector::new(output_root, format).collect(&document);

        if self.json {
            let plan = Plan {
                document: document.name(),
                leaves: &collection.leaves,
                captions: &collection.captions,
                partial: collection.is_partial(),
            };
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(document.name(), &collection);
        }

        Ok(EXIT_OK)
    }
}

fn print_plan(name: &str, collection: &CollectionResult) {
    println!("📄 Document: {name}");
    println!();
    println!("Leaves ({}):", collection.leaves.len());
    for leaf in &collection.leaves {
        let caption = if leaf.caption.is_some() { " [caption]" } else { "" };
        println!("  {} -> {}{}", leaf.name, leaf.output_path.display(), caption);
    }
    println!();
    println!("Captions ({}):", collection.captions.len());
    for caption in &collection.captions {
        println!("  {} -> {}", caption.name, caption.output_path.display());
    }

    let duplicates = duplicate_targets(&collection.leaves);
    if !duplicates.is_empty() {
        println!();
        println!("⚠️  Targets written more than once:");
        for path in duplicates {
            println!("  - {}", path.display());
        }
    }
    let irregular = irregular_targets(collection);
    if !irregular.is_empty() {
        println!();
        println!("⚠️  Targets outside their group folder (empty or dot group names):");
        for path in irregular {
            println!("  - {}", path.display());
        }
    }
    if let Some(error) = &collection.interrupted {
        println!();
        println!("⚠️  Collection stopped early: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "name": "hero",
        "layers": [
            { "type": "group", "name": "Body", "children": [
                { "type": "layer", "name": "Arm" }
            ]},
            { "type": "layer", "name": "Background", "background": true }
        ]
    }"#;

    #[test]
    fn test_inspect_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hero.json");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(MANIFEST.as_bytes())
            .unwrap();

        let args = InspectArgs {
            manifest: Some(path),
            format: Some(FormatPreference::Png),
            json: true,
        };
        let code = args
            .execute(temp.path().join("absent.toml").to_str().unwrap())
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }

    #[test]
    fn test_inspect_without_document() {
        let temp = TempDir::new().unwrap();
        let args = InspectArgs::default();
        let code = args
            .execute(temp.path().join("absent.toml").to_str().unwrap())
            .unwrap();
        assert_eq!(code, EXIT_ABORTED);
    }
}

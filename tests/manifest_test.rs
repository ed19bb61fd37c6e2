//! Integration tests: manifest documents on disk through a real run

mod common;

use common::RecordingEncoder;
use leafex::adapters::document::{LayerTree, ManifestDocument};
use leafex::adapters::fs::LocalFileSystem;
use leafex::core::export::{ExportRunner, RunOptions, RunState};
use leafex::domain::{EncodeOptions, ImageFormat};
use std::fs;
use tempfile::TempDir;

const HERO: &str = r#"{
  "name": "hero.psd",
  "layers": [
    { "type": "group", "name": "Body", "children": [
      { "type": "layer", "name": "Arm" },
      { "type": "layer", "name": "Arm", "kind": "text", "text": "Left arm", "visible": false },
      { "type": "group", "name": "Head", "children": [
        { "type": "layer", "name": "Eyes", "kind": "smart_object", "visible": false },
        { "type": "layer", "name": "Eyes", "kind": "text", "text": "Blue" }
      ]}
    ]},
    { "type": "group", "name": "Bad/Name?", "children": [
      { "type": "layer", "name": "a:b" }
    ]},
    { "type": "layer", "name": "Background", "background": true }
  ]
}"#;

fn write_manifest(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("hero.json");
    fs::write(&path, HERO).unwrap();
    path
}

#[test]
fn test_loaded_manifest_exports_under_its_directory() {
    let temp = TempDir::new().unwrap();
    let mut doc = ManifestDocument::load(write_manifest(&temp)).unwrap();
    assert_eq!(doc.name(), "hero.psd");
    assert_eq!(doc.base_dir(), temp.path());

    let mut encoder = RecordingEncoder::new();
    let mut fs = LocalFileSystem;
    let mut runner = ExportRunner::new(
        RunOptions::new(EncodeOptions::new(ImageFormat::Png)).with_captions(true),
    );
    let summary = runner.run(Some(&mut doc), &mut encoder, &mut fs, None);

    assert_eq!(summary.final_state, RunState::Done);
    assert_eq!(summary.document, "hero.psd");
    assert_eq!(summary.successful_exports, 3);

    let targets: Vec<_> = encoder.calls.iter().map(|call| call.path.clone()).collect();
    assert_eq!(
        targets,
        vec![
            temp.path().join("Bad_Name_").join("a_b.png"),
            temp.path().join("Body").join("Arm.png"),
            temp.path().join("Body").join("Head").join("Eyes.png"),
        ]
    );
    // Directories were created even though the encoder wrote nothing
    assert!(temp.path().join("Body").join("Head").is_dir());
    assert!(temp.path().join("Bad_Name_").is_dir());

    assert_eq!(
        fs::read_to_string(temp.path().join("Body").join("Arm.txt")).unwrap(),
        "Left arm"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("Body_Head").join("Eyes.txt")).unwrap(),
        "Blue"
    );
}

#[test]
fn test_saved_manifest_keeps_visibility_after_run() {
    let temp = TempDir::new().unwrap();
    let manifest_path = write_manifest(&temp);
    let mut doc = ManifestDocument::load(&manifest_path).unwrap();
    let before = doc.visibility_snapshot();

    let mut encoder = RecordingEncoder::new();
    let mut fs = LocalFileSystem;
    ExportRunner::new(RunOptions::new(EncodeOptions::new(ImageFormat::Jpeg)))
        .run(Some(&mut doc), &mut encoder, &mut fs, None);

    let saved = temp.path().join("after.json");
    doc.save(&saved).unwrap();
    let reloaded = ManifestDocument::load(&saved).unwrap();
    assert_eq!(reloaded.visibility_snapshot(), before);
    assert_eq!(reloaded.to_manifest(), doc.to_manifest());
}

#[test]
fn test_report_written_next_to_output() {
    let temp = TempDir::new().unwrap();
    let mut doc = ManifestDocument::load(write_manifest(&temp)).unwrap();

    let mut encoder = RecordingEncoder::new().failing_on("Arm.png");
    let mut fs = LocalFileSystem;
    let summary = ExportRunner::new(RunOptions::new(EncodeOptions::new(ImageFormat::Png)))
        .run(Some(&mut doc), &mut encoder, &mut fs, None);

    let report_path = temp.path().join("reports").join("run.json");
    summary.write_report(&report_path).unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["document"], "hero.psd");
    assert_eq!(report["successful_exports"], 2);
    assert_eq!(report["failed_exports"], 1);
    assert_eq!(report["final_state"]["state"], "done");
    assert_eq!(report["errors"][0]["error_type"], "encode");
}

#[test]
fn test_invalid_manifests_are_rejected() {
    let temp = TempDir::new().unwrap();

    let nested_background = temp.path().join("nested.json");
    fs::write(
        &nested_background,
        r#"{"layers":[{"type":"group","name":"G","children":[
            {"type":"layer","name":"Background","background":true}]}]}"#,
    )
    .unwrap();
    assert!(ManifestDocument::load(&nested_background).is_err());

    let not_json = temp.path().join("broken.json");
    fs::write(&not_json, "{ layers: ").unwrap();
    assert!(ManifestDocument::load(&not_json).is_err());

    assert!(ManifestDocument::load(temp.path().join("missing.json")).is_err());
}

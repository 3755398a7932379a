//! End-to-end build tests
//!
//! Runs the full pipeline over the DXN/ZRH fixture and compares the
//! generated files with known-good artifacts.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use token_core::{resolve, Registry, Theme, TokenDocument};
use token_emit::{EmitOptions, TargetCatalog};
use token_output::{FsWriter, OutputConfig};
use token_pipeline::{BuildConfig, Pipeline, PipelineError};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

async fn fixture_config(build_path: &Path) -> BuildConfig {
    let mut config = BuildConfig::load(fixtures().join("token-config.json"))
        .await
        .unwrap();
    config.apply_source_prefix(fixtures());
    config.build_path = build_path.to_path_buf();
    config
}

fn read(path: impl AsRef<Path>) -> String {
    std::fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.as_ref().display(), e))
}

#[tokio::test]
async fn test_full_build_writes_every_pair() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path()).await;

    let report = Pipeline::from_config(config).run_from_config().await.unwrap();

    assert!(report.is_success(), "failures: {:?}", report.failures);
    // 2 themes x 9 targets
    assert_eq!(report.artifacts.len(), 18);

    for theme in ["dxn-default", "zrh-default"] {
        for file in [
            "ios/tokens.h",
            "ios/StyleDictionaryColor.h",
            "ios/StyleDictionaryColor.m",
            "ios-swift/StyleDictionaryColor.swift",
            "ios-swift/StyleDictionary+Struct.swift",
            "compose/StyleDictionaryColor.kt",
            "css/tokens.css",
            "js/tokens.ts",
            "json/tokens.json",
        ] {
            assert!(dir.path().join(theme).join(file).exists(), "{}/{} missing", theme, file);
        }
    }
}

#[tokio::test]
async fn test_artifacts_match_known_good_output() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path()).await;
    Pipeline::from_config(config).run_from_config().await.unwrap();

    let expected = fixtures().join("expected");
    for file in [
        "zrh-default/ios/tokens.h",
        "zrh-default/ios/StyleDictionaryColor.h",
        "zrh-default/compose/StyleDictionaryColor.kt",
        "zrh-default/ios-swift/StyleDictionary+Struct.swift",
        "dxn-default/ios-swift/StyleDictionaryColor.swift",
    ] {
        assert_eq!(
            read(dir.path().join(file)),
            read(expected.join(file)),
            "{} differs from the known-good artifact",
            file
        );
    }
}

#[tokio::test]
async fn test_rebuild_is_byte_identical() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let report_a = Pipeline::from_config(fixture_config(first.path()).await)
        .run_from_config()
        .await
        .unwrap();
    let report_b = Pipeline::from_config(fixture_config(second.path()).await)
        .run_from_config()
        .await
        .unwrap();

    assert_eq!(report_a.artifacts.len(), report_b.artifacts.len());
    for (a, b) in report_a.artifacts.iter().zip(&report_b.artifacts) {
        assert_eq!((&a.theme, &a.target), (&b.theme, &b.target));
        assert_eq!(std::fs::read(&a.path).unwrap(), std::fs::read(&b.path).unwrap());
    }
}

#[tokio::test]
async fn test_dxn_overrides_reach_aliases_and_keep_order() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path()).await;
    Pipeline::from_config(config).run_from_config().await.unwrap();

    let macros = read(dir.path().join("dxn-default/ios/tokens.h"));
    assert!(macros.contains(
        "#define NeutralsBlack [UIColor colorWithRed:0.000f green:0.000f blue:0.000f alpha:1.000f]\n"
    ));
    assert!(macros.contains(
        "#define Primary01 [UIColor colorWithRed:0.078f green:0.082f blue:0.980f alpha:1.000f]\n"
    ));
    assert!(macros.contains("#define SystemVariantSwitcher DXN\n"));
    assert!(macros.ends_with(
        "#define CornersCornerRadiusS 6\n\
         #define CornersCornerRadiusM 12\n\
         #define CornersCornerRadiusL 24\n\
         #define CornersCornerRadiusRound 999\n"
    ));

    // Overriding Primary01 must not move it within the enum
    let dxn_header = read(dir.path().join("dxn-default/ios/StyleDictionaryColor.h"));
    let zrh_header = read(dir.path().join("zrh-default/ios/StyleDictionaryColor.h"));
    assert_eq!(dxn_header, zrh_header);
}

#[test]
fn test_enum_lists_every_color_once_in_declaration_order() {
    let raw = read(fixtures().join("design-tokens.json"));
    let doc = TokenDocument::parse(&raw).unwrap();
    let registry = Registry::load(doc.set("global").unwrap()).unwrap();
    let theme = Theme::from_set("dxn-default", doc.set("Themes/DXN").unwrap()).unwrap();
    let resolved = resolve(&registry, &theme).unwrap();

    let color_names: Vec<&str> = resolved.colors().map(|(t, _)| t.name.as_str()).collect();
    assert_eq!(color_names.len(), 42);
    assert_eq!(color_names.first(), Some(&"NeutralsBlack"));
    assert_eq!(color_names.last(), Some(&"EffectsGlowSecondary09"));

    let catalog = TargetCatalog::standard(&EmitOptions::default());
    let header = token_emit::emit(&resolved, catalog.get("ios/colors.h").unwrap()).unwrap();
    let body = header
        .split_once("StyleDictionaryColorName) {\n")
        .and_then(|(_, rest)| rest.split_once("\n};"))
        .map(|(body, _)| body)
        .unwrap();
    assert_eq!(body.split(",\n").collect::<Vec<_>>(), color_names);
}

#[tokio::test]
async fn test_theme_filter_builds_only_selected_theme() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture_config(dir.path()).await;
    config.only_themes = vec!["zrh-default".to_string()];
    config.platforms = vec!["compose".to_string()];

    let report = Pipeline::from_config(config).run_from_config().await.unwrap();

    assert_eq!(report.artifacts.len(), 1);
    assert_eq!(report.artifacts[0].theme, "zrh-default");
    assert!(!dir.path().join("dxn-default").exists());
}

#[tokio::test]
async fn test_cyclic_source_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = BuildConfig {
        build_path: dir.path().to_path_buf(),
        platforms: vec!["ios".to_string()],
        ..Default::default()
    };
    let catalog = TargetCatalog::standard(&config.emit_options());
    let sink = Arc::new(FsWriter::new(OutputConfig::new(dir.path())));

    let source = r##"{
        "global": {
            "$type": "color",
            "A": { "$value": "{B}" },
            "B": { "$value": "{A}" }
        }
    }"##;

    let result = Pipeline::new(config, catalog, sink).run(source).await;
    assert!(matches!(result, Err(PipelineError::Token(_))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_source_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = BuildConfig {
        input_file: dir.path().join("missing.json"),
        build_path: dir.path().join("build"),
        ..Default::default()
    };

    let result = Pipeline::from_config(config).run_from_config().await;
    assert!(matches!(result, Err(PipelineError::Source { .. })));
}

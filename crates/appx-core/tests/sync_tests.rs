//! End-to-end tests for the project sync orchestrator.

use std::fs;
use std::path::PathBuf;

use appx_core::project::ProjectDocument;
use appx_core::{AppConfig, Error, ImageResource, ImageSet, ProjectHandle, ProjectSync, TemplateKind};
use tempfile::TempDir;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Package>
    <Identity Name="OldPackage" Version="1.0.0.0" />
    <Properties>
        <DisplayName>Old Display</DisplayName>
        <PublisherDisplayName>Old Author</PublisherDisplayName>
    </Properties>
    <Applications>
        <Application Id="OldPackage">
            <VisualElements DisplayName="Old Display" />
        </Application>
    </Applications>
    <Capabilities>
        <Internet />
        <Bluetooth />
    </Capabilities>
</Package>
"#;

const PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="4.0">
    <ItemGroup>
        <Content Include="www\stale.js" />
    </ItemGroup>
</Project>
"#;

fn test_config() -> AppConfig {
    AppConfig {
        name: "HelloWorld".to_string(),
        version: "1.2".to_string(),
        package_name: "io.example.hello".to_string(),
        author: "Example Team".to_string(),
        icons: ImageSet::new(vec![ImageResource {
            src: "res/icon.png".to_string(),
            width: None,
            height: None,
            platform: None,
        }]),
        splash_screens: ImageSet::new(vec![ImageResource {
            src: "res/splash.png".to_string(),
            width: Some(620),
            height: Some(300),
            platform: None,
        }]),
    }
}

/// Lay out an app root (descriptor assets, hooks dir) and a legacy
/// platform project next to it.
fn legacy_fixture(temp: &TempDir) -> (PathBuf, PathBuf) {
    let app_root = temp.path().join("app");
    fs::create_dir_all(app_root.join("res")).unwrap();
    fs::write(app_root.join("res/icon.png"), [1]).unwrap();
    fs::write(app_root.join("res/splash.png"), [2]).unwrap();

    let platform = temp.path().join("platform");
    fs::create_dir_all(platform.join("www/js")).unwrap();
    fs::write(platform.join("app.jsproj"), PROJECT).unwrap();
    fs::write(platform.join("package.appxmanifest"), MANIFEST).unwrap();
    fs::write(platform.join("www/index.html"), "<html></html>").unwrap();
    fs::write(platform.join("www/js/app.js"), "var x;").unwrap();
    fs::create_dir_all(platform.join("www/.svn")).unwrap();
    fs::write(platform.join("www/.svn/entries"), "vcs").unwrap();

    (app_root, platform)
}

#[test]
fn test_discover_classifies_templates() {
    let temp = TempDir::new().unwrap();
    let (_, platform) = legacy_fixture(&temp);
    let handle = ProjectHandle::discover(&platform).unwrap();
    assert_eq!(handle.template(), TemplateKind::Legacy);

    // A .projitems file marks the modern template, even next to a .jsproj.
    fs::write(platform.join("shared.projitems"), PROJECT).unwrap();
    let handle = ProjectHandle::discover(&platform).unwrap();
    assert_eq!(handle.template(), TemplateKind::Modern);
}

#[test]
fn test_discover_rejects_unrecognized_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("readme.txt"), "not a project").unwrap();

    let err = ProjectHandle::discover(temp.path()).unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound { .. }), "got: {err}");
}

#[test]
fn test_legacy_sync_runs_all_steps() {
    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);

    let handle = ProjectHandle::discover(&platform).unwrap();
    let report = ProjectSync::new(handle, &app_root)
        .sync(&test_config())
        .unwrap();
    assert!(report.success);

    // Manifest got the new identity and normalized version.
    let manifest = fs::read_to_string(platform.join("package.appxmanifest")).unwrap();
    assert!(manifest.contains("io.example.hello"));
    assert!(manifest.contains("1.2.0.0"));

    // Source list mirrors the content tree; the stale entry is gone.
    let entries = ProjectDocument::load(&platform.join("app.jsproj"))
        .unwrap()
        .source_entries();
    assert!(entries.contains(&r"www\index.html".to_string()), "got: {entries:?}");
    assert!(entries.contains(&r"www\js\app.js".to_string()), "got: {entries:?}");
    assert!(!entries.iter().any(|e| e.contains("stale.js")));

    // Icons and splash copied into the template slots.
    assert!(platform.join("images/logo.png").exists());
    assert!(platform.join("images/splashscreen.png").exists());

    // BOM added to text assets.
    let html = fs::read(platform.join("www/index.html")).unwrap();
    assert_eq!(&html[..3], &[0xEF, 0xBB, 0xBF]);

    // VCS metadata cleaned out of the owned tree.
    assert!(!platform.join("www/.svn").exists());
}

#[test]
fn test_sync_is_idempotent_end_to_end() {
    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);
    let config = test_config();

    let handle = ProjectHandle::discover(&platform).unwrap();
    let sync = ProjectSync::new(handle, &app_root);

    sync.sync(&config).unwrap();
    let manifest_first = fs::read(platform.join("package.appxmanifest")).unwrap();
    let project_first = fs::read(platform.join("app.jsproj")).unwrap();

    sync.sync(&config).unwrap();
    assert_eq!(
        fs::read(platform.join("package.appxmanifest")).unwrap(),
        manifest_first
    );
    assert_eq!(fs::read(platform.join("app.jsproj")).unwrap(), project_first);
}

#[test]
fn test_modern_template_skips_manifest_and_icons() {
    let temp = TempDir::new().unwrap();
    let app_root = temp.path().join("app");
    fs::create_dir_all(&app_root).unwrap();

    let platform = temp.path().join("platform");
    fs::create_dir_all(platform.join("www")).unwrap();
    fs::write(platform.join("shared.projitems"), PROJECT).unwrap();
    fs::write(platform.join("www/app.js"), "var x;").unwrap();

    let handle = ProjectHandle::discover(&platform).unwrap();
    let report = ProjectSync::new(handle, &app_root)
        .sync(&test_config())
        .unwrap();

    assert!(report.success);
    assert!(!platform.join("package.appxmanifest").exists());
    assert!(!platform.join("images").exists());
    assert!(report
        .actions
        .iter()
        .any(|a| a.contains("skipped manifest reconciliation")));
}

#[test]
fn test_invalid_config_rejected_before_any_io() {
    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);

    let invalid = AppConfig {
        name: String::new(),
        ..test_config()
    };

    let handle = ProjectHandle::discover(&platform).unwrap();
    let err = ProjectSync::new(handle, &app_root).sync(&invalid).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }), "got: {err}");

    // Nothing was touched.
    assert_eq!(
        fs::read_to_string(platform.join("package.appxmanifest")).unwrap(),
        MANIFEST
    );
    assert_eq!(
        fs::read_to_string(platform.join("app.jsproj")).unwrap(),
        PROJECT
    );
}

#[test]
fn test_structural_manifest_failure_stops_before_hook_and_sources() {
    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);
    fs::write(
        platform.join("package.appxmanifest"),
        "<Package><Identity Name=\"x\" /></Package>",
    )
    .unwrap();

    let handle = ProjectHandle::discover(&platform).unwrap();
    let err = ProjectSync::new(handle, &app_root)
        .sync(&test_config())
        .unwrap_err();
    assert!(
        matches!(err, Error::InvalidManifestStructure { .. }),
        "got: {err}"
    );

    // The file-list step never ran.
    assert_eq!(
        fs::read_to_string(platform.join("app.jsproj")).unwrap(),
        PROJECT
    );
}

#[cfg(unix)]
#[test]
fn test_hook_rejection_short_circuits_file_list_steps() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);

    let hook_dir = app_root.join("hooks/pre-package");
    fs::create_dir_all(&hook_dir).unwrap();
    let script = hook_dir.join("10-fail.sh");
    fs::write(&script, "#!/bin/sh\necho 'no packaging today' >&2\nexit 1\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let handle = ProjectHandle::discover(&platform).unwrap();
    let err = ProjectSync::new(handle, &app_root)
        .sync(&test_config())
        .unwrap_err();
    assert!(matches!(err, Error::HookFailed { .. }), "got: {err}");

    // The source list was never reconciled.
    assert_eq!(
        fs::read_to_string(platform.join("app.jsproj")).unwrap(),
        PROJECT
    );
    // But the manifest step before the hook did run.
    let manifest = fs::read_to_string(platform.join("package.appxmanifest")).unwrap();
    assert!(manifest.contains("io.example.hello"));
}

#[cfg(unix)]
#[test]
fn test_hook_receives_asset_root_payload() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let (app_root, platform) = legacy_fixture(&temp);

    let hook_dir = app_root.join("hooks/pre-package");
    fs::create_dir_all(&hook_dir).unwrap();
    let marker = temp.path().join("payload.txt");
    let script = hook_dir.join("10-record.sh");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$APPX_ASSET_ROOT $APPX_PLATFORMS\" > '{}'\n",
            marker.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let handle = ProjectHandle::discover(&platform).unwrap();
    ProjectSync::new(handle, &app_root)
        .sync(&test_config())
        .unwrap();

    let recorded = fs::read_to_string(&marker).unwrap();
    assert!(recorded.contains("www windows"), "got: {recorded}");
}

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use spoofdev::source::{BundleSource, DirectorySource};
use spoofdev::store::{CacheStore, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use spoofdev::{DeviceIndex, DeviceResolver};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const BACON: &str = "UserReadableName=OnePlus One\nBuild.DEVICE=A0001\n";
const HAMMERHEAD: &str = "UserReadableName=Nexus 5\nBuild.DEVICE=hammerhead\n";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn package(&self) -> PathBuf {
        self.dir.path().join("base.apk")
    }

    fn overrides(&self) -> PathBuf {
        self.dir.path().join("devices")
    }

    fn preferences(&self) -> PathBuf {
        self.dir.path().join("preferences.json")
    }

    fn write_package(&self, entries: &[(&str, &str)]) {
        let file = File::create(self.package()).expect("create package");
        let mut writer = ZipWriter::new(file);
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(body.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish package");
    }

    fn write_override(&self, name: &str, body: &str) {
        fs::create_dir_all(self.overrides()).expect("create overrides");
        fs::write(self.overrides().join(name), body).expect("write override");
    }

    fn resolver(&self, version: &str) -> DeviceResolver<FilePreferenceStore> {
        let store = FilePreferenceStore::open(self.preferences()).expect("open preferences");
        resolver_with(store, version, &self.package(), &self.overrides())
    }
}

fn resolver_with<S: PreferenceStore>(
    store: S,
    version: &str,
    package: &Path,
    overrides: &Path,
) -> DeviceResolver<S> {
    DeviceResolver::new(
        CacheStore::new(store, version),
        BundleSource::new(Some(package.to_path_buf())),
        DirectorySource::new(overrides),
    )
}

fn index(pairs: &[(&str, &str)]) -> DeviceIndex {
    pairs
        .iter()
        .map(|(name, display)| (name.to_string(), display.to_string()))
        .collect()
}

fn standard_package(fixture: &Fixture) {
    fixture.write_package(&[
        ("AndroidManifest.xml", "<manifest/>"),
        ("device-bacon.properties", BACON),
        ("device-hammerhead.properties", HAMMERHEAD),
        ("res/device-nested.properties", BACON),
        ("device-unnamed.properties", "Build.DEVICE=x\n"),
    ]);
}

#[test]
fn fresh_cache_is_populated_from_bundle() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    let resolver = fixture.resolver("1.0");

    let expected = index(&[
        ("device-bacon.properties", "OnePlus One"),
        ("device-hammerhead.properties", "Nexus 5"),
        ("device-unnamed.properties", ""),
    ]);

    assert_eq!(resolver.get_devices(), expected);
    assert_eq!(resolver.cache().read_index(), expected);

    let reopened = fixture.resolver("1.0");
    assert_eq!(reopened.cache().read_index(), expected);
}

#[test]
fn repeated_calls_are_idempotent() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.write_override("device-custom.properties", "UserReadableName=Custom\n");
    let resolver = fixture.resolver("1.0");

    let first = resolver.get_devices();
    let second = resolver.get_devices();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn cached_index_is_reused_while_version_is_unchanged() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.resolver("1.0").get_devices();

    fixture.write_package(&[("device-new.properties", "UserReadableName=New\n")]);
    let devices = fixture.resolver("1.0").get_devices();

    assert!(devices.contains_key("device-bacon.properties"));
    assert!(!devices.contains_key("device-new.properties"));
}

#[test]
fn version_bump_recomputes_from_bundle() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.resolver("1.0").get_devices();

    fixture.write_package(&[("device-new.properties", "UserReadableName=New\n")]);
    let resolver = fixture.resolver("1.1");

    assert!(resolver.cache().read_index().is_empty());
    assert_eq!(
        resolver.get_devices(),
        index(&[("device-new.properties", "New")])
    );
    assert_eq!(resolver.cache().key(), "DEVICE_LIST_1.1");
}

#[test]
fn directory_profiles_override_bundle_names() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.write_override("device-bacon.properties", "UserReadableName=My OnePlus\n");
    let resolver = fixture.resolver("1.0");

    let devices = resolver.get_devices();
    assert_eq!(devices["device-bacon.properties"], "My OnePlus");
    assert_eq!(devices["device-hammerhead.properties"], "Nexus 5");

    assert_eq!(
        resolver.cache().read_index()["device-bacon.properties"],
        "OnePlus One"
    );
}

#[test]
fn overrides_are_read_fresh_on_every_call() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    let resolver = fixture.resolver("1.0");
    resolver.get_devices();

    fixture.write_override("device-custom.properties", "UserReadableName=Custom\n");
    let devices = resolver.get_devices();
    assert_eq!(devices["device-custom.properties"], "Custom");
    assert!(
        !resolver
            .cache()
            .read_index()
            .contains_key("device-custom.properties")
    );
}

#[test]
fn non_conventional_override_files_are_ignored() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.write_override("notes.txt", "UserReadableName=Notes\n");
    fixture.write_override("device-broken.props", "UserReadableName=Broken\n");
    fs::create_dir_all(fixture.overrides().join("device-dir.properties")).expect("mkdir");

    let devices = fixture.resolver("1.0").get_devices();
    assert_eq!(devices.len(), 3);
    assert!(!devices.contains_key("device-dir.properties"));
}

#[test]
fn missing_override_directory_yields_bundle_index() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    let resolver = fixture.resolver("1.0");

    assert!(!fixture.overrides().exists());
    assert_eq!(resolver.get_devices(), resolver.cache().read_index());
}

#[test]
fn missing_package_degrades_to_overrides() {
    let fixture = Fixture::new();
    fixture.write_override("device-custom.properties", "UserReadableName=Custom\n");
    let resolver = resolver_with(
        MemoryPreferenceStore::new(),
        "1.0",
        &fixture.package(),
        &fixture.overrides(),
    );

    assert_eq!(
        resolver.get_devices(),
        index(&[("device-custom.properties", "Custom")])
    );
}

#[test]
fn corrupt_package_degrades_to_empty() {
    let fixture = Fixture::new();
    fs::write(fixture.package(), b"definitely not a zip").expect("write");
    let resolver = fixture.resolver("1.0");

    assert!(resolver.get_devices().is_empty());
    assert!(resolver.get_profile("device-bacon.properties").is_empty());
}

#[test]
fn profile_prefers_override_file() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    fixture.write_override(
        "device-bacon.properties",
        "UserReadableName=My OnePlus\nBuild.DEVICE=custom\n",
    );
    let resolver = fixture.resolver("1.0");

    let profile = resolver.get_profile("device-bacon.properties");
    assert_eq!(profile.display_name(), "My OnePlus");
    assert_eq!(profile.get("Build.DEVICE"), Some("custom"));
}

#[test]
fn profile_falls_back_to_bundle_entry() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    let resolver = fixture.resolver("1.0");

    let profile = resolver.get_profile("device-hammerhead.properties");
    assert_eq!(profile.display_name(), "Nexus 5");
    assert_eq!(profile.get("Build.DEVICE"), Some("hammerhead"));
}

#[test]
fn unknown_profile_is_empty() {
    let fixture = Fixture::new();
    standard_package(&fixture);
    let resolver = fixture.resolver("1.0");

    assert!(resolver.get_profile("device-absent.properties").is_empty());
}

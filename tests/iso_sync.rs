use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempdir::TempDir;

use importer_mocks::conduit::{
    MockSyncConduit, UnitFactory, UnitSearch, UnitSink, UnitSource,
};
use importer_mocks::iso::{self, IsoManifest};
use importer_mocks::logging::init_test_logger;
use importer_mocks::transfer::{CaptureBuffer, HandleState};
use importer_mocks::{
    basic_config, PluginCallConfig, SearchCriteria, TransferHandle,
    TransferPool, Unit, UnitCriteria,
};

const ISO_TYPE: &str = "iso";

fn fetch_manifest(config: &PluginCallConfig) -> IsoManifest {
    let feed = config.get_str("feed_url").unwrap();
    let buffer = CaptureBuffer::new();
    let mut handle = TransferHandle::new(iso::shared_fixture());
    handle.configure_output(buffer.sink());
    handle.select_target(&format!("{}{}", feed, iso::MANIFEST));

    let mut pool = TransferPool::new();
    let id = pool.register(handle);
    pool.perform_all().unwrap();
    assert_eq!(pool.poll_completions().ready, vec![id]);
    pool.deregister(id);
    pool.close();

    IsoManifest::parse(&buffer.as_string()).unwrap()
}

/// What an ISO importer does: fetch the manifest, download every listed
/// file in one multi-handle session, verify and store them as units.
fn sync(config: &PluginCallConfig, conduit: &MockSyncConduit) -> Vec<Unit> {
    let feed = config.get_str("feed_url").unwrap().to_owned();
    let manifest = fetch_manifest(config);
    let fixture = iso::shared_fixture();

    let mut pool = TransferPool::new();
    let mut downloads = Vec::new();
    for entry in manifest.entries() {
        let buffer = CaptureBuffer::new();
        let mut handle = TransferHandle::new(fixture.clone());
        handle.configure_output(buffer.sink());
        handle.select_target(&format!("{}{}", feed, entry.name));
        downloads.push((pool.register(handle), entry.clone(), buffer));
    }

    let status = pool.perform_all().unwrap();
    assert_eq!(status.processed, manifest.len());

    let mut units = Vec::new();
    for id in pool.poll_completions().ready {
        let (_, entry, buffer) = downloads
            .iter()
            .find(|(d, _, _)| *d == id)
            .unwrap();
        entry.verify(&buffer.contents()).unwrap();

        let handle = pool.deregister(id).unwrap();
        assert_eq!(handle.state(), HandleState::Removed);

        let checksum = hex::encode(&entry.checksum);
        let rel_path = format!("{}/{}", checksum, entry.name);
        let mut key = BTreeMap::new();
        key.insert("id".to_owned(), Value::from(entry.name.clone()));
        key.insert("checksum".to_owned(), Value::from(checksum));
        key.insert("size".to_owned(), Value::from(entry.size));
        let unit = conduit
            .init_unit(
                ISO_TYPE,
                key,
                BTreeMap::new(),
                Some(Path::new(&rel_path)),
            )
            .unwrap();
        fs::write(unit.storage_path().unwrap(), buffer.contents()).unwrap();
        conduit.save_unit(unit.clone());
        units.push(unit);
    }
    assert!(pool.is_empty());
    pool.close();

    units
}

#[test]
fn syncs_every_manifest_entry() {
    init_test_logger();
    let dir = TempDir::new("iso_sync").unwrap();
    let config = basic_config([("feed_url", json!("http://example/repo/"))]);
    assert_eq!(config.num_retries(), 0);

    let conduit = MockSyncConduit::new().with_pkg_dir(dir.path());
    let units = sync(&config, &conduit);

    assert_eq!(units.len(), 3);
    assert_eq!(conduit.saved_units(), units);
    assert_eq!(conduit.calls().count("init_unit"), 3);

    let contents: Vec<String> = units
        .iter()
        .map(|u| fs::read_to_string(u.storage_path().unwrap()).unwrap())
        .collect();
    assert_eq!(
        contents,
        vec![
            iso::TEST_ISO_CONTENT,
            iso::TEST2_ISO_CONTENT,
            iso::TEST3_ISO_CONTENT
        ]
    );
}

#[test]
fn manifest_is_delivered_byte_for_byte() {
    init_test_logger();
    let buffer = CaptureBuffer::new();
    let mut handle = TransferHandle::new(iso::shared_fixture());
    handle.configure_output(buffer.sink());
    assert_eq!(handle.select_target("http://example/repo/MANIFEST"), Some(0));

    let mut pool = TransferPool::new();
    pool.register(handle);
    pool.perform_all().unwrap();

    assert_eq!(buffer.contents(), iso::MANIFEST_CONTENT.as_bytes());
}

#[test]
fn existing_units_are_found_before_download() {
    init_test_logger();
    let existing = vec![
        Unit::with_id(ISO_TYPE, iso::TEST_ISO),
        Unit::with_id("erratum", "RHSA-2012:0001"),
    ];
    let conduit = MockSyncConduit::new().with_existing_units(existing);

    let criteria = UnitCriteria::for_types([ISO_TYPE]);
    let have = conduit.get_units(Some(&criteria));
    assert_eq!(have, vec![Unit::with_id(ISO_TYPE, iso::TEST_ISO)]);

    let found = conduit
        .search_all_units(ISO_TYPE, &SearchCriteria::by_id(iso::TEST_ISO));
    assert_eq!(found.len(), 1);
    assert!(conduit
        .search_all_units(ISO_TYPE, &SearchCriteria::by_id(iso::TEST2_ISO))
        .is_empty());
}

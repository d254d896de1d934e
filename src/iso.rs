//! Seeded ISO repository: a checksum manifest and the three files it lists.

use std::rc::Rc;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::transfer::PayloadFixture;
use crate::{MockError, Result};

pub const MANIFEST: &str = "MANIFEST";
pub const TEST_ISO: &str = "test.iso";
pub const TEST2_ISO: &str = "test2.iso";
pub const TEST3_ISO: &str = "test3.iso";

pub const MANIFEST_CONTENT: &str = "\
test.iso,f02d5a72cd2d57fa802840a76b44c6c6920a8b8e6b90b20e26c03876275069e0,16
test2.iso,c7fbc0e821c0871805a99584c6a384533909f68a6bbe9a2a687d28d9f3b10c16,22
test3.iso,94f7fe923212286855dea858edac1b4a292301045af0ddb275544e5251a50b3c,34";
pub const TEST_ISO_CONTENT: &str = "This is a file.\n";
pub const TEST2_ISO_CONTENT: &str = "This is another file.\n";
pub const TEST3_ISO_CONTENT: &str = "Are you starting to get the idea?\n";

const FIELD_SEPARATOR: char = ',';

/// Fixture serving the manifest at index 0 and the files at 1..=3
pub fn fixture() -> PayloadFixture {
    PayloadFixture::new()
        .with_payload(MANIFEST, MANIFEST_CONTENT)
        .with_payload(TEST_ISO, TEST_ISO_CONTENT)
        .with_payload(TEST2_ISO, TEST2_ISO_CONTENT)
        .with_payload(TEST3_ISO, TEST3_ISO_CONTENT)
}

pub fn shared_fixture() -> Rc<PayloadFixture> {
    fixture().into_shared()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub checksum: Vec<u8>,
    pub size: u64,
}

impl ManifestEntry {
    /// Check `data` against the recorded size and SHA-256 checksum
    pub fn verify(&self, data: &[u8]) -> Result<()> {
        if data.len() as u64 != self.size {
            return Err(MockError::Manifest(format!(
                "{}: expected {} bytes, got {}",
                self.name,
                self.size,
                data.len()
            )));
        }

        let digest = Sha256::digest(data);
        if digest.as_slice() != self.checksum.as_slice() {
            return Err(MockError::Manifest(format!(
                "{}: checksum mismatch, got {}",
                self.name,
                hex::encode(digest)
            )));
        }
        Ok(())
    }
}

impl FromStr for ManifestEntry {
    type Err = MockError;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(MockError::Manifest(format!(
                "expected name,checksum,size but got {:?}",
                line
            )));
        }

        Ok(Self {
            name: parts[0].to_owned(),
            checksum: hex::decode(parts[1])?,
            size: parts[2].parse()?,
        })
    }
}

/// Parsed form of the `MANIFEST` payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsoManifest {
    entries: Vec<ManifestEntry>,
}

impl IsoManifest {
    pub fn parse(text: &str) -> Result<Self> {
        let entries = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(ManifestEntry::from_str)
            .collect::<Result<Vec<_>>>()?;
        log::trace!("manifest lists {} files", entries.len());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for IsoManifest {
    type Err = MockError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

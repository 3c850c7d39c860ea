//! One-way digest computation.
//!
//! The algorithm is a closed enumeration resolved once per scan; the engine
//! always hashes the raw bytes it is handed, with no transcoding.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use md5::Md5;
use serde::{Serialize, Deserialize};
use sha2::{Digest, Sha256, Sha512};

use crate::error::ScanError;

/// Digest algorithms a scan can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Column heading used in the report header
    pub fn label(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Length of the hex digest in characters
    pub fn hex_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 32,
            HashAlgorithm::Sha256 => 64,
            HashAlgorithm::Sha512 => 128,
        }
    }

    /// Hash `data` in a single pass and return the lowercase hex digest
    pub fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => hex_digest::<Md5>(data),
            HashAlgorithm::Sha256 => hex_digest::<Sha256>(data),
            HashAlgorithm::Sha512 => hex_digest::<Sha512>(data),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(ScanError::config(format!("Unknown hash algorithm: {}", s))),
        }
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    D::digest(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Read a whole file and return its hex digest
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<String> {
    let data = fs::read(path)
        .context(format!("Failed to read {} for hashing", path.display()))?;
    Ok(algorithm.digest_hex(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test::{MD5_EMPTY, SHA256_EMPTY, SHA512_EMPTY};
    use crate::test_utils::create_temp_file;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_digests() {
        assert_eq!(HashAlgorithm::Md5.digest_hex(b""), MD5_EMPTY);
        assert_eq!(HashAlgorithm::Sha256.digest_hex(b""), SHA256_EMPTY);
        assert_eq!(HashAlgorithm::Sha512.digest_hex(b""), SHA512_EMPTY);
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            HashAlgorithm::Md5.digest_hex(b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            HashAlgorithm::Sha256.digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_non_utf8_bytes_hashed_raw() {
        // Invalid UTF-8 must hash as-is
        let data = [0xff, 0xfe, 0x00, 0x80];
        let digest = HashAlgorithm::Sha256.digest_hex(&data);
        assert_eq!(digest.len(), 64);
        assert_ne!(digest, HashAlgorithm::Sha256.digest_hex(&[0xef, 0xbf, 0xbd]));
    }

    #[test]
    fn test_hash_file_matches_in_memory() {
        let file = create_temp_file(b"evidence bytes").unwrap();
        let from_file = hash_file(file.path(), HashAlgorithm::Sha512).unwrap();
        assert_eq!(from_file, HashAlgorithm::Sha512.digest_hex(b"evidence bytes"));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("sha512".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha512);
        assert!(matches!(
            "crc32".parse::<HashAlgorithm>(),
            Err(ScanError::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(HashAlgorithm::Md5.label(), "MD5");
        assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA256");
        assert_eq!(HashAlgorithm::Sha512.label(), "SHA512");
    }

    fn any_algorithm() -> impl Strategy<Value = HashAlgorithm> {
        prop_oneof![
            Just(HashAlgorithm::Md5),
            Just(HashAlgorithm::Sha256),
            Just(HashAlgorithm::Sha512),
        ]
    }

    proptest! {
        #[test]
        fn prop_digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..2048), algo in any_algorithm()) {
            let first = algo.digest_hex(&data);
            prop_assert_eq!(first.len(), algo.hex_len());
            prop_assert_eq!(first, algo.digest_hex(&data));
        }

        #[test]
        fn prop_single_byte_change_alters_digest(
            data in proptest::collection::vec(any::<u8>(), 1..2048),
            index in any::<prop::sample::Index>(),
            flip in 1u8..=255,
            algo in any_algorithm(),
        ) {
            let mut changed = data.clone();
            let i = index.index(changed.len());
            changed[i] ^= flip;
            prop_assert_ne!(algo.digest_hex(&data), algo.digest_hex(&changed));
        }
    }
}

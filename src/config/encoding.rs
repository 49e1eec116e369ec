//! EULA text encoding detection.
//!
//! Only the byte order mark is inspected: `FF FE` means UTF-16LE, no BOM
//! means US-ASCII, and any other BOM is rejected.

use super::error::{ResolveError, Result};
use super::options::{SymbolicOption, symbolic_option};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Longest byte order mark we recognize.
const BOM_PREFIX_LEN: u64 = 4;

symbolic_option! {
    /// Declared or detected EULA text encoding.
    #[derive(Default)]
    pub enum EulaEncoding: "EULA encoding" {
        UsAscii => "US_ASCII",
        Utf16Le => "UTF_16LE",
        #[default]
        Autodetect => "AUTODETECT",
    }
}

/// Backend flag selecting how the EULA file is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EulaFlag {
    /// Plain US-ASCII license text
    #[serde(rename = "-eula")]
    Ascii,
    /// UTF-16LE license text
    #[serde(rename = "-unicode-eula")]
    Unicode,
}

impl EulaFlag {
    /// Token passed verbatim to the backend.
    pub fn token(&self) -> &'static str {
        match self {
            EulaFlag::Ascii => "-eula",
            EulaFlag::Unicode => "-unicode-eula",
        }
    }
}

impl std::fmt::Display for EulaFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Classifies the encoding of the file at `path` by its byte order mark.
pub fn detect_encoding(path: &Path) -> Result<EulaEncoding> {
    let io_error = |source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut prefix = Vec::with_capacity(BOM_PREFIX_LEN as usize);
    File::open(path)
        .map_err(io_error)?
        .take(BOM_PREFIX_LEN)
        .read_to_end(&mut prefix)
        .map_err(io_error)?;

    match classify(&prefix) {
        Ok(encoding) => Ok(encoding),
        Err(bom) => Err(ResolveError::UnsupportedEncoding {
            path: path.to_path_buf(),
            bom,
        }),
    }
}

/// Maps a file prefix to an encoding, or names the unsupported BOM.
fn classify(prefix: &[u8]) -> std::result::Result<EulaEncoding, &'static str> {
    match prefix {
        [0xFF, 0xFE, 0x00, 0x00, ..] => Err("UTF-32LE"),
        [0x00, 0x00, 0xFE, 0xFF, ..] => Err("UTF-32BE"),
        [0xEF, 0xBB, 0xBF, ..] => Err("UTF-8"),
        [0xFE, 0xFF, ..] => Err("UTF-16BE"),
        [0xFF, 0xFE, ..] => Ok(EulaEncoding::Utf16Le),
        _ => Ok(EulaEncoding::UsAscii),
    }
}

/// Detects the EULA encoding, checks it against the declared one and
/// returns the matching backend flag.
pub fn eula_flag(path: &Path, declared: EulaEncoding) -> Result<EulaFlag> {
    let actual = detect_encoding(path)?;

    if declared != EulaEncoding::Autodetect && declared != actual {
        return Err(ResolveError::EncodingMismatch {
            expected: declared.as_parameter(),
            actual: actual.as_parameter(),
        });
    }

    if actual == EulaEncoding::Utf16Le {
        Ok(EulaFlag::Unicode)
    } else {
        Ok(EulaFlag::Ascii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn utf16le_bom_is_detected() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "eula.txt", &[0xFF, 0xFE, b'O', 0x00, b'K', 0x00]);
        assert_eq!(detect_encoding(&path).unwrap(), EulaEncoding::Utf16Le);
        assert_eq!(eula_flag(&path, EulaEncoding::Autodetect).unwrap(), EulaFlag::Unicode);
    }

    #[test]
    fn no_bom_is_ascii() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "eula.txt", b"License terms");
        assert_eq!(detect_encoding(&path).unwrap(), EulaEncoding::UsAscii);
        assert_eq!(eula_flag(&path, EulaEncoding::UsAscii).unwrap().token(), "-eula");

        let empty = write(&tmp, "empty.txt", b"");
        assert_eq!(detect_encoding(&empty).unwrap(), EulaEncoding::UsAscii);
    }

    #[test]
    fn other_boms_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let utf8 = write(&tmp, "utf8.txt", &[0xEF, 0xBB, 0xBF, b'a']);
        assert!(matches!(
            detect_encoding(&utf8).unwrap_err(),
            ResolveError::UnsupportedEncoding { bom: "UTF-8", .. }
        ));

        let utf16be = write(&tmp, "be.txt", &[0xFE, 0xFF, 0x00, b'a']);
        assert!(matches!(
            detect_encoding(&utf16be).unwrap_err(),
            ResolveError::UnsupportedEncoding { bom: "UTF-16BE", .. }
        ));

        let utf32le = write(&tmp, "le32.txt", &[0xFF, 0xFE, 0x00, 0x00]);
        assert!(matches!(
            detect_encoding(&utf32le).unwrap_err(),
            ResolveError::UnsupportedEncoding { bom: "UTF-32LE", .. }
        ));
    }

    #[test]
    fn declared_ascii_against_utf16_fails() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "eula.txt", &[0xFF, 0xFE, b'a', 0x00]);
        match eula_flag(&path, EulaEncoding::UsAscii).unwrap_err() {
            ResolveError::EncodingMismatch { expected, actual } => {
                assert_eq!(expected, "us-ascii");
                assert_eq!(actual, "utf-16le");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = detect_encoding(&tmp.path().join("nope.txt")).unwrap_err();
        assert_eq!(err.key(), "config.io");
    }

    #[test]
    fn encoding_names_parse_from_charset_spelling() {
        assert_eq!(
            EulaEncoding::parse_strict("US-ASCII").unwrap(),
            EulaEncoding::UsAscii
        );
        assert_eq!(
            EulaEncoding::parse_strict("UTF-16LE").unwrap(),
            EulaEncoding::Utf16Le
        );
        assert!(EulaEncoding::parse_strict("UTF-8").is_err());
    }
}

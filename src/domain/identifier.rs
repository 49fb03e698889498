//! URI-style video identifiers.
//!
//! Every video the app knows about is keyed by a single string that encodes
//! where it comes from:
//! - a bare 11-character catalog id (`dQw4w9WgXcQ`)
//! - `local:<path>` for a file on disk
//! - `dlna://<host><path>` for a file served by a network media device
//!
//! Older builds stored local files as `local_<base64 path>`. Those are still
//! recognized as [`VideoIdentifier::LegacyOpaque`] so the history migration can
//! rewrite them; nothing else should produce or consume them.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

pub const LOCAL_PREFIX: &str = "local:";
pub const NETWORK_DEVICE_PREFIX: &str = "dlna://";
pub const LEGACY_LOCAL_PREFIX: &str = "local_";

static CATALOG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("catalog id pattern"));

static LEGACY_OPAQUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^local_[A-Za-z0-9+/_-]+={0,2}$").expect("legacy id pattern"));

/// Returned by [`parse`] when a string matches none of the known schemes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized identifier format: {raw:?}")]
pub struct UnrecognizedFormat {
    pub raw: String,
}

/// Where a video comes from, without its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoOrigin {
    Catalog,
    Local,
    NetworkDevice,
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VideoIdentifier {
    /// Known to the remote catalog. Only ever recognized, never built here.
    Catalog { raw_id: String },
    /// A file on local disk. The path is kept verbatim.
    Local { path: String },
    /// A file served by a network media device. `host` may carry a port and
    /// `path` always starts with `/`.
    NetworkDevice { host: String, path: String },
    /// Pre-scheme identifier awaiting migration.
    LegacyOpaque { raw: String },
}

impl VideoIdentifier {
    pub fn origin(&self) -> VideoOrigin {
        match self {
            VideoIdentifier::Catalog { .. } => VideoOrigin::Catalog,
            VideoIdentifier::Local { .. } => VideoOrigin::Local,
            VideoIdentifier::NetworkDevice { .. } => VideoOrigin::NetworkDevice,
            VideoIdentifier::LegacyOpaque { .. } => VideoOrigin::Legacy,
        }
    }

    /// Filesystem or device path carried by the identifier, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            VideoIdentifier::Local { path } | VideoIdentifier::NetworkDevice { path, .. } => {
                Some(path)
            }
            VideoIdentifier::Catalog { .. } | VideoIdentifier::LegacyOpaque { .. } => None,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, VideoIdentifier::LegacyOpaque { .. })
    }
}

impl fmt::Display for VideoIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoIdentifier::Catalog { raw_id } => f.write_str(raw_id),
            VideoIdentifier::Local { path } => write!(f, "{}{}", LOCAL_PREFIX, path),
            VideoIdentifier::NetworkDevice { host, path } => {
                write!(f, "{}{}{}", NETWORK_DEVICE_PREFIX, host, path)
            }
            VideoIdentifier::LegacyOpaque { raw } => f.write_str(raw),
        }
    }
}

impl FromStr for VideoIdentifier {
    type Err = UnrecognizedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// True when `raw` has the exact shape of a catalog id.
pub fn is_catalog_id(raw: &str) -> bool {
    CATALOG_ID.is_match(raw)
}

/// Classifies a stored identifier string.
///
/// Recognition order is catalog id, `local:`, `dlna://`, then the legacy
/// pattern; the first match wins. An 11-character string over the catalog
/// alphabet is therefore always a catalog id, whatever else it resembles.
pub fn parse(raw: &str) -> Result<VideoIdentifier, UnrecognizedFormat> {
    if is_catalog_id(raw) {
        return Ok(VideoIdentifier::Catalog {
            raw_id: raw.to_string(),
        });
    }

    if let Some(path) = raw.strip_prefix(LOCAL_PREFIX) {
        return Ok(VideoIdentifier::Local {
            path: path.to_string(),
        });
    }

    if let Some(rest) = raw.strip_prefix(NETWORK_DEVICE_PREFIX) {
        // host runs up to the first '/', which starts the path
        if let Some(slash) = rest.find('/') {
            let (host, path) = rest.split_at(slash);
            if !host.is_empty() {
                return Ok(VideoIdentifier::NetworkDevice {
                    host: host.to_string(),
                    path: path.to_string(),
                });
            }
        }
        return Err(UnrecognizedFormat {
            raw: raw.to_string(),
        });
    }

    if LEGACY_OPAQUE.is_match(raw) {
        return Ok(VideoIdentifier::LegacyOpaque {
            raw: raw.to_string(),
        });
    }

    Err(UnrecognizedFormat {
        raw: raw.to_string(),
    })
}

pub fn create_local(path: &str) -> String {
    format!("{}{}", LOCAL_PREFIX, path)
}

/// `path` must start with `/`; this is not checked.
pub fn create_network_device(host: &str, path: &str) -> String {
    format!("{}{}{}", NETWORK_DEVICE_PREFIX, host, path)
}

pub fn extract_path(raw: &str) -> Option<String> {
    parse(raw).ok()?.path().map(str::to_string)
}

/// Decodes a `local_<base64>` identifier back into the path it encoded.
///
/// Both the standard and URL-safe alphabets are accepted, padded or not. The
/// decoded text has to be UTF-8 and look like an absolute path.
pub fn decode_legacy(raw: &str) -> Option<String> {
    let encoded = raw.strip_prefix(LEGACY_LOCAL_PREFIX)?;
    if encoded.is_empty() {
        return None;
    }

    let bytes = [&STANDARD, &URL_SAFE, &STANDARD_NO_PAD, &URL_SAFE_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(encoded).ok())?;
    let path = String::from_utf8(bytes).ok()?;

    if looks_absolute(&path) {
        Some(path)
    } else {
        None
    }
}

fn looks_absolute(path: &str) -> bool {
    if path.starts_with('/') || path.starts_with("\\\\") {
        return true;
    }
    // C:\ or C:/
    let bytes = path.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// File name without its extension, used as a fallback title.
pub fn file_stem(path: &str) -> Option<String> {
    // Windows paths decoded from legacy ids still use backslashes.
    let name = path.rsplit(['/', '\\']).next()?;
    let stem = Path::new(name).file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

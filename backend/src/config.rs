//! Configuration and default file locations
//!
//! Everything the selector needs arrives through [`MotdConfig`]. Default
//! locations are derived from a home directory by [`CachePaths`].

use crate::error::{MotdError, MotdResult};
use crate::source::TextEncoding;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Division sign, U+00F7.
pub const DEFAULT_DELIMITER: char = '\u{F7}';

/// Motto text file, relative to the home directory.
pub const TEXT_FILE: &str = ".local/share/motd/motd.txt";

/// Motto text file used when the home copy is not readable.
pub const SYSTEM_TEXT_FILE: &str = "/usr/share/motd/motd.txt";

/// Cache directory, relative to the home directory.
pub const CACHE_DIR: &str = ".cache/motd";

pub const INDEX_FILE: &str = "motd.idx";
pub const STATE_FILE: &str = "motd.rng";

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

/// Inputs for one motto selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotdConfig {
    /// Motto text file
    pub text_path: PathBuf,

    /// Offset index cache
    pub index_path: PathBuf,

    /// PRNG state cache
    pub state_path: PathBuf,

    /// Record delimiter code point
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default)]
    pub encoding: TextEncoding,

    /// Rebuild the index even if it looks fresh
    #[serde(default)]
    pub force_rebuild: bool,
}

impl MotdConfig {
    /// Configuration using the default locations under `paths`.
    pub fn from_paths(paths: &CachePaths) -> Self {
        Self {
            text_path: paths.text_path(),
            index_path: paths.index_path.clone(),
            state_path: paths.state_path.clone(),
            delimiter: DEFAULT_DELIMITER,
            encoding: TextEncoding::default(),
            force_rebuild: false,
        }
    }

    /// Reject a delimiter the text encoding cannot represent.
    pub fn validate(&self) -> MotdResult<()> {
        if !self.encoding.can_encode(self.delimiter) {
            return Err(MotdError::InvalidDelimiter(format!(
                "U+{:04X} cannot occur in {:?} text",
                u32::from(self.delimiter),
                self.encoding
            )));
        }
        Ok(())
    }
}

/// Default file locations below a home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub cache_dir: PathBuf,
    pub index_path: PathBuf,
    pub state_path: PathBuf,
    pub home_text_path: PathBuf,
    pub system_text_path: PathBuf,
}

impl CachePaths {
    pub fn under_home(home: &Path) -> Self {
        let cache_dir = home.join(CACHE_DIR);
        Self {
            index_path: cache_dir.join(INDEX_FILE),
            state_path: cache_dir.join(STATE_FILE),
            cache_dir,
            home_text_path: home.join(TEXT_FILE),
            system_text_path: PathBuf::from(SYSTEM_TEXT_FILE),
        }
    }

    /// The home text file if it can be opened, else the system one.
    pub fn text_path(&self) -> PathBuf {
        if File::open(&self.home_text_path).is_ok() {
            self.home_text_path.clone()
        } else {
            self.system_text_path.clone()
        }
    }

    /// Create the cache directory (owner-only on Unix).
    ///
    /// Failure is only logged; writing the cache files reports it later.
    pub fn ensure_cache_dir(&self) {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        if let Err(e) = builder.create(&self.cache_dir) {
            debug!(path = %self.cache_dir.display(), error = %e, "cannot create cache dir");
        }
    }

    /// Remove the index and state files, then the cache directory.
    ///
    /// The files are removed best-effort. A cache directory that does not
    /// exist counts as cleared.
    ///
    /// # Errors
    /// [`MotdError::CacheClear`] if the directory exists but cannot be removed.
    pub fn clear(&self, index_path: &Path, state_path: &Path) -> MotdResult<()> {
        for path in [index_path, state_path] {
            if let Err(e) = fs::remove_file(path) {
                debug!(path = %path.display(), error = %e, "cache file not removed");
            }
        }
        match fs::remove_dir(&self.cache_dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(MotdError::CacheClear {
                path: self.cache_dir.clone(),
                source,
            }),
        }
    }
}

/// Parse a delimiter given as exactly one character.
pub fn parse_delimiter(arg: &str) -> MotdResult<char> {
    let mut chars = arg.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(MotdError::InvalidDelimiter(format!(
            "'{arg}' is not a single character"
        ))),
    }
}

/// Parse a delimiter given as a code point number: decimal, `0x` hex or
/// leading-zero octal.
pub fn parse_codepoint(arg: &str) -> MotdResult<char> {
    let invalid = || MotdError::InvalidDelimiter(format!("'{arg}' is not a valid code point"));
    let trimmed = arg.trim();
    let parsed = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        u32::from_str_radix(&trimmed[1..], 8)
    } else {
        trimmed.parse::<u32>()
    };
    parsed.ok().and_then(char::from_u32).ok_or_else(invalid)
}

//! Normalized, platform-independent file paths.
//!
//! Every map in the workspace index is keyed by [`NormalizedPath`], so two
//! spellings of the same file (`C:\src\a.css`, `c:/src/./a.css`,
//! `file:///c%3A/src/a.css`) must collapse to one value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An absolute path with `/` separators, `.`/`..` collapsed lexically and a
/// lower-cased drive letter.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath(Arc<str>);

impl NormalizedPath {
    /// Normalize a filesystem path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::parse(&path.as_ref().to_string_lossy())
    }

    /// Normalize a raw path string (also accepts `file://` URIs).
    pub fn parse(raw: &str) -> Self {
        let raw = match raw.strip_prefix("file://") {
            Some(rest) => percent_decode(rest),
            None => raw.to_string(),
        };
        Self(normalize(&raw).into())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to a `PathBuf` for filesystem access.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.as_str())
    }

    /// The containing directory, or `None` at a root.
    pub fn parent(&self) -> Option<NormalizedPath> {
        if self.0.len() == 3 && self.0.ends_with(":/") {
            return None;
        }
        let idx = self.0.rfind('/')?;
        let parent = &self.0[..idx];
        if parent.is_empty() {
            // "/a.css" → "/"
            return (self.0.len() > 1).then(|| Self("/".into()));
        }
        if is_drive(parent) {
            return Some(Self(format!("{parent}/").into()));
        }
        Some(Self(parent.into()))
    }

    /// Lexically join a relative (or absolute) path onto this one.
    pub fn join(&self, other: &str) -> NormalizedPath {
        let other = other.replace('\\', "/");
        if other.starts_with('/') || split_drive(&other).is_some() {
            return Self::parse(&other);
        }
        Self::parse(&format!("{}/{}", self.0, other))
    }

    /// The final path segment.
    pub fn file_name(&self) -> Option<&str> {
        self.0.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// The extension of the final segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        let idx = name.rfind('.')?;
        (idx > 0).then(|| &name[idx + 1..])
    }

    /// Check whether `other` is this path or one of its ancestors.
    pub fn starts_with(&self, other: &NormalizedPath) -> bool {
        if self.0 == other.0 {
            return true;
        }
        let prefix = other.0.trim_end_matches('/');
        self.0
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// This path expressed relative to `base`, if it lives under it.
    pub fn strip_prefix(&self, base: &NormalizedPath) -> Option<&str> {
        if !self.starts_with(base) || self.0 == base.0 {
            return None;
        }
        let prefix = base.0.trim_end_matches('/');
        self.0.strip_prefix(prefix).map(|rest| rest.trim_start_matches('/'))
    }
}

impl fmt::Debug for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for NormalizedPath {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for NormalizedPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

fn is_drive(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Split a leading `X:` drive prefix off a path.
fn split_drive(path: &str) -> Option<(char, &str)> {
    let first = path.chars().next()?;
    if path.get(..2).is_some_and(is_drive) {
        Some((first.to_ascii_lowercase(), &path[2..]))
    } else {
        None
    }
}

fn normalize(raw: &str) -> String {
    let unified = raw.replace('\\', "/");
    let mut rest = unified.as_str();

    // `/c:/foo` (from file URIs) carries a spurious leading slash.
    if rest.starts_with('/') && rest.get(1..3).is_some_and(is_drive) {
        rest = &rest[1..];
    }

    let (prefix, rest) = match split_drive(rest) {
        Some((drive, tail)) => (format!("{drive}:/"), tail),
        None if rest.starts_with('/') => ("/".to_string(), rest),
        None => (String::new(), rest),
    };
    let absolute = !prefix.is_empty();

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("{prefix}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            let hex = &input[i + 1..i + 3];
            if let Ok(value) = u8::from_str_radix(hex, 16) {
                out.push(value);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

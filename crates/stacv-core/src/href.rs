//! # Document References
//!
//! A [`Href`] is either an `http(s)` URL or a filesystem path. The split is
//! purely syntactic: a reference is a URL iff its scheme is `http` or
//! `https`. A `file://` URL is converted to the path it names; any other
//! string (including Windows drive paths that happen to parse as a URL with
//! a one-letter scheme) is a path.
//!
//! Link targets are resolved against the location of the document that
//! declares them, and the absolute form of a `Href` is what the recursive
//! walk uses as its visited-set key.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use url::Url;

/// A resolvable reference to a JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Href {
    /// Remote document fetched over HTTP(S).
    Url(Url),
    /// Local document read from the filesystem.
    Path(PathBuf),
}

impl Href {
    /// Classify a reference string.
    pub fn parse(reference: &str) -> Self {
        match Url::parse(reference) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(Self::Path)
                .unwrap_or_else(|()| Self::Path(PathBuf::from(reference))),
            _ => Self::Path(PathBuf::from(reference)),
        }
    }

    /// Whether this reference is fetched over the network.
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }

    /// Absolute, lexically normalized form. URLs are returned unchanged.
    pub fn absolute(&self) -> Self {
        match self {
            Self::Url(_) => self.clone(),
            Self::Path(path) => {
                let joined = if path.is_absolute() {
                    path.clone()
                } else {
                    std::env::current_dir()
                        .map(|cwd| cwd.join(path))
                        .unwrap_or_else(|_| path.clone())
                };
                Self::Path(normalize(&joined))
            }
        }
    }

    /// Resolve a link declared inside the document at `self`.
    pub fn join(&self, link: &str) -> Self {
        match (self, Self::parse(link)) {
            (_, target @ Self::Url(_)) => target,
            (Self::Url(base), Self::Path(path)) => match base.join(link) {
                Ok(url) => Self::parse(url.as_str()),
                Err(_) => Self::Path(path),
            },
            (Self::Path(_), Self::Path(path)) if path.is_absolute() => Self::Path(normalize(&path)),
            (Self::Path(base), Self::Path(path)) => {
                let dir = base.parent().unwrap_or_else(|| Path::new(""));
                Self::Path(normalize(&dir.join(path)))
            }
        }
    }

    /// URI that relative `$ref`s inside the document at `self` resolve
    /// against: the URL itself, or the `file://` URI of the absolute parent
    /// directory for a path.
    pub fn base_uri(&self) -> Option<Url> {
        match self.absolute() {
            Self::Url(url) => Some(url),
            Self::Path(path) => path
                .parent()
                .and_then(|dir| Url::from_directory_path(dir).ok()),
        }
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url.as_str()),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Remove `.` components and fold `..` into the preceding component
/// without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

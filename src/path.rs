//! Companion file naming for Analyze 7.5 image pairs.
//!
//! An Analyze image is stored as two files sharing a root name: a header
//! (`root.hdr`) and a volume (`root.img`, or `root.img.gz` when compressed).
//! Any of the three names can be given by the user to refer to the pair.
//!
//! The extension of a name is whatever follows its last `.`, so
//! `brain.img.gz` has the extension `gz` and the root `brain.img`. The
//! resolver strips the extra `.img` on its own when building the companion
//! names.

use crate::error::{AnalyzeError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Split the file name of `path` at its last `.`.
/// Names without a dot, and hidden names such as `.hdr`, have no extension.
fn split_extension(path: &Path) -> Option<(PathBuf, &str)> {
    let name = path.file_name()?.to_str()?;
    let dot = name.rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some((path.with_file_name(&name[..dot]), &name[dot + 1..]))
}

fn append_suffix<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_ref().as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

/// The extension of the file name, which is the text after its last `.`.
pub fn extension<P: AsRef<Path>>(path: P) -> Option<String> {
    split_extension(path.as_ref()).map(|(_, ext)| ext.to_string())
}

/// The given path without its last extension.
/// A path without extension is returned unchanged.
pub fn root_name<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match split_extension(path) {
        Some((root, _)) => root,
        None => path.to_path_buf(),
    }
}

/// The root shared by both files of the pair: the last extension is
/// removed, or the last two when the name ends in `.gz`.
fn pair_root(path: &Path) -> PathBuf {
    let root = root_name(path);
    if extension(path).as_deref() == Some("gz") {
        root_name(root)
    } else {
        root
    }
}

/// The name of the header file (`root.hdr`) for any name of the pair.
pub fn header_file_name<P: AsRef<Path>>(path: P) -> PathBuf {
    append_suffix(pair_root(path.as_ref()), ".hdr")
}

/// The name of the volume file for any name of the pair. Names ending in
/// `.gz` resolve to `root.img.gz`, names ending in `.hdr` or `.img` resolve
/// to `root.img`. Other names have no volume file and yield `None`.
pub fn image_file_name<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("gz") => Some(append_suffix(pair_root(path), ".img.gz")),
        Some("img") | Some("hdr") => Some(append_suffix(root_name(path), ".img")),
        _ => None,
    }
}

/// The given path with `.gz` appended.
pub fn with_gz_suffix<P: AsRef<Path>>(path: P) -> PathBuf {
    append_suffix(path, ".gz")
}

/// The resolved names of an Analyze file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionFiles {
    /// The root name shared by both files.
    pub root: PathBuf,
    /// The header file, always `root.hdr`.
    pub header: PathBuf,
    /// The volume file, either `root.img` or `root.img.gz`.
    pub image: PathBuf,
    /// Whether the volume is gzip compressed, as told by the given name.
    pub compressed: bool,
}

impl CompanionFiles {
    /// Resolve the file pair from one of `root.hdr`, `root.img` or
    /// `root.img.gz`.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::InvalidFileName` if no volume file name can be
    /// derived from the given name.
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<CompanionFiles> {
        let path = path.as_ref();
        let image = image_file_name(path)
            .ok_or_else(|| AnalyzeError::InvalidFileName(path.to_path_buf()))?;
        let header = header_file_name(path);
        Ok(CompanionFiles {
            root: root_name(&header),
            header,
            image,
            compressed: extension(path).as_deref() == Some("gz"),
        })
    }

    /// The volume file of the opposite compression state, which must not
    /// coexist with `image` after a write.
    pub fn stale_image(&self) -> PathBuf {
        if self.compressed {
            append_suffix(&self.root, ".img")
        } else {
            append_suffix(&self.root, ".img.gz")
        }
    }
}

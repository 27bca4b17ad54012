//! Probing of file names and file contents for Analyze 7.5 images.

use crate::header::HEADER_SIZE;
use crate::path::{extension, header_file_name, root_name};
use crate::util::read_exact_or_eof;
use crate::volume::open_transparent;
use std::path::Path;
use tracing::debug;

/// Magic code of a NIfTI-1 header stored apart from its volume.
pub const MAGIC_CODE_NI1: &[u8; 4] = b"ni1\0";
/// Magic code of a single file NIfTI-1 image.
pub const MAGIC_CODE_NP1: &[u8; 4] = b"n+1\0";

const NAME_SUFFIXES: [&str; 3] = [".hdr", ".img", ".img.gz"];

fn has_analyze_suffix(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .map(|n| NAME_SUFFIXES.iter().any(|s| n.ends_with(s)))
        .unwrap_or(false)
}

/// Whether a raw header record carries a NIfTI-1 magic code, which makes
/// it a NIfTI header rather than an Analyze one.
pub fn is_nifti_header(raw: &[u8; HEADER_SIZE]) -> bool {
    let magic = &raw[HEADER_SIZE - 4..];
    magic == MAGIC_CODE_NI1 || magic == MAGIC_CODE_NP1
}

/// Check whether the given file can be read as an Analyze 7.5 image.
///
/// The name must end in `.hdr`, `.img` or `.img.gz`, and the header file
/// of the pair must hold a full 348 byte record which is not a NIfTI-1
/// header. The volume file is not looked at. This function never fails:
/// any error counts as a negative answer.
pub fn can_read_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if !has_analyze_suffix(path) {
        return false;
    }

    let header_path = header_file_name(path);
    let mut ext = extension(&header_path);
    if ext.as_deref() == Some("gz") {
        ext = extension(root_name(&header_path));
    }
    if !matches!(ext.as_deref(), Some("hdr") | Some("img")) {
        return false;
    }

    let mut raw = [0u8; HEADER_SIZE];
    let read = open_transparent(&header_path)
        .map_err(Into::into)
        .and_then(|reader| read_exact_or_eof(reader, &mut raw));
    if let Err(e) = read {
        debug!(path = %header_path.display(), error = %e, "no readable Analyze header");
        return false;
    }
    !is_nifti_header(&raw)
}

/// Check whether an image can be written under the given name, which must
/// end in `.hdr`, `.img` or `.img.gz`.
pub fn can_write_file<P: AsRef<Path>>(path: P) -> bool {
    has_analyze_suffix(path.as_ref())
}

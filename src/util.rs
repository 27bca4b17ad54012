//! Private utility module
use crate::error::{AnalyzeError, Result};
use byteordered::Endianness;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// The two leading bytes of every gzip member.
pub(crate) const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Fill the buffer completely, reporting a short source as
/// `AnalyzeError::UnexpectedEof` rather than a generic I/O error.
pub(crate) fn read_exact_or_eof<R: Read>(mut source: R, buf: &mut [u8]) -> Result<()> {
    source.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            AnalyzeError::UnexpectedEof
        } else {
            AnalyzeError::Io(e)
        }
    })
}

/// Whether values in the given byte order must be swapped to be
/// interpreted on this machine.
pub(crate) fn needs_swap(e: Endianness) -> bool {
    e != Endianness::native()
}

/// Reverse the bytes of every `unit`-sized element in the buffer.
/// A trailing partial element is left untouched.
pub(crate) fn swap_units(buf: &mut [u8], unit: usize) {
    if unit < 2 {
        return;
    }
    for chunk in buf.chunks_exact_mut(unit) {
        chunk.reverse();
    }
}

pub(crate) fn swap_f32(v: f32) -> f32 {
    f32::from_bits(v.to_bits().swap_bytes())
}

/// Check whether the file's name ends with ".gz".
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

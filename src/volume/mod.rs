//! This module moves the voxel data of an Analyze image between the
//! volume file and memory.
//!
//! Volume files are opened with transparent decompression: a file starting
//! with the gzip magic number is decoded on the fly, whatever its name.
//! Voxels are kept in memory as raw bytes in this machine's byte order,
//! and are written in that same order. Typed access to the voxels goes
//! through the [`DataElement`] trait, and optionally through `ndarray`
//! with the `ndarray_volumes` feature.
//!
//! [`DataElement`]: element/trait.DataElement.html

pub mod element;
#[cfg(feature = "ndarray_volumes")]
pub mod ndarray;

pub use self::element::DataElement;

use crate::error::{AnalyzeError, Result};
use crate::image::ImageInformation;
use crate::path::{image_file_name, with_gz_suffix, CompanionFiles};
use crate::typedef::AnalyzeType;
use crate::util::{needs_swap, read_exact_or_eof, swap_units, GZIP_MAGIC};
use byteordered::Endianness;
use either::Either;
use flate2::bufread::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file reader which decodes gzip content transparently.
pub type TransparentReader = Either<MultiGzDecoder<BufReader<File>>, BufReader<File>>;

/// Open a file for reading, decoding it as a gzip stream if it starts with
/// the gzip magic number. The file name plays no part in this decision.
pub fn open_transparent<P: AsRef<Path>>(path: P) -> io::Result<TransparentReader> {
    let mut reader = BufReader::new(File::open(path)?);
    let gz = {
        let head = reader.fill_buf()?;
        head.len() >= GZIP_MAGIC.len() && head[..GZIP_MAGIC.len()] == GZIP_MAGIC
    };
    Ok(if gz {
        Either::Left(MultiGzDecoder::new(reader))
    } else {
        Either::Right(reader)
    })
}

/// Open the volume file of an image pair. The name derived from `path` is
/// tried first, then the same name with `.gz` appended.
///
/// # Errors
///
/// - `AnalyzeError::InvalidFileName` if `path` is not a name of an
/// Analyze file pair.
/// - `AnalyzeError::MissingVolumeFile` if neither file can be opened.
pub fn open_volume<P: AsRef<Path>>(path: P) -> Result<(PathBuf, TransparentReader)> {
    let path = path.as_ref();
    let primary = image_file_name(path)
        .ok_or_else(|| AnalyzeError::InvalidFileName(path.to_path_buf()))?;
    match open_transparent(&primary) {
        Ok(reader) => return Ok((primary, reader)),
        Err(e) => debug!(path = %primary.display(), error = %e, "volume file not opened"),
    }
    let fallback = with_gz_suffix(&primary);
    match open_transparent(&fallback) {
        Ok(reader) => Ok((fallback, reader)),
        Err(e) => {
            debug!(path = %fallback.display(), error = %e, "volume file not opened");
            Err(AnalyzeError::MissingVolumeFile(vec![primary, fallback]))
        }
    }
}

/// Read the voxels of the image pair named by `path` into `buf`, which
/// must be exactly as long as the image described by `info`. The voxels
/// are converted to this machine's byte order.
///
/// # Errors
///
/// - `AnalyzeError::IncompatibleLength` if `buf` has the wrong length.
/// - `AnalyzeError::UnexpectedEof` if the volume file is too short.
/// - `AnalyzeError::UnsupportedDataType` if the data type of the image
/// has no voxel size.
/// - any error from [`open_volume`](fn.open_volume.html).
pub fn read_image_data<P: AsRef<Path>>(
    path: P,
    info: &ImageInformation,
    buf: &mut [u8],
) -> Result<()> {
    read_raw_image_data(path, info, buf)?;
    swap_samples(buf, info.data_type, info.byte_order)
}

/// Like [`read_image_data`](fn.read_image_data.html), but the voxels are
/// left in the byte order of the file, `info.byte_order`.
pub fn read_raw_image_data<P: AsRef<Path>>(
    path: P,
    info: &ImageInformation,
    buf: &mut [u8],
) -> Result<()> {
    let (file, reader) = open_volume(path)?;
    debug!(path = %file.display(), bytes = buf.len(), offset = info.data_offset, "reading voxels");
    read_voxels(reader, info, buf)
}

/// Read the voxels of an image from a volume stream positioned at the
/// start of the volume file, skipping `info.data_offset` bytes first. The
/// voxels are left in the byte order of the stream.
///
/// # Errors
///
/// - `AnalyzeError::IncompatibleLength` if `buf` has the wrong length.
/// - `AnalyzeError::UnexpectedEof` if the stream is too short.
pub fn read_voxels<R: Read>(mut source: R, info: &ImageInformation, buf: &mut [u8]) -> Result<()> {
    let expected = info.image_size_in_bytes()?;
    if buf.len() != expected {
        return Err(AnalyzeError::IncompatibleLength(expected, buf.len()));
    }
    if info.data_offset > 0 {
        let skipped = io::copy(&mut (&mut source).take(info.data_offset), &mut io::sink())?;
        if skipped < info.data_offset {
            return Err(AnalyzeError::UnexpectedEof);
        }
    }
    read_exact_or_eof(source, buf)
}

/// Convert voxels between the given byte order and this machine's,
/// sample by sample. Complex voxels are swapped per component and RGB
/// voxels are left as they are.
///
/// # Errors
///
/// - `AnalyzeError::UnsupportedDataType` for `Unknown` and `All`, whether
/// or not a swap is needed.
pub fn swap_samples(buf: &mut [u8], data_type: AnalyzeType, order: Endianness) -> Result<()> {
    let unit = data_type.swap_unit()?;
    if needs_swap(order) {
        swap_units(buf, unit);
    }
    Ok(())
}

/// Write the voxels to the volume file of the pair, gzip compressed if
/// the pair is compressed, and remove the volume file of the opposite
/// compression state if one exists.
///
/// # Errors
///
/// - `AnalyzeError::CreateFile` or `AnalyzeError::WriteFile`, naming the
/// volume file.
pub fn write_image_data(
    files: &CompanionFiles,
    data: &[u8],
    compression: Compression,
) -> Result<()> {
    let target = &files.image;
    let write_err = |e: io::Error| AnalyzeError::WriteFile(target.clone(), e);
    let file = File::create(target).map_err(|e| AnalyzeError::CreateFile(target.clone(), e))?;
    let mut writer = BufWriter::new(file);
    debug!(path = %target.display(), bytes = data.len(), compressed = files.compressed, "writing voxels");

    if files.compressed {
        let mut encoder = GzEncoder::new(writer, compression);
        encoder.write_all(data).map_err(write_err)?;
        encoder
            .finish()
            .and_then(|mut w| w.flush())
            .map_err(write_err)?;
    } else {
        writer.write_all(data).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }

    remove_stale(&files.stale_image());
    Ok(())
}

fn remove_stale(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed stale volume file"),
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not remove stale volume file"),
    }
}

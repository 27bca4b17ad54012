//! Utility functions to write Analyze 7.5 images.
//!
//! An image is written as a file pair: the header first, then the volume.
//! Voxels are written in this machine's byte order, which is also the byte
//! order of the header.

use crate::error::{AnalyzeError, Result};
use crate::header::AnalyzeHeader;
use crate::image::ImageInformation;
use crate::path::CompanionFiles;
use crate::volume::{write_image_data, DataElement};
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(feature = "ndarray_volumes")]
use crate::volume::ndarray::to_fortran_vec;
#[cfg(feature = "ndarray_volumes")]
use ndarray::{ArrayBase, Data, Dimension};

/// Options for writing an Analyze image pair.
///
/// The target name can be any name of the pair. A name ending in `.gz`
/// gets a gzip compressed volume file (`root.img.gz`), any other name a
/// plain one (`root.img`). The header is always written to `root.hdr`.
///
/// # Example
///
/// ```no_run
/// use analyze::{AnalyzeType, ImageInformation, WriterOptions};
/// # use analyze::Result;
///
/// # fn run() -> Result<()> {
/// let info = ImageInformation::new(AnalyzeType::Uint8, &[64, 64, 32]);
/// let voxels = vec![0u8; 64 * 64 * 32];
/// WriterOptions::new("brain.img.gz").write_slice(&info, &voxels)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WriterOptions {
    path: PathBuf,
    compression: Compression,
}

impl WriterOptions {
    /// Options for writing to the given path, with the default
    /// compression level.
    pub fn new<P: AsRef<Path>>(path: P) -> WriterOptions {
        WriterOptions {
            path: path.as_ref().to_path_buf(),
            compression: Compression::default(),
        }
    }

    /// Set the compression level of gzip compressed volume files.
    pub fn compression(mut self, compression: Compression) -> WriterOptions {
        self.compression = compression;
        self
    }

    /// Write the header of the image, and return it.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::InvalidFileName` if the target is not a name of an
    /// Analyze file pair.
    /// - `AnalyzeError::CreateFile` or `AnalyzeError::WriteFile`, naming
    /// the header file.
    /// - any error from [`ImageInformation::to_header`].
    ///
    /// [`ImageInformation::to_header`]: ../image/struct.ImageInformation.html#method.to_header
    pub fn write_header(&self, info: &ImageInformation) -> Result<AnalyzeHeader> {
        let files = CompanionFiles::resolve(&self.path)?;
        let header = info.to_header()?;
        write_header_file(&files.header, &header)?;
        Ok(header)
    }

    /// Write the image pair, with the voxels given as raw bytes in this
    /// machine's byte order.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::IncompatibleLength` if `data` does not have the
    /// size of the image. Nothing is written in this case.
    /// - any error from [`write_header`](#method.write_header), or while
    /// writing the volume file.
    pub fn write_image(&self, info: &ImageInformation, data: &[u8]) -> Result<()> {
        let files = CompanionFiles::resolve(&self.path)?;
        let header = info.to_header()?;
        let expected = info.image_size_in_bytes()?;
        if data.len() != expected {
            return Err(AnalyzeError::IncompatibleLength(expected, data.len()));
        }
        write_header_file(&files.header, &header)?;
        write_image_data(&files, data, self.compression)
    }

    /// Write the image pair, with the voxels given as elements of the
    /// Rust type of the image's data type.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::UnsupportedDataType` if `T` does not represent the
    /// image's data type.
    /// - any error from [`write_image`](#method.write_image).
    pub fn write_slice<T: DataElement>(&self, info: &ImageInformation, data: &[T]) -> Result<()> {
        if T::DATA_TYPE != info.data_type {
            return Err(AnalyzeError::UnsupportedDataType(info.data_type));
        }
        self.write_image(info, &T::to_native_bytes(data))
    }

    /// Write an array as an image pair. The dimensions and data type of the
    /// image come from the array; everything else is taken from
    /// `reference` when given.
    #[cfg(feature = "ndarray_volumes")]
    pub fn write_ndarray<T, S, D>(
        &self,
        array: &ArrayBase<S, D>,
        reference: Option<&ImageInformation>,
    ) -> Result<()>
    where
        T: DataElement,
        S: Data<Elem = T>,
        D: Dimension,
    {
        let mut info = match reference {
            Some(r) => r.clone(),
            None => ImageInformation::new(T::DATA_TYPE, array.shape()),
        };
        info.dimensions = array.shape().to_vec();
        info.spacing.resize(info.dimensions.len(), 1.);
        info.data_type = T::DATA_TYPE;
        self.write_slice(&info, &to_fortran_vec(array))
    }
}

fn write_header_file(path: &Path, header: &AnalyzeHeader) -> Result<()> {
    let raw = header.to_bytes()?;
    let file = File::create(path).map_err(|e| AnalyzeError::CreateFile(path.to_path_buf(), e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&raw)
        .and_then(|_| writer.flush())
        .map_err(|e| AnalyzeError::WriteFile(path.to_path_buf(), e))?;
    debug!(path = %path.display(), orient = header.orient, "wrote Analyze header");
    Ok(())
}

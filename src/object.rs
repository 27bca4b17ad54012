//! Module for handling and retrieving complete Analyze 7.5 objects.

use crate::error::{AnalyzeError, Result};
use crate::header::AnalyzeHeader;
use crate::image::ImageInformation;
use crate::typedef::AnalyzeType;
use crate::util::needs_swap;
use crate::volume::{open_transparent, read_raw_image_data, read_voxels, swap_samples, DataElement};
use byteordered::Endianness;
use std::path::Path;
use tracing::debug;

/// Trait type for all possible implementations of owning Analyze objects.
/// Objects contain an Analyze header, the image information decoded from
/// it, and the voxels.
pub trait AnalyzeObject {
    /// Obtain a reference to the Analyze header.
    fn header(&self) -> &AnalyzeHeader;

    /// Obtain a reference to the image information.
    fn info(&self) -> &ImageInformation;

    /// Get the voxel data type.
    fn data_type(&self) -> AnalyzeType {
        self.info().data_type
    }
}

/// Options and flags which can be used to configure how an Analyze image
/// is read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    native_byte_order: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            native_byte_order: true,
        }
    }
}

impl ReaderOptions {
    /// Create a new set of options, with all flags at their default.
    pub fn new() -> ReaderOptions {
        ReaderOptions::default()
    }

    /// Whether voxels are converted to this machine's byte order while
    /// reading (the default). When disabled, voxels are kept in the byte
    /// order of the file, and converted on typed access.
    pub fn native_byte_order(&mut self, native: bool) -> &mut Self {
        self.native_byte_order = native;
        self
    }

    /// Retrieve the full contents of an Analyze image pair, from any of
    /// its names (`.hdr`, `.img` or `.img.gz`). If the volume file is not
    /// found under its name, the same name with `.gz` appended is tried.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use analyze::ReaderOptions;
    /// # use analyze::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = ReaderOptions::new().read_file("brain.hdr")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<InMemAnalyzeObject> {
        let path = path.as_ref();
        let header = AnalyzeHeader::from_file(path)?;
        let info = ImageInformation::from_header(&header)?;
        let mut data = vec![0u8; info.image_size_in_bytes()?];
        read_raw_image_data(path, &info, &mut data)?;
        self.finish(header, info, data)
    }

    /// Retrieve an Analyze image from separate header and volume files.
    /// This method is useful when file names are not conventional for an
    /// Analyze file pair. Both files may be gzip compressed.
    pub fn read_file_pair<P, Q>(&self, hdr_path: P, vol_path: Q) -> Result<InMemAnalyzeObject>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let header = AnalyzeHeader::from_reader(open_transparent(hdr_path)?)?;
        let info = ImageInformation::from_header(&header)?;
        let mut data = vec![0u8; info.image_size_in_bytes()?];
        read_voxels(open_transparent(vol_path)?, &info, &mut data)?;
        self.finish(header, info, data)
    }

    fn finish(
        &self,
        header: AnalyzeHeader,
        info: ImageInformation,
        mut data: Vec<u8>,
    ) -> Result<InMemAnalyzeObject> {
        let mut byte_order = info.byte_order;
        if self.native_byte_order {
            swap_samples(&mut data, info.data_type, byte_order)?;
            byte_order = Endianness::native();
        }
        debug!(bytes = data.len(), ?byte_order, "read Analyze volume");
        Ok(InMemAnalyzeObject {
            header,
            info,
            data,
            byte_order,
        })
    }
}

/// Data type for an Analyze object that is fully contained in memory.
#[derive(Debug, PartialEq, Clone)]
pub struct InMemAnalyzeObject {
    header: AnalyzeHeader,
    info: ImageInformation,
    data: Vec<u8>,
    byte_order: Endianness,
}

impl InMemAnalyzeObject {
    /// Retrieve the full contents of an Analyze image pair with the
    /// default reader options.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<InMemAnalyzeObject> {
        ReaderOptions::new().read_file(path)
    }

    /// The raw voxel bytes, in the order given by
    /// [`data_byte_order`](#method.data_byte_order).
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// The byte order of the raw voxel bytes.
    pub fn data_byte_order(&self) -> Endianness {
        self.byte_order
    }

    /// Move the raw voxel bytes out of the object.
    pub fn into_raw_data(self) -> Vec<u8> {
        self.data
    }

    /// Move the voxels out of the object, in this machine's byte order.
    pub fn into_native_data(mut self) -> Result<Vec<u8>> {
        if needs_swap(self.byte_order) {
            swap_samples(&mut self.data, self.info.data_type, self.byte_order)?;
        }
        Ok(self.data)
    }

    /// Move the voxels out of the object as elements of type `T`, which
    /// must be the Rust type of the image's data type.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::UnsupportedDataType` if `T` does not represent the
    /// image's data type.
    pub fn into_vec<T: DataElement>(self) -> Result<Vec<T>> {
        let data_type = self.info.data_type;
        if T::DATA_TYPE != data_type {
            return Err(AnalyzeError::UnsupportedDataType(data_type));
        }
        T::from_native_bytes(&self.into_native_data()?)
    }
}

impl AnalyzeObject for InMemAnalyzeObject {
    fn header(&self) -> &AnalyzeHeader {
        &self.header
    }

    fn info(&self) -> &ImageInformation {
        &self.info
    }
}

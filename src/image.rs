//! The geometry and meta-data of an image, independent of its voxels.
//!
//! `ImageInformation` is what a reader extracts from an Analyze header and
//! what a writer turns back into one. Dimensions are trimmed of trailing
//! singleton axes on read and padded back to at least four on write.

use crate::bridge::{dictionary_to_header, header_orientation, header_to_dictionary};
use crate::error::{AnalyzeError, Result};
use crate::header::{set_text_field, AnalyzeHeader};
use crate::metadata::MetaDataDictionary;
use crate::orientation::{Direction, IDENTITY_DIRECTION};
use crate::typedef::AnalyzeType;
use byteordered::Endianness;
use std::path::Path;
use tracing::{debug, warn};

/// The largest number of dimensions an Analyze header can describe.
pub const MAX_DIMENSIONS: usize = 7;

/// Geometry, voxel type and meta-data of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInformation {
    /// Extent of each axis, without trailing singleton axes.
    pub dimensions: Vec<usize>,
    /// Voxel spacing along each axis. Missing entries are taken as 1.
    pub spacing: Vec<f64>,
    /// Direction cosines of the first three axes, one column per axis.
    pub direction: Direction,
    /// Voxel data type.
    pub data_type: AnalyzeType,
    /// Byte order of the voxels in the volume file.
    pub byte_order: Endianness,
    /// Number of bytes to skip at the start of the volume file.
    pub data_offset: u64,
    /// Everything else found in the header.
    pub metadata: MetaDataDictionary,
}

impl ImageInformation {
    /// Describe a new image with unit spacing, identity direction and an
    /// empty dictionary, in this machine's byte order.
    pub fn new(data_type: AnalyzeType, dimensions: &[usize]) -> ImageInformation {
        ImageInformation {
            dimensions: dimensions.to_vec(),
            spacing: vec![1.; dimensions.len()],
            direction: IDENTITY_DIRECTION,
            data_type,
            byte_order: Endianness::native(),
            data_offset: 0,
            metadata: MetaDataDictionary::new(),
        }
    }

    /// Read the image information of an Analyze file pair, from any of
    /// its names.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ImageInformation> {
        let header = AnalyzeHeader::from_file(path)?;
        ImageInformation::from_header(&header)
    }

    /// Extract the image information from a header.
    ///
    /// An unknown `datatype` code is kept as `AnalyzeType::Unknown`: the
    /// information is still usable, but voxels can not be read.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::InvalidFormat` if `dim[0]` is not between 1 and 7,
    /// or if a retained axis has an extent below 1.
    pub fn from_header(header: &AnalyzeHeader) -> Result<ImageInformation> {
        let ndims = trimmed_rank(&header.dim)?;
        let dimensions = header.dim[1..=ndims]
            .iter()
            .map(|&d| d as usize)
            .collect();
        let spacing = header.pixdim[1..=ndims]
            .iter()
            .map(|&p| f64::from(p))
            .collect();

        let data_type = header.data_type().unwrap_or_else(|_| {
            warn!(datatype = header.datatype, "unknown Analyze data type");
            AnalyzeType::Unknown
        });

        let orientation = header_orientation(header);
        let data_offset = if header.vox_offset.is_finite() && header.vox_offset > 0. {
            header.vox_offset as u64
        } else {
            0
        };
        debug!(ndims, ?data_type, %orientation, data_offset, "decoded Analyze image information");

        Ok(ImageInformation {
            dimensions,
            spacing,
            direction: orientation.to_direction_cosines(),
            data_type,
            byte_order: header.endianness,
            data_offset,
            metadata: header_to_dictionary(header, orientation, ndims),
        })
    }

    /// Build the header describing this image, in this machine's byte
    /// order.
    ///
    /// `dim[0]` is at least 4, with the unused axes set to 1. The data
    /// type fields and the conventional global range of the type are
    /// filled in first, then the meta-data dictionary is applied.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::InvalidDimensions` if there are no dimensions,
    /// more than 7, an extent which is zero or does not fit the header, or
    /// a voxel count which does not fit in memory.
    /// - `AnalyzeError::UnsupportedDataType` if the data type has no voxel
    /// size.
    pub fn to_header(&self) -> Result<AnalyzeHeader> {
        let ndims = self.dimensions.len();
        let fits = |&d: &usize| d >= 1 && d <= i16::MAX as usize;
        if ndims == 0
            || ndims > MAX_DIMENSIONS
            || !self.dimensions.iter().all(fits)
            || self.number_of_voxels().is_none()
        {
            return Err(AnalyzeError::InvalidDimensions(self.dimensions.clone()));
        }
        if !self.data_type.is_voxel_type() {
            return Err(AnalyzeError::UnsupportedDataType(self.data_type));
        }

        let mut header = AnalyzeHeader::default();
        header.dim[0] = ndims.max(4) as i16;
        for (slot, &d) in header.dim[1..].iter_mut().zip(&self.dimensions) {
            *slot = d as i16;
        }
        for (slot, &s) in header.pixdim[1..=ndims].iter_mut().zip(&self.spacing) {
            *slot = s as f32;
        }

        let info = self.data_type.info();
        header.datatype = info.code;
        header.bitpix = info.bits;
        set_text_field(&mut header.data_type, info.legacy_name);
        let (glmax, glmin) = self.data_type.global_range();
        header.glmax = glmax;
        header.glmin = glmin;

        dictionary_to_header(&self.metadata, &self.direction, &mut header);
        Ok(header)
    }

    /// The number of dimensions of the image.
    pub fn number_of_dimensions(&self) -> usize {
        self.dimensions.len()
    }

    /// The total number of voxels, or `None` if it overflows `usize`.
    pub fn number_of_voxels(&self) -> Option<usize> {
        self.dimensions
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// The size of the voxel data, in bytes.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::UnsupportedDataType` if the data type has no voxel
    /// size.
    /// - `AnalyzeError::InvalidDimensions` if the size overflows `usize`.
    pub fn image_size_in_bytes(&self) -> Result<usize> {
        let voxel_size = self.data_type.size_of()?;
        self.number_of_voxels()
            .and_then(|n| n.checked_mul(voxel_size))
            .ok_or_else(|| AnalyzeError::InvalidDimensions(self.dimensions.clone()))
    }
}

/// The number of dimensions of a `dim` field once trailing axes with an
/// extent of 1 or less are removed. At least one dimension is kept.
fn trimmed_rank(dim: &[i16; 8]) -> Result<usize> {
    if dim[0] < 1 || dim[0] as usize > MAX_DIMENSIONS {
        return Err(AnalyzeError::InvalidFormat);
    }
    let mut n = dim[0] as usize;
    while n > 1 && dim[n] <= 1 {
        n -= 1;
    }
    if dim[1..=n].iter().any(|&d| d < 1) {
        return Err(AnalyzeError::InvalidFormat);
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{GLMAX, GLMIN};
    use crate::orientation::CoordinateOrientation;

    #[test]
    fn trailing_singletons_are_trimmed() {
        assert_eq!(trimmed_rank(&[4, 50, 27, 1, 1, 1, 1, 1]).unwrap(), 2);
        assert_eq!(trimmed_rank(&[4, 1, 1, 1, 1, 1, 1, 1]).unwrap(), 1);
        assert_eq!(trimmed_rank(&[3, 2, 1, 5, 9, 1, 1, 1]).unwrap(), 3);
        assert_eq!(trimmed_rank(&[4, 2, 2, 0, -1, 1, 1, 1]).unwrap(), 2);
        assert!(trimmed_rank(&[0, 2, 2, 2, 1, 1, 1, 1]).is_err());
        assert!(trimmed_rank(&[8, 2, 2, 2, 1, 1, 1, 1]).is_err());
        assert!(trimmed_rank(&[2, 0, 1, 1, 1, 1, 1, 1]).is_err());
        assert!(trimmed_rank(&[3, 4, 0, 5, 1, 1, 1, 1]).is_err());
    }

    #[test]
    fn header_from_information() {
        let mut info = ImageInformation::new(AnalyzeType::Uint8, &[50, 27]);
        info.spacing = vec![0.5, 2.];
        info.direction = CoordinateOrientation::RPI.to_direction_cosines();
        let h = info.to_header().unwrap();
        assert_eq!(h.dim, [4, 50, 27, 1, 1, 1, 1, 1]);
        assert_eq!(&h.pixdim[..4], &[0., 0.5, 2., 1.]);
        assert_eq!(h.datatype, 2);
        assert_eq!(h.bitpix, 8);
        assert_eq!(&h.data_type[..5], b"CHAR\0");
        assert_eq!((h.glmax, h.glmin), (255, 0));
        assert_eq!(h.orient, 0);
        assert_eq!(h.endianness, Endianness::native());
    }

    #[test]
    fn metadata_overrides_the_global_range() {
        let mut info = ImageInformation::new(AnalyzeType::Int16, &[4, 4, 4]);
        let h = info.to_header().unwrap();
        assert_eq!((h.glmax, h.glmin), (0, 0));
        info.metadata.insert(GLMAX, 1200);
        info.metadata.insert(GLMIN, -5);
        let h = info.to_header().unwrap();
        assert_eq!((h.glmax, h.glmin), (1200, -5));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        for dims in &[vec![], vec![2; 8], vec![4, 0], vec![40_000, 2]] {
            let info = ImageInformation::new(AnalyzeType::Float32, dims);
            match info.to_header() {
                Err(AnalyzeError::InvalidDimensions(d)) => assert_eq!(&d, dims),
                other => panic!("unexpected result {:?}", other),
            }
        }
        let info = ImageInformation::new(AnalyzeType::Unknown, &[2, 2]);
        match info.to_header() {
            Err(AnalyzeError::UnsupportedDataType(AnalyzeType::Unknown)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn information_from_header() {
        let mut h = AnalyzeHeader::default();
        h.dim = [4, 8, 6, 3, 1, 1, 1, 1];
        h.pixdim = [0., 1.5, 1.5, 3., 1., 1., 1., 1.];
        h.datatype = AnalyzeType::Float32 as i16;
        h.orient = 1;
        h.vox_offset = 16.;
        let info = ImageInformation::from_header(&h).unwrap();
        assert_eq!(info.dimensions, vec![8, 6, 3]);
        assert_eq!(info.spacing, vec![1.5, 1.5, 3.]);
        assert_eq!(info.direction, CoordinateOrientation::RIP.to_direction_cosines());
        assert_eq!(info.data_offset, 16);
        assert_eq!(info.number_of_voxels(), Some(144));
        assert_eq!(info.image_size_in_bytes().unwrap(), 576);
    }

    #[test]
    fn unknown_data_type_is_kept() {
        let mut h = AnalyzeHeader::default();
        h.dim = [4, 8, 8, 1, 1, 1, 1, 1];
        h.datatype = 3;
        let info = ImageInformation::from_header(&h).unwrap();
        assert_eq!(info.data_type, AnalyzeType::Unknown);
        assert!(info.image_size_in_bytes().is_err());
    }

    #[test]
    fn oversized_dimensions_are_an_error() {
        let mut h = AnalyzeHeader::default();
        h.dim = [7, 32767, 32767, 32767, 32767, 32767, 32767, 32767];
        h.datatype = AnalyzeType::Int16 as i16;
        let info = ImageInformation::from_header(&h).unwrap();
        assert_eq!(info.number_of_voxels(), None);
        match info.image_size_in_bytes() {
            Err(AnalyzeError::InvalidDimensions(dims)) => assert_eq!(dims, vec![32767; 7]),
            other => panic!("unexpected result {:?}", other),
        }
        match info.to_header() {
            Err(AnalyzeError::InvalidDimensions(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}

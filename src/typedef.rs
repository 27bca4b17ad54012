//! This module contains the code tables defined by the Analyze 7.5
//! format: the voxel data types and the slice orientation codes.
//! Primitive header values can be converted to these types and vice-versa.

use crate::error::{AnalyzeError, Result};
use crate::orientation::CoordinateOrientation;
use num_traits::FromPrimitive;

/// Data type for representing an Analyze value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum AnalyzeType {
    /// Unknown data type.
    // DT_UNKNOWN                 0
    Unknown = 0,
    /// Binary data, stored here as one byte per voxel.
    // DT_BINARY                  1
    Binary = 1,
    /// unsigned char.
    // DT_UNSIGNED_CHAR           2
    Uint8 = 2,
    /// signed short.
    // DT_SIGNED_SHORT            4
    Int16 = 4,
    /// unsigned short, an SPM extension.
    // SPM DT_UNSIGNED_SHORT      6
    Uint16 = 6,
    /// signed int.
    // DT_SIGNED_INT              8
    Int32 = 8,
    /// unsigned int, an SPM extension.
    // SPM DT_UNSIGNED_INT       12
    Uint32 = 12,
    /// 32 bit float.
    // DT_FLOAT                  16
    Float32 = 16,
    /// 64 bit complex = 2 32 bit floats.
    // DT_COMPLEX                32
    Complex = 32,
    /// 64 bit float = double.
    // DT_DOUBLE                 64
    Float64 = 64,
    /// 3 8 bit bytes.
    // DT_RGB                   128
    Rgb = 128,
    /// Placeholder code for all types.
    // DT_ALL                   255
    All = 255,
}

/// The header encoding of a data type: the `datatype` code, the `bitpix`
/// value and the legacy name stored in `data_type`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DataTypeInfo {
    /// Value of the `datatype` field.
    pub code: i16,
    /// Value of the `bitpix` field.
    pub bits: i16,
    /// Legacy textual name, as written to the `data_type` field.
    pub legacy_name: &'static str,
}

impl AnalyzeType {
    /// Map a `datatype` header code to a data type.
    pub fn from_code(code: i16) -> Option<AnalyzeType> {
        FromPrimitive::from_i16(code)
    }

    /// The header encoding of this data type.
    ///
    /// Note that the legacy name of `Uint8` is `"CHAR"`.
    pub fn info(self) -> DataTypeInfo {
        use AnalyzeType::*;
        let (bits, legacy_name) = match self {
            Unknown => (0, "UNKNOWN"),
            Binary => (1, "BINARY"),
            Uint8 => (8, "CHAR"),
            Int16 => (16, "SHORT"),
            Int32 => (32, "INT"),
            Float32 => (32, "FLOAT"),
            Complex => (64, "COMPLEX"),
            Float64 => (64, "DOUBLE"),
            Rgb => (24, "RGB"),
            All => (0, "ALL"),
            Uint16 => (16, "USHORT"),
            Uint32 => (32, "UINT"),
        };
        DataTypeInfo {
            code: self as i16,
            bits,
            legacy_name,
        }
    }

    /// Retrieve the size of an element of this data type, in bytes.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::UnsupportedDataType` for `Unknown` and `All`,
    /// which do not describe voxel values.
    pub fn size_of(self) -> Result<usize> {
        use AnalyzeType::*;
        match self {
            Binary | Uint8 => Ok(1),
            Int16 | Uint16 => Ok(2),
            Rgb => Ok(3),
            Int32 | Uint32 | Float32 => Ok(4),
            Float64 | Complex => Ok(8),
            Unknown | All => Err(AnalyzeError::UnsupportedDataType(self)),
        }
    }

    /// Whether this type describes voxel values, which is every type but
    /// `Unknown` and `All`.
    pub fn is_voxel_type(self) -> bool {
        !matches!(self, AnalyzeType::Unknown | AnalyzeType::All)
    }

    /// The size of the units that are subject to byte swapping, in bytes.
    /// This is the element size, except for complex values, which are
    /// swapped per component, and RGB triples, which are never swapped.
    pub fn swap_unit(self) -> Result<usize> {
        match self {
            AnalyzeType::Complex => Ok(4),
            AnalyzeType::Rgb => Ok(1),
            t => t.size_of(),
        }
    }

    /// The platform independent name of the type used to keep this data
    /// type in memory, if it is a scalar type.
    pub fn storage_type_name(self) -> Option<&'static str> {
        use AnalyzeType::*;
        match self {
            Binary => Some("i8"),
            Uint8 => Some("u8"),
            Int16 => Some("i16"),
            Uint16 => Some("u16"),
            Int32 => Some("i32"),
            Uint32 => Some("u32"),
            Float32 => Some("f32"),
            Float64 => Some("f64"),
            Complex | Rgb | Unknown | All => None,
        }
    }

    /// Inverse of [`storage_type_name`](#method.storage_type_name).
    pub fn from_storage_type_name(name: &str) -> Option<AnalyzeType> {
        use AnalyzeType::*;
        match name {
            "i8" => Some(Binary),
            "u8" => Some(Uint8),
            "i16" => Some(Int16),
            "u16" => Some(Uint16),
            "i32" => Some(Int32),
            "u32" => Some(Uint32),
            "f32" => Some(Float32),
            "f64" => Some(Float64),
            _ => None,
        }
    }

    /// The conventional `(glmax, glmin)` pair written for this type.
    /// Only types with a fixed range have one; `(0, 0)` stands for unknown.
    pub fn global_range(self) -> (i32, i32) {
        match self {
            AnalyzeType::Binary => (1, 0),
            AnalyzeType::Uint8 | AnalyzeType::Rgb => (255, 0),
            _ => (0, 0),
        }
    }
}

/// An enum type for the slice orientation code in the `orient` field.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum AnalyzeOrientation {
    /// transverse unflipped, RPI.
    TransverseUnflipped = 0,
    /// coronal unflipped, RIP.
    CoronalUnflipped = 1,
    /// sagittal unflipped, PIR.
    SagittalUnflipped = 2,
    /// transverse flipped (read only).
    TransverseFlipped = 3,
    /// coronal flipped (read only).
    CoronalFlipped = 4,
    /// sagittal flipped (read only).
    SagittalFlipped = 5,
}

impl AnalyzeOrientation {
    /// Map an `orient` header code to an orientation.
    pub fn from_code(code: i8) -> Option<AnalyzeOrientation> {
        FromPrimitive::from_i8(code)
    }

    /// Whether this is one of the three codes written by this crate.
    pub fn is_canonical(self) -> bool {
        (self as i8) < 3
    }

    /// The coordinate orientation of a canonical code. Flipped codes have
    /// no exact equivalent and yield `None`.
    pub fn to_coordinate_orientation(self) -> Option<CoordinateOrientation> {
        match self {
            AnalyzeOrientation::TransverseUnflipped => Some(CoordinateOrientation::RPI),
            AnalyzeOrientation::CoronalUnflipped => Some(CoordinateOrientation::RIP),
            AnalyzeOrientation::SagittalUnflipped => Some(CoordinateOrientation::PIR),
            _ => None,
        }
    }

    /// The canonical code of a coordinate orientation, if there is one.
    pub fn from_coordinate_orientation(o: CoordinateOrientation) -> Option<AnalyzeOrientation> {
        if o == CoordinateOrientation::RPI {
            Some(AnalyzeOrientation::TransverseUnflipped)
        } else if o == CoordinateOrientation::RIP {
            Some(AnalyzeOrientation::CoronalUnflipped)
        } else if o == CoordinateOrientation::PIR {
            Some(AnalyzeOrientation::SagittalUnflipped)
        } else {
            None
        }
    }
}

//! This module defines the data element API, which maps Rust types to
//! Analyze data types and converts voxel buffers from and to raw bytes.
//!
//! Raw voxel buffers are always in this machine's byte order, as produced
//! by the reader and expected by the writer.
use crate::error::{AnalyzeError, Result};
use crate::typedef::AnalyzeType;
use bytemuck::allocation::pod_collect_to_vec;
use bytemuck::{cast_slice, Pod};
use num_complex::Complex32;
use rgb::RGB8;

/// Trait type for characterizing an Analyze data element, implemented for
/// the types used by the crate to represent voxel values.
///
/// Binary voxels are represented by `i8`, one byte per voxel.
pub trait DataElement: 'static + Sized + Copy {
    /// The `datatype` mapped to this type.
    const DATA_TYPE: AnalyzeType;

    /// Convert native order bytes into elements.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::IncompatibleLength` if the byte count is not a
    /// multiple of the element size.
    fn from_native_bytes(bytes: &[u8]) -> Result<Vec<Self>>;

    /// Convert elements into native order bytes.
    fn to_native_bytes(data: &[Self]) -> Vec<u8>;
}

fn check_multiple(len: usize, size: usize) -> Result<()> {
    if len % size != 0 {
        let expected = len / size * size;
        return Err(AnalyzeError::IncompatibleLength(expected, len));
    }
    Ok(())
}

fn pod_from_bytes<T: Pod>(bytes: &[u8]) -> Result<Vec<T>> {
    check_multiple(bytes.len(), std::mem::size_of::<T>())?;
    Ok(pod_collect_to_vec(bytes))
}

macro_rules! impl_pod_element {
    ($($t:ty => $dtype:expr),* $(,)?) => {
        $(
            impl DataElement for $t {
                const DATA_TYPE: AnalyzeType = $dtype;

                fn from_native_bytes(bytes: &[u8]) -> Result<Vec<Self>> {
                    pod_from_bytes(bytes)
                }

                fn to_native_bytes(data: &[Self]) -> Vec<u8> {
                    cast_slice(data).to_vec()
                }
            }
        )*
    };
}

impl_pod_element! {
    i8 => AnalyzeType::Binary,
    u8 => AnalyzeType::Uint8,
    i16 => AnalyzeType::Int16,
    u16 => AnalyzeType::Uint16,
    i32 => AnalyzeType::Int32,
    u32 => AnalyzeType::Uint32,
    f32 => AnalyzeType::Float32,
    f64 => AnalyzeType::Float64,
    Complex32 => AnalyzeType::Complex,
}

impl DataElement for RGB8 {
    const DATA_TYPE: AnalyzeType = AnalyzeType::Rgb;

    fn from_native_bytes(bytes: &[u8]) -> Result<Vec<Self>> {
        check_multiple(bytes.len(), 3)?;
        Ok(bytes
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect())
    }

    fn to_native_bytes(data: &[Self]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len() * 3);
        for p in data {
            out.extend_from_slice(&[p.r, p.g, p.b]);
        }
        out
    }
}

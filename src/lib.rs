//! Rust implementation of the Analyze 7.5 file format.
//!
//! An Analyze image is a file pair: a 348 byte header (`.hdr`) and a raw
//! volume (`.img`, or `.img.gz` when gzip compressed). This crate reads and
//! writes both, detecting the byte order of the header on read.
//!
//! # Example
//!
//! ```no_run
//! use analyze::{AnalyzeObject, InMemAnalyzeObject, WriterOptions};
//! # use analyze::Result;
//!
//! # fn run() -> Result<()> {
//! let obj = InMemAnalyzeObject::read_file("brain.hdr")?;
//! let info = obj.info().clone();
//! println!("{:?} voxels of type {:?}", info.dimensions, info.data_type);
//!
//! WriterOptions::new("copy.img.gz").write_image(&info, obj.raw_data())?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

#[macro_use]
extern crate quick_error;
#[macro_use]
extern crate num_derive;

pub mod bridge;
pub mod detect;
pub mod error;
pub mod header;
pub mod image;
pub mod metadata;
pub mod object;
pub mod orientation;
pub mod path;
pub mod typedef;
mod util;
pub mod volume;
pub mod writer;

pub use byteordered::Endianness;
pub use detect::{can_read_file, can_write_file};
pub use error::{AnalyzeError, Result};
pub use header::AnalyzeHeader;
pub use image::ImageInformation;
pub use metadata::{MetaDataDictionary, MetaValue};
pub use object::{AnalyzeObject, InMemAnalyzeObject, ReaderOptions};
pub use orientation::{AnatomicalSide, CoordinateOrientation};
pub use path::CompanionFiles;
pub use typedef::{AnalyzeOrientation, AnalyzeType};
pub use util::is_gz_file;
#[cfg(feature = "ndarray_volumes")]
pub use volume::ndarray::IntoNdArray;
pub use volume::DataElement;
pub use writer::WriterOptions;

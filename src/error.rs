//! Types for error handling go here.

use crate::typedef::AnalyzeType;
use std::io::Error as IOError;
use std::path::PathBuf;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum AnalyzeError {
        /// An invalid Analyze 7.5 header was read.
        InvalidFormat {
            display("Invalid Analyze 7.5 file")
        }
        /// The source ended before the header or the volume were complete.
        UnexpectedEof {
            display("Unexpected end of file")
        }
        /// The given file name has no Analyze companion file name.
        InvalidFileName(path: PathBuf) {
            display("Can not determine Analyze file names from {}", path.display())
        }
        /// None of the candidate volume files could be opened.
        MissingVolumeFile(attempted: Vec<PathBuf>) {
            display("Analyze data file can not be read, attempted: {}", list_paths(attempted))
        }
        /// A file could not be created for writing.
        CreateFile(path: PathBuf, err: IOError) {
            source(err)
            display("Can not create {}: {}", path.display(), err)
        }
        /// Writing to a file ended in an error state.
        WriteFile(path: PathBuf, err: IOError) {
            source(err)
            display("Error writing {}: {}", path.display(), err)
        }
        /// The data type is not supported for this operation.
        UnsupportedDataType(t: AnalyzeType) {
            display("Unsupported data type {:?}", t)
        }
        /// A header field holds a code outside of its known set.
        InvalidCode(typename: &'static str, code: i16) {
            display("Invalid code `{}` for {}", code, typename)
        }
        /// The image dimensions can not be represented by the header.
        InvalidDimensions(dims: Vec<usize>) {
            display("Invalid image dimensions {:?}", dims)
        }
        /// The length of a voxel buffer does not match the image geometry.
        IncompatibleLength(expected: usize, got: usize) {
            display("Expected a voxel buffer of {} bytes, got {}", expected, got)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, AnalyzeError>;

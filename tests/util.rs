#![allow(dead_code)]

use analyze::header::set_text_field;
use analyze::{AnalyzeHeader, AnalyzeType, Endianness};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Known meta-data for the small synthetic test image.
pub fn small_header_gt() -> AnalyzeHeader {
    let mut descrip = [0; 80];
    set_text_field(&mut descrip, "synthetic phantom");
    AnalyzeHeader {
        dim: [4, 4, 3, 2, 1, 1, 1, 1],
        datatype: AnalyzeType::Int16 as i16,
        bitpix: 16,
        pixdim: [0., 1.5, 1.5, 3., 1., 1., 1., 1.],
        orient: 0,
        descrip,
        ..AnalyzeHeader::default()
    }
}

/// The voxels of the small synthetic test image.
pub fn small_volume_gt() -> Vec<i16> {
    (0..24).map(|v| v * 100 - 1000).collect()
}

/// Encode 16 bit voxels in the given byte order.
pub fn encode_i16(values: &[i16], endianness: Endianness) -> Vec<u8> {
    values
        .iter()
        .flat_map(|v| match endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        })
        .collect()
}

/// Write a file, gzip compressed if requested.
pub fn write_file<P: AsRef<Path>>(path: P, content: &[u8], gz: bool) {
    if gz {
        let mut e = GzEncoder::new(Vec::new(), Compression::fast());
        e.write_all(content).unwrap();
        fs::write(path, e.finish().unwrap()).unwrap();
    } else {
        fs::write(path, content).unwrap();
    }
}

/// Write the small synthetic image as `root.hdr` and `root.img` (or
/// `root.img.gz`), in the given byte order.
pub fn write_small_pair(dir: &Path, root: &str, endianness: Endianness, gz: bool) {
    let header = AnalyzeHeader {
        endianness,
        ..small_header_gt()
    };
    write_file(dir.join(format!("{}.hdr", root)), &header.to_bytes().unwrap(), false);
    let img = if gz {
        format!("{}.img.gz", root)
    } else {
        format!("{}.img", root)
    };
    write_file(dir.join(img), &encode_i16(&small_volume_gt(), endianness), gz);
}

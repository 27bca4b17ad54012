#[macro_use]
extern crate pretty_assertions;

use analyze::metadata::*;
use analyze::orientation::IDENTITY_DIRECTION;
use analyze::{
    AnalyzeError, AnalyzeHeader, AnalyzeObject, AnalyzeType, CoordinateOrientation, Endianness,
    ImageInformation, InMemAnalyzeObject, WriterOptions,
};
use flate2::Compression;
use std::fs;
use tempfile::tempdir;

mod util;

use util::small_volume_gt;

fn small_info() -> ImageInformation {
    let mut info = ImageInformation::new(AnalyzeType::Int16, &[4, 3, 2]);
    info.spacing = vec![0.9, 0.9, 2.5];
    info.direction = CoordinateOrientation::PIR.to_direction_cosines();
    info.metadata.insert(PATIENT_ID, "P-0042");
    info.metadata.insert(EXPERIMENT_DATE, "20011203");
    info.metadata.insert(EXPERIMENT_TIME, "13:45:00");
    info.metadata.insert(FILE_NOTES, "written by a test");
    info.metadata.insert(CAL_MAX, 900_f32);
    info.metadata.insert(S_MAX, 77);
    info
}

#[test]
fn write_and_read_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.hdr");
    let info = small_info();
    WriterOptions::new(&path)
        .write_slice(&info, &small_volume_gt())
        .unwrap();
    assert!(dir.path().join("out.img").exists());
    assert_eq!(fs::metadata(&path).unwrap().len(), 348);

    let obj = InMemAnalyzeObject::read_file(&path).unwrap();
    let read = obj.info();
    assert_eq!(read.dimensions, info.dimensions);
    assert_eq!(read.spacing, vec![0.9_f32 as f64, 0.9_f32 as f64, 2.5]);
    assert_eq!(read.direction, info.direction);
    assert_eq!(read.data_type, AnalyzeType::Int16);
    assert_eq!(read.byte_order, Endianness::native());
    assert_eq!(read.metadata.get_str(PATIENT_ID), Some("P-0042"));
    assert_eq!(read.metadata.get_str(EXPERIMENT_DATE), Some("20011203"));
    assert_eq!(read.metadata.get_str(EXPERIMENT_TIME), Some("13:45:00"));
    assert_eq!(read.metadata.get_str(FILE_NOTES), Some("written by a test"));
    assert_eq!(read.metadata.get_f32(CAL_MAX), Some(900.));
    assert_eq!(read.metadata.get_i32(S_MAX), Some(77));
    assert_eq!(read.metadata.get_i16(ON_DISK_BIT_PER_PIXEL), Some(16));
    assert_eq!(read.metadata.get_str(ON_DISK_STORAGE_TYPE_NAME), Some("i16"));
    assert_eq!(
        read.metadata.get_orientation(COORDINATE_ORIENTATION),
        Some(CoordinateOrientation::PIR)
    );
    assert_eq!(obj.header().orient, 2);
    assert_eq!(obj.header().dim, [4, 4, 3, 2, 1, 1, 1, 1]);
    assert_eq!(obj.into_vec::<i16>().unwrap(), small_volume_gt());
}

#[test]
fn read_information_survives_a_write() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.img");
    let second = dir.path().join("second.img");
    WriterOptions::new(&first)
        .write_slice(&small_info(), &small_volume_gt())
        .unwrap();

    let obj = InMemAnalyzeObject::read_file(&first).unwrap();
    WriterOptions::new(&second)
        .write_image(obj.info(), obj.raw_data())
        .unwrap();
    let copy = InMemAnalyzeObject::read_file(&second).unwrap();
    assert_eq!(copy.header(), obj.header());
    assert_eq!(copy.info(), obj.info());
    assert_eq!(copy.raw_data(), obj.raw_data());
}

#[test]
fn compressed_write_removes_plain_volume() {
    let dir = tempdir().unwrap();
    let info = small_info();
    let data = small_volume_gt();
    let plain = dir.path().join("brain.img");
    let packed = dir.path().join("brain.img.gz");

    WriterOptions::new(dir.path().join("brain.hdr"))
        .write_slice(&info, &data)
        .unwrap();
    assert!(plain.exists());

    WriterOptions::new(&packed)
        .compression(Compression::best())
        .write_slice(&info, &data)
        .unwrap();
    assert!(packed.exists());
    assert!(!plain.exists());
    assert_eq!(&fs::read(&packed).unwrap()[..2], &[0x1f, 0x8b]);

    // the header name finds the compressed volume
    let obj = InMemAnalyzeObject::read_file(dir.path().join("brain.hdr")).unwrap();
    assert_eq!(obj.into_vec::<i16>().unwrap(), data);

    WriterOptions::new(&plain).write_slice(&info, &data).unwrap();
    assert!(plain.exists());
    assert!(!packed.exists());
}

#[test]
fn unsupported_orientation_is_written_coronal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rai.hdr");
    let mut info = ImageInformation::new(AnalyzeType::Uint8, &[2, 2, 2]);
    info.direction = IDENTITY_DIRECTION;
    let header = WriterOptions::new(&path)
        .write_slice(&info, &[0u8; 8])
        .and_then(|_| AnalyzeHeader::from_file(&path))
        .unwrap();
    assert_eq!(header.orient, 1);

    let read = ImageInformation::from_file(&path).unwrap();
    assert_eq!(read.direction, CoordinateOrientation::RIP.to_direction_cosines());
}

#[test]
fn orientation_key_is_preferred() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("key.hdr");
    let mut info = ImageInformation::new(AnalyzeType::Uint8, &[2, 2, 2]);
    info.direction = CoordinateOrientation::PIR.to_direction_cosines();
    info.metadata.insert(COORDINATE_ORIENTATION, CoordinateOrientation::RPI);
    let header = WriterOptions::new(&path).write_header(&info).unwrap();
    assert_eq!(header.orient, 0);
    assert_eq!(AnalyzeHeader::from_file(&path).unwrap(), header);
}

#[test]
fn two_dimensional_image() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slice.hdr");
    let info = ImageInformation::new(AnalyzeType::Float32, &[50, 27]);
    let data: Vec<f32> = (0..50 * 27).map(|v| v as f32 * 0.5).collect();
    WriterOptions::new(&path).write_slice(&info, &data).unwrap();

    let obj = InMemAnalyzeObject::read_file(&path).unwrap();
    assert_eq!(obj.header().dim, [4, 50, 27, 1, 1, 1, 1, 1]);
    assert_eq!(obj.info().dimensions, vec![50, 27]);
    assert_eq!(obj.into_vec::<f32>().unwrap(), data);
}

#[test]
fn smallest_and_largest_rank() {
    let dir = tempdir().unwrap();
    for (name, dims) in &[("line.img.gz", vec![5]), ("full.img.gz", vec![2, 2, 2, 2, 2, 2, 3])] {
        let path = dir.path().join(name);
        let info = ImageInformation::new(AnalyzeType::Float64, dims);
        let len = dims.iter().product::<usize>();
        let data: Vec<f64> = (0..len).map(|v| v as f64 * 0.25 - 1.).collect();
        WriterOptions::new(&path).write_slice(&info, &data).unwrap();

        let obj = InMemAnalyzeObject::read_file(&path).unwrap();
        assert_eq!(&obj.info().dimensions, dims);
        assert_eq!(obj.info().spacing, vec![1.; dims.len()]);
        assert_eq!(obj.header().dim[0] as usize, dims.len().max(4));
        assert_eq!(obj.into_vec::<f64>().unwrap(), data);
    }
}

#[test]
fn type_conventions() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mask.hdr");
    let info = ImageInformation::new(AnalyzeType::Binary, &[2, 2]);
    let header = WriterOptions::new(&path).write_header(&info).unwrap();
    assert_eq!((header.datatype, header.bitpix), (1, 1));
    assert_eq!((header.glmax, header.glmin), (1, 0));
    assert_eq!(&header.data_type[..7], b"BINARY\0");

    let mut info = ImageInformation::new(AnalyzeType::Uint8, &[2, 2]);
    let header = WriterOptions::new(&path).write_header(&info).unwrap();
    assert_eq!((header.glmax, header.glmin), (255, 0));

    info.metadata.insert(GLMAX, 17);
    info.metadata.insert(GLMIN, 3);
    let header = WriterOptions::new(&path).write_header(&info).unwrap();
    assert_eq!((header.glmax, header.glmin), (17, 3));
}

#[test]
fn long_text_is_truncated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("text.hdr");
    let mut info = ImageInformation::new(AnalyzeType::Uint8, &[2, 2]);
    info.metadata.insert(FILE_ORIGINATOR, "a very long originator");
    let header = WriterOptions::new(&path).write_header(&info).unwrap();
    assert_eq!(&header.originator, b"a very lon");

    let read = ImageInformation::from_file(&path).unwrap();
    assert_eq!(read.metadata.get_str(FILE_ORIGINATOR), Some("a very lon"));
}

#[test]
fn wrong_buffer_length_writes_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.hdr");
    let info = small_info();
    match WriterOptions::new(&path).write_image(&info, &[0; 47]) {
        Err(AnalyzeError::IncompatibleLength(48, 47)) => {}
        other => panic!("unexpected result {:?}", other),
    }
    assert!(!path.exists());

    match WriterOptions::new(&path).write_slice(&info, &[0_f32; 24]) {
        Err(AnalyzeError::UnsupportedDataType(AnalyzeType::Int16)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn bad_targets() {
    let dir = tempdir().unwrap();
    let info = small_info();
    let data = small_volume_gt();

    match WriterOptions::new(dir.path().join("brain.nii")).write_slice(&info, &data) {
        Err(AnalyzeError::InvalidFileName(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }

    let missing = dir.path().join("no").join("such").join("brain.hdr");
    match WriterOptions::new(&missing).write_slice(&info, &data) {
        Err(AnalyzeError::CreateFile(p, _)) => assert_eq!(p, missing),
        other => panic!("unexpected result {:?}", other),
    }
}

#[cfg(feature = "ndarray_volumes")]
#[test]
fn write_ndarray() {
    use analyze::IntoNdArray;
    use ndarray::Array;

    let dir = tempdir().unwrap();
    let path = dir.path().join("array.img.gz");
    let array = Array::from_shape_fn((3, 4, 2), |(i, j, k)| (i * 100 + j * 10 + k) as u16);
    let reference = small_info();
    WriterOptions::new(&path)
        .write_ndarray(&array, Some(&reference))
        .unwrap();

    let obj = InMemAnalyzeObject::read_file(&path).unwrap();
    assert_eq!(obj.info().dimensions, vec![3, 4, 2]);
    assert_eq!(obj.info().data_type, AnalyzeType::Uint16);
    assert_eq!(obj.info().metadata.get_str(PATIENT_ID), Some("P-0042"));
    let read = obj.into_ndarray::<u16>().unwrap();
    assert_eq!(read, array.into_dyn());
}

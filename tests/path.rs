use analyze::path::{extension, header_file_name, image_file_name, root_name, CompanionFiles};
use analyze::AnalyzeError;
use std::path::PathBuf;

#[test]
fn companion_name_table() {
    let table: &[(&str, &str, Option<&str>)] = &[
        ("brain.hdr", "brain.hdr", Some("brain.img")),
        ("brain.img", "brain.hdr", Some("brain.img")),
        ("brain.img.gz", "brain.hdr", Some("brain.img.gz")),
        ("/data/s01/brain.hdr", "/data/s01/brain.hdr", Some("/data/s01/brain.img")),
        ("/data/s01.v2/brain.img.gz", "/data/s01.v2/brain.hdr", Some("/data/s01.v2/brain.img.gz")),
        ("brain.nii", "brain.hdr", None),
        ("brain", "brain.hdr", None),
    ];
    for &(input, header, image) in table {
        assert_eq!(header_file_name(input), PathBuf::from(header), "header of {}", input);
        assert_eq!(image_file_name(input), image.map(PathBuf::from), "image of {}", input);
    }
}

#[test]
fn roots_and_extensions() {
    assert_eq!(root_name("brain.hdr"), PathBuf::from("brain"));
    assert_eq!(root_name("brain"), PathBuf::from("brain"));
    assert_eq!(extension("brain.img.gz").as_deref(), Some("gz"));
    assert_eq!(extension("brain"), None);
}

#[test]
fn resolved_pairs() {
    let files = CompanionFiles::resolve("scans/brain.img").unwrap();
    assert_eq!(
        files,
        CompanionFiles {
            root: PathBuf::from("scans/brain"),
            header: PathBuf::from("scans/brain.hdr"),
            image: PathBuf::from("scans/brain.img"),
            compressed: false,
        }
    );
    assert_eq!(files.stale_image(), PathBuf::from("scans/brain.img.gz"));

    match CompanionFiles::resolve("scans/brain.nii") {
        Err(AnalyzeError::InvalidFileName(p)) => assert_eq!(p, PathBuf::from("scans/brain.nii")),
        other => panic!("unexpected result {:?}", other),
    }
}

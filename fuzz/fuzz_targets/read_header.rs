#![no_main]
use analyze::{AnalyzeHeader, ImageInformation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = AnalyzeHeader::from_reader(data) {
        let _ = header.data_type();
        let _ = header.orientation();
        let _ = header.description();
        if let Ok(info) = ImageInformation::from_header(&header) {
            let _ = info.image_size_in_bytes();
            let _ = info.to_header();
        }
    }
});

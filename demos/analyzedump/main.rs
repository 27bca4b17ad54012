//! An application for reading Analyze 7.5 file meta-data.

extern crate analyze;

use analyze::{AnalyzeHeader, ImageInformation};
use std::env;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to Analyze file is required");
    let header = AnalyzeHeader::from_file(&filename).expect("Failed to read Analyze header");
    println!("{:#?}", &header);
    let info = ImageInformation::from_header(&header).expect("Failed to interpret Analyze header");
    println!("{:#?}", &info);
}

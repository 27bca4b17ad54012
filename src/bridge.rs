//! Conversion between the header fields with no place in the image
//! geometry and the meta-data dictionary.
//!
//! Reading copies every such field into the dictionary. Writing looks each
//! key up again, and only touches the header field when the key is present
//! with the expected value type.

use crate::header::{set_text_field, text_field, AnalyzeHeader};
use crate::metadata::*;
use crate::orientation::{CoordinateOrientation, Direction};
use crate::typedef::{AnalyzeOrientation, AnalyzeType};
use tracing::warn;

/// The value stored under `ITK_InputFilterName` by this crate's reader.
pub const INPUT_FILTER: &str = "AnalyzeImageIO";

/// The coordinate orientation described by the header's `orient` code.
///
/// Only the three unflipped codes have an equivalent. Every other value,
/// flipped codes included, is taken as coronal (`RIP`), with a warning.
pub fn header_orientation(header: &AnalyzeHeader) -> CoordinateOrientation {
    match AnalyzeOrientation::from_code(header.orient)
        .and_then(AnalyzeOrientation::to_coordinate_orientation)
    {
        Some(o) => o,
        None => {
            warn!(
                orient = header.orient,
                "unsupported Analyze orientation code, assuming coronal (RIP)"
            );
            CoordinateOrientation::RIP
        }
    }
}

/// Build the meta-data dictionary of a header. `ndims` is the number of
/// dimensions left after trimming trailing singleton axes.
pub fn header_to_dictionary(
    header: &AnalyzeHeader,
    orientation: CoordinateOrientation,
    ndims: usize,
) -> MetaDataDictionary {
    let mut dict = MetaDataDictionary::new();
    dict.insert(INPUT_FILTER_NAME, INPUT_FILTER);
    dict.insert(IMAGE_FILE_BASE_NAME, text_field(&header.db_name));

    dict.insert(VOXEL_UNITS, text_field(&header.vox_units));
    dict.insert(CALIBRATION_UNITS, text_field(&header.cal_units));
    dict.insert(ON_DISK_BIT_PER_PIXEL, header.bitpix);
    dict.insert(ROI_SCALE, header.roi_scale);
    dict.insert(CAL_MAX, header.cal_max);
    dict.insert(CAL_MIN, header.cal_min);
    dict.insert(GLMAX, header.glmax);
    dict.insert(GLMIN, header.glmin);

    // count down past the singleton axes, down to zero
    let mut rank = ndims.min(7);
    while rank > 0 && header.dim[rank] == 1 {
        rank -= 1;
    }
    dict.insert(NUMBER_OF_DIMENSIONS, rank as i32);

    let storage_type = AnalyzeType::from_code(header.datatype).and_then(AnalyzeType::storage_type_name);
    if let Some(name) = storage_type {
        dict.insert(ON_DISK_STORAGE_TYPE_NAME, name);
    }

    dict.insert(FILE_NOTES, text_field(&header.descrip));
    dict.insert(AUX_FILE_NAME, text_field(&header.aux_file));
    dict.insert(COORDINATE_ORIENTATION, orientation);
    dict.insert(FILE_ORIGINATOR, text_field(&header.originator));
    dict.insert(ORIGINATION_DATE, text_field(&header.generated));
    dict.insert(SCAN_NUMBER, text_field(&header.scannum));
    dict.insert(PATIENT_ID, text_field(&header.patient_id));
    dict.insert(EXPERIMENT_DATE, text_field(&header.exp_date));
    dict.insert(EXPERIMENT_TIME, text_field(&header.exp_time));

    dict.insert(O_MAX, header.omax);
    dict.insert(O_MIN, header.omin);
    dict.insert(S_MAX, header.smax);
    dict.insert(S_MIN, header.smin);
    dict
}

/// Copy the dictionary entries back into the header. Keys which are
/// absent, or hold a value of another type, leave their field untouched.
///
/// The `orient` code comes from `ITK_CoordinateOrientation` when present,
/// or from the dominant axes of `direction` otherwise. Orientations with
/// no Analyze code are written as coronal, with a warning.
///
/// The data type fields are not read from the dictionary: they follow the
/// image's data type.
pub fn dictionary_to_header(
    dict: &MetaDataDictionary,
    direction: &Direction,
    header: &mut AnalyzeHeader,
) {
    let text_slots: [(&str, &mut [u8]); 11] = [
        (IMAGE_FILE_BASE_NAME, &mut header.db_name[..]),
        (VOXEL_UNITS, &mut header.vox_units[..]),
        (CALIBRATION_UNITS, &mut header.cal_units[..]),
        (FILE_NOTES, &mut header.descrip[..]),
        (AUX_FILE_NAME, &mut header.aux_file[..]),
        (FILE_ORIGINATOR, &mut header.originator[..]),
        (ORIGINATION_DATE, &mut header.generated[..]),
        (SCAN_NUMBER, &mut header.scannum[..]),
        (PATIENT_ID, &mut header.patient_id[..]),
        (EXPERIMENT_DATE, &mut header.exp_date[..]),
        (EXPERIMENT_TIME, &mut header.exp_time[..]),
    ];
    for (key, slot) in text_slots {
        if let Some(value) = dict.get_str(key) {
            set_text_field(slot, value);
        }
    }

    let floats: [(&str, &mut f32); 3] = [
        (ROI_SCALE, &mut header.roi_scale),
        (CAL_MAX, &mut header.cal_max),
        (CAL_MIN, &mut header.cal_min),
    ];
    for (key, field) in floats {
        if let Some(value) = dict.get_f32(key) {
            *field = value;
        }
    }

    let ints: [(&str, &mut i32); 6] = [
        (GLMAX, &mut header.glmax),
        (GLMIN, &mut header.glmin),
        (O_MAX, &mut header.omax),
        (O_MIN, &mut header.omin),
        (S_MAX, &mut header.smax),
        (S_MIN, &mut header.smin),
    ];
    for (key, field) in ints {
        if let Some(value) = dict.get_i32(key) {
            *field = value;
        }
    }

    let orientation = dict
        .get_orientation(COORDINATE_ORIENTATION)
        .or_else(|| CoordinateOrientation::from_direction_cosines(direction));
    header.orient = match orientation.and_then(AnalyzeOrientation::from_coordinate_orientation) {
        Some(code) => code as i8,
        None => {
            let name = orientation
                .map(|o| o.to_string())
                .unwrap_or_else(|| "degenerate".to_string());
            warn!(
                orientation = %name,
                "Analyze 7.5 only stores RPI, PIR and RIP orientations, writing RIP"
            );
            AnalyzeOrientation::CoronalUnflipped as i8
        }
    };
}

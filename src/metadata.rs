//! A small key/value dictionary for image meta-data which has no place in
//! the image geometry, and the well known keys used by this crate.
//!
//! Entries keep their insertion order. Values are typed, and the typed
//! getters return `None` both for missing keys and for keys holding a
//! value of another type.

use crate::orientation::CoordinateOrientation;

/// Name of the reader which produced the dictionary.
pub const INPUT_FILTER_NAME: &str = "ITK_InputFilterName";
/// Data base name (`db_name`).
pub const IMAGE_FILE_BASE_NAME: &str = "ITK_ImageFileBaseName";
/// Spatial units (`vox_units`).
pub const VOXEL_UNITS: &str = "ITK_VoxelUnits";
/// Calibration units (`cal_units`).
pub const CALIBRATION_UNITS: &str = "ANALYZE_CALIBRATIONUNITS";
/// Bits per voxel on disk (`bitpix`).
pub const ON_DISK_BIT_PER_PIXEL: &str = "ITK_OnDiskBitPerPixel";
/// Scale factor (`roi_scale`).
pub const ROI_SCALE: &str = "SPM_ROI_SCALE";
/// Max calibration value (`cal_max`).
pub const CAL_MAX: &str = "ANALYZE_CAL_MAX";
/// Min calibration value (`cal_min`).
pub const CAL_MIN: &str = "ANALYZE_CAL_MIN";
/// Max value of the data set (`glmax`).
pub const GLMAX: &str = "ANALYZE_GLMAX";
/// Min value of the data set (`glmin`).
pub const GLMIN: &str = "ANALYZE_GLMIN";
/// Number of non-singleton dimensions.
pub const NUMBER_OF_DIMENSIONS: &str = "ITK_NumberOfDimensions";
/// Name of the in-memory type of the stored voxels.
pub const ON_DISK_STORAGE_TYPE_NAME: &str = "ITK_OnDiskStorageTypeName";
/// Free text description (`descrip`).
pub const FILE_NOTES: &str = "ITK_FileNotes";
/// Auxiliary file name (`aux_file`).
pub const AUX_FILE_NAME: &str = "ANALYZE_AUX_FILE_NAME";
/// Coordinate orientation of the image axes.
pub const COORDINATE_ORIENTATION: &str = "ITK_CoordinateOrientation";
/// Originator (`originator`).
pub const FILE_ORIGINATOR: &str = "ITK_FileOriginator";
/// Generation date (`generated`).
pub const ORIGINATION_DATE: &str = "ITK_OriginationDate";
/// Scan number (`scannum`).
pub const SCAN_NUMBER: &str = "ANALYZE_ScanNumber";
/// Patient identifier (`patient_id`).
pub const PATIENT_ID: &str = "ITK_PatientID";
/// Experiment date (`exp_date`).
pub const EXPERIMENT_DATE: &str = "ITK_ExperimentDate";
/// Experiment time (`exp_time`).
pub const EXPERIMENT_TIME: &str = "ITK_ExperimentTime";
/// Max original value (`omax`).
pub const O_MAX: &str = "ANALYZE_O_MAX";
/// Min original value (`omin`).
pub const O_MIN: &str = "ANALYZE_O_MIN";
/// Max scaled value (`smax`).
pub const S_MAX: &str = "ANALYZE_S_MAX";
/// Min scaled value (`smin`).
pub const S_MIN: &str = "ANALYZE_S_MIN";

/// A typed meta-data value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// Text
    String(String),
    /// 16 bit integer
    Short(i16),
    /// 32 bit integer
    Int(i32),
    /// Single precision float
    Float(f32),
    /// Coordinate orientation
    Orientation(CoordinateOrientation),
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::String(v)
    }
}

impl<'a> From<&'a str> for MetaValue {
    fn from(v: &'a str) -> Self {
        MetaValue::String(v.to_string())
    }
}

impl From<i16> for MetaValue {
    fn from(v: i16) -> Self {
        MetaValue::Short(v)
    }
}

impl From<i32> for MetaValue {
    fn from(v: i32) -> Self {
        MetaValue::Int(v)
    }
}

impl From<f32> for MetaValue {
    fn from(v: f32) -> Self {
        MetaValue::Float(v)
    }
}

impl From<CoordinateOrientation> for MetaValue {
    fn from(v: CoordinateOrientation) -> Self {
        MetaValue::Orientation(v)
    }
}

/// An insertion ordered dictionary of typed meta-data values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaDataDictionary {
    entries: Vec<(String, MetaValue)>,
}

impl MetaDataDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a key. An existing key keeps its position.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<MetaValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<MetaValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Get the value of a key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Get a text value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get a 16 bit integer value.
    pub fn get_i16(&self, key: &str) -> Option<i16> {
        match self.get(key)? {
            MetaValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a 32 bit integer value.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a float value.
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a coordinate orientation value.
    pub fn get_orientation(&self, key: &str) -> Option<CoordinateOrientation> {
        match self.get(key)? {
            MetaValue::Orientation(v) => Some(*v),
            _ => None,
        }
    }

    /// Iterate over all entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! This module defines the `AnalyzeHeader` struct, which is used
//! to provide important information about Analyze 7.5 volumes.
//!
//! The header is a record of exactly 348 bytes, decoded and encoded here
//! field by field. Multi-byte numbers follow the byte order of the file,
//! which is not declared anywhere: it is detected from the `sizeof_hdr`
//! and `extents` fields, the two fields that virtually every writer of
//! the format fills in.

use crate::error::{AnalyzeError, Result};
use crate::path::header_file_name;
use crate::typedef::{AnalyzeOrientation, AnalyzeType};
use crate::util::{needs_swap, read_exact_or_eof, swap_f32};
use crate::volume::open_transparent;
use byteordered::{ByteOrdered, Endian, Endianness};
use std::io::{Read, Write};
use std::path::Path;
use tracing::debug;

/// The size of the header record, in bytes.
pub const HEADER_SIZE: usize = 348;

/// The value of `extents` in well formed files.
pub const EXTENTS_SENTINEL: i32 = 16384;

/// The Analyze 7.5 header data type.
/// All fields are public and named after the format's header file.
/// Text fields are kept as raw byte slots; use [`text_field`] and
/// [`set_text_field`] to convert them.
///
/// # Examples
///
/// ```no_run
/// use analyze::AnalyzeHeader;
/// # use analyze::Result;
///
/// # fn run() -> Result<()> {
/// let hdr1 = AnalyzeHeader::from_file("0000.hdr")?;
/// let hdr2 = AnalyzeHeader::from_file("0001.img.gz")?;
/// # Ok(())
/// # }
/// ```
///
/// [`text_field`]: fn.text_field.html
/// [`set_text_field`]: fn.set_text_field.html
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeHeader {
    /// Header size, must be 348
    pub sizeof_hdr: i32,
    /// Legacy name of the data type
    pub data_type: [u8; 10],
    /// Data base name
    pub db_name: [u8; 18],
    /// Must be 16384
    pub extents: i32,
    /// Session error counter
    pub session_error: i16,
    /// `b'r'` when all volumes have the same size
    pub regular: u8,
    /// Unused
    pub hkey_un0: u8,
    /// Data array dimensions
    pub dim: [i16; 8],
    /// Spatial units of measure
    pub vox_units: [u8; 4],
    /// Calibration units
    pub cal_units: [u8; 8],
    /// Unused
    pub unused1: i16,
    /// Defines the data type!
    pub datatype: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// Unused
    pub dim_un0: i16,
    /// Grid spacings
    pub pixdim: [f32; 8],
    /// Offset into the .img file to reach the volume
    pub vox_offset: f32,
    /// Scale factor, as used by SPM
    pub roi_scale: f32,
    /// Unused
    pub funused1: f32,
    /// Unused
    pub funused2: f32,
    /// Max calibration value
    pub cal_max: f32,
    /// Min calibration value
    pub cal_min: f32,
    /// Compression flag, informative only
    pub compressed: i32,
    /// Unused
    pub verified: i32,
    /// Max value of the data set
    pub glmax: i32,
    /// Min value of the data set
    pub glmin: i32,

    /// Any text you like
    pub descrip: [u8; 80],
    /// Auxiliary filename
    pub aux_file: [u8; 24],
    /// Slice orientation code
    pub orient: i8,
    /// Originator
    pub originator: [u8; 10],
    /// Generation date
    pub generated: [u8; 10],
    /// Scan number
    pub scannum: [u8; 10],
    /// Patient identifier
    pub patient_id: [u8; 10],
    /// Experiment date
    pub exp_date: [u8; 10],
    /// Experiment time
    pub exp_time: [u8; 10],
    /// Unused
    pub hist_un0: [u8; 3],
    /// Number of views
    pub views: i32,
    /// Number of added volumes
    pub vols_added: i32,
    /// Start field
    pub start_field: i32,
    /// Field skip
    pub field_skip: i32,
    /// Max original value
    pub omax: i32,
    /// Min original value
    pub omin: i32,
    /// Max scaled value
    pub smax: i32,
    /// Min scaled value
    pub smin: i32,

    /// Byte order of the file the header was read from, and in which it
    /// will be written.
    pub endianness: Endianness,
}

impl Default for AnalyzeHeader {
    fn default() -> AnalyzeHeader {
        AnalyzeHeader {
            sizeof_hdr: HEADER_SIZE as i32,
            data_type: [0; 10],
            db_name: [0; 18],
            extents: EXTENTS_SENTINEL,
            session_error: 0,
            regular: b'r',
            hkey_un0: 0,
            dim: [4, 1, 1, 1, 1, 1, 1, 1],
            vox_units: [0; 4],
            cal_units: [0; 8],
            unused1: 0,
            datatype: 0,
            bitpix: 0,
            dim_un0: 0,
            pixdim: [0., 1., 1., 1., 1., 1., 1., 1.],
            vox_offset: 0.,
            roi_scale: 0.,
            funused1: 0.,
            funused2: 0.,
            cal_max: 0.,
            cal_min: 0.,
            compressed: 0,
            verified: 0,
            glmax: 0,
            glmin: 0,

            descrip: [0; 80],
            aux_file: [0; 24],
            orient: AnalyzeOrientation::TransverseUnflipped as i8,
            originator: [0; 10],
            generated: [0; 10],
            scannum: [0; 10],
            patient_id: [0; 10],
            exp_date: [0; 10],
            exp_time: [0; 10],
            hist_un0: [0; 3],
            views: 0,
            vols_added: 0,
            start_field: 0,
            field_skip: 0,
            omax: 0,
            omin: 0,
            smax: 0,
            smin: 0,

            endianness: Endianness::native(),
        }
    }
}

impl AnalyzeHeader {
    /// Retrieve an Analyze header, along with its byte order, from the file
    /// system. Any name of the file pair can be given (`.hdr`, `.img` or
    /// `.img.gz`): the header is always read from the `.hdr` file. The
    /// header file is decoded as a gzip stream if its content is
    /// compressed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<AnalyzeHeader> {
        let header_path = header_file_name(path);
        debug!(path = %header_path.display(), "reading Analyze header");
        AnalyzeHeader::from_reader(open_transparent(&header_path)?)
    }

    /// Read an Analyze header, along with its byte order, from the given
    /// byte stream. It is assumed that the input is currently at the start
    /// of the header.
    ///
    /// # Errors
    ///
    /// - `AnalyzeError::UnexpectedEof` if fewer than 348 bytes are
    /// available.
    pub fn from_reader<S: Read>(input: S) -> Result<AnalyzeHeader> {
        let mut raw = [0u8; HEADER_SIZE];
        read_exact_or_eof(input, &mut raw)?;
        AnalyzeHeader::from_bytes(&raw)
    }

    /// Decode a header from its raw record.
    pub fn from_bytes(raw: &[u8; HEADER_SIZE]) -> Result<AnalyzeHeader> {
        let mut h = parse_header(ByteOrdered::native(&raw[..]))?;
        let endianness = h.detect_byte_order();
        if needs_swap(endianness) {
            h.swap_bytes();
        }
        h.endianness = endianness;
        debug!(?endianness, "detected header byte order");
        Ok(h)
    }

    /// Encode the header into its raw record, in the byte order given by
    /// the `endianness` field.
    pub fn to_bytes(&self) -> Result<[u8; HEADER_SIZE]> {
        let mut raw = [0u8; HEADER_SIZE];
        self.write_to(&mut raw[..])?;
        Ok(raw)
    }

    /// Write the header to the given byte sink, in the byte order given by
    /// the `endianness` field.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        write_header(ByteOrdered::runtime(writer, self.endianness), self)
    }

    /// Detect the byte order of a header which was decoded in this
    /// machine's native order, before any swapping took place.
    ///
    /// The file is in native order if either `extents` is 16384 or
    /// `sizeof_hdr` is 348, and in the opposite order otherwise. A file
    /// which sets neither field is thus taken as byte swapped.
    pub fn detect_byte_order(&self) -> Endianness {
        if self.extents == EXTENTS_SENTINEL || self.sizeof_hdr == HEADER_SIZE as i32 {
            Endianness::native()
        } else {
            Endianness::native().to_opposite()
        }
    }

    /// Swap the bytes of every multi-byte numeric field.
    /// Text and single byte fields are left untouched.
    pub fn swap_bytes(&mut self) {
        self.sizeof_hdr = self.sizeof_hdr.swap_bytes();
        self.extents = self.extents.swap_bytes();
        self.session_error = self.session_error.swap_bytes();

        for v in &mut self.dim {
            *v = v.swap_bytes();
        }
        self.unused1 = self.unused1.swap_bytes();
        self.datatype = self.datatype.swap_bytes();
        self.bitpix = self.bitpix.swap_bytes();
        self.dim_un0 = self.dim_un0.swap_bytes();
        for v in &mut self.pixdim {
            *v = swap_f32(*v);
        }
        self.vox_offset = swap_f32(self.vox_offset);
        self.roi_scale = swap_f32(self.roi_scale);
        self.funused1 = swap_f32(self.funused1);
        self.funused2 = swap_f32(self.funused2);
        self.cal_max = swap_f32(self.cal_max);
        self.cal_min = swap_f32(self.cal_min);
        self.compressed = self.compressed.swap_bytes();
        self.verified = self.verified.swap_bytes();
        self.glmax = self.glmax.swap_bytes();
        self.glmin = self.glmin.swap_bytes();

        self.views = self.views.swap_bytes();
        self.vols_added = self.vols_added.swap_bytes();
        self.start_field = self.start_field.swap_bytes();
        self.field_skip = self.field_skip.swap_bytes();
        self.omax = self.omax.swap_bytes();
        self.omin = self.omin.swap_bytes();
        self.smax = self.smax.swap_bytes();
        self.smin = self.smin.swap_bytes();
    }

    /// Swap the numeric fields if the target byte order differs from this
    /// machine's. Doing this twice with the same target restores the
    /// header.
    pub fn swap_to(&mut self, target: Endianness) {
        if needs_swap(target) {
            self.swap_bytes();
        }
    }

    /// Get the data type as a validated enum.
    pub fn data_type(&self) -> Result<AnalyzeType> {
        AnalyzeType::from_code(self.datatype)
            .ok_or_else(|| AnalyzeError::InvalidCode("datatype", self.datatype))
    }

    /// Get the slice orientation as a validated enum.
    pub fn orientation(&self) -> Result<AnalyzeOrientation> {
        AnalyzeOrientation::from_code(self.orient)
            .ok_or_else(|| AnalyzeError::InvalidCode("orient", i16::from(self.orient)))
    }

    /// The `descrip` field as a string.
    pub fn description(&self) -> String {
        text_field(&self.descrip)
    }

    /// Set the `descrip` field, truncating it to 80 bytes.
    pub fn set_description(&mut self, description: &str) {
        set_text_field(&mut self.descrip, description);
    }
}

/// Read a fixed width text slot. The text ends at the first null byte,
/// or at the end of the slot.
pub fn text_field(slot: &[u8]) -> String {
    let len = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..len]).into_owned()
}

/// Write a fixed width text slot. Text longer than the slot is truncated
/// without a terminating null byte, shorter text is padded with nulls.
pub fn set_text_field(slot: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(slot.len());
    slot[..len].copy_from_slice(&bytes[..len]);
    for b in &mut slot[len..] {
        *b = 0;
    }
}

fn parse_header<S, E>(mut input: ByteOrdered<S, E>) -> Result<AnalyzeHeader>
where
    S: Read,
    E: Endian,
{
    let mut h = AnalyzeHeader::default();

    h.sizeof_hdr = input.read_i32()?;
    input.read_exact(&mut h.data_type)?;
    input.read_exact(&mut h.db_name)?;
    h.extents = input.read_i32()?;
    h.session_error = input.read_i16()?;
    h.regular = input.read_u8()?;
    h.hkey_un0 = input.read_u8()?;

    for v in &mut h.dim {
        *v = input.read_i16()?;
    }
    input.read_exact(&mut h.vox_units)?;
    input.read_exact(&mut h.cal_units)?;
    h.unused1 = input.read_i16()?;
    h.datatype = input.read_i16()?;
    h.bitpix = input.read_i16()?;
    h.dim_un0 = input.read_i16()?;
    for v in &mut h.pixdim {
        *v = input.read_f32()?;
    }
    h.vox_offset = input.read_f32()?;
    h.roi_scale = input.read_f32()?;
    h.funused1 = input.read_f32()?;
    h.funused2 = input.read_f32()?;
    h.cal_max = input.read_f32()?;
    h.cal_min = input.read_f32()?;
    h.compressed = input.read_i32()?;
    h.verified = input.read_i32()?;
    h.glmax = input.read_i32()?;
    h.glmin = input.read_i32()?;

    input.read_exact(&mut h.descrip)?;
    input.read_exact(&mut h.aux_file)?;
    h.orient = input.read_i8()?;
    input.read_exact(&mut h.originator)?;
    input.read_exact(&mut h.generated)?;
    input.read_exact(&mut h.scannum)?;
    input.read_exact(&mut h.patient_id)?;
    input.read_exact(&mut h.exp_date)?;
    input.read_exact(&mut h.exp_time)?;
    input.read_exact(&mut h.hist_un0)?;
    h.views = input.read_i32()?;
    h.vols_added = input.read_i32()?;
    h.start_field = input.read_i32()?;
    h.field_skip = input.read_i32()?;
    h.omax = input.read_i32()?;
    h.omin = input.read_i32()?;
    h.smax = input.read_i32()?;
    h.smin = input.read_i32()?;

    Ok(h)
}

fn write_header<W, E>(mut writer: ByteOrdered<W, E>, header: &AnalyzeHeader) -> Result<()>
where
    W: Write,
    E: Endian,
{
    writer.write_i32(header.sizeof_hdr)?;
    writer.write_all(&header.data_type)?;
    writer.write_all(&header.db_name)?;
    writer.write_i32(header.extents)?;
    writer.write_i16(header.session_error)?;
    writer.write_u8(header.regular)?;
    writer.write_u8(header.hkey_un0)?;

    for s in &header.dim {
        writer.write_i16(*s)?;
    }
    writer.write_all(&header.vox_units)?;
    writer.write_all(&header.cal_units)?;
    writer.write_i16(header.unused1)?;
    writer.write_i16(header.datatype)?;
    writer.write_i16(header.bitpix)?;
    writer.write_i16(header.dim_un0)?;
    for f in &header.pixdim {
        writer.write_f32(*f)?;
    }
    for f in &[
        header.vox_offset,
        header.roi_scale,
        header.funused1,
        header.funused2,
        header.cal_max,
        header.cal_min,
    ] {
        writer.write_f32(*f)?;
    }
    for v in &[header.compressed, header.verified, header.glmax, header.glmin] {
        writer.write_i32(*v)?;
    }

    writer.write_all(&header.descrip)?;
    writer.write_all(&header.aux_file)?;
    writer.write_i8(header.orient)?;
    writer.write_all(&header.originator)?;
    writer.write_all(&header.generated)?;
    writer.write_all(&header.scannum)?;
    writer.write_all(&header.patient_id)?;
    writer.write_all(&header.exp_date)?;
    writer.write_all(&header.exp_time)?;
    writer.write_all(&header.hist_un0)?;
    for v in &[
        header.views,
        header.vols_added,
        header.start_field,
        header.field_skip,
        header.omax,
        header.omin,
        header.smax,
        header.smin,
    ] {
        writer.write_i32(*v)?;
    }

    Ok(())
}

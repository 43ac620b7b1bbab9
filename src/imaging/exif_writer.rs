//! Lossless resolution tagging for JPEG files.
//!
//! The JPEG encoder has no hook for EXIF resolution tags, so tagging is a
//! second pass over the already-encoded stream:
//!
//! ```text
//! SOI  APP0(JFIF)  DQT  SOF0  DHT  SOS <scan data>  EOI     ← encoder output
//! SOI  APP0(JFIF*) APP1(EXIF)  DQT  SOF0  DHT  SOS <scan data>  EOI
//! ```
//!
//! Only `APP0` (density fields, marked `*`) and the new `APP1` change. Every
//! other segment and the entropy-coded scan data are copied verbatim by
//! `img-parts`.
//!
//! ## EXIF layout
//!
//! Little-endian TIFF with two directories:
//!
//! | IFD | Tag | Type | Value |
//! |---|---|---|---|
//! | 0 | `0x0100` ImageWidth | LONG | width |
//! | 0 | `0x0101` ImageLength | LONG | height |
//! | 0 | `0x011A` XResolution | RATIONAL | dpi/1 |
//! | 0 | `0x011B` YResolution | RATIONAL | dpi/1 |
//! | 0 | `0x0128` ResolutionUnit | SHORT | 2 (inches) |
//! | 0 | `0x8769` ExifIFDPointer | LONG | offset |
//! | Exif | `0xA002` PixelXDimension | LONG | width |
//! | Exif | `0xA003` PixelYDimension | LONG | height |
//!
//! No timestamps are written, so the payload is a pure function of the
//! metadata.

use super::params::ResolutionMetadata;
use img_parts::Bytes;
use img_parts::jpeg::{Jpeg, JpegSegment, markers};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("not a readable JPEG: {0}")]
    Parse(#[source] img_parts::Error),
    #[error("failed to serialize JPEG: {0}")]
    Serialize(#[source] std::io::Error),
}

const TAG_IMAGE_WIDTH: u16 = 0x0100;
const TAG_IMAGE_LENGTH: u16 = 0x0101;
const TAG_X_RESOLUTION: u16 = 0x011A;
const TAG_Y_RESOLUTION: u16 = 0x011B;
const TAG_RESOLUTION_UNIT: u16 = 0x0128;
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_PIXEL_X_DIMENSION: u16 = 0xA002;
const TAG_PIXEL_Y_DIMENSION: u16 = 0xA003;

const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_RATIONAL: u16 = 5;

const TIFF_HEADER_LEN: u32 = 8;
const JFIF_IDENTIFIER: &[u8] = b"JFIF\0";
const EXIF_IDENTIFIER: &[u8] = b"Exif\0\0";

#[derive(Debug, Clone, Copy)]
enum Value {
    Short(u16),
    Long(u32),
    Rational(u32, u32),
}

impl Value {
    fn type_code(self) -> u16 {
        match self {
            Value::Short(_) => TYPE_SHORT,
            Value::Long(_) => TYPE_LONG,
            Value::Rational(..) => TYPE_RATIONAL,
        }
    }

    /// Bytes stored after the directory (values over 4 bytes).
    fn external_len(self) -> u32 {
        match self {
            Value::Rational(..) => 8,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    tag: u16,
    value: Value,
}

impl Entry {
    fn new(tag: u16, value: Value) -> Self {
        Self { tag, value }
    }
}

/// Size of a directory including its external value area.
fn ifd_len(entries: &[Entry]) -> u32 {
    let external: u32 = entries.iter().map(|e| e.value.external_len()).sum();
    2 + 12 * entries.len() as u32 + 4 + external
}

/// Append one IFD at `offset` (which must equal `out.len()`), entries
/// first, then the external values they point at.
fn write_ifd(out: &mut Vec<u8>, offset: u32, entries: &[Entry], next_ifd: u32) {
    debug_assert_eq!(out.len() as u32, offset);
    let mut external_offset = offset + 2 + 12 * entries.len() as u32 + 4;
    let mut external = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for entry in entries {
        out.extend_from_slice(&entry.tag.to_le_bytes());
        out.extend_from_slice(&entry.value.type_code().to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        match entry.value {
            Value::Short(v) => {
                out.extend_from_slice(&v.to_le_bytes());
                out.extend_from_slice(&[0, 0]);
            }
            Value::Long(v) => out.extend_from_slice(&v.to_le_bytes()),
            Value::Rational(num, den) => {
                out.extend_from_slice(&external_offset.to_le_bytes());
                external.extend_from_slice(&num.to_le_bytes());
                external.extend_from_slice(&den.to_le_bytes());
                external_offset += 8;
            }
        }
    }
    out.extend_from_slice(&next_ifd.to_le_bytes());
    out.extend_from_slice(&external);
}

/// Build the raw EXIF (TIFF) payload for `meta`, without the `Exif\0\0`
/// APP1 prefix.
pub fn resolution_exif(meta: &ResolutionMetadata) -> Vec<u8> {
    let mut ifd0 = vec![
        Entry::new(TAG_IMAGE_WIDTH, Value::Long(meta.width)),
        Entry::new(TAG_IMAGE_LENGTH, Value::Long(meta.height)),
        Entry::new(TAG_X_RESOLUTION, Value::Rational(meta.x_dpi, 1)),
        Entry::new(TAG_Y_RESOLUTION, Value::Rational(meta.y_dpi, 1)),
        Entry::new(TAG_RESOLUTION_UNIT, Value::Short(meta.unit.exif_code())),
        Entry::new(TAG_EXIF_IFD_POINTER, Value::Long(0)),
    ];
    let exif_ifd_offset = TIFF_HEADER_LEN + ifd_len(&ifd0);
    if let Some(pointer) = ifd0.last_mut() {
        pointer.value = Value::Long(exif_ifd_offset);
    }
    let exif_ifd = [
        Entry::new(TAG_PIXEL_X_DIMENSION, Value::Long(meta.width)),
        Entry::new(TAG_PIXEL_Y_DIMENSION, Value::Long(meta.height)),
    ];

    let mut out = Vec::with_capacity((exif_ifd_offset + ifd_len(&exif_ifd)) as usize);
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&TIFF_HEADER_LEN.to_le_bytes());
    write_ifd(&mut out, TIFF_HEADER_LEN, &ifd0, 0);
    write_ifd(&mut out, exif_ifd_offset, &exif_ifd, 0);
    out
}

/// Rewrite a JFIF APP0 body with new density fields. Returns `None` when the
/// body is not a JFIF header.
///
/// Layout: `"JFIF\0"`, version (2), units (1), Xdensity (2, BE),
/// Ydensity (2, BE), thumbnail size (2), thumbnail data.
fn jfif_with_density(contents: &[u8], meta: &ResolutionMetadata) -> Option<Vec<u8>> {
    if contents.len() < 14 || !contents.starts_with(JFIF_IDENTIFIER) {
        return None;
    }
    let clamp = |dpi: u32| u16::try_from(dpi).unwrap_or(u16::MAX);
    let mut patched = contents.to_vec();
    patched[7] = meta.unit.jfif_code();
    patched[8..10].copy_from_slice(&clamp(meta.x_dpi).to_be_bytes());
    patched[10..12].copy_from_slice(&clamp(meta.y_dpi).to_be_bytes());
    Some(patched)
}

/// Attach resolution metadata to an encoded JPEG, returning the new stream.
///
/// Any existing EXIF segment is replaced; the new one goes right after the
/// leading APP0 segments, since JFIF requires APP0 to follow SOI directly.
/// The scan data is untouched.
pub fn tag_jpeg(data: Vec<u8>, meta: &ResolutionMetadata) -> Result<Vec<u8>, TagError> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(data)).map_err(TagError::Parse)?;
    let segments = jpeg.segments_mut();

    for segment in segments.iter_mut() {
        if segment.marker() != markers::APP0 {
            continue;
        }
        if let Some(patched) = jfif_with_density(segment.contents(), meta) {
            *segment = JpegSegment::new_with_contents(markers::APP0, Bytes::from(patched));
            break;
        }
    }

    segments.retain(|s| {
        !(s.marker() == markers::APP1 && s.contents().starts_with(EXIF_IDENTIFIER))
    });
    let mut app1 = EXIF_IDENTIFIER.to_vec();
    app1.extend_from_slice(&resolution_exif(meta));
    let at = segments
        .iter()
        .take_while(|s| s.marker() == markers::APP0)
        .count();
    segments.insert(
        at,
        JpegSegment::new_with_contents(markers::APP1, Bytes::from(app1)),
    );

    let mut out = Vec::new();
    jpeg.encoder()
        .write_to(&mut out)
        .map_err(TagError::Serialize)?;
    Ok(out)
}

#![forbid(unsafe_code)]

//! Module for ZSoft PCX files.
//!
//! ## Parsing The Format
//!
//! Note: All multi-byte values in PCX are always little-endian encoded.
//!
//! * A PCX file always starts with a 128 byte header. The first byte is always
//!   10, and the header gives the image's bounding box, the bits per pixel of
//!   each plane, the number of color planes, and how many bytes each plane's
//!   scanline takes up.
//! * Bytes 16 through 63 of the header are a 16 color palette (as `[r, g, b]`
//!   entries). Files written by versions 3 and 4 of PC Paintbrush have no
//!   palette here, and a fixed set of CGA colors is used instead.
//! * After the header is the pixel data, run-length encoded (see
//!   [`pcx_iter_rle`]).
//! * At the very end there **might** be a 256 color palette: a marker byte of
//!   `0x0C` followed by 768 bytes of `[r, g, b]` entries.
//!
//! Each decoded scanline holds one row for each plane, one after the other.
//! How the rows turn into pixels depends on the planes and the bit depth, see
//! the [`unpack`] module for the details.
//!
//! ## Decoding
//!
//! [`pcx_try_bitmap_rgb`] runs the whole pipeline: header, palettes,
//! decompression, unpacking, and color resolution. Each stage is also public,
//! if you want to look at the intermediate data.
//!
//! Problems with the header or the compressed stream are errors. Problems with
//! the shape of the pixel data are not: the decoder keeps going and gives back
//! a partially filled image, along with a [`PcxFault`] explaining where it had
//! to stop.

#[cfg(feature = "alloc")]
use crate::image::Bitmap;
use crate::{r8g8b8_Srgb, try_split_off_byte_array, u16_le};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use log::{debug, trace, warn};

mod header;
pub use header::*;

mod palette;
pub use palette::*;

mod rle;
pub use rle::*;

#[cfg(feature = "alloc")]
pub mod unpack;
#[cfg(feature = "alloc")]
pub use unpack::*;

#[cfg(feature = "alloc")]
mod convert;
#[cfg(feature = "alloc")]
pub use convert::*;


/// The automatic decoder won't process images wider or taller than this.
///
/// This prevents accidental out-of-memory problems.
pub const PCX_MAX_DIMENSION: u32 = 17_000;

/// An error that stops decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum PcxError {
  /// The manufacturer byte isn't 10, this is probably not a PCX file.
  UnrecognizedFormat,
  /// The header is too short or describes an impossible image.
  MalformedHeader,
  /// The run-length data couldn't be read.
  DecodeError,
  /// The image is wider or taller than [`PCX_MAX_DIMENSION`].
  DimensionsTooLarge,
  /// The allocator couldn't give us enough space.
  AllocError,
}
#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for PcxError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::AllocError
  }
}
impl core::fmt::Display for PcxError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::UnrecognizedFormat => "cannot be recognized as a ZSoft PCX image",
      Self::MalformedHeader => "the PCX header is malformed",
      Self::DecodeError => "error while decoding the run-length data",
      Self::DimensionsTooLarge => "the image dimensions are too large",
      Self::AllocError => "couldn't allocate enough memory",
    })
  }
}

/// A problem with the shape of the pixel data.
///
/// These never stop a decode, they only stop the current stage early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PcxFault {
  /// A pixel needed a sample past the end of the data.
  SampleOutOfRange {
    /// The pixel's index.
    index: usize,
  },
  /// A bit position past the end of the data (or of a bit plane).
  BitOutOfRange {
    /// The bit position.
    position: usize,
  },
  /// Scanline padding couldn't be removed here.
  PaddingOutOfRange {
    /// Where the removal would start.
    offset: usize,
    /// How many entries would be removed.
    count: isize,
  },
  /// A palette index is too big for the palette.
  PaletteIndexOutOfRange {
    /// The index.
    index: usize,
    /// The palette's length.
    len: usize,
  },
  /// A monochrome sample is too big to scale up to a full channel.
  ChannelOverflow {
    /// The sample.
    sample: u8,
  },
}
impl core::fmt::Display for PcxFault {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::SampleOutOfRange { index } => write!(f, "no sample for pixel {index}"),
      Self::BitOutOfRange { position } => write!(f, "bit position {position} is out of range"),
      Self::PaddingOutOfRange { offset, count } => {
        write!(f, "can't remove {count} padding entries at {offset}")
      }
      Self::PaletteIndexOutOfRange { index, len } => {
        write!(f, "palette index {index} is out of range for {len} entries")
      }
      Self::ChannelOverflow { sample } => write!(f, "sample {sample} overflows a channel"),
    }
  }
}

/// A decoded PCX image.
#[cfg(feature = "alloc")]
#[derive(Debug, Clone, PartialEq)]
pub struct PcxImage<P> {
  /// The file's header.
  pub header: PcxHeader,
  /// The file's palettes.
  pub palettes: PcxPalettes,
  /// The color rule used for the pixels.
  pub rule: PcxColorRule,
  /// The final image. Row-major, with the origin in the top left.
  pub bitmap: Bitmap<P>,
  /// Set if unpacking the pixel data stopped early.
  pub unpack_fault: Option<PcxFault>,
  /// Set if resolving the colors stopped early. Pixels from the fault onward
  /// are black.
  pub convert_fault: Option<PcxFault>,
}
#[cfg(feature = "alloc")]
impl<P> PcxImage<P> {
  /// If any stage of decoding stopped early.
  #[inline]
  #[must_use]
  pub fn is_degraded(&self) -> bool {
    self.unpack_fault.is_some() || self.convert_fault.is_some()
  }
}

/// Decodes the bytes of a PCX file into an RGB bitmap.
///
/// ## Failure
/// * [`PcxError::MalformedHeader`] or [`PcxError::UnrecognizedFormat`] for a
///   bad header.
/// * [`PcxError::DimensionsTooLarge`] if either dimension is over
///   [`PCX_MAX_DIMENSION`].
/// * [`PcxError::DecodeError`] if there's no pixel data.
/// * [`PcxError::AllocError`] on allocation failure.
///
/// Pixel data that doesn't agree with the header is not an error, check
/// [`PcxImage::is_degraded`] to see if the image is complete.
#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
#[inline]
pub fn pcx_try_bitmap_rgb<P>(bytes: &[u8]) -> Result<PcxImage<P>, PcxError>
where
  P: From<r8g8b8_Srgb> + Clone,
{
  let (header, _) = PcxHeader::try_from_bytes(bytes)?;
  debug!("{header:?}");
  if header.width() > PCX_MAX_DIMENSION || header.height() > PCX_MAX_DIMENSION {
    return Err(PcxError::DimensionsTooLarge);
  }

  let palettes = PcxPalettes::from_file_bytes(bytes, header.version);
  trace!("{palettes:?}");

  let samples = pcx_decompress(bytes)?;
  let PcxUnpacked { data, fault: unpack_fault } = pcx_unpack(samples, &header)?;
  if let Some(fault) = unpack_fault {
    warn!("unpacking stopped early: {fault}");
  }

  let PcxConverted { bitmap, rule, fault: convert_fault, pixels_resolved } =
    pcx_convert(&data, &header, &palettes)?;
  if let Some(fault) = convert_fault {
    warn!("color conversion stopped after {pixels_resolved} pixels: {fault}");
  }

  Ok(PcxImage { header, palettes, rule, bitmap, unpack_fault, convert_fault })
}

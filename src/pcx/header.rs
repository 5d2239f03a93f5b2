//! The fixed 128 byte header at the start of every PCX file.

use super::*;

/// Size of the PCX header. Pixel data always starts right after it.
pub const PCX_HEADER_LEN: usize = 128;

/// The manufacturer byte of every ZSoft PCX file.
pub const PCX_MANUFACTURER: u8 = 10;

/// The PC Paintbrush version that wrote the file.
///
/// Mostly this only matters for picking the 16 color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PcxVersion {
  /// PC Paintbrush 2.5
  V2_5,
  /// PC Paintbrush 2.8, with palette information.
  V2_8WithPalette,
  /// PC Paintbrush 2.8, without palette information.
  V2_8WithoutPalette,
  /// PC Paintbrush for Windows.
  PaintbrushForWindows,
  /// PC Paintbrush 3.0 and later, including 24-bit files.
  V3_0,
  /// Any other version byte.
  Unknown(u8),
}
impl From<u8> for PcxVersion {
  #[inline]
  #[must_use]
  fn from(value: u8) -> Self {
    match value {
      0 => Self::V2_5,
      2 => Self::V2_8WithPalette,
      3 => Self::V2_8WithoutPalette,
      4 => Self::PaintbrushForWindows,
      5 => Self::V3_0,
      x => Self::Unknown(x),
    }
  }
}
impl From<PcxVersion> for u8 {
  #[inline]
  #[must_use]
  fn from(v: PcxVersion) -> Self {
    match v {
      PcxVersion::V2_5 => 0,
      PcxVersion::V2_8WithPalette => 2,
      PcxVersion::V2_8WithoutPalette => 3,
      PcxVersion::PaintbrushForWindows => 4,
      PcxVersion::V3_0 => 5,
      PcxVersion::Unknown(x) => x,
    }
  }
}
impl PcxVersion {
  /// If this version stores no 16 color palette of its own.
  ///
  /// These versions use the fixed CGA colors instead.
  #[inline]
  #[must_use]
  pub const fn uses_default_palette(self) -> bool {
    matches!(self, Self::V2_8WithoutPalette | Self::PaintbrushForWindows)
  }
}

/// The declared encoding of the pixel data.
///
/// This is informational only, the decoder always reads the pixel data as
/// run-length encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PcxEncoding {
  Uncompressed,
  Rle,
  Unknown(u8),
}
impl From<u8> for PcxEncoding {
  #[inline]
  #[must_use]
  fn from(value: u8) -> Self {
    match value {
      0 => Self::Uncompressed,
      1 => Self::Rle,
      x => Self::Unknown(x),
    }
  }
}

/// How the palette should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum PcxPaletteInfo {
  Ignored,
  ColorOrMono,
  Grayscale,
  Unknown(u16),
}
impl From<u16> for PcxPaletteInfo {
  #[inline]
  #[must_use]
  fn from(value: u16) -> Self {
    match value {
      0 => Self::Ignored,
      1 => Self::ColorOrMono,
      2 => Self::Grayscale,
      x => Self::Unknown(x),
    }
  }
}

/// The header at the start of all PCX files.
///
/// All multi-byte values are little-endian. The image's bounding box is
/// inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct PcxHeader {
  pub version: PcxVersion,
  pub encoding: PcxEncoding,
  /// Bits per pixel *per plane*.
  pub bits_per_pixel: u8,
  pub x_min: u16,
  pub y_min: u16,
  pub x_max: u16,
  pub y_max: u16,
  pub h_dpi: u16,
  pub v_dpi: u16,
  pub color_planes: u8,
  /// Bytes in one scanline of a single plane. Always even in well formed
  /// files.
  pub bytes_per_line: u16,
  pub palette_info: PcxPaletteInfo,
  pub h_screen_size: u16,
  pub v_screen_size: u16,
}
impl From<[u8; PCX_HEADER_LEN]> for PcxHeader {
  /// Reads the fields without any validation.
  ///
  /// The manufacturer byte and the 16 color palette are not part of the
  /// struct.
  #[inline]
  #[must_use]
  fn from(a: [u8; PCX_HEADER_LEN]) -> Self {
    Self {
      version: PcxVersion::from(a[1]),
      encoding: PcxEncoding::from(a[2]),
      bits_per_pixel: a[3],
      x_min: u16_le(&a[4..6]),
      y_min: u16_le(&a[6..8]),
      x_max: u16_le(&a[8..10]),
      y_max: u16_le(&a[10..12]),
      h_dpi: u16_le(&a[12..14]),
      v_dpi: u16_le(&a[14..16]),
      // 16..64 is the 16 color palette, 64 is reserved
      color_planes: a[65],
      bytes_per_line: u16_le(&a[66..68]),
      palette_info: PcxPaletteInfo::from(u16_le(&a[68..70])),
      h_screen_size: u16_le(&a[70..72]),
      v_screen_size: u16_le(&a[72..74]),
    }
  }
}
impl PcxHeader {
  /// Tries to get the header and the remaining bytes from the bytes of a PCX
  /// file.
  ///
  /// ## Failure
  /// * [`PcxError::MalformedHeader`] if there's less than 128 bytes, if the
  ///   bits per pixel isn't 1, 2, 4, or 8, or if the bounding box is inverted.
  /// * [`PcxError::UnrecognizedFormat`] if the manufacturer byte isn't 10.
  #[inline]
  pub fn try_from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), PcxError> {
    let (a, rest) =
      try_split_off_byte_array::<PCX_HEADER_LEN>(bytes).ok_or(PcxError::MalformedHeader)?;
    if a[0] != PCX_MANUFACTURER {
      return Err(PcxError::UnrecognizedFormat);
    }
    let header = Self::from(a);
    if !matches!(header.bits_per_pixel, 1 | 2 | 4 | 8)
      || header.x_max < header.x_min
      || header.y_max < header.y_min
    {
      return Err(PcxError::MalformedHeader);
    }
    Ok((header, rest))
  }

  /// `x_max - x_min + 1`
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    (self.x_max as u32).wrapping_sub(self.x_min as u32).wrapping_add(1)
  }

  /// `y_max - y_min + 1`
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    (self.y_max as u32).wrapping_sub(self.y_min as u32).wrapping_add(1)
  }

  /// Total pixel count of the image.
  #[inline]
  #[must_use]
  pub const fn pixel_count(&self) -> usize {
    (self.width() as usize).saturating_mul(self.height() as usize)
  }

  /// Bytes in one full scanline across every plane.
  #[inline]
  #[must_use]
  pub const fn total_bytes(&self) -> usize {
    (self.color_planes as usize) * (self.bytes_per_line as usize)
  }

  /// How many entries past `width` each decoded scanline has.
  ///
  /// This is `total_bytes * (8 / bits_per_pixel) - width`, and it can be
  /// negative when the header's `bytes_per_line` is too small for the width.
  #[inline]
  #[must_use]
  pub const fn line_padding(&self) -> isize {
    let per_byte = match self.bits_per_pixel {
      0 => 0,
      bpp => 8 / bpp as usize,
    };
    (self.total_bytes() * per_byte) as isize - self.width() as isize
  }
}

//! Turns decompressed samples into one value per pixel.
//!
//! How the samples are laid out depends on the plane count and the bits per
//! pixel of the image:
//!
//! * 1 plane, 1 or 2 bpp: pixels are packed within bytes, high bits first.
//! * 2 to 4 planes, 1 bpp: each scanline holds one row of bits per plane, and
//!   each pixel combines the same bit from every plane (plane 0 being the low
//!   bit of the palette index).
//! * 3 planes, 2 or more bpp: each scanline holds a red row, a green row, then
//!   a blue row, one byte per sample.
//! * 1 plane, 4 or 8 bpp: one byte per pixel.
//!
//! Scanlines are padded, so each case also drops the padding entries.
//!
//! A sample layout that doesn't agree with the header is not an error here:
//! unpacking stops at the first [`PcxFault`] and the data unpacked so far is
//! kept.

use super::*;

/// Per-pixel data produced by [`pcx_unpack`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PcxPixelIndices {
  /// One value per pixel, row-major. Depending on the image this is a direct
  /// sample or a palette index.
  Indexes(Vec<u8>),
  /// Separate red, green, and blue sequences.
  Channels {
    /// Red
    r: Vec<u8>,
    /// Green
    g: Vec<u8>,
    /// Blue
    b: Vec<u8>,
  },
}
impl PcxPixelIndices {
  /// The per-pixel values, or an empty slice for channel data.
  #[inline]
  #[must_use]
  pub fn indexes(&self) -> &[u8] {
    match self {
      Self::Indexes(v) => v,
      Self::Channels { .. } => &[],
    }
  }

  /// The `[r, g, b]` channels, or empty slices for per-pixel data.
  #[inline]
  #[must_use]
  pub fn channels(&self) -> [&[u8]; 3] {
    match self {
      Self::Indexes(_) => [&[], &[], &[]],
      Self::Channels { r, g, b } => [r, g, b],
    }
  }
}

/// The output of [`pcx_unpack`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PcxUnpacked {
  /// Everything that got unpacked.
  pub data: PcxPixelIndices,
  /// Set if unpacking stopped early.
  pub fault: Option<PcxFault>,
}

/// Gets the bit position of pixel `x` in row `y` within a bit stream whose
/// bytes hold the leftmost pixel in the high bit.
///
/// `x` counts from 1. Bit positions count from the low bit of each byte (bit
/// `n` is `(bytes[n / 8] >> (n % 8)) & 1`), so this finds the start of the
/// byte holding `x` and then folds the offset within that byte around.
#[inline]
#[must_use]
pub const fn pcx_bit_position(x: usize, y: usize, plane_line_size: usize) -> usize {
  let t = if x == 0 { 0 } else { ((x - 1) % 8) + 1 };
  (y * plane_line_size) + (x - t) + (8 - t)
}

#[inline]
fn bit_at(bytes: &[u8], position: usize) -> Result<bool, PcxFault> {
  match bytes.get(position / 8) {
    Some(byte) => Ok((byte >> (position % 8)) & 1 != 0),
    None => Err(PcxFault::BitOutOfRange { position }),
  }
}

/// One plane of a multi-plane 1bpp image, with its rows placed end to end.
struct BitPlane<'b> {
  bits: &'b [u8],
  plane: usize,
  plane_line_size: usize,
  line_size: usize,
  /// rows past this read as zero
  rows_len: usize,
  len: usize,
}
impl BitPlane<'_> {
  fn get(&self, position: usize) -> Result<bool, PcxFault> {
    if position >= self.len {
      Err(PcxFault::BitOutOfRange { position })
    } else if position >= self.rows_len {
      Ok(false)
    } else {
      let (y, x) = (position / self.plane_line_size, position % self.plane_line_size);
      bit_at(self.bits, (self.plane_line_size * self.plane) + (y * self.line_size) + x)
    }
  }
}

/// Unpacks the decompressed `samples` according to the header.
///
/// ## Failure
/// * [`PcxError::AllocError`] if the output can't be allocated. Data that
///   doesn't fit the header's geometry is never an error, see
///   [`PcxUnpacked::fault`] instead.
#[inline]
pub fn pcx_unpack(samples: Vec<u8>, header: &PcxHeader) -> Result<PcxUnpacked, PcxError> {
  let width = header.width() as usize;
  let height = header.height() as usize;
  let pixel_count = header.pixel_count();
  let padding = header.line_padding();
  match (header.color_planes, header.bits_per_pixel) {
    (1, 1 | 2) => {
      let mut out: Vec<u8> = Vec::new();
      out.try_reserve(pixel_count)?;
      let fault = unpack_packed_bits(&samples, width, height, header.bits_per_pixel, &mut out).err();
      Ok(PcxUnpacked { data: PcxPixelIndices::Indexes(out), fault })
    }
    (planes @ 2..=4, 1) => {
      let mut out: Vec<u8> = Vec::new();
      out.try_reserve(pixel_count)?;
      let fault = unpack_bit_planes(&samples, width, height, planes, &mut out).err();
      Ok(PcxUnpacked { data: PcxPixelIndices::Indexes(out), fault })
    }
    (3, _) => {
      let mut r = try_clone(&samples)?;
      let mut g = try_clone(&samples)?;
      let mut b = samples;
      b.try_reserve(1)?;
      let fault = (|| {
        remove_each(&mut r, (width..pixel_count).step_by(width), padding)?;
        // green starts one plane row later
        remove_each(&mut g, core::iter::once(0), header.bytes_per_line as isize)?;
        let green_end = usize::try_from(pixel_count as isize - padding).unwrap_or(0);
        remove_each(&mut g, (width..green_end).step_by(width), padding)?;
        // blue is skewed by one
        b.insert(0, 0);
        remove_each(&mut b, (0..pixel_count).step_by(width), padding)
      })()
      .err();
      Ok(PcxUnpacked { data: PcxPixelIndices::Channels { r, g, b }, fault })
    }
    (1, _) => {
      let mut samples = samples;
      let fault = remove_each(&mut samples, (width..pixel_count).step_by(width), padding).err();
      Ok(PcxUnpacked { data: PcxPixelIndices::Indexes(samples), fault })
    }
    _ => Ok(PcxUnpacked { data: PcxPixelIndices::Indexes(samples), fault: None }),
  }
}

fn try_clone(v: &[u8]) -> Result<Vec<u8>, PcxError> {
  let mut out = Vec::new();
  out.try_reserve(v.len())?;
  out.extend_from_slice(v);
  Ok(out)
}

fn unpack_packed_bits(
  bits: &[u8], width: usize, height: usize, bits_per_pixel: u8, out: &mut Vec<u8>,
) -> Result<(), PcxFault> {
  let bpp = usize::from(bits_per_pixel);
  let plane_line_size = (bits.len() * 8).checked_div(height).unwrap_or(0);
  for y in 0..height {
    for x in (1..(width * bpp) + 1).step_by(bpp) {
      let position = pcx_bit_position(x, y, plane_line_size);
      let high = u8::from(bit_at(bits, position)?);
      let index = if bpp == 1 {
        high
      } else {
        let low_position =
          position.checked_sub(1).ok_or(PcxFault::BitOutOfRange { position: usize::MAX })?;
        (high << 1) | u8::from(bit_at(bits, low_position)?)
      };
      out.push(index);
    }
  }
  Ok(())
}

fn unpack_bit_planes(
  bits: &[u8], width: usize, height: usize, planes: u8, out: &mut Vec<u8>,
) -> Result<(), PcxFault> {
  let planes = usize::from(planes);
  let bit_count = bits.len() * 8;
  let line_size = bit_count.checked_div(height).unwrap_or(0);
  let plane_line_size = line_size / planes;
  let bit_planes: [BitPlane<'_>; 4] = core::array::from_fn(|plane| BitPlane {
    bits,
    plane,
    plane_line_size,
    line_size,
    rows_len: plane_line_size * height,
    len: bit_count / planes,
  });
  for y in 0..height {
    for x in 1..=width {
      let position = pcx_bit_position(x, y, plane_line_size);
      let mut index = 0_u8;
      for (shift, plane) in bit_planes[..planes].iter().enumerate().rev() {
        index |= u8::from(plane.get(position)?) << shift;
      }
      out.push(index);
    }
  }
  Ok(())
}

/// Removes `count` entries at each offset given.
///
/// Each offset is where the entries are *after* the earlier removals, so
/// this works like calling `v.drain(offset..offset + count)` once per offset,
/// and it stops at the first removal that doesn't fit in what's left. Any
/// removals before that one stay done. The offsets must not go down.
fn remove_each(
  v: &mut Vec<u8>, offsets: impl Iterator<Item = usize>, count: isize,
) -> Result<(), PcxFault> {
  let len = v.len();
  // everything before `write` is final, everything from `read` on is untouched
  let mut write = 0;
  let mut read = 0;
  let mut result = Ok(());
  for offset in offsets {
    let keep = offset - write;
    match usize::try_from(count) {
      Ok(c) if read + keep + c <= len => {
        v.copy_within(read..read + keep, write);
        write += keep;
        read += keep + c;
      }
      _ => {
        result = Err(PcxFault::PaddingOutOfRange { offset, count });
        break;
      }
    }
  }
  v.copy_within(read..len, write);
  v.truncate(write + (len - read));
  result
}

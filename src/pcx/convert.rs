//! Resolves unpacked pixel data into final colors.

use super::*;

/// How the pixels of an image get their colors.
///
/// There's one rule per image, picked from the plane count, the bits per
/// pixel, the palette info, and which palettes the file has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PcxColorRule {
  /// Each 0 or 1 sample becomes black or white.
  Monochrome,
  /// 2bpp indexes into the 16 color palette.
  Cga,
  /// Indexes into the trailing 256 color palette.
  Palette256,
  /// The high nibble of each sample indexes into the 16 color palette.
  Palette16HighNibble,
  /// Each sample is a gray level.
  Grayscale,
  /// Planar indexes (3 or 4 planes of 1 bit) into the 16 color palette.
  Planar16,
  /// Red, green, and blue come from separate channels.
  DirectRgb,
  /// Nothing applies, and every pixel is left at the default color.
  Unmapped,
}
impl PcxColorRule {
  /// Picks the rule for an image.
  ///
  /// A grayscale palette info only ever shows up as a [`Grayscale`] pick for
  /// single plane images that have no usable palette: the depth-specific
  /// rules for single plane images always take precedence over it.
  ///
  /// [`Grayscale`]: PcxColorRule::Grayscale
  #[inline]
  #[must_use]
  pub fn select(header: &PcxHeader, palettes: &PcxPalettes) -> Self {
    match (header.color_planes, header.bits_per_pixel, header.palette_info) {
      (1, 1, _) => Self::Monochrome,
      (1, 2, _) => Self::Cga,
      (1, _, _) if palettes.palette256.is_some() => Self::Palette256,
      (1, _, _) if !palettes.palette16_empty => Self::Palette16HighNibble,
      (1, _, _) => Self::Grayscale,
      (3 | 4, 1, _) => Self::Planar16,
      (3, _, PcxPaletteInfo::ColorOrMono) => Self::DirectRgb,
      _ => Self::Unmapped,
    }
  }

  /// Gets the color of the `i`th pixel.
  ///
  /// `None` means the rule gives this pixel no color at all.
  #[inline]
  pub fn resolve(
    self, data: &PcxPixelIndices, palettes: &PcxPalettes, i: usize,
  ) -> Result<Option<r8g8b8_Srgb>, PcxFault> {
    let sample = || data.indexes().get(i).copied().ok_or(PcxFault::SampleOutOfRange { index: i });
    let color = match self {
      Self::Monochrome => {
        let v = sample()?;
        let c = v.checked_mul(255).ok_or(PcxFault::ChannelOverflow { sample: v })?;
        r8g8b8_Srgb { r: c, g: c, b: c }
      }
      Self::Cga | Self::Planar16 => palette_get(&palettes.palette16, usize::from(sample()?))?,
      Self::Palette256 => match &palettes.palette256 {
        Some(palette256) => palette_get(palette256, usize::from(sample()?))?,
        None => return Ok(None),
      },
      Self::Palette16HighNibble => palette_get(&palettes.palette16, usize::from(sample()? / 16))?,
      Self::Grayscale => {
        let v = sample()?;
        r8g8b8_Srgb { r: v, g: v, b: v }
      }
      Self::DirectRgb => {
        let [r, g, b] = data.channels();
        let channel = |c: &[u8]| c.get(i).copied().ok_or(PcxFault::SampleOutOfRange { index: i });
        r8g8b8_Srgb { r: channel(r)?, g: channel(g)?, b: channel(b)? }
      }
      Self::Unmapped => return Ok(None),
    };
    Ok(Some(color))
  }
}

#[inline]
fn palette_get(palette: &[r8g8b8_Srgb], index: usize) -> Result<r8g8b8_Srgb, PcxFault> {
  palette
    .get(index)
    .copied()
    .ok_or(PcxFault::PaletteIndexOutOfRange { index, len: palette.len() })
}

/// The output of [`pcx_convert`].
#[derive(Debug, Clone, PartialEq)]
pub struct PcxConverted<P> {
  /// The final image. Pixels the conversion didn't reach are black.
  pub bitmap: Bitmap<P>,
  /// The rule that was used.
  pub rule: PcxColorRule,
  /// Set if conversion stopped early.
  pub fault: Option<PcxFault>,
  /// How many pixels were visited before stopping.
  pub pixels_resolved: usize,
}

/// Builds the final image out of the unpacked data.
///
/// Pixels are filled in order. The first pixel that can't be resolved stops
/// the fill, and it and every pixel after it keep the default color.
///
/// ## Failure
/// * [`PcxError::AllocError`] if the image can't be allocated.
#[inline]
pub fn pcx_convert<P>(
  data: &PcxPixelIndices, header: &PcxHeader, palettes: &PcxPalettes,
) -> Result<PcxConverted<P>, PcxError>
where
  P: From<r8g8b8_Srgb> + Clone,
{
  let rule = PcxColorRule::select(header, palettes);
  debug!("color rule: {rule:?}");
  let pixel_count = header.pixel_count();
  let mut pixels: Vec<P> = Vec::new();
  pixels.try_reserve(pixel_count)?;
  pixels.resize(pixel_count, P::from(r8g8b8_Srgb { r: 0, g: 0, b: 0 }));

  let mut fault = None;
  let mut pixels_resolved = pixel_count;
  if rule != PcxColorRule::Unmapped {
    for (i, pixel) in pixels.iter_mut().enumerate() {
      match rule.resolve(data, palettes, i) {
        Ok(Some(color)) => *pixel = P::from(color),
        Ok(None) => (),
        Err(f) => {
          fault = Some(f);
          pixels_resolved = i;
          break;
        }
      }
    }
  }
  Ok(PcxConverted {
    bitmap: Bitmap { width: header.width(), height: header.height(), pixels },
    rule,
    fault,
    pixels_resolved,
  })
}

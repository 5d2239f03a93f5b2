//! The 16 color header palette and the optional 256 color trailing palette.

use super::*;

/// The byte just before a trailing 256 color palette.
pub const PCX_PALETTE_256_MARKER: u8 = 0x0C;

const fn rgb(r: u8, g: u8, b: u8) -> r8g8b8_Srgb {
  r8g8b8_Srgb { r, g, b }
}

/// The fixed palette used by the versions that don't store one.
///
/// The eight CGA colors, then eight black entries.
pub const PCX_CGA_PALETTE: [r8g8b8_Srgb; 16] = [
  rgb(0, 0, 0),
  rgb(0, 0, 255),
  rgb(0, 255, 0),
  rgb(0, 255, 255),
  rgb(255, 0, 0),
  rgb(255, 0, 255),
  rgb(255, 255, 0),
  rgb(255, 255, 255),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
  rgb(0, 0, 0),
];

/// The palettes of a PCX file.
#[derive(Clone, Copy, PartialEq)]
pub struct PcxPalettes {
  /// Always 16 entries.
  pub palette16: [r8g8b8_Srgb; 16],
  /// If the 16 color palette should be treated as absent.
  ///
  /// This starts out `true` and is cleared only when a palette stored in the
  /// header has some entry with all three channels non-zero. The fixed CGA
  /// palette leaves it set, even though that palette is populated.
  pub palette16_empty: bool,
  /// The trailing 256 color palette, if the file has one.
  pub palette256: Option<[r8g8b8_Srgb; 256]>,
}
impl core::fmt::Debug for PcxPalettes {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // the full 256 entry table isn't useful in debug output
    f.debug_struct("PcxPalettes")
      .field("palette16", &&self.palette16[..4])
      .field("palette16_empty", &self.palette16_empty)
      .field("palette256", &self.palette256.is_some())
      .finish()
  }
}
impl PcxPalettes {
  /// Pulls the palettes out of the bytes of a full PCX file.
  ///
  /// This never fails: short or unmarked trailing data just means there's no
  /// 256 color palette. The `bytes` must be at least as long as the header.
  #[inline]
  #[must_use]
  pub fn from_file_bytes(bytes: &[u8], version: PcxVersion) -> Self {
    let mut palette16_empty = true;
    let palette16 = if version.uses_default_palette() {
      PCX_CGA_PALETTE
    } else {
      let mut palette16 = [rgb(0, 0, 0); 16];
      let triples: &[[u8; 3]] = bytemuck::cast_slice(bytes.get(16..64).unwrap_or(&[]));
      for (entry, [r, g, b]) in palette16.iter_mut().zip(triples.iter().copied()) {
        // only checks that *some* entry isn't black in any channel
        if r != 0 && g != 0 && b != 0 {
          palette16_empty = false;
        }
        *entry = rgb(r, g, b);
      }
      palette16
    };
    Self { palette16, palette16_empty, palette256: pcx_palette256(bytes) }
  }
}

/// Gets the 256 color palette from the end of a PCX file, if there is one.
///
/// The file must be longer than 768 bytes and the byte just before the last
/// 768 bytes must be [`PCX_PALETTE_256_MARKER`].
#[inline]
#[must_use]
pub fn pcx_palette256(bytes: &[u8]) -> Option<[r8g8b8_Srgb; 256]> {
  if bytes.len() <= 768 {
    return None;
  }
  let (head, table) = bytes.split_at(bytes.len() - 768);
  if head.last().copied() != Some(PCX_PALETTE_256_MARKER) {
    return None;
  }
  let triples: &[[u8; 3]] = bytemuck::cast_slice(table);
  let mut palette = [rgb(0, 0, 0); 256];
  for (entry, [r, g, b]) in palette.iter_mut().zip(triples.iter().copied()) {
    *entry = rgb(r, g, b);
  }
  trace!("found a 256 color palette");
  Some(palette)
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_default_palette_for_versions_3_and_4() {
    for version in [3_u8, 4] {
      let mut bytes = vec![0_u8; 128];
      // these bytes must be ignored
      bytes[16..64].fill(0x77);
      let pals = PcxPalettes::from_file_bytes(&bytes, PcxVersion::from(version));
      assert_eq!(pals.palette16, PCX_CGA_PALETTE);
      assert_eq!(pals.palette16[1], rgb(0, 0, 255));
      assert_eq!(pals.palette16[7], rgb(255, 255, 255));
      assert!(pals.palette16[8..].iter().all(|c| *c == rgb(0, 0, 0)));
      // the flag is never cleared for the fixed palette
      assert!(pals.palette16_empty);
      assert!(pals.palette256.is_none());
    }
  }

  #[test]
  fn test_header_palette() {
    let mut bytes = vec![0_u8; 128];
    bytes[16..19].copy_from_slice(&[1, 2, 3]);
    bytes[61..64].copy_from_slice(&[4, 5, 6]);
    let pals = PcxPalettes::from_file_bytes(&bytes, PcxVersion::V3_0);
    assert_eq!(pals.palette16[0], rgb(1, 2, 3));
    assert_eq!(pals.palette16[15], rgb(4, 5, 6));
    assert!(pals.palette16[1..15].iter().all(|c| *c == rgb(0, 0, 0)));
    assert!(!pals.palette16_empty);
  }

  #[test]
  fn test_header_palette_emptiness_heuristic() {
    // entries with a zero channel don't count as present
    let mut bytes = vec![0_u8; 128];
    bytes[16..19].copy_from_slice(&[255, 0, 255]);
    bytes[19..22].copy_from_slice(&[0, 9, 9]);
    let pals = PcxPalettes::from_file_bytes(&bytes, PcxVersion::V2_5);
    assert_eq!(pals.palette16[0], rgb(255, 0, 255));
    assert!(pals.palette16_empty);
  }

  #[test]
  fn test_palette256() {
    let mut bytes = vec![0_u8; 130];
    bytes.push(PCX_PALETTE_256_MARKER);
    for i in 0..256 {
      bytes.extend_from_slice(&[i as u8, 255 - i as u8, (i / 2) as u8]);
    }
    let palette = pcx_palette256(&bytes).unwrap();
    for (i, c) in palette.iter().enumerate() {
      assert_eq!(*c, rgb(i as u8, 255 - i as u8, (i / 2) as u8));
    }
  }

  #[test]
  fn test_palette256_absent() {
    // too short
    let mut bytes = vec![PCX_PALETTE_256_MARKER];
    bytes.extend_from_slice(&[0; 767]);
    assert!(pcx_palette256(&bytes).is_none());
    // wrong marker
    let mut bytes = vec![0_u8; 200];
    bytes.push(0x0D);
    bytes.extend_from_slice(&[0; 768]);
    assert!(pcx_palette256(&bytes).is_none());
    // exactly 769 bytes with a marker is enough
    let mut bytes = vec![PCX_PALETTE_256_MARKER];
    bytes.extend_from_slice(&[7; 768]);
    assert_eq!(pcx_palette256(&bytes).unwrap()[255], rgb(7, 7, 7));
  }
}

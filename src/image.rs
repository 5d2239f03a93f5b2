#![forbid(unsafe_code)]

//! Provides heap-allocated image types.

use alloc::vec::Vec;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// You don't ever need to call this function yourself, but it's how the image
/// container converts 2d coordinates into index values within its payload
/// vector. If you'd like to use the exact same function it does for some
/// reason, you can.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A direct-color image.
///
/// Pixels are row-major, with the origin in the top left.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct Bitmap<P> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Iterates the rows of the image, top to bottom.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[P]> + '_ {
    self.pixels.chunks_exact(self.width.max(1) as usize)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use alloc::vec;

  #[test]
  fn test_xy_width_to_index() {
    assert_eq!(xy_width_to_index(0, 0, 10), 0);
    assert_eq!(xy_width_to_index(3, 0, 10), 3);
    assert_eq!(xy_width_to_index(3, 2, 10), 23);
  }

  #[test]
  fn test_bitmap_get() {
    let mut bitmap = Bitmap { width: 2, height: 2, pixels: vec![1, 2, 3, 4] };
    assert_eq!(bitmap.get(1, 0), Some(&2));
    assert_eq!(bitmap.get(0, 1), Some(&3));
    assert_eq!(bitmap.get(2, 0), None);
    assert_eq!(bitmap.get(0, 2), None);
    if let Some(p) = bitmap.get_mut(1, 1) {
      *p = 9;
    }
    assert_eq!(bitmap.pixels, vec![1, 2, 3, 9]);
    let rows: Vec<&[i32]> = bitmap.rows().collect();
    assert_eq!(rows, vec![&[1, 2][..], &[3, 9][..]]);
  }
}

#![forbid(unsafe_code)]

//! Just has shorthands for various int parsing things you'd want to do.

/// Reads a little-endian `u16` from the start of the bytes given.
///
/// Missing bytes read as zero, so callers should check the length first.
#[inline]
#[must_use]
pub(crate) fn u16_le(bytes: &[u8]) -> u16 {
  match bytes {
    [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
    [lo] => u16::from(*lo),
    [] => 0,
  }
}

#[inline]
pub(crate) fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_u16_le() {
    assert_eq!(u16_le(&[0x34, 0x12]), 0x1234);
    assert_eq!(u16_le(&[0x34, 0x12, 0xFF]), 0x1234);
    assert_eq!(u16_le(&[0x34]), 0x34);
    assert_eq!(u16_le(&[]), 0);
  }

  #[test]
  fn test_try_split_off_byte_array() {
    let bytes = [1_u8, 2, 3, 4, 5];
    assert_eq!(try_split_off_byte_array::<2>(&bytes), Some(([1, 2], &bytes[2..])));
    assert_eq!(try_split_off_byte_array::<5>(&bytes), Some(([1, 2, 3, 4, 5], &[][..])));
    assert_eq!(try_split_off_byte_array::<6>(&bytes), None);
  }
}

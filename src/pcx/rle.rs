//! The PCX format's run-length encoding system.

use super::*;

/// One decoded unit of PCX run-length data: `count` copies of `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct PcxRun {
  pub count: u8,
  pub value: u8,
}

/// Iterate RLE encoded PCX pixel data.
///
/// The `image_bytes` are the bytes that follow the header.
///
/// * A byte with the top two bits set is a run prefix. The low six bits are
///   the count, and the *next* byte is the value (which can be anything).
/// * Any other byte is a value that appears once.
///
/// A run prefix that's the very last byte has no value byte after it, so it's
/// read as a single literal value instead.
#[inline]
pub fn pcx_iter_rle(mut image_bytes: &[u8]) -> impl Iterator<Item = PcxRun> + '_ {
  core::iter::from_fn(move || {
    let (out, tail) = match image_bytes {
      [b, value, tail @ ..] if (b & 0xC0) == 0xC0 => {
        (PcxRun { count: b & 0x3F, value: *value }, tail)
      }
      [b, tail @ ..] => (PcxRun { count: 1, value: *b }, tail),
      [] => return None,
    };
    image_bytes = tail;
    Some(out)
  })
}

/// Decompresses all of the pixel data of a PCX file.
///
/// The `bytes` are the entire file, decoding starts right after the header
/// and runs to the very end. When the file has a trailing 256 color palette
/// that palette gets decoded along with everything else, later stages only
/// look at as many samples as they need.
///
/// ## Failure
/// * [`PcxError::DecodeError`] if there's no data at all after the header.
/// * [`PcxError::AllocError`] if the output can't be allocated.
#[cfg(feature = "alloc")]
#[inline]
pub fn pcx_decompress(bytes: &[u8]) -> Result<Vec<u8>, PcxError> {
  let image_bytes = match bytes.get(PCX_HEADER_LEN..) {
    Some(image_bytes) if !image_bytes.is_empty() => image_bytes,
    _ => return Err(PcxError::DecodeError),
  };
  let mut samples: Vec<u8> = Vec::new();
  samples.try_reserve(image_bytes.len())?;
  for PcxRun { count, value } in pcx_iter_rle(image_bytes) {
    let count = usize::from(count);
    samples.try_reserve(count)?;
    samples.extend(core::iter::repeat(value).take(count));
  }
  trace!("decompressed {} bytes into {} samples", image_bytes.len(), samples.len());
  Ok(samples)
}

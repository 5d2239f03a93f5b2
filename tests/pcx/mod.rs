use walkdir::WalkDir;
use zsoft_pcx::{
  pcx::{pcx_iter_rle, pcx_try_bitmap_rgb, PcxError, PCX_HEADER_LEN, PCX_MANUFACTURER},
  r8g8b8_Srgb,
};

#[test]
fn test_pcx_decoder_no_panics() {
  // iter ALL files in the test folder, even non-pcx files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if entry.file_type().is_dir() {
      continue;
    }
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v);
    for _ in pcx_iter_rle(&v) {
      //
    }
  }
}

#[test]
fn test_random_pixel_data_no_panics() {
  // a plausible header followed by garbage should decode to *something*
  for (planes, bpp) in [(1, 1), (1, 2), (1, 4), (1, 8), (2, 1), (3, 1), (4, 1), (3, 8), (2, 8)] {
    for _ in 0..10 {
      let mut v = super::rand_bytes(2048);
      v[0] = PCX_MANUFACTURER;
      v[1] = 5;
      v[3] = bpp;
      v[4..8].fill(0);
      let x_max = u16::from(v[8]) % 64;
      v[8..10].copy_from_slice(&x_max.to_le_bytes());
      let y_max = u16::from(v[10]) % 64;
      v[10..12].copy_from_slice(&y_max.to_le_bytes());
      v[65] = planes;
      match pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v) {
        Ok(image) => {
          assert_eq!(image.bitmap.pixels.len(), (image.bitmap.width * image.bitmap.height) as usize)
        }
        Err(e) => panic!("{e}"),
      }
    }
  }
}

#[test]
fn test_random_bytes_no_panics() {
  // even totally random data should never panic the decoder!
  for _ in 0..10 {
    let mut v = super::rand_bytes(1024);
    let _ = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v);
    v[0] = PCX_MANUFACTURER;
    let _ = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v);
  }
}

#[test]
fn test_error_messages() {
  let v = vec![0_u8; PCX_HEADER_LEN];
  let e = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v).unwrap_err();
  assert_eq!(e, PcxError::UnrecognizedFormat);
  assert_eq!(e.to_string(), "cannot be recognized as a ZSoft PCX image");
  let e = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&v[..10]).unwrap_err();
  assert_eq!(e, PcxError::MalformedHeader);
}

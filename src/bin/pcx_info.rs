use zsoft_pcx::{pcx::pcx_try_bitmap_rgb, r8g8b8_Srgb};

use std::path::Path;

fn main() {
  env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

  let mut failed = false;
  for arg in std::env::args_os().skip(1) {
    let path = Path::new(&arg);
    if let Err(e) = print_pcx_info(path) {
      eprintln!("error loading file '{}': {e}", path.display());
      failed = true;
    }
  }
  if failed {
    std::process::exit(1);
  }
}

fn print_pcx_info(path: &Path) -> Result<(), String> {
  let extension_ok = path
    .extension()
    .and_then(|e| e.to_str())
    .map(|e| e.eq_ignore_ascii_case("pcx") || e.eq_ignore_ascii_case("pcc"))
    .unwrap_or(false);
  if !extension_ok {
    return Err(String::from("must have an extension of '.pcx' or '.pcc'"));
  }
  let bytes = std::fs::read(path).map_err(|e| format!("can't be read: {e}"))?;
  let image = pcx_try_bitmap_rgb::<r8g8b8_Srgb>(&bytes).map_err(|e| e.to_string())?;

  let header = &image.header;
  println!("{}:", path.display());
  println!("  version: {:?}, encoding: {:?}", header.version, header.encoding);
  println!(
    "  {}x{}, {} plane(s) at {} bpp, {} bytes per line",
    header.width(),
    header.height(),
    header.color_planes,
    header.bits_per_pixel,
    header.bytes_per_line
  );
  println!("  dpi: {}x{}, palette info: {:?}", header.h_dpi, header.v_dpi, header.palette_info);
  println!(
    "  256 color palette: {}, color rule: {:?}",
    image.palettes.palette256.is_some(),
    image.rule
  );
  if let Some(fault) = image.unpack_fault {
    println!("  degraded while unpacking: {fault}");
  }
  if let Some(fault) = image.convert_fault {
    println!("  degraded while resolving colors: {fault}");
  }
  if let Some(r8g8b8_Srgb { r, g, b }) = image.bitmap.get(0, 0) {
    println!("  top left pixel: #{r:02X}{g:02X}{b:02X}");
  }
  Ok(())
}

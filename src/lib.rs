#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for decoding ZSoft PCX image data.
//!
//! The decoder works on a whole file that's already in memory. Reading the
//! file, checking its extension, and showing the result are left to the
//! caller. See the [`pcx`] module for the details of the format and for the
//! decoding pipeline.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub use pixel_formats::r8g8b8_Srgb;

mod parser_helpers;
pub(crate) use parser_helpers::*;

#[cfg(feature = "alloc")]
pub mod image;

pub mod pcx;

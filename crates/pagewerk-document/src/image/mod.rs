// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: header probing and pixel decoding.

pub mod decode;

pub use decode::{ImageCrateDecoder, ImageDecoder, decode_rgb8};

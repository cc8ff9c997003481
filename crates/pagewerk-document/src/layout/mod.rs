// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module: page assignment and scale-to-fit for images.

pub mod engine;

pub use engine::{LayoutConfig, Placement, SizedImage, STACK_GAP_MM, fit_to_box, layout, page_count};

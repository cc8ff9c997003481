// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagewerk: core types, errors, and the content registry shared across all crates.

pub mod acquire;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod registry;
pub mod types;
pub mod view;

pub use acquire::IncomingFile;
pub use config::ExportConfig;
pub use error::{FailureKind, PagewerkError};
pub use registry::{ContentRegistry, ImageEntry, MoveDirection};
pub use types::*;
pub use view::{ContentRow, ContentView};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{FitMode, Orientation, PaperSize};

/// Margin applied on every side of the page, in millimetres.
pub const DEFAULT_MARGIN_MM: f32 = 15.0;

/// File stem used when the user leaves the output name blank.
pub const DEFAULT_OUTPUT_STEM: &str = "my-lovely-pdf";

/// Settings for one export run, as chosen in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Paper size of every page.
    pub paper_size: PaperSize,
    /// Portrait or landscape.
    pub orientation: Orientation,
    /// Margin on all four sides, in millimetres.
    pub margin_mm: f32,
    /// Page distribution policy.
    pub fit_mode: FitMode,
    /// Free-text output name. Blank means "use the default".
    pub output_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: DEFAULT_MARGIN_MM,
            fit_mode: FitMode::default(),
            output_name: String::new(),
        }
    }
}

impl ExportConfig {
    /// Page dimensions in millimetres after applying orientation.
    pub fn page_size_mm(&self) -> (f32, f32) {
        self.orientation.orient(self.paper_size.dimensions_mm())
    }

    /// Output file name with the `.pdf` extension.
    pub fn file_name(&self) -> String {
        let stem = match self.output_name.trim() {
            "" => DEFAULT_OUTPUT_STEM,
            name => name,
        };
        if stem.to_ascii_lowercase().ends_with(".pdf") {
            stem.to_owned()
        } else {
            format!("{stem}.pdf")
        }
    }

    /// Parse settings handed over by the UI as JSON. Missing fields fall back
    /// to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

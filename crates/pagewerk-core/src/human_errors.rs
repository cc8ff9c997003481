// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the status banner.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives how the UI presents the banner.

use crate::error::PagewerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying again may well work.
    Transient,
    /// The user must change something first (remove an image, add one).
    ActionRequired,
    /// Retrying the same input will fail the same way.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether offering a "try again" button makes sense.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `PagewerkError` into a `HumanError` for the status banner.
pub fn humanize_error(err: &PagewerkError) -> HumanError {
    match err {
        PagewerkError::InvalidImage { id, width, height } => HumanError {
            message: "One of the images is empty.".into(),
            suggestion: format!(
                "Image {id} reports a size of {width}x{height} pixels. Remove it from the list and add the file again."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::DecodeFailure { id, .. } => HumanError {
            message: "We couldn't read one of the images.".into(),
            suggestion: format!(
                "Image {id} may be damaged or in an unusual format. Remove it, or save it as a JPEG or PNG and add it again."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::EncodeFailure(_) => HumanError {
            message: "Error creating PDF.".into(),
            suggestion: "Please try again. If it keeps failing, try with fewer or smaller images.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        PagewerkError::NothingToConvert => HumanError {
            message: "There's nothing to convert yet.".into(),
            suggestion: "Add at least one image, then convert.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::InvalidMargin {
            page_width,
            page_height,
            ..
        } => HumanError {
            message: "The page margin doesn't fit the page.".into(),
            suggestion: format!(
                "Use a margin of at least 0mm and less than half of the {}mm page side.",
                page_width.min(*page_height)
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PagewerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The PDF couldn't be saved there.".into(),
                    suggestion: "Choose a different folder and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem saving the PDF.".into(),
                    suggestion: "Try again. If this keeps happening, your storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        PagewerkError::Serialization(_) => HumanError {
            message: "The export settings couldn't be read.".into(),
            suggestion: "Reset the settings to their defaults and try again.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

//! Summary export delivery.
//!
//! How the captured image reaches the student depends on the client
//! platform: mobile Safari cannot trigger a file download, so the bytes are
//! shown as a viewable document instead. This is presentation plumbing; the
//! state machine only cares that a failed capture changes nothing.

use serde::{Deserialize, Serialize};

/// Client platform reported by the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Desktop,
    Android,
    Ios,
}

/// How the captured summary image is handed to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// Direct file download.
    Download,
    /// Open the image in a new viewable document.
    OpenDocument,
}

impl Delivery {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Ios => Delivery::OpenDocument,
            Platform::Desktop | Platform::Android => Delivery::Download,
        }
    }
}

/// A successfully captured summary image plus its delivery mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedSummary {
    pub bytes: Vec<u8>,
    pub delivery: Delivery,
}

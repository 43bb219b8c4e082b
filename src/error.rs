/// Errors surfaced by the tagged-parameter parser.
///
/// Only structural corruption of the frame and a missing SSID element are
/// errors. Sub-parses that are allowed to fail (vendor keys, WPA1/RSN suite
/// lists) are absorbed by their callers and never show up here.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The tag/length structure could not be walked, or the SSID is not UTF-8.
    #[error("could not parse 802.11 tagged parameters")]
    MalformedFrame,

    /// Tag 0 never appeared in the frame.
    #[error("no SSID tagged parameter in frame")]
    NoSsidElement,
}

pub type Result<T> = core::result::Result<T, FrameError>;

//! 802.11 tagged-parameter parser and security posture derivation.
//!
//! Takes the raw bytes of a captured management frame (beacon, probe
//! response, association request) plus the offset where its tagged
//! parameters begin, and derives:
//! - WPA1 / WPA2 / WPA3 classification with cipher and AKM suites
//! - WPS presence
//! - the SSID
//! - a SHA-256 capability fingerprint for correlating sightings
//!
//! Capture, frame classification, storage and transport belong to the
//! embedding application. The crate is `no_std` (with `alloc`) and has no
//! platform dependencies; the `std` feature adds timing hooks.
//!
//! ```text
//! frame bytes ─▶ tags::TaggedParameters::scan ─┬─▶ security::extract
//!                                              ├─▶ ParsedFrame::ssid
//!                                              └─▶ fingerprint::fingerprint
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod error;
pub mod fingerprint;
pub mod frame;
pub mod metrics;
pub mod report;
pub mod security;
pub mod suites;
pub mod tags;

pub use error::{FrameError, Result};
pub use frame::ParsedFrame;
pub use security::{SecurityConfiguration, SecurityMode};
pub use suites::{CipherSuite, KeyMgmtSuite};
pub use tags::{FrameSubtype, TaggedParameters, VendorKey};

/// Capability fingerprint of a frame's tagged parameters.
///
/// SHA-256 over the payloads of a fixed set of capability tags (ascending tag
/// id), followed by the text of every vendor key (ascending key order). The
/// SSID, timestamps and sequence numbers are not part of it, so repeated
/// sightings of the same device hash identically.
use alloc::string::String;
use sha2::{Digest, Sha256};

use crate::tags::TaggedParameters;

/// Tags whose payloads feed the fingerprint, ascending.
pub static FINGERPRINT_TAG_IDS: &[u8] = &[
    1,   // Supported Rates
    7,   // Country Information
    45,  // HT Capabilities
    48,  // RSN
    50,  // Extended Supported Rates
    127, // Extended Capabilities
];

/// Lowercase hex SHA-256 fingerprint.
pub fn fingerprint(tags: &TaggedParameters<'_>) -> String {
    let mut hasher = Sha256::new();

    for (tag, payload) in tags.iter() {
        if FINGERPRINT_TAG_IDS.contains(&tag) {
            hasher.update(payload);
        }
    }

    // Vendor key text only, not the vendor payloads
    for (key, _) in tags.vendor_iter() {
        hasher.update(key.as_str().as_bytes());
    }

    hex::encode(hasher.finalize())
}

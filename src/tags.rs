/// Tagged-parameter (information element) scanner for 802.11 management frames.
///
/// Element format: [tag id] [length] [payload...]
///
/// Elements start at a subtype-dependent offset after the fixed management
/// header and run up to the 4-byte FCS at the end of the captured frame.
/// Payloads are borrowed from the frame, nothing is copied.
use alloc::collections::BTreeMap;
use core::cmp::Ordering;
use core::fmt::{self, Write};
use core::hash::{Hash, Hasher};

use crate::error::{FrameError, Result};

/// Tagged parameters start after header (24) + timestamp (8) + interval (2) + capabilities (2)
pub const BEACON_TAGGED_PARAMS_POSITION: usize = 36;
pub const PROBE_RESPONSE_TAGGED_PARAMS_POSITION: usize = 36;
/// Header (24) + capabilities (2) + listen interval (2)
pub const ASSOC_REQUEST_TAGGED_PARAMS_POSITION: usize = 28;

/// Trailing frame check sequence, never read as tag data
pub const FCS_LEN: usize = 4;

pub const TAG_SSID: u8 = 0;
pub const TAG_RSN: u8 = 48;
pub const TAG_VENDOR_SPECIFIC: u8 = 221;

/// Management frame subtypes that carry tagged parameters we parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSubtype {
    Beacon,
    ProbeResponse,
    AssociationRequest,
}

impl FrameSubtype {
    /// Offset of the first tagged parameter for this subtype.
    pub const fn tagged_params_offset(&self) -> usize {
        match self {
            FrameSubtype::Beacon => BEACON_TAGGED_PARAMS_POSITION,
            FrameSubtype::ProbeResponse => PROBE_RESPONSE_TAGGED_PARAMS_POSITION,
            FrameSubtype::AssociationRequest => ASSOC_REQUEST_TAGGED_PARAMS_POSITION,
        }
    }
}

/// Maximum rendered length of a vendor key ("AA:BB:CC-255")
pub const VENDOR_KEY_LEN: usize = 12;

/// Vendor-specific element key: OUI as colon-separated uppercase hex, a dash,
/// then the vendor sub-type in decimal. E.g. "00:50:F2-1" for WPA1.
///
/// Ordered by its rendered text, which is the order fingerprinting uses.
#[derive(Debug, Clone)]
pub struct VendorKey(heapless::String<VENDOR_KEY_LEN>);

impl VendorKey {
    pub fn new(oui: [u8; 3], subtype: u8) -> Self {
        let mut s = heapless::String::new();
        let _ = write!(
            s,
            "{:02X}:{:02X}:{:02X}-{}",
            oui[0], oui[1], oui[2], subtype
        );
        Self(s)
    }

    /// Read OUI + sub-type from the start of a tag 221 payload.
    /// Returns None if the payload is shorter than 4 bytes.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match payload {
            [a, b, c, subtype, ..] => Some(Self::new([*a, *b, *c], *subtype)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for VendorKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for VendorKey {}

impl PartialOrd for VendorKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VendorKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for VendorKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for VendorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag id → payload and vendor key → payload, both in ascending key order.
///
/// A repeated tag id (or vendor key) keeps the last occurrence in the frame.
#[derive(Debug, Clone, Default)]
pub struct TaggedParameters<'a> {
    params: BTreeMap<u8, &'a [u8]>,
    vendor: BTreeMap<VendorKey, &'a [u8]>,
}

impl<'a> TaggedParameters<'a> {
    /// Walk the tagged parameters of `frame` starting at `start`.
    ///
    /// Stops cleanly when fewer than 2 bytes remain or the cursor reaches the
    /// FCS. A declared length running past the end of the frame fails the
    /// whole scan with [`FrameError::MalformedFrame`].
    pub fn scan(frame: &'a [u8], start: usize) -> Result<Self> {
        let mut tags = Self::default();
        let fcs_start = frame.len().saturating_sub(FCS_LEN);
        let mut pos = start;

        // pos grows by at least 2 per element, so this runs at most len/2 times.
        // The FCS is checked before reading a header, never parsed as a tag.
        while pos < fcs_start && frame.len() - pos >= 2 {
            let tag = frame[pos];
            let len = frame[pos + 1] as usize;

            let payload = match frame.get(pos + 2..pos + 2 + len) {
                Some(p) => p,
                None => {
                    log::info!(
                        "Malformed 802.11 tagged parameters at offset {}: [{}]",
                        start,
                        HexDump(frame)
                    );
                    return Err(FrameError::MalformedFrame);
                }
            };
            tags.params.insert(tag, payload);

            if tag == TAG_VENDOR_SPECIFIC {
                match VendorKey::from_payload(payload) {
                    Some(key) => {
                        tags.vendor.insert(key, payload);
                    }
                    None => log::debug!("Vendor tag shorter than OUI + type, skipping"),
                }
            }

            pos += len + 2;
        }

        Ok(tags)
    }

    /// Payload of a tag, if present (zero-length payloads are present).
    pub fn get(&self, tag: u8) -> Option<&'a [u8]> {
        self.params.get(&tag).copied()
    }

    pub fn contains(&self, tag: u8) -> bool {
        self.params.contains_key(&tag)
    }

    /// Payload of a vendor-specific element (OUI and sub-type included).
    pub fn vendor(&self, key: &VendorKey) -> Option<&'a [u8]> {
        self.vendor.get(key).copied()
    }

    pub fn contains_vendor(&self, key: &VendorKey) -> bool {
        self.vendor.contains_key(key)
    }

    /// Tags in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &'a [u8])> + '_ {
        self.params.iter().map(|(&tag, &payload)| (tag, payload))
    }

    /// Vendor elements in ascending key order.
    pub fn vendor_iter(&self) -> impl Iterator<Item = (&VendorKey, &'a [u8])> + '_ {
        self.vendor.iter().map(|(key, &payload)| (key, payload))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn vendor_len(&self) -> usize {
        self.vendor.len()
    }
}

/// Space-separated uppercase hex, for log lines.
pub(crate) struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}

/// Security configuration extraction from the WPA1 vendor element and the
/// RSN element (tag 48).
///
/// Both elements carry the same suite-list structure at different offsets:
///
/// ```text
/// [pairwise count: 2] [suite: 4] * count [akm count: 2] [suite: 4] * count
/// ```
///
/// Only the low byte of each count is read, as a signed value: a count of
/// 0x80 or more reads as an empty list. A frame can carry a WPA1 and an
/// RSN configuration at once (mixed mode). An element whose suite lists run
/// past its payload is logged and left out; it never fails the frame.
use core::fmt;

use heapless::Vec;
use serde::{Serialize, Serializer};

use crate::suites::{decode_akm, decode_cipher, CipherSuite, KeyMgmtSuite};
use crate::tags::{HexDump, TaggedParameters, VendorKey, TAG_RSN};

/// Microsoft OUI, used by the WPA1 and WPS vendor elements
pub const MICROSOFT_OUI: [u8; 3] = [0x00, 0x50, 0xF2];
pub const VENDOR_TYPE_WPA: u8 = 1;
pub const VENDOR_TYPE_WPS: u8 = 4;

/// Suite selector: 3-byte OUI + 1-byte type
pub const SUITE_LEN: usize = 4;
/// Suite count field preceding each suite list
pub const SUITE_COUNT_LEN: usize = 2;

/// A payload is at most 255 bytes, so a list holds at most 63 suites.
pub const MAX_SUITES: usize = 64;

pub type CipherList = Vec<CipherSuite, MAX_SUITES>;
pub type KeyMgmtList = Vec<KeyMgmtSuite, MAX_SUITES>;

/// At most one WPA1 and one RSN configuration per frame
pub type Configurations = Vec<SecurityConfiguration, 2>;

/// Where the suite lists start inside an element payload.
#[derive(Debug, Clone, Copy)]
pub struct IeLayout {
    pub name: &'static str,
    /// Offset of the pairwise (unicast) cipher suite count
    pub pairwise_count_offset: usize,
}

/// OUI (3) + type (1) + version (2) + group cipher (4)
pub const WPA1_LAYOUT: IeLayout = IeLayout {
    name: "WPA1",
    pairwise_count_offset: 10,
};

/// Version (2) + group cipher (4)
pub const RSN_LAYOUT: IeLayout = IeLayout {
    name: "WPA2",
    pairwise_count_offset: 6,
};

pub fn wpa1_vendor_key() -> VendorKey {
    VendorKey::new(MICROSOFT_OUI, VENDOR_TYPE_WPA)
}

pub fn wps_vendor_key() -> VendorKey {
    VendorKey::new(MICROSOFT_OUI, VENDOR_TYPE_WPS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityMode {
    None,
    Wpa1,
    Wpa2,
    Wpa3,
}

impl SecurityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityMode::None => "NONE",
            SecurityMode::Wpa1 => "WPA1",
            SecurityMode::Wpa2 => "WPA2",
            SecurityMode::Wpa3 => "WPA3",
        }
    }
}

impl Serialize for SecurityMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One security configuration advertised by a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityConfiguration {
    pub mode: SecurityMode,
    #[serde(rename = "key_mgmt")]
    pub key_management_modes: KeyMgmtList,
    #[serde(rename = "ciphers")]
    pub encryption_modes: CipherList,
}

impl SecurityConfiguration {
    /// Open network: no WPA1 or RSN element.
    pub fn none() -> Self {
        Self {
            mode: SecurityMode::None,
            key_management_modes: Vec::new(),
            encryption_modes: Vec::new(),
        }
    }

    pub fn has_key_mgmt(&self, akm: KeyMgmtSuite) -> bool {
        self.key_management_modes.contains(&akm)
    }
}

/// Renders as `NONE` or `<MODE>-<akm>/<akm>-<cipher>/<cipher>`, e.g. `WPA2-PSK-CCMP`.
impl fmt::Display for SecurityConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode.as_str())?;
        if self.mode == SecurityMode::None {
            return Ok(());
        }
        f.write_str("-")?;
        write_joined(f, self.key_management_modes.iter().map(|k| k.as_str()))?;
        f.write_str("-")?;
        write_joined(f, self.encryption_modes.iter().map(|c| c.as_str()))
    }
}

fn write_joined<'s>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'s str>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str("/")?;
        }
        f.write_str(item)?;
    }
    Ok(())
}

/// Derive the security configurations of a frame.
///
/// Returns the WPA1 configuration (if its vendor element decodes), then the
/// WPA2/WPA3 configuration (if the RSN element decodes). A frame with neither
/// element yields a single NONE configuration.
pub fn extract(tags: &TaggedParameters<'_>) -> Configurations {
    // Capacity 2 holds a WPA1 and an RSN configuration, or the lone NONE
    let mut configurations = Configurations::new();
    let mut found = 0;

    if let Some(wpa1) = tags.vendor(&wpa1_vendor_key()) {
        found += 1;
        log::trace!("{} payload: {}", WPA1_LAYOUT.name, HexDump(wpa1));

        match decode_suite_lists(wpa1, &WPA1_LAYOUT) {
            Some((encryption_modes, key_management_modes)) => {
                let _ = configurations.push(SecurityConfiguration {
                    mode: SecurityMode::Wpa1,
                    key_management_modes,
                    encryption_modes,
                });
            }
            None => log::error!("Could not decode {} suites from frame", WPA1_LAYOUT.name),
        }
    }

    if let Some(rsn) = tags.get(TAG_RSN) {
        found += 1;
        log::trace!("{} payload: {}", RSN_LAYOUT.name, HexDump(rsn));

        match decode_suite_lists(rsn, &RSN_LAYOUT) {
            Some((encryption_modes, key_management_modes)) => {
                // SAE alone decides WPA3; MFP capability bits are not consulted
                let mode = if key_management_modes.contains(&KeyMgmtSuite::Sae) {
                    SecurityMode::Wpa3
                } else {
                    SecurityMode::Wpa2
                };
                let _ = configurations.push(SecurityConfiguration {
                    mode,
                    key_management_modes,
                    encryption_modes,
                });
            }
            None => log::error!("Could not decode {} suites from frame", RSN_LAYOUT.name),
        }
    }

    if found == 0 {
        let _ = configurations.push(SecurityConfiguration::none());
    }

    configurations
}

/// Decode the pairwise cipher list and the AKM list that follows it.
fn decode_suite_lists(payload: &[u8], layout: &IeLayout) -> Option<(CipherList, KeyMgmtList)> {
    let ciphers = parse_suites(payload, layout.pairwise_count_offset, decode_cipher)?;
    let akm_count_offset =
        layout.pairwise_count_offset + SUITE_COUNT_LEN + ciphers.len() * SUITE_LEN;
    let akms = parse_suites(payload, akm_count_offset, decode_akm)?;
    Some((ciphers, akms))
}

/// Read a suite count at `count_offset` and decode that many suite type bytes.
/// None if the count or any suite lies outside the payload.
fn parse_suites<T>(
    payload: &[u8],
    count_offset: usize,
    decode: fn(u8) -> T,
) -> Option<Vec<T, MAX_SUITES>> {
    // Negative (high bit set) counts decode no suites
    let count = (*payload.get(count_offset)? as i8).max(0) as usize;
    let mut suites = Vec::new();

    for i in 0..count {
        let at = count_offset + SUITE_COUNT_LEN + i * SUITE_LEN;
        let suite = payload.get(at..at + SUITE_LEN)?;
        suites.push(decode(suite[SUITE_LEN - 1])).ok()?;
    }

    Some(suites)
}

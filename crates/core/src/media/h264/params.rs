use base64::prelude::{BASE64_STANDARD, Engine as _};

use super::nal::{self, NalUnitType};

/// SPS/PPS captured from a bitstream for out-of-band stream description.
///
/// Unlike the STAP-A buffering inside [`H264Payloader`](super::H264Payloader),
/// which lives for one access unit only, these are owned copies a sender
/// keeps to answer SDP offers (RFC 6184 §8.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSets {
    sps: Vec<u8>,
    pps: Vec<u8>,
}

impl ParameterSets {
    pub fn new(sps: Vec<u8>, pps: Vec<u8>) -> Self {
        Self { sps, pps }
    }

    /// Capture the first SPS and first PPS of an Annex B access unit.
    ///
    /// Returns `None` unless both are present.
    pub fn from_access_unit(data: &[u8]) -> Option<Self> {
        let mut sps = None;
        let mut pps = None;

        for unit in nal::split_nal_units(data) {
            match nal::nal_unit_type(unit) {
                Some((NalUnitType::Sps, _)) if sps.is_none() => sps = Some(unit),
                Some((NalUnitType::Pps, _)) if pps.is_none() => pps = Some(unit),
                _ => {}
            }
        }

        let (sps, pps) = (sps?, pps?);
        tracing::debug!(
            sps_len = sps.len(),
            pps_len = pps.len(),
            "H.264 parameter sets captured"
        );
        Some(Self::new(sps.to_vec(), pps.to_vec()))
    }

    pub fn sps(&self) -> &[u8] {
        &self.sps
    }

    pub fn pps(&self) -> &[u8] {
        &self.pps
    }

    /// `profile-level-id`: SPS bytes 1–3 (profile_idc, constraint flags,
    /// level_idc) as six hex digits.
    pub fn profile_level_id(&self) -> Option<String> {
        self.sps
            .get(1..4)
            .map(|b| format!("{:02x}{:02x}{:02x}", b[0], b[1], b[2]))
    }

    /// `sprop-parameter-sets`: base64 SPS and PPS, comma separated.
    pub fn sprop_parameter_sets(&self) -> String {
        format!(
            "{},{}",
            BASE64_STANDARD.encode(&self.sps),
            BASE64_STANDARD.encode(&self.pps)
        )
    }

    /// SDP `a=fmtp` line for payload type `pt`.
    pub fn fmtp(&self, pt: u8) -> String {
        let mut fmtp = format!("a=fmtp:{} packetization-mode=1", pt);
        if let Some(pl) = self.profile_level_id() {
            fmtp.push_str(&format!(";profile-level-id={}", pl));
        }
        fmtp.push_str(&format!(
            ";sprop-parameter-sets={}",
            self.sprop_parameter_sets()
        ));
        fmtp
    }
}

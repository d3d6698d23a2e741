//! H.264 RTP payloader (RFC 6184, packetization-mode=1).
//!
//! Turns one Annex B access unit into the ordered list of RTP payloads:
//!
//! - **Single NAL Unit** (§5.6): NAL units that fit within the MTU are
//!   forwarded as-is, without their start code.
//! - **STAP-A** (§5.7.1): an SPS and PPS seen in the access unit are held
//!   back and aggregated into one packet in front of the next forwarded
//!   NAL unit.
//! - **FU-A** (§5.8): NAL units larger than the MTU are fragmented.
//!
//! Access unit delimiters and filler data are dropped; they carry nothing a
//! receiver needs once the stream is framed by RTP.

pub mod fu_a;
pub mod nal;
pub mod params;
pub mod stap_a;

use std::borrow::Cow;

use super::Payloader;
use nal::NalUnitType;

pub use params::ParameterSets;

/// MTU used when none is configured.
pub const DEFAULT_MTU: u16 = 1200;

/// H.264 payloader.
///
/// Holds only its MTU; the SPS/PPS pair awaiting aggregation lives on the
/// stack of a single [`payload`](Payloader::payload) call and never leaks
/// into the next access unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct H264Payloader {
    mtu: u16,
}

impl H264Payloader {
    pub fn new(mtu: u16) -> Self {
        Self { mtu }
    }
}

impl Default for H264Payloader {
    fn default() -> Self {
        Self::new(DEFAULT_MTU)
    }
}

impl Payloader for H264Payloader {
    fn payload<'a>(&self, data: &'a [u8]) -> Vec<Cow<'a, [u8]>> {
        let mtu = usize::from(self.mtu);
        let mut payloads: Vec<Cow<'a, [u8]>> = Vec::new();

        let mut sps: Option<&'a [u8]> = None;
        let mut pps: Option<&'a [u8]> = None;

        for unit in nal::split_nal_units(data) {
            let Some((nal_type, _)) = nal::nal_unit_type(unit) else {
                continue;
            };

            match nal_type {
                NalUnitType::AccessUnitDelimiter | NalUnitType::Filler => continue,
                NalUnitType::Sps => {
                    sps = Some(unit);
                    continue;
                }
                NalUnitType::Pps => {
                    pps = Some(unit);
                    continue;
                }
                _ => {}
            }

            if let (Some(sps_nal), Some(pps_nal)) = (sps, pps) {
                match stap_a::pack(sps_nal, pps_nal).filter(|stap| stap.len() <= mtu) {
                    Some(stap) => payloads.push(Cow::Owned(stap)),
                    None => tracing::debug!(
                        size = stap_a::packed_len(sps_nal, pps_nal),
                        mtu,
                        "STAP-A for SPS/PPS exceeds MTU, dropping parameter sets"
                    ),
                }
                sps = None;
                pps = None;
            }

            if unit.len() <= mtu {
                payloads.push(Cow::Borrowed(unit));
            } else {
                payloads.extend(fu_a::fragment(unit, mtu).into_iter().map(Cow::Owned));
            }
        }

        payloads
    }

    fn name(&self) -> &'static str {
        "H264"
    }
}

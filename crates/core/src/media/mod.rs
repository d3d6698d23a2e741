//! Codec payloaders and the RTP packet type.
//!
//! A [`Payloader`] turns one encoded frame into the ordered list of RTP
//! payloads for it. It knows nothing about sequence numbers, timestamps or
//! SSRCs; the [`Packetizer`](crate::Packetizer) wraps a payloader and adds
//! those (RFC 3550 §5.1):
//!
//! - **Sequence number** (16-bit, wrapping) — for reordering and loss detection.
//! - **Timestamp** (32-bit, wrapping) — media clock, e.g. 90 kHz for video.
//! - **SSRC** (32-bit) — identifies the sender for the stream's lifetime.
//! - **Marker bit** — set on the last packet of a frame.
//!
//! ## Supported codecs
//!
//! | Codec | Payloader | RFC | Clock rate |
//! |-------|-----------|-----|------------|
//! | H.264 | [`h264::H264Payloader`] | [RFC 6184](https://tools.ietf.org/html/rfc6184) | 90000 |
//! | Opus | [`generic::GenericPayloader`] | [RFC 7587](https://tools.ietf.org/html/rfc7587) | 48000 |
//! | other | [`generic::GenericPayloader`] | — | 1 |

pub mod generic;
pub mod h264;
pub mod rtp;

use std::borrow::Cow;

use generic::GenericPayloader;
use h264::H264Payloader;

/// Codec-specific RTP payloader.
///
/// Payloads borrow from the input where they can (a NAL unit forwarded
/// unchanged) and own their bytes where they must (aggregation and
/// fragmentation headers). Implementations keep no state between calls.
///
/// ## Implementing a new codec
///
/// 1. Create a new module (e.g. `media/h265.rs`)
/// 2. Implement `Payloader` for your type
/// 3. Add a [`Codec`] variant and return your payloader from [`Codec::payloader`]
pub trait Payloader: Send {
    /// Split one encoded frame into RTP payloads, in transmission order.
    fn payload<'a>(&self, data: &'a [u8]) -> Vec<Cow<'a, [u8]>>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// The closed set of codecs a [`Packetizer`](crate::Packetizer) can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    H264,
    Opus,
    /// Any codec sent one frame per packet with no codec-specific clock.
    Generic,
}

impl Codec {
    /// RTP clock rate in Hz, used to convert presentation times to ticks.
    pub fn clock_rate(self) -> u32 {
        match self {
            Self::H264 => 90000,
            Self::Opus => 48000,
            Self::Generic => 1,
        }
    }

    /// Encoding name for the SDP `a=rtpmap` attribute.
    pub fn encoding_name(self) -> Option<&'static str> {
        match self {
            Self::H264 => Some("H264"),
            Self::Opus => Some("opus"),
            Self::Generic => None,
        }
    }

    /// SDP `a=rtpmap` line for payload type `pt`.
    ///
    /// Opus always advertises two channels (RFC 7587 §7).
    pub fn rtpmap(self, pt: u8) -> Option<String> {
        let name = self.encoding_name()?;
        Some(match self {
            Self::Opus => format!("a=rtpmap:{} {}/{}/2", pt, name, self.clock_rate()),
            _ => format!("a=rtpmap:{} {}/{}", pt, name, self.clock_rate()),
        })
    }

    /// The payloader that frames this codec's data.
    pub fn payloader(self, mtu: u16) -> Box<dyn Payloader> {
        match self {
            Self::H264 => Box::new(H264Payloader::new(mtu)),
            Self::Opus | Self::Generic => Box::new(GenericPayloader),
        }
    }
}

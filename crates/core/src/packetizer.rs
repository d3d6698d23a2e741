//! RTP sequencing: wraps a [`Payloader`] and stamps its payloads with
//! sequence numbers, timestamps, SSRC and marker bits.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::media::h264::DEFAULT_MTU;
use crate::media::rtp::RtpPacket;
use crate::media::{Codec, Payloader};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Configuration for a [`Packetizer`].
///
/// Fields left as `None` are drawn at random when the packetizer is
/// created, as RFC 3550 §5.1 recommends for the initial sequence number
/// and timestamp and §8.1 requires for the SSRC.
#[derive(Debug, Clone)]
pub struct PacketizerConfig {
    /// RTP payload type (7-bit). Dynamic types use 96–127.
    pub payload_type: u8,
    /// Maximum RTP payload size in bytes.
    pub mtu: u16,
    pub ssrc: Option<u32>,
    pub initial_sequence: Option<u16>,
    pub initial_timestamp: Option<u32>,
}

impl Default for PacketizerConfig {
    fn default() -> Self {
        Self {
            payload_type: 96,
            mtu: DEFAULT_MTU,
            ssrc: None,
            initial_sequence: None,
            initial_timestamp: None,
        }
    }
}

/// Emits RTP packets with monotonic (wrapping) sequence numbers for one
/// outgoing stream.
///
/// All packets produced by one call share a timestamp, and only the last
/// carries the marker bit. The timestamp advances either by an explicit
/// sample count after the call ([`packetize`](Self::packetize)) or by the
/// elapsed presentation time before it ([`packetize_at`](Self::packetize_at)).
///
/// Calls are atomic: every packet is constructed before any counter moves,
/// so a failed call leaves the packetizer untouched.
///
/// A packetizer is not internally synchronized. Callers sharing one across
/// threads wrap it in a mutex; independent streams need no coordination.
pub struct Packetizer {
    codec: Codec,
    payload_type: u8,
    ssrc: u32,
    sequence_number: u16,
    timestamp: u32,
    last_pts: Option<Duration>,
    payloader: Box<dyn Payloader>,
}

impl Packetizer {
    /// Create a packetizer using the codec's own payloader.
    pub fn new(codec: Codec, config: PacketizerConfig) -> Self {
        let payloader = codec.payloader(config.mtu);
        Self::with_payloader(codec, config, payloader)
    }

    /// Create a packetizer around a custom payloader.
    ///
    /// `codec` still selects the clock rate for [`packetize_at`](Self::packetize_at).
    pub fn with_payloader(
        codec: Codec,
        config: PacketizerConfig,
        payloader: Box<dyn Payloader>,
    ) -> Self {
        let ssrc = config.ssrc.unwrap_or_else(rand::random);
        let sequence_number = config.initial_sequence.unwrap_or_else(rand::random);
        let timestamp = config.initial_timestamp.unwrap_or_else(rand::random);

        tracing::debug!(
            codec = ?codec,
            payloader = payloader.name(),
            pt = config.payload_type,
            mtu = config.mtu,
            ssrc = format_args!("{:#010X}", ssrc),
            sequence_number,
            timestamp,
            "packetizer created"
        );

        Self {
            codec,
            payload_type: config.payload_type,
            ssrc,
            sequence_number,
            timestamp,
            last_pts: None,
            payloader,
        }
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn payload_type(&self) -> u8 {
        self.payload_type
    }

    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    /// RTP clock rate in Hz for this packetizer's codec.
    pub fn clock_rate(&self) -> u32 {
        self.codec.clock_rate()
    }

    /// Sequence number the next packet will carry.
    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    /// Timestamp the next packet will carry (before any presentation-time
    /// advance).
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Presentation time recorded by the last successful
    /// [`packetize_at`](Self::packetize_at) call.
    pub fn last_presentation_time(&self) -> Option<Duration> {
        self.last_pts
    }

    /// Packetize one frame, then advance the timestamp by `samples`.
    ///
    /// For video at 90 kHz, `samples` is `90000 / fps` (e.g. 3000 at 30 fps);
    /// for 20 ms Opus frames it is 960.
    pub fn packetize(&mut self, data: &[u8], samples: u32) -> Result<Vec<RtpPacket>> {
        let packets = self.build_packets(data, self.timestamp)?;
        self.commit(&packets, self.timestamp, samples);
        Ok(packets)
    }

    /// Packetize one frame presented at `pts`.
    ///
    /// The timestamp first advances by the time elapsed since the previous
    /// call, scaled to the codec clock; the first call does not move it.
    /// A `pts` earlier than the previous one moves the timestamp backwards
    /// modulo 2^32.
    pub fn packetize_at(&mut self, data: &[u8], pts: Duration) -> Result<Vec<RtpPacket>> {
        let timestamp = match self.last_pts {
            Some(prev) => {
                let rate = self.clock_rate();
                let delta = media_ticks(pts, rate).wrapping_sub(media_ticks(prev, rate));
                self.timestamp.wrapping_add(delta as u32)
            }
            None => self.timestamp,
        };

        let packets = self.build_packets(data, timestamp)?;
        self.commit(&packets, timestamp, 0);
        self.last_pts = Some(pts);
        Ok(packets)
    }

    fn build_packets(&self, data: &[u8], timestamp: u32) -> Result<Vec<RtpPacket>> {
        let payloads = self.payloader.payload(data);
        let last = payloads.len().saturating_sub(1);

        payloads
            .into_iter()
            .enumerate()
            .map(|(i, payload)| {
                RtpPacket::new(
                    self.payload_type,
                    payload.into_owned(),
                    self.ssrc,
                    self.sequence_number.wrapping_add(i as u16),
                    timestamp,
                    i == last,
                )
            })
            .collect()
    }

    fn commit(&mut self, packets: &[RtpPacket], timestamp: u32, samples: u32) {
        let first_sequence = self.sequence_number;
        self.sequence_number = self.sequence_number.wrapping_add(packets.len() as u16);
        self.timestamp = timestamp.wrapping_add(samples);

        tracing::trace!(
            payloader = self.payloader.name(),
            packets = packets.len(),
            first_sequence,
            next_sequence = self.sequence_number,
            ts = timestamp,
            next_ts = self.timestamp,
            "frame packetized"
        );
    }
}

impl fmt::Debug for Packetizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packetizer")
            .field("codec", &self.codec)
            .field("payload_type", &self.payload_type)
            .field("ssrc", &format_args!("{:#010X}", self.ssrc))
            .field("sequence_number", &self.sequence_number)
            .field("timestamp", &self.timestamp)
            .field("last_pts", &self.last_pts)
            .field("payloader", &self.payloader.name())
            .finish()
    }
}

/// Whole clock ticks elapsed at `pts`, truncated.
fn media_ticks(pts: Duration, clock_rate: u32) -> u64 {
    (pts.as_nanos() * u128::from(clock_rate) / NANOS_PER_SEC) as u64
}

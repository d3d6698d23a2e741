//! RFC 6184 H.264 payloadization and RTP packet sequencing.
//!
//! Raw access units go in, RTP packets come out:
//!
//! ```text
//! Annex B bytes → NAL split → classify → STAP-A | FU-A | passthrough
//!               → ordered payloads → Packetizer → RtpPacket
//! ```
//!
//! ```
//! use rtp_payload::{Codec, Packetizer, PacketizerConfig};
//!
//! let mut packetizer = Packetizer::new(
//!     Codec::H264,
//!     PacketizerConfig {
//!         initial_sequence: Some(0),
//!         ..PacketizerConfig::default()
//!     },
//! );
//! let access_unit = [0, 0, 0, 1, 0x65, 0x88, 0x84, 0x00];
//! let packets = packetizer.packetize(&access_unit, 3000).unwrap();
//! assert_eq!(packets.len(), 1);
//! assert!(packets[0].marker());
//! assert_eq!(packetizer.sequence_number(), 1);
//! ```

pub mod error;
pub mod media;
pub mod packetizer;

pub use error::{Result, RtpError};
pub use media::h264::{H264Payloader, ParameterSets};
pub use media::rtp::RtpPacket;
pub use media::{Codec, Payloader};
pub use packetizer::{Packetizer, PacketizerConfig};

use crate::error::{Result, RtpError};

/// Size of the RTP fixed header without CSRCs or extensions.
pub const HEADER_LEN: usize = 12;

/// A single outgoing RTP packet (RFC 3550 §5.1).
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|X|  CC   |M|     PT      |       Sequence Number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             SSRC                              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Version is always 2. Padding, extension, and CSRC count are always 0.
/// The packet owns its payload; the [`Packetizer`](crate::Packetizer)
/// fills in sequence number, timestamp, and marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    payload_type: u8,
    ssrc: u32,
    sequence_number: u16,
    timestamp: u32,
    marker: bool,
    payload: Vec<u8>,
}

impl RtpPacket {
    /// Construct a packet, validating the payload type.
    ///
    /// Fails if `payload_type` does not fit in 7 bits or falls in the
    /// RTCP-conflicting range 72–76.
    pub fn new(
        payload_type: u8,
        payload: Vec<u8>,
        ssrc: u32,
        sequence_number: u16,
        timestamp: u32,
        marker: bool,
    ) -> Result<Self> {
        validate_payload_type(payload_type)?;
        Ok(Self {
            payload_type,
            ssrc,
            sequence_number,
            timestamp,
            marker,
            payload,
        })
    }

    pub fn payload_type(&self) -> u8 {
        self.payload_type
    }

    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Marker bit. For H.264 it flags the last packet of an access unit
    /// (RFC 6184 §5.1).
    pub fn marker(&self) -> bool {
        self.marker
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Serialize the 12-byte fixed header.
    pub fn header(&self) -> [u8; HEADER_LEN] {
        let first_byte: u8 = 2 << 6;
        let second_byte: u8 = ((self.marker as u8) << 7) | self.payload_type;

        let mut header = [0u8; HEADER_LEN];
        header[0] = first_byte;
        header[1] = second_byte;
        header[2..4].copy_from_slice(&self.sequence_number.to_be_bytes());
        header[4..8].copy_from_slice(&self.timestamp.to_be_bytes());
        header[8..12].copy_from_slice(&self.ssrc.to_be_bytes());
        header
    }

    /// Serialize header followed by payload, ready for the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut packet = Vec::with_capacity(HEADER_LEN + self.payload.len());
        packet.extend_from_slice(&self.header());
        packet.extend_from_slice(&self.payload);
        packet
    }
}

/// Check that a payload type can be written into an RTP header.
pub fn validate_payload_type(payload_type: u8) -> Result<()> {
    if payload_type > 0x7f {
        return Err(RtpError::PayloadTypeOutOfRange(payload_type));
    }
    if (72..=76).contains(&payload_type) {
        return Err(RtpError::ReservedPayloadType(payload_type));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_packet(marker: bool) -> RtpPacket {
        RtpPacket::new(96, vec![0x65, 0xAA], 0xAABBCCDD, 1234, 90000, marker).unwrap()
    }

    #[test]
    fn version_is_2() {
        let buf = make_packet(false).to_bytes();
        assert_eq!(buf[0] >> 6, 2);
        assert_eq!(buf[0] & 0x3f, 0, "P, X and CC must be zero");
    }

    #[test]
    fn marker_bit() {
        assert_eq!(make_packet(false).header()[1] & 0x80, 0);
        assert_eq!(make_packet(true).header()[1] & 0x80, 0x80);
    }

    #[test]
    fn payload_type_written() {
        let buf = make_packet(true).header();
        assert_eq!(buf[1] & 0x7f, 96);
    }

    #[test]
    fn fields_big_endian() {
        let buf = make_packet(false).header();
        assert_eq!(u16::from_be_bytes([buf[2], buf[3]]), 1234);
        assert_eq!(u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]), 90000);
        assert_eq!(
            u32::from_be_bytes([buf[8], buf[9], buf[10], buf[11]]),
            0xAABBCCDD
        );
    }

    #[test]
    fn payload_follows_header() {
        let buf = make_packet(false).to_bytes();
        assert_eq!(buf.len(), HEADER_LEN + 2);
        assert_eq!(&buf[HEADER_LEN..], &[0x65, 0xAA]);
    }

    #[test]
    fn rejects_payload_type_above_127() {
        let err = RtpPacket::new(128, vec![], 1, 0, 0, false).unwrap_err();
        assert_eq!(err, RtpError::PayloadTypeOutOfRange(128));
    }

    #[test]
    fn rejects_rtcp_conflicting_payload_types() {
        for pt in 72..=76 {
            let err = RtpPacket::new(pt, vec![], 1, 0, 0, false).unwrap_err();
            assert_eq!(err, RtpError::ReservedPayloadType(pt));
        }
        assert!(RtpPacket::new(71, vec![], 1, 0, 0, false).is_ok());
        assert!(RtpPacket::new(77, vec![], 1, 0, 0, false).is_ok());
    }
}

//! Error types for the RTP payloadization library.

/// Errors that can occur while turning payloads into RTP packets.
///
/// Payloaders themselves never fail: malformed input (empty NAL units,
/// oversized STAP-A aggregates, degenerate FU-A bodies) is skipped rather
/// than reported. The only hard failures come from packet construction.
///
/// - **Packet**: [`PayloadTypeOutOfRange`](Self::PayloadTypeOutOfRange),
///   [`ReservedPayloadType`](Self::ReservedPayloadType).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RtpError {
    /// The payload type does not fit the 7-bit PT field (RFC 3550 §5.1).
    #[error("payload type {0} out of range (must be 0-127)")]
    PayloadTypeOutOfRange(u8),

    /// Payload types 72–76 collide with RTCP packet types when RTP and
    /// RTCP are multiplexed on one port (RFC 5761 §4).
    #[error("payload type {0} collides with RTCP packet types (72-76)")]
    ReservedPayloadType(u8),
}

/// Convenience alias for `Result<T, RtpError>`.
pub type Result<T> = std::result::Result<T, RtpError>;

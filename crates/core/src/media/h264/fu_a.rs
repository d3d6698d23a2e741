//! FU-A fragmentation (RFC 6184 §5.8).
//!
//! Each fragment carries a 2-byte FU header before a slice of the NAL
//! payload:
//!
//! ```text
//! FU indicator:  [F|NRI|Type=28]     (1 byte)
//! FU header:     [S|E|R|NAL_Type]    (1 byte)
//! Fragment data: [...]               (up to MTU - 2 bytes)
//! ```
//!
//! The original NAL header byte is not transmitted; its NRI travels in the
//! FU indicator and its type in the FU header.

use super::nal::{NAL_REF_IDC_MASK, NAL_TYPE_MASK};

/// FU-A NAL unit type.
pub const FU_A_TYPE: u8 = 28;
/// FU indicator + FU header.
pub const FU_A_HEADER_SIZE: usize = 2;

const FU_START: u8 = 0x80;
const FU_END: u8 = 0x40;

/// Fragment one NAL unit into FU-A payloads no larger than `mtu`.
///
/// Every fragment but the last carries `mtu - 2` payload bytes. The start
/// bit is set on the first fragment and the end bit on the last, so the
/// concatenated fragment bodies reproduce `nal[1..]` exactly.
///
/// Returns nothing when there is no body past the NAL header, or when the
/// MTU leaves no room after the FU header.
pub fn fragment(nal: &[u8], mtu: usize) -> Vec<Vec<u8>> {
    let Some((&nal_header, body)) = nal.split_first() else {
        return Vec::new();
    };

    let max_fragment = mtu.saturating_sub(FU_A_HEADER_SIZE);
    if max_fragment.min(body.len()) == 0 {
        tracing::warn!(
            nal_size = nal.len(),
            mtu,
            "NAL unit cannot be FU-A fragmented, dropping"
        );
        return Vec::new();
    }

    let nal_type = nal_header & NAL_TYPE_MASK;
    let fu_indicator = FU_A_TYPE | (nal_header & NAL_REF_IDC_MASK);

    let chunks = body.chunks(max_fragment);
    let count = chunks.len();

    let fragments: Vec<Vec<u8>> = chunks
        .enumerate()
        .map(|(i, chunk)| {
            let mut fu_header = nal_type;
            if i == 0 {
                fu_header |= FU_START;
            }
            if i + 1 == count {
                fu_header |= FU_END;
            }

            let mut out = Vec::with_capacity(FU_A_HEADER_SIZE + chunk.len());
            out.push(fu_indicator);
            out.push(fu_header);
            out.extend_from_slice(chunk);
            out
        })
        .collect();

    tracing::trace!(
        nal_type,
        nal_size = nal.len(),
        fragments = fragments.len(),
        "FU-A fragmented NAL unit"
    );

    fragments
}

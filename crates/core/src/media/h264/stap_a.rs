//! STAP-A aggregation (RFC 6184 §5.7.1).
//!
//! ```text
//! +-----------+----------+-----------+----------+-----------+
//! | STAP-A hdr| SPS size |  SPS NAL  | PPS size |  PPS NAL  |
//! | (1 byte)  | (16 bit) |           | (16 bit) |           |
//! +-----------+----------+-----------+----------+-----------+
//! ```

/// STAP-A NAL header: F=0, NRI=3, Type=24.
pub const STAP_A_HEADER: u8 = 0x78;

const LENGTH_FIELD_SIZE: usize = 2;

/// Size of the aggregate [`pack`] would produce for this pair.
pub fn packed_len(sps: &[u8], pps: &[u8]) -> usize {
    1 + LENGTH_FIELD_SIZE + sps.len() + LENGTH_FIELD_SIZE + pps.len()
}

/// Aggregate one SPS and one PPS into a single STAP-A payload.
///
/// Returns `None` when either NAL unit is longer than 65535 bytes, since
/// its size could not be written to the 16-bit field.
pub fn pack(sps: &[u8], pps: &[u8]) -> Option<Vec<u8>> {
    let sps_len = u16::try_from(sps.len()).ok()?;
    let pps_len = u16::try_from(pps.len()).ok()?;

    let mut out = Vec::with_capacity(packed_len(sps, pps));
    out.push(STAP_A_HEADER);
    out.extend_from_slice(&sps_len.to_be_bytes());
    out.extend_from_slice(sps);
    out.extend_from_slice(&pps_len.to_be_bytes());
    out.extend_from_slice(pps);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::h264::nal::{NalUnitType, nal_unit_type};

    #[test]
    fn packs_100_byte_pair() {
        let sps = vec![0u8; 100];
        let pps = vec![0u8; 100];
        let stap = pack(&sps, &pps).unwrap();

        assert_eq!(stap[0], 0x78);
        assert_eq!(stap.len(), 1 + 2 + 100 + 2 + 100);
        assert_eq!(stap.len(), packed_len(&sps, &pps));
        assert_eq!(&stap[1..3], &[0, 100]);
        assert_eq!(&stap[103..105], &[0, 100]);
    }

    #[test]
    fn header_classifies_as_stap_a() {
        let stap = pack(&[0x67, 0x42], &[0x68, 0xCE]).unwrap();
        assert_eq!(nal_unit_type(&stap), Some((NalUnitType::StapA, 24)));
    }

    #[test]
    fn preserves_nal_bytes_in_order() {
        let sps = [0x67, 0x42, 0x00, 0x1e];
        let pps = [0x68, 0xce, 0x38, 0x80, 0x11];
        let stap = pack(&sps, &pps).unwrap();

        assert_eq!(&stap[3..7], &sps);
        assert_eq!(&stap[7..9], &[0, 5]);
        assert_eq!(&stap[9..], &pps);
    }

    #[test]
    fn length_field_is_big_endian() {
        let sps = vec![0x67; 0x0102];
        let stap = pack(&sps, &[0x68]).unwrap();
        assert_eq!(&stap[1..3], &[0x01, 0x02]);
    }

    #[test]
    fn refuses_sps_longer_than_size_field() {
        let sps = vec![0x67; 70_000];
        assert_eq!(pack(&sps, &[0x68]), None);
    }

    #[test]
    fn refuses_pps_longer_than_size_field() {
        let pps = vec![0x68; 70_000];
        assert_eq!(pack(&[0x67], &pps), None);
    }

    #[test]
    fn accepts_unit_at_size_field_limit() {
        let sps = vec![0x67; 65_535];
        let stap = pack(&sps, &[0x68]).unwrap();
        assert_eq!(&stap[1..3], &[0xFF, 0xFF]);
        assert_eq!(stap.len(), packed_len(&sps, &[0x68]));
    }
}

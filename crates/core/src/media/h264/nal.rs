//! Annex B NAL unit extraction and NAL header classification.
//!
//! H.264 byte streams (ITU-T H.264 Annex B) delimit NAL units with start codes:
//! - 4-byte: `0x00 0x00 0x00 0x01`
//! - 3-byte: `0x00 0x00 0x01`
//!
//! Every NAL unit begins with a one-byte header:
//!
//! ```text
//! +---------------+
//! |0|1|2|3|4|5|6|7|
//! +-+-+-+-+-+-+-+-+
//! |F|NRI|  Type   |
//! +---------------+
//! ```

/// Mask selecting the 5-bit `Type` field of a NAL header.
pub const NAL_TYPE_MASK: u8 = 0x1f;
/// Mask selecting the 2-bit `NRI` (nal_ref_idc) field of a NAL header.
pub const NAL_REF_IDC_MASK: u8 = 0x60;

const START_CODE_4: [u8; 4] = [0x00, 0x00, 0x00, 0x01];
const START_CODE_3: [u8; 3] = [0x00, 0x00, 0x01];

/// NAL unit types this payloader distinguishes (H.264 Table 7-1, RFC 6184 §5.2).
///
/// The type is never stored alongside a NAL unit; it is derived from the
/// header byte whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NalUnitType {
    /// Coded slice of a non-IDR picture (1).
    NonIdrSlice,
    /// Coded slice of an IDR picture (5).
    IdrSlice,
    /// Supplemental enhancement information (6).
    Sei,
    /// Sequence parameter set (7).
    Sps,
    /// Picture parameter set (8).
    Pps,
    /// Access unit delimiter (9).
    AccessUnitDelimiter,
    /// Filler data (12).
    Filler,
    /// Single-time aggregation packet A (24).
    StapA,
    /// Fragmentation unit A (28).
    FuA,
    /// Fragmentation unit B (29).
    FuB,
    /// Anything else. Forwarded unchanged, never treated as an error.
    Unknown,
}

impl NalUnitType {
    /// Classify a NAL header byte, returning the type and the raw 5-bit value.
    pub fn from_header(header: u8) -> (Self, u8) {
        let raw = header & NAL_TYPE_MASK;
        let kind = match raw {
            1 => Self::NonIdrSlice,
            5 => Self::IdrSlice,
            6 => Self::Sei,
            7 => Self::Sps,
            8 => Self::Pps,
            9 => Self::AccessUnitDelimiter,
            12 => Self::Filler,
            24 => Self::StapA,
            28 => Self::FuA,
            29 => Self::FuB,
            _ => Self::Unknown,
        };
        (kind, raw)
    }
}

/// Classify a NAL unit by its first byte.
///
/// Returns `None` for an empty slice, which has no header to inspect.
pub fn nal_unit_type(nal: &[u8]) -> Option<(NalUnitType, u8)> {
    nal.first().map(|&header| NalUnitType::from_header(header))
}

/// Position and length of one Annex B start code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StartCode {
    offset: usize,
    len: usize,
}

impl StartCode {
    fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Whether `bytes` is exactly a 3- or 4-byte Annex B start code.
fn is_start_code(bytes: &[u8]) -> bool {
    bytes == START_CODE_4 || bytes == START_CODE_3
}

/// Single left-to-right pass; occurrences come out in increasing,
/// non-overlapping order. The 4-byte form wins when both would match.
fn find_start_codes(data: &[u8]) -> Vec<StartCode> {
    let mut codes = Vec::new();
    let mut i = 0usize;

    while i < data.len() {
        let remaining = data.len() - i;
        if remaining >= 4 && is_start_code(&data[i..i + 4]) {
            codes.push(StartCode { offset: i, len: 4 });
            i += 4;
        } else if remaining >= 3 && is_start_code(&data[i..i + 3]) {
            codes.push(StartCode { offset: i, len: 3 });
            i += 3;
        } else {
            i += 1;
        }
    }

    codes
}

/// Split an Annex B buffer into NAL units, borrowing from `data`.
///
/// Each unit runs from the end of one start code to the start of the next,
/// or to the end of the buffer for the last one. Bytes before the first
/// start code are ignored, and a buffer without start codes yields nothing.
///
/// Adjacent start codes produce empty entries; callers skip them.
pub fn split_nal_units(data: &[u8]) -> Vec<&[u8]> {
    let codes = find_start_codes(data);

    codes
        .iter()
        .enumerate()
        .map(|(idx, code)| {
            let end = codes.get(idx + 1).map_or(data.len(), |next| next.offset);
            &data[code.end()..end]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_code_detection() {
        assert!(is_start_code(&[0x00, 0x00, 0x01]));
        assert!(is_start_code(&[0x00, 0x00, 0x00, 0x01]));
        assert!(!is_start_code(&[0x00]));
        assert!(!is_start_code(&[0xFF, 0xFF, 0xFF]));
        assert!(!is_start_code(&[0xFF, 0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn split_mixed_start_codes_1024() {
        let mut data = vec![0, 0, 1];
        data.extend(vec![0u8; 1024]);
        data.extend_from_slice(&[0, 0, 0, 1]);
        data.extend(vec![0u8; 1024]);

        let nals = split_nal_units(&data);
        assert_eq!(nals.len(), 2);
        assert_eq!(nals[0].len(), 1024);
        assert_eq!(nals[1].len(), 1024);
    }

    #[test]
    fn split_single_nal_4byte_sc() {
        let data = [0, 0, 0, 1, 0x65, 0xAA, 0xBB];
        let nals = split_nal_units(&data);
        assert_eq!(nals, vec![&[0x65, 0xAA, 0xBB][..]]);
    }

    #[test]
    fn split_mixed_start_codes() {
        let mut data = vec![0, 0, 0, 1, 0x67, 0x42];
        data.extend_from_slice(&[0, 0, 1, 0x68, 0xCE]);
        let nals = split_nal_units(&data);
        assert_eq!(nals, vec![&[0x67, 0x42][..], &[0x68, 0xCE][..]]);
    }

    #[test]
    fn split_views_borrow_input() {
        let data = [0, 0, 1, 0x09, 0xF0, 0, 0, 1, 0x41];
        let nals = split_nal_units(&data);
        assert_eq!(nals[0].as_ptr(), data[3..].as_ptr());
        assert_eq!(nals[1].as_ptr(), data[8..].as_ptr());
    }

    #[test]
    fn split_no_start_code() {
        assert!(split_nal_units(&[]).is_empty());
        assert!(split_nal_units(&[0xFF, 0xFE, 0x00, 0x00]).is_empty());
    }

    #[test]
    fn split_leading_garbage_ignored() {
        let data = [0xAB, 0xCD, 0, 0, 1, 0x61];
        assert_eq!(split_nal_units(&data), vec![&[0x61][..]]);
    }

    #[test]
    fn split_adjacent_start_codes_yield_empty_unit() {
        let data = [0, 0, 1, 0, 0, 1, 0x65];
        let nals = split_nal_units(&data);
        assert_eq!(nals.len(), 2);
        assert!(nals[0].is_empty());
        assert_eq!(nals[1], &[0x65]);
    }

    #[test]
    fn split_trailing_start_code_yields_empty_unit() {
        let data = [0, 0, 0, 1, 0x65, 0, 0, 0, 1];
        let nals = split_nal_units(&data);
        assert_eq!(nals.len(), 2);
        assert_eq!(nals[0], &[0x65]);
        assert!(nals[1].is_empty());
    }

    #[test]
    fn classify_headers() {
        let cases = [
            (0b0001_1000, NalUnitType::StapA),
            (0b0001_1100, NalUnitType::FuA),
            (0b0001_1101, NalUnitType::FuB),
            (0b0000_0111, NalUnitType::Sps),
            (0b0000_1000, NalUnitType::Pps),
            (0b0000_1001, NalUnitType::AccessUnitDelimiter),
            (0b0000_1100, NalUnitType::Filler),
            (0b0000_1010, NalUnitType::Unknown),
        ];
        for (header, expected) in cases {
            let (kind, raw) = NalUnitType::from_header(header);
            assert_eq!(kind, expected, "header {header:#010b}");
            assert_eq!(raw, header);
        }
    }

    #[test]
    fn classify_masks_nri_and_forbidden_bits() {
        let cases = [
            (0x65, NalUnitType::IdrSlice, 5),
            (0x41, NalUnitType::NonIdrSlice, 1),
            (0xE7, NalUnitType::Sps, 7),
        ];
        for (header, kind, raw) in cases {
            assert_eq!(NalUnitType::from_header(header), (kind, raw));
        }
    }

    #[test]
    fn classify_empty_nal() {
        assert_eq!(nal_unit_type(&[]), None);
        assert_eq!(nal_unit_type(&[0x06, 0x05]), Some((NalUnitType::Sei, 6)));
    }
}

//! CRC-32 stamping for synthesized SCTE-35 sections.
//!
//! Validation of externally-received sections is out of scope for a
//! generator; this module only ever computes the CRC over bytes this crate
//! just wrote.

use crc::{Crc, CRC_32_MPEG_2};

/// MPEG-2 CRC-32 algorithm, as `splice_info_section()`'s trailing `CRC_32`
/// field requires.
pub const MPEG_2: Crc<u32> = Crc::<u32>::new(&CRC_32_MPEG_2);

/// Computes the CRC-32 over a section's bytes, excluding the 4-byte CRC
/// field itself.
pub fn compute_crc(section_without_crc: &[u8]) -> u32 {
    MPEG_2.checksum(section_without_crc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_null_section() {
        let section = [
            0xFC, 0x30, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xF0, 0x00, 0x00,
            0x00, 0x00,
        ];
        let crc = compute_crc(&section);
        let mut full = section.to_vec();
        full.extend_from_slice(&crc.to_be_bytes());
        assert_eq!(full.len(), 20);
    }

    #[test]
    fn different_input_different_crc() {
        let a = compute_crc(&[0xFC, 0x30, 0x11]);
        let b = compute_crc(&[0xFC, 0x30, 0x12]);
        assert_ne!(a, b);
    }
}

//! Encoding implementation for `splice_info_section()`.
//!
//! Every framing field this generator does not vary (table_id, protocol
//! version, tier, pts_adjustment, encryption fields) is fixed at its literal
//! wire value here rather than carried as a struct field on
//! [`SpliceInfoSection`].

use crate::crc::compute_crc;
use crate::encoding::{BitWriter, Encodable, EncodingError, EncodingResult};
use crate::types::SpliceInfoSection;

const TABLE_ID: u8 = 0xFC;
const TIER: u16 = 0xFFF;

impl SpliceInfoSection {
    fn descriptor_loop_length(&self) -> u16 {
        self.splice_descriptors
            .iter()
            .map(|d| d.encoded_size() as u16)
            .sum()
    }

    fn section_length(&self) -> u16 {
        (self.encoded_size() - 3) as u16
    }

    fn encode_without_crc(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(TABLE_ID as u64, 8)?;
        writer.write_bit(false)?; // section_syntax_indicator
        writer.write_bit(false)?; // private_indicator
        writer.write_bits(0b11, 2)?; // reserved
        writer.write_bits(self.section_length() as u64, 12)?;
        writer.write_bits(0, 8)?; // protocol_version
        writer.write_bit(false)?; // encrypted_packet
        writer.write_bits(0, 6)?; // encryption_algorithm
        writer.write_bits(0, 33)?; // pts_adjustment
        writer.write_bits(0, 8)?; // cw_index
        writer.write_bits(TIER as u64, 12)?;
        writer.write_bits(self.splice_command.encoded_size() as u64, 12)?;
        writer.write_bits(self.splice_command.command_type().id() as u64, 8)?;
        self.splice_command.encode(writer)?;
        writer.write_bits(self.descriptor_loop_length() as u64, 16)?;
        for descriptor in &self.splice_descriptors {
            descriptor.encode(writer)?;
        }
        Ok(())
    }
}

impl Encodable for SpliceInfoSection {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        let mut scratch = BitWriter::with_capacity(self.encoded_size());
        self.encode_without_crc(&mut scratch)?;
        let without_crc_bytes = scratch.len();
        if without_crc_bytes != self.encoded_size() - 4 {
            return Err(EncodingError::SizeMismatch {
                what: "splice_info_section",
                computed: self.encoded_size() - 4,
                written: without_crc_bytes,
            });
        }
        let crc = compute_crc(&scratch.finish());

        self.encode_without_crc(writer)?;
        writer.write_bits(crc as u64, 32)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        14 + self.splice_command.encoded_size() + 2 + self.descriptor_loop_length() as usize + 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawDescriptor;

    #[test]
    fn null_section_matches_known_bytes() {
        let section = SpliceInfoSection::null();
        let bytes = section.encode_to_vec().unwrap();
        assert_eq!(
            bytes,
            vec![
                0xFC, 0x30, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xF0, 0x00,
                0x00, 0x00, 0x00, bytes[16], bytes[17], bytes[18], bytes[19],
            ]
        );
        assert_eq!(bytes.len(), 20);
    }

    #[test]
    fn section_length_excludes_first_three_bytes() {
        let section = SpliceInfoSection::null();
        assert_eq!(section.section_length(), 17);
    }

    #[test]
    fn descriptor_loop_length_sums_descriptor_sizes() {
        let mut section = SpliceInfoSection::null();
        section
            .splice_descriptors
            .push(RawDescriptor(vec![0x02, 0x02, 0xAA, 0xBB]));
        assert_eq!(section.descriptor_loop_length(), 4);
        let bytes = section.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), 24);
    }
}

//! Encoding implementations for `splice_time()` and `break_duration()`.

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::types::{BreakDuration, SpliceTime};

impl Encodable for SpliceTime {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self.0 {
            Some(pts) => {
                writer.write_bit(true)?; // time_specified_flag
                writer.write_bits(0x3F, 6)?; // reserved, all 1s
                writer.write_bits(pts & 0x1_FFFF_FFFF, 33)?;
            }
            None => {
                writer.write_bit(false)?; // time_specified_flag
                writer.write_bits(0x7F, 7)?; // reserved, all 1s
            }
        }
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        if self.0.is_some() {
            5
        } else {
            1
        }
    }
}

impl Encodable for BreakDuration {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bit(self.auto_return)?;
        writer.write_bits(0x3F, 6)?; // reserved, all 1s
        writer.write_bits(self.duration & 0x1_FFFF_FFFF, 33)?;
        Ok(())
    }

    fn encoded_size(&self) -> usize {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_time_is_one_byte_of_ones() {
        let t = SpliceTime(None);
        assert_eq!(t.encoded_size(), 1);
        let bytes = t.encode_to_vec().unwrap();
        assert_eq!(bytes, vec![0x7F]);
    }

    #[test]
    fn specified_time_is_five_bytes() {
        let t = SpliceTime(Some(0x1_0000_0000));
        assert_eq!(t.encoded_size(), 5);
        let bytes = t.encode_to_vec().unwrap();
        assert_eq!(bytes[0] & 0x80, 0x80);
    }

    #[test]
    fn break_duration_masks_to_33_bits() {
        let d = BreakDuration {
            auto_return: true,
            duration: 0xFFFF_FFFF_FFFF,
        };
        let bytes = d.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), 5);
    }
}

//! Encoding implementation for opaque splice descriptors.

use crate::encoding::{BitWriter, Encodable, EncodingError, EncodingResult};
use crate::types::RawDescriptor;

impl Encodable for RawDescriptor {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        if !self.is_well_formed() {
            return Err(EncodingError::InvalidFieldValue {
                field: "splice_descriptor",
                value: format!("{} bytes, malformed length", self.0.len()),
            });
        }
        writer.write_bytes(&self.0)
    }

    fn encoded_size(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_descriptor_round_trips() {
        let desc = RawDescriptor(vec![0x02, 0x02, 0xAA, 0xBB]);
        let bytes = desc.encode_to_vec().unwrap();
        assert_eq!(bytes, desc.0);
    }

    #[test]
    fn malformed_descriptor_fails_to_encode() {
        let desc = RawDescriptor(vec![0x02, 0x05, 0xAA]);
        assert!(desc.encode_to_vec().is_err());
    }
}

//! Trait definitions for encodable types.

use super::error::EncodingResult;
use super::writer::BitWriter;

/// Trait for types that can be encoded to their SCTE-35 binary wire format.
///
/// `encoded_size` must return exactly the number of bytes `encode` writes —
/// callers rely on this to size `splice_command_length`/`section_length`
/// before the bytes exist, so the two must never drift apart.
pub trait Encodable {
    /// Encode the structure to its binary wire format.
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()>;

    /// Exact number of bytes `encode` will write.
    fn encoded_size(&self) -> usize;

    /// Encode to a freshly allocated byte vector.
    fn encode_to_vec(&self) -> EncodingResult<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(self.encoded_size());
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }
}

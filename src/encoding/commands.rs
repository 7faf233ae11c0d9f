//! Encoding implementations for the splice commands this generator emits.

use crate::encoding::{BitWriter, Encodable, EncodingResult};
use crate::types::{SpliceCommand, SpliceInsert, TimeSignal};

impl Encodable for SpliceCommand {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        match self {
            SpliceCommand::Null => Ok(()),
            SpliceCommand::Insert(insert) => insert.encode(writer),
            SpliceCommand::TimeSignal(signal) => signal.encode(writer),
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            SpliceCommand::Null => 0,
            SpliceCommand::Insert(insert) => insert.encoded_size(),
            SpliceCommand::TimeSignal(signal) => signal.encoded_size(),
        }
    }
}

impl Encodable for SpliceInsert {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        writer.write_bits(self.splice_event_id as u64, 32)?;
        writer.write_bit(self.cancel)?;

        if self.cancel {
            writer.write_bits(0x7F, 7)?; // reserved, all 1s
            return Ok(());
        }

        let splice_immediate = self.splice_time.0.is_none();
        writer.write_bit(self.out_of_network)?;
        writer.write_bit(true)?; // program_splice_flag, always program-level
        writer.write_bit(self.break_duration.is_some())?;
        writer.write_bit(splice_immediate)?;
        writer.write_bits(0x7, 3)?; // reserved, all 1s

        if !splice_immediate {
            self.splice_time.encode(writer)?;
        }

        if let Some(duration) = &self.break_duration {
            duration.encode(writer)?;
        }

        writer.write_bits(self.unique_program_id as u64, 16)?;
        writer.write_bits(0, 8)?; // avail_num, unused
        writer.write_bits(0, 8)?; // avails_expected, unused

        Ok(())
    }

    fn encoded_size(&self) -> usize {
        let mut size = 4 + 1; // splice_event_id + cancel/reserved byte
        if self.cancel {
            return size;
        }

        if self.splice_time.0.is_some() {
            size += self.splice_time.encoded_size();
        }
        if let Some(duration) = &self.break_duration {
            size += duration.encoded_size();
        }
        size += 2 + 1 + 1; // unique_program_id + avail_num + avails_expected
        size
    }
}

impl Encodable for TimeSignal {
    fn encode(&self, writer: &mut BitWriter) -> EncodingResult<()> {
        self.splice_time.encode(writer)
    }

    fn encoded_size(&self) -> usize {
        self.splice_time.encoded_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BreakDuration, SpliceTime};

    #[test]
    fn cancelled_insert_is_five_bytes() {
        let insert = SpliceInsert {
            splice_event_id: 1,
            cancel: true,
            out_of_network: false,
            splice_time: SpliceTime(None),
            break_duration: None,
            unique_program_id: 0,
        };
        let bytes = insert.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), 5);
        assert_eq!(insert.encoded_size(), bytes.len());
    }

    #[test]
    fn immediate_insert_flags_byte() {
        let insert = SpliceInsert {
            splice_event_id: 0x4C2154B0,
            cancel: false,
            out_of_network: true,
            splice_time: SpliceTime(None),
            break_duration: None,
            unique_program_id: 0,
        };
        let bytes = insert.encode_to_vec().unwrap();
        // byte after the 4-byte event_id: cancel=0, out_of_network=1,
        // program_splice=1, duration=0, splice_immediate=1, reserved=111
        assert_eq!(bytes[4], 0b0110_1111);
    }

    #[test]
    fn scheduled_insert_includes_splice_time_and_duration() {
        let insert = SpliceInsert {
            splice_event_id: 1,
            cancel: false,
            out_of_network: true,
            splice_time: SpliceTime(Some(900_000)),
            break_duration: Some(BreakDuration {
                auto_return: true,
                duration: 2_700_000,
            }),
            unique_program_id: 7,
        };
        let bytes = insert.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), insert.encoded_size());
        assert_eq!(bytes.len(), 4 + 1 + 5 + 5 + 2 + 1 + 1);
    }
}

//! Synthesizes the binary forms of a reassembled [`Event`]: the command
//! structures and, from them, the scheduled and immediate encoded sections
//! a [`Message`] carries into the scheduler.

use crate::clock::to_90khz_pts;
use crate::collaborators::{BufferProvider, LogLevel, Logger, SectionBytes};
use crate::encoding::{BitWriter, Encodable};
use crate::error::SigError;
use crate::event::Event;
use crate::message::Message;
use crate::types::{BreakDuration, CommandType, RawDescriptor, SpliceCommand, SpliceInfoSection, SpliceInsert, SpliceTime, TimeSignal};

/// Builds [`Message`]s from reassembled events.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandSynthesizer;

impl CommandSynthesizer {
    /// Creates a synthesizer. Stateless today; kept as a type so callers
    /// have a stable place to hang future configuration.
    pub fn new() -> Self {
        Self
    }

    /// Builds the single always-available filler message: a bare
    /// `splice_null()` section with no descriptors.
    pub fn build_null(&self, provider: &mut dyn BufferProvider) -> Result<SectionBytes, SigError> {
        encode_section(&SpliceInfoSection::null(), provider)
    }

    /// Synthesizes a message from a reassembled event, filtering out any
    /// malformed descriptor byte runs and logging each one dropped.
    pub fn synthesize(
        &self,
        event: &Event,
        provider: &mut dyn BufferProvider,
        logger: &mut dyn Logger,
    ) -> Result<Message, SigError> {
        let descriptors: Vec<RawDescriptor> = event
            .descriptors
            .iter()
            .cloned()
            .map(RawDescriptor)
            .filter(|d| {
                let ok = d.is_well_formed();
                if !ok {
                    logger.log(
                        LogLevel::Warn,
                        &format!(
                            "dropping malformed splice_descriptor for event {}",
                            event.event_id
                        ),
                    );
                }
                ok
            })
            .collect();

        let (scheduled_command, immediate_command, scheduled_at) = match event.command_type {
            CommandType::Null => (None, Some(SpliceCommand::Null), None),
            CommandType::Insert => self.synthesize_insert(event),
            CommandType::TimeSignal => self.synthesize_time_signal(event),
        };

        let scheduled_bytes = scheduled_command
            .map(|cmd| build_section(cmd, descriptors.clone()))
            .map(|section| encode_section(&section, provider))
            .transpose()?;
        let immediate_bytes = immediate_command
            .map(|cmd| build_section(cmd, descriptors))
            .map(|section| encode_section(&section, provider))
            .transpose()?;

        Ok(Message {
            cr_sys: event.pts_sys,
            scheduled_at,
            scheduled_bytes,
            immediate_bytes,
        })
    }

    fn synthesize_insert(
        &self,
        event: &Event,
    ) -> (Option<SpliceCommand>, Option<SpliceCommand>, Option<u64>) {
        if event.cancel {
            let cancel_insert = SpliceInsert {
                splice_event_id: event.event_id,
                cancel: true,
                out_of_network: event.out_of_network,
                splice_time: SpliceTime(None),
                break_duration: None,
                unique_program_id: event.unique_program_id,
            };
            return (None, Some(SpliceCommand::Insert(cancel_insert)), None);
        }

        let break_duration = event.duration.map(|d| BreakDuration {
            auto_return: event.auto_return,
            duration: to_90khz_pts(d),
        });
        // `deadline` stays in host-clock (27 MHz) terms since the scheduler
        // compares it against `cr_sys` ticks; only the wire `pts_time` is
        // converted to the 90 kHz scale.
        let deadline = event.pts_prog;

        let base = SpliceInsert {
            splice_event_id: event.event_id,
            cancel: false,
            out_of_network: event.out_of_network,
            splice_time: SpliceTime(None),
            break_duration,
            unique_program_id: event.unique_program_id,
        };

        let scheduled = deadline.map(|prog| SpliceInsert {
            splice_time: SpliceTime(Some(to_90khz_pts(prog))),
            ..base.clone()
        });
        let immediate = SpliceInsert {
            splice_time: SpliceTime(None),
            ..base
        };

        (
            scheduled.map(SpliceCommand::Insert),
            Some(SpliceCommand::Insert(immediate)),
            deadline,
        )
    }

    fn synthesize_time_signal(
        &self,
        event: &Event,
    ) -> (Option<SpliceCommand>, Option<SpliceCommand>, Option<u64>) {
        let deadline = event.pts_prog;
        let scheduled = deadline.map(|prog| {
            SpliceCommand::TimeSignal(TimeSignal {
                splice_time: SpliceTime(Some(to_90khz_pts(prog))),
            })
        });
        let immediate = SpliceCommand::TimeSignal(TimeSignal {
            splice_time: SpliceTime(None),
        });
        (scheduled, Some(immediate), deadline)
    }
}

/// Largest `splice_info_section()` payload this generator will ever
/// allocate for, per spec.
const PSI_MAX_SIZE: usize = 1021;

/// Bytes of section framing (`table_id` through `section_length`) that sit
/// ahead of the payload `PSI_MAX_SIZE` bounds.
const PSI_HEADER_SIZE: usize = 3;

/// Every section buffer is requested at this fixed capacity regardless of
/// the section's actual encoded size, and trimmed to the real length once
/// encoding (including the trailing CRC) finishes -- the buffer provider
/// never sees a request sized to the specific command being built.
const SECTION_BUFFER_CAPACITY: usize = PSI_MAX_SIZE + PSI_HEADER_SIZE;

fn build_section(command: SpliceCommand, descriptors: Vec<RawDescriptor>) -> SpliceInfoSection {
    SpliceInfoSection {
        splice_command: command,
        splice_descriptors: descriptors,
    }
}

fn encode_section(
    section: &SpliceInfoSection,
    provider: &mut dyn BufferProvider,
) -> Result<SectionBytes, SigError> {
    let buffer = provider.alloc(SECTION_BUFFER_CAPACITY)?;
    let mut writer = BitWriter::from_buffer(buffer);
    section.encode(&mut writer)?;
    // `finish()` returns only the bytes actually written -- the rest of the
    // fixed 1024-byte allocation is never exposed, trimming the buffer down
    // to the section's real encoded length.
    Ok(SectionBytes::new(writer.finish()))
}

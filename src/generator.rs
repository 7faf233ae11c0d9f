//! The generator: ties reassembly, command synthesis, the pending queue,
//! and the emission scheduler together into the public entry point callers
//! drive from their multiplexer pipeline.

use crate::collaborators::{BufferProvider, Emitter, Logger};
use crate::error::SigError;
use crate::flow::{InputFlowDef, OutputFlowDef};
use crate::input::Input;
use crate::queue::MessageQueue;
use crate::reassembly::ReassemblyBuffer;
use crate::scheduler::EmissionScheduler;
use crate::synth::CommandSynthesizer;

/// Generates SCTE-35 `splice_info_section`s from a stream of control-plane
/// [`Input`] fragments, emitting encoded sections on each [`Self::tick`].
///
/// Generic over its three collaborators so callers can wire the generator
/// to whatever buffer pool, downstream sink, and logging backend their
/// pipeline already uses.
pub struct SpliceInfoGenerator<B, E, L>
where
    B: BufferProvider,
    E: Emitter,
    L: Logger,
{
    reassembly: ReassemblyBuffer,
    synth: CommandSynthesizer,
    queue: MessageQueue,
    scheduler: EmissionScheduler,
    input_flow: Option<InputFlowDef>,
    output_flow: OutputFlowDef,
    provider: B,
    emitter: E,
    logger: L,
}

impl<B, E, L> SpliceInfoGenerator<B, E, L>
where
    B: BufferProvider,
    E: Emitter,
    L: Logger,
{
    /// Builds a generator with the given collaborators and a minimum
    /// repetition interval, in host-clock ticks.
    pub fn new(provider: B, emitter: E, logger: L, interval: u64) -> Self {
        Self {
            reassembly: ReassemblyBuffer::new(),
            synth: CommandSynthesizer::new(),
            queue: MessageQueue::new(),
            scheduler: EmissionScheduler::new(interval),
            input_flow: None,
            output_flow: OutputFlowDef::new(interval),
            provider,
            emitter,
            logger,
        }
    }

    /// Validates and records the upstream input flow definition. Rejects
    /// anything not carrying the `void.scte35.` prefix this generator
    /// requires.
    pub fn set_flow_def(&mut self, def: impl Into<String>) -> Result<(), SigError> {
        self.input_flow = Some(InputFlowDef::new(def)?);
        Ok(())
    }

    /// The output flow definition this generator advertises downstream.
    pub fn output_flow_def(&self) -> &OutputFlowDef {
        &self.output_flow
    }

    /// Current minimum repetition interval, in host-clock ticks.
    pub fn interval(&self) -> u64 {
        self.scheduler.interval()
    }

    /// Changes the minimum repetition interval, updating the advertised
    /// output flow's bandwidth reservation to match.
    pub fn set_interval(&mut self, interval: u64) {
        self.scheduler.set_interval(interval);
        self.output_flow = OutputFlowDef::new(interval);
    }

    /// Feeds one fragment into reassembly. Any events this fragment
    /// completes (including a forced flush of a prior in-progress event)
    /// are synthesized and enqueued for emission.
    pub fn push_event(&mut self, input: Input) -> Result<(), SigError> {
        let events = self.reassembly.push(input, &mut self.logger);
        for event in events {
            let message = self.synth.synthesize(&event, &mut self.provider, &mut self.logger)?;
            if !message.is_empty() {
                self.queue.push(message);
                // A new Message forces the next tick to emit without waiting
                // out the rest of the current repetition interval.
                self.scheduler.force_next_emit();
            }
        }
        Ok(())
    }

    /// Drops every queued message's scheduled form. Used when the upstream
    /// control plane signals that future scheduled splices should no longer
    /// occur, without discarding in-flight immediate work.
    pub fn clear_scheduled(&mut self) {
        self.queue.clear_scheduled();
    }

    /// Runs one scheduling decision at host-clock time `cr_sys`, emitting at
    /// most one encoded section through the configured [`Emitter`].
    pub fn tick(&mut self, cr_sys: u64) -> Result<(), SigError> {
        self.scheduler.tick(
            cr_sys,
            &mut self.queue,
            &self.synth,
            &mut self.provider,
            &mut self.emitter,
            &mut self.logger,
        )
    }

    /// Tears the generator down, returning its collaborators to the caller.
    pub fn teardown(self) -> (B, E, L) {
        (self.provider, self.emitter, self.logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{NoopLogger, VecBufferProvider, VecEmitter};

    fn generator(interval: u64) -> SpliceInfoGenerator<VecBufferProvider, VecEmitter, NoopLogger> {
        SpliceInfoGenerator::new(VecBufferProvider, VecEmitter::default(), NoopLogger, interval)
    }

    #[test]
    fn rejects_flow_def_without_expected_prefix() {
        let mut gen = generator(1000);
        assert!(gen.set_flow_def("block.mpegts.").is_err());
        assert!(gen.set_flow_def("void.scte35.splice").is_ok());
    }

    #[test]
    fn null_only_stream_emits_filler_sections() {
        let mut gen = generator(1000);
        gen.tick(0).unwrap();
        gen.tick(1000).unwrap();
        let (_, emitter, _) = gen.teardown();
        assert_eq!(emitter.records.len(), 2);
        assert_eq!(emitter.records[0].section.as_slice()[0], 0xFC);
    }

    #[test]
    fn immediate_insert_is_emitted_over_null_fallback() {
        let mut gen = generator(1);
        gen.push_event(Input {
            start: true,
            end: true,
            command_type: Some(0x05),
            event_id: Some(100),
            out_of_network: Some(true),
            pts_sys: Some(0),
            ..Default::default()
        })
        .unwrap();
        gen.tick(0).unwrap();
        let (_, emitter, _) = gen.teardown();
        assert_eq!(emitter.records.len(), 1);
        assert_ne!(
            emitter.records[0].section.as_slice()[0..5],
            [0xFC, 0x30, 0x11, 0x00, 0x00]
        );
    }

    #[test]
    fn forced_flush_synthesizes_both_events() {
        let mut gen = generator(1);
        gen.push_event(Input {
            start: true,
            end: false,
            command_type: Some(0x06),
            event_id: Some(1),
            pts_sys: Some(0),
            ..Default::default()
        })
        .unwrap();
        gen.push_event(Input::whole(2, 0x06, 0)).unwrap();

        gen.tick(0).unwrap();
        gen.tick(1).unwrap();
        let (_, emitter, _) = gen.teardown();
        assert_eq!(emitter.records.len(), 2);
    }
}

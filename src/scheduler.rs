//! Emission scheduler: decides, each tick, which encoded section (if any)
//! goes out, under a minimum repetition interval.
//!
//! A tick hands the scheduler the current host-clock time. It walks the
//! pending queue looking for a message whose scheduled splice time has
//! arrived; if none has, it falls back to re-emitting a message's immediate
//! form or, if the queue is empty, a bare `splice_null()` so the output PSI
//! stream never goes silent longer than `interval` allows.

use crate::collaborators::{BufferProvider, Emitter, LogLevel, Logger, OutputRecord};
use crate::error::SigError;
use crate::message::Message;
use crate::queue::MessageQueue;
use crate::synth::CommandSynthesizer;

/// Sentinel meaning "never emitted yet" for [`EmissionScheduler::last_emit_cr_sys`].
/// A scheduler in this state emits on its very next tick regardless of
/// `interval`.
const NEVER_EMITTED: u64 = 0;

/// Tick-driven emission state machine.
#[derive(Debug)]
pub struct EmissionScheduler {
    /// Minimum host-clock ticks that must elapse between two emissions.
    interval: u64,
    /// `cr_sys` of the last successful emission, or [`NEVER_EMITTED`].
    last_emit_cr_sys: u64,
}

impl EmissionScheduler {
    /// Creates a scheduler with the given minimum repetition interval.
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            last_emit_cr_sys: NEVER_EMITTED,
        }
    }

    /// Current minimum repetition interval, in host-clock ticks.
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Changes the minimum repetition interval.
    pub fn set_interval(&mut self, interval: u64) {
        self.interval = interval;
    }

    /// Forces the next [`Self::tick`] to emit regardless of how recently the
    /// last emission happened. Called whenever a new [`Message`] is queued,
    /// so a freshly synthesized section does not wait out the remainder of
    /// the current repetition interval before going out.
    pub fn force_next_emit(&mut self) {
        self.last_emit_cr_sys = NEVER_EMITTED;
    }

    /// Runs one scheduling decision at host-clock time `cr_sys`, draining
    /// and possibly re-queuing messages from `queue`, and emitting at most
    /// one section through `emitter`.
    pub fn tick(
        &mut self,
        cr_sys: u64,
        queue: &mut MessageQueue,
        synth: &CommandSynthesizer,
        provider: &mut dyn BufferProvider,
        emitter: &mut dyn Emitter,
        logger: &mut dyn Logger,
    ) -> Result<(), SigError> {
        if self.interval == 0 {
            // interval == 0 means the generator is disabled.
            return Ok(());
        }
        if self.last_emit_cr_sys != NEVER_EMITTED
            && cr_sys.saturating_sub(self.last_emit_cr_sys) < self.interval
        {
            return Ok(());
        }

        if let Some(record) = self.next_output(cr_sys, queue, logger)? {
            emitter.emit(record)?;
            self.last_emit_cr_sys = cr_sys;
            return Ok(());
        }

        let null_bytes = synth.build_null(provider)?;
        emitter.emit(OutputRecord {
            section: null_bytes,
            cr_sys,
        })?;
        self.last_emit_cr_sys = cr_sys;
        Ok(())
    }

    /// Picks the section this tick should emit, if the queue has one ready,
    /// mutating the queue in place: expired scheduled forms that already
    /// fired are cleared, and messages with nothing left to emit are
    /// dropped.
    fn next_output(
        &mut self,
        cr_sys: u64,
        queue: &mut MessageQueue,
        logger: &mut dyn Logger,
    ) -> Result<Option<OutputRecord>, SigError> {
        let mut chosen = None;
        let mut messages = queue.drain();

        for message in messages.iter_mut() {
            if chosen.is_some() {
                continue;
            }

            match message.scheduled_at {
                Some(deadline) if cr_sys < deadline => {
                    // Deadline still ahead: keep repeating the scheduled
                    // form every qualifying tick until it arrives.
                    if let Some(scheduled) = &message.scheduled_bytes {
                        chosen = Some(OutputRecord {
                            section: scheduled.duplicate(),
                            cr_sys,
                        });
                    }
                }
                _ => {
                    // Deadline passed, or this message never had one
                    // (cancels, immediate-only inserts, bare time signals):
                    // fire the immediate form once, then the message is
                    // exhausted.
                    if let Some(bytes) = message.immediate_bytes.take() {
                        chosen = Some(OutputRecord {
                            section: bytes,
                            cr_sys,
                        });
                    }
                    message.scheduled_bytes = None;
                    message.scheduled_at = None;
                }
            }

            if message.is_empty() {
                logger.log(LogLevel::Notice, "dropping exhausted message from queue");
            }
        }

        messages.retain(|m| !m.is_empty());
        for message in messages {
            queue.push(message);
        }

        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{NoopLogger, VecBufferProvider, VecEmitter};

    fn message_with_immediate(cr_sys: u64) -> Message {
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        Message {
            cr_sys,
            scheduled_at: None,
            scheduled_bytes: None,
            immediate_bytes: Some(synth.build_null(&mut provider).unwrap()),
        }
    }

    #[test]
    fn first_tick_emits_regardless_of_interval() {
        let mut scheduler = EmissionScheduler::new(1000);
        let mut queue = MessageQueue::new();
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        let mut emitter = VecEmitter::default();
        let mut logger = NoopLogger;

        scheduler
            .tick(0, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(emitter.records.len(), 1);
    }

    #[test]
    fn respects_minimum_interval_between_emissions() {
        let mut scheduler = EmissionScheduler::new(1000);
        let mut queue = MessageQueue::new();
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        let mut emitter = VecEmitter::default();
        let mut logger = NoopLogger;

        scheduler
            .tick(0, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        scheduler
            .tick(500, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(emitter.records.len(), 1);

        scheduler
            .tick(1000, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(emitter.records.len(), 2);
    }

    #[test]
    fn zero_interval_disables_emission() {
        let mut scheduler = EmissionScheduler::new(0);
        let mut queue = MessageQueue::new();
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        let mut emitter = VecEmitter::default();
        let mut logger = NoopLogger;

        scheduler
            .tick(0, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert!(emitter.records.is_empty());
    }

    #[test]
    fn emits_queued_immediate_message_over_null_fallback() {
        let mut scheduler = EmissionScheduler::new(1);
        let mut queue = MessageQueue::new();
        queue.push(message_with_immediate(0));
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        let mut emitter = VecEmitter::default();
        let mut logger = NoopLogger;

        scheduler
            .tick(0, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(emitter.records.len(), 1);
    }

    #[test]
    fn scheduled_message_fires_once_its_time_arrives() {
        let mut scheduler = EmissionScheduler::new(1);
        let mut queue = MessageQueue::new();
        let synth = CommandSynthesizer::new();
        let mut provider = VecBufferProvider;
        let scheduled_bytes = synth.build_null(&mut provider).unwrap();
        let immediate_bytes = synth.build_null(&mut provider).unwrap();
        queue.push(Message {
            cr_sys: 0,
            scheduled_at: Some(5000),
            scheduled_bytes: Some(scheduled_bytes),
            immediate_bytes: Some(immediate_bytes),
        });
        let mut emitter = VecEmitter::default();
        let mut logger = NoopLogger;

        scheduler
            .tick(0, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(queue.len(), 1); // deadline still ahead, scheduled form repeats

        scheduler
            .tick(5000, &mut queue, &synth, &mut provider, &mut emitter, &mut logger)
            .unwrap();
        assert_eq!(queue.len(), 0); // deadline passed, immediate form fired once, message exhausted
    }
}

//! Combines fragmented [`Input`] records into complete [`Event`]s.
//!
//! Only one event accumulates at a time. A `start` fragment for a new event
//! while one is already in progress forces the in-progress event to be
//! released (however incomplete) before accumulation of the new one begins —
//! the upstream protocol is assumed never to interleave two events, so
//! overlap is itself a signal that the previous event was abandoned.

use crate::collaborators::{LogLevel, Logger};
use crate::event::Event;
use crate::input::Input;
use crate::types::CommandType;

#[derive(Debug, Clone)]
struct Pending {
    command_type: CommandType,
    event_id: u32,
    unique_program_id: u16,
    cancel: bool,
    out_of_network: bool,
    auto_return: bool,
    pts_prog: Option<u64>,
    duration: Option<u64>,
    pts_sys: u64,
    descriptors: Vec<Vec<u8>>,
}

impl Pending {
    fn finish(self) -> Event {
        Event {
            command_type: self.command_type,
            event_id: self.event_id,
            unique_program_id: self.unique_program_id,
            cancel: self.cancel,
            out_of_network: self.out_of_network,
            auto_return: self.auto_return,
            pts_prog: self.pts_prog,
            duration: self.duration,
            pts_sys: self.pts_sys,
            descriptors: self.descriptors,
        }
    }
}

/// Accumulates `Input` fragments into complete `Event`s.
#[derive(Debug, Default)]
pub struct ReassemblyBuffer {
    pending: Option<Pending>,
}

impl ReassemblyBuffer {
    /// Creates an empty reassembly buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one fragment in. Returns zero, one, or two completed events: a
    /// forced flush of a prior in-progress event (if `input.start` collided
    /// with one) and, if this fragment also closes out its own event, that
    /// one too.
    ///
    /// A `start` fragment missing its `command_type`, or carrying one this
    /// generator does not support, is warned about and dropped: no
    /// accumulation begins for it, so it can never be released as an event.
    pub fn push(&mut self, input: Input, logger: &mut dyn Logger) -> Vec<Event> {
        let mut released = Vec::new();

        if input.start {
            if let Some(prior) = self.pending.take() {
                logger.log(
                    LogLevel::Warn,
                    &format!(
                        "forced flush: new start for event {} arrived before event {} closed",
                        input.event_id.unwrap_or(0),
                        prior.event_id
                    ),
                );
                released.push(prior.finish());
            }
            let command_type = match input.command_type {
                None => {
                    logger.log(LogLevel::Warn, "dropping fragment: missing command_type");
                    None
                }
                Some(raw) => match CommandType::try_from(raw) {
                    Ok(ct) => Some(ct),
                    Err(err) => {
                        logger.log(LogLevel::Warn, &format!("dropping fragment: {err}"));
                        None
                    }
                },
            };
            self.pending = command_type.map(|command_type| Pending {
                command_type,
                event_id: input.event_id.unwrap_or(0),
                unique_program_id: input.unique_program_id.unwrap_or(0),
                cancel: input.cancel.unwrap_or(false),
                out_of_network: input.out_of_network.unwrap_or(false),
                auto_return: input.auto_return.unwrap_or(false),
                pts_prog: input.pts_prog,
                duration: input.duration,
                pts_sys: input.pts_sys.unwrap_or(0),
                descriptors: input.descriptor.clone().into_iter().collect(),
            });
        } else if let Some(pending) = self.pending.as_mut() {
            if let Some(unique_program_id) = input.unique_program_id {
                pending.unique_program_id = unique_program_id;
            }
            if let Some(cancel) = input.cancel {
                pending.cancel = cancel;
            }
            if let Some(out_of_network) = input.out_of_network {
                pending.out_of_network = out_of_network;
            }
            if let Some(auto_return) = input.auto_return {
                pending.auto_return = auto_return;
            }
            if let Some(pts_prog) = input.pts_prog {
                pending.pts_prog = Some(pts_prog);
            }
            if let Some(duration) = input.duration {
                pending.duration = Some(duration);
            }
            if let Some(pts_sys) = input.pts_sys {
                pending.pts_sys = pts_sys;
            }
            if let Some(descriptor) = &input.descriptor {
                pending.descriptors.push(descriptor.clone());
            }
        }

        if input.end {
            if let Some(pending) = self.pending.take() {
                released.push(pending.finish());
            }
        }

        released
    }

    /// Whether an event is currently mid-assembly.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

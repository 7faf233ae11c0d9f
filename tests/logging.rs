//! Exercises `LogCrateLogger`, the `log`-crate-backed `Logger` collaborator,
//! through a real `env_logger` dispatcher rather than the `NoopLogger` the
//! other integration tests use, so the ambient logging stack spec section 7
//! calls for actually gets driven end to end at least once.

use scte35_sig::collaborators::{LogCrateLogger, VecBufferProvider, VecEmitter};
use scte35_sig::{Input, SpliceInfoGenerator};

#[test]
fn log_crate_logger_routes_warnings_through_a_real_dispatcher() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut gen = SpliceInfoGenerator::new(
        VecBufferProvider,
        VecEmitter::default(),
        LogCrateLogger,
        1,
    );

    // An unknown splice_command_type (0x04, splice_schedule, which this
    // generator does not support) takes the warn-and-drop path in the
    // reassembly buffer. With `LogCrateLogger` wired in, that warning goes
    // through `log::warn!` and the configured `env_logger` dispatcher
    // instead of being silently discarded -- the generator still makes
    // progress afterward, continuing to emit its null filler.
    gen.push_event(Input::whole(1, 0x04, 0)).unwrap();

    gen.tick(0).unwrap();

    let (_, emitter, _) = gen.teardown();
    assert_eq!(emitter.records.len(), 1);
    assert_eq!(emitter.records[0].section.as_slice()[0], 0xFC);
}

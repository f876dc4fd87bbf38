use crate::{
    EngineConfig, EngineEventSender, MediaSink, PlaybackEngineAdapter, PlaybackError,
    tests::fakes::{FakeEngine, FakeRuntime, FakeSink, Journal, Op},
};

use tokio::sync::mpsc;
use uuid::Uuid;

#[allow(clippy::unwrap_used)]
fn create_adapter(runtime: &FakeRuntime) -> PlaybackEngineAdapter<FakeEngine> {
    let (tx, _rx) = mpsc::unbounded_channel();
    let events = EngineEventSender::new(Uuid::new_v4(), tx);
    PlaybackEngineAdapter::create(runtime, &EngineConfig::default(), events).unwrap()
}

/// WHAT: Unsupported runtime yields a capability fault
/// WHY: No engine may be constructed where streaming cannot work
#[test]
fn given_unsupported_runtime_when_creating_adapter_then_streaming_unsupported() {
    // Given: A runtime without engine support
    let journal = Journal::default();
    let runtime = FakeRuntime::unsupported(&journal);
    let (tx, _rx) = mpsc::unbounded_channel();
    let events = EngineEventSender::new(Uuid::new_v4(), tx);

    // When: Creating an adapter
    let result = PlaybackEngineAdapter::create(&runtime, &EngineConfig::default(), events);

    // Then: StreamingUnsupported and no engine exists
    assert!(matches!(
        result,
        Err(PlaybackError::StreamingUnsupported { .. })
    ));
    assert_eq!(runtime.engines_created(), 0);
}

/// WHAT: Invalid engine options are rejected before construction
/// WHY: Configuration faults must not produce half-built engines
#[test]
fn given_invalid_config_when_creating_adapter_then_invalid_engine_config() {
    // Given: A forward buffer ceiling below the forward buffer
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let config = EngineConfig {
        max_buffer_secs: 30,
        max_max_buffer_secs: 10,
        ..EngineConfig::default()
    };
    let (tx, _rx) = mpsc::unbounded_channel();
    let events = EngineEventSender::new(Uuid::new_v4(), tx);

    // When: Creating an adapter
    let result = PlaybackEngineAdapter::create(&runtime, &config, events);

    // Then: InvalidEngineConfig and no engine exists
    assert!(matches!(
        result,
        Err(PlaybackError::InvalidEngineConfig { .. })
    ));
    assert_eq!(runtime.engines_created(), 0);
}

/// WHAT: destroy() twice releases the engine once
/// WHY: Close and unmount can both reach teardown
#[test]
fn given_adapter_when_destroying_twice_then_engine_destroyed_once() {
    // Given: A fresh adapter that never loaded anything
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut adapter = create_adapter(&runtime);

    // When: Destroying it twice
    adapter.destroy();
    adapter.destroy();

    // Then: The engine saw exactly one destroy
    assert!(adapter.is_destroyed());
    assert_eq!(journal.count(&Op::EngineDestroyed(0)), 1);
}

/// WHAT: Dropping the adapter destroys the engine
/// WHY: Engines must not outlive their owner on any path
#[test]
fn given_adapter_when_dropped_then_engine_destroyed() {
    // Given: An adapter
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let adapter = create_adapter(&runtime);

    // When: Dropping it
    drop(adapter);

    // Then: The engine was destroyed
    assert_eq!(journal.live_engines(), 0);
}

/// WHAT: detach() twice unbinds once and leaves the sink free
/// WHY: detach must be idempotent and safe on detached engines
#[test]
#[allow(clippy::unwrap_used)]
fn given_attached_adapter_when_detaching_twice_then_sink_unbound() {
    // Given: An adapter attached to a sink
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut sink = FakeSink::new(&journal);
    let mut adapter = create_adapter(&runtime);
    adapter.attach(&mut sink).unwrap();
    assert_eq!(sink.attached_stream(), Some(adapter.session_id()));

    // When: Detaching twice
    adapter.detach(&mut sink);
    adapter.detach(&mut sink);

    // Then: One detach reached the engine and the sink is free
    assert!(!adapter.is_attached());
    assert_eq!(sink.attached_stream(), None);
    assert_eq!(journal.count(&Op::DetachMedia(0)), 1);
}

/// WHAT: detach() on a never-attached engine does nothing
/// WHY: Teardown runs regardless of how far setup got
#[test]
fn given_unattached_adapter_when_detaching_then_no_engine_calls() {
    // Given: An adapter that was never attached
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut sink = FakeSink::new(&journal);
    let mut adapter = create_adapter(&runtime);

    // When: Detaching
    adapter.detach(&mut sink);

    // Then: The engine was not asked to detach
    assert_eq!(journal.count(&Op::DetachMedia(0)), 0);
}

/// WHAT: A sink held by another session refuses the attach
/// WHY: Two engines must never feed the same sink
#[test]
#[allow(clippy::unwrap_used)]
fn given_sink_bound_elsewhere_when_attaching_then_error_and_engine_unbound() {
    // Given: A sink already bound to a foreign session
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut sink = FakeSink::new(&journal);
    let foreign = Uuid::new_v4();
    sink.attach_stream(foreign).unwrap();
    let mut adapter = create_adapter(&runtime);

    // When: Attaching the adapter
    let result = adapter.attach(&mut sink);

    // Then: The attach fails, the engine is rolled back, the sink keeps its owner
    assert!(matches!(result, Err(PlaybackError::SinkError { .. })));
    assert!(!adapter.is_attached());
    assert_eq!(journal.count(&Op::DetachMedia(0)), 1);
    assert_eq!(sink.attached_stream(), Some(foreign));
}

/// WHAT: A destroyed engine cannot be re-attached or reloaded
/// WHY: Destroyed engines hold no resources and must stay inert
#[test]
fn given_destroyed_adapter_when_attaching_or_reloading_then_engine_untouched() {
    // Given: A destroyed adapter
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut sink = FakeSink::new(&journal);
    let mut adapter = create_adapter(&runtime);
    adapter.destroy();

    // When: Attaching and reloading
    let result = adapter.attach(&mut sink);
    adapter.reload();
    adapter.recover_media_error();

    // Then: Nothing reached the engine after destroy
    assert!(matches!(result, Err(PlaybackError::EngineError { .. })));
    assert_eq!(journal.count(&Op::AttachMedia(0)), 0);
    assert_eq!(journal.count(&Op::StartLoad(0)), 0);
    assert_eq!(journal.count(&Op::RecoverMedia(0)), 0);
}

/// WHAT: Manifest parse leaves the sink muted and paused
/// WHY: Autoplay is never forced; starting playback is a user action
#[test]
#[allow(clippy::unwrap_used)]
fn given_playing_sink_when_manifest_parsed_then_sink_muted_and_paused() {
    // Given: An attached adapter and a sink that is unmuted and playing
    let journal = Journal::default();
    let runtime = FakeRuntime::new(&journal);
    let mut sink = FakeSink::new(&journal);
    let mut adapter = create_adapter(&runtime);
    adapter.attach(&mut sink).unwrap();
    sink.play().unwrap();
    assert!(!sink.is_paused());

    // When: The manifest is parsed
    adapter.on_manifest_parsed(&mut sink);

    // Then: The sink is muted and paused
    assert!(sink.is_muted());
    assert!(sink.is_paused());
}

use crate::{EngineConfig, PlaybackError, StartPosition};

use std::time::Duration;

/// WHAT: Defaults match the documented engine options
/// WHY: Playback tuning depends on these values
#[test]
fn given_default_config_when_inspecting_then_documented_values() {
    // Given/When: The default engine configuration
    let config = EngineConfig::default();

    // Then: Worker and low-latency on, 3-segment sync, 30/30/60s buffers, auto start
    assert!(!config.debug);
    assert!(config.enable_worker);
    assert!(config.low_latency_mode);
    assert_eq!(config.live_sync_duration_count, 3);
    assert_eq!(config.max_buffer(), Duration::from_secs(30));
    assert_eq!(config.back_buffer(), Duration::from_secs(30));
    assert_eq!(config.max_max_buffer(), Duration::from_secs(60));
    assert_eq!(config.start_position, StartPosition::Auto);
    assert!(config.validate().is_ok());
}

/// WHAT: Empty live sync window is rejected
/// WHY: The engine needs at least one segment of sync distance
#[test]
fn given_zero_live_sync_window_when_validating_then_invalid_engine_config() {
    // Given: A config with no live sync window
    let config = EngineConfig {
        live_sync_duration_count: 0,
        ..EngineConfig::default()
    };

    // When/Then: Validation fails
    assert!(matches!(
        config.validate(),
        Err(PlaybackError::InvalidEngineConfig { .. })
    ));
}

/// WHAT: Negative start offsets are rejected
/// WHY: A start position must lie inside the stream
#[test]
fn given_negative_start_offset_when_validating_then_invalid_engine_config() {
    // Given: A negative start position
    let config = EngineConfig {
        start_position: StartPosition::Seconds(-1.0),
        ..EngineConfig::default()
    };

    // When/Then: Validation fails
    assert!(matches!(
        config.validate(),
        Err(PlaybackError::InvalidEngineConfig { .. })
    ));
}

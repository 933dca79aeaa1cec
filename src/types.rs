use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stable identity of an entity taking part in collision checks (e.g., an arena index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Unordered pair key: the smaller id always comes first.
    pub fn pair(self, other: EntityId) -> (EntityId, EntityId) {
        if self <= other { (self, other) } else { (other, self) }
    }
}

/// Mobility tag of an entity. Static bodies are never checked against each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mobility {
    Dynamic,
    Static,
}

impl Mobility {
    pub fn is_dynamic(self) -> bool {
        matches!(self, Mobility::Dynamic)
    }
}

/// Overlap transition of one pair between two consecutive checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactPhase {
    /// No contact before, contact now.
    Enter,
    /// Contact before and now.
    Stay,
    /// Contact before, none now.
    Exit,
}

impl ContactPhase {
    /// Classify a pair from its stored (`prior`) and freshly computed (`area`) overlap.
    ///
    /// An unseen pair has a prior of 0, so it behaves like `NoContact`.
    /// Returns `None` for `NoContact -> NoContact`.
    pub fn classify(prior: f32, area: f32) -> Option<ContactPhase> {
        match (prior > 0.0, area > 0.0) {
            (false, true) => Some(ContactPhase::Enter),
            (true, true) => Some(ContactPhase::Stay),
            (true, false) => Some(ContactPhase::Exit),
            (false, false) => None,
        }
    }
}

/// Record of a notification fired by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    /// First body of the pair (always a dynamic body).
    pub a: EntityId,
    pub b: EntityId,
    /// Overlap area computed this frame.
    pub area: f32,
    /// Overlap area stored from the previous check of this pair.
    pub prior: f32,
}

/// Engine-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Keep a log of fired transitions, drained with `drain_events`.
    pub record_events: bool,
    /// Maximum number of events kept per frame; extra are dropped.
    pub max_events: usize,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_events: true,
            max_events: 1024,
            enable_timing: false,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.record_events && self.max_events == 0 {
            return Err(ConfigError::Invalid(
                "record_events requires max_events > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counters for the last `check_all`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub dynamics: usize,
    pub statics: usize,
    /// Pairs that went through the overlap computation.
    pub pairs_checked: usize,
    /// Static x static pairs never evaluated.
    pub static_pairs_skipped: usize,
    /// Pairs skipped because both sides share an identity or were already evaluated.
    pub duplicate_pairs_skipped: usize,
    /// Individual hook invocations (two per fired transition).
    pub notifications: usize,
}

/// Timing breakdown for the last `check_all`.
#[derive(Copy, Clone, Debug, Default)]
pub struct EngineTiming {
    pub check_all_ms: f64,
    pub partition_ms: f64,
    pub pairs_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_transitions() {
        assert_eq!(ContactPhase::classify(0.0, 4.0), Some(ContactPhase::Enter));
        assert_eq!(ContactPhase::classify(4.0, 2.0), Some(ContactPhase::Stay));
        assert_eq!(ContactPhase::classify(4.0, 0.0), Some(ContactPhase::Exit));
        assert_eq!(ContactPhase::classify(0.0, 0.0), None);
    }

    #[test]
    fn test_pair_key_is_unordered() {
        assert_eq!(EntityId(3).pair(EntityId(1)), (EntityId(1), EntityId(3)));
        assert_eq!(EntityId(1).pair(EntityId(3)), (EntityId(1), EntityId(3)));
    }

    #[test]
    fn test_config_from_json_defaults() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());

        let cfg = EngineConfig::from_json(r#"{ "enable_timing": true, "max_events": 8 }"#).unwrap();
        assert!(cfg.enable_timing);
        assert_eq!(cfg.max_events, 8);
        assert!(cfg.record_events);
    }

    #[test]
    fn test_config_rejects_zero_capacity_when_recording() {
        let err = EngineConfig::from_json(r#"{ "max_events": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let cfg = EngineConfig::from_json(r#"{ "record_events": false, "max_events": 0 }"#).unwrap();
        assert!(!cfg.record_events);
    }

    #[test]
    fn test_config_parse_error() {
        let err = EngineConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
        assert!(err.to_string().starts_with("serde error"));
    }
}

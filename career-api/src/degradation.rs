//! Process-wide degradation flags
//!
//! Computed once at startup and refreshed opportunistically after outbound
//! calls. Informational only: a stale "unhealthy" flag never stops a later
//! request from trying the tier again.

use std::sync::atomic::{AtomicI64, AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Last observed state of an outbound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    /// No endpoint configured
    NotConfigured,
    /// Configured but not called yet
    Unknown,
    Healthy,
    Unhealthy,
}

impl Reachability {
    fn to_u8(self) -> u8 {
        match self {
            Reachability::NotConfigured => 0,
            Reachability::Unknown => 1,
            Reachability::Healthy => 2,
            Reachability::Unhealthy => 3,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Reachability::NotConfigured,
            2 => Reachability::Healthy,
            3 => Reachability::Unhealthy,
            _ => Reachability::Unknown,
        }
    }

    fn initial(configured: bool) -> Self {
        if configured {
            Reachability::Unknown
        } else {
            Reachability::NotConfigured
        }
    }
}

/// Typed capability flags shared by all requests
#[derive(Debug)]
pub struct DegradationState {
    local_model_loaded: bool,
    remote_inference: AtomicU8,
    content_service: AtomicU8,
    /// Unix millis of the last remote inference observation, 0 = never
    last_remote_check_ms: AtomicI64,
}

/// Point-in-time copy of [`DegradationState`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegradationSnapshot {
    pub local_model_loaded: bool,
    pub remote_inference: Reachability,
    pub content_service: Reachability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_remote_check: Option<DateTime<Utc>>,
}

impl DegradationSnapshot {
    /// True when predictions can only come from the static fallback, or the
    /// content collaborator is known to be down
    pub fn is_degraded(&self) -> bool {
        let prediction_degraded =
            !self.local_model_loaded && self.remote_inference != Reachability::Healthy;
        prediction_degraded || self.content_service == Reachability::Unhealthy
    }
}

impl DegradationState {
    pub fn new(local_model_loaded: bool, remote_configured: bool, content_configured: bool) -> Self {
        Self {
            local_model_loaded,
            remote_inference: AtomicU8::new(Reachability::initial(remote_configured).to_u8()),
            content_service: AtomicU8::new(Reachability::initial(content_configured).to_u8()),
            last_remote_check_ms: AtomicI64::new(0),
        }
    }

    pub fn local_model_loaded(&self) -> bool {
        self.local_model_loaded
    }

    pub fn remote_inference(&self) -> Reachability {
        Reachability::from_u8(self.remote_inference.load(Ordering::Relaxed))
    }

    pub fn content_service(&self) -> Reachability {
        Reachability::from_u8(self.content_service.load(Ordering::Relaxed))
    }

    /// Record the outcome of a remote inference call
    pub fn mark_remote(&self, healthy: bool) {
        let state = if healthy {
            Reachability::Healthy
        } else {
            Reachability::Unhealthy
        };
        self.remote_inference.store(state.to_u8(), Ordering::Relaxed);
        self.last_remote_check_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// Record the outcome of a generative content call
    pub fn mark_content(&self, healthy: bool) {
        let state = if healthy {
            Reachability::Healthy
        } else {
            Reachability::Unhealthy
        };
        self.content_service.store(state.to_u8(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DegradationSnapshot {
        let last_ms = self.last_remote_check_ms.load(Ordering::Relaxed);
        DegradationSnapshot {
            local_model_loaded: self.local_model_loaded,
            remote_inference: self.remote_inference(),
            content_service: self.content_service(),
            last_remote_check: (last_ms > 0)
                .then(|| DateTime::from_timestamp_millis(last_ms))
                .flatten(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_flags() {
        let state = DegradationState::new(false, true, false);
        let snapshot = state.snapshot();

        assert!(!snapshot.local_model_loaded);
        assert_eq!(snapshot.remote_inference, Reachability::Unknown);
        assert_eq!(snapshot.content_service, Reachability::NotConfigured);
        assert_eq!(snapshot.last_remote_check, None);
        assert!(snapshot.is_degraded());
    }

    #[test]
    fn test_remote_marks_are_recorded_with_timestamp() {
        let state = DegradationState::new(false, true, true);

        state.mark_remote(true);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.remote_inference, Reachability::Healthy);
        assert!(snapshot.last_remote_check.is_some());
        assert!(!snapshot.is_degraded());

        state.mark_remote(false);
        assert_eq!(state.remote_inference(), Reachability::Unhealthy);
    }

    #[test]
    fn test_local_model_alone_is_not_degraded() {
        let state = DegradationState::new(true, false, false);
        assert!(!state.snapshot().is_degraded());

        state.mark_content(false);
        assert!(state.snapshot().is_degraded());
    }
}

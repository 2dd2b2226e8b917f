//! Target selection: threat scoring over the candidate list.
//!
//! Threat is a scalar ranking key, lower = higher priority. It starts
//! from plain distance and is discounted for near-axis candidates and
//! for priority roles. The ranked result is cached and only recomputed
//! once per `update_rate_s`.

use std::cmp::Ordering;

use crate::boundary::{Observer, TargetCandidate, TargetRole};
use crate::config::SelectorConfig;
use crate::math::Vec3;

/// Candidate plus the scoring breakdown it was ranked with.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: TargetCandidate,
    pub distance: f32,
    pub angle_deg: f32,
    pub threat: f32,
}

#[derive(Debug)]
pub struct TargetSelector {
    config: SelectorConfig,
    ranked: Vec<ScoredCandidate>,
    last_update: Option<f64>,
}

impl TargetSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            ranked: Vec::new(),
            last_update: None,
        }
    }

    /// Recompute the ranked cache unless it is younger than
    /// `update_rate_s`. Returns true when a recompute happened.
    pub fn refresh(
        &mut self,
        candidates: &[TargetCandidate],
        observer: &Observer,
        now: f64,
    ) -> bool {
        if let Some(t) = self.last_update {
            if now - t < self.config.update_rate_s {
                return false;
            }
        }
        self.last_update = Some(now);

        self.ranked.clear();
        for candidate in candidates {
            if let Some(scored) = self.score(candidate, observer) {
                self.ranked.push(scored);
            }
        }
        // Stable sort: equal-threat candidates keep list order
        self.ranked
            .sort_by(|a, b| a.threat.partial_cmp(&b.threat).unwrap_or(Ordering::Equal));
        true
    }

    /// Best cached candidate (minimal threat), or None when the last
    /// refresh found nothing valid. Pure read, never recomputes.
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.ranked.first()
    }

    pub fn ranked(&self) -> &[ScoredCandidate] {
        &self.ranked
    }

    /// Drop the cache so the next refresh recomputes regardless of age.
    pub fn invalidate(&mut self) {
        self.ranked.clear();
        self.last_update = None;
    }

    fn score(&self, candidate: &TargetCandidate, observer: &Observer) -> Option<ScoredCandidate> {
        if !candidate.is_alive() || candidate.id == observer.entity_id {
            return None;
        }
        if candidate.occluded && !self.config.allow_occluded {
            return None;
        }

        let reference = candidate.reference_point();
        let distance = reference.distance(observer.position);
        if distance > self.config.max_distance {
            return None;
        }

        let angle_deg = angular_offset_deg(observer.position, reference);
        if angle_deg > self.config.fov_deg {
            return None;
        }

        let mut threat = distance;
        if angle_deg < self.config.close_angle_deg {
            threat *= self.config.angle_bonus;
        }
        if candidate.role == TargetRole::Priority {
            threat *= self.config.role_bonus;
        }

        Some(ScoredCandidate {
            candidate: candidate.clone(),
            distance,
            angle_deg,
            threat,
        })
    }
}

/// Angular offset of the target from the forward axis, in degrees.
///
/// Computed as the arc-cosine of the world +Y component of the
/// normalized observer→target direction. This ignores the observer's
/// actual yaw (Observer::facing_angle); a correct FOV test would need
/// the full orientation. Kept as-is because the tuning constants and
/// observed behavior assume this approximation.
fn angular_offset_deg(observer_pos: Vec3, target: Vec3) -> f32 {
    let dir = (target - observer_pos).normalize();
    dir.y.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> Observer {
        Observer {
            entity_id: 0,
            position: Vec3::zero(),
            facing_angle: 0.0,
        }
    }

    fn candidate(id: u64, position: Vec3) -> TargetCandidate {
        TargetCandidate {
            id,
            position,
            reference_point: None,
            health: 100.0,
            role: TargetRole::Normal,
            occluded: false,
        }
    }

    fn selector() -> TargetSelector {
        TargetSelector::new(SelectorConfig::default())
    }

    #[test]
    fn test_best_is_minimal_threat() {
        let mut s = selector();
        // Both straight ahead (+Y); nearer one wins
        let list = vec![
            candidate(1, Vec3::new(0.0, 50.0, 0.0)),
            candidate(2, Vec3::new(0.0, 20.0, 0.0)),
        ];
        assert!(s.refresh(&list, &observer(), 0.0));
        assert_eq!(s.best().unwrap().candidate.id, 2);
    }

    #[test]
    fn test_deterministic_with_tie_by_list_order() {
        let mut s = selector();
        let list = vec![
            candidate(7, Vec3::new(0.0, 30.0, 0.0)),
            candidate(8, Vec3::new(0.0, 30.0, 0.0)),
        ];
        for run in 0..3 {
            s.invalidate();
            s.refresh(&list, &observer(), run as f64);
            assert_eq!(s.best().unwrap().candidate.id, 7);
        }
    }

    #[test]
    fn test_dead_self_and_occluded_rejected() {
        let mut s = selector();
        let mut dead = candidate(1, Vec3::new(0.0, 10.0, 0.0));
        dead.health = 0.0;
        let own = candidate(0, Vec3::new(0.0, 5.0, 0.0)); // observer's id
        let mut hidden = candidate(3, Vec3::new(0.0, 8.0, 0.0));
        hidden.occluded = true;
        s.refresh(&[dead, own, hidden], &observer(), 0.0);
        assert!(s.best().is_none());
    }

    #[test]
    fn test_occluded_accepted_when_allowed() {
        let mut s = TargetSelector::new(SelectorConfig {
            allow_occluded: true,
            ..Default::default()
        });
        let mut hidden = candidate(3, Vec3::new(0.0, 8.0, 0.0));
        hidden.occluded = true;
        s.refresh(&[hidden], &observer(), 0.0);
        assert_eq!(s.best().unwrap().candidate.id, 3);
    }

    #[test]
    fn test_distance_and_fov_limits() {
        let mut s = selector();
        let too_far = candidate(1, Vec3::new(0.0, 500.0, 0.0));
        // ~90° off the +Y forward axis, outside the 60° default FOV
        let off_axis = candidate(2, Vec3::new(10.0, 0.0, 0.0));
        let ok = candidate(3, Vec3::new(0.0, 40.0, 0.0));
        s.refresh(&[too_far, off_axis, ok], &observer(), 0.0);
        assert_eq!(s.ranked().len(), 1);
        assert_eq!(s.best().unwrap().candidate.id, 3);
    }

    #[test]
    fn test_priority_role_outranks_closer_normal() {
        let mut s = selector();
        let near = candidate(1, Vec3::new(0.0, 30.0, 0.0));
        let mut far_priority = candidate(2, Vec3::new(0.0, 40.0, 0.0));
        far_priority.role = TargetRole::Priority;
        s.refresh(&[near, far_priority], &observer(), 0.0);
        // 40 * 0.8 (angle) * 0.7 (role) = 22.4 < 30 * 0.8 = 24
        assert_eq!(s.best().unwrap().candidate.id, 2);
    }

    #[test]
    fn test_cache_respects_update_rate() {
        let mut s = selector(); // update_rate_s = 0.1
        let near = vec![candidate(1, Vec3::new(0.0, 10.0, 0.0))];
        let nearer = vec![candidate(2, Vec3::new(0.0, 5.0, 0.0))];
        assert!(s.refresh(&near, &observer(), 0.0));
        // Too soon: cache keeps the old ranking
        assert!(!s.refresh(&nearer, &observer(), 0.05));
        assert_eq!(s.best().unwrap().candidate.id, 1);
        // Interval elapsed: recompute
        assert!(s.refresh(&nearer, &observer(), 0.11));
        assert_eq!(s.best().unwrap().candidate.id, 2);
    }

    #[test]
    fn test_empty_list_yields_none() {
        let mut s = selector();
        s.refresh(&[], &observer(), 0.0);
        assert!(s.best().is_none());
    }

    #[test]
    fn test_angular_offset_axis_convention() {
        // Straight ahead on +Y: 0°. Perpendicular: 90°.
        assert!(angular_offset_deg(Vec3::zero(), Vec3::new(0.0, 5.0, 0.0)) < 1e-3);
        let perp = angular_offset_deg(Vec3::zero(), Vec3::new(3.0, 0.0, 0.0));
        assert!((perp - 90.0).abs() < 1e-3);
    }
}

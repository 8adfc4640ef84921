//! CPU mirror of the streamed-particle vertex shader.
//!
//! The GPU computes these per frame; nothing in the record is ever rewritten.
//! Keep in sync with `streamed_points.wgsl` in `pointfield-engine`.

use crate::record::StreamRecord;

/// Interpolated position at `time`.
///
/// `start + (target - start) * ((time - birth) / |velocity.x|)`. Progress is
/// not clamped at 1: the particle overshoots its target and is hidden by
/// [`point_size_at`].
pub fn position_at(record: &StreamRecord, time: f32) -> [f32; 2] {
    let progress = (time - record.birth) / record.velocity[0].abs();
    [
        record.start[0] + (record.target[0] - record.start[0]) * progress,
        record.start[1] + (record.target[1] - record.start[1]) * progress,
    ]
}

/// Point diameter at `time`: `0` once x is past the target x, `size` otherwise.
///
/// Reaching the target exactly still counts as visible.
pub fn point_size_at(record: &StreamRecord, time: f32, size: f32) -> f32 {
    if position_at(record, time)[0] > record.target[0] {
        0.0
    } else {
        size
    }
}

/// Seconds from birth to arrival at the target.
///
/// Progress advances at `1 / |velocity.x|` per second, so the x component is
/// a duration rather than a speed: larger values arrive later.
#[inline]
pub fn travel_time(record: &StreamRecord) -> f32 {
    record.velocity[0].abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(start_x: f32, vx: f32, birth: f32) -> StreamRecord {
        StreamRecord {
            start: [start_x, 0.5],
            target: [1.0, 0.0],
            velocity: [vx, 3.0],
            birth,
            color: [1.0; 4],
        }
    }

    #[test]
    fn at_birth_sits_on_start() {
        let r = rec(-0.5, 0.25, 2.0);
        assert_eq!(position_at(&r, 2.0), [-0.5, 0.5]);
    }

    #[test]
    fn velocity_sign_does_not_matter() {
        let a = rec(0.0, 0.5, 0.0);
        let b = rec(0.0, -0.5, 0.0);
        assert_eq!(position_at(&a, 1.0), position_at(&b, 1.0));
    }

    #[test]
    fn arrives_after_velocity_x_seconds() {
        let r = rec(0.0, 2.0, 1.0);
        assert_eq!(travel_time(&r), 2.0);
        assert_eq!(position_at(&r, 3.0), [1.0, 0.0]);
        assert_eq!(position_at(&r, 2.0), [0.5, 0.25]);
    }

    #[test]
    fn larger_velocity_arrives_later() {
        let fast = rec(0.0, 0.5, 0.0);
        let slow = rec(0.0, 4.0, 0.0);
        assert!(position_at(&fast, 0.25)[0] > position_at(&slow, 0.25)[0]);
    }

    #[test]
    fn y_velocity_is_ignored() {
        let mut r = rec(0.0, 0.5, 0.0);
        let before = position_at(&r, 1.0);
        r.velocity[1] = -100.0;
        assert_eq!(position_at(&r, 1.0), before);
    }

    // ── visibility ────────────────────────────────────────────────────────

    #[test]
    fn visible_before_target() {
        assert_eq!(point_size_at(&rec(0.0, 0.5, 0.0), 0.25, 10.0), 10.0);
    }

    #[test]
    fn visible_exactly_at_target() {
        let r = rec(0.0, 0.5, 0.0);
        assert_eq!(position_at(&r, 0.5)[0], r.target[0]);
        assert_eq!(point_size_at(&r, 0.5, 10.0), 10.0);
    }

    #[test]
    fn hidden_past_target() {
        assert_eq!(point_size_at(&rec(0.0, 0.5, 0.0), 0.75, 10.0), 0.0);
    }

    #[test]
    fn hidden_iff_past_target_x() {
        let r = rec(-0.3, 0.2, 0.5);
        for i in 0..200 {
            let t = i as f32 * 0.05;
            let past = position_at(&r, t)[0] > r.target[0];
            assert_eq!(point_size_at(&r, t, 10.0) == 0.0, past, "t={t}");
        }
    }

    #[test]
    fn start_beyond_target_is_hidden_from_birth() {
        // Starting right of the target: hidden until x comes back to it.
        let r = rec(1.5, 0.5, 0.0);
        assert_eq!(point_size_at(&r, 0.0, 10.0), 0.0);
        assert_eq!(point_size_at(&r, 0.5, 10.0), 10.0);
    }
}

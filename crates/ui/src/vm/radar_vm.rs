use std::f64::consts::PI;

use lingua_core::model::{RATING_MAX, Skill, SkillMap};

/// The radar chart has one axis per skill.
pub const RADAR_AXES: usize = Skill::ALL.len();

// First axis points straight up; the rest proceed clockwise.
fn axis_angle(axis: usize) -> f64 {
    -PI / 2.0 + (axis as f64) * (2.0 * PI / RADAR_AXES as f64)
}

fn point_at(cx: f64, cy: f64, radius: f64, axis: usize, fraction: f64) -> (f64, f64) {
    let angle = axis_angle(axis);
    (
        cx + radius * fraction * angle.cos(),
        cy + radius * fraction * angle.sin(),
    )
}

/// Outer endpoint of one axis, for axis lines and labels.
#[must_use]
pub fn axis_endpoint(cx: f64, cy: f64, radius: f64, axis: usize) -> (f64, f64) {
    point_at(cx, cy, radius, axis, 1.0)
}

/// SVG `points` attribute for the concentric guide ring at a rating level.
#[must_use]
pub fn ring_points(cx: f64, cy: f64, radius: f64, level: u8) -> String {
    let fraction = f64::from(level) / f64::from(RATING_MAX);
    polygon(cx, cy, radius, |_| fraction)
}

/// SVG `points` attribute for the value polygon of a snapshot's ratings.
#[must_use]
pub fn value_points(cx: f64, cy: f64, radius: f64, ratings: &SkillMap<u8>) -> String {
    polygon(cx, cy, radius, |axis| {
        f64::from(*ratings.get(Skill::ALL[axis])) / f64::from(RATING_MAX)
    })
}

fn polygon(cx: f64, cy: f64, radius: f64, fraction: impl Fn(usize) -> f64) -> String {
    (0..RADAR_AXES)
        .map(|axis| {
            let (x, y) = point_at(cx, cy, radius, axis, fraction(axis));
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_axis_points_straight_up() {
        let (x, y) = axis_endpoint(100.0, 100.0, 80.0, 0);
        assert!((x - 100.0).abs() < 1e-6);
        assert!((y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn full_ratings_reach_the_axis_endpoints() {
        let ratings = SkillMap::splat(RATING_MAX);
        let value = value_points(100.0, 100.0, 80.0, &ratings);
        let ring = ring_points(100.0, 100.0, 80.0, RATING_MAX);
        assert_eq!(value, ring);
    }

    #[test]
    fn polygons_have_one_point_per_axis() {
        let ratings = SkillMap::splat(3);
        let points = value_points(100.0, 100.0, 80.0, &ratings);
        assert_eq!(points.split_whitespace().count(), RADAR_AXES);
    }

    #[test]
    fn higher_ratings_sit_further_from_center() {
        let low = value_points(100.0, 100.0, 80.0, &SkillMap::splat(1));
        let high = value_points(100.0, 100.0, 80.0, &SkillMap::splat(5));
        let top_y = |points: &str| -> f64 {
            points
                .split_whitespace()
                .next()
                .unwrap()
                .split(',')
                .nth(1)
                .unwrap()
                .parse()
                .unwrap()
        };
        assert!(top_y(&high) < top_y(&low));
    }
}

//! Collision detection and response
//!
//! Axis-aligned box overlap, circle versus box with a compass classification
//! of the contact side, and the position/velocity corrections applied to the
//! ball afterwards.

use glam::Vec2;

use super::state::{Ball, MovingBody, Paddle};
use crate::consts::{INITIAL_BALL_VELOCITY, PADDLE_BOUNCE_STRENGTH};

/// Side of a box the ball pushed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Classification order; earlier entries win ties
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn compass(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a confirmed circle/box contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHit {
    pub direction: Direction,
    /// Closest point on the box minus the circle center (unclamped)
    pub difference: Vec2,
}

/// Compass direction closest to `target`
///
/// Returns `None` for zero-length or non-finite vectors.
pub fn vector_direction(target: Vec2) -> Option<Direction> {
    let normalized = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = None;
    for direction in Direction::ALL {
        let dot = normalized.dot(direction.compass());
        if dot > max {
            max = dot;
            best = Some(direction);
        }
    }
    best
}

/// Inclusive AABB overlap
pub fn check_aabb(one: &MovingBody, two: &MovingBody) -> bool {
    let x = one.position.x + one.size.x >= two.position.x
        && two.position.x + two.size.x >= one.position.x;
    let y = one.position.y + one.size.y >= two.position.y
        && two.position.y + two.size.y >= one.position.y;
    x && y
}

/// Circle (ball) versus box
pub fn check_circle_aabb(ball: &Ball, two: &MovingBody) -> Option<CircleHit> {
    let center = ball.center();
    let half_extents = two.size / 2.0;
    let box_center = two.position + half_extents;

    // Closest point on the box to the circle
    let clamped = (center - box_center).clamp(-half_extents, half_extents);
    let closest = box_center + clamped;

    let difference = closest - center;
    if difference.length() > ball.radius {
        return None;
    }

    // Center inside the box: the difference is zero and carries no side
    let direction = vector_direction(difference).unwrap_or(Direction::Up);
    Some(CircleHit {
        direction,
        difference,
    })
}

/// Reflect the ball off the side it hit and push it out of the box
pub fn resolve_ball(ball: &mut Ball, hit: &CircleHit) {
    let body = &mut ball.body;
    if hit.direction.is_horizontal() {
        body.velocity.x = -body.velocity.x;
        let penetration = ball.radius - hit.difference.x.abs();
        if hit.direction == Direction::Left {
            body.position.x += penetration;
        } else {
            body.position.x -= penetration;
        }
    } else {
        body.velocity.y = -body.velocity.y;
        let penetration = ball.radius - hit.difference.y.abs();
        if hit.direction == Direction::Up {
            body.position.y -= penetration;
        } else {
            body.position.y += penetration;
        }
    }
}

/// Send the ball back up from the paddle
///
/// The horizontal component comes from where the ball landed relative to the
/// paddle center, not from the incoming angle. Speed is preserved. A sticky
/// ball is re-attached.
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle) {
    let distance = ball.center().x - paddle.center_x();
    let percentage = distance / paddle.half_width();

    let old_velocity = ball.body.velocity;
    let mut velocity = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH,
        -old_velocity.y.abs(),
    );
    velocity = velocity.normalize_or_zero() * old_velocity.length();

    ball.body.velocity = velocity;
    ball.stuck = ball.sticky;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brick(x: f32, y: f32, w: f32, h: f32) -> MovingBody {
        MovingBody::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    fn ball_centered_at(center: Vec2, radius: f32, velocity: Vec2) -> Ball {
        let mut ball = Ball::new(center - radius, radius, velocity);
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_vector_direction_axes() {
        assert_eq!(vector_direction(Vec2::new(0.0, 5.0)), Some(Direction::Up));
        assert_eq!(vector_direction(Vec2::new(3.0, 0.0)), Some(Direction::Right));
        assert_eq!(vector_direction(Vec2::new(0.0, -0.1)), Some(Direction::Down));
        assert_eq!(vector_direction(Vec2::new(-2.0, 1.0)), Some(Direction::Left));
    }

    #[test]
    fn test_vector_direction_ties_follow_enumeration_order() {
        assert_eq!(vector_direction(Vec2::new(1.0, 1.0)), Some(Direction::Up));
        assert_eq!(vector_direction(Vec2::new(1.0, -1.0)), Some(Direction::Right));
        assert_eq!(vector_direction(Vec2::new(-1.0, -1.0)), Some(Direction::Down));
        assert_eq!(vector_direction(Vec2::new(-1.0, 1.0)), Some(Direction::Up));
    }

    #[test]
    fn test_vector_direction_degenerate() {
        assert_eq!(vector_direction(Vec2::ZERO), None);
        assert_eq!(vector_direction(Vec2::new(f32::NAN, 1.0)), None);
    }

    #[test]
    fn test_aabb_inclusive_edges() {
        let a = brick(0.0, 0.0, 10.0, 10.0);
        let touching = brick(10.0, 10.0, 5.0, 5.0);
        let apart = brick(10.1, 0.0, 5.0, 5.0);
        assert!(check_aabb(&a, &touching));
        assert!(!check_aabb(&a, &apart));
    }

    #[test]
    fn test_circle_hit_from_above() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        // Center above the top edge midpoint, 10 units away
        let ball = ball_centered_at(Vec2::new(125.0, 90.0), 12.5, Vec2::new(0.0, 100.0));
        let hit = check_circle_aabb(&ball, &target).expect("ball overlaps top edge");
        assert_eq!(hit.direction, Direction::Up);
        assert_eq!(hit.difference, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_circle_hit_on_each_side() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        let cases = [
            (Vec2::new(125.0, 130.0), Direction::Down),
            (Vec2::new(90.0, 110.0), Direction::Right),
            (Vec2::new(160.0, 110.0), Direction::Left),
        ];
        for (center, expected) in cases {
            let ball = ball_centered_at(center, 12.5, Vec2::ZERO);
            let hit = check_circle_aabb(&ball, &target).expect("overlap");
            assert_eq!(hit.direction, expected, "center {center}");
        }
    }

    #[test]
    fn test_circle_exactly_touching_is_a_hit() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        let ball = ball_centered_at(Vec2::new(125.0, 87.5), 12.5, Vec2::ZERO);
        assert!(check_circle_aabb(&ball, &target).is_some());
    }

    #[test]
    fn test_circle_corner_miss() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        // Inside the radius-expanded box but outside the rounded corner
        let ball = ball_centered_at(Vec2::new(90.0, 90.0), 12.5, Vec2::ZERO);
        assert!(check_circle_aabb(&ball, &target).is_none());
    }

    #[test]
    fn test_center_inside_box_falls_back_to_up() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        let ball = ball_centered_at(Vec2::new(125.0, 110.0), 12.5, Vec2::ZERO);
        let hit = check_circle_aabb(&ball, &target).expect("inside");
        assert_eq!(hit.direction, Direction::Up);
        assert_eq!(hit.difference, Vec2::ZERO);
    }

    #[test]
    fn test_resolve_vertical_pushes_up() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        let mut ball = ball_centered_at(Vec2::new(125.0, 95.0), 12.5, Vec2::new(50.0, 200.0));
        let hit = check_circle_aabb(&ball, &target).expect("overlap");
        resolve_ball(&mut ball, &hit);
        assert_eq!(ball.body.velocity, Vec2::new(50.0, -200.0));
        // Penetration 12.5 - 5 = 7.5, ball now just touches the top edge
        assert!((ball.center().y - 87.5).abs() < 1e-4);
    }

    #[test]
    fn test_resolve_horizontal_pushes_right() {
        let target = brick(100.0, 100.0, 50.0, 20.0);
        let mut ball = ball_centered_at(Vec2::new(155.0, 110.0), 12.5, Vec2::new(-300.0, 10.0));
        let hit = check_circle_aabb(&ball, &target).expect("overlap");
        assert_eq!(hit.direction, Direction::Left);
        resolve_ball(&mut ball, &hit);
        assert_eq!(ball.body.velocity, Vec2::new(300.0, 10.0));
        assert!((ball.center().x - 162.5).abs() < 1e-4);
    }

    #[test]
    fn test_paddle_center_hit_goes_straight_up() {
        let mut paddle = Paddle::spawn(800.0, 600.0);
        paddle.body.position.x = 300.0;
        assert_eq!(paddle.center_x(), 350.0);

        let mut ball = ball_centered_at(Vec2::new(350.0, 575.0), 12.5, Vec2::new(100.0, 350.0));
        let speed = ball.speed();
        bounce_off_paddle(&mut ball, &paddle);

        assert!(ball.body.velocity.x.abs() < 1e-4);
        assert!(ball.body.velocity.y < 0.0);
        assert!((ball.speed() - speed).abs() < 1e-3);
        assert!(!ball.stuck);
    }

    #[test]
    fn test_paddle_edge_hit_deflects_sideways() {
        let paddle = Paddle::spawn(800.0, 600.0);
        let mut ball = ball_centered_at(
            Vec2::new(paddle.center_x() + 40.0, 575.0),
            12.5,
            Vec2::new(-100.0, 350.0),
        );
        bounce_off_paddle(&mut ball, &paddle);
        assert!(ball.body.velocity.x > 0.0);
        assert!(ball.body.velocity.y < 0.0);
    }

    #[test]
    fn test_sticky_ball_reattaches() {
        let paddle = Paddle::spawn(800.0, 600.0);
        let mut ball = ball_centered_at(Vec2::new(400.0, 575.0), 12.5, Vec2::new(0.0, 350.0));
        ball.sticky = true;
        bounce_off_paddle(&mut ball, &paddle);
        assert!(ball.stuck);
    }

    fn any_box() -> impl Strategy<Value = MovingBody> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| brick(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_aabb_is_symmetric(a in any_box(), b in any_box()) {
            prop_assert_eq!(check_aabb(&a, &b), check_aabb(&b, &a));
        }

        #[test]
        fn prop_circle_outside_expanded_box_misses(
            target in any_box(),
            radius in 1.0f32..30.0,
            gap in 0.01f32..300.0,
            side in 0usize..4,
            along in 0.0f32..1.0,
        ) {
            let min = target.position - radius;
            let max = target.position + target.size + radius;
            let span = max - min;
            let center = match side {
                0 => Vec2::new(min.x + span.x * along, min.y - gap),
                1 => Vec2::new(max.x + gap, min.y + span.y * along),
                2 => Vec2::new(min.x + span.x * along, max.y + gap),
                _ => Vec2::new(min.x - gap, min.y + span.y * along),
            };
            let ball = ball_centered_at(center, radius, Vec2::ZERO);
            prop_assert!(check_circle_aabb(&ball, &target).is_none());
        }
    }
}

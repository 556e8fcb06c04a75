//! Property tests for the simulation invariants.
//!
//! Strategies generate input sequences and entity placements; each property
//! drives the real `tick()` with a seeded Pcg32.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use paper_glider::consts::*;
use paper_glider::sim::{
    tick, Aabb, GamePhase, GameState, Obstacle, ObstacleKind, Plane, TickInput, WindKind, WindZone,
};

proptest! {
    /// The velocity clamp holds on every frame, whatever the input does.
    #[test]
    fn velocity_always_within_status_clamp(
        seed in any::<u64>(),
        lifts in proptest::collection::vec(any::<bool>(), 1..250),
    ) {
        let mut state = GameState::new(seed);
        let mut rng = Pcg32::seed_from_u64(seed);

        for &lift in &lifts {
            tick(&mut state, &TickInput { lift, pause: false }, &mut rng);
            if state.phase == GamePhase::GameOver {
                break;
            }
            let bound = MAX_VELOCITY * state.effects.velocity_scale();
            prop_assert!(state.plane.velocity.abs() <= bound + 1e-4);
        }
    }

    /// Same, with boost/slow status already active in any combination.
    #[test]
    fn velocity_clamp_holds_under_status_effects(
        boost in 0u32..400,
        slow in 0u32..400,
        lifts in proptest::collection::vec(any::<bool>(), 1..150),
    ) {
        let mut state = GameState::new(9);
        let mut rng = Pcg32::seed_from_u64(9);
        state.effects.boost_frames = boost;
        state.effects.slow_frames = slow;

        for &lift in &lifts {
            tick(&mut state, &TickInput { lift, pause: false }, &mut rng);
            state.plane.rect = Plane::new().rect; // keep the run alive
            let bound = MAX_VELOCITY * state.effects.velocity_scale();
            prop_assert!(state.plane.velocity.abs() <= bound + 1e-4);
        }
    }

    /// Entities drift left by exactly the scroll speed each frame, and
    /// disappear exactly when the right edge passes the left boundary.
    /// Uses a wind zone because nothing ever consumes one.
    #[test]
    fn scrolling_is_exact_until_cull(
        x0 in 0f32..900f32,
        y0 in 0f32..(WORLD_HEIGHT - WIND_HEIGHT),
    ) {
        let mut state = GameState::new(3);
        let mut rng = Pcg32::seed_from_u64(3);
        state.winds.push(WindZone {
            rect: Aabb::new(x0, y0, WIND_WIDTH, WIND_HEIGHT),
            kind: WindKind::Downdraft,
        });

        for k in 1..=200u32 {
            tick(&mut state, &TickInput::default(), &mut rng);
            state.plane = Plane::new();

            let expected_right = x0 + WIND_WIDTH - k as f32 * SCROLL_SPEED;
            if expected_right > 0.0 {
                prop_assert_eq!(state.winds[0].rect.right(), expected_right);
            } else {
                prop_assert!(state.winds.is_empty());
                break;
            }
        }
    }

    /// Oscillating obstacles never stray past the world edges by more than
    /// one step, and only ever reverse while touching an edge.
    #[test]
    fn oscillation_reverses_only_at_edges(
        y0 in 0f32..(WORLD_HEIGHT - OBSTACLE_HEIGHT),
        speed in OSCILLATE_SPEED_MIN..OSCILLATE_SPEED_MAX,
        downward in any::<bool>(),
    ) {
        let mut state = GameState::new(5);
        let mut rng = Pcg32::seed_from_u64(5);
        let dir = if downward { 1.0 } else { -1.0 };
        // Far enough right that it never reaches the plane within the run
        state.obstacles.push(Obstacle {
            rect: Aabb::new(820.0, y0, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            kind: ObstacleKind::Oscillating { dir, speed },
        });

        let mut prev_dir = dir;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), &mut rng);
            state.plane = Plane::new();

            let obstacle = &state.obstacles[0];
            let ObstacleKind::Oscillating { dir: now, .. } = obstacle.kind else {
                unreachable!();
            };
            prop_assert!(obstacle.rect.top() >= -speed - 1e-3);
            prop_assert!(obstacle.rect.bottom() <= WORLD_HEIGHT + speed + 1e-3);
            if now != prev_dir {
                prop_assert!(
                    obstacle.rect.top() <= 0.0 || obstacle.rect.bottom() >= WORLD_HEIGHT
                );
            }
            prev_dir = now;
        }
    }
}

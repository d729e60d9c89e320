use bubble_laser::compute::*;
use bubble_laser::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FIELD: Playfield = Playfield { width: 400.0, height: 800.0 };

fn make_state() -> GameState {
    GameState {
        status: RoundStatus::Running,
        ..init_state(FIELD, None)
    }
}

fn bubble(id: u32, x: f32, y: f32) -> Bubble {
    Bubble { id, x, y, radius: BUBBLE_RADIUS }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_state / begin_round / reset_round ────────────────────────────────────

#[test]
fn init_state_is_idle_and_centred() {
    let s = init_state(FIELD, None);
    assert_eq!(s.status, RoundStatus::Idle);
    assert_eq!(s.gun.width, GUN_WIDTH);
    assert_eq!(s.gun.position_x, 170.0); // 400/2 - 60/2
    assert_eq!(s.time_remaining, ROUND_SECONDS);
    assert_eq!(s.next_bubble_id, 1);
    assert!(s.bubbles.is_empty());
    assert!(!s.laser.visible);
}

#[test]
fn begin_round_clears_board_and_recentres_gun() {
    let mut s = make_state();
    s.status = RoundStatus::GameOver;
    s.bubbles.push(bubble(7, 0.0, 0.0));
    s.score = 12;
    s.time_remaining = 0;
    s.laser.visible = true;
    s.gun.position_x = 0.0;
    s.next_bubble_id = 8;

    let s2 = begin_round(&s);
    assert_eq!(s2.status, RoundStatus::Running);
    assert!(s2.bubbles.is_empty());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.time_remaining, ROUND_SECONDS);
    assert!(!s2.laser.visible);
    assert_eq!(s2.gun.position_x, 170.0);
    assert_eq!(s2.next_bubble_id, 1);
}

#[test]
fn reset_round_keeps_gun_where_it_was() {
    let mut s = make_state();
    s.gun.position_x = 12.0;
    s.bubbles.push(bubble(1, 0.0, 0.0));
    s.score = 3;

    let s2 = reset_round(&s);
    assert_eq!(s2.status, RoundStatus::Idle);
    assert_eq!(s2.gun.position_x, 12.0);
    assert!(s2.bubbles.is_empty());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.time_remaining, ROUND_SECONDS);
}

// ── Gun ───────────────────────────────────────────────────────────────────────

#[test]
fn gun_centres_on_pointer() {
    let s2 = reposition_gun(&make_state(), 100.0);
    assert_eq!(s2.gun.position_x, 70.0);
    assert_eq!(s2.gun.center_x(), 100.0);
}

#[test]
fn gun_clamps_at_both_edges() {
    let s = make_state();
    assert_eq!(reposition_gun(&s, -500.0).gun.position_x, 0.0);
    assert_eq!(reposition_gun(&s, 10.0).gun.position_x, 0.0);
    assert_eq!(reposition_gun(&s, 395.0).gun.position_x, 340.0);
    assert_eq!(reposition_gun(&s, 10_000.0).gun.position_x, 340.0);
}

#[test]
fn gun_clamp_always_lands_inside_interval() {
    let max = FIELD.width - GUN_WIDTH;
    let mut x = -1_000.0;
    while x <= 1_500.0 {
        let left = clamp_gun_x(x, GUN_WIDTH, &FIELD);
        assert!((0.0..=max).contains(&left), "x={x} gave {left}");
        // Clamping an already-clamped position changes nothing.
        assert_eq!(clamp_gun_x(left + GUN_WIDTH / 2.0, GUN_WIDTH, &FIELD), left);
        x += 37.5;
    }
}

#[test]
fn gun_clamp_on_field_narrower_than_gun() {
    let tiny = Playfield { width: 40.0, height: 100.0 };
    assert_eq!(clamp_gun_x(300.0, GUN_WIDTH, &tiny), 0.0);
}

#[test]
fn reposition_does_not_mutate_original() {
    let s = make_state();
    let _ = reposition_gun(&s, 0.0);
    assert_eq!(s.gun.position_x, 170.0);
}

// ── spawn_bubble ──────────────────────────────────────────────────────────────

#[test]
fn spawn_places_bubble_above_bottom_edge() {
    let mut rng = seeded_rng();
    let s2 = spawn_bubble(&make_state(), &mut rng);
    assert_eq!(s2.bubbles.len(), 1);
    let b = &s2.bubbles[0];
    assert_eq!(b.id, 1);
    assert_eq!(b.y, 700.0); // 800 - 100
    assert_eq!(b.radius, BUBBLE_RADIUS);
    assert_eq!(s2.next_bubble_id, 2);
}

#[test]
fn spawn_x_stays_within_field() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..500 {
        s = spawn_bubble(&s, &mut rng);
    }
    let max = FIELD.width - 2.0 * BUBBLE_RADIUS;
    assert_eq!(s.bubbles.len(), 500);
    assert!(s.bubbles.iter().all(|b| b.x >= 0.0 && b.x <= max));
}

#[test]
fn spawn_ids_are_unique_and_increasing() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..5 {
        s = spawn_bubble(&s, &mut rng);
    }
    let ids: Vec<u32> = s.bubbles.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn spawn_is_deterministic_for_a_seed() {
    let a = spawn_bubble(&make_state(), &mut seeded_rng());
    let b = spawn_bubble(&make_state(), &mut seeded_rng());
    assert_eq!(a.bubbles, b.bubbles);
}

#[test]
fn spawn_respects_cap() {
    let mut rng = seeded_rng();
    let mut s = GameState {
        bubble_cap: Some(2),
        ..make_state()
    };
    for _ in 0..4 {
        s = spawn_bubble(&s, &mut rng);
    }
    assert_eq!(s.bubbles.len(), 2);
    assert_eq!(s.next_bubble_id, 3);
}

// ── advance_bubbles ───────────────────────────────────────────────────────────

#[test]
fn bubbles_rise_two_pixels_per_frame() {
    let mut s = make_state();
    s.bubbles = vec![bubble(1, 0.0, 700.0), bubble(2, 50.0, 10.0)];
    let s2 = advance_bubbles(&s);
    assert_eq!(s2.bubbles[0].y, 698.0);
    assert_eq!(s2.bubbles[1].y, 8.0);
    // x is untouched
    assert_eq!(s2.bubbles[1].x, 50.0);
}

#[test]
fn bubbles_past_top_are_culled() {
    let mut s = make_state();
    s.bubbles = vec![
        bubble(1, 0.0, -57.0), // → -59, stays
        bubble(2, 0.0, -58.0), // → -60, culled
        bubble(3, 0.0, -70.0), // already gone
    ];
    let s2 = advance_bubbles(&s);
    let ids: Vec<u32> = s2.bubbles.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(s2.bubbles[0].y, -59.0);
}

#[test]
fn advance_with_no_bubbles_is_noop() {
    let s = make_state();
    assert_eq!(advance_bubbles(&s), s);
}

// ── fire_laser ────────────────────────────────────────────────────────────────

#[test]
fn fire_hits_only_crossed_bubble() {
    let mut s = make_state();
    s.bubbles = vec![bubble(1, 0.0, 300.0), bubble(2, 100.0, 300.0)];
    let s2 = fire_laser(&s, 25.0);
    assert_eq!(s2.score, 1);
    assert_eq!(s2.bubbles.len(), 1);
    assert_eq!(s2.bubbles[0].id, 2);
    assert!(s2.laser.visible);
}

#[test]
fn fire_missing_everything_still_shows_laser() {
    let mut s = make_state();
    s.bubbles = vec![bubble(1, 0.0, 300.0), bubble(2, 100.0, 300.0)];
    let s2 = fire_laser(&s, 200.0);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.bubbles, s.bubbles);
    assert!(s2.laser.visible);
}

#[test]
fn fire_can_pop_several_at_once() {
    let mut s = make_state();
    s.score = 5;
    s.bubbles = vec![bubble(1, 0.0, 300.0), bubble(2, 10.0, 300.0)];
    let s2 = fire_laser(&s, 20.0);
    assert_eq!(s2.score, 7);
    assert!(s2.bubbles.is_empty());
}

#[test]
fn fire_ignores_height() {
    let mut s = make_state();
    s.bubbles = vec![bubble(1, 0.0, -50.0), bubble(2, 0.0, 699.0)];
    let s2 = fire_laser(&s, 30.0);
    assert_eq!(s2.score, 2);
}

#[test]
fn hit_boundary_is_inclusive() {
    let b = bubble(1, 0.0, 0.0); // spans 0..=60
    assert!(is_hit(&b, 0.0));
    assert!(is_hit(&b, 60.0));
    assert!(!is_hit(&b, 60.5));
    assert!(!is_hit(&b, -0.5));
}

#[test]
fn hide_laser_only_touches_laser() {
    let mut s = make_state();
    s.laser.visible = true;
    s.score = 3;
    let s2 = hide_laser(&s);
    assert!(!s2.laser.visible);
    assert_eq!(s2.score, 3);
}

// ── countdown ─────────────────────────────────────────────────────────────────

#[test]
fn countdown_decrements() {
    let s2 = countdown(&make_state());
    assert_eq!(s2.time_remaining, ROUND_SECONDS - 1);
    assert_eq!(s2.status, RoundStatus::Running);
}

#[test]
fn countdown_ends_round_at_zero() {
    let mut s = make_state();
    s.time_remaining = 1;
    let s2 = countdown(&s);
    assert_eq!(s2.time_remaining, 0);
    assert_eq!(s2.status, RoundStatus::GameOver);
}

#[test]
fn countdown_never_goes_negative() {
    let mut s = make_state();
    s.time_remaining = 0;
    let s2 = countdown(&s);
    assert_eq!(s2.time_remaining, 0);
    assert_eq!(s2.status, RoundStatus::GameOver);
}

#[test]
fn full_round_takes_exactly_round_seconds_ticks() {
    let mut s = make_state();
    for _ in 0..ROUND_SECONDS - 1 {
        s = countdown(&s);
        assert_eq!(s.status, RoundStatus::Running);
    }
    s = countdown(&s);
    assert_eq!(s.status, RoundStatus::GameOver);
}

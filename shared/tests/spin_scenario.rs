use std::time::{Duration, Instant};

use wheel_shared::{
    render_session, slice_under_pointer, SpinAnimator, Theme, WheelError, WheelSession,
    WheelState,
};

#[test]
fn two_songs_spin_end_to_end() {
    let mut wheel = WheelState::new();
    assert!(wheel.is_empty());

    wheel.add_entry("Song A", None, None).unwrap();
    wheel.add_entry("Song B", None, None).unwrap();
    assert_eq!(wheel.len(), 2);

    let winner = wheel.pick_winner().unwrap();
    assert!(winner == 0 || winner == 1);

    let plan = SpinAnimator::default().plan_spin(winner, 2, 3.5).unwrap();
    assert_eq!(plan.rotation_degrees % 360.0, 0.0);
    assert!(plan.rotation_degrees > 0.0);
    assert_eq!(plan.duration_seconds, 3.5);
}

#[test]
fn settled_wheel_shows_winner_under_pointer() {
    let theme = Theme::default();
    let mut session = WheelSession::default();
    for title in ["Kickoff", "Robot Game", "Innovation", "Core Values", "Finale"] {
        session.state_mut().add_entry(title, None, None).unwrap();
    }
    session.set_spin_duration_secs(2.0);

    let t0 = Instant::now();
    let plan = session.start_spin(t0).unwrap();
    let expected = session.state().entries()[plan.winner_index].id;

    let end = t0 + Duration::from_secs_f64(plan.duration_seconds);
    let winner = session.tick(end).unwrap();
    assert_eq!(winner.id, expected);

    let view = render_session(&session, &theme, end);
    let under = slice_under_pointer(view.slices.len(), view.rotation_degrees).unwrap();
    assert_eq!(view.slices[under].entry_id, Some(expected));
    assert!(view.slices[under].highlighted);
}

#[test]
fn management_errors_surface_as_values() {
    let mut wheel = WheelState::new();
    wheel.add_entry("Song A", None, None).unwrap();

    let err = wheel.add_entry("SONG A", None, None).unwrap_err();
    assert_eq!(err, WheelError::DuplicateTitle("SONG A".into()));
    assert_eq!(err.to_string(), "\"SONG A\" is already on the wheel");

    assert_eq!(
        wheel.pick_winner().unwrap_err().to_string(),
        "Add at least two songs to spin (have 1)"
    );
}

use super::*;

fn cfg(error_wait: u32, grace_frames: u32) -> CadenceConfig {
    CadenceConfig {
        error_wait,
        grace_frames,
    }
}

/// Confirm the prediction `n` times.
fn confirm(mut s: CadenceState, n: usize) -> CadenceState {
    for _ in 0..n {
        let p = s.predicted();
        s = s.apply_detection(Some(p)).0;
    }
    s
}

#[test]
fn fresh_state_is_unlocked() {
    let s = CadenceState::new(cfg(20, 1));
    assert!(!s.film_mode());
    assert_eq!(s.error_countdown(), 20);
    assert_eq!(s.phase(), Phase::AA);
    assert_eq!(s.predicted(), Phase::AB);
    assert_eq!(s.grace(), 0);
}

#[test]
fn default_config_matches_player_defaults() {
    let c = CadenceConfig::default();
    assert_eq!(c.error_wait, 60);
    assert_eq!(c.grace_frames, 1);
    assert!(c.validate().is_ok());
    assert!(cfg(0, 1).validate().is_err());
}

#[test]
fn countdown_reaches_film_mode_exactly_once() {
    let s = confirm(CadenceState::new(cfg(3, 1)), 2);
    assert!(!s.film_mode());
    let p = s.predicted();
    let (s, d) = s.apply_detection(Some(p));
    assert!(d.film_mode && d.film_mode_changed);
    assert_eq!(d.observation, Observation::Predicted);
    assert_eq!(s.grace(), 1);

    let p = s.predicted();
    let (_, d) = s.apply_detection(Some(p));
    assert!(d.film_mode && !d.film_mode_changed);
}

#[test]
fn one_surprise_is_absorbed() {
    let s = confirm(CadenceState::new(cfg(3, 1)), 5);
    assert!(s.film_mode());
    let predicted = s.predicted();
    let wrong = predicted.next().next();

    let (s, d) = s.apply_detection(Some(wrong));
    assert_eq!(
        d.observation,
        Observation::Surprise {
            detected: wrong,
            absorbed: true
        }
    );
    assert_eq!(d.phase, predicted);
    assert!(d.film_mode && !d.film_mode_changed);
    assert_eq!(s.grace(), 0);

    // A confirmed field re-arms the tolerance.
    let s = confirm(s, 1);
    assert_eq!(s.grace(), 1);
}

#[test]
fn two_consecutive_surprises_exit_film_mode() {
    let s = confirm(CadenceState::new(cfg(3, 1)), 5);
    let wrong = s.predicted().next();
    let (s, d1) = s.apply_detection(Some(wrong));
    assert!(d1.film_mode);

    let wrong = s.predicted().next();
    let (s, d2) = s.apply_detection(Some(wrong));
    assert_eq!(
        d2.observation,
        Observation::Surprise {
            detected: wrong,
            absorbed: false
        }
    );
    assert!(!d2.film_mode && d2.film_mode_changed);
    assert_eq!(s.phase(), wrong);
    assert_eq!(s.error_countdown(), 3);
}

#[test]
fn no_match_drops_the_lock_and_keeps_a_valid_phase() {
    let s = confirm(CadenceState::new(cfg(3, 2)), 5);
    let predicted = s.predicted();
    let (s, d) = s.apply_detection(None);
    assert_eq!(d.observation, Observation::NoMatch);
    assert!(!d.film_mode && d.film_mode_changed);
    assert_eq!(s.phase(), predicted);
    assert_eq!(s.grace(), 0);
    assert_eq!(s.error_countdown(), 3);
}

#[test]
fn surprise_before_lock_restarts_the_countdown() {
    let s = confirm(CadenceState::new(cfg(5, 1)), 3);
    assert_eq!(s.error_countdown(), 2);
    let wrong = s.predicted().next();
    let (s, d) = s.apply_detection(Some(wrong));
    assert!(!d.film_mode && !d.film_mode_changed);
    assert_eq!(s.error_countdown(), 5);
}

#[test]
fn reset_clears_lock_and_history() {
    let mut s = CadenceState::new(cfg(2, 1));
    for _ in 0..4 {
        s = s.observe(7, 7).0;
    }
    let r = s.reset();
    assert!(!r.film_mode());
    assert_eq!(r.error_countdown(), 2);
    assert_eq!(r.history(), &CadenceHistory::new());
    assert_eq!(r.config(), s.config());
}

#[test]
fn observe_does_not_mutate_the_receiver() {
    let s = CadenceState::default();
    let before = s;
    let (next, _) = s.observe(100, 5);
    assert_eq!(s, before);
    assert_ne!(next.history().position(), s.history().position());
}

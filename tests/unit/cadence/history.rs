use super::*;

const SMALL: u64 = 10;
const BIG: u64 = 5000;

fn sample(i: usize) -> (u64, u64) {
    let i = i % 5;
    (
        if TFF_TOP[i] { SMALL } else { BIG },
        if TFF_BOT[i] { SMALL } else { BIG },
    )
}

#[test]
fn position_wraps_within_ring() {
    let mut h = CadenceHistory::new();
    for n in 0..12 {
        assert_eq!(h.position(), n % HISTORY_SIZE);
        h.detect(1, 1, true, Phase::AA);
    }
}

fn primed() -> CadenceHistory {
    let mut h = CadenceHistory::new();
    for i in 0..10 {
        let (t, b) = sample(i);
        h.detect(t, b, true, Phase::AA);
    }
    h
}

#[test]
fn steady_cadence_keeps_the_prediction_when_valid() {
    let mut h = primed();
    let (t, b) = sample(10);
    let d = h.detect(t, b, true, Phase::AA);
    assert_eq!(
        d.valid.iter().collect::<Vec<_>>(),
        vec![Phase::AA, Phase::AB, Phase::BC]
    );
    assert_eq!(d.chosen, Some(Phase::AA));
}

#[test]
fn bottom_repeat_position_isolates_cc() {
    let mut h = primed();
    for i in 10..13 {
        let (t, b) = sample(i);
        h.detect(t, b, true, Phase::from_index(i % 5).unwrap());
    }
    let (t, b) = sample(13);
    let d = h.detect(t, b, true, Phase::CC);
    assert_eq!(d.valid.iter().collect::<Vec<_>>(), vec![Phase::CC]);
    assert_eq!(d.chosen, Some(Phase::CC));
}

#[test]
fn unexpected_prediction_falls_back_to_lowest_valid() {
    let mut h = primed();
    for i in 10..14 {
        let (t, b) = sample(i);
        h.detect(t, b, true, Phase::from_index(i % 5).unwrap());
    }
    let (t, b) = sample(14);
    let mut again = h;
    assert_eq!(h.detect(t, b, true, Phase::DD).chosen, Some(Phase::DD));

    let d = again.detect(t, b, true, Phase::AA);
    assert!(!d.valid.contains(Phase::AA));
    assert_eq!(d.chosen, Some(Phase::AB));
}

#[test]
fn bottom_field_first_swaps_templates() {
    let mut h = CadenceHistory::new();
    // A top-field-first cadence with the fields exchanged.
    for i in 0..13 {
        let (t, b) = sample(i);
        h.detect(b, t, false, Phase::AA);
    }
    let (t, b) = sample(13);
    let d = h.detect(b, t, false, Phase::AA);
    assert_eq!(d.valid.iter().collect::<Vec<_>>(), vec![Phase::CC]);
}

#[test]
fn extreme_magnitudes_do_not_overflow() {
    let mut h = CadenceHistory::new();
    for _ in 0..7 {
        h.detect(u64::MAX, u64::MAX, true, Phase::CC);
    }
    // Three equal samples: every sample sits at the mean, so every phase fits.
    let d = h.detect(u64::MAX, u64::MAX, true, Phase::CC);
    assert_eq!(d.valid.bits(), 0x1f);
    assert_eq!(d.chosen, Some(Phase::CC));
    h.detect(0, u64::MAX, true, Phase::AA);
}

#[test]
fn some_phase_is_always_consistent_with_three_samples() {
    let mut h = CadenceHistory::new();
    let mut x = 0x9e37_79b9_7f4a_7c15u64;
    for _ in 0..500 {
        x = x
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let t = x >> 7;
        x = x
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let b = x >> 3;
        assert!(!h.detect(t, b, true, Phase::AA).valid.is_empty());
    }
}

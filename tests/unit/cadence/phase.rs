use super::*;

#[test]
fn one_hot_encoding() {
    let bits: Vec<u8> = Phase::ALL.iter().map(|p| p.bit()).collect();
    assert_eq!(bits, vec![1, 2, 4, 8, 16]);
    assert_eq!(Phase::from_bit(8), Some(Phase::CC));
    assert_eq!(Phase::from_bit(0), None);
    assert_eq!(Phase::from_bit(3), None);
    assert_eq!(Phase::from_bit(32), None);
}

#[test]
fn next_wraps_after_dd() {
    assert_eq!(Phase::AA.next(), Phase::AB);
    assert_eq!(Phase::CC.next(), Phase::DD);
    assert_eq!(Phase::DD.next(), Phase::AA);
}

#[test]
fn source_table() {
    use FieldSource::{Current, Previous};
    let table: Vec<_> = Phase::ALL
        .iter()
        .map(|p| (p.source(false), p.source(true)))
        .collect();
    assert_eq!(
        table,
        vec![
            (Previous, Current),
            (Previous, Previous),
            (Current, Previous),
            (Current, Current),
            (Previous, Current),
        ]
    );
}

#[test]
fn drop_table_shows_four_of_ten_fields() {
    let table: Vec<_> = Phase::ALL
        .iter()
        .map(|p| (p.drops(false), p.drops(true)))
        .collect();
    assert_eq!(
        table,
        vec![
            (true, false),
            (true, true),
            (false, true),
            (false, true),
            (true, false),
        ]
    );
    let shown = table
        .iter()
        .map(|(t, b)| usize::from(!t) + usize::from(!b))
        .sum::<usize>();
    assert_eq!(shown, 4);
}

#[test]
fn phase_set_orders_members() {
    let set: PhaseSet = [Phase::DD, Phase::AB].into_iter().collect();
    assert_eq!(set.bits(), 2 | 16);
    assert_eq!(set.first(), Some(Phase::AB));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![Phase::AB, Phase::DD]);
    assert!(!set.contains(Phase::AA));
    assert!(PhaseSet::EMPTY.is_empty());
    assert_eq!(PhaseSet::EMPTY.first(), None);
}

#[test]
fn display_names() {
    assert_eq!(Phase::BC.to_string(), "BC");
}

use super::*;

#[test]
fn geometry_rejects_degenerate_sizes() {
    assert!(Geometry::new(0, 480).is_err());
    assert!(Geometry::new(720, 1).is_err());
    let g = Geometry::new(720, 480).unwrap();
    assert_eq!(g.row_bytes(), 1440);
}

#[test]
fn required_len_ignores_trailing_stride_padding() {
    assert_eq!(required_len(32, 8, 0), 0);
    assert_eq!(required_len(32, 8, 1), 16);
    assert_eq!(required_len(32, 8, 3), 80);
}

#[test]
fn slot_check_reports_short_buffers() {
    let data = vec![0u8; 16 * 3];
    let slot = FrameSlot::new(&data, 16);
    assert!(slot.check("current frame", 8, 3).is_ok());

    let err = slot.check("current frame", 8, 4).unwrap_err();
    assert!(matches!(err, DeinterlaceError::GeometryMismatch(_)));
    assert!(err.to_string().contains("current frame"));

    let narrow = FrameSlot::new(&data, 8);
    assert!(narrow.check("previous frame", 8, 2).is_err());
}

#[test]
fn slot_row_starts_at_stride_offsets() {
    let data: Vec<u8> = (0..24).collect();
    let slot = FrameSlot::new(&data, 8);
    assert_eq!(slot.row(0)[0], 0);
    assert_eq!(slot.row(2)[0], 16);
    assert_eq!(slot.row(2).len(), 8);
}

#[test]
fn single_history_repeats_current() {
    let data = vec![7u8; 32];
    let h = FieldHistory::single(FrameSlot::new(&data, 8).with_progressive(true));
    assert!(h.previous.progressive);
    assert!(std::ptr::eq(h.current.data, h.second_previous.data));
    assert!(h.check(4, 4).is_ok());
}

#[test]
fn output_check_and_rows() {
    let mut out = vec![0u8; 20];
    assert!(check_output(&out, 10, 4, 2).is_ok());
    assert!(check_output(&out, 10, 4, 3).is_err());
    assert!(check_output(&out, 6, 4, 1).is_err());
    out_row(&mut out, 10, 1, 4).fill(9);
    assert_eq!(&out[10..18], &[9; 8]);
    assert_eq!(out[18], 0);
}

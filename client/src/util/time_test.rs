use super::*;

#[test]
fn format_date_takes_date_part() {
    assert_eq!(format_date(Some("2024-05-01T10:00:00.000Z")), "2024-05-01");
    assert_eq!(format_date(Some("2024-05-01")), "2024-05-01");
}

#[test]
fn format_date_missing_is_dash() {
    assert_eq!(format_date(None), "-");
    assert_eq!(format_date(Some("  ")), "-");
}

#[test]
fn format_timestamp_drops_fraction_and_zone() {
    assert_eq!(format_timestamp(Some("2024-05-01T10:00:00.123Z")), "2024-05-01 10:00:00");
    assert_eq!(format_timestamp(Some("2024-05-01T10:00:00Z")), "2024-05-01 10:00:00");
    assert_eq!(format_timestamp(Some("2024-05-01T10:00:00+02:00")), "2024-05-01 10:00:00");
}

#[test]
fn format_timestamp_drops_negative_offset() {
    assert_eq!(format_timestamp(Some("2024-05-01T10:00:00-05:00")), "2024-05-01 10:00:00");
    assert_eq!(format_timestamp(Some("2024-05-01T10:00:00.500-05:00")), "2024-05-01 10:00:00");
}

#[test]
fn format_date_ignores_offset() {
    assert_eq!(format_date(Some("2024-05-01T23:30:00-05:00")), "2024-05-01");
}

#[test]
fn format_timestamp_passes_through_unknown_shapes() {
    assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    assert_eq!(format_timestamp(None), "-");
}

#[test]
fn now_iso_is_unavailable_natively() {
    assert_eq!(now_iso(), None);
}

use super::*;

#[test]
fn currency_uses_dot_grouping_and_comma_decimals() {
    assert_eq!(format_currency(6302.07), "R$ 6.302,07");
    assert_eq!(format_currency(3.19), "R$ 3,19");
    assert_eq!(format_currency(0.0), "R$ 0,00");
    assert_eq!(format_currency(1_234_567.5), "R$ 1.234.567,50");
}

#[test]
fn negative_currency_keeps_sign_in_front() {
    assert_eq!(format_currency(-12.3), "-R$ 12,30");
    assert_eq!(format_currency(-0.001), "R$ 0,00");
}

#[test]
fn integers_group_by_thousands() {
    assert_eq!(format_integer(0), "0");
    assert_eq!(format_integer(999), "999");
    assert_eq!(format_integer(1973), "1.973");
    assert_eq!(format_integer(137_567), "137.567");
    assert_eq!(format_integer(12_345_678), "12.345.678");
}

#[test]
fn percentages_trim_trailing_zeros() {
    assert_eq!(format_percent(28.0 / 1973.0 * 100.0), "1,42%");
    assert_eq!(format_percent(5.0), "5%");
    assert_eq!(format_percent(17.5), "17,5%");
    assert_eq!(format_percent(0.0), "0%");
}

#[test]
fn non_finite_values_render_as_zero() {
    assert_eq!(format_currency(f64::NAN), "R$ 0,00");
    assert_eq!(format_percent(f64::INFINITY), "0%");
}

#[test]
fn ratio_guards_zero_denominator() {
    assert_eq!(ratio(10.0, 0.0), 0.0);
    assert_eq!(ratio(10.0, 4.0), 2.5);
    assert_eq!(round_to(0.029_99, 4), 0.03);
}

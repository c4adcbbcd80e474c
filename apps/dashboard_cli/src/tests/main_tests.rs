use super::Args;

use chrono::NaiveDate;
use clap::Parser;
use shared::domain::{AccountId, ClientId, DateRange, FilterDimension};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, 18).expect("date")
}

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("dashboard_cli").chain(argv.iter().copied()))
        .expect("args")
}

#[test]
fn builds_ready_filter_state_from_flags() {
    let args = parse(&[
        "--client",
        "acme",
        "--meta-account",
        "act_1",
        "--meta-account",
        "act_2",
        "--google-account",
        "123-456-7890",
        "--from",
        "2024-04-01",
        "--to",
        "2024-04-15",
    ]);

    let filters = args.filter_state(today()).expect("filters");

    assert_eq!(filters.client_id(), Some(&ClientId::new("acme")));
    assert_eq!(filters.selected_accounts().len(), 3);
    assert!(filters
        .selected_accounts()
        .google
        .contains(&AccountId::new("123-456-7890")));
    assert_eq!(
        filters.date_range(),
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).expect("date"),
            NaiveDate::from_ymd_opt(2024, 4, 15).expect("date"),
        )
    );
    assert!(filters.is_ready_to_fetch());
}

#[test]
fn range_defaults_to_month_to_date() {
    let filters = parse(&[]).filter_state(today()).expect("filters");
    assert_eq!(filters.date_range(), DateRange::month_to_date(today()));
    assert!(filters.compare_range().is_none());
    assert!(!filters.is_ready_to_fetch());
}

#[test]
fn compare_range_needs_both_ends() {
    let result = Args::try_parse_from(["dashboard_cli", "--compare-from", "2024-03-01"]);
    assert!(result.is_err());

    let filters = parse(&["--compare-from", "2024-03-01", "--compare-to", "2024-03-31"])
        .filter_state(today())
        .expect("filters");
    assert!(filters.compare_range().is_some());
}

#[test]
fn inverted_range_is_rejected() {
    let args = parse(&["--from", "2024-04-10", "--to", "2024-04-01"]);
    assert!(args.filter_state(today()).is_err());
}

#[test]
fn malformed_date_fails_to_parse() {
    assert!(Args::try_parse_from(["dashboard_cli", "--from", "01/04/2024"]).is_err());
}

#[test]
fn filter_flags_set_named_selections() {
    let filters = parse(&["--filter", "campaign=Prospecting", "--filter", "objective=Leads"])
        .filter_state(today())
        .expect("filters");

    assert_eq!(
        filters.active_filter().get(FilterDimension::Campaign),
        "Prospecting"
    );
    assert_eq!(
        filters.active_filter().get(FilterDimension::Objective),
        "Leads"
    );
    assert_eq!(
        filters.active_filter().get(FilterDimension::AdSet),
        FilterDimension::AdSet.all_sentinel()
    );
}

#[test]
fn unknown_filter_dimension_fails_to_parse() {
    assert!(Args::try_parse_from(["dashboard_cli", "--filter", "audience=all"]).is_err());
}

use finproj_core::amortization::{
    aggregate_yearly, derive_monthly_payment, generate_schedule, project_loan, LoanParameters,
    MAX_PERIODS,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reference loans
// ===========================================================================

fn mortgage_250k() -> LoanParameters {
    LoanParameters {
        principal: dec!(250_000),
        annual_interest_rate_percent: dec!(3.5),
        initial_amortization_rate_percent: dec!(2.0),
        equity: dec!(50_000),
        first_payment_date: None,
    }
}

fn mortgage_300k() -> LoanParameters {
    LoanParameters {
        principal: dec!(300_000),
        annual_interest_rate_percent: dec!(4.2),
        initial_amortization_rate_percent: dec!(3),
        equity: Decimal::ZERO,
        first_payment_date: None,
    }
}

#[test]
fn test_reference_mortgage_first_month() {
    // 250000 * 5.5 / 100 / 12 = 1145.8333 -> 1145.83
    assert_eq!(derive_monthly_payment(dec!(250_000), dec!(3.5), dec!(2.0)), dec!(1145.83));

    let schedule = generate_schedule(&mortgage_250k());
    // interest = 250000 * 0.035 / 12 = 729.1666 -> 729.17
    assert_eq!(schedule[0].interest_portion, dec!(729.17));
    assert_eq!(schedule[0].principal_portion, dec!(416.66));
    assert_eq!(schedule[0].remaining_balance, dec!(249583.34));
}

#[test]
fn test_mortgage_300k_full_schedule() {
    let schedule = generate_schedule(&mortgage_300k());
    assert_eq!(schedule.len(), 251);

    // 4.2% / 12 = 0.35% exactly, so the first split is exact
    assert_eq!(schedule[0].interest_portion, dec!(1050.00));
    assert_eq!(schedule[0].principal_portion, dec!(750.00));
    assert_eq!(schedule[1].interest_portion, dec!(1047.38));
    assert_eq!(schedule[1].remaining_balance, dec!(298497.38));

    let last = schedule.last().unwrap();
    assert_eq!(last.month, 251);
    assert_eq!(last.year, 21);
    assert_eq!(last.interest_portion, dec!(3.59));
    assert_eq!(last.principal_portion, dec!(1025.68));
    assert_eq!(last.total_payment, dec!(1029.27));
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_mortgage_300k_yearly_aggregation() {
    let yearly = aggregate_yearly(&generate_schedule(&mortgage_300k()));
    assert_eq!(yearly.len(), 21);

    assert_eq!(yearly[0].interest_portion, dec!(12424.70));
    assert_eq!(yearly[0].principal_portion, dec!(9175.30));
    assert_eq!(yearly[0].total_payment, dec!(21600.00));
    assert_eq!(yearly[0].remaining_balance, dec!(290824.70));

    assert_eq!(yearly[1].interest_portion, dec!(12031.85));
    assert_eq!(yearly[1].remaining_balance, dec!(281256.55));

    let last = &yearly[20];
    assert_eq!(last.year, 21);
    assert_eq!(last.months, 11);
    assert_eq!(last.interest_portion, dec!(380.52));
    assert_eq!(last.principal_portion, dec!(18648.75));
    assert_eq!(last.total_payment, dec!(19029.27));
}

#[test]
fn test_mortgage_300k_totals() {
    let output = project_loan(&mortgage_300k()).unwrap();
    let summary = &output.result.summary;
    assert_eq!(summary.total_interest, dec!(151029.27));
    assert_eq!(summary.total_principal, dec!(300000.00));
    assert_eq!(summary.total_paid, dec!(451029.27));
    assert_eq!(summary.number_of_payments, 251);
    assert_eq!((summary.payoff_years, summary.payoff_months), (20, 11));
    assert!(summary.fully_amortized);
    assert_eq!(summary.equity_ratio_percent, Decimal::ZERO);
}

#[test]
fn test_yearly_sums_match_monthly_rows() {
    let schedule = generate_schedule(&mortgage_250k());
    let yearly = aggregate_yearly(&schedule);

    for year in &yearly {
        let months: Vec<_> = schedule.iter().filter(|m| m.year == year.year).collect();
        let interest: Decimal = months.iter().map(|m| m.interest_portion).sum();
        let principal: Decimal = months.iter().map(|m| m.principal_portion).sum();
        let total: Decimal = months.iter().map(|m| m.total_payment).sum();
        assert_eq!(year.months as usize, months.len());
        assert_eq!(year.interest_portion, interest);
        assert_eq!(year.principal_portion, principal);
        assert_eq!(year.total_payment, total);
        assert_eq!(year.remaining_balance, months.last().unwrap().remaining_balance);
    }
}

#[test]
fn test_zero_principal_is_empty_not_an_error() {
    let mut params = mortgage_250k();
    params.principal = Decimal::ZERO;
    assert_eq!(generate_schedule(&params), vec![]);
    assert!(project_loan(&params).is_err());
}

#[test]
fn test_non_amortizing_loan_is_truncated_at_ceiling() {
    let mut params = mortgage_250k();
    params.initial_amortization_rate_percent = Decimal::ZERO;

    let schedule = generate_schedule(&params);
    assert_eq!(schedule.len(), MAX_PERIODS as usize);
    assert!(schedule.last().unwrap().remaining_balance > Decimal::ZERO);

    let output = project_loan(&params).unwrap();
    assert!(!output.result.summary.fully_amortized);
    assert_eq!(output.result.yearly_schedule.len(), 100);
    assert_eq!(output.warnings.len(), 1);
}

#[test]
fn test_dated_schedule_serializes_payment_dates() {
    let mut params = mortgage_250k();
    params.first_payment_date = NaiveDate::from_ymd_opt(2025, 3, 1);
    let output = project_loan(&params).unwrap();

    let json = serde_json::to_value(&output).unwrap();
    let first = &json["result"]["monthly_schedule"][0];
    assert_eq!(first["payment_date"], "2025-03-01");
    assert_eq!(first["total_payment"], "1145.83");
    assert_eq!(json["result"]["monthly_schedule"][347]["payment_date"], "2054-02-01");

    // Undated schedules omit the field entirely
    let plain = serde_json::to_value(project_loan(&mortgage_250k()).unwrap()).unwrap();
    assert!(plain["result"]["monthly_schedule"][0].get("payment_date").is_none());
}

#[test]
fn test_loan_parameters_accept_nominal_rate_alias() {
    let params: LoanParameters = serde_json::from_value(serde_json::json!({
        "principal": 250000,
        "nominal_annual_interest_rate": 3.5,
        "initial_amortization_rate": 2.0
    }))
    .unwrap();
    assert_eq!(params.annual_interest_rate_percent, dec!(3.5));
    assert_eq!(params.initial_amortization_rate_percent, dec!(2));
    assert_eq!(params.equity, Decimal::ZERO);
    assert_eq!(params.first_payment_date, None);
}

use finproj_core::growth::{generate_growth_schedule, project_savings, GrowthParameters};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn etf_plan(years: i32) -> GrowthParameters {
    GrowthParameters {
        initial_balance: dec!(10_000),
        monthly_contribution: dec!(500),
        annual_return_rate_percent: dec!(7.0),
        years,
    }
}

#[test]
fn test_one_year_plan_step_by_step() {
    // Closed-form annuity maths lands elsewhere; the cent-by-cent
    // simulation is the reference.
    let y1 = &generate_growth_schedule(&etf_plan(1))[0];
    assert_eq!(y1.start_balance, dec!(10000.00));
    assert_eq!(y1.invested_this_year, dec!(6000.00));
    assert_eq!(y1.interest_earned_this_year, dec!(890.15));
    assert_eq!(y1.end_balance, dec!(16890.15));
}

#[test]
fn test_thirty_year_contribution_only_plan() {
    let params = GrowthParameters {
        initial_balance: Decimal::ZERO,
        monthly_contribution: dec!(250),
        annual_return_rate_percent: dec!(5),
        years: 30,
    };
    let schedule = generate_growth_schedule(&params);
    assert_eq!(schedule.len(), 30);

    assert_eq!(schedule[0].start_balance, dec!(0.00));
    assert_eq!(schedule[0].interest_earned_this_year, dec!(68.14));
    assert_eq!(schedule[0].end_balance, dec!(3068.14));
    assert_eq!(schedule[1].interest_earned_this_year, dec!(221.54));
    assert_eq!(schedule[1].end_balance, dec!(6289.68));
    assert_eq!(schedule[2].end_balance, dec!(9672.31));

    assert_eq!(schedule[28].end_balance, dec!(191215.05));
    let last = &schedule[29];
    assert_eq!(last.interest_earned_this_year, dec!(9628.92));
    assert_eq!(last.end_balance, dec!(203843.97));
    assert_eq!(last.cumulative_invested, dec!(90000.00));
    assert_eq!(last.cumulative_interest, dec!(113843.97));
}

#[test]
fn test_cumulative_columns_add_up() {
    let schedule = generate_growth_schedule(&etf_plan(10));
    let mut invested = dec!(10_000);
    let mut interest = Decimal::ZERO;
    for year in &schedule {
        invested += year.invested_this_year;
        interest += year.interest_earned_this_year;
        assert_eq!(year.cumulative_invested, invested);
        assert_eq!(year.cumulative_interest, interest);
        assert_eq!(
            year.end_balance,
            year.start_balance + year.invested_this_year + year.interest_earned_this_year
        );
    }
}

#[test]
fn test_zero_years_is_empty_not_an_error() {
    assert_eq!(generate_growth_schedule(&etf_plan(0)), vec![]);
    assert!(project_savings(&etf_plan(0)).is_err());
}

#[test]
fn test_savings_output_envelope() {
    let output = project_savings(&etf_plan(10)).unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert_eq!(json["result"]["summary"]["final_balance"], "105197.38");
    assert_eq!(json["result"]["yearly_schedule"].as_array().unwrap().len(), 10);
    assert_eq!(json["assumptions"]["years"], 10);
    assert!(json["methodology"].as_str().unwrap().contains("monthly"));
    assert_eq!(json["metadata"]["version"], env!("CARGO_PKG_VERSION"));
}

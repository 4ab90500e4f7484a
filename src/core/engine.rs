use super::types::{Projection, ProjectionYear, Scenario};

pub const PROJECTION_YEARS: u32 = 10;
pub const FLAT_TAX_RATE: f64 = 0.20;
pub const POST_PLATEAU_GROWTH: f64 = 0.02;
const MONTHS_PER_YEAR: u32 = 12;

pub fn project(scenario: &Scenario) -> Projection {
    let debt_at_graduation = debt_at_graduation(scenario);
    let monthly_payment = amortized_monthly_payment(
        debt_at_graduation,
        scenario.loan_rate,
        scenario.loan_repayment_years,
    );
    let monthly_rate = scenario.loan_rate / f64::from(MONTHS_PER_YEAR);

    let mut debt = scenario.current_debt;
    let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);
    for year in 1..=PROJECTION_YEARS {
        let is_school = scenario.is_school_year(year);
        let years_post_grad = f64::from(year) - scenario.years_in_school;

        let (income, annual_debt_payment) = if is_school {
            debt = accrue_study_year(debt, scenario);
            (scenario.annual_income_while_studying, 0.0)
        } else {
            debt = apply_repayment_year(debt, monthly_rate, monthly_payment);
            (
                salary_after_graduation(scenario, years_post_grad),
                monthly_payment * f64::from(MONTHS_PER_YEAR),
            )
        };

        let after_tax_income = income - (income * FLAT_TAX_RATE).max(0.0);
        let debt_to_income_ratio = if income > 0.0 {
            annual_debt_payment / income * 100.0
        } else {
            0.0
        };
        let monthly_surplus = after_tax_income / f64::from(MONTHS_PER_YEAR)
            - (scenario.monthly_expenses + monthly_payment);
        let earned_since_graduation = if is_school {
            0.0
        } else {
            after_tax_income * years_post_grad
        };
        let net_worth = earned_since_graduation - debt.max(0.0);

        years.push(ProjectionYear {
            year,
            is_school,
            debt: round_half_up(debt.max(0.0)),
            salary: round_half_up(income),
            monthly_debt_payment: round_half_up(monthly_payment),
            annual_debt_payment: round_half_up(annual_debt_payment),
            debt_to_income_ratio: round_to_tenth(debt_to_income_ratio),
            monthly_surplus: round_half_up(monthly_surplus),
            net_worth: round_half_up(net_worth),
        });
    }

    Projection {
        debt_at_graduation,
        monthly_debt_payment: monthly_payment,
        years,
    }
}

pub fn debt_at_graduation(scenario: &Scenario) -> f64 {
    let mut debt = scenario.current_debt;
    let mut year = 1;
    while scenario.is_school_year(year) {
        debt = accrue_study_year(debt, scenario);
        year += 1;
    }
    debt
}

pub fn amortized_monthly_payment(principal: f64, annual_rate: f64, years: u32) -> f64 {
    let monthly_rate = annual_rate / f64::from(MONTHS_PER_YEAR);
    let months = years.saturating_mul(MONTHS_PER_YEAR);
    if principal <= 0.0 || monthly_rate <= 0.0 || months == 0 {
        return 0.0;
    }

    // P * r * (1 + r)^n / ((1 + r)^n - 1)
    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

// Deficit first, then interest on the grown balance.
fn accrue_study_year(debt: f64, scenario: &Scenario) -> f64 {
    let deficit =
        (scenario.annual_school_expenses() - scenario.annual_income_while_studying).max(0.0);
    let debt = debt + deficit;
    debt + debt * scenario.loan_rate
}

fn apply_repayment_year(mut debt: f64, monthly_rate: f64, monthly_payment: f64) -> f64 {
    for _ in 0..MONTHS_PER_YEAR {
        debt += debt * monthly_rate;
        debt = (debt - monthly_payment).max(0.0);
    }
    debt
}

pub fn salary_after_graduation(scenario: &Scenario, years_post_grad: f64) -> f64 {
    let start = scenario.start_salary;
    let plateau = scenario.salary_5yr;
    if years_post_grad <= 5.0 {
        start + (plateau - start) * (years_post_grad - 1.0) / 4.0
    } else {
        plateau + plateau * POST_PLATEAU_GROWTH * (years_post_grad - 5.0)
    }
}

// -2.5 rounds to -2.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) as f64 / 10.0
}

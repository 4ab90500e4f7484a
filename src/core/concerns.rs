use std::fmt;
use std::str::FromStr;

use super::engine::round_half_up;
use super::types::{
    ConcernKind, ConcernResult, JobGrowth, Projection, ProjectionYear, Scenario, UnknownConcernId,
};

pub const DEBT_TO_INCOME_LIMIT: f64 = 20.0;
pub const SCHOOL_SHORTFALL_LIMIT: i64 = -500;
pub const ENTRY_SALARY_FLOOR: i64 = 50_000;
pub const RESIDUAL_DEBT_LIMIT: i64 = 5_000;
pub const EDUCATION_COST_SALARY_SHARE: f64 = 0.4;
/// Monthly per-dependent figure quoted in the dependent evidence line.
pub const DEPENDENT_EVIDENCE_MONTHLY: u32 = 600;

#[derive(Debug, Clone, Copy)]
pub struct ConcernContext<'a> {
    pub scenario: &'a Scenario,
    pub projection: &'a Projection,
    pub first_job: Option<&'a ProjectionYear>,
}

impl<'a> ConcernContext<'a> {
    pub fn new(scenario: &'a Scenario, projection: &'a Projection) -> Self {
        Self {
            scenario,
            projection,
            first_job: projection.first_post_grad_year(),
        }
    }

    fn first_job_salary(&self) -> i64 {
        self.first_job.map_or(0, |y| y.salary)
    }
}

impl ConcernKind {
    pub const ALL: [ConcernKind; 8] = [
        ConcernKind::DebtBurden,
        ConcernKind::SchoolDeficit,
        ConcernKind::DependentBurden,
        ConcernKind::ExtendedDebt,
        ConcernKind::JobMarket,
        ConcernKind::HighEducationCost,
        ConcernKind::LocationSalaryMismatch,
        ConcernKind::NoWorkIncome,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConcernKind::DebtBurden => "debt_burden",
            ConcernKind::SchoolDeficit => "school_deficit",
            ConcernKind::DependentBurden => "dependent_burden",
            ConcernKind::ExtendedDebt => "extended_debt",
            ConcernKind::JobMarket => "job_market",
            ConcernKind::HighEducationCost => "high_education_cost",
            ConcernKind::LocationSalaryMismatch => "location_salary_mismatch",
            ConcernKind::NoWorkIncome => "no_work_income",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ConcernKind::DebtBurden => "High Debt-to-Income Ratio",
            ConcernKind::SchoolDeficit => "Monthly Deficit During School",
            ConcernKind::DependentBurden => "Supporting Dependents on Entry Salary",
            ConcernKind::ExtendedDebt => "Debt Extends Beyond 10 Years",
            ConcernKind::JobMarket => "Weak Job Market for This Career",
            ConcernKind::HighEducationCost => "High Education Cost Relative to Starting Salary",
            ConcernKind::LocationSalaryMismatch => "Salary May Not Match Cost of Living",
            ConcernKind::NoWorkIncome => "No Income During School",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ConcernKind::DebtBurden => "Debt payments consume too much of monthly income",
            ConcernKind::SchoolDeficit => "Expenses exceed income while studying",
            ConcernKind::DependentBurden => "Dependent costs too high relative to starting income",
            ConcernKind::ExtendedDebt => "Significant debt remaining after decade of repayment",
            ConcernKind::JobMarket => "Limited growth prospects in chosen field",
            ConcernKind::HighEducationCost => "Education expense is disproportionate to entry salary",
            ConcernKind::LocationSalaryMismatch => "Starting salary seems low for the location",
            ConcernKind::NoWorkIncome => "Full-time student with no part-time work",
        }
    }

    /// Whether the condition is mathematically present. Conditions that read
    /// the first salaried year are false when the timeline never leaves school.
    pub fn applies(self, ctx: &ConcernContext<'_>) -> bool {
        let scenario = ctx.scenario;
        match self {
            ConcernKind::DebtBurden => ctx
                .first_job
                .is_some_and(|y| y.debt_to_income_ratio > DEBT_TO_INCOME_LIMIT),
            ConcernKind::SchoolDeficit => ctx
                .projection
                .school_years()
                .any(|y| y.monthly_surplus < SCHOOL_SHORTFALL_LIMIT),
            ConcernKind::DependentBurden => {
                scenario.dependents > 0
                    && ctx.first_job.is_some_and(|y| y.salary < ENTRY_SALARY_FLOOR)
            }
            ConcernKind::ExtendedDebt => ctx
                .projection
                .final_year()
                .is_some_and(|y| y.debt > RESIDUAL_DEBT_LIMIT),
            ConcernKind::JobMarket => scenario.job_growth == JobGrowth::Weak,
            ConcernKind::HighEducationCost => ctx.first_job.is_some_and(|y| {
                scenario.total_education_cost > y.salary as f64 * EDUCATION_COST_SALARY_SHARE
            }),
            ConcernKind::LocationSalaryMismatch => {
                match (location_salary_floor(&scenario.location), ctx.first_job) {
                    (Some(floor), Some(first)) => first.salary < floor,
                    _ => false,
                }
            }
            ConcernKind::NoWorkIncome => scenario.annual_income_while_studying <= 0.0,
        }
    }

    // Computed whether or not the concern applies.
    pub fn evidence(self, ctx: &ConcernContext<'_>) -> String {
        let scenario = ctx.scenario;
        let salary = ctx.first_job_salary();
        match self {
            ConcernKind::DebtBurden => {
                let (payment, ratio) = ctx
                    .first_job
                    .map_or((0, 0.0), |y| (y.monthly_debt_payment, y.debt_to_income_ratio));
                format!(
                    "${payment}/month debt payment vs ${}/month salary ({ratio}% DTI)",
                    round_half_up(salary as f64 / 12.0)
                )
            }
            ConcernKind::SchoolDeficit => {
                let shortfall = ctx
                    .projection
                    .school_years()
                    .next()
                    .map_or(0, |y| y.monthly_surplus.abs());
                format!("Around ${shortfall}/month shortfall")
            }
            ConcernKind::DependentBurden => {
                let yearly =
                    u64::from(scenario.dependents) * u64::from(DEPENDENT_EVIDENCE_MONTHLY) * 12;
                format!("Dependent costs: ${yearly}/year. Entry salary: ${salary}/year")
            }
            ConcernKind::ExtendedDebt => {
                let remaining = ctx.projection.final_year().map_or(0, |y| y.debt);
                format!("Remaining debt: ${}", with_thousands(remaining))
            }
            ConcernKind::JobMarket => format!(
                "Job growth: {}. Salary plateau: ${}/year",
                scenario.job_growth, scenario.salary_5yr
            ),
            ConcernKind::HighEducationCost => {
                let cost_ratio = if salary == 0 {
                    0
                } else {
                    round_half_up(scenario.total_education_cost / salary as f64 * 100.0)
                };
                format!(
                    "Education cost: ${} vs first year salary: ${} ({cost_ratio}% of salary)",
                    with_thousands(round_half_up(scenario.total_education_cost)),
                    with_thousands(salary)
                )
            }
            ConcernKind::LocationSalaryMismatch => format!(
                "{} - Starting salary ${}, monthly expenses ${}",
                scenario.location,
                with_thousands(salary),
                with_thousands(round_half_up(scenario.monthly_expenses))
            ),
            ConcernKind::NoWorkIncome => {
                format!("{} years of school with $0 income", scenario.years_in_school)
            }
        }
    }

    pub fn evaluate(self, ctx: &ConcernContext<'_>) -> ConcernResult {
        ConcernResult {
            id: self,
            title: self.title(),
            description: self.description(),
            evidence: self.evidence(ctx),
            applies: self.applies(ctx),
        }
    }
}

impl fmt::Display for ConcernKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcernKind {
    type Err = UnknownConcernId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcernKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownConcernId(s.to_string()))
    }
}

fn location_salary_floor(location: &str) -> Option<i64> {
    match location {
        "San Francisco" => Some(120_000),
        "Austin/Denver" => Some(50_000),
        _ => None,
    }
}

pub fn describe_all_concerns(scenario: &Scenario, projection: &Projection) -> Vec<ConcernResult> {
    let ctx = ConcernContext::new(scenario, projection);
    ConcernKind::ALL
        .into_iter()
        .map(|kind| kind.evaluate(&ctx))
        .collect()
}

pub fn identify_concerns(scenario: &Scenario, projection: &Projection) -> Vec<ConcernResult> {
    describe_all_concerns(scenario, projection)
        .into_iter()
        .filter(|concern| concern.applies)
        .collect()
}

fn with_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

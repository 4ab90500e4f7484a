use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobGrowth {
    Weak,
    Moderate,
    Strong,
}

impl JobGrowth {
    pub fn as_str(self) -> &'static str {
        match self {
            JobGrowth::Weak => "weak",
            JobGrowth::Moderate => "moderate",
            JobGrowth::Strong => "strong",
        }
    }
}

impl fmt::Display for JobGrowth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Career {
    pub title: &'static str,
    pub location: &'static str,
    pub start_salary: f64,
    pub salary_5yr: f64,
    pub job_growth: JobGrowth,
    pub monthly_base_expenses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EducationPath {
    pub name: &'static str,
    // 0.5 for the bootcamp.
    pub years: f64,
    pub cost_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub age: u32,

    pub career: String,
    pub location: String,
    pub start_salary: f64,
    pub salary_5yr: f64,
    pub job_growth: JobGrowth,
    pub monthly_base_expenses: f64,

    pub education_path: String,
    pub years_in_school: f64,
    pub education_cost_per_year: f64,
    pub total_education_cost: f64,

    pub current_debt: f64,
    pub loan_rate: f64,
    pub loan_repayment_years: u32,

    pub dependents: u32,
    pub monthly_expenses: f64,

    pub works_during_school: bool,
    pub annual_income_while_studying: f64,
}

impl Scenario {
    pub fn is_school_year(&self, year: u32) -> bool {
        f64::from(year) <= self.years_in_school
    }

    pub fn annual_school_expenses(&self) -> f64 {
        self.education_cost_per_year + self.monthly_expenses * 12.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionYear {
    pub year: u32,
    pub is_school: bool,
    pub debt: i64,
    pub salary: i64,
    pub monthly_debt_payment: i64,
    pub annual_debt_payment: i64,
    // percent
    pub debt_to_income_ratio: f64,
    pub monthly_surplus: i64,
    pub net_worth: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub debt_at_graduation: f64,
    pub monthly_debt_payment: f64,
    pub years: Vec<ProjectionYear>,
}

impl Projection {
    pub fn first_post_grad_year(&self) -> Option<&ProjectionYear> {
        self.years.iter().find(|y| !y.is_school)
    }

    pub fn final_year(&self) -> Option<&ProjectionYear> {
        self.years.last()
    }

    pub fn school_years(&self) -> impl Iterator<Item = &ProjectionYear> {
        self.years.iter().filter(|y| y.is_school)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernKind {
    DebtBurden,
    SchoolDeficit,
    DependentBurden,
    ExtendedDebt,
    JobMarket,
    HighEducationCost,
    LocationSalaryMismatch,
    NoWorkIncome,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown concern id `{0}`")]
pub struct UnknownConcernId(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernResult {
    pub id: ConcernKind,
    pub title: &'static str,
    pub description: &'static str,
    pub evidence: String,
    pub applies: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub correct_identifications: usize,
    pub total_concerns: usize,
    pub missed_concerns: Vec<ConcernResult>,
    pub false_positives: Vec<ConcernKind>,
    pub score: u32,
}

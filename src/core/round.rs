use serde::Serialize;

use super::concerns::describe_all_concerns;
use super::engine::project;
use super::generator::generate_scenario_seeded;
use super::scoring::score;
use super::types::{ConcernKind, ConcernResult, Feedback, Projection, Scenario};

#[derive(Debug, Clone)]
pub struct Round {
    pub seed: u64,
    pub scenario: Scenario,
    pub projection: Projection,
    pub concerns: Vec<ConcernResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ConcernKind,
    pub title: &'static str,
    pub description: &'static str,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub first_year_salary: i64,
    pub final_year_debt: i64,
    pub monthly_debt_payment: i64,
    pub total_education_cost: f64,
    pub monthly_expenses: f64,
}

impl Round {
    pub fn deal(seed: u64) -> Self {
        Self::from_scenario(seed, generate_scenario_seeded(seed))
    }

    pub fn from_scenario(seed: u64, scenario: Scenario) -> Self {
        let projection = project(&scenario);
        let concerns = describe_all_concerns(&scenario, &projection);
        Self {
            seed,
            scenario,
            projection,
            concerns,
        }
    }

    pub fn checklist(&self) -> Vec<ChecklistItem> {
        self.concerns
            .iter()
            .map(|c| ChecklistItem {
                id: c.id,
                title: c.title,
                description: c.description,
                evidence: c.evidence.clone(),
            })
            .collect()
    }

    pub fn ground_truth(&self) -> Vec<ConcernKind> {
        self.concerns
            .iter()
            .filter(|c| c.applies)
            .map(|c| c.id)
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        let first = self.projection.first_post_grad_year();
        Snapshot {
            first_year_salary: first.map_or(0, |y| y.salary),
            final_year_debt: self.projection.final_year().map_or(0, |y| y.debt),
            monthly_debt_payment: first.map_or(0, |y| y.monthly_debt_payment),
            total_education_cost: self.scenario.total_education_cost,
            monthly_expenses: self.scenario.monthly_expenses,
        }
    }

    pub fn submit(&self, selected: &[ConcernKind]) -> Feedback {
        score(&self.ground_truth(), selected, &self.concerns)
    }
}

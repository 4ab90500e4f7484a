mod concerns;
mod engine;
mod generator;
mod round;
mod scoring;
mod types;

pub use concerns::{ConcernContext, describe_all_concerns, identify_concerns};
pub use engine::{
    FLAT_TAX_RATE, PROJECTION_YEARS, amortized_monthly_payment, debt_at_graduation, project,
    salary_after_graduation,
};
pub use generator::{
    CAREERS, DEPENDENT_TABLE, EDUCATION_PATHS, EXISTING_DEBT_TABLE, NAMES, generate_scenario,
    generate_scenario_seeded, generate_scenario_with,
};
pub use round::{ChecklistItem, Round, Snapshot};
pub use scoring::score;
pub use types::{
    Career, ConcernKind, ConcernResult, EducationPath, Feedback, JobGrowth, Projection,
    ProjectionYear, Scenario, UnknownConcernId,
};

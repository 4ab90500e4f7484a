use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::types::{Career, EducationPath, JobGrowth, Scenario};

pub const NAMES: [&str; 8] = [
    "Alex", "Jordan", "Taylor", "Casey", "Morgan", "Riley", "Avery", "Quinn",
];

pub const CAREERS: [Career; 6] = [
    Career {
        title: "Nursing",
        location: "Mid-size city",
        start_salary: 62_000.0,
        salary_5yr: 72_000.0,
        job_growth: JobGrowth::Strong,
        monthly_base_expenses: 2_200.0,
    },
    Career {
        title: "Software Engineer (MAG 7)",
        location: "San Francisco",
        start_salary: 200_000.0,
        salary_5yr: 250_000.0,
        job_growth: JobGrowth::Strong,
        monthly_base_expenses: 4_500.0,
    },
    Career {
        title: "High School Teacher",
        location: "Suburban",
        start_salary: 42_000.0,
        salary_5yr: 50_000.0,
        job_growth: JobGrowth::Weak,
        monthly_base_expenses: 1_800.0,
    },
    Career {
        title: "Business Analyst",
        location: "Austin/Denver",
        start_salary: 58_000.0,
        salary_5yr: 72_000.0,
        job_growth: JobGrowth::Moderate,
        monthly_base_expenses: 2_400.0,
    },
    Career {
        title: "Social Worker",
        location: "Mid-size city",
        start_salary: 38_000.0,
        salary_5yr: 42_000.0,
        job_growth: JobGrowth::Weak,
        monthly_base_expenses: 1_900.0,
    },
    Career {
        title: "Mechanical Engineer",
        location: "Austin/Denver",
        start_salary: 72_000.0,
        salary_5yr: 92_000.0,
        job_growth: JobGrowth::Strong,
        monthly_base_expenses: 2_500.0,
    },
];

pub const EDUCATION_PATHS: [EducationPath; 4] = [
    EducationPath {
        name: "Community College (2yr)",
        years: 2.0,
        cost_per_year: 6_500.0,
    },
    EducationPath {
        name: "State University (4yr)",
        years: 4.0,
        cost_per_year: 16_000.0,
    },
    EducationPath {
        name: "Private University (4yr)",
        years: 4.0,
        cost_per_year: 32_000.0,
    },
    EducationPath {
        name: "Bootcamp (6mo)",
        years: 0.5,
        cost_per_year: 14_000.0,
    },
];

// Both tables are drawn uniformly; the repeated zeros are the weighting.
pub const DEPENDENT_TABLE: [u32; 5] = [0, 0, 0, 1, 2];
pub const EXISTING_DEBT_TABLE: [f64; 5] = [0.0, 0.0, 5_000.0, 12_000.0, 25_000.0];

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 23;
pub const WORK_STUDY_ANNUAL_INCOME: f64 = 18_000.0;
pub const CHILDCARE_MONTHLY_PER_DEPENDENT: f64 = 1_800.0;
pub const FEDERAL_LOAN_RATE: f64 = 0.05;
pub const LOAN_REPAYMENT_YEARS: u32 = 10;

impl Scenario {
    pub fn from_parts(
        name: &str,
        age: u32,
        career: &Career,
        education: &EducationPath,
        current_debt: f64,
        dependents: u32,
        works_during_school: bool,
    ) -> Self {
        let annual_income_while_studying = if works_during_school {
            WORK_STUDY_ANNUAL_INCOME
        } else {
            0.0
        };

        Self {
            name: name.to_string(),
            age,
            career: career.title.to_string(),
            location: career.location.to_string(),
            start_salary: career.start_salary,
            salary_5yr: career.salary_5yr,
            job_growth: career.job_growth,
            monthly_base_expenses: career.monthly_base_expenses,
            education_path: education.name.to_string(),
            years_in_school: education.years,
            education_cost_per_year: education.cost_per_year,
            total_education_cost: education.cost_per_year * education.years,
            current_debt,
            loan_rate: FEDERAL_LOAN_RATE,
            loan_repayment_years: LOAN_REPAYMENT_YEARS,
            dependents,
            monthly_expenses: career.monthly_base_expenses
                + f64::from(dependents) * CHILDCARE_MONTHLY_PER_DEPENDENT,
            works_during_school,
            annual_income_while_studying,
        }
    }
}

pub fn generate_scenario() -> Scenario {
    generate_scenario_with(&mut rand::rng())
}

/// Same seed, same scenario.
pub fn generate_scenario_seeded(seed: u64) -> Scenario {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate_scenario_with(&mut rng)
}

pub fn generate_scenario_with<R: Rng + ?Sized>(rng: &mut R) -> Scenario {
    let career = pick(rng, &CAREERS);
    let education = pick(rng, &EDUCATION_PATHS);
    let dependents = *pick(rng, &DEPENDENT_TABLE);
    let current_debt = *pick(rng, &EXISTING_DEBT_TABLE);
    let works_during_school = rng.random_bool(0.5);
    let name = *pick(rng, &NAMES);
    let age = rng.random_range(MIN_AGE..=MAX_AGE);

    Scenario::from_parts(
        name,
        age,
        career,
        education,
        current_debt,
        dependents,
        works_during_school,
    )
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, table: &'a [T]) -> &'a T {
    &table[rng.random_range(0..table.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    #[test]
    fn weighting_tables_skew_toward_zero() {
        assert_eq!(DEPENDENT_TABLE.iter().filter(|&&d| d == 0).count(), 3);
        assert_eq!(
            EXISTING_DEBT_TABLE.iter().filter(|&&d| d == 0.0).count(),
            2
        );
        assert_eq!(DEPENDENT_TABLE.len(), 5);
        assert_eq!(EXISTING_DEBT_TABLE.len(), 5);
    }

    #[test]
    fn from_parts_derives_costs_expenses_and_work_income() {
        let scenario = Scenario::from_parts(
            "Quinn",
            20,
            &CAREERS[2],
            &EDUCATION_PATHS[1],
            12_000.0,
            2,
            true,
        );

        assert_eq!(scenario.total_education_cost, 64_000.0);
        assert_eq!(scenario.monthly_expenses, 1_800.0 + 2.0 * 1_800.0);
        assert_eq!(scenario.annual_income_while_studying, 18_000.0);
        assert_eq!(scenario.loan_rate, 0.05);
        assert_eq!(scenario.loan_repayment_years, 10);
        assert_eq!(scenario.job_growth, JobGrowth::Weak);
        assert_eq!(scenario.location, "Suburban");
    }

    #[test]
    fn bootcamp_total_cost_uses_fractional_duration() {
        let scenario =
            Scenario::from_parts("Alex", 18, &CAREERS[0], &EDUCATION_PATHS[3], 0.0, 0, false);
        assert_eq!(scenario.total_education_cost, 7_000.0);
        assert_eq!(scenario.annual_income_while_studying, 0.0);
        assert!(!scenario.is_school_year(1));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        assert_eq!(generate_scenario_seeded(42), generate_scenario_seeded(42));
    }

    #[test]
    fn many_draws_reach_every_career_and_path() {
        let mut careers = std::collections::HashSet::new();
        let mut paths = std::collections::HashSet::new();
        for seed in 0..400 {
            let scenario = generate_scenario_seeded(seed);
            careers.insert(scenario.career);
            paths.insert(scenario.education_path);
        }
        assert_eq!(careers.len(), CAREERS.len());
        assert_eq!(paths.len(), EDUCATION_PATHS.len());
    }

    #[test]
    fn unseeded_generation_produces_a_well_formed_scenario() {
        let scenario = generate_scenario();
        assert!(scenario.years_in_school > 0.0);
        assert!(scenario.monthly_expenses >= scenario.monthly_base_expenses);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_generated_scenarios_come_from_the_tables(seed in any::<u64>()) {
            let s = generate_scenario_seeded(seed);

            prop_assert!(NAMES.contains(&s.name.as_str()));
            prop_assert!((MIN_AGE..=MAX_AGE).contains(&s.age));
            let career = CAREERS.iter().find(|c| c.title == s.career);
            prop_assert!(career.is_some());
            let career = career.unwrap();
            prop_assert_eq!(career.location, s.location.as_str());
            prop_assert_eq!(career.start_salary, s.start_salary);
            prop_assert_eq!(career.salary_5yr, s.salary_5yr);

            let path = EDUCATION_PATHS.iter().find(|p| p.name == s.education_path);
            prop_assert!(path.is_some());
            let path = path.unwrap();
            prop_assert_eq!(s.total_education_cost, path.years * path.cost_per_year);

            prop_assert!(DEPENDENT_TABLE.contains(&s.dependents));
            prop_assert!(EXISTING_DEBT_TABLE.contains(&s.current_debt));
            prop_assert_eq!(
                s.monthly_expenses,
                career.monthly_base_expenses + f64::from(s.dependents) * CHILDCARE_MONTHLY_PER_DEPENDENT
            );
            if s.works_during_school {
                prop_assert_eq!(s.annual_income_while_studying, WORK_STUDY_ANNUAL_INCOME);
            } else {
                prop_assert_eq!(s.annual_income_while_studying, 0.0);
            }
        }
    }
}

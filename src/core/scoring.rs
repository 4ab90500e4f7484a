use std::collections::BTreeSet;

use super::types::{ConcernKind, ConcernResult, Feedback};

/// Grades a diagnosis against the ground truth. Both id lists are treated as
/// sets, so order and repeats never change the result. Missed concerns are
/// resolved against `all_concerns`; ids with no entry there are skipped.
pub fn score(
    truth_ids: &[ConcernKind],
    selected_ids: &[ConcernKind],
    all_concerns: &[ConcernResult],
) -> Feedback {
    let truth: BTreeSet<ConcernKind> = truth_ids.iter().copied().collect();
    let selected: BTreeSet<ConcernKind> = selected_ids.iter().copied().collect();

    let correct = truth.intersection(&selected).count();
    let missed_concerns = truth
        .difference(&selected)
        .filter_map(|id| all_concerns.iter().find(|c| c.id == *id).cloned())
        .collect();
    let false_positives = selected.difference(&truth).copied().collect();

    let denominator = truth.len().max(1) as f64;
    let score = (correct as f64 / denominator * 100.0).round() as u32;

    Feedback {
        correct_identifications: correct,
        total_concerns: truth.len(),
        missed_concerns,
        false_positives,
        score,
    }
}

impl Feedback {
    pub fn false_positive_details<'a>(
        &self,
        all_concerns: &'a [ConcernResult],
    ) -> Vec<&'a ConcernResult> {
        self.false_positives
            .iter()
            .filter_map(|id| all_concerns.iter().find(|c| c.id == *id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{Just, prop_assert_eq, proptest};
    use proptest::sample::subsequence;
    use proptest::strategy::Strategy;

    fn catalogue() -> Vec<ConcernResult> {
        ConcernKind::ALL
            .into_iter()
            .map(|id| ConcernResult {
                id,
                title: id.title(),
                description: id.description(),
                evidence: format!("evidence for {id}"),
                applies: false,
            })
            .collect()
    }

    #[test]
    fn one_hit_one_miss_one_false_positive() {
        let all = catalogue();
        let feedback = score(
            &[ConcernKind::JobMarket, ConcernKind::NoWorkIncome],
            &[ConcernKind::JobMarket, ConcernKind::DebtBurden],
            &all,
        );

        assert_eq!(feedback.correct_identifications, 1);
        assert_eq!(feedback.total_concerns, 2);
        assert_eq!(feedback.missed_concerns.len(), 1);
        assert_eq!(feedback.missed_concerns[0].id, ConcernKind::NoWorkIncome);
        assert_eq!(feedback.missed_concerns[0].title, "No Income During School");
        assert_eq!(feedback.false_positives, vec![ConcernKind::DebtBurden]);
        assert_eq!(feedback.score, 50);
    }

    #[test]
    fn nothing_to_find_and_nothing_picked_scores_full_marks() {
        let feedback = score(&[], &[], &catalogue());
        assert_eq!(feedback.score, 100);
        assert_eq!(feedback.correct_identifications, 0);
        assert_eq!(feedback.total_concerns, 0);
        assert!(feedback.missed_concerns.is_empty());
        assert!(feedback.false_positives.is_empty());
    }

    #[test]
    fn picking_concerns_when_none_apply_scores_zero() {
        let feedback = score(&[], &[ConcernKind::ExtendedDebt], &catalogue());
        assert_eq!(feedback.score, 0);
        assert_eq!(feedback.false_positives, vec![ConcernKind::ExtendedDebt]);
    }

    #[test]
    fn duplicate_selections_count_once() {
        let feedback = score(
            &[ConcernKind::JobMarket],
            &[ConcernKind::JobMarket, ConcernKind::JobMarket],
            &catalogue(),
        );
        assert_eq!(feedback.correct_identifications, 1);
        assert_eq!(feedback.score, 100);
    }

    #[test]
    fn scores_round_to_nearest_percent() {
        let truth = [
            ConcernKind::DebtBurden,
            ConcernKind::SchoolDeficit,
            ConcernKind::ExtendedDebt,
        ];
        let feedback = score(&truth, &[ConcernKind::DebtBurden], &catalogue());
        assert_eq!(feedback.score, 33);
        let feedback = score(
            &truth,
            &[ConcernKind::DebtBurden, ConcernKind::ExtendedDebt],
            &catalogue(),
        );
        assert_eq!(feedback.score, 67);
    }

    #[test]
    fn unresolvable_ids_are_skipped_not_fatal() {
        // Only the ground truth is supplied for display, as a caller may do.
        let truth_only: Vec<ConcernResult> = catalogue()
            .into_iter()
            .filter(|c| c.id == ConcernKind::JobMarket)
            .collect();
        let feedback = score(
            &[ConcernKind::JobMarket, ConcernKind::NoWorkIncome],
            &[ConcernKind::DebtBurden],
            &truth_only,
        );

        assert_eq!(feedback.missed_concerns.len(), 1);
        assert_eq!(feedback.missed_concerns[0].id, ConcernKind::JobMarket);
        assert_eq!(feedback.false_positives, vec![ConcernKind::DebtBurden]);
        assert!(feedback.false_positive_details(&truth_only).is_empty());

        let all = catalogue();
        let details = feedback.false_positive_details(&all);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].title, "High Debt-to-Income Ratio");
    }

    fn ids_and_permutation() -> impl Strategy<Value = (Vec<ConcernKind>, Vec<ConcernKind>)> {
        subsequence(ConcernKind::ALL.to_vec(), 0..=ConcernKind::ALL.len())
            .prop_flat_map(|ids| (Just(ids.clone()), Just(ids).prop_shuffle()))
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_selection_order_does_not_change_feedback(
            truth in subsequence(ConcernKind::ALL.to_vec(), 0..=ConcernKind::ALL.len()),
            (selected, shuffled) in ids_and_permutation()
        ) {
            let all = catalogue();
            prop_assert_eq!(score(&truth, &selected, &all), score(&truth, &shuffled, &all));
        }
    }
}

//! Property tests for standardization, ranking, and lexical search.

use proptest::prelude::*;

use sakumon_core::config::RankingWeights;
use sakumon_core::models::{CorpusRow, Fingerprint, ProblemAttributes};
use sakumon_retrieval::ranking::standardize;
use sakumon_retrieval::{LexicalIndex, Ranker, Targets};

fn attributes(values: &[(Option<f64>, Option<f64>)], text: &str) -> Vec<ProblemAttributes> {
    values
        .iter()
        .enumerate()
        .map(|(i, (difficulty, trickiness))| ProblemAttributes {
            id: i as i64 + 1,
            difficulty: *difficulty,
            trickiness: *trickiness,
            text: text.to_string(),
        })
        .collect()
}

fn attribute() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(0.0..=1.0f64)
}

proptest! {
    #[test]
    fn z_scores_are_centered_with_unit_spread(values in prop::collection::vec(-100.0..100.0f64, 3..40)) {
        let distinct = values.iter().any(|v| (v - values[0]).abs() > 1e-3);
        prop_assume!(distinct);
        let z = standardize(&values);
        let n = z.len() as f64;
        let mean = z.iter().sum::<f64>() / n;
        let std = (z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assert!(mean.abs() < 1e-6);
        prop_assert!((std - 1.0).abs() < 1e-6);
    }

    #[test]
    fn small_samples_land_in_unit_interval(values in prop::collection::vec(-10.0..10.0f64, 0..3)) {
        let z = standardize(&values);
        prop_assert_eq!(z.len(), values.len());
        prop_assert!(z.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn ranking_is_invariant_to_weight_scale(
        sims in prop::collection::vec(0.0..1.0f64, 1..25),
        attrs in prop::collection::vec((attribute(), attribute()), 25),
        target_d in prop::option::of(0.0..=1.0f64),
        target_t in prop::option::of(0.0..=1.0f64),
        alpha in 0.0..2.0f64,
        beta in 0.0..2.0f64,
        gamma in 0.0..2.0f64,
        exponent in -3i32..4,
    ) {
        let candidates: Vec<(i64, f64)> =
            sims.iter().enumerate().map(|(i, s)| (i as i64 + 1, *s)).collect();
        // Empty text keeps the additive overlap boost out of play.
        let attrs = attributes(&attrs[..candidates.len()], "");
        let targets = Targets::new(target_d, target_t);
        let weights = RankingWeights::new(alpha, beta, gamma);
        let factor = 2f64.powi(exponent);

        let ranker = Ranker::default();
        let base = ranker.rank("zzz", &candidates, &attrs, targets, weights, 100);
        let scaled = ranker.rank("zzz", &candidates, &attrs, targets, weights.scaled(factor), 100);

        let base_ids: Vec<_> = base.iter().map(|r| r.id).collect();
        let scaled_ids: Vec<_> = scaled.iter().map(|r| r.id).collect();
        prop_assert_eq!(base_ids, scaled_ids);
    }

    #[test]
    fn literal_substring_never_ranks_below_twin(
        sim in 0.0..1.0f64,
        others in prop::collection::vec(0.0..1.0f64, 0..10),
        difficulty in attribute(),
    ) {
        // Candidate 1 has no overlap, candidate 2 contains the query verbatim;
        // otherwise identical.
        let mut candidates = vec![(1_i64, sim), (2_i64, sim)];
        candidates.extend(others.iter().enumerate().map(|(i, s)| (i as i64 + 3, *s)));
        let mut attrs = vec![
            ProblemAttributes { id: 1, difficulty, trickiness: None, text: "unrelated words".into() },
            ProblemAttributes { id: 2, difficulty, trickiness: None, text: "find the integral of x".into() },
        ];
        attrs.extend((3..candidates.len() as i64 + 1).map(|id| ProblemAttributes {
            id,
            difficulty: None,
            trickiness: None,
            text: String::new(),
        }));

        let ranked = Ranker::default().rank(
            "integral of x",
            &candidates,
            &attrs,
            Targets::new(Some(0.5), None),
            RankingWeights::default(),
            100,
        );
        let pos = |id: i64| ranked.iter().position(|r| r.id == id);
        prop_assert!(pos(2) < pos(1));
    }

    #[test]
    fn lexical_scores_are_positive_and_sorted(
        docs in prop::collection::vec("[a-e]{2,4}( [a-e]{2,4}){0,6}", 1..20),
        query in "[a-e]{2,4}( [a-e]{2,4}){0,3}",
    ) {
        let rows: Vec<CorpusRow> = docs
            .iter()
            .enumerate()
            .map(|(i, d)| CorpusRow { id: i as i64 + 1, stem: d.clone(), markup_text: None })
            .collect();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let index = LexicalIndex::build(Fingerprint::of_ids(&ids), &rows);
        let hits = index.search(&query, 50);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
        for (_, score) in &hits {
            prop_assert!(*score > 0.0 && *score <= 1.0 + 1e-9);
        }
    }
}

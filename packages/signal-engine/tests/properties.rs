//! Property tests for report invariants over arbitrary batches.

use proptest::prelude::*;

use signal_engine::{
    aggregate, metric_names, testing::batch, Analyzer, CompositeScorer, FilterContext,
    Lexicon, PainPointExtractor, RawPost, SentimentBreakdown, ThemeExtractor,
};

/// Words the heuristics react to: pain keywords, sentiment words, stop words
/// and short tokens, plus a few plain nouns.
fn vocabulary() -> Vec<String> {
    let lexicon = Lexicon::default_shared();
    let mut words: Vec<String> = lexicon.pain_keywords.clone();
    let mut sets: Vec<String> = lexicon
        .stop_words
        .iter()
        .chain(lexicon.positive_words.iter())
        .chain(lexicon.negative_words.iter())
        .cloned()
        .collect();
    sets.sort();
    words.extend(sets);
    words.extend(
        ["a", "ok", "fix", "app", "pricing", "delivery", "onboarding", "meal", "kits"]
            .iter()
            .map(|w| w.to_string()),
    );
    words
}

/// Text assembled from lexicon words with sentence punctuation between them.
fn lexicon_text(max_words: usize) -> impl Strategy<Value = String> {
    let word = prop::sample::select(vocabulary());
    let separator = prop::sample::select(vec![" ", " ", " ", ". ", "! ", "? ", ", "]);
    prop::collection::vec((word, separator), 1..max_words).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(word, sep)| format!("{}{}", word, sep))
            .collect::<String>()
    })
}

fn arbitrary_post() -> impl Strategy<Value = RawPost> {
    (
        "[a-z0-9]{1,8}",
        lexicon_text(12),
        lexicon_text(40),
        -50i64..5000,
    )
        .prop_map(|(id, title, body, popularity)| {
            RawPost::new(id.clone(), title, format!("https://x/{}", id))
                .with_body(body)
                .with_popularity(popularity)
        })
}

proptest! {
    #[test]
    fn shares_always_sum_to_100(pos in 0usize..60, neu in 0usize..60, neg in 0usize..60) {
        let breakdown = SentimentBreakdown::from_counts(pos, neu, neg);
        prop_assert_eq!(breakdown.total_percent(), 100);
    }

    #[test]
    fn report_shares_sum_to_100(pos in 0usize..30, neu in 0usize..30, neg in 0usize..30) {
        let report = Analyzer::default().analyze(batch(pos, neu, neg), FilterContext::for_batch("p", 4.0));
        let sum = report.metric_value(metric_names::POSITIVE_PERCENT).unwrap()
            + report.metric_value(metric_names::NEUTRAL_PERCENT).unwrap()
            + report.metric_value(metric_names::NEGATIVE_PERCENT).unwrap();
        prop_assert_eq!(sum, 100.0);
        prop_assert_eq!(report.total_posts(), pos + neu + neg);
    }

    #[test]
    fn cps_stays_in_range(pos in 0u32..=100, neg in 0u32..=100, engagement in 0u32..=100) {
        let scorer = CompositeScorer::default();
        let core = scorer.sentiment_core(pos, neg.min(100 - pos));
        prop_assert!(core <= 100);
        prop_assert!(scorer.cps(core, engagement) <= 100);
    }

    #[test]
    fn arbitrary_batches_respect_caps(posts in proptest::collection::vec(arbitrary_post(), 0..40)) {
        let lexicon = Lexicon::default_shared();
        let themes = ThemeExtractor::new(lexicon.clone()).extract(&posts);
        let pains = PainPointExtractor::new(lexicon.clone()).extract(&posts);
        prop_assert!(themes.len() <= 6);
        prop_assert!(pains.len() <= 6);
        prop_assert!(pains.iter().all(|p| p.chars().count() <= 80));

        prop_assert!(themes
            .iter()
            .all(|t| t.chars().count() > 3 && !lexicon.is_stop_word(t)));
        prop_assert!(pains
            .iter()
            .all(|p| lexicon.pain_keywords.iter().any(|k| p.contains(k.as_str()))));

        let report = Analyzer::default().analyze(posts, FilterContext::for_batch("p", 4.0));
        let engagement = report.metric_value(metric_names::ENGAGEMENT_SCORE).unwrap();
        let cps = report.metric_value(metric_names::COMMUNITY_POSITIVITY_SCORE).unwrap();
        prop_assert!((0.0..=100.0).contains(&engagement));
        prop_assert!((0.0..=100.0).contains(&cps));
        prop_assert!(report.items().len() <= 10);
    }

    #[test]
    fn aggregate_counts_every_post(pos in 0usize..20, neu in 0usize..20, neg in 0usize..20) {
        let analyzer = Analyzer::default();
        let classified = analyzer.classifier().classify_all(&batch(pos, neu, neg));
        let breakdown = aggregate(&classified);
        prop_assert_eq!(breakdown.post_count, pos + neu + neg);
    }
}

//! Synchronous analysis over a resident batch of posts.

use std::sync::Arc;
use tracing::debug;

use crate::lexicon::{Lexicon, LexiconProvider};
use crate::pipeline::aggregate::{aggregate, SentimentBreakdown};
use crate::pipeline::composite::{CompositeScore, CompositeScorer};
use crate::pipeline::engagement::{Engagement, EngagementScorer};
use crate::pipeline::pain_points::PainPointExtractor;
use crate::pipeline::report::ReportAssembler;
use crate::pipeline::sentiment::SentimentClassifier;
use crate::pipeline::themes::ThemeExtractor;
use crate::types::config::EngineConfig;
use crate::types::post::{ClassifiedPost, RawPost};
use crate::types::query::FilterContext;
use crate::types::report::AggregateReport;

/// Everything the assembler needs from one batch.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub classified: Vec<ClassifiedPost>,
    pub breakdown: SentimentBreakdown,
    pub engagement: Engagement,
    pub composite: CompositeScore,
    pub themes: Vec<String>,
    pub pain_points: Vec<String>,
}

/// Runs every stage of the pipeline. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: EngineConfig,
    classifier: SentimentClassifier,
    themes: ThemeExtractor,
    pain_points: PainPointExtractor,
    composite: CompositeScorer,
    assembler: ReportAssembler,
}

impl Analyzer {
    pub fn new(provider: &dyn LexiconProvider, config: EngineConfig) -> Self {
        let lexicon = provider.lexicon();
        Self::with_lexicon(lexicon, config)
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>, config: EngineConfig) -> Self {
        Self {
            classifier: SentimentClassifier::from_config(Arc::clone(&lexicon), &config),
            themes: ThemeExtractor::from_config(Arc::clone(&lexicon), &config),
            pain_points: PainPointExtractor::from_config(lexicon, &config),
            composite: CompositeScorer::from_config(&config),
            assembler: ReportAssembler::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &SentimentClassifier {
        &self.classifier
    }

    pub fn theme_extractor(&self) -> &ThemeExtractor {
        &self.themes
    }

    pub fn pain_point_extractor(&self) -> &PainPointExtractor {
        &self.pain_points
    }

    /// Drop posts that are malformed or flagged by the source.
    pub fn filter_valid(posts: Vec<RawPost>) -> Vec<RawPost> {
        let received = posts.len();
        let valid: Vec<RawPost> = posts
            .into_iter()
            .filter(|post| match post.validate() {
                Ok(()) => true,
                Err(reason) => {
                    debug!(post_id = %post.id, %reason, "Skipping malformed post");
                    false
                }
            })
            .collect();

        if valid.len() < received {
            debug!(received, kept = valid.len(), "Filtered malformed posts");
        }
        valid
    }

    /// Analyze a batch and assemble the report.
    pub fn analyze(&self, posts: Vec<RawPost>, context: FilterContext) -> AggregateReport {
        let posts = Self::filter_valid(posts);
        let classified = self.classifier.classify_all(&posts);
        let themes = self.themes.extract(&posts);
        let pain_points = self.pain_points.extract(&posts);

        let analysis = self.combine(&posts, classified, themes, pain_points, context.window_weeks);
        self.assembler.assemble(context, analysis)
    }

    /// Derive the batch metrics once every per-post classification is in.
    pub fn combine(
        &self,
        posts: &[RawPost],
        classified: Vec<ClassifiedPost>,
        themes: Vec<String>,
        pain_points: Vec<String>,
        window_weeks: f64,
    ) -> Analysis {
        let breakdown = aggregate(&classified);
        let engagement = EngagementScorer::from_config(&self.config)
            .with_window_weeks(window_weeks)
            .score(posts);
        let composite = self.composite.score(&breakdown, engagement.score);

        debug!(
            positive = breakdown.positive_percent,
            neutral = breakdown.neutral_percent,
            negative = breakdown.negative_percent,
            engagement = engagement.score,
            cps = composite.cps,
            "Scored batch"
        );

        Analysis {
            classified,
            breakdown,
            engagement,
            composite,
            themes,
            pain_points,
        }
    }

    pub fn assemble(&self, context: FilterContext, analysis: Analysis) -> AggregateReport {
        self.assembler.assemble(context, analysis)
    }

    /// Degraded report carrying `reason` in its warnings.
    pub fn fallback(&self, context: FilterContext, reason: &str) -> AggregateReport {
        self.assembler.fallback(context, reason)
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_lexicon(Lexicon::default_shared(), EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::report::{metric_names, SPARSE_WARNING};
    use crate::testing::{batch, post};

    fn context() -> FilterContext {
        FilterContext::for_batch("test", 4.0)
    }

    #[test]
    fn test_malformed_posts_are_filtered() {
        let posts = vec![
            post("1", "Fine post", 3),
            post("2", "Adult post", 3).flagged_nsfw(),
            post("3", "Gone", 3).flagged_removed(),
            post("", "No id", 3),
        ];
        let report = Analyzer::default().analyze(posts, context());
        assert_eq!(report.total_posts(), 1);
    }

    #[test]
    fn test_empty_batch_is_baseline() {
        let report = Analyzer::default().analyze(Vec::new(), context());
        assert_eq!(report.total_posts(), 0);
        assert_eq!(report.metric_value(metric_names::NEUTRAL_PERCENT), Some(100.0));
        assert_eq!(
            report.metric_value(metric_names::COMMUNITY_POSITIVITY_SCORE),
            Some(0.0)
        );
        assert_eq!(report.warnings(), &[SPARSE_WARNING.to_string()]);
        assert!(!report.is_degraded());
    }

    #[test]
    fn test_all_metrics_share_confidence_tier() {
        let report = Analyzer::default().analyze(batch(15, 5, 5), context());
        assert_eq!(report.metrics().len(), 5);
        assert!(report.metrics().iter().all(|m| m.confidence == 0.7));
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_combine_uses_window() {
        let posts = batch(0, 10, 0);
        let analyzer = Analyzer::default();
        let classified = analyzer.classifier().classify_all(&posts);
        let analysis = analyzer.combine(&posts, classified, vec![], vec![], 1.0);
        assert_eq!(analysis.engagement.posts_per_week, 10.0);
    }
}

//! services/api/src/course.rs
//!
//! The course orchestrator: fans the four providers out as independent tasks
//! and assembles their results into a single `CourseResult`.

use crate::providers::{BonusTipProvider, QuizProvider, SummaryProvider, VideoProvider};
use bytementor_core::{
    domain::{CourseResult, Topic, TopicError},
    ports::{TextGenerationService, VideoSearchService},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error(transparent)]
    InvalidTopic(#[from] TopicError),
    #[error("Failed to generate course: {0}")]
    Orchestration(String),
}

pub struct CourseOrchestrator {
    quiz: Arc<QuizProvider>,
    summary: Arc<SummaryProvider>,
    bonus_tip: Arc<BonusTipProvider>,
    videos: Arc<VideoProvider>,
}

impl CourseOrchestrator {
    /// Builds every provider from the configured adapters. `None` means the
    /// matching credential is absent and the providers run fallback-only.
    pub fn new(
        text: Option<Arc<dyn TextGenerationService>>,
        video: Option<Arc<dyn VideoSearchService>>,
    ) -> Self {
        Self::from_providers(
            QuizProvider::new(text.clone()),
            SummaryProvider::new(text.clone()),
            BonusTipProvider::new(text),
            VideoProvider::new(video),
        )
    }

    pub fn from_providers(
        quiz: QuizProvider,
        summary: SummaryProvider,
        bonus_tip: BonusTipProvider,
        videos: VideoProvider,
    ) -> Self {
        Self {
            quiz: Arc::new(quiz),
            summary: Arc::new(summary),
            bonus_tip: Arc::new(bonus_tip),
            videos: Arc::new(videos),
        }
    }

    /// Validates `raw_topic` and assembles a complete course.
    ///
    /// Providers never fail, so the only error besides a blank topic is a task
    /// that could not be joined.
    pub async fn assemble(&self, raw_topic: &str) -> Result<CourseResult, CourseError> {
        let topic = Topic::parse(raw_topic)?;
        let span = info_span!("course", request_id = %Uuid::new_v4(), topic = %topic);
        self.run(topic).instrument(span).await
    }

    async fn run(&self, topic: Topic) -> Result<CourseResult, CourseError> {
        let started = Instant::now();
        info!("Generating course.");

        let quiz_task = {
            let (provider, topic) = (Arc::clone(&self.quiz), topic.clone());
            tokio::spawn(async move { provider.generate(&topic).await }.in_current_span())
        };
        let summary_task = {
            let (provider, topic) = (Arc::clone(&self.summary), topic.clone());
            tokio::spawn(async move { provider.generate(&topic).await }.in_current_span())
        };
        let videos_task = {
            let (provider, topic) = (Arc::clone(&self.videos), topic.clone());
            tokio::spawn(async move { provider.generate(&topic).await }.in_current_span())
        };
        let tip_task = {
            let (provider, topic) = (Arc::clone(&self.bonus_tip), topic.clone());
            tokio::spawn(async move { provider.generate(&topic).await }.in_current_span())
        };

        let (quiz, summary, videos, bonus_tip) =
            tokio::join!(quiz_task, summary_task, videos_task, tip_task);

        let course = CourseResult {
            quiz: quiz.map_err(join_failure("quiz"))?,
            summary: summary.map_err(join_failure("summary"))?,
            videos: videos.map_err(join_failure("videos"))?,
            bonus_tip: bonus_tip.map_err(join_failure("bonus_tip"))?,
            topic,
            generated_at: Utc::now(),
        };

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            questions = course.quiz.questions.len(),
            videos = course.videos.len(),
            "Course generated."
        );
        Ok(course)
    }
}

fn join_failure(task: &'static str) -> impl Fn(JoinError) -> CourseError {
    move |e| {
        error!(task, error = %e, "Provider task did not complete.");
        CourseError::Orchestration(format!("{} task failed: {}", task, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fakes::{
        quiz_json, video, FixedGenerator, FixedSearch, PartlyFailingGenerator, ScriptedGenerator,
    };
    use crate::providers::fallback;
    use async_trait::async_trait;
    use bytementor_core::domain::{Video, OPTIONS_PER_QUESTION, QUIZ_LENGTH};
    use bytementor_core::ports::{GenerationRequest, PortError, PortResult, ResponseFormat};

    fn healthy_script() -> ScriptedGenerator {
        ScriptedGenerator {
            quiz: quiz_json(5),
            summary: "Overview\nGraphs have nodes.".to_string(),
            tip: "Draw every graph by hand first.".to_string(),
        }
    }

    fn scripted() -> Arc<dyn TextGenerationService> {
        Arc::new(healthy_script())
    }

    fn failing_only(fails: fn(&GenerationRequest) -> bool) -> Arc<dyn TextGenerationService> {
        Arc::new(PartlyFailingGenerator {
            healthy: healthy_script(),
            fails,
        })
    }

    fn hits() -> Arc<dyn VideoSearchService> {
        Arc::new(FixedSearch(Ok((1..=3).map(video).collect())))
    }

    #[tokio::test]
    async fn fallback_only_course_is_complete() {
        let orchestrator = CourseOrchestrator::new(None, None);
        let course = orchestrator.assemble("  Graphs ").await.unwrap();

        assert_eq!(course.topic.as_str(), "Graphs");
        assert_eq!(course.quiz.questions.len(), QUIZ_LENGTH);
        for question in &course.quiz.questions {
            assert_eq!(question.options.len(), OPTIONS_PER_QUESTION);
            assert!(question.correct_answer < OPTIONS_PER_QUESTION);
        }
        assert!(!course.summary.cheat_sheet.is_empty());
        assert!(course.summary.cheat_sheet_pdf.is_some());
        assert!(!course.bonus_tip.is_empty());
        assert!(course.videos.is_empty());
    }

    #[tokio::test]
    async fn fallback_only_course_is_deterministic() {
        let orchestrator = CourseOrchestrator::new(None, None);
        let first = orchestrator.assemble("Graphs").await.unwrap();
        let second = orchestrator.assemble("Graphs").await.unwrap();
        assert_eq!(first.quiz, second.quiz);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.bonus_tip, second.bonus_tip);
    }

    #[tokio::test]
    async fn blank_topic_makes_no_upstream_calls() {
        let generator = Arc::new(FixedGenerator::ok("unused"));
        let orchestrator = CourseOrchestrator::new(Some(generator.clone()), None);

        for raw in ["", "   "] {
            assert!(matches!(
                orchestrator.assemble(raw).await,
                Err(CourseError::InvalidTopic(TopicError::Blank))
            ));
        }
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn failing_video_lookup_leaves_other_content_untouched() {
        let healthy = CourseOrchestrator::new(
            Some(scripted()),
            Some(Arc::new(FixedSearch(Ok((1..=3).map(video).collect())))),
        );
        let broken = CourseOrchestrator::new(
            Some(scripted()),
            Some(Arc::new(FixedSearch(Err(PortError::Transport("down".into()))))),
        );

        let good = healthy.assemble("Graphs").await.unwrap();
        let bad = broken.assemble("Graphs").await.unwrap();

        assert_eq!(good.videos.len(), 3);
        assert!(bad.videos.is_empty());
        assert_eq!(good.quiz, bad.quiz);
        assert_eq!(good.summary, bad.summary);
        assert_eq!(good.bonus_tip, bad.bonus_tip);
        assert_eq!(good.bonus_tip, "Draw every graph by hand first.");
    }

    #[tokio::test]
    async fn failing_generation_leaves_videos_untouched() {
        let hits: Vec<Video> = (1..=2).map(video).collect();
        let failing = Arc::new(FixedGenerator::err(PortError::Status(500)));
        let orchestrator = CourseOrchestrator::new(
            Some(failing),
            Some(Arc::new(FixedSearch(Ok(hits.clone())))),
        );
        let topic = Topic::parse("Graphs").unwrap();

        let course = orchestrator.assemble("Graphs").await.unwrap();
        assert_eq!(course.videos, hits);
        assert_eq!(course.quiz, fallback::quiz(&topic));
        assert_eq!(course.bonus_tip, fallback::bonus_tip(&topic));
        assert_eq!(course.summary.cheat_sheet, fallback::study_guide(&topic));
    }

    #[tokio::test]
    async fn failing_quiz_leaves_summary_tip_and_videos_untouched() {
        let topic = Topic::parse("Graphs").unwrap();
        let good = CourseOrchestrator::new(Some(scripted()), Some(hits()))
            .assemble("Graphs")
            .await
            .unwrap();
        let bad = CourseOrchestrator::new(
            Some(failing_only(|r| r.format == ResponseFormat::Json)),
            Some(hits()),
        )
        .assemble("Graphs")
        .await
        .unwrap();

        assert_ne!(good.quiz, fallback::quiz(&topic));
        assert_eq!(bad.quiz, fallback::quiz(&topic));
        assert_eq!(bad.summary.cheat_sheet, good.summary.cheat_sheet);
        assert_eq!(bad.bonus_tip, good.bonus_tip);
        assert_eq!(bad.videos, good.videos);
    }

    #[tokio::test]
    async fn failing_tip_leaves_quiz_and_summary_untouched() {
        let topic = Topic::parse("Graphs").unwrap();
        let good = CourseOrchestrator::new(Some(scripted()), Some(hits()))
            .assemble("Graphs")
            .await
            .unwrap();
        let bad = CourseOrchestrator::new(
            Some(failing_only(|r| {
                r.format == ResponseFormat::PlainText && !r.prompt.contains("study guide")
            })),
            Some(hits()),
        )
        .assemble("Graphs")
        .await
        .unwrap();

        assert_eq!(bad.bonus_tip, fallback::bonus_tip(&topic));
        assert_eq!(bad.quiz, good.quiz);
        assert_eq!(bad.summary, good.summary);
        assert_eq!(bad.videos, good.videos);
    }

    struct PanickingSearch;

    #[async_trait]
    impl VideoSearchService for PanickingSearch {
        async fn search(&self, _query: &str, _max: usize) -> PortResult<Vec<Video>> {
            panic!("search adapter bug");
        }
    }

    #[tokio::test]
    async fn a_crashed_task_fails_the_whole_request() {
        let orchestrator = CourseOrchestrator::new(None, Some(Arc::new(PanickingSearch)));
        let result = orchestrator.assemble("Graphs").await;
        assert!(matches!(result, Err(CourseError::Orchestration(msg)) if msg.contains("videos")));
    }
}

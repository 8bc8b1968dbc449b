//! services/api/src/providers/fallback.rs
//!
//! Deterministic content served when live generation is unavailable.

use bytementor_core::domain::{Quiz, QuizQuestion, Topic, QUIZ_LENGTH};

pub fn quiz(topic: &Topic) -> Quiz {
    let questions = (1..=QUIZ_LENGTH)
        .map(|i| QuizQuestion {
            question: format!("{} fallback question {}", topic, i),
            options: ["Option A", "Option B", "Option C", "Option D"]
                .iter()
                .map(|o| o.to_string())
                .collect(),
            correct_answer: 0,
            explanation: "Correct answer is Option A".to_string(),
        })
        .collect();
    Quiz { questions }
}

/// A multi-section study outline. Sections are separated by blank lines so the
/// renderer treats each first line as a heading.
pub fn study_guide(topic: &Topic) -> String {
    let name = topic.as_str();
    [
        format!("{} QUICK REFERENCE GUIDE", name.to_uppercase()),
        format!(
            "1. Introduction\nIntroduction and key points about {name}.\n\
             Start by learning which problems {name} solves and where it is used."
        ),
        format!(
            "2. Key Concepts\n- Core terminology used when working with {name}\n\
             - The fundamental building blocks and how they fit together\n\
             - Typical workflows and tools"
        ),
        "3. Common Pitfalls\n- Skipping the fundamentals before moving on\n\
         - Memorising facts without applying them"
            .to_string(),
        format!(
            "4. Practice Plan\n1. Study one concept at a time\n\
             2. Build a small project that uses {name}\n\
             3. Explain what you learned to someone else"
        ),
        format!(
            "5. Next Steps\nRead the official documentation for {name} and work through \
             hands-on tutorials."
        ),
    ]
    .join("\n\n")
}

pub fn bonus_tip(topic: &Topic) -> String {
    format!(
        "\u{1F4A1} Tip: Consistently practice {} concepts with hands-on exercises.",
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::split_sections;

    fn topic() -> Topic {
        Topic::parse("Rust").unwrap()
    }

    #[test]
    fn fallback_quiz_is_complete_and_valid() {
        let quiz = quiz(&topic());
        assert_eq!(quiz.questions.len(), QUIZ_LENGTH);
        assert!(quiz.questions.iter().all(QuizQuestion::is_well_formed));
        assert_eq!(quiz.questions[0].question, "Rust fallback question 1");
        assert_eq!(quiz.questions[4].question, "Rust fallback question 5");
        assert!(quiz.questions.iter().all(|q| q.correct_answer == 0));
    }

    #[test]
    fn fallback_guide_has_titled_sections() {
        let guide = study_guide(&topic());
        let sections = split_sections(&guide);
        assert_eq!(sections.len(), 6);
        assert_eq!(sections[0], vec!["RUST QUICK REFERENCE GUIDE"]);
        assert_eq!(sections[1][0], "1. Introduction");
        assert!(guide.contains("Introduction and key points about Rust."));
    }

    #[test]
    fn fallback_tip_mentions_the_topic() {
        assert_eq!(
            bonus_tip(&topic()),
            "\u{1F4A1} Tip: Consistently practice Rust concepts with hands-on exercises."
        );
    }

    #[test]
    fn fallback_content_is_deterministic() {
        assert_eq!(quiz(&topic()), quiz(&topic()));
        assert_eq!(study_guide(&topic()), study_guide(&topic()));
    }
}

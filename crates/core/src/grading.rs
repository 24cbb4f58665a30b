use crate::model::{Question, QuestionKind};

/// Alternative phrasings accepted for a canonical voice answer.
const ANSWER_VARIANTS: &[(&str, &[&str])] = &[
    ("circle", &["round", "circular"]),
    ("triangle", &["three sides", "3 sides"]),
    ("square", &["four sides", "4 sides"]),
    ("moo", &["moo moo", "cow sound"]),
    ("five", &["5", "five fingers"]),
    ("cheetah", &["fastest cat", "spotted cat"]),
];

fn variants_for(canonical: &str) -> &'static [&'static str] {
    ANSWER_VARIANTS
        .iter()
        .find(|(answer, _)| *answer == canonical)
        .map_or(&[][..], |(_, variants)| *variants)
}

/// Lenient comparison of a spoken transcript against a canonical answer.
///
/// Both sides are lower-cased and trimmed. The transcript matches when it
/// equals the answer, contains it, or contains a known variant of it. An
/// empty transcript never matches.
#[must_use]
pub fn is_answer_correct(transcript: &str, canonical: &str) -> bool {
    let spoken = transcript.trim().to_lowercase();
    let expected = canonical.trim().to_lowercase();

    if spoken.is_empty() || expected.is_empty() {
        return false;
    }
    if spoken == expected || spoken.contains(&expected) {
        return true;
    }

    variants_for(&expected)
        .iter()
        .any(|variant| spoken.contains(variant))
}

/// Grades a submitted answer for `question`.
///
/// Multiple-choice answers must equal the canonical answer exactly; voice
/// answers go through [`is_answer_correct`].
#[must_use]
pub fn grade_answer(question: &Question, answer: &str) -> bool {
    match question.kind() {
        QuestionKind::MultipleChoice { .. } => answer == question.correct_answer(),
        QuestionKind::Voice => is_answer_correct(answer, question.correct_answer()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_containing_answer_is_correct() {
        assert!(is_answer_correct("It's a circle!", "circle"));
        assert!(is_answer_correct("  CIRCLE ", "circle"));
    }

    #[test]
    fn unrelated_transcript_is_wrong() {
        assert!(!is_answer_correct("square", "circle"));
    }

    #[test]
    fn variants_are_accepted() {
        assert!(is_answer_correct("round", "circle"));
        assert!(is_answer_correct("it has three sides", "triangle"));
        assert!(is_answer_correct("the cow sound", "moo"));
        assert!(is_answer_correct("I think 5", "five"));
        assert!(is_answer_correct("the fastest cat", "cheetah"));
    }

    #[test]
    fn variants_only_apply_to_their_answer() {
        assert!(!is_answer_correct("round", "square"));
    }

    #[test]
    fn empty_transcript_is_never_correct() {
        assert!(!is_answer_correct("", "circle"));
        assert!(!is_answer_correct("   ", "circle"));
    }

    #[test]
    fn multiple_choice_requires_exact_option() {
        let question =
            Question::multiple_choice("q1", "What color is the sky?", ["Blue", "Red"], "Blue");
        assert!(grade_answer(&question, "Blue"));
        assert!(!grade_answer(&question, "blue"));
        assert!(!grade_answer(&question, "Red"));
    }

    #[test]
    fn voice_questions_use_lenient_matching() {
        let question = Question::voice("q3", "What shape is a ball?", "circle");
        assert!(grade_answer(&question, "a ball is round"));
        assert!(!grade_answer(&question, ""));
    }
}

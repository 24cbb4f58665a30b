use kids_core::model::percentage_score;

/// Position within a quiz attempt, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    /// Share of the quiz reached, counting the current question.
    pub percent: u32,
}

impl QuizProgress {
    #[must_use]
    pub fn new(index: usize, total: usize, answered: usize) -> Self {
        let reached = u32::try_from(index.saturating_add(1).min(total)).unwrap_or(u32::MAX);
        let total_u32 = u32::try_from(total).unwrap_or(u32::MAX);
        Self {
            index,
            total,
            answered,
            percent: percentage_score(reached, total_u32),
        }
    }

    /// One-based question number for display.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

pub const MAX_STARS: u8 = 5;

/// Encouragement band for a percentage score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTier {
    Outstanding,
    Excellent,
    Great,
    Good,
    KeepPracticing,
}

impl ScoreTier {
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        match score {
            90.. => ScoreTier::Outstanding,
            80..=89 => ScoreTier::Excellent,
            70..=79 => ScoreTier::Great,
            60..=69 => ScoreTier::Good,
            _ => ScoreTier::KeepPracticing,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Outstanding => "Outstanding! 🌟",
            ScoreTier::Excellent => "Excellent work! 🎉",
            ScoreTier::Great => "Great job! 👏",
            ScoreTier::Good => "Good effort! 💪",
            ScoreTier::KeepPracticing => "Keep practicing! 📚",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Outstanding => "tier-outstanding",
            ScoreTier::Excellent => "tier-excellent",
            ScoreTier::Great => "tier-great",
            ScoreTier::Good => "tier-good",
            ScoreTier::KeepPracticing => "tier-practice",
        }
    }
}

/// Stars out of five: `round(score / 100 * 5)`.
#[must_use]
pub fn star_count(score: u32) -> u8 {
    let score = score.min(100);
    // score * 5 / 100 rounded half up.
    let stars = (score * u32::from(MAX_STARS) + 50) / 100;
    u8::try_from(stars).unwrap_or(MAX_STARS)
}

/// Headline emoji for the result screen.
#[must_use]
pub fn trophy_icon(score: u32) -> &'static str {
    match score {
        80.. => "🏆",
        60..=79 => "🎯",
        _ => "📚",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_score_thresholds() {
        assert_eq!(ScoreTier::for_score(100), ScoreTier::Outstanding);
        assert_eq!(ScoreTier::for_score(90), ScoreTier::Outstanding);
        assert_eq!(ScoreTier::for_score(89), ScoreTier::Excellent);
        assert_eq!(ScoreTier::for_score(80), ScoreTier::Excellent);
        assert_eq!(ScoreTier::for_score(75), ScoreTier::Great);
        assert_eq!(ScoreTier::for_score(67), ScoreTier::Good);
        assert_eq!(ScoreTier::for_score(59), ScoreTier::KeepPracticing);
        assert_eq!(ScoreTier::for_score(0), ScoreTier::KeepPracticing);
    }

    #[test]
    fn stars_round_to_nearest() {
        assert_eq!(star_count(0), 0);
        assert_eq!(star_count(9), 0);
        assert_eq!(star_count(10), 1);
        assert_eq!(star_count(33), 2);
        assert_eq!(star_count(67), 3);
        assert_eq!(star_count(70), 4);
        assert_eq!(star_count(89), 4);
        assert_eq!(star_count(90), 5);
        assert_eq!(star_count(100), 5);
        assert_eq!(star_count(250), 5);
    }

    #[test]
    fn trophy_matches_score_band() {
        assert_eq!(trophy_icon(80), "🏆");
        assert_eq!(trophy_icon(67), "🎯");
        assert_eq!(trophy_icon(33), "📚");
    }
}

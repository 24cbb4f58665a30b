use serde::{Deserialize, Serialize};

use crate::model::ids::BadgeId;

/// Progress counters that badge thresholds are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCounts {
    pub completed_quizzes: usize,
    pub total_score: u32,
    pub completed_videos: usize,
}

/// Threshold that earns a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeRule {
    QuizzesCompleted(usize),
    TotalScore(u32),
    VideosWatched(usize),
    QuizzesAndVideos { quizzes: usize, videos: usize },
}

impl BadgeRule {
    #[must_use]
    pub fn is_satisfied(self, counts: ProgressCounts) -> bool {
        match self {
            BadgeRule::QuizzesCompleted(min) => counts.completed_quizzes >= min,
            BadgeRule::TotalScore(min) => counts.total_score >= min,
            BadgeRule::VideosWatched(min) => counts.completed_videos >= min,
            BadgeRule::QuizzesAndVideos { quizzes, videos } => {
                counts.completed_quizzes >= quizzes && counts.completed_videos >= videos
            }
        }
    }
}

/// Static definition of an achievement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub rule: BadgeRule,
}

/// A badge definition paired with whether the active user has earned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStatus {
    pub definition: BadgeDefinition,
    pub earned: bool,
}

/// The fixed threshold table, in award order.
#[must_use]
pub fn badge_definitions() -> Vec<BadgeDefinition> {
    vec![
        BadgeDefinition {
            id: BadgeId::new("first-quiz"),
            name: "First Quiz Complete",
            icon: "🏆",
            description: "Complete your first quiz!",
            rule: BadgeRule::QuizzesCompleted(1),
        },
        BadgeDefinition {
            id: BadgeId::new("quiz-master"),
            name: "Quiz Master",
            icon: "🎯",
            description: "Complete 10 quizzes!",
            rule: BadgeRule::QuizzesCompleted(10),
        },
        BadgeDefinition {
            id: BadgeId::new("high-scorer"),
            name: "High Scorer",
            icon: "⭐",
            description: "Earn 100 points!",
            rule: BadgeRule::TotalScore(100),
        },
        BadgeDefinition {
            id: BadgeId::new("video-watcher"),
            name: "Video Watcher",
            icon: "📺",
            description: "Watch 5 videos!",
            rule: BadgeRule::VideosWatched(5),
        },
        BadgeDefinition {
            id: BadgeId::new("learning-star"),
            name: "Learning Star",
            icon: "🌟",
            description: "Complete 5 quizzes and watch 3 videos!",
            rule: BadgeRule::QuizzesAndVideos {
                quizzes: 5,
                videos: 3,
            },
        },
    ]
}

/// Ids of every badge whose threshold holds for `counts`, in table order.
#[must_use]
pub fn satisfied_badges(definitions: &[BadgeDefinition], counts: ProgressCounts) -> Vec<BadgeId> {
    definitions
        .iter()
        .filter(|definition| definition.rule.is_satisfied(counts))
        .map(|definition| definition.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(quizzes: usize, score: u32, videos: usize) -> ProgressCounts {
        ProgressCounts {
            completed_quizzes: quizzes,
            total_score: score,
            completed_videos: videos,
        }
    }

    fn ids(found: &[BadgeId]) -> Vec<&str> {
        found.iter().map(BadgeId::as_str).collect()
    }

    #[test]
    fn nothing_is_satisfied_without_progress() {
        assert!(satisfied_badges(&badge_definitions(), counts(0, 0, 0)).is_empty());
    }

    #[test]
    fn thresholds_are_inclusive() {
        let defs = badge_definitions();
        assert_eq!(ids(&satisfied_badges(&defs, counts(1, 99, 4))), ["first-quiz"]);
        assert_eq!(
            ids(&satisfied_badges(&defs, counts(1, 100, 5))),
            ["first-quiz", "high-scorer", "video-watcher"]
        );
    }

    #[test]
    fn learning_star_needs_both_counts() {
        let rule = BadgeRule::QuizzesAndVideos {
            quizzes: 5,
            videos: 3,
        };
        assert!(!rule.is_satisfied(counts(5, 0, 2)));
        assert!(!rule.is_satisfied(counts(4, 0, 3)));
        assert!(rule.is_satisfied(counts(5, 0, 3)));
    }
}

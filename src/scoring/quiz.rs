// src/scoring/quiz.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Learning topics, each with its own end-of-topic quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Emotions,
    Stress,
    Bullying,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Emotions, Topic::Stress, Topic::Bullying];

    /// Topic id used as key in progress documents and quiz rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Emotions => "emotions",
            Topic::Stress => "stress",
            Topic::Bullying => "bullying",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Topic::Emotions => "Understanding Emotions",
            Topic::Stress => "Managing Stress",
            Topic::Bullying => "Bullying Prevention",
        }
    }

    pub fn quiz(self) -> &'static Quiz {
        match self {
            Topic::Emotions => &EMOTIONS_QUIZ,
            Topic::Stress => &STRESS_QUIZ,
            Topic::Bullying => &BULLYING_QUIZ,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic(pub String);

impl fmt::Display for UnknownTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Topic '{}' not found", self.0)
    }
}

impl std::error::Error for UnknownTopic {}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

/// A two-option multiple choice question with its answer key.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
    pub id: u8,
    pub text: &'static str,
    pub options: [&'static str; 2],
    pub correct_answer: usize,
}

#[derive(Debug, Serialize)]
pub struct Quiz {
    pub topic: Topic,
    pub title: &'static str,
    pub questions: [QuizQuestion; 5],
}

/// Outcome of one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub correct_count: u32,
    pub total_questions: u32,
    pub percentage: u32,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Compares `selections[i]` with question `i`. Missing selections count as incorrect.
    pub fn score(&self, selections: &[Option<usize>]) -> QuizResult {
        let correct_count = self
            .questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                selections.get(*index).copied().flatten() == Some(question.correct_answer)
            })
            .count() as u32;

        let total_questions = self.questions.len() as u32;

        QuizResult {
            correct_count,
            total_questions,
            percentage: percentage(correct_count, total_questions),
        }
    }
}

/// `round(correct / total * 100)`, 0 for an empty quiz.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((f64::from(correct) / f64::from(total)) * 100.0).round() as u32
}

const fn question(
    id: u8,
    text: &'static str,
    options: [&'static str; 2],
    correct_answer: usize,
) -> QuizQuestion {
    QuizQuestion {
        id,
        text,
        options,
        correct_answer,
    }
}

pub static EMOTIONS_QUIZ: Quiz = Quiz {
    topic: Topic::Emotions,
    title: "Understanding Emotions Quiz",
    questions: [
        question(
            1,
            "What should you do when you feel strong emotions?",
            [
                "Take deep breaths and talk to someone you trust",
                "Keep all your feelings inside and never tell anyone",
            ],
            0,
        ),
        question(
            2,
            "Which of these is a healthy way to express your feelings?",
            [
                "Yell at others when you're angry",
                "Draw pictures or write about your feelings",
            ],
            1,
        ),
        question(
            3,
            "Is it okay to feel sad sometimes?",
            [
                "Yes, all emotions are normal and okay to feel",
                "No, we should only feel happy emotions",
            ],
            0,
        ),
        question(
            4,
            "What can you do when you feel scared?",
            [
                "Hide away and never tell anyone",
                "Talk to a grown-up you trust about your fears",
            ],
            1,
        ),
        question(
            5,
            "When you feel excited about something, you should:",
            [
                "Share your joy with friends and family",
                "Keep quiet because being excited is wrong",
            ],
            0,
        ),
    ],
};

pub static STRESS_QUIZ: Quiz = Quiz {
    topic: Topic::Stress,
    title: "Stress Management Quiz",
    questions: [
        question(
            1,
            "What is a good way to handle stress?",
            [
                "Listen to calming music and take deep breaths",
                "Stay up all night worrying about things",
            ],
            0,
        ),
        question(
            2,
            "Where can you create a calm space?",
            [
                "Only in noisy, crowded places",
                "In a quiet corner of your room or under a favorite tree",
            ],
            1,
        ),
        question(
            3,
            "What should you do when you feel overwhelmed?",
            [
                "Keep all your worries to yourself",
                "Talk to someone you trust about your feelings",
            ],
            1,
        ),
        question(
            4,
            "Which activity can help reduce stress?",
            [
                "Drawing or coloring something peaceful",
                "Thinking about all your problems at once",
            ],
            0,
        ),
        question(
            5,
            "When you feel stressed, it's good to:",
            [
                "Take slow, deep breaths like smelling a flower",
                "Hold your breath for as long as possible",
            ],
            0,
        ),
    ],
};

pub static BULLYING_QUIZ: Quiz = Quiz {
    topic: Topic::Bullying,
    title: "Bullying Prevention Quiz",
    questions: [
        question(
            1,
            "What should you do if you see someone being bullied?",
            ["Tell a trusted adult right away", "Ignore it and walk away"],
            0,
        ),
        question(
            2,
            "How can you help prevent bullying?",
            [
                "Keep to yourself and don't talk to anyone",
                "Include others in games and activities",
            ],
            1,
        ),
        question(
            3,
            "If someone is bullying you, you should:",
            [
                "Keep it a secret and handle it alone",
                "Tell a teacher, parent, or counselor",
            ],
            1,
        ),
        question(
            4,
            "What makes a good friend?",
            [
                "Someone who is kind and stands up for others",
                "Someone who only plays with popular kids",
            ],
            0,
        ),
        question(
            5,
            "When you see someone being left out, you should:",
            [
                "Invite them to join your group",
                "Ignore them because they're different",
            ],
            0,
        ),
    ],
};

// src/scoring/dass.rs

//! DASS-Y questionnaire: statements, item-to-scale mapping and the raw response vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::severity::Scale;

/// Assessment id under which DASS-Y results are stored in a student's progress.
pub const DASS_Y_ID: &str = "dass-y";

pub const ITEM_COUNT: usize = 21;

/// Marker for an item that has not been answered yet.
pub const UNANSWERED: i8 = -1;

/// Highest value on the response scale ("Very True").
pub const MAX_RESPONSE: u8 = 3;

/// One questionnaire statement. Ids are 1-based and stable.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AssessmentItem {
    pub id: u8,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResponseOption {
    pub value: u8,
    pub label: &'static str,
}

pub const RESPONSE_OPTIONS: [ResponseOption; 4] = [
    ResponseOption { value: 0, label: "Not True" },
    ResponseOption { value: 1, label: "A Little True" },
    ResponseOption { value: 2, label: "Fairly True" },
    ResponseOption { value: 3, label: "Very True" },
];

const fn item(id: u8, text: &'static str) -> AssessmentItem {
    AssessmentItem { id, text }
}

pub const ITEMS: [AssessmentItem; ITEM_COUNT] = [
    item(1, "I got upset about little things"),
    item(2, "I felt dizzy, like I was about to faint"),
    item(3, "I did not enjoy anything"),
    item(
        4,
        "I had trouble breathing (e.g. fast breathing), even though I wasn't exercising and I was not sick.",
    ),
    item(5, "I hated my life"),
    item(6, "I found myself over-reacting to situations"),
    item(7, "My hands felt shaky"),
    item(8, "I was stressing about lots of things"),
    item(9, "I felt terrified"),
    item(10, "There was nothing nice I could look forward to"),
    item(11, "I was easily irritated"),
    item(12, "I found it difficult to relax"),
    item(13, "I could not stop feeling sad"),
    item(14, "I got annoyed when people interrupted me"),
    item(15, "I felt like I was about to panic"),
    item(16, "I hated myself"),
    item(17, "I felt like I was no good"),
    item(18, "I was easily annoyed"),
    item(
        19,
        "I could feel my heart beating really fast, even though I hadn't done any hard exercise",
    ),
    item(20, "I felt scared for no good reason"),
    item(21, "I felt that life was terrible"),
];

/// Static item ids per scale. The three sets partition `1..=21`.
#[derive(Debug, Clone, Copy)]
pub struct ScaleMapping {
    pub depression: [u8; 7],
    pub anxiety: [u8; 7],
    pub stress: [u8; 7],
}

pub const SCALE_MAPPING: ScaleMapping = ScaleMapping {
    depression: [3, 5, 10, 13, 16, 17, 21],
    anxiety: [2, 4, 7, 9, 15, 19, 20],
    stress: [1, 6, 8, 11, 12, 14, 18],
};

impl ScaleMapping {
    /// Item ids of a subscale. `Total` owns no items of its own.
    pub fn items(&self, scale: Scale) -> Option<&[u8]> {
        match scale {
            Scale::Depression => Some(&self.depression),
            Scale::Anxiety => Some(&self.anxiety),
            Scale::Stress => Some(&self.stress),
            Scale::Total => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    WrongLength { expected: usize, actual: usize },
    UnknownItem(u8),
    OutOfRange { item: u8, value: i16 },
    Incomplete(Vec<u8>),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::WrongLength { expected, actual } => {
                write!(f, "expected {} responses, got {}", expected, actual)
            }
            ResponseError::UnknownItem(id) => write!(f, "unknown assessment item {}", id),
            ResponseError::OutOfRange { item, value } => {
                write!(f, "response {} for item {} is outside 0..=3", value, item)
            }
            ResponseError::Incomplete(items) => {
                write!(f, "unanswered assessment items: {:?}", items)
            }
        }
    }
}

impl std::error::Error for ResponseError {}

/// Raw answers, one slot per item, `-1` while unanswered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentResponse(Vec<i8>);

impl Default for AssessmentResponse {
    fn default() -> Self {
        Self(vec![UNANSWERED; ITEM_COUNT])
    }
}

impl AssessmentResponse {
    /// A fresh response with every item unanswered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a submitted vector: exactly 21 slots, each `-1` or `0..=3`.
    pub fn from_values(values: Vec<i16>) -> Result<Self, ResponseError> {
        if values.len() != ITEM_COUNT {
            return Err(ResponseError::WrongLength {
                expected: ITEM_COUNT,
                actual: values.len(),
            });
        }

        let mut slots = Vec::with_capacity(ITEM_COUNT);
        for (index, value) in values.into_iter().enumerate() {
            if value != i16::from(UNANSWERED) && !(0..=i16::from(MAX_RESPONSE)).contains(&value) {
                return Err(ResponseError::OutOfRange {
                    item: index as u8 + 1,
                    value,
                });
            }
            slots.push(value as i8);
        }
        Ok(Self(slots))
    }

    /// Records the answer for one item (1-based id).
    pub fn answer(&mut self, item_id: u8, value: u8) -> Result<(), ResponseError> {
        if value > MAX_RESPONSE {
            return Err(ResponseError::OutOfRange {
                item: item_id,
                value: i16::from(value),
            });
        }
        let slot = item_id
            .checked_sub(1)
            .and_then(|index| self.0.get_mut(usize::from(index)))
            .ok_or(ResponseError::UnknownItem(item_id))?;
        *slot = value as i8;
        Ok(())
    }

    /// Answer for an item, or `None` when unanswered, missing or out of range.
    pub fn value(&self, item_id: u8) -> Option<u8> {
        let index = usize::from(item_id.checked_sub(1)?);
        match self.0.get(index) {
            Some(v) if (0..=MAX_RESPONSE as i8).contains(v) => Some(*v as u8),
            _ => None,
        }
    }

    /// Item ids without a usable answer, in ascending order.
    pub fn unanswered_items(&self) -> Vec<u8> {
        (1..=ITEM_COUNT as u8)
            .filter(|id| self.value(*id).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unanswered_items().is_empty()
    }

    /// Fails with the list of unanswered items unless every item is answered.
    pub fn ensure_complete(&self) -> Result<(), ResponseError> {
        let missing = self.unanswered_items();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ResponseError::Incomplete(missing))
        }
    }

    pub fn as_slice(&self) -> &[i8] {
        &self.0
    }
}

/// Raw score per subscale, each in `0..=21`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleScores {
    pub depression: u32,
    pub anxiety: u32,
    pub stress: u32,
}

impl ScaleScores {
    pub fn total(&self) -> u32 {
        self.depression + self.anxiety + self.stress
    }

    pub fn get(&self, scale: Scale) -> u32 {
        match scale {
            Scale::Depression => self.depression,
            Scale::Anxiety => self.anxiety,
            Scale::Stress => self.stress,
            Scale::Total => self.total(),
        }
    }
}

/// Output of [`aggregate`]: the scores plus any items that had to be counted as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub scores: ScaleScores,
    pub irregular_items: Vec<u8>,
}

/// Sums each subscale's items. Unanswered or malformed items count as 0 and are
/// reported in `irregular_items`.
pub fn aggregate(response: &AssessmentResponse) -> Aggregation {
    let sum = |items: &[u8]| -> u32 {
        items
            .iter()
            .map(|id| u32::from(response.value(*id).unwrap_or(0)))
            .sum()
    };

    let scores = ScaleScores {
        depression: sum(&SCALE_MAPPING.depression),
        anxiety: sum(&SCALE_MAPPING.anxiety),
        stress: sum(&SCALE_MAPPING.stress),
    };

    let irregular_items = response.unanswered_items();
    if !irregular_items.is_empty() {
        tracing::warn!(
            items = ?irregular_items,
            "assessment scored with unanswered items counted as 0"
        );
    }

    Aggregation {
        scores,
        irregular_items,
    }
}

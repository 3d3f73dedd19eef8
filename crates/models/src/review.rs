use serde::{Deserialize, Serialize};

use crate::errors::{require_non_blank, ModelError};
use crate::record::Record;

/// Date label given to a review at creation time.
pub const JUST_NOW: &str = "Только что";

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: u64,
    pub name: String,
    pub rating: i64,
    pub text: String,
    pub date: String,
}

/// Create/update input. `rating` may arrive as a number or a numeric string
/// and defaults to 5; `date` is ignored on create.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReviewInput {
    pub name: String,
    #[serde(deserialize_with = "crate::de::int_coerce")]
    pub rating: i64,
    pub text: String,
    pub date: String,
}

impl Default for ReviewInput {
    fn default() -> Self {
        Self { name: String::new(), rating: MAX_RATING, text: String::new(), date: String::new() }
    }
}

fn check_rating(rating: i64) -> Result<(), ModelError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ModelError::Validation(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

impl Record for Review {
    type Input = ReviewInput;

    const COLLECTION: &'static str = "reviews";
    const LABEL: &'static str = "review";

    fn id(&self) -> u64 {
        self.id
    }

    fn validate_new(input: &ReviewInput) -> Result<(), ModelError> {
        require_non_blank("name", &input.name)?;
        require_non_blank("text", &input.text)?;
        check_rating(input.rating)
    }

    fn validate_update(input: &ReviewInput) -> Result<(), ModelError> {
        check_rating(input.rating)
    }

    fn create(id: u64, input: ReviewInput) -> Self {
        Self { id, name: input.name, rating: input.rating, text: input.text, date: JUST_NOW.to_string() }
    }

    fn apply(&mut self, input: ReviewInput) {
        self.name = input.name;
        self.rating = input.rating;
        self.text = input.text;
        self.date = input.date;
    }

    fn seed() -> Vec<Self> {
        vec![
            Review {
                id: 1,
                name: "Алексей".into(),
                rating: 5,
                text: "Отличная мойка, машина как новая! Быстро и аккуратно.".into(),
                date: "2 дня назад".into(),
            },
            Review {
                id: 2,
                name: "Марина".into(),
                rating: 4,
                text: "Хорошо почистили салон, приятный персонал.".into(),
                date: "Неделю назад".into(),
            },
        ]
    }
}

//! Keyword-based intent classification.
//!
//! Classification is literal substring containment over the lower-cased
//! question, tested against each intent's keyword list in declaration order.
//! The first list with a hit wins, so `weather` shadows `weather_vn` and a
//! question like "thời tiết hà nội hôm nay" lands on `date` because "hôm nay"
//! is checked before any weather keyword. Callers depend on these outcomes;
//! do not tokenize or stem.

use serde::{Deserialize, Serialize};

/// What kind of question was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Time,
    Date,
    Weather,
    WeatherVn,
    Calculation,
    Greeting,
    Joke,
    News,
    NewsVn,
    DatabaseQuery,
    General,
}

/// Intents answered by an auxiliary responder instead of the LLM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Auxiliary {
    Time,
    Date,
    Weather,
    WeatherVn,
    Calculation,
    Greeting,
    Joke,
    News,
    NewsVn,
}

/// Where a classified question is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Retrieve records, then generate from context and question.
    Retrieval,
    /// Generate from the question alone.
    Generation,
    /// Hand off to an auxiliary responder.
    Auxiliary(Auxiliary),
}

/// Keyword lists in precedence order.
const KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::Time,
        &["mấy giờ", "giờ là", "thời gian", "bao giờ", "now", "time"],
    ),
    (
        Intent::Date,
        &["hôm nay", "ngày nào", "thứ mấy", "date", "today"],
    ),
    (
        Intent::Weather,
        &[
            "thời tiết", "weather", "nắng", "mưa", "nóng", "lạnh", "nhiệt độ", "độ ẩm",
        ],
    ),
    (
        Intent::WeatherVn,
        &[
            "thời tiết việt nam",
            "thời tiết hà nội",
            "thời tiết sài gòn",
            "thời tiết đà nẵng",
            "thời tiết hồ chí minh",
            "thời tiết tphcm",
        ],
    ),
    (
        Intent::Calculation,
        &[
            "tính", "cộng", "trừ", "nhân", "chia", "+", "-", "*", "/", "bằng bao nhiêu",
        ],
    ),
    (
        Intent::Greeting,
        &["xin chào", "hello", "hi", "chào", "helo", "hế lô"],
    ),
    (
        Intent::Joke,
        &["kể chuyện cười", "đùa", "joke", "funny", "hài"],
    ),
    (
        Intent::News,
        &["tin tức", "news", "báo", "tin mới", "thời sự"],
    ),
    (
        Intent::NewsVn,
        &[
            "tin việt nam",
            "báo việt nam",
            "thời sự việt nam",
            "tin trong nước",
            "báo trong nước",
            "thời sự trong nước",
        ],
    ),
    (
        Intent::DatabaseQuery,
        &["ai", "người nào", "tìm", "thông tin", "skill", "hobby"],
    ),
];

/// Classify a question. Never fails; unmatched questions are `General`.
pub fn classify(question: &str) -> Intent {
    let lowered = question.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

impl Intent {
    /// Wire label, e.g. `weather_vn`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Weather => "weather",
            Intent::WeatherVn => "weather_vn",
            Intent::Calculation => "calculation",
            Intent::Greeting => "greeting",
            Intent::Joke => "joke",
            Intent::News => "news",
            Intent::NewsVn => "news_vn",
            Intent::DatabaseQuery => "database_query",
            Intent::General => "general",
        }
    }

    /// Which handler answers this intent.
    pub fn route(&self) -> Route {
        match self {
            Intent::Time => Route::Auxiliary(Auxiliary::Time),
            Intent::Date => Route::Auxiliary(Auxiliary::Date),
            Intent::Weather => Route::Auxiliary(Auxiliary::Weather),
            Intent::WeatherVn => Route::Auxiliary(Auxiliary::WeatherVn),
            Intent::Calculation => Route::Auxiliary(Auxiliary::Calculation),
            Intent::Greeting => Route::Auxiliary(Auxiliary::Greeting),
            Intent::Joke => Route::Auxiliary(Auxiliary::Joke),
            Intent::News => Route::Auxiliary(Auxiliary::News),
            Intent::NewsVn => Route::Auxiliary(Auxiliary::NewsVn),
            Intent::DatabaseQuery => Route::Retrieval,
            Intent::General => Route::Generation,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

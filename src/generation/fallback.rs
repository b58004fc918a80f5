//! Canned answers used when the generation backend is unavailable.

/// Topic keywords and the sentence returned when any of them appears.
const TOPICS: &[(&[&str], &str)] = &[
    (
        &["bóng", "đá bóng", "football"],
        "Tôi thấy có người có kỹ năng đá bóng: Pham Thi C và Nguyen Van A.",
    ),
    (
        &["sách", "đọc sách", "book"],
        "Có người thích đọc sách: Le Van B và Nguyen Van A.",
    ),
    (
        &["âm nhạc", "nhảy", "music"],
        "Tran Thi Huong có sở thích âm nhạc và nhảy.",
    ),
];

const DEFAULT_ANSWER: &str = "Tôi đã tìm thấy thông tin phù hợp. Bạn cần biết thêm chi tiết gì?";

/// Pick a deterministic answer by keyword match against the prompt.
///
/// Matching runs over the whole rendered prompt, so retrieved context can
/// select a topic even when the question itself does not mention it.
pub fn fallback_answer(prompt: &str) -> &'static str {
    let lowered = prompt.to_lowercase();
    TOPICS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, answer)| *answer)
        .unwrap_or(DEFAULT_ANSWER)
}

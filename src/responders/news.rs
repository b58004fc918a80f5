//! Headlines from NewsAPI.org.

use serde::Deserialize;
use tracing::warn;

const TOP_HEADLINES: &str = "https://newsapi.org/v2/top-headlines";
const EVERYTHING: &str = "https://newsapi.org/v2/everything";
const MAX_ARTICLES: usize = 3;
const MAX_TITLE_CHARS: usize = 80;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    source: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    #[serde(default)]
    name: Option<String>,
}

/// Top three headlines: US top stories, or Vietnamese-language coverage of
/// Vietnam when `vietnam` is set.
pub async fn headlines(http: &reqwest::Client, api_key: Option<&str>, vietnam: bool) -> String {
    let Some(api_key) = api_key else {
        return "Dịch vụ tin tức chưa được cấu hình.".to_string();
    };

    let request = if vietnam {
        http.get(EVERYTHING).query(&[
            ("q", "Vietnam"),
            ("language", "vi"),
            ("sortBy", "publishedAt"),
            ("apiKey", api_key),
        ])
    } else {
        http.get(TOP_HEADLINES)
            .query(&[("country", "us"), ("apiKey", api_key)])
    };

    let response = match request.send().await {
        Ok(response) => response.json::<NewsResponse>().await,
        Err(e) => Err(e),
    };

    match response {
        Ok(data) => render(data, vietnam),
        Err(e) => {
            warn!("News lookup failed: {}", e);
            format!("📰 Lỗi dịch vụ tin tức: {}", e)
        }
    }
}

fn render(data: NewsResponse, vietnam: bool) -> String {
    let label = if vietnam { "Việt Nam" } else { "quốc tế" };

    if data.status != "ok" || data.articles.is_empty() {
        return if vietnam {
            "📰 Không thể lấy tin tức Việt Nam lúc này.".to_string()
        } else {
            "📰 Không thể lấy tin tức lúc này.".to_string()
        };
    }

    let lines: Vec<String> = data
        .articles
        .into_iter()
        .take(MAX_ARTICLES)
        .enumerate()
        .filter_map(|(i, article)| {
            let title = article.title.filter(|t| !t.is_empty() && t != "[Removed]")?;
            let title = if vietnam { truncate(&title) } else { title };
            let source = article.source.and_then(|s| s.name).unwrap_or_default();
            Some(format!("{}. {} ({})", i + 1, title, source))
        })
        .collect();

    if lines.is_empty() {
        return format!("📰 Hiện không có tin tức {} nào.", label);
    }

    format!("📰 Tin tức {}:\n{}", label, lines.join("\n"))
}

fn truncate(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let short: String = title.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}...", short)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> NewsResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_render_headlines() {
        let data = parse(
            r#"{"status":"ok","articles":[
                {"title":"First","source":{"name":"AP"}},
                {"title":"[Removed]","source":{"name":"X"}},
                {"title":"Third","source":{"name":"Reuters"}},
                {"title":"Fourth","source":{"name":"BBC"}}
            ]}"#,
        );
        assert_eq!(
            render(data, false),
            "📰 Tin tức quốc tế:\n1. First (AP)\n3. Third (Reuters)"
        );
    }

    #[test]
    fn test_vietnam_titles_are_truncated() {
        let long = "Đ".repeat(100);
        let raw = format!(
            r#"{{"status":"ok","articles":[{{"title":"{}","source":{{"name":"VnExpress"}}}}]}}"#,
            long
        );
        let rendered = render(parse(&raw), true);
        let expected_title = format!("{}...", "Đ".repeat(80));
        assert_eq!(
            rendered,
            format!("📰 Tin tức Việt Nam:\n1. {} (VnExpress)", expected_title)
        );
    }

    #[test]
    fn test_render_failures() {
        assert_eq!(
            render(parse(r#"{"status":"error","code":"apiKeyInvalid"}"#), false),
            "📰 Không thể lấy tin tức lúc này."
        );
        assert_eq!(
            render(parse(r#"{"status":"ok","articles":[{"title":"[Removed]"}]}"#), true),
            "📰 Hiện không có tin tức Việt Nam nào."
        );
    }
}

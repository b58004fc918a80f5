//! Current conditions from WeatherAPI.com.

use serde::Deserialize;
use tracing::warn;

const ENDPOINT: &str = "http://api.weatherapi.com/v1/current.json";
const DEFAULT_CITY: &str = "Hanoi";

/// Question keywords mapped to WeatherAPI location names, checked in order.
const CITIES: &[(&str, &str)] = &[
    ("hà nội", "Hanoi"),
    ("hanoi", "Hanoi"),
    ("sài gòn", "Ho Chi Minh"),
    ("tphcm", "Ho Chi Minh"),
    ("hồ chí minh", "Ho Chi Minh"),
    ("đà nẵng", "Da Nang"),
    ("nha trang", "Nha Trang"),
    ("huế", "Hue"),
    ("cần thơ", "Can Tho"),
];

/// Location to look up for a question, defaulting to Hanoi.
pub fn extract_city(question: &str) -> &'static str {
    let lowered = question.to_lowercase();
    CITIES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, city)| *city)
        .unwrap_or(DEFAULT_CITY)
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    location: Option<Location>,
    current: Option<Current>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
    feelslike_c: f64,
    humidity: f64,
    wind_kph: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

pub async fn current(
    http: &reqwest::Client,
    api_key: Option<&str>,
    question: &str,
    detailed: bool,
) -> String {
    let Some(api_key) = api_key else {
        return if detailed {
            "Dịch vụ thời tiết chưa được cấu hình.".to_string()
        } else {
            "Dịch vụ thời tiết chưa được cấu hình. Vui lòng thêm WEATHER_API_KEY vào file .env"
                .to_string()
        };
    };

    let city = extract_city(question);
    let result = http
        .get(ENDPOINT)
        .query(&[("key", api_key), ("q", city), ("aqi", "no"), ("lang", "vi")])
        .send()
        .await;

    let response = match result {
        Ok(response) => response.json::<WeatherResponse>().await,
        Err(e) => Err(e),
    };

    match response {
        Ok(data) => render(data, detailed),
        Err(e) => {
            warn!("Weather lookup failed: {}", e);
            format!("❌ Lỗi dịch vụ thời tiết: {}", e)
        }
    }
}

fn render(data: WeatherResponse, detailed: bool) -> String {
    match (data.error, data.location, data.current) {
        (None, Some(location), Some(current)) if detailed => format!(
            "🌤️ Thời tiết {}:\n• Tình trạng: {}\n• Nhiệt độ: {}°C (cảm giác như {}°C)\n• Độ ẩm: {}%\n• Gió: {} km/h",
            location.name,
            current.condition.text,
            current.temp_c,
            current.feelslike_c,
            current.humidity,
            current.wind_kph
        ),
        (None, Some(location), Some(current)) => format!(
            "🌤️ Thời tiết {}: {}, nhiệt độ {}°C, độ ẩm {}%, gió {} km/h",
            location.name,
            current.condition.text,
            current.temp_c,
            current.humidity,
            current.wind_kph
        ),
        _ if detailed => "❌ Không thể lấy thông tin thời tiết cho thành phố này.".to_string(),
        (error, _, _) => {
            let message = error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Lỗi không xác định".to_string());
            format!("❌ Không thể lấy thông tin thời tiết: {}", message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "location": {"name": "Da Nang", "country": "Vietnam"},
        "current": {
            "temp_c": 31.2, "feelslike_c": 36.5, "humidity": 70, "wind_kph": 12.6,
            "condition": {"text": "Nắng"}
        }
    }"#;

    #[test]
    fn test_extract_city() {
        assert_eq!(extract_city("Thời tiết Đà Nẵng"), "Da Nang");
        assert_eq!(extract_city("weather in TPHCM"), "Ho Chi Minh");
        assert_eq!(extract_city("trời ở Huế có mưa?"), "Hue");
        assert_eq!(extract_city("weather in Paris"), "Hanoi");
    }

    #[test]
    fn test_render_summary_and_detail() {
        let data: WeatherResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            render(data, false),
            "🌤️ Thời tiết Da Nang: Nắng, nhiệt độ 31.2°C, độ ẩm 70%, gió 12.6 km/h"
        );

        let data: WeatherResponse = serde_json::from_str(SAMPLE).unwrap();
        let detailed = render(data, true);
        assert!(detailed.starts_with("🌤️ Thời tiết Da Nang:\n"));
        assert!(detailed.contains("cảm giác như 36.5°C"));
    }

    #[test]
    fn test_render_api_error() {
        let raw = r#"{"error": {"code": 1006, "message": "No matching location found."}}"#;
        let data: WeatherResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            render(data, false),
            "❌ Không thể lấy thông tin thời tiết: No matching location found."
        );

        let data: WeatherResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            render(data, true),
            "❌ Không thể lấy thông tin thời tiết cho thành phố này."
        );
    }
}

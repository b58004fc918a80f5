//! Auxiliary responders for questions that do not need the student index.
//!
//! Every responder returns display text; upstream failures are reported
//! in the text itself rather than as errors.

mod calc;
mod clock;
mod news;
mod small_talk;
mod weather;

pub use calc::calculate;
pub use clock::{format_date, format_time};
pub use weather::extract_city;

use crate::config::ResponderSettings;
use crate::error::Result;
use crate::http::create_http_client;
use crate::intent::Auxiliary;
use async_trait::async_trait;
use std::time::Duration;
use tracing::instrument;

/// Answers auxiliary intents.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, kind: Auxiliary, question: &str) -> String;
}

/// Responder backed by the local clock, WeatherAPI.com and NewsAPI.
pub struct LiveResponder {
    http: reqwest::Client,
    weather_api_key: Option<String>,
    news_api_key: Option<String>,
}

impl LiveResponder {
    pub fn new(settings: &ResponderSettings) -> Result<Self> {
        Ok(Self {
            http: create_http_client(Duration::from_secs(settings.timeout_seconds))?,
            weather_api_key: settings.weather_api_key.clone().filter(|k| !k.is_empty()),
            news_api_key: settings.news_api_key.clone().filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl Responder for LiveResponder {
    #[instrument(skip(self, question))]
    async fn respond(&self, kind: Auxiliary, question: &str) -> String {
        let now = chrono::Local::now();
        match kind {
            Auxiliary::Time => format_time(&now),
            Auxiliary::Date => format_date(&now),
            Auxiliary::Weather => {
                weather::current(&self.http, self.weather_api_key.as_deref(), question, false)
                    .await
            }
            Auxiliary::WeatherVn => {
                weather::current(&self.http, self.weather_api_key.as_deref(), question, true).await
            }
            Auxiliary::Calculation => calculate(question),
            Auxiliary::Greeting => small_talk::greeting(now.timestamp_subsec_nanos()),
            Auxiliary::Joke => small_talk::joke(now.timestamp_subsec_nanos()),
            Auxiliary::News => news::headlines(&self.http, self.news_api_key.as_deref(), false).await,
            Auxiliary::NewsVn => {
                news::headlines(&self.http, self.news_api_key.as_deref(), true).await
            }
        }
    }
}

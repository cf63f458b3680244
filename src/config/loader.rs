use crate::config::model::Config;
use crate::lineup::model::{FestivalDay, ScheduleSource};
use chrono::NaiveDate;
use reqwest::Url;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://fishingonorfu.hu";
const BASE_URL_NAME: &str = "base url";
const DAY_PAGE_PATH: &str = "fellepok/napi-bontas";

const FESTIVAL_DAYS: [(&str, FestivalDay); 4] = [
    ("2025-06-25", FestivalDay::Szerda),
    ("2025-06-26", FestivalDay::Csutortok),
    ("2025-06-27", FestivalDay::Pentek),
    ("2025-06-28", FestivalDay::Szombat),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config '{name}': '{value}' is not a valid URL")]
    InvalidUrl { name: &'static str, value: String },

    #[error("invalid festival date '{0}'")]
    InvalidDate(String),
}

/// The compiled-in festival schedule
pub fn load_config() -> Result<Config, ConfigError> {
    build_config(DEFAULT_BASE_URL)
}

pub fn build_config(base_url: &str) -> Result<Config, ConfigError> {
    let base_url = parse_url(BASE_URL_NAME, base_url)?;
    let schedule = FESTIVAL_DAYS
        .iter()
        .map(|(date, day)| build_schedule_source(&base_url, date, *day))
        .collect::<Result<Vec<ScheduleSource>, ConfigError>>()?;

    Ok(Config { base_url, schedule })
}

fn build_schedule_source(
    base_url: &Url,
    date: &str,
    day: FestivalDay,
) -> Result<ScheduleSource, ConfigError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(date.to_string()))?;
    let page_url = format!(
        "{}/{}/{}",
        base_url.as_str().trim_end_matches('/'),
        DAY_PAGE_PATH,
        day.slug()
    );

    Ok(ScheduleSource::new(date, day, parse_url(BASE_URL_NAME, &page_url)?))
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|_| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    })
}

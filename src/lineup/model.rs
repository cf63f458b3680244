use chrono::NaiveDate;
use reqwest::Url;
use serde::Serialize;

const OUTPUT_TAG: &str = "act";

/// Festival days, named after the site's Hungarian page slugs
#[derive(strum::IntoStaticStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FestivalDay {
    Szerda,
    Csutortok,
    Pentek,
    Szombat,
}

impl FestivalDay {
    pub fn slug(&self) -> String {
        let name: &'static str = self.into();

        name.to_lowercase()
    }
}

/// One day's lineup page
#[derive(Debug, Clone)]
pub struct ScheduleSource {
    pub date: NaiveDate,
    pub day: FestivalDay,
    pub url: Url,
}

impl ScheduleSource {
    pub fn new(date: NaiveDate, day: FestivalDay, url: Url) -> Self {
        Self { date, day, url }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerDetail {
    /// HTML fragment
    pub description: String,
    pub video_url: Option<String>,
}

/// A scheduled performance slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Act {
    pub stage: String,
    pub start: String,
    pub end: String,
    pub act: String,
    pub blurb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Act {
    pub fn to_output_line(&self) -> serde_json::Result<String> {
        Ok(format!("{} = {}", OUTPUT_TAG, serde_json::to_string(self)?))
    }
}

use crate::lineup::model::ScheduleSource;
use reqwest::Url;

#[derive(Debug)]
pub struct Config {
    pub base_url: Url,
    pub schedule: Vec<ScheduleSource>,
}

use super::api::LineupSource;
use super::error::ScrapeError;
use super::model::Act;
use crate::dom::{closest, element_text, fragment_text, select_first};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use futures::future;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

const PERFORMER_MARKER: &str = ".program-performer";
const NAME_MARKER: &str = ".program-performer-name";
const DURATION_MARKER: &str = ".program-duration";
const STAGE_SECTION_MARKER: &str = ".program-stage-section";
const STAGE_LABEL_MARKER: &str = ".program-stage-label";
const LINK_MARKER: &str = ".program-performer-link";
const DETAIL_URL_ATTRIBUTE: &str = "data-url";

const DURATION_SEPARATOR: char = '-';
const CLOCK_FORMAT: &str = "%H:%M";
const CLOCK_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";
/// Sets starting before this hour belong to the next calendar day
const DAY_START_HOUR: u32 = 6;

lazy_static! {
    static ref PERFORMER: Selector = Selector::parse(PERFORMER_MARKER).unwrap();
    static ref NAME: Selector = Selector::parse(NAME_MARKER).unwrap();
    static ref DURATION: Selector = Selector::parse(DURATION_MARKER).unwrap();
    static ref STAGE_SECTION: Selector = Selector::parse(STAGE_SECTION_MARKER).unwrap();
    static ref STAGE_LABEL: Selector = Selector::parse(STAGE_LABEL_MARKER).unwrap();
    static ref LINK: Selector = Selector::parse(LINK_MARKER).unwrap();
}

/// A performer as listed on a schedule page, before its details are fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerEntry {
    pub act: String,
    pub stage: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub detail_url: String,
}

impl PerformerEntry {
    #[tracing::instrument(skip_all, fields(act = %self.act))]
    pub async fn into_act<S: LineupSource + ?Sized>(self, source: &S) -> Result<Act, ScrapeError> {
        let detail = source.fetch_performer(&self.detail_url).await?;

        debug!("Fetched details");

        Ok(Act {
            stage: self.stage,
            start: self.start.to_string(),
            end: self.end.to_string(),
            act: self.act,
            blurb: fragment_text(&detail.description),
            url: detail.video_url,
        })
    }
}

/// Extracts every performer of a page, all or nothing
pub fn extract_entries(date: NaiveDate, document: &Html) -> Result<Vec<PerformerEntry>, ScrapeError> {
    document
        .select(&PERFORMER)
        .map(|performer| extract_entry(date, &performer))
        .collect()
}

/// Parses a schedule page listed under `date` and fetches every performer's details
/// concurrently. Any failing performer fails the whole page.
#[tracing::instrument(skip(source, document))]
pub async fn parse_page<S: LineupSource + ?Sized>(
    source: &S,
    date: NaiveDate,
    document: Html,
) -> Result<Vec<Act>, ScrapeError> {
    let entries = extract_entries(date, &document)?;
    drop(document);

    if entries.is_empty() {
        warn!("No performers found");
    }

    future::try_join_all(entries.into_iter().map(|entry| entry.into_act(source))).await
}

fn extract_entry(date: NaiveDate, performer: &ElementRef) -> Result<PerformerEntry, ScrapeError> {
    let act = select_first(performer, &NAME)
        .map(|name| element_text(&name))
        .ok_or(ScrapeError::missing(NAME_MARKER))?;
    let duration = select_first(performer, &DURATION)
        .map(|duration| duration.text().collect::<String>())
        .ok_or(ScrapeError::missing(DURATION_MARKER))?;
    let (start_time, end_time) = parse_duration(&duration)?;
    let stage_section =
        closest(performer, &STAGE_SECTION).ok_or(ScrapeError::missing(STAGE_SECTION_MARKER))?;
    let stage = select_first(&stage_section, &STAGE_LABEL)
        .map(|label| element_text(&label))
        .ok_or(ScrapeError::missing(STAGE_LABEL_MARKER))?;
    let detail_url = select_first(performer, &LINK)
        .and_then(|link| link.value().attr(DETAIL_URL_ATTRIBUTE))
        .map(str::to_string)
        .ok_or(ScrapeError::missing(LINK_MARKER))?;

    Ok(PerformerEntry {
        act,
        stage,
        start: resolve_date_time(date, start_time)?,
        end: resolve_date_time(date, end_time)?,
        detail_url,
    })
}

fn parse_duration(duration: &str) -> Result<(NaiveTime, NaiveTime), ScrapeError> {
    let times = duration
        .split(DURATION_SEPARATOR)
        .map(str::trim)
        .collect::<Vec<&str>>();

    match times.as_slice() {
        [start, end] => Ok((parse_clock_time(start)?, parse_clock_time(end)?)),
        _ => Err(ScrapeError::MalformedDuration {
            duration: duration.trim().to_string(),
        }),
    }
}

fn parse_clock_time(time: &str) -> Result<NaiveTime, ScrapeError> {
    NaiveTime::parse_from_str(time, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(time, CLOCK_FORMAT_WITH_SECONDS))
        .map_err(|source| ScrapeError::MalformedTime {
            time: time.to_string(),
            source,
        })
}

/// Late-night sets are listed under the previous evening's page
fn resolve_date_time(date: NaiveDate, time: NaiveTime) -> Result<NaiveDateTime, ScrapeError> {
    let date = if time.hour() < DAY_START_HOUR {
        date.succ_opt().ok_or(ScrapeError::DateOutOfRange(date))?
    } else {
        date
    };

    Ok(date.and_time(time))
}

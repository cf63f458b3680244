use crate::dom;
use crate::lineup::api::LineupSource;
use crate::lineup::error::ScrapeError;
use crate::lineup::model::{Act, ScheduleSource};
use crate::lineup::parser::parse_page;
use futures::future;
use reqwest::Url;
use scraper::Html;
use std::io::{self, Write};
use tracing::info;

pub async fn fetch_document<S: LineupSource + ?Sized>(site: &S, url: &Url) -> Result<Html, ScrapeError> {
    let html = site.fetch_page_html(url).await?;

    Ok(dom::parse_document(&html))
}

/**
   Scrapes every schedule page concurrently.
   Acts keep the schedule's page order and each page's listing order.
   The first failing page fails the whole run.
*/
#[tracing::instrument(skip_all, fields(pages = schedule.len()))]
pub async fn scrape_lineup<S: LineupSource + ?Sized>(
    site: &S,
    schedule: &[ScheduleSource],
) -> Result<Vec<Act>, ScrapeError> {
    let pages = future::try_join_all(schedule.iter().map(|page| scrape_page(site, page))).await?;
    let acts: Vec<Act> = pages.into_iter().flatten().collect();

    info!("Scraped {} acts", acts.len());

    Ok(acts)
}

#[tracing::instrument(skip(site, page), fields(day = ?page.day, url = %page.url))]
async fn scrape_page<S: LineupSource + ?Sized>(
    site: &S,
    page: &ScheduleSource,
) -> Result<Vec<Act>, ScrapeError> {
    let document = fetch_document(site, &page.url).await?;
    let acts = parse_page(site, page.date, document).await?;

    info!("Found {} acts", acts.len());

    Ok(acts)
}

/// One `act = <json>` line per act; write errors such as a closed pipe are returned
pub fn write_acts<W: Write>(out: &mut W, acts: &[Act]) -> io::Result<()> {
    for act in acts {
        writeln!(out, "{}", act.to_output_line()?)?;
    }

    out.flush()
}

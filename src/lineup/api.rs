use super::dto::PerformerResponse;
use super::error::ScrapeError;
use super::model::PerformerDetail;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use tracing::{debug, warn};

const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const REQUESTED_WITH_AJAX: &str = "XMLHttpRequest";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Remote side of the lineup site
#[async_trait]
pub trait LineupSource: Sync {
    /// Raw HTML body of a schedule page
    async fn fetch_page_html(&self, url: &Url) -> Result<String, ScrapeError>;

    /// `url` is the link found in the page markup, absolute or site-relative
    async fn fetch_performer(&self, url: &str) -> Result<PerformerDetail, ScrapeError>;
}

pub struct LineupAPI {
    client: Client,
    base_url: Url,
}

impl LineupAPI {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn resolve(&self, url: &str) -> Result<Url, ScrapeError> {
        self.base_url
            .join(url)
            .map_err(|err| ScrapeError::InvalidUrl {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }

    fn performer_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(
            REQUESTED_WITH_HEADER,
            HeaderValue::from_static(REQUESTED_WITH_AJAX),
        );

        headers
    }
}

#[async_trait]
impl LineupSource for LineupAPI {
    #[tracing::instrument(skip(self, url), fields(url = %url))]
    async fn fetch_page_html(&self, url: &Url) -> Result<String, ScrapeError> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            warn!("Page answered with {}, parsing it anyway", response.status());
        }

        let html = response.text().await?;

        debug!("Received {} bytes", html.len());

        Ok(html)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_performer(&self, url: &str) -> Result<PerformerDetail, ScrapeError> {
        let url = self.resolve(url)?;
        let response = self
            .client
            .get(url.clone())
            .headers(Self::performer_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Performer answered with {}", response.status());
        }

        let json_response = response.text().await?;

        serde_json::from_str::<PerformerResponse>(&json_response)
            .map(PerformerResponse::to_model)
            .map_err(|source| ScrapeError::MalformedJson {
                url: url.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn api() -> LineupAPI {
        LineupAPI::new(Url::parse("https://fishingonorfu.hu").unwrap())
    }

    /// Answers a single request on localhost, yielding the lowercased request head
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];

            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();

                if read == 0 {
                    break;
                }

                request.extend_from_slice(&buffer[..read]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );

            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).to_lowercase()
        });

        (base_url, handle)
    }

    #[test_log::test]
    fn relative_performer_links_should_resolve_against_the_site() {
        let url = api().resolve("/fellepok/eloado/412").unwrap();

        assert_eq!(url.as_str(), "https://fishingonorfu.hu/fellepok/eloado/412");
    }

    #[test_log::test]
    fn absolute_performer_links_should_be_kept() {
        let url = api().resolve("https://cdn.example.com/performer/1").unwrap();

        assert_eq!(url.as_str(), "https://cdn.example.com/performer/1");
    }

    #[test_log::test(tokio::test)]
    async fn page_body_should_be_returned_even_when_not_found() {
        let (base_url, server) =
            serve_once("404 Not Found", "text/html", "<html><body>gone</body></html>").await;
        let page_url = base_url.join("/fellepok/napi-bontas/szerda").unwrap();

        let html = LineupAPI::new(base_url).fetch_page_html(&page_url).await;

        assert_eq!(html.unwrap(), "<html><body>gone</body></html>");
        assert!(server
            .await
            .unwrap()
            .starts_with("get /fellepok/napi-bontas/szerda http/1.1"));
    }

    #[test_log::test(tokio::test)]
    async fn performer_requests_should_send_ajax_json_headers() {
        let (base_url, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"performer":{"description":"<p>Great act</p>","youtube_url":"https://youtu.be/abc"}}"#,
        )
        .await;

        let detail = LineupAPI::new(base_url)
            .fetch_performer("/performer/412")
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("get /performer/412 http/1.1"), "{}", request);
        assert!(request.contains("\r\naccept: application/json\r\n"), "{}", request);
        assert!(request.contains("\r\nx-requested-with: xmlhttprequest\r\n"), "{}", request);
        assert_eq!(detail.description, "<p>Great act</p>");
        assert_eq!(detail.video_url.as_deref(), Some("https://youtu.be/abc"));
    }

    #[test_log::test(tokio::test)]
    async fn non_json_error_body_should_be_a_malformed_payload() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", "text/html", "<h1>Oops</h1>").await;

        let result = LineupAPI::new(base_url).fetch_performer("/performer/412").await;
        server.await.unwrap();

        assert!(
            matches!(result, Err(ScrapeError::MalformedJson { ref url, .. }) if url.ends_with("/performer/412")),
            "{:?}",
            result
        );
    }

    #[test_log::test(tokio::test)]
    async fn unreachable_site_should_be_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
        drop(listener);

        let result = LineupAPI::new(base_url.clone()).fetch_page_html(&base_url).await;

        assert!(matches!(result, Err(ScrapeError::Http(_))), "{:?}", result);
    }
}

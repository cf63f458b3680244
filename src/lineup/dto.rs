use super::model::PerformerDetail;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PerformerResponse {
    pub performer: PerformerPayload,
}

#[derive(Debug, Deserialize)]
pub struct PerformerPayload {
    pub description: String,
    #[serde(default)]
    pub youtube_url: Option<String>,
}

impl PerformerResponse {
    pub fn to_model(self) -> PerformerDetail {
        PerformerDetail {
            description: self.performer.description,
            video_url: self
                .performer
                .youtube_url
                .filter(|url| !url.is_empty()),
        }
    }
}

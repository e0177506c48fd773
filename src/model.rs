//! Data models for API responses
//!
//! Every field is optional or defaulted: the API's schema is trusted but
//! never required, so a partial record still renders.

use serde::{Deserialize, Deserializer};

/// Badge type marking a verified channel
pub const VERIFIED_BADGE: &str = "VERIFIED_CHANNEL";

/// One image variant (thumbnail or avatar)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Badge {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorStats {
    pub subscribers_text: Option<String>,
}

/// Channel that published a video
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Author {
    pub title: Option<String>,
    pub channel_id: Option<String>,
    pub avatar: Vec<Image>,
    pub badges: Vec<Badge>,
    pub stats: AuthorStats,
}

impl Author {
    /// Only the first badge decides verification
    pub fn is_verified(&self) -> bool {
        self.badges.first().is_some_and(|b| b.kind == VERIFIED_BADGE)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        first_url(&self.avatar)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VideoStats {
    #[serde(deserialize_with = "lenient_u64")]
    pub views: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub likes: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub comments: Option<u64>,
}

/// A video as it appears in feed, search and related lists
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub title: Option<String>,
    pub description_snippet: Option<String>,
    pub thumbnails: Vec<Image>,
    #[serde(deserialize_with = "lenient_u64")]
    pub length_seconds: Option<u64>,
    pub author: Option<Author>,
    pub stats: VideoStats,
    pub published_time_text: Option<String>,
    pub is_live_now: bool,
}

impl Video {
    pub fn thumbnail_url(&self) -> Option<&str> {
        first_url(&self.thumbnails)
    }
}

/// A row in a content list; only `type == "video"` rows carry a video
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub video: Option<Video>,
}

impl ContentItem {
    pub fn as_video(&self) -> Option<&Video> {
        if self.kind == "video" {
            self.video.as_ref()
        } else {
            None
        }
    }
}

/// Response shape of the search and related-contents endpoints
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentList {
    pub contents: Vec<ContentItem>,
    pub cursor_next: Option<String>,
}

impl ContentList {
    /// Video rows in response order, other row types skipped
    pub fn videos(&self) -> impl Iterator<Item = &Video> {
        self.contents.iter().filter_map(ContentItem::as_video)
    }
}

/// Response shape of the video details endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Vec<Image>,
    #[serde(deserialize_with = "lenient_u64")]
    pub length_seconds: Option<u64>,
    pub author: Option<Author>,
    pub stats: VideoStats,
    pub publish_date: Option<String>,
}

impl VideoDetails {
    /// Widest thumbnail, used as the player poster
    pub fn poster_url(&self) -> Option<&str> {
        self.thumbnails
            .iter()
            .filter(|t| !t.url.is_empty())
            .max_by_key(|t| t.width.unwrap_or(0))
            .map(|t| t.url.as_str())
    }
}

fn first_url(images: &[Image]) -> Option<&str> {
    images
        .first()
        .map(|i| i.url.as_str())
        .filter(|u| !u.is_empty())
}

/// Accept a number, a numeric string, or anything else as absent
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        serde_json::Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_list_keeps_only_video_rows() {
        let list: ContentList = serde_json::from_value(json!({
            "contents": [
                { "type": "video", "video": { "videoId": "a1", "title": "First" } },
                { "type": "channel", "channel": { "title": "Some channel" } },
                { "type": "playlist" },
                { "type": "video", "video": { "videoId": "b2" } }
            ],
            "cursorNext": "abc"
        }))
        .unwrap();

        let ids: Vec<&str> = list.videos().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2"]);
        assert_eq!(list.cursor_next.as_deref(), Some("abc"));
    }

    #[test]
    fn numbers_are_read_leniently() {
        let video: Video = serde_json::from_value(json!({
            "videoId": "x",
            "lengthSeconds": "125",
            "stats": { "views": 1500, "likes": "1,024", "comments": null }
        }))
        .unwrap();

        assert_eq!(video.length_seconds, Some(125));
        assert_eq!(video.stats.views, Some(1500));
        assert_eq!(video.stats.likes, Some(1024));
        assert_eq!(video.stats.comments, None);
    }

    #[test]
    fn garbage_numbers_become_absent() {
        let video: Video = serde_json::from_value(json!({
            "lengthSeconds": { "nested": true },
            "stats": { "views": "lots" }
        }))
        .unwrap();

        assert_eq!(video.length_seconds, None);
        assert_eq!(video.stats.views, None);
    }

    #[test]
    fn verified_depends_on_first_badge_only() {
        let author: Author = serde_json::from_value(json!({
            "badges": [{ "type": "OFFICIAL_ARTIST_CHANNEL" }, { "type": "VERIFIED_CHANNEL" }]
        }))
        .unwrap();
        assert!(!author.is_verified());

        let author: Author = serde_json::from_value(json!({
            "badges": [{ "type": "VERIFIED_CHANNEL", "text": "Verified" }]
        }))
        .unwrap();
        assert!(author.is_verified());
        assert!(!Author::default().is_verified());
    }

    #[test]
    fn poster_prefers_widest_thumbnail() {
        let details: VideoDetails = serde_json::from_value(json!({
            "thumbnails": [
                { "url": "small.jpg", "width": 168 },
                { "url": "large.jpg", "width": 1280 },
                { "url": "", "width": 4000 }
            ]
        }))
        .unwrap();
        assert_eq!(details.poster_url(), Some("large.jpg"));
        assert_eq!(VideoDetails::default().poster_url(), None);
    }
}

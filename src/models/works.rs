//! Works document (`works.json`).

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorksDocument {
    #[serde(default, deserialize_with = "lenient::object")]
    pub hero: WorksHero,
    #[serde(default, deserialize_with = "lenient::objects")]
    pub videos: Vec<WorkItem>,
}

impl WorksDocument {
    /// Build from parsed JSON, applying defaults for anything missing or malformed.
    pub fn from_value(value: Value) -> Self {
        lenient::from_value_or_default(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksHero {
    #[serde(default, deserialize_with = "lenient::string")]
    pub bg_image: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subtitle: String,
}

/// A video work shown as a poster until the visitor clicks it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub embed_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub poster_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_works_document() {
        let doc = WorksDocument::from_value(json!({
            "hero": {"title": "Reel"},
            "videos": [
                {"title": "A", "embedUrl": "https://youtube.com/embed/a", "posterUrl": "/p.jpg"},
                {"subtitle": 2024}
            ]
        }));

        assert_eq!(doc.hero.title, "Reel");
        assert_eq!(doc.hero.subtitle, "");
        assert_eq!(doc.videos.len(), 2);
        assert_eq!(doc.videos[0].poster_url, "/p.jpg");
        assert_eq!(doc.videos[1].subtitle, "2024");
    }

    #[test]
    fn test_videos_not_an_array() {
        let doc = WorksDocument::from_value(json!({"videos": {"title": "x"}}));
        assert!(doc.videos.is_empty());
    }
}

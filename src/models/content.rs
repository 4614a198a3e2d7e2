//! Site content document (`content.json`).

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// Top-level content document: site chrome, home page and contacts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentDocument {
    #[serde(default, deserialize_with = "lenient::object")]
    pub site: Site,
    #[serde(default, deserialize_with = "lenient::object")]
    pub home: Home,
    #[serde(default, deserialize_with = "lenient::object")]
    pub contacts: Contacts,
}

impl ContentDocument {
    /// Build from parsed JSON, applying defaults for anything missing or malformed.
    pub fn from_value(value: Value) -> Self {
        lenient::from_value_or_default(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default, deserialize_with = "lenient::string")]
    pub footer_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Home {
    #[serde(default, deserialize_with = "lenient::object")]
    pub hero: Hero,
    #[serde(default, deserialize_with = "lenient::object")]
    pub intro: Intro,
    #[serde(default, deserialize_with = "lenient::objects")]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    #[serde(default, deserialize_with = "lenient::string")]
    pub bg_image: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub avatar_image: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subtitle: String,
}

/// Intro block: optional video plus the about text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intro {
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_embed_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_mp4_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_poster_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub about_title: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub about_text: Vec<String>,
}

/// One home page section, rendered as text next to an image carousel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub text: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Contacts {
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::objects")]
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactLink {
    #[serde(default, deserialize_with = "lenient::string")]
    pub href: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document() {
        let doc = ContentDocument::from_value(json!({
            "site": {"footerText": "© 2025"},
            "home": {
                "hero": {"bgImage": "/bg.jpg", "avatarImage": "/me.png", "title": "Hi", "subtitle": "There"},
                "intro": {"videoEmbedUrl": "https://youtube.com/embed/x", "aboutText": ["one", "two"]},
                "sections": [{"title": "Shoots", "text": ["p1"], "images": ["/a.jpg", "/b.jpg"]}]
            },
            "contacts": {"text": "Write me", "links": [{"href": "mailto:a@b.c", "label": "Mail"}]}
        }));

        assert_eq!(doc.site.footer_text, "© 2025");
        assert_eq!(doc.home.hero.avatar_image, "/me.png");
        assert_eq!(doc.home.intro.about_text, vec!["one", "two"]);
        assert_eq!(doc.home.sections[0].images.len(), 2);
        assert_eq!(doc.contacts.links[0].label, "Mail");
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc = ContentDocument::from_value(json!({"home": {"hero": {"title": "x"}}}));
        assert!(doc.home.sections.is_empty());
        assert_eq!(doc.home.hero.title, "x");
    }

    #[test]
    fn test_malformed_entries_keep_positions() {
        let doc = ContentDocument::from_value(json!({
            "home": {"sections": [null, {"title": "Second"}, 7]}
        }));
        assert_eq!(doc.home.sections.len(), 3);
        assert_eq!(doc.home.sections[0], Section::default());
        assert_eq!(doc.home.sections[1].title, "Second");
    }

    #[test]
    fn test_non_object_document_is_default() {
        assert_eq!(ContentDocument::from_value(json!([])), ContentDocument::default());
        assert_eq!(
            ContentDocument::from_value(json!({"home": "oops"})),
            ContentDocument::default()
        );
    }
}

//! URL helpers for embeds, posters and CSS values.

use url::Url;

/// Query parameters forced onto embed URLs when a preview is activated.
const PLAYBACK_PARAMS: [(&str, &str); 3] = [("autoplay", "1"), ("playsinline", "1"), ("rel", "0")];

/// Add autoplay parameters to an embed URL without dropping existing ones.
///
/// Existing values for the forced keys are replaced in place (later
/// duplicates removed); missing keys are appended. Anything that does not
/// parse as an absolute URL is returned unchanged.
pub fn with_autoplay(embed_url: &str) -> String {
    let Ok(mut url) = Url::parse(embed_url) else {
        return embed_url.to_string();
    };

    let mut seen = [false; PLAYBACK_PARAMS.len()];
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (key, value) in url.query_pairs() {
        match PLAYBACK_PARAMS.iter().position(|(k, _)| *k == key) {
            Some(i) if seen[i] => {}
            Some(i) => {
                seen[i] = true;
                pairs.push((key.into_owned(), PLAYBACK_PARAMS[i].1.to_string()));
            }
            None => pairs.push((key.into_owned(), value.into_owned())),
        }
    }

    for (i, (key, value)) in PLAYBACK_PARAMS.iter().enumerate() {
        if !seen[i] {
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);
    url.to_string()
}

/// Resolve a possibly relative URL against an optional base.
///
/// Empty input stays empty; without a base, or when joining fails, the input
/// is returned as-is.
pub fn resolve_url(base: Option<&Url>, maybe_relative: &str) -> String {
    if maybe_relative.is_empty() {
        return String::new();
    }

    match base {
        Some(base) => base
            .join(maybe_relative)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| maybe_relative.to_string()),
        None => maybe_relative.to_string(),
    }
}

/// Build a CSS `url('...')` value, escaping single quotes.
pub fn css_url(url: &str) -> String {
    format!("url('{}')", url.replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_autoplay_appends_params() {
        assert_eq!(
            with_autoplay("https://www.youtube.com/embed/abc123"),
            "https://www.youtube.com/embed/abc123?autoplay=1&playsinline=1&rel=0"
        );
    }

    #[test]
    fn test_with_autoplay_keeps_unrelated_params() {
        assert_eq!(
            with_autoplay("https://player.vimeo.com/video/1?h=ff&autoplay=0"),
            "https://player.vimeo.com/video/1?h=ff&autoplay=1&playsinline=1&rel=0"
        );
    }

    #[test]
    fn test_with_autoplay_drops_duplicate_keys() {
        assert_eq!(
            with_autoplay("https://example.com/e?rel=1&x=2&rel=1"),
            "https://example.com/e?rel=0&x=2&autoplay=1&playsinline=1"
        );
    }

    #[test]
    fn test_with_autoplay_passes_malformed_through() {
        assert_eq!(with_autoplay("not a url"), "not a url");
        assert_eq!(with_autoplay("youtube.com/embed/x"), "youtube.com/embed/x");
        assert_eq!(with_autoplay(""), "");
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/works/").unwrap();
        assert_eq!(
            resolve_url(Some(&base), "../img/poster.jpg"),
            "https://example.com/img/poster.jpg"
        );
        assert_eq!(
            resolve_url(Some(&base), "https://cdn.example.com/p.jpg"),
            "https://cdn.example.com/p.jpg"
        );
        assert_eq!(resolve_url(None, "img/p.jpg"), "img/p.jpg");
        assert_eq!(resolve_url(Some(&base), ""), "");
    }

    #[test]
    fn test_css_url_escapes_quotes() {
        assert_eq!(css_url("/a/b.jpg"), "url('/a/b.jpg')");
        assert_eq!(css_url("/it's.jpg"), "url('/it\\'s.jpg')");
    }
}

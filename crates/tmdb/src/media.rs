//! Image and trailer URL helpers.

use crate::types::Video;

/// Base URL of the TMDB image CDN.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image widths offered by the TMDB CDN that the site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Listing cards.
    W342,
    /// Detail page poster.
    W500,
    /// Carousel and detail page backdrop.
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W342 => "w342",
            ImageSize::W500 => "w500",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

/// Full CDN URL for a TMDB image path such as `/abc.jpg`.
pub fn image_url(path: Option<&str>, size: ImageSize) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    let sep = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{IMAGE_BASE_URL}/{}{sep}{path}", size.as_str()))
}

/// Choose the best trailer from a video list.
///
/// Preference: official YouTube trailer, any YouTube trailer, YouTube teaser.
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    let youtube = |v: &&Video| v.site.eq_ignore_ascii_case("youtube");
    videos
        .iter()
        .filter(youtube)
        .find(|v| v.kind == "Trailer" && v.official)
        .or_else(|| videos.iter().filter(youtube).find(|v| v.kind == "Trailer"))
        .or_else(|| videos.iter().filter(youtube).find(|v| v.kind == "Teaser"))
}

/// Watch URL for a YouTube video key.
pub fn youtube_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(key: &str, site: &str, kind: &str, official: bool) -> Video {
        Video {
            key: key.into(),
            name: key.into(),
            site: site.into(),
            kind: kind.into(),
            official,
        }
    }

    #[test]
    fn image_url_joins_path() {
        assert_eq!(
            image_url(Some("/poster.jpg"), ImageSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            image_url(Some("poster.jpg"), ImageSize::Original).as_deref(),
            Some("https://image.tmdb.org/t/p/original/poster.jpg")
        );
    }

    #[test]
    fn image_url_none_for_missing_path() {
        assert_eq!(image_url(None, ImageSize::W342), None);
        assert_eq!(image_url(Some(" "), ImageSize::W342), None);
    }

    #[test]
    fn prefers_official_youtube_trailer() {
        let videos = vec![
            video("teaser", "YouTube", "Teaser", true),
            video("fan", "YouTube", "Trailer", false),
            video("vimeo", "Vimeo", "Trailer", true),
            video("official", "YouTube", "Trailer", true),
        ];
        assert_eq!(pick_trailer(&videos).unwrap().key, "official");
    }

    #[test]
    fn falls_back_to_teaser() {
        let videos = vec![
            video("clip", "YouTube", "Clip", true),
            video("teaser", "YouTube", "Teaser", false),
        ];
        assert_eq!(pick_trailer(&videos).unwrap().key, "teaser");
    }

    #[test]
    fn no_youtube_video_means_no_trailer() {
        let videos = vec![video("vimeo", "Vimeo", "Trailer", true)];
        assert!(pick_trailer(&videos).is_none());
        assert_eq!(youtube_url("abc"), "https://www.youtube.com/watch?v=abc");
    }
}

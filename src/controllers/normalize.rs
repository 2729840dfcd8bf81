use url::Url;

/// Query parameter that identifies a single video.
const VIDEO_ID_PARAM: &str = "v";

/// Reduce a watch URL to `scheme://host/path?v=<id>`.
///
/// Playlist and tracking parameters make yt-dlp pick the wrong item or walk
/// the whole list, so everything except the first non-empty `v` is dropped
/// along with the fragment. Input that does not parse, or carries no `v`,
/// is returned verbatim.
///
/// Rebuilt URLs use the `url` crate's serialization, so an empty path on an
/// http(s) URL comes back as `/` (`https://example.com?v=id` becomes
/// `https://example.com/?v=id`). Both forms request the same resource.
pub fn normalize_url(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        return raw.to_string();
    };

    let video_id = parsed
        .query_pairs()
        .find(|(key, value)| key == VIDEO_ID_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned());

    match video_id {
        Some(id) => {
            let mut normalized = parsed;
            normalized.set_fragment(None);
            normalized
                .query_pairs_mut()
                .clear()
                .append_pair(VIDEO_ID_PARAM, &id);
            normalized.into()
        }
        None => raw.to_string(),
    }
}

//! Publisher and headline heuristics for upper-cased news URLs
//!
//! Tuned to the event corpus, where every `SOURCEURL` is upper case
//! (`HTTPS://WWW.EXAMPLE.COM/NEWS/SOME-HEADLINE-HERE`).

use regex::Regex;
use std::sync::OnceLock;

use crate::reference::domains::is_excluded_label;

/// Host labels dropped when no publisher label survives the exclusion lists
const HOST_STOPWORDS: &[&str] = &["ENGLISH", "COM"];
/// Path segments that never hold the headline
const PATH_STOPWORDS: &[&str] = &["EN", "NEWS"];

fn scheme_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"HTTPS?://").expect("valid scheme regex"))
}

fn port_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:\.COM|\.NET):\d{0,3}").expect("valid port regex"))
}

fn host_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:WWW\.)?([^/?]+)").expect("valid host regex"))
}

/// Publisher name of a news URL
///
/// Drops the scheme, `.COM`/`.NET` ports and a leading `WWW.`, then returns
/// the last host label that is not a generic, country or section label. When
/// every label is excluded the remaining labels are joined with `-`.
pub fn extract_host(url: &str) -> Option<String> {
    let url = scheme_pattern().replace_all(url, "");
    let url = port_pattern().replace_all(&url, "");
    let full_domain = host_pattern().captures(&url)?.get(1)?.as_str();

    if let Some(label) = full_domain
        .split('.')
        .filter(|label| !is_excluded_label(label))
        .last()
    {
        return Some(label.to_string());
    }

    Some(
        full_domain
            .split('.')
            .filter(|label| !HOST_STOPWORDS.contains(label))
            .collect::<Vec<_>>()
            .join("-"),
    )
}

/// Headline slug of a news URL
///
/// Picks the first path segment with the most hyphens and turns the hyphens
/// into spaces; falls back to the last segment when no segment has a hyphen.
/// Query-style URLs (`NEWSDETAILS.ASPX?ID=56913`) yield that last segment.
pub fn extract_headline(url: &str) -> Option<String> {
    let segments: Vec<&str> = url
        .split('/')
        .filter(|segment| !PATH_STOPWORDS.contains(segment))
        .collect();

    let mut best: Option<(&str, usize)> = None;
    for &segment in &segments {
        let hyphens = segment.matches('-').count();
        if best.map_or(true, |(_, most)| hyphens > most) {
            best = Some((segment, hyphens));
        }
    }

    match best {
        Some((segment, hyphens)) if hyphens > 0 => Some(segment.replace('-', " ")),
        _ => segments.last().map(|segment| segment.to_string()),
    }
}

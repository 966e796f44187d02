//! Source-site inference from novel URLs.
//!
//! Every path that needs a `source_site` (capturing a pending collect,
//! collecting while logged in, adding a novel by hand) goes through
//! [`infer_source_site`], so an unrecognised URL always lands on
//! [`UNKNOWN_SITE`].

/// Site id used when a URL matches none of the known sites.
pub const UNKNOWN_SITE: &str = "unknown";

/// (site id, URL fragment, display name). Checked in order.
const SITES: &[(&str, &str, &str)] = &[
    ("qidian", "qidian", "起点中文网"),
    ("zongheng", "zongheng", "纵横中文网"),
    ("jjwxc", "jjwxc", "晋江文学城"),
    ("17k", "17k", "17K小说网"),
    ("fanqie", "fanqie", "番茄小说"),
];

/// Guess the site id from a novel's source URL.
pub fn infer_source_site(url: &str) -> &'static str {
    let url = url.to_ascii_lowercase();
    SITES
        .iter()
        .find(|(_, fragment, _)| url.contains(fragment))
        .map(|(id, _, _)| *id)
        .unwrap_or(UNKNOWN_SITE)
}

/// Human-readable name for a site id; unknown ids are returned as-is.
pub fn site_display_name(site: &str) -> &str {
    SITES
        .iter()
        .find(|(id, _, _)| *id == site)
        .map(|(_, _, name)| *name)
        .unwrap_or(site)
}

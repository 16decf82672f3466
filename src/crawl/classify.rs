// src/crawl/classify.rs
// =============================================================================
// Decides which URLs are worth fetching.
//
// Three pure functions, no I/O:
// - canonicalize: resolve a (possibly relative) href against a base URL and
//   drop the query string and fragment, so differently-written links to the
//   same page compare equal
// - is_crawlable: reject links to images, video, audio, documents, archives
//   and executables by looking at the path's extension
// - same_domain: keep the crawl on the seed's exact host
// =============================================================================

use url::Url;

// File extensions that never contain readable page text.
// Matched against the lower-cased path, so ".PDF" is skipped too.
pub const SKIP_EXTENSIONS: &[&str] = &[
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".bmp", ".ico",
    // video
    ".mp4", ".webm", ".avi", ".mov", ".mkv",
    // audio
    ".mp3", ".wav", ".ogg", ".flac",
    // documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx",
    // archives
    ".zip", ".rar", ".tar", ".gz", ".7z",
    // executables
    ".exe", ".dmg", ".msi", ".apk",
];

// Resolves `href` against `base` and strips query + fragment.
//
// Returns None only when the href cannot be resolved at all
// (e.g. "http://" with no host). Non-http schemes such as mailto: resolve
// fine; they are rejected later by same_domain because they have no host.
//
// Examples (base = "https://site.test/docs/intro"):
//   "/about"             -> "https://site.test/about"
//   "../faq?page=2#top"  -> "https://site.test/faq"
//   "guide"              -> "https://site.test/docs/guide"
pub fn canonicalize(href: &str, base: &Url) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}

/// True unless the URL's path ends with one of [`SKIP_EXTENSIONS`].
pub fn is_crawlable(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    !SKIP_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

// Exact authority match: "blog.site.test" is NOT the same domain as
// "site.test". Only explicit ports are compared: the scheme is ignored, so
// an http link on an https site stays in the crawl. The url crate already
// drops default ports, so "https://site.test:443/" has no explicit port.
pub fn same_domain(url: &Url, seed: &Url) -> bool {
    match (url.host_str(), seed.host_str()) {
        (Some(host), Some(seed_host)) => host == seed_host && url.port() == seed.port(),
        _ => false,
    }
}

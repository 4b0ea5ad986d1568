//! Upward-traversal resolution of raw references.
//!
//! A reference is resolved against the stylesheet directory: every leading
//! `../` drops one trailing directory, the remainder is appended segment by
//! segment. Climbing stops at the site root, so the local destination always
//! stays below the destination root.

use std::path::Path;

use super::stylesheet::StylesheetReference;
use super::ResolvedAsset;

const PARENT: &str = "../";
const CURRENT: &str = "./";

/// Splits the leading `../` groups off `reference`. Returns the number of
/// levels to climb and the remaining path (leading `./` and `/` removed).
pub(crate) fn split_upward(reference: &str) -> (usize, &str) {
    let mut levels = 0;
    let mut rest = reference;
    loop {
        if let Some(r) = rest.strip_prefix(PARENT) {
            levels += 1;
            rest = r;
        } else if let Some(r) = rest.strip_prefix(CURRENT) {
            rest = r;
        } else {
            break;
        }
    }
    (levels, rest.trim_start_matches('/'))
}

/// Base directories left after climbing `levels` from `directories`.
pub(crate) fn climb(directories: &[String], levels: usize) -> &[String] {
    &directories[..directories.len().saturating_sub(levels)]
}

/// Splits `path` at the first `?` or `#`; the suffix keeps its marker.
fn split_query(path: &str) -> (&str, &str) {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

/// Applies the directory segments of `path` onto `base`: `..` pops (never past
/// the site root), `.` and empty segments are dropped.
pub(crate) fn walk_segments<'a>(base: &'a [String], path: &'a str) -> Vec<&'a str> {
    let mut stack: Vec<&str> = base.iter().map(String::as_str).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            name => stack.push(name),
        }
    }
    stack
}

/// Resolves `raw` to its absolute URL and local destination under `dest_root`.
/// The destination never leaves `dest_root`. A reference that names a
/// directory (`fonts/`, `img/..`) resolves to an empty `file_name`.
pub fn resolve_reference(
    stylesheet: &StylesheetReference,
    dest_root: &Path,
    raw: &str,
) -> ResolvedAsset {
    let (levels, remainder) = split_upward(raw.trim());
    let base = climb(stylesheet.directories(), levels);

    let (path, suffix) = split_query(remainder);
    let (dir_part, leaf) = path.rsplit_once('/').unwrap_or(("", path));
    let (dir_part, leaf) = if leaf == "." || leaf == ".." {
        (path, "")
    } else {
        (dir_part, leaf)
    };
    let directories = walk_segments(base, dir_part);

    let url_path = if directories.is_empty() {
        leaf.to_string()
    } else {
        format!("{}/{}", directories.join("/"), leaf)
    };
    let destination_dir = directories
        .iter()
        .fold(dest_root.to_path_buf(), |dir, segment| dir.join(segment));

    ResolvedAsset {
        absolute_url: format!("{}{}{}", stylesheet.site_root(), url_path, suffix),
        destination_dir,
        file_name: leaf.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sheet(url: &str) -> StylesheetReference {
        StylesheetReference::parse(url).unwrap()
    }

    #[test]
    fn split_upward_counts_levels() {
        assert_eq!(split_upward("x.png"), (0, "x.png"));
        assert_eq!(split_upward("../x.png"), (1, "x.png"));
        assert_eq!(split_upward("../../../img/x.png"), (3, "img/x.png"));
        assert_eq!(split_upward("./img/x.png"), (0, "img/x.png"));
        assert_eq!(split_upward("/img/x.png"), (0, "img/x.png"));
    }

    #[test]
    fn climb_stops_at_site_root() {
        let dirs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(climb(&dirs, 0), &dirs[..]);
        assert_eq!(climb(&dirs, 1), &dirs[..1]);
        assert!(climb(&dirs, 2).is_empty());
        assert!(climb(&dirs, 7).is_empty());
    }

    #[test]
    fn sibling_reference_lands_next_to_stylesheet() {
        let s = sheet("http://h/a/b/style.css");
        let r = resolve_reference(&s, Path::new("/tmp/out"), "bg.png");
        assert_eq!(r.absolute_url, "http://h/a/b/bg.png");
        assert_eq!(r.destination_dir, PathBuf::from("/tmp/out/a/b"));
        assert_eq!(r.file_name, "bg.png");
    }

    #[test]
    fn sibling_url_is_site_root_plus_relative_path() {
        let s = sheet("http://example.com/static/css/site.css");
        for raw in ["logo.svg", "font.woff2", "sprite.gif"] {
            let r = resolve_reference(&s, Path::new("/dst"), raw);
            assert_eq!(
                r.absolute_url,
                format!(
                    "{}{}/{}",
                    s.site_root(),
                    s.stylesheet_relative_path(),
                    raw
                )
            );
            assert_eq!(
                r.destination_dir,
                Path::new("/dst").join(s.stylesheet_relative_path())
            );
        }
    }

    #[test]
    fn nested_reference_keeps_subdirectories() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "img/icons/x.png");
        assert_eq!(r.absolute_url, "http://h/css/img/icons/x.png");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css/img/icons"));
        assert_eq!(r.file_name, "x.png");
    }

    #[test]
    fn leading_slash_stays_relative_to_stylesheet_dir() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "/img/x.png");
        assert_eq!(r.absolute_url, "http://h/css/img/x.png");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css/img"));
    }

    #[test]
    fn one_level_up() {
        let s = sheet("http://h/a/b/style.css");
        let r = resolve_reference(&s, Path::new("/out"), "../x");
        assert_eq!(r.absolute_url, "http://h/a/x");
        assert_eq!(r.destination_dir, PathBuf::from("/out/a"));
        assert_eq!(r.file_name, "x");
    }

    #[test]
    fn chained_levels_strip_exactly_n_directories() {
        let s = sheet("http://h/a/b/c/d/style.css");
        let cases = [
            ("../img/x.png", "http://h/a/b/c/img/x.png", "/out/a/b/c/img"),
            ("../../img/x.png", "http://h/a/b/img/x.png", "/out/a/b/img"),
            ("../../../img/x.png", "http://h/a/img/x.png", "/out/a/img"),
            ("../../../../img/x.png", "http://h/img/x.png", "/out/img"),
        ];
        for (raw, url, dir) in cases {
            let r = resolve_reference(&s, Path::new("/out"), raw);
            assert_eq!(r.absolute_url, url, "url for {raw}");
            assert_eq!(r.destination_dir, PathBuf::from(dir), "dir for {raw}");
            assert_eq!(r.file_name, "x.png");
        }
    }

    #[test]
    fn climbing_past_site_root_is_clamped() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "../../../fonts/a.woff");
        assert_eq!(r.absolute_url, "http://h/fonts/a.woff");
        assert_eq!(r.destination_dir, PathBuf::from("/out/fonts"));
    }

    #[test]
    fn reference_from_root_stylesheet() {
        let s = sheet("http://h/style.css");
        let r = resolve_reference(&s, Path::new("/out"), "img/a.png");
        assert_eq!(r.absolute_url, "http://h/img/a.png");
        assert_eq!(r.destination_dir, PathBuf::from("/out/img"));
    }

    #[test]
    fn query_and_fragment_stay_in_url_only() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "../fonts/icons.eot?#iefix");
        assert_eq!(r.absolute_url, "http://h/fonts/icons.eot?#iefix");
        assert_eq!(r.destination_dir, PathBuf::from("/out/fonts"));
        assert_eq!(r.file_name, "icons.eot");

        let r = resolve_reference(&s, Path::new("/out"), "sprite.svg?v=3");
        assert_eq!(r.absolute_url, "http://h/css/sprite.svg?v=3");
        assert_eq!(r.file_name, "sprite.svg");
    }

    #[test]
    fn resolution_is_deterministic() {
        let s = sheet("http://h/a/b/style.css");
        let first = resolve_reference(&s, Path::new("/out"), "../../x/y.png");
        let second = resolve_reference(&s, Path::new("/out"), "../../x/y.png");
        assert_eq!(first, second);
    }

    #[test]
    fn inner_parent_segments_are_normalized() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "img/../fonts/a.woff");
        assert_eq!(r.absolute_url, "http://h/css/fonts/a.woff");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css/fonts"));
        assert_eq!(r.file_name, "a.woff");

        let r = resolve_reference(&s, Path::new("/out"), "./img/./x/../y.png");
        assert_eq!(r.absolute_url, "http://h/css/img/y.png");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css/img"));
    }

    #[test]
    fn inner_parent_segments_cannot_escape_destination_root() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "img/../../../../escaped.png");
        assert_eq!(r.absolute_url, "http://h/escaped.png");
        assert_eq!(r.destination_dir, PathBuf::from("/out"));
        assert_eq!(r.file_name, "escaped.png");
        assert!(r
            .destination_dir
            .components()
            .all(|c| !matches!(c, std::path::Component::ParentDir)));
    }

    #[test]
    fn slash_in_query_does_not_change_the_path() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "a.png?next=../../b");
        assert_eq!(r.absolute_url, "http://h/css/a.png?next=../../b");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css"));
        assert_eq!(r.file_name, "a.png");
    }

    #[test]
    fn directory_reference_has_no_file_name() {
        let s = sheet("http://h/css/site.css");
        let r = resolve_reference(&s, Path::new("/out"), "fonts/");
        assert_eq!(r.file_name, "");
        assert_eq!(r.absolute_url, "http://h/css/fonts/");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css/fonts"));

        let r = resolve_reference(&s, Path::new("/out"), "img/..");
        assert_eq!(r.file_name, "");
        assert_eq!(r.destination_dir, PathBuf::from("/out/css"));
    }

    #[test]
    fn walk_segments_pops_and_clamps() {
        let base = vec!["a".to_string(), "b".to_string()];
        assert_eq!(walk_segments(&base, "c/./d"), vec!["a", "b", "c", "d"]);
        assert_eq!(walk_segments(&base, "../c"), vec!["a", "c"]);
        assert!(walk_segments(&base, "../../../..").is_empty());
    }
}

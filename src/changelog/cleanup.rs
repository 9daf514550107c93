//! Post-processing of changelog text.
//!
//! Removes `###` sections that ended up with no content and gives empty `##`
//! version sections the dependency-only line. Headings are found with a regex;
//! lines inside fenced code blocks are never treated as headings.

use regex::Regex;
use std::sync::OnceLock;

fn heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^(#{1,6})[ \t]+\S").expect("heading regex is valid"))
}

/// Heading level of each line, or `None` for non-heading lines.
fn heading_levels(lines: &[&str]) -> Vec<Option<usize>> {
    let mut in_fence = false;
    lines
        .iter()
        .map(|line| {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                return None;
            }
            if in_fence {
                return None;
            }
            heading_regex()
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().len())
        })
        .collect()
}

/// Index of the next heading at `max_level` or shallower after `start`.
fn section_end(levels: &[Option<usize>], start: usize, max_level: usize) -> usize {
    levels[start + 1..]
        .iter()
        .position(|l| matches!(l, Some(level) if *level <= max_level))
        .map(|offset| start + 1 + offset)
        .unwrap_or(levels.len())
}

fn is_blank(lines: &[&str]) -> bool {
    lines.iter().all(|l| l.trim().is_empty())
}

/// Count empty `###` sections and empty `##` version sections.
pub fn find_empty_sections(text: &str) -> usize {
    let lines: Vec<&str> = text.lines().collect();
    let levels = heading_levels(&lines);
    (0..lines.len())
        .filter(|&i| matches!(levels[i], Some(2) | Some(3)))
        .filter(|&i| {
            let level = levels[i].unwrap_or(0);
            is_blank(&lines[i + 1..section_end(&levels, i, level)])
        })
        .count()
}

/// Drop empty `###` sections, then fill empty `##` sections with
/// `dependency_only_text`. Applying it twice changes nothing.
pub fn cleanup(text: &str, dependency_only_text: &str) -> String {
    let without_empty = remove_empty_subsections(text);
    fill_empty_versions(&without_empty, dependency_only_text)
}

fn remove_empty_subsections(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let levels = heading_levels(&lines);
    let mut keep = vec![true; lines.len()];

    for i in 0..lines.len() {
        if levels[i] != Some(3) {
            continue;
        }
        let end = section_end(&levels, i, 3);
        if is_blank(&lines[i + 1..end]) {
            keep[i..end].iter_mut().for_each(|k| *k = false);
        }
    }

    join_lines(
        lines
            .iter()
            .zip(&keep)
            .filter(|(_, keep)| **keep)
            .map(|(line, _)| *line),
        text.ends_with('\n'),
    )
}

fn fill_empty_versions(text: &str, dependency_only_text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let levels = heading_levels(&lines);
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + 4);

    let mut i = 0;
    while i < lines.len() {
        out.push(lines[i]);
        if levels[i] == Some(2) {
            let end = section_end(&levels, i, 2);
            if is_blank(&lines[i + 1..end]) {
                out.push("");
                out.push(dependency_only_text);
                if end < lines.len() {
                    out.push("");
                }
                i = end;
                continue;
            }
        }
        i += 1;
    }

    join_lines(out.into_iter(), !text.is_empty())
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>, trailing_newline: bool) -> String {
    let mut out = lines.collect::<Vec<_>>().join("\n");
    if trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

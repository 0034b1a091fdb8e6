//! Line grammar for turning a model-written markdown plan into task titles.
//!
//! ```text
//! line     := indent marker (SP | TAB)+ body
//! marker   := "-" | "*" | "+" | DIGIT+ ("." | ")")
//! body     := checkbox? text
//! checkbox := "[" (" " | "x" | "X") "]" SP+
//! ```
//!
//! Lines that do not match (headings, prose, rules, blank lines) are skipped.
//! Bold markers (`**`, `__`) are removed from the text.

use serde::{Deserialize, Serialize};

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ListMarker {
    Bullet(char),
    Ordinal(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanStep {
    pub title: String,
    pub marker: ListMarker,
    /// Indent width in columns; nested steps have a larger depth.
    pub depth: usize,
}

pub fn parse_plan(text: &str) -> Vec<PlanStep> {
    text.lines().filter_map(parse_line).collect()
}

pub fn plan_titles(text: &str) -> Vec<String> {
    parse_plan(text).into_iter().map(|step| step.title).collect()
}

fn parse_line(line: &str) -> Option<PlanStep> {
    let rest = line.trim_start_matches([' ', '\t']);
    let depth = indent_width(&line[..line.len() - rest.len()]);

    let (marker, after_marker) = split_marker(rest)?;
    if !after_marker.starts_with([' ', '\t']) {
        return None;
    }

    let body = strip_checkbox(after_marker.trim_start());
    let title = body.replace("**", "").replace("__", "").trim().to_owned();
    if title.is_empty() || is_rule(&title) {
        return None;
    }

    Some(PlanStep {
        title,
        marker,
        depth,
    })
}

fn split_marker(text: &str) -> Option<(ListMarker, &str)> {
    let first = text.chars().next()?;
    if matches!(first, '-' | '*' | '+') {
        return Some((ListMarker::Bullet(first), &text[first.len_utf8()..]));
    }

    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after_digits = &text[digits..];
    let after_delimiter = after_digits
        .strip_prefix('.')
        .or_else(|| after_digits.strip_prefix(')'))?;
    let ordinal = text[..digits].parse().ok()?;
    Some((ListMarker::Ordinal(ordinal), after_delimiter))
}

fn strip_checkbox(body: &str) -> &str {
    for checkbox in ["[ ]", "[x]", "[X]"] {
        if let Some(rest) = body.strip_prefix(checkbox) {
            if rest.starts_with(' ') {
                return rest.trim_start();
            }
        }
    }
    body
}

// `* * *` and `- - -` are thematic breaks, not list items.
fn is_rule(title: &str) -> bool {
    title
        .chars()
        .all(|c| matches!(c, '-' | '*' | '_') || c.is_whitespace())
}

fn indent_width(indent: &str) -> usize {
    indent
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bullets_ordinals_and_bold() {
        let titles = plan_titles("- Buy milk\n- **Call dentist**\n1. Pay rent");
        assert_eq!(titles, vec!["Buy milk", "Call dentist", "Pay rent"]);
    }

    #[test]
    fn skips_headings_prose_and_rules() {
        let plan = "# Weekly plan\n\nHere is your plan:\n\n---\n* * *\n\
                    * Draft outline\n+ Review notes\n\n**Tip:** keep it short";
        assert_eq!(plan_titles(plan), vec!["Draft outline", "Review notes"]);
    }

    #[test]
    fn records_marker_and_depth() {
        let steps = parse_plan("2) Book venue\n    - Call caterer\n\t* Send invites");
        assert_eq!(steps[0].marker, ListMarker::Ordinal(2));
        assert_eq!(steps[0].depth, 0);
        assert_eq!(steps[1].marker, ListMarker::Bullet('-'));
        assert_eq!(steps[1].depth, 4);
        assert_eq!(steps[2].marker, ListMarker::Bullet('*'));
        assert_eq!(steps[2].depth, 4);
    }

    #[test]
    fn requires_space_after_marker() {
        assert!(parse_plan("-dash\n1.5 liters\n2023 was fine").is_empty());
    }

    #[test]
    fn removes_task_list_checkboxes() {
        let titles = plan_titles("- [ ] Pack bag\n- [x] Buy ticket\n- [link](url)");
        assert_eq!(titles, vec!["Pack bag", "Buy ticket", "[link](url)"]);
    }

    #[test]
    fn drops_empty_items() {
        assert!(plan_titles("- \n- ****\n1. ").is_empty());
    }

    #[test]
    fn keeps_inner_text_of_bold_prefix() {
        let titles = plan_titles("1. **Week 1:** Learn syntax\n2. __Week 2__: Build a CLI");
        assert_eq!(titles, vec!["Week 1: Learn syntax", "Week 2: Build a CLI"]);
    }
}

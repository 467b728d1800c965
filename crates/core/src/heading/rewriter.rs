use tracing::debug;

use super::types::{HeadingEntry, HeadingError, RewritePlan, SkipReason};

/// Markdown inserted for a title, padded so it always sits in its own block.
pub fn heading_block(title: &str) -> String {
    format!("\n\n# {title}\n\n")
}

/// Decide how to give a note the level-1 heading `title`.
///
/// | level-1 headings | condition          | plan            |
/// |------------------|--------------------|-----------------|
/// | 0                |                    | `Insert`        |
/// | 1                | blank text         | `Replace`       |
/// | 1                | non-blank text     | `Skip(HasTitle)`|
/// | 2+               | no level-6 heading | `Shift`         |
/// | 2+               | a level-6 heading  | `Skip(TooDeep)` |
///
/// # Errors
/// Returns an error when the outline itself is malformed: a level outside
/// 1..=6, a span whose start is past its end, or spans out of document order.
pub fn plan(
    title: &str,
    headings: &[HeadingEntry],
    frontmatter_end: usize,
) -> Result<RewritePlan, HeadingError> {
    validate(headings)?;

    let titles: Vec<&HeadingEntry> = headings.iter().filter(|h| h.level == 1).collect();

    let plan = match titles.as_slice() {
        [] => RewritePlan::Insert { title: title.to_string(), offset: frontmatter_end },
        [only] if only.text.trim().is_empty() => RewritePlan::Replace {
            title: title.to_string(),
            start: only.start_offset,
            end: only.end_offset,
        },
        [_] => RewritePlan::Skip(SkipReason::HasTitle),
        _ if headings.iter().any(|h| h.level == 6) => RewritePlan::Skip(SkipReason::TooDeep),
        _ => RewritePlan::Shift {
            title: title.to_string(),
            lines: headings.iter().map(|h| h.start_line).collect(),
            offset: frontmatter_end,
        },
    };

    debug!(route = plan.route(), headings = headings.len(), "planned heading rewrite");
    Ok(plan)
}

fn validate(headings: &[HeadingEntry]) -> Result<(), HeadingError> {
    let mut previous_end = 0;
    for h in headings {
        if !(1..=6).contains(&h.level) {
            return Err(HeadingError::InvalidHeadingLevel(h.level));
        }
        if h.start_offset > h.end_offset || h.start_offset < previous_end {
            return Err(HeadingError::InvalidHeadingSpan {
                start: h.start_offset,
                end: h.end_offset,
            });
        }
        previous_end = h.end_offset;
    }
    Ok(())
}

/// Apply a plan to the note text it was computed from.
///
/// # Errors
/// Returns an error when the plan's offsets or lines do not fit `text`.
pub fn apply(plan: &RewritePlan, text: &str) -> Result<String, HeadingError> {
    match plan {
        RewritePlan::Insert { title, offset } => splice(text, *offset, *offset, title),
        RewritePlan::Replace { title, start, end } => splice(text, *start, *end, title),
        RewritePlan::Shift { title, lines, offset } => {
            check_span(text, *offset, *offset)?;
            let (shifted, offset) = shift(text, lines, *offset)?;
            splice(&shifted, offset, offset, title)
        }
        RewritePlan::Skip(_) => Ok(text.to_string()),
    }
}

fn check_span(text: &str, start: usize, end: usize) -> Result<(), HeadingError> {
    if start > end
        || end > text.len()
        || !text.is_char_boundary(start)
        || !text.is_char_boundary(end)
    {
        return Err(HeadingError::InvalidHeadingSpan { start, end });
    }
    Ok(())
}

fn splice(text: &str, start: usize, end: usize, title: &str) -> Result<String, HeadingError> {
    check_span(text, start, end)?;

    let before = text[..start].trim_end();
    let after = text[end..].trim_start();
    let block = heading_block(title);

    let mut out = String::with_capacity(before.len() + block.len() + after.len());
    out.push_str(before);
    out.push_str(&block);
    out.push_str(after);
    Ok(out.trim().to_string())
}

/// Demote the heading starting on every listed line by one level.
///
/// ATX headings get one more `#` after their indentation. Setext headings
/// are rewritten as ATX headings one level deeper, since an underline
/// cannot express levels past 2.
///
/// Returns the new text and `offset` moved by the edits made before it, so
/// it still points at the same place.
fn shift(text: &str, lines: &[usize], offset: usize) -> Result<(String, usize), HeadingError> {
    let spans = line_spans(text);

    let mut lines = lines.to_vec();
    lines.sort_unstable();
    lines.dedup();

    let mut edits: Vec<(usize, usize, String)> = Vec::with_capacity(lines.len());
    for &line in &lines {
        let &(start, end) = spans
            .get(line)
            .ok_or(HeadingError::InvalidHeadingLine { line, lines: spans.len() })?;
        let raw = &text[start..end];
        let indent = raw.len() - raw.trim_start_matches(' ').len();

        if raw[indent..].starts_with('#') {
            edits.push((start + indent, start + indent, "#".to_string()));
            continue;
        }

        let (underline, level) =
            setext_underline(text, &spans, line).ok_or(HeadingError::NotAHeading(line))?;
        let content: Vec<&str> =
            spans[line..underline].iter().map(|&(s, e)| text[s..e].trim()).collect();
        let atx = format!("{} {}", "#".repeat(usize::from(level) + 1), content.join(" "));
        edits.push((start, spans[underline].1, atx));
    }

    let mut out = String::with_capacity(text.len() + edits.len());
    let mut copied = 0;
    let mut moved = offset;
    for (start, end, replacement) in edits {
        if start < copied {
            continue;
        }
        out.push_str(&text[copied..start]);
        out.push_str(&replacement);
        copied = end;
        if start < offset {
            moved = (moved + replacement.len()).saturating_sub(end - start);
        }
    }
    out.push_str(&text[copied..]);

    Ok((out, moved))
}

/// Start and end of every line, terminators (`\n`, `\r\n`) excluded.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, _) in text.match_indices('\n') {
        let end = if text[..i].ends_with('\r') { i - 1 } else { i };
        spans.push((start, end));
        start = i + 1;
    }
    spans.push((start, text.len()));
    spans
}

/// Underline line and level of a setext heading whose text starts on `line`.
fn setext_underline(text: &str, spans: &[(usize, usize)], line: usize) -> Option<(usize, u8)> {
    for (i, &(start, end)) in spans.iter().enumerate().skip(line + 1) {
        let trimmed = text[start..end].trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().all(|c| c == '=') {
            return Some((i, 1));
        }
        if trimmed.chars().all(|c| c == '-') {
            return Some((i, 2));
        }
    }
    None
}

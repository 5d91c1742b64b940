use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 14.0,
            font_weight: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn line_height(&self, style: &TextStyle) -> f64 {
        self.measure("", style).height
    }
}

/// Font-independent measurer: every column (per `unicode-width`, so CJK counts double) is
/// `char_width_factor * font_size` wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<String> {
        let t = text
            .replace("<br/>", "\n")
            .replace("<br />", "\n")
            .replace("<br>", "\n");
        t.split('\n').map(|s| s.to_string()).collect()
    }

    fn factors(&self) -> (f64, f64) {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        (char_width_factor, line_height_factor)
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (char_width_factor, line_height_factor) = self.factors();
        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

fn text_width(measurer: &dyn TextMeasurer, text: &str, style: &TextStyle) -> f64 {
    measurer.measure(text, style).width
}

/// Splits a word that is wider than `max_width` into chunks that fit. Always makes progress
/// (at least one char per chunk).
fn break_word(
    word: &str,
    max_width: f64,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for ch in word.chars() {
        cur.push(ch);
        if text_width(measurer, &cur, style) > max_width && cur.chars().count() > 1 {
            cur.pop();
            out.push(std::mem::take(&mut cur));
            cur.push(ch);
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Greedy word wrap of `text` into lines no wider than `max_width`. Explicit line breaks
/// (`\n`, `<br>`) are kept. When `max_lines` is set, overflow is cut and the last kept line
/// ends with an ellipsis.
pub fn wrap_label(
    text: &str,
    max_width: f64,
    max_lines: Option<usize>,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Vec<String> {
    let max_width = if max_width.is_finite() {
        max_width.max(0.0)
    } else {
        f64::MAX
    };
    let mut lines: Vec<String> = Vec::new();
    for paragraph in DeterministicTextMeasurer::normalized_text_lines(text) {
        let mut cur = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if text_width(measurer, &candidate, style) <= max_width {
                cur = candidate;
                continue;
            }
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            if text_width(measurer, word, style) <= max_width {
                cur = word.to_string();
            } else {
                let mut chunks = break_word(word, max_width, measurer, style);
                cur = chunks.pop().unwrap_or_default();
                lines.extend(chunks);
            }
        }
        lines.push(cur);
    }

    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if let Some(max) = max_lines {
        let max = max.max(1);
        if lines.len() > max {
            lines.truncate(max);
            if let Some(last) = lines.last_mut() {
                *last = with_ellipsis(last, max_width, measurer, style);
            }
        }
    }
    lines
}

fn with_ellipsis(
    line: &str,
    max_width: f64,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> String {
    let mut base = line.trim_end().to_string();
    loop {
        let candidate = format!("{base}…");
        if base.is_empty() || text_width(measurer, &candidate, style) <= max_width {
            return candidate;
        }
        base.pop();
        base = base.trim_end().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle {
            font_family: None,
            font_size: 10.0,
            font_weight: None,
        }
    }

    #[test]
    fn deterministic_measurer_counts_columns() {
        let m = DeterministicTextMeasurer::default();
        let metrics = m.measure("abcd", &style());
        assert_eq!(metrics.width, 24.0);
        assert_eq!(metrics.height, 12.0);
        assert_eq!(metrics.line_count, 1);

        // Wide glyphs take two columns.
        assert_eq!(m.measure("設計", &style()).width, 24.0);
        assert_eq!(m.measure("a<br>bcd", &style()).line_count, 2);
        assert_eq!(m.line_height(&style()), 12.0);
    }

    #[test]
    fn wrap_is_greedy_on_word_boundaries() {
        let m = DeterministicTextMeasurer::default();
        // 6px per char: 60px fits 10 chars.
        let lines = wrap_label("Design database schema", 60.0, None, &m, &style());
        assert_eq!(lines, vec!["Design", "database", "schema"]);
        let lines = wrap_label("Set up CI", 60.0, None, &m, &style());
        assert_eq!(lines, vec!["Set up CI"]);
    }

    #[test]
    fn long_words_are_broken() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_label("abcdefghijklmnop", 30.0, None, &m, &style());
        assert_eq!(lines, vec!["abcde", "fghij", "klmno", "p"]);
    }

    #[test]
    fn overflow_is_ellipsized() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_label("one two three four", 30.0, Some(2), &m, &style());
        assert_eq!(lines, vec!["one", "two…"]);
    }

    #[test]
    fn zero_width_still_makes_progress() {
        let m = DeterministicTextMeasurer::default();
        let lines = wrap_label("abc", 0.0, None, &m, &style());
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}

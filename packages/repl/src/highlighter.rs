use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Colors cycled through by bracket nesting level.
const DEPTH_COLORS: [Color; 3] = [Color::Yellow, Color::Magenta, Color::Cyan];

/// Highlighter that colors brackets by nesting depth within the line.
///
/// String literals are green, line comments are dimmed, and closers
/// without a matching opener on the line are red.
pub struct ReplHighlighter {
    line_comment: Option<String>,
}

impl ReplHighlighter {
    pub fn new() -> Self {
        Self {
            line_comment: Some("//".to_string()),
        }
    }

    pub fn with_line_comment(mut self, marker: Option<&str>) -> Self {
        self.line_comment = marker.filter(|m| !m.is_empty()).map(str::to_string);
        self
    }

    fn bracket_style(depth: usize) -> Style {
        Style::new().bold().fg(DEPTH_COLORS[depth % DEPTH_COLORS.len()])
    }
}

impl Default for ReplHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulates runs of equally-styled text.
struct Runs {
    styled: StyledText,
    style: Style,
    text: String,
}

impl Runs {
    fn new() -> Self {
        Self {
            styled: StyledText::new(),
            style: Style::new(),
            text: String::new(),
        }
    }

    fn push(&mut self, style: Style, piece: &str) {
        if style != self.style && !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.styled.push((self.style, text));
        }
        self.style = style;
        self.text.push_str(piece);
    }

    fn finish(mut self) -> StyledText {
        if !self.text.is_empty() {
            self.styled.push((self.style, self.text));
        }
        self.styled
    }
}

impl Highlighter for ReplHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut runs = Runs::new();
        let mut open: Vec<char> = Vec::new();
        let mut in_string = false;
        let mut escaped = false;
        let string_style = Style::new().fg(Color::Green);

        for (pos, c) in line.char_indices() {
            let piece = &line[pos..pos + c.len_utf8()];

            if in_string {
                runs.push(string_style, piece);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }

            if let Some(marker) = self.line_comment.as_deref() {
                if line[pos..].starts_with(marker) {
                    runs.push(Style::new().fg(Color::DarkGray), &line[pos..]);
                    break;
                }
            }

            match c {
                '"' => {
                    in_string = true;
                    runs.push(string_style, piece);
                }
                '(' | '[' | '{' => {
                    runs.push(Self::bracket_style(open.len()), piece);
                    open.push(c);
                }
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if open.last() == Some(&expected) {
                        open.pop();
                        runs.push(Self::bracket_style(open.len()), piece);
                    } else {
                        runs.push(Style::new().bold().fg(Color::Red), piece);
                    }
                }
                _ => runs.push(Style::new(), piece),
            }
        }

        runs.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(styled: &StyledText) -> Vec<&str> {
        styled.buffer.iter().map(|(_, s)| s.as_str()).collect()
    }

    #[test]
    fn highlight_empty_returns_empty() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("", 0);
        assert!(styled.buffer.is_empty());
    }

    #[test]
    fn plain_text_is_one_unstyled_run() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("let x = 1", 0);
        assert_eq!(pieces(&styled), vec!["let x = 1"]);
        assert_eq!(styled.buffer[0].0.foreground, None);
    }

    #[test]
    fn brackets_colored_by_depth() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("([x])", 0);
        assert_eq!(pieces(&styled), vec!["(", "[", "x", "]", ")"]);
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Yellow));
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Magenta));
        assert_eq!(styled.buffer[3].0.foreground, Some(Color::Magenta));
        assert_eq!(styled.buffer[4].0.foreground, Some(Color::Yellow));
        assert!(styled.buffer[0].0.is_bold);
    }

    #[test]
    fn depth_colors_wrap_around() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("((((", 0);
        assert_eq!(styled.buffer[0].0.foreground, Some(Color::Yellow));
        assert_eq!(styled.buffer[3].0.foreground, Some(Color::Yellow));
        assert_eq!(styled.buffer.len(), 4);
    }

    #[test]
    fn unmatched_closer_is_red() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("(]", 0);
        assert_eq!(styled.buffer[1].1, "]");
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Red));
    }

    #[test]
    fn brackets_inside_strings_are_ignored() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("f(\"a)\\\"b\")", 0);
        assert_eq!(pieces(&styled), vec!["f", "(", "\"a)\\\"b\"", ")"]);
        assert_eq!(styled.buffer[2].0.foreground, Some(Color::Green));
        assert_eq!(styled.buffer[3].0.foreground, Some(Color::Yellow));
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let highlighter = ReplHighlighter::new();
        let styled = highlighter.highlight("x // (not a bracket", 0);
        assert_eq!(pieces(&styled), vec!["x ", "// (not a bracket"]);
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::DarkGray));
    }

    #[test]
    fn comments_can_be_disabled() {
        let highlighter = ReplHighlighter::new().with_line_comment(None);
        let styled = highlighter.highlight("// (", 0);
        assert_eq!(pieces(&styled), vec!["// ", "("]);
    }

    #[test]
    fn empty_comment_marker_disables_comments() {
        let highlighter = ReplHighlighter::new().with_line_comment(Some(""));
        let styled = highlighter.highlight("x (y)", 0);
        assert_eq!(pieces(&styled), vec!["x ", "(", "y", ")"]);
        assert_eq!(styled.buffer[1].0.foreground, Some(Color::Yellow));
    }

    #[test]
    fn default_creates_same_as_new() {
        let default: ReplHighlighter = Default::default();
        assert_eq!(default.line_comment, ReplHighlighter::new().line_comment);
    }
}

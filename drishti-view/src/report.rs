//! Plain-text info windows printed to the terminal.

use drishti_log::scene::{auto_choices_text, match_info_text};
use drishti_log::{LineClass, ParsedLog};

/// Gutter marker for a raw log line.
fn marker(class: LineClass) -> char {
    match class {
        LineClass::Plain => ' ',
        LineClass::Pose | LineClass::Meta => '*',
        LineClass::Malformed => '!',
    }
}

/// Raw log overview: one line per log line with its classification.
///
/// `current` marks the line of the sample on screen.
pub fn raw_log_text(log: &ParsedLog, current: Option<usize>) -> String {
    let width = log.lines.len().to_string().len();
    log.lines
        .iter()
        .zip(&log.classes)
        .enumerate()
        .map(|(i, (line, class))| {
            let cursor = if Some(i) == current { '>' } else { ' ' };
            format!("{}{} {:>width$} | {}", cursor, marker(*class), i, line, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Match info and auto choices windows.
pub fn info_text(log: &ParsedLog) -> String {
    format!(
        "[Match Info]\n{}\n\n[Auto Choices]\n{}",
        match_info_text(Some(&log.match_info)),
        auto_choices_text(Some(&log.auto_choices))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> ParsedLog {
        drishti_log::parse_lines([
            "boot",
            r#"S_Info: <Event name="StateInfo" time="0" xPos="0" yPos="0" heading="0" xTarget="0" yTarget="0" headingTarget="0" state="GO"/>"#,
            "X_Info: <broken",
            r#"M_Info: <Info name="MatchInfo" date="d" type="Qualification" number="3"/>"#,
            r#"A_Info: <Info name="AutoChoices" alliance="red"/>"#,
        ])
        .unwrap()
    }

    #[test]
    fn test_raw_log_markers() {
        let text = raw_log_text(&log(), Some(1));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   0 | boot");
        assert!(lines[1].starts_with(">* 1 | S_Info"));
        assert_eq!(lines[2], " ! 2 | X_Info: <broken");
    }

    #[test]
    fn test_info_text() {
        let text = info_text(&log());
        assert!(text.contains("Number: 3"));
        assert!(text.ends_with("[Auto Choices]\nalliance: red"));
    }
}

use summarizer_core::{AppViewModel, RequestPhase, ACCEPTED_EXTENSIONS};

const BAR_WIDTH: usize = 20;

/// Full text frame: selection, status, error and summary.
pub fn frame(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match &view.selection {
        Some(selection) if selection.accepted_extension => format!(
            "File: {} ({} bytes)",
            selection.name,
            format_with_commas(selection.bytes)
        ),
        Some(selection) => format!(
            "File: {} ({} bytes, not {})",
            selection.name,
            format_with_commas(selection.bytes),
            ACCEPTED_EXTENSIONS.join("/")
        ),
        None => "File: none".to_string(),
    });
    lines.push(status_line(view));

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    if !view.summary.is_empty() {
        lines.push("Summary:".to_string());
        lines.extend(view.summary.lines().map(|line| format!("  {line}")));
    }
    lines
}

pub fn status_line(view: &AppViewModel) -> String {
    let label = match view.phase {
        RequestPhase::Idle if view.can_submit => "Ready to summarize",
        RequestPhase::Idle => "Choose a file with: open <path>",
        RequestPhase::InFlight => "Summarizing…",
        RequestPhase::Succeeded => "Done",
        RequestPhase::Failed => "Failed",
    };
    if view.progress > 0 {
        format!("Status: {label} {}", progress_bar(view.progress))
    } else {
        format!("Status: {label}")
    }
}

fn progress_bar(progress: u8) -> String {
    let percent = usize::from(progress.min(100));
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use summarizer_core::SelectionView;

    use super::*;

    #[test]
    fn empty_view_prompts_for_a_file() {
        let view = AppViewModel::default();
        assert_eq!(
            frame(&view),
            vec![
                "File: none".to_string(),
                "Status: Choose a file with: open <path>".to_string(),
            ]
        );
    }

    #[test]
    fn in_flight_view_shows_bar_and_stale_error() {
        let view = AppViewModel {
            selection: Some(SelectionView {
                name: "report.pdf".to_string(),
                bytes: 1_234_567,
                accepted_extension: true,
            }),
            phase: RequestPhase::InFlight,
            progress: 70,
            error: Some("Server responded 500".to_string()),
            ..AppViewModel::default()
        };
        assert_eq!(
            frame(&view),
            vec![
                "File: report.pdf (1,234,567 bytes)".to_string(),
                "Status: Summarizing… [##############------] 70%".to_string(),
                "Error: Server responded 500".to_string(),
            ]
        );
    }

    #[test]
    fn summary_is_indented_and_unusual_types_flagged() {
        let view = AppViewModel {
            selection: Some(SelectionView {
                name: "scan.png".to_string(),
                bytes: 12,
                accepted_extension: false,
            }),
            phase: RequestPhase::Succeeded,
            summary: "line one\nline two".to_string(),
            can_copy: true,
            can_submit: true,
            ..AppViewModel::default()
        };
        assert_eq!(
            frame(&view),
            vec![
                "File: scan.png (12 bytes, not .pdf/.txt)".to_string(),
                "Status: Done".to_string(),
                "Summary:".to_string(),
                "  line one".to_string(),
                "  line two".to_string(),
            ]
        );
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(10), "[##------------------] 10%");
        assert_eq!(progress_bar(100), "[####################] 100%");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1000), "1,000");
    }
}

//! Plain-text rendering of chat turns for the terminal

use crate::chat::types::{ChatTurn, Role, NOT_AVAILABLE};
use colored::Colorize;

/// `Sources: a, b` line, or `None` when the turn cites nothing
pub fn sources_line(turn: &ChatTurn) -> Option<String> {
    if turn.sources.is_empty() {
        None
    } else {
        Some(format!("Sources: {}", turn.sources.join(", ")))
    }
}

/// Tool and rationale lines shown under an assistant answer
pub fn details_lines(turn: &ChatTurn) -> Option<[String; 2]> {
    if turn.tool_used.is_none() && turn.rationale.is_none() {
        return None;
    }
    Some([
        format!(
            "Tool Used: {}",
            turn.tool_used.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        format!(
            "Rationale: {}",
            turn.rationale.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
    ])
}

/// Render a turn for terminal output
pub fn render_turn(turn: &ChatTurn) -> String {
    match turn.role {
        Role::User => format!("{} {}", ">".bold(), turn.content),
        Role::Assistant => {
            let mut out = turn.content.clone();
            if let Some(line) = sources_line(turn) {
                out.push_str("\n\n");
                out.push_str(&line.cyan().to_string());
            }
            if let Some([tool, rationale]) = details_lines(turn) {
                out.push('\n');
                out.push_str(&tool.dimmed().to_string());
                out.push('\n');
                out.push_str(&rationale.dimmed().to_string());
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_joined() {
        let turn = ChatTurn::assistant("x", "t", "r", vec!["a.pdf".into(), "b.md".into()]);
        assert_eq!(sources_line(&turn).as_deref(), Some("Sources: a.pdf, b.md"));
        assert_eq!(sources_line(&ChatTurn::user("q")), None);
    }

    #[test]
    fn test_details_fall_back_to_na() {
        let mut turn = ChatTurn::assistant("x", "rag_query_tool", "r", vec![]);
        turn.rationale = None;
        let [tool, rationale] = details_lines(&turn).unwrap();
        assert_eq!(tool, "Tool Used: rag_query_tool");
        assert_eq!(rationale, "Rationale: N/A");
        assert!(details_lines(&ChatTurn::user("q")).is_none());
    }

    #[test]
    fn test_render_assistant_includes_details() {
        colored::control::set_override(false);
        let turn = ChatTurn::assistant("Answer", "rag_query_tool", "why", vec!["a.pdf".into()]);
        let text = render_turn(&turn);
        assert!(text.starts_with("Answer"));
        assert!(text.contains("Sources: a.pdf"));
        assert!(text.contains("Rationale: why"));
    }
}

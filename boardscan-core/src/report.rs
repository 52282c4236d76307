//! Console text for the setup report.

/// Width of the `=` rule around section titles.
pub const RULE_WIDTH: usize = 60;

pub const TITLE: &str = "VSCODE SERIAL MONITOR SETUP HELPER";
pub const BOARDS_SECTION: &str = "CHECKING CONNECTED J-LINK BOARDS";
pub const PORTS_SECTION: &str = "CHECKING AVAILABLE SERIAL PORTS";
pub const SETUP_SECTION: &str = "RECOMMENDED VS CODE SETUP";
pub const TASKS_SECTION: &str = "UPDATING TASKS.JSON";
pub const NEXT_STEPS_SECTION: &str = "NEXT STEPS";

pub const NEXT_STEPS: &str = r#"
1. Update .vscode/tasks.json with your board SNs and COM ports
2. In VS Code, press Ctrl+Shift+B to build
3. Press Ctrl+Shift+P and search for:
   - "Flash Initiator Board" (or Responder)
   - "Monitor Initiator Serial" (or Responder)
4. Follow the prompts to enter board info
5. Enjoy automated builds and monitoring!
"#;

/// A section header: blank line, rule, title, rule.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("\n{rule}\n{title}\n{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_layout() {
        let text = banner(TITLE);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].is_empty());
        assert_eq!(lines[1].len(), RULE_WIDTH);
        assert!(lines[1].chars().all(|c| c == '='));
        assert_eq!(lines[2], TITLE);
        assert_eq!(lines[3], lines[1]);
    }

    #[test]
    fn test_next_steps_numbering() {
        let numbered: Vec<&str> = NEXT_STEPS
            .lines()
            .filter(|l| l.chars().next().is_some_and(|c| c.is_ascii_digit()))
            .collect();
        assert_eq!(numbered.len(), 5);
        assert!(numbered[0].contains(".vscode/tasks.json"));
        assert!(NEXT_STEPS.contains("\"Monitor Initiator Serial\" (or Responder)"));
    }
}

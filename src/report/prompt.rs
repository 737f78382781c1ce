// Summary prompt builder
//
// Pure templating: the item list goes in verbatim, one per line, followed
// by fixed instructions. Nothing here looks at what the items say.

use crate::sources::ActivityItem;

const PREAMBLE: &str = "Here is a list of work items from GitHub and Jira for the past week:";

const INSTRUCTIONS: &str = "\
Summarize my 3 most important work wins in markdown format, as exactly 3 bullet points.

Follow these rules:
- Each bullet must be a single sentence.
- Use non-technical language that anyone on the team can follow.
- Describe the outcome and impact of the work rather than how it was done.
- Related items that share a theme may be combined into one bullet.
- When referring to a Jira item, use its title, never its ticket identifier.
- Avoid duplication and avoid technical jargon.";

/// Render the summarization prompt for `items`, kept in the order given.
pub fn build_prompt(items: &[ActivityItem]) -> String {
    let lines: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("{}\n\n{}\n\n{}\n", PREAMBLE, lines.join("\n"), INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<ActivityItem> {
        vec![
            ActivityItem::pull_request("Add dark mode"),
            ActivityItem::commit("Fix crash on startup"),
            ActivityItem::jira("Update onboarding copy"),
        ]
    }

    #[test]
    fn test_prompt_contains_items_as_lines_in_order() {
        let prompt = build_prompt(&sample_items());
        let lines: Vec<&str> = prompt.lines().collect();

        let pr = lines.iter().position(|l| *l == "PR: Add dark mode").unwrap();
        let commit = lines.iter().position(|l| *l == "Commit: Fix crash on startup").unwrap();
        let jira = lines.iter().position(|l| *l == "Jira: Update onboarding copy").unwrap();
        assert!(pr < commit && commit < jira);
        assert_eq!(commit, pr + 1);
        assert_eq!(jira, commit + 1);
    }

    #[test]
    fn test_prompt_carries_fixed_instructions() {
        let prompt = build_prompt(&sample_items());

        assert!(prompt.contains("exactly 3 bullet points"));
        assert!(prompt.contains("markdown"));
        assert!(prompt.contains("single sentence"));
        assert!(prompt.contains("non-technical"));
        assert!(prompt.contains("outcome and impact"));
        assert!(prompt.contains("may be combined into one bullet"));
        assert!(prompt.contains("use its title, never its ticket identifier"));
        assert!(prompt.contains("Avoid duplication and avoid technical jargon"));
    }

    #[test]
    fn test_instructions_do_not_depend_on_items() {
        let empty = build_prompt(&[]);
        let full = build_prompt(&sample_items());

        assert!(empty.ends_with(&format!("{}\n", INSTRUCTIONS)));
        assert!(full.ends_with(&format!("{}\n", INSTRUCTIONS)));
        assert!(empty.starts_with(PREAMBLE));
    }
}

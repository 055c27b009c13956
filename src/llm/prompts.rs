use crate::profiles::GENERIC_INSTRUCTION;
use crate::summary::ActionItem;

const NOT_SPECIFIED: &str = "Not specified";

/// Build the summary prompt for one meeting and one summary type.
///
/// The transcript is embedded verbatim, without truncation.
pub fn build_summary_prompt(
    transcript: &str,
    type_id: &str,
    meeting_date: Option<&str>,
    attendee_names: Option<&[String]>,
    framework_instruction: Option<&str>,
) -> String {
    let framework = framework_instruction
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(GENERIC_INSTRUCTION);

    let date = meeting_date
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_SPECIFIED);

    let attendees = match attendee_names {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => NOT_SPECIFIED.to_string(),
    };

    format!(
        "You are an expert meeting analyst for StokeMeet. Based on the transcript provided, \
generate a detailed meeting summary using the following framework: **{type_id}**.\n\
\n\
Framework instructions:\n\
{framework}\n\
\n\
Meeting Date: {date}\n\
Attendees: {attendees}\n\
\n\
Transcript:\n\
\"\"\"\n\
{transcript}\n\
\"\"\"\n\
\n\
Instructions:\n\
1. Structure the output EXACTLY as shown below.\n\
2. Extract specific details, numbers, dates, and names.\n\
3. Use professional, concise language.\n\
4. Format the \"Action Items\" section with checkable markdown boxes, one task per line, \
followed by the assignee name.\n\
\n\
Output Format (Markdown):\n\
# {type_id} Summary\n\
\n\
> [Two or three sentence executive summary of the meeting.]\n\
\n\
## Meeting Purpose\n\
[One distinct sentence explaining the primary goal of the meeting.]\n\
\n\
## Key Takeaways\n\
*   **[Topic Name/Category]:** [Detailed point explaining the takeaway, specific figures, and decisions.]\n\
\n\
## Topics\n\
### [Major Topic]\n\
*   **[Sub-point]:** [Detail about specific discussion points, conflicts, or resolutions.]\n\
\n\
## Next Steps\n\
**[Person Name]:**\n\
*   [Task]\n\
\n\
## Action Items\n\
- [ ] [Specific, actionable task] - [Assignee name] - WATCH (5 secs)\n\
- [ ] [Specific, actionable task] - [Assignee name] - WATCH (5 secs)"
    )
}

/// Build a transcript Q&A prompt.
pub fn build_question_prompt(transcript: &str, question: &str) -> String {
    format!(
        "You are an intelligent meeting assistant for StokeMeet.\n\
\n\
Context (Meeting Transcript):\n\
\"\"\"\n\
{transcript}\n\
\"\"\"\n\
\n\
User Question: \"{question}\"\n\
\n\
Instructions:\n\
1. Answer the question specifically based on the provided transcript.\n\
2. If the answer is not in the transcript, state that clearly.\n\
3. Keep the answer concise and direct.\n\
4. If there were specific quotes, you can reference them."
    )
}

/// Build a follow-up email prompt from the current action items.
pub fn build_follow_up_email_prompt(
    transcript: &str,
    title: &str,
    action_items: &[ActionItem],
) -> String {
    let items = if action_items.is_empty() {
        "None".to_string()
    } else {
        action_items
            .iter()
            .map(|item| format!("- {} ({})", item.text, item.assignee))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an assistant that drafts follow-up emails for StokeMeet.\n\
Meeting title: {title}\n\
\n\
Action items:\n\
{items}\n\
\n\
Write a short, friendly follow-up email to the meeting attendees.\n\
Rules:\n\
- Start with a subject line prefixed with 'Subject:'.\n\
- Thank attendees and recap the outcome in two or three sentences.\n\
- List every action item with its owner.\n\
- Use only information present in the transcript.\n\
\n\
Transcript:\n\
{transcript}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_prompt_embeds_framework_metadata_and_transcript() {
        let attendees = vec!["Jordan".to_string(), "Jackie".to_string()];
        let prompt = build_summary_prompt(
            "Jordan: We need a proposal by Friday.",
            "Sales - BANT",
            Some("Dec 1, 2024"),
            Some(attendees.as_slice()),
            Some("Identify the four pillars of BANT."),
        );

        assert!(prompt.contains("Identify the four pillars of BANT."));
        assert!(prompt.contains("Meeting Date: Dec 1, 2024"));
        assert!(prompt.contains("Attendees: Jordan, Jackie"));
        assert!(prompt.contains("Jordan: We need a proposal by Friday."));
        assert!(prompt.contains("# Sales - BANT Summary"));
        assert!(prompt.contains("- [ ] [Specific, actionable task] - [Assignee name] - WATCH (5 secs)"));
    }

    #[test]
    fn summary_prompt_falls_back_when_metadata_missing() {
        let nobody: Vec<String> = Vec::new();
        let prompt = build_summary_prompt("Hello.", "General", None, Some(nobody.as_slice()), None);

        assert!(prompt.contains("Meeting Date: Not specified"));
        assert!(prompt.contains("Attendees: Not specified"));
        assert!(prompt.contains(GENERIC_INSTRUCTION));
    }

    #[test]
    fn summary_prompt_does_not_truncate_transcript() {
        let transcript = "Speaker: word ".repeat(20_000);
        let prompt = build_summary_prompt(&transcript, "General", None, None, None);
        assert!(prompt.contains(&transcript));
    }

    #[test]
    fn question_prompt_quotes_question() {
        let prompt = build_question_prompt("A: hi", "Who owns pricing?");
        assert!(prompt.contains("User Question: \"Who owns pricing?\""));
        assert!(prompt.contains("A: hi"));
    }

    #[test]
    fn email_prompt_lists_action_items_or_none() {
        let items = vec![ActionItem::new("Send recap", "Jackie")];
        let prompt = build_follow_up_email_prompt("t", "Kickoff", &items);
        assert!(prompt.contains("Meeting title: Kickoff"));
        assert!(prompt.contains("- Send recap (Jackie)"));

        let empty = build_follow_up_email_prompt("t", "Kickoff", &[]);
        assert!(empty.contains("Action items:\nNone"));
    }
}

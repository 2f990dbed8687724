use crate::command::Line;
use crate::script::Script;

/// Format a one-line summary of script size.
pub fn format_summary(script: &Script) -> String {
    let mut commands = 0;
    let mut comments = script.header.len();

    for section in &script.sections {
        for line in &section.lines {
            match line {
                Line::Command { .. } => commands += 1,
                Line::Comment { .. } => comments += 1,
            }
        }
    }

    format!(
        "sections={} commands={commands} comments={comments}",
        script.sections.len()
    )
}

/// Format per-section command counts, one section per line.
pub fn format_section_counts(script: &Script) -> String {
    script
        .sections
        .iter()
        .map(|section| format!("- {}: {}", section.name, section.commands().count()))
        .collect::<Vec<_>>()
        .join("\n")
}

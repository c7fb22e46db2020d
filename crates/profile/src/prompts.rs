//! Prompt construction for the profile pipeline.

use tierbot_core::Insight;

use crate::pipeline::SourceOutcome;
use crate::sources::{GatheredSource, SourceClass, truncate_chars};
use crate::store::SECTION_HEADERS;

/// Cap applied to the current document inside a merge prompt.
const MERGE_CONTEXT_MAX_CHARS: usize = 3_000;

/// Per-source analysis prompt for the economy tier.
pub fn analysis(source: &GatheredSource) -> String {
    match source.class {
        SourceClass::DirectoryScan => format!(
            "Analyze this file listing from \"{}\" ({}).\n\
             What does it tell us about the user's projects, skills, and interests?\n\n\
             Files:\n{}\n\n\
             Respond with 3-5 bullet points of insights.",
            source.description, source.origin, source.content
        ),
        SourceClass::KeyFile => format!(
            "Analyze this file from \"{}\" ({}).\n\
             What does it reveal about:\n\
             1. The user's technical skills\n\
             2. Their working style\n\
             3. What they're building\n\
             4. Their priorities\n\n\
             Content:\n{}\n\n\
             Respond with bullet points.",
            source.description, source.origin, source.content
        ),
        SourceClass::ExportFile => format!(
            "Analyze this exported data from \"{}\" ({}).\n\
             What patterns do you see about how the user works?\n\
             What do they ask for most? What are their preferences?\n\n\
             Data:\n{}\n\n\
             Respond with insights about behavior and preferences.",
            source.description, source.origin, source.content
        ),
    }
}

/// The single synthesis prompt for the premium tier: aggregated insights
/// plus known facts, with the exact nine-section structure spelled out.
pub fn synthesis(outcomes: &[SourceOutcome], known_facts: &[String]) -> String {
    let mut compiled = String::new();

    if outcomes.is_empty() {
        compiled.push_str("(no data sources were available)\n");
    }
    for outcome in outcomes {
        compiled.push_str(&format!("\n{}:\n", outcome.origin));
        match &outcome.insight {
            Insight::Summary(text) => compiled.push_str(text),
            Insight::Failed => compiled.push_str("(analysis unavailable for this source)"),
        }
        compiled.push('\n');
    }

    let facts = if known_facts.is_empty() {
        "(none recorded)".to_string()
    } else {
        known_facts
            .iter()
            .map(|f| format!("- {f}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let skeleton = SECTION_HEADERS
        .iter()
        .map(|h| format!("{h}\n- ..."))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Create a comprehensive USER PROFILE based on this analyzed data.\n\n\
         GATHERED DATA:\n{compiled}\n\
         KNOWN FACTS (from direct conversation):\n{facts}\n\n\
         CREATE THIS EXACT STRUCTURE:\n\n\
         # USER PROFILE\n\n{skeleton}\n\n\
         Every section header must appear exactly as written. Make the profile \
         ACTIONABLE — each section should help a future assistant understand \
         exactly how to serve this user effectively."
    )
}

/// The incremental-merge prompt for the economy tier.
pub fn merge(current: &str, new_info: &str) -> String {
    format!(
        "Update this user profile with new information.\n\
         Keep the same structure, integrate the new info appropriately.\n\n\
         CURRENT PROFILE:\n{}\n\n\
         NEW INFORMATION:\n{}\n\n\
         Output the complete updated profile.",
        truncate_chars(current, MERGE_CONTEXT_MAX_CHARS),
        new_info
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(class: SourceClass) -> GatheredSource {
        GatheredSource {
            origin: "~/projects".into(),
            description: "Project checkouts".into(),
            class,
            content: "src/main.rs".into(),
        }
    }

    #[test]
    fn analysis_prompts_embed_origin_and_content() {
        for class in [
            SourceClass::DirectoryScan,
            SourceClass::KeyFile,
            SourceClass::ExportFile,
        ] {
            let prompt = analysis(&source(class));
            assert!(prompt.contains("~/projects"));
            assert!(prompt.contains("Project checkouts"));
            assert!(prompt.contains("src/main.rs"));
        }
    }

    #[test]
    fn synthesis_includes_all_section_headers() {
        let prompt = synthesis(&[], &[]);
        for header in SECTION_HEADERS {
            assert!(prompt.contains(header), "missing {header}");
        }
        assert!(prompt.contains("no data sources were available"));
    }

    #[test]
    fn synthesis_renders_failures_distinctly() {
        let outcomes = vec![
            SourceOutcome {
                origin: "~/a".into(),
                insight: Insight::Summary("- good".into()),
            },
            SourceOutcome {
                origin: "~/b".into(),
                insight: Insight::Failed,
            },
        ];
        let prompt = synthesis(&outcomes, &["Name: Alex".into()]);
        assert!(prompt.contains("- good"));
        assert!(prompt.contains("analysis unavailable"));
        assert!(prompt.contains("- Name: Alex"));
    }

    #[test]
    fn merge_caps_current_document() {
        let long = "x".repeat(10_000);
        let prompt = merge(&long, "got promoted");
        assert!(prompt.contains("got promoted"));
        assert!(prompt.len() < 4_000);
    }
}

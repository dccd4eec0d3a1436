//! Prompt templates for whiteboard extraction and analysis.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing what the models are asked to do
//!    (adding a report section, tweaking the transcription rules) requires
//!    editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the assembled prompts without
//!    calling a real model, so a dropped section or a mangled transcript
//!    embedding is caught immediately.
//!
//! The extraction prompt can be overridden via
//! [`crate::config::AnalysisConfig::extraction_prompt`]; the constants here
//! are used when no override is provided.

/// Instruction for the vision model: a complete, literal reading of the board.
///
/// The transcript this produces is trusted verbatim downstream, so the rules
/// push the model toward completeness over interpretation.
pub const EXTRACTION_PROMPT: &str = r#"You are transcribing a photograph of a whiteboard. Produce a complete, literal reading of everything on it.

Follow these rules precisely:

1. TEXT
   - Transcribe ALL visible text, exactly as written
   - Where handwriting is hard to read, give your best-effort reading and mark it [illegible?]
   - Keep original wording; do not paraphrase or summarise

2. STRUCTURE
   - Preserve lists, bullet points, numbering, and indentation
   - Preserve hierarchies: note which items sit under which headings
   - Note arrows and connectors and what they link ("A -> B")
   - Note boxes, circles, and other groupings around text

3. DIAGRAMS AND DRAWINGS
   - Describe every diagram, sketch, chart, or drawing in plain words
   - Include labels and annotations attached to them

4. OUTPUT
   - Output ONLY the transcription
   - Do NOT add commentary, analysis, or recommendations"#;

/// Report section headings for the two-stage analysis, in output order.
pub const REPORT_SECTIONS: [&str; 6] = [
    "Content Summary",
    "Key Points",
    "Action Items",
    "Next Steps",
    "Strategic Recommendations",
    "Potential Challenges",
];

/// Build the analysis prompt for a transcript produced by the extraction
/// stage. The transcript is embedded verbatim between triple quotes.
pub fn analysis_prompt(transcript: &str) -> String {
    format!(
        r#"The following is a transcription of a whiteboard captured during a working session:

"""
{transcript}
"""

Based on this content, provide a structured analysis with these sections:

1. **Content Summary**: A clear summary of what's on the whiteboard
2. **Key Points**: The main ideas, tasks, or concepts
3. **Action Items**: Any tasks, to-dos, or action items
4. **Next Steps**: Logical next steps based on the content
5. **Strategic Recommendations**: How this work could be approached or prioritised
6. **Potential Challenges**: Risks or obstacles implied by the content

Please be thorough and actionable in your analysis."#
    )
}

/// Prompt for single-stage mode: the language model reads the image directly
/// and produces the reduced five-section report.
pub const SINGLE_STAGE_PROMPT: &str = r#"Analyze this whiteboard image and provide:

1. **Content Summary**: A clear summary of what's written on the whiteboard
2. **Key Points**: Extract and list the main ideas, tasks, or concepts
3. **Action Items**: Identify any tasks, to-dos, or action items
4. **Next Steps**: Suggest logical next steps or recommendations based on the content
5. **Organization**: Suggest how to better organize or structure the information if applicable

Please be thorough and helpful in your analysis."#;

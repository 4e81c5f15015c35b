//! Prompt rendering for answer synthesis.
//!
//! Everything here is pure and deterministic: identical `(query, results)`
//! input yields byte-identical messages. That keeps the rendering testable
//! and leaves room for a caching layer in front of the completion call.

use sense_llm::ChatMessage;
use sense_search::SearchResult;

/// Fixed system instruction for the synthesis call.
pub const SYSTEM_PROMPT: &str = "\
You are an expert research assistant with a talent for synthesizing information from multiple sources into clear, comprehensive answers.

Your expertise includes:
- Reading and analyzing diverse sources quickly and accurately
- Identifying key insights and connecting related information
- Presenting complex topics in an accessible, engaging way
- Maintaining objectivity while acknowledging different perspectives
- Providing proper citations so readers can verify and explore further

When synthesizing information:
1. Lead with the most important insights that directly answer the question
2. Organize information logically with clear headings when helpful
3. Include relevant details and context that enhance understanding
4. Note any conflicting information and explain different viewpoints
5. Use citations [1], [2], etc. that correspond to the numbered sources
6. Write in a conversational but authoritative tone
7. Ensure accuracy while making the content engaging and readable

Remember: Your goal is to save the reader time while giving them confidence in the information and the ability to dive deeper if they want.";

/// Closing instruction appended after the source block.
const USER_INSTRUCTION: &str = "\
Please provide a comprehensive, well-researched answer based on these sources. \
Structure your response to be informative and engaging, with proper citations \
using [1], [2], etc. format. If sources present different perspectives, \
acknowledge them. Focus on accuracy and clarity while maintaining a \
conversational tone.";

/// Render the two-message prompt for one synthesis call.
///
/// The first message is the fixed system instruction; the second embeds the
/// query and the numbered source block. Source `i` (1-based) is presented as
/// citation `i`, in the order given; the model's `[n]` markers point back
/// into this exact numbering.
pub fn build_messages(query: &str, results: &[SearchResult]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(render_user_prompt(query, results)),
    ]
}

/// Render the user message: query, numbered sources, closing instruction.
fn render_user_prompt(query: &str, results: &[SearchResult]) -> String {
    format!(
        "Research Question: {query}\n\nSources Found:\n{}\n\n{USER_INSTRUCTION}",
        render_source_block(results)
    )
}

/// Render the numbered source block, entries separated by a blank line.
fn render_source_block(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            format!(
                "[{}] {}\nSource: {}\nURL: {}\nContent: {}\n",
                index + 1,
                result.title,
                result.domain,
                result.url,
                result.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Prompts sent to the reasoner
//!
//! The instruction prompt tells the model how to request a tool; the
//! re-prompt feeds a tool result back and asks for the final answer.

/// Opening of the instruction prompt
pub const INSTRUCTION_PREAMBLE: &str = "You are an AI agent. \
Your goal is to answer the user's question. \
If you need to use a tool to get information, respond with a JSON object \
like this: `{\"tool_name\": \"<tool_name>\", \"tool_args\": {\"<arg_name>\": \"<arg_value>\"}}`. ";

/// Closing of the instruction prompt
pub const INSTRUCTION_CLOSING: &str = "Otherwise, respond directly with the answer. \
Only use the tools you have been provided with. \
Make sure the JSON is valid and complete.";

/// Build the instruction prompt for a set of tool signatures
pub fn instruction_prompt(tool_signatures: &[String]) -> String {
    let mut prompt = INSTRUCTION_PREAMBLE.to_string();
    if !tool_signatures.is_empty() {
        prompt.push_str("Available tools: ");
        prompt.push_str(&tool_signatures.join("; "));
        prompt.push_str(". ");
    }
    prompt.push_str(INSTRUCTION_CLOSING);
    prompt
}

/// Combine the instruction prompt with the latest user content
pub fn full_prompt(instruction: &str, content: &str) -> String {
    format!("{}\n\nUser's request: {}", instruction, content)
}

/// Content of the tool output turn
pub fn tool_output_content(tool_name: &str, tool_result: &str) -> String {
    format!("Tool '{}' result: {}", tool_name, tool_result)
}

/// Follow-up user turn asking for the final answer
pub fn reprompt(tool_result: &str, user_query: &str) -> String {
    format!(
        "Based on the tool output: '{}', what is the answer to the original question: '{}'?",
        tool_result, user_query
    )
}

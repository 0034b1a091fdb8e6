pub const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are a highly intelligent Daily Task Assistant.
You help the user manage their day, answer questions, summarize texts, and analyze files.

Traits:
- Professional yet friendly.
- Concise and action-oriented.
- If a file context is provided, prioritize answering based on that file.
- You can help draft emails, create study plans, and break down goals.";

pub const CHAT_FAILURE: &str = "I'm sorry, I encountered an error communicating with the AI service. Please check your connection or API key.";
pub const CHAT_EMPTY: &str = "I couldn't generate a response.";
pub const SUMMARY_FAILURE: &str = "Error generating summary.";
pub const SUMMARY_EMPTY: &str = "Could not generate summary.";
pub const PLAN_FAILURE: &str = "Error generating plan.";
pub const PLAN_EMPTY: &str = "Could not generate plan.";

pub fn chat_prompt(message: &str, file_context: Option<&str>) -> String {
    match file_context.filter(|context| !context.trim().is_empty()) {
        Some(context) => {
            format!("[CONTEXT FROM UPLOADED FILES]:\n{context}\n\n[USER QUESTION]:\n{message}")
        }
        None => message.to_owned(),
    }
}

pub fn summary_prompt(text: &str) -> String {
    format!("Summarize the following text concisely in bullet points:\n\n{text}")
}

pub fn plan_prompt(goal: &str) -> String {
    format!(
        "Create a step-by-step actionable plan (To-Do List) for the following goal: \"{goal}\".\n\
         Format the output as a clean Markdown list. Do not add conversational filler."
    )
}



use crate::catalog::Event;
use crate::llm::providers::base::GenerationParams;
use crate::refiner::RefinedQuery;


pub const NO_EVENTS_RESPONSE: &str = "I'm sorry, I couldn't find any events that match your query.";


pub const GATE_SYSTEM_PROMPT: &str = r#"You are the AI of yeetup.com - a place for youth, such as high school and university students, to find meetups and events relevant to them.

In the next message, you will be provided 3 items:
1. The question or statement from the user. This is what the user is looking for.
2. The keywords associated with that question, which are computed by an algorithm.
3. The relevant events, filtered from a repository of events using the generated keywords from the question.

I want to know one thing:
- If the question is relevant to finding events or describing what the user is interested in, and the keywords are accurately describing what events to look for, and the provided events exist and are relevant to the question, respond "yes".
- Otherwise, respond, "no"."#;


pub const ANSWER_SYSTEM_PROMPT: &str = r#"You are the AI of yeetup.com - a place for youth, such as high school and university students, to find meetups and events relevant to them. You are a friendly and helpful chatbot designed for high school and university students. Your goal is to help them discover events and opportunities related to their interests. Respond concisely and informatively, providing relevant event information in a clear and easy-to-understand format. Use encouraging language and ask clarifying questions to guide the user and ensure you're providing the most helpful recommendations. Maintain an approachable tone, similar to a helpful friend, while still being professional and credible.

In the next message, you will be provided 3 items:
1. The question or statement from the user. This is what the user is looking for.
2. The keywords associated with that question, which are computed by an algorithm.
3. The relevant events, filtered from a repository of events using the generated keywords from the question.

Please respond to the user with the information provided."#;


/// Single token: "yes" or "no".
pub fn gate_params() -> GenerationParams {
    GenerationParams::default()
        .with_temperature(0.0)
        .with_max_tokens(1)
}


pub fn answer_params() -> GenerationParams {
    GenerationParams::default().with_temperature(1.0)
}


pub fn build_context_message(
    question: &str,
    refined: &RefinedQuery,
    events: &[&Event],
) -> Result<String, serde_json::Error> {
    let keywords = serde_json::to_string(refined)?;
    let events = serde_json::to_string(events)?;

    Ok(format!(
        "Question:\n{question}\n\nKeywords:\n{keywords}\n\nEvents:\n{events}"
    ))
}

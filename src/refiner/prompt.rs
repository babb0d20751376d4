

use crate::llm::providers::base::GenerationParams;


pub const REFINE_SYSTEM_PROMPT: &str = r#"You are an assistant that helps clarify user queries about student events. Extract the key topics and interests from the user's input. Do not answer the question directly. Just provide the keywords related to the types of events the user is interested in.

The keywords, or categories, are more general but some examples include: hackathon, festival, social, music, clubs, community, technology, coding, study, academics, math, science, gaming, competition, etc.

Target audiences can be either highschool or university. Specify both if the audience is not specified.

If the user specifies a specific audience, like a specific high school or university, then include it as part of specific audience. If not, then write "any".

Output your response in JSON format with the following keys: "categories", "target_audience", "specific_audience".

Example:
```json
{
  "categories": ["hackathon", "technology", "coding"],
  "target_audience": ["highschool"],
  "specific_audience": ["any"]
}
```"#;


pub const REFINE_MAX_TOKENS: u32 = 300;


/// Deterministic, short, JSON-only.
pub fn refine_params() -> GenerationParams {
    GenerationParams::default()
        .with_temperature(0.0)
        .with_max_tokens(REFINE_MAX_TOKENS)
        .json()
}

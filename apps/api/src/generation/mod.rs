// Career guidance generation: quiz, career titles, career details.
// Every provider call goes through llm_client; provider order and
// validation live in the orchestrator.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod request;
pub mod validator;

// Shared prompt constants. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting fragments.

/// Appended to every system prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "Responda estritamente com um objeto JSON válido. \
    Não inclua texto fora do objeto JSON. \
    Não use blocos de código markdown.";

/// Appended to every system prompt whose output is read aloud.
pub const SPOKEN_OUTPUT_INSTRUCTION: &str = "O texto será convertido em áudio: \
    escreva em prosa corrida, sem listas, tabelas, emojis ou marcações markdown.";

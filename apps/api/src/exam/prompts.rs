// All LLM prompt text for question generation.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::catalog::BoardProfile;
use crate::exam::models::OPTIONS_PER_QUESTION;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Persona for the question generator. Combined with `JSON_ONLY_INSTRUCTION`.
pub const QUESTION_SYSTEM: &str =
    "Você é um gerador de questões de concurso público que segue fielmente o formato solicitado.";

/// Replace: {banca}
const ROLE_TEMPLATE: &str = "Você é um especialista sênior na elaboração de questões de concurso público, \
com profundo conhecimento do estilo da banca {banca}. \
Sua tarefa é criar questões originais e desafiadoras para a disciplina indicada.";

/// Replace: {count}, {disciplina}
const TASK_TEMPLATE: &str =
    "TAREFA: gere exatamente {count} questões inéditas da disciplina '{disciplina}'.";

/// Replace: {count}, {options}
const OUTPUT_CONTRACT_TEMPLATE: &str = r#"FORMATO OBRIGATÓRIO: responda com um objeto JSON contendo uma única chave "questoes", uma lista com exatamente {count} objetos. Cada objeto DEVE conter:
- "enunciado": o texto da questão;
- "alternativas": uma lista com exatamente {options} strings;
- "resposta_correta": o texto IDÊNTICO de uma das alternativas;
- "explicacao": a justificativa clara e detalhada da resposta correta.
Exemplo do formato: {"questoes": [{"enunciado": "...", "alternativas": ["A) ...", "B) ...", "C) ...", "D) ...", "E) ..."], "resposta_correta": "A) ...", "explicacao": "..."}]}"#;

pub fn question_system_prompt() -> String {
    format!("{QUESTION_SYSTEM} {JSON_ONLY_INSTRUCTION}")
}

/// Builds the generation prompt for `count` questions of `disciplina` in the
/// style of `profile`. Every instruction is listed verbatim and every example
/// is echoed as compact JSON for few-shot guidance.
pub fn build_question_prompt(disciplina: &str, profile: &BoardProfile, count: u32) -> String {
    let mut lines = vec![ROLE_TEMPLATE.replace("{banca}", &profile.nome)];

    lines.push(String::new());
    lines.push("Siga RIGOROSAMENTE estas diretrizes de estilo:".to_string());
    lines.extend(profile.instrucoes.iter().map(|i| format!("- {i}")));

    if !profile.exemplos.is_empty() {
        lines.push(String::new());
        lines.push("Use os exemplos a seguir como referência de estilo e complexidade:".to_string());
        lines.extend(profile.exemplos.iter().map(|e| {
            format!("Exemplo de questão de '{}': {}", e.disciplina, e.questao)
        }));
    }

    lines.push(String::new());
    lines.push(
        TASK_TEMPLATE
            .replace("{count}", &count.to_string())
            .replace("{disciplina}", disciplina),
    );

    lines.push(String::new());
    lines.push(
        OUTPUT_CONTRACT_TEMPLATE
            .replace("{count}", &count.to_string())
            .replace("{options}", &OPTIONS_PER_QUESTION.to_string()),
    );

    lines.join("\n")
}

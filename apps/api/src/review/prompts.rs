// Prompt text and canned messages for the audio review.

use crate::exam::models::MistakeRecord;
use crate::llm_client::prompts::SPOKEN_OUTPUT_INSTRUCTION;

/// Returned instead of calling any endpoint when there is nothing to review.
pub const CONGRATULATIONS: &str = "Parabéns, você gabaritou o simulado! Não há erros para revisar. \
    Continue com o excelente trabalho e dedicação!";

/// Returned whenever script generation fails.
pub const SCRIPT_APOLOGY: &str =
    "Houve um erro ao gerar seu resumo em áudio. Por favor, tente novamente mais tarde.";

pub const REVIEW_SYSTEM: &str =
    "Você é um tutor de concursos que cria roteiros para podcasts de revisão de erros.";

const REVIEW_INTRO: &str = "Você é um tutor especialista em concursos públicos, com uma voz calma e encorajadora. \
Sua tarefa é criar o roteiro de um podcast para um candidato que acabou de fazer um simulado.
O tom deve ser didático, positivo e direto ao ponto, como um professor particular explicando os erros do aluno de forma clara e construtiva.
Para cada erro abaixo, explique o conceito por trás da resposta correta e, quando possível, por que a alternativa marcada estava errada. Agrupe os erros por disciplina.
Seja conciso. Comece com uma saudação e termine com uma mensagem motivacional, reforçando que o erro faz parte do aprendizado.

Erros do aluno para análise:";

pub fn review_system_prompt() -> String {
    format!("{REVIEW_SYSTEM} {SPOKEN_OUTPUT_INSTRUCTION}")
}

/// Builds the tutoring-script prompt. Mistakes appear in the order given.
pub fn build_review_prompt(mistakes: &[MistakeRecord]) -> String {
    let mut prompt = String::from(REVIEW_INTRO);
    for m in mistakes {
        prompt.push_str(&format!(
            "\n\n- Disciplina: {}\n  Enunciado da questão: '{}'\n  Resposta do aluno: '{}'\n  Resposta correta: '{}'",
            m.disciplina, m.enunciado, m.resposta_usuario, m.resposta_correta
        ));
    }
    prompt
}

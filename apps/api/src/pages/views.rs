use maud::{html, Markup, DOCTYPE};

use crate::catalog::JobPosting;
use crate::exam::models::{ExamSession, ScoredResult, NOT_ANSWERED};

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Simulado" }
            }
            body {
                header {
                    nav { a href="/" { strong { "Simulado" } } }
                }
                main { (body) }
            }
        }
    }
}

pub fn index(postings: &[&JobPosting], boards: &[&str]) -> Markup {
    page(
        "Novo simulado",
        html! {
            h1 { "Gere seu simulado" }
            form method="post" action="/gerar_simulado" {
                label for="id_vaga" { "Vaga" }
                select id="id_vaga" name="id_vaga" required {
                    @for posting in postings {
                        option value=(posting.id) { (posting.titulo) }
                    }
                }
                label for="banca" { "Banca" }
                select id="banca" name="banca" required {
                    @for board in boards {
                        option value=(board) { (board) }
                    }
                }
                button type="submit" { "Gerar simulado" }
            }
        },
    )
}

pub fn exam(session: &ExamSession, posting_title: &str) -> Markup {
    page(
        "Simulado",
        html! {
            h1 { "Simulado: " (posting_title) }
            p { "Banca: " (session.banca) }
            form method="post" action="/resultado" {
                input type="hidden" name="simulado_id" value=(session.id.to_string());
                @for (n, questao) in session.questoes.iter().enumerate() {
                    fieldset {
                        legend { (n + 1) ". [" (questao.disciplina) "]" }
                        p { (questao.enunciado) }
                        @for alternativa in &questao.alternativas {
                            label {
                                input type="radio" name={ "q-" (questao.id) } value=(alternativa);
                                " " (alternativa)
                            }
                        }
                    }
                }
                button type="submit" { "Finalizar simulado" }
            }
        },
    )
}

pub fn result(result: &ScoredResult, podcast_url: Option<&str>) -> Markup {
    page(
        "Resultado",
        html! {
            h1 { "Resultado" }
            p {
                "Você acertou " (result.acertos) " de " (result.total) " questões ("
                (format!("{:.2}", result.percentual)) "%)."
            }
            @match podcast_url {
                Some(url) => {
                    section {
                        h2 { "Revisão em áudio" }
                        audio controls src=(url) {}
                    }
                }
                None => {
                    p { "O resumo em áudio não está disponível desta vez." }
                }
            }
            @for detalhe in &result.detalhes {
                article {
                    p { strong { "[" (detalhe.questao.disciplina) "] " } (detalhe.questao.enunciado) }
                    p {
                        "Sua resposta: "
                        (detalhe.resposta_usuario.as_deref().unwrap_or(NOT_ANSWERED))
                        @if detalhe.correta { " ✔" } @else { " ✘" }
                    }
                    @if !detalhe.correta {
                        p { "Resposta correta: " (detalhe.questao.resposta_correta) }
                    }
                    p { em { (detalhe.questao.explicacao) } }
                }
            }
            a href="/" { "Fazer outro simulado" }
        },
    )
}

pub fn error(message: &str) -> Markup {
    page(
        "Erro",
        html! {
            h1 { "Algo deu errado" }
            p { (message) }
            a href="/" { "Voltar ao início" }
        },
    )
}

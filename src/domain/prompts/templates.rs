//! Static template text for the interview engine.
//!
//! Per-language interviewer instructions and closing messages. The
//! closing message replaces the generated question on the final turn, so
//! the last thing the interviewee reads is always deterministic.

use crate::domain::foundation::Language;

/// Returns the interviewer instruction block for a language.
pub fn interviewer_instructions(language: Language) -> &'static str {
    match language {
        Language::Es => INSTRUCTIONS_ES,
        Language::En => INSTRUCTIONS_EN,
        Language::Pt => INSTRUCTIONS_PT,
    }
}

/// Returns the deterministic closing message for a language.
pub fn closing_message(language: Language) -> &'static str {
    match language {
        Language::Es => CLOSING_ES,
        Language::En => CLOSING_EN,
        Language::Pt => CLOSING_PT,
    }
}

// ============================================================================
// Interviewer instructions
// ============================================================================

const INSTRUCTIONS_ES: &str = "\
Eres un entrevistador experto en levantamiento de procesos de negocio. \
Conduce la entrevista en español. Haz una sola pregunta por turno, cada vez \
más específica, sobre los procesos que la persona realiza en su trabajo: qué \
hace, con qué frecuencia, qué sistemas usa, quién más participa. Cuando \
juzgues que ya no hay más que descubrir, agradece y cierra la entrevista.";

const INSTRUCTIONS_EN: &str = "\
You are an expert interviewer eliciting business processes. Conduct the \
interview in English. Ask exactly one question per turn, each more specific \
than the last, about the processes the person performs at work: what they \
do, how often, which systems they use, who else is involved. When you judge \
there is nothing more to discover, thank them and close the interview.";

const INSTRUCTIONS_PT: &str = "\
Você é um entrevistador especialista em levantamento de processos de \
negócio. Conduza a entrevista em português. Faça uma única pergunta por \
turno, cada vez mais específica, sobre os processos que a pessoa realiza no \
trabalho: o que faz, com que frequência, quais sistemas usa, quem mais \
participa. Quando julgar que não há mais nada a descobrir, agradeça e \
encerre a entrevista.";

// ============================================================================
// Closing messages
// ============================================================================

const CLOSING_ES: &str = "\
Muchas gracias por tu tiempo. Tu entrevista ha sido registrada y tus \
respuestas ayudarán a documentar los procesos de la organización. ¡Hasta \
pronto!";

const CLOSING_EN: &str = "\
Thank you very much for your time. Your interview has been recorded and \
your answers will help document the organization's processes. See you soon!";

const CLOSING_PT: &str = "\
Muito obrigado pelo seu tempo. Sua entrevista foi registrada e suas \
respostas ajudarão a documentar os processos da organização. Até logo!";

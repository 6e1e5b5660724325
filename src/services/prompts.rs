//! Prompt templates for the generation tasks
//!
//! Pure functions of their inputs. An empty context still yields a
//! complete prompt; deciding whether to generate at all is the caller's job.

use crate::domain::models::{ExplainStyle, QuizKind};

/// Sentence the model is told to use when the context lacks the answer
pub const NOT_FOUND_REPLY: &str = "I could not find the answer in the uploaded documents.";

/// Question answering with page citations
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are an AI Research Assistant.

Use ONLY the context provided to answer the question.

If the answer is not in the context, say:
"{NOT_FOUND_REPLY}"

--------------------
CONTEXT:
{context}

--------------------
USER QUESTION:
{question}

Write the answer with citations in this format:
(Ref: filename, page number)
"#
    )
}

/// Bullet-point summary of the retrieved context
pub fn summary_prompt(context: &str) -> String {
    format!(
        "Summarize the following document context clearly and concisely:\n\n\
         {context}\n\n\
         Write a clean summary in bullet points.\n"
    )
}

/// Quiz over the retrieved context
pub fn quiz_prompt(context: &str, kind: QuizKind) -> String {
    let instructions = match kind {
        QuizKind::Mcq => {
            "Generate 5 MCQs with 4 options each and provide the correct answer at the end."
        }
        QuizKind::ShortAnswer => "Generate 5 short answer questions.",
    };

    format!(
        "Based on the following context, create a quiz.\n\n\
         CONTEXT:\n{context}\n\n\
         {instructions}\n"
    )
}

/// Explanation of the retrieved context in the requested register
pub fn explain_prompt(context: &str, style: ExplainStyle) -> String {
    let mode = match style {
        ExplainStyle::Simple => "Explain like I'm 10 years old.",
        ExplainStyle::Expert => "Explain in expert technical detail.",
        ExplainStyle::Examples => "Explain with examples.",
    };

    format!(
        "Explain the following content.\n\n\
         CONTEXT:\n{context}\n\n\
         STYLE: {mode}\n"
    )
}

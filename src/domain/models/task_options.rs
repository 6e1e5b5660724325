//! Options for the document-level generation tasks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question format for generated quizzes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizKind {
    /// Multiple choice questions with four options
    #[default]
    Mcq,
    /// Open short-answer questions
    ShortAnswer,
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mcq => write!(f, "mcq"),
            Self::ShortAnswer => write!(f, "short-answer"),
        }
    }
}

impl FromStr for QuizKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" => Ok(Self::Mcq),
            "short-answer" | "short_answer" | "short answer" | "short" => Ok(Self::ShortAnswer),
            other => Err(format!(
                "Invalid quiz kind: {other}. Must be one of: mcq, short-answer"
            )),
        }
    }
}

/// Register used by the explain task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplainStyle {
    /// Plain language for a young reader
    #[default]
    Simple,
    /// Technical depth for a specialist
    Expert,
    /// Illustrated with worked examples
    Examples,
}

impl fmt::Display for ExplainStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Expert => write!(f, "expert"),
            Self::Examples => write!(f, "examples"),
        }
    }
}

impl FromStr for ExplainStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "expert" => Ok(Self::Expert),
            "examples" => Ok(Self::Examples),
            other => Err(format!(
                "Invalid explain style: {other}. Must be one of: simple, expert, examples"
            )),
        }
    }
}

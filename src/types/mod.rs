//! Public types for the Muninn API.

mod request;
mod response;
mod structured;
mod tier;

pub use request::{Difficulty, ExecuteRequest, OperationOptions, PartInfo};
pub use response::{ExecuteResponse, TokenUsage};
pub use structured::{
    ChartSeries, Definition, Flashcard, Insight, LegalRisk, NoteSection, QuizQuestion,
    ReportSection, ResultKind, ScriptSection, Slide, StructuredResult, Topic,
};
pub use tier::Tier;

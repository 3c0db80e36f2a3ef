use crate::naming::RuleViolation;

pub type Result<T> = std::result::Result<T, Error>;

/// Loading and validation failures. Generation numbers are 1-based, as shown to users.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The family data must contain a `{property}` property")]
    MissingProperty { property: &'static str },

    #[error("`first_year` must be an integer")]
    FirstYearNotInteger,

    #[error("`first_year` {value} is out of range")]
    FirstYearOutOfRange { value: String },

    #[error("`children_tree` must be a list")]
    TreeNotList,

    #[error("Generation {generation} is not an object")]
    GenerationNotObject { generation: usize },

    #[error("The value of `{person}` in generation {generation} is not an object")]
    PersonNotObject { person: String, generation: usize },

    #[error("`children` is missing for `{person}` in generation {generation}")]
    MissingChildren { person: String, generation: usize },

    #[error("`children` of `{person}` in generation {generation} is not a list")]
    ChildrenNotList { person: String, generation: usize },

    #[error("Entry {entry} in `children` of `{person}` in generation {generation} is not a string")]
    ChildNotString {
        entry: String,
        person: String,
        generation: usize,
    },

    #[error("`title` of `{person}` in generation {generation} is not a string")]
    TitleNotString { person: String, generation: usize },

    #[error(
        "`{child}` (child of `{person}` in generation {generation}) is not a key of generation {next}",
        next = .generation + 1
    )]
    UnknownChild {
        child: String,
        person: String,
        generation: usize,
    },

    #[error("`{person}` in the last generation ({generation}) cannot have children")]
    ChildrenInLastGeneration { person: String, generation: usize },

    #[error("Invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: RuleViolation },

    #[error("Invalid title `{title}`: {reason}")]
    InvalidTitle { title: String, reason: RuleViolation },
}

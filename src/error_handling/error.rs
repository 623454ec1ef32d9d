use thiserror::Error as ThisError;

/// Why a definition was rejected at construction time. Offending values are
/// carried in their `Display` form.
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("States must be a non-empty set.")]
    EmptyStates,
    #[error("States must be unique, found duplicate state: {0}")]
    DuplicateState(String),
    #[error("Alphabet must be a non-empty set.")]
    EmptyAlphabet,
    #[error("Alphabet symbols must be unique, found duplicate symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Initial state must be in the set of states, got: {0}")]
    InitialStateNotInStates(String),
    #[error("Final states must be a subset of the set of states, got: {0}")]
    FinalStateNotInStates(String),
    #[error("Transition function contains invalid current state: {0}")]
    TransitionSourceNotInStates(String),
    #[error("Transition function contains invalid input symbol: {0}")]
    TransitionSymbolNotInAlphabet(String),
    #[error("Transition function contains invalid next state: {0}")]
    TransitionTargetNotInStates(String),
    #[error("Transition function defines ({0}, {1}) more than once")]
    DuplicateTransition(String, String),
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Invalid input symbol: {symbol}. Must be one of {{{}}}", .alphabet.join(", "))]
    UnknownSymbolError { symbol: String, alphabet: Vec<String> },
    #[error("No transition defined for state {state} with input {symbol}")]
    UndefinedTransitionError { state: String, symbol: String },
    #[error("I/O error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YamlParsingError(#[from] serde_yaml::Error),
    #[error("Definition is missing key: {0}")]
    MissingDefinitionKey(&'static str),
    #[error("Invalid definition: {0}")]
    InvalidDefinition(&'static str),
    #[error("Symbols must be single characters, got: {0:?}")]
    MultiCharacterSymbol(String),
    #[error("Invalid file type {0}. Only .txt files are supported")]
    UnsupportedInputFile(String),
}

pub type Result<T> = std::result::Result<T, Error>;

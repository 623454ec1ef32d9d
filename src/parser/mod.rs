mod definition_parser;

pub use definition_parser::DfaDefinition;

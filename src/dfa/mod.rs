pub(crate) mod dfa;

pub use dfa::DfaSimulator;
pub use dfa::DFA;

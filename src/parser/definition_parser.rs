use crate::dfa::DFA;
use crate::error_handling::Error::{
    IOError, InvalidDefinition, MissingDefinitionKey, MultiCharacterSymbol, YamlParsingError,
};
use crate::error_handling::Result;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::io::Read;
use tracing::{debug, info};

/// The 5-tuple of an automaton whose states are strings and whose symbols are
/// single characters, as read from a YAML file:
///
/// ```yaml
/// states: [S0, S1]
/// alphabet: "01"
/// initial_state: S0
/// final_states: [S1]
/// transitions:
///   S0: { "0": S0, "1": S1 }
///   S1: { "0": S1, "1": S0 }
/// ```
///
/// The alphabet may be a string of symbols or a sequence of single-character
/// scalars. Quote it when it could be read as a number with a different
/// textual form (a leading `+`, an exponent, trailing zeros after a point).
///
/// Parsing only checks the shape of the document; the automaton invariants
/// are checked by [`DfaDefinition::build`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DfaDefinition {
    states: Vec<String>,
    alphabet: Vec<char>,
    initial_state: String,
    final_states: Vec<String>,
    transitions: Vec<((String, char), String)>,
}

impl DfaDefinition {
    pub fn get_states(&self) -> &Vec<String> {
        &self.states
    }

    pub fn get_alphabet(&self) -> &Vec<char> {
        &self.alphabet
    }

    pub fn get_initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn get_final_states(&self) -> &Vec<String> {
        &self.final_states
    }

    pub fn get_transitions(&self) -> &Vec<((String, char), String)> {
        &self.transitions
    }

    /// Validates the definition and builds the automaton.
    pub fn build(&self) -> Result<DFA<String, char>> {
        DFA::new(
            self.states.iter().cloned(),
            self.alphabet.iter().copied(),
            self.initial_state.clone(),
            self.final_states.iter().cloned(),
            self.transitions.iter().cloned(),
        )
    }
}

impl DfaDefinition {
    const STATES_KEY: &'static str = "states";
    const ALPHABET_KEY: &'static str = "alphabet";
    const INITIAL_STATE_KEY: &'static str = "initial_state";
    const FINAL_STATES_KEY: &'static str = "final_states";
    const TRANSITIONS_KEY: &'static str = "transitions";

    pub fn parse_from_file(yaml_file_path: &str) -> Result<DfaDefinition> {
        info!(path = yaml_file_path, "Loading automaton definition");
        let mut file = std::fs::File::open(yaml_file_path).map_err(IOError)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(IOError)?;
        Self::parse_from_str(contents.as_str())
    }

    pub fn parse_from_str(yaml_content: &str) -> Result<DfaDefinition> {
        let kv_pairs: IndexMap<String, Value> =
            serde_yaml::from_str(yaml_content).map_err(YamlParsingError)?;
        let definition = Self::load_from_kv_pairs(kv_pairs)?;
        debug!(
            states = definition.states.len(),
            symbols = definition.alphabet.len(),
            transitions = definition.transitions.len(),
            "Parsed automaton definition"
        );
        Ok(definition)
    }

    fn get_key_value<'a>(
        kv_map: &'a IndexMap<String, Value>,
        key: &'static str,
    ) -> Result<&'a Value> {
        kv_map.get(key).ok_or(MissingDefinitionKey(key))
    }

    fn load_from_kv_pairs(kv_pairs: IndexMap<String, Value>) -> Result<Self> {
        let states = Self::load_state_list(Self::get_key_value(&kv_pairs, Self::STATES_KEY)?)?;

        let alphabet = match Self::get_key_value(&kv_pairs, Self::ALPHABET_KEY)? {
            // An unquoted run of digits such as `alphabet: 10` arrives as a number.
            Value::String(symbols) => symbols.chars().collect(),
            Value::Number(n) => n.to_string().chars().collect(),
            Value::Sequence(sequence) => sequence
                .iter()
                .map(Self::load_symbol)
                .collect::<Result<Vec<char>>>()?,
            _ => return Err(InvalidDefinition("alphabet must be a string or a sequence")),
        };

        let initial_state = Self::scalar_to_string(Self::get_key_value(
            &kv_pairs,
            Self::INITIAL_STATE_KEY,
        )?)
        .ok_or(InvalidDefinition("initial_state must be a scalar"))?;

        // An absent or null `final_states` means nothing is accepted.
        let final_states = match kv_pairs.get(Self::FINAL_STATES_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => Self::load_state_list(value)?,
        };

        let mut transitions = Vec::new();
        match Self::get_key_value(&kv_pairs, Self::TRANSITIONS_KEY)? {
            Value::Mapping(map) => {
                for (from_state, row) in map {
                    let from_state = Self::scalar_to_string(from_state)
                        .ok_or(InvalidDefinition("transition source must be a scalar"))?;
                    let Value::Mapping(row) = row else {
                        return Err(InvalidDefinition(
                            "transitions must map each state to a symbol mapping",
                        ));
                    };
                    for (symbol, to_state) in row {
                        let symbol = Self::load_symbol(symbol)?;
                        let to_state = Self::scalar_to_string(to_state)
                            .ok_or(InvalidDefinition("transition target must be a scalar"))?;
                        transitions.push(((from_state.clone(), symbol), to_state));
                    }
                }
            }
            Value::Null => {}
            _ => return Err(InvalidDefinition("transitions must be a mapping")),
        }

        Ok(Self {
            states,
            alphabet,
            initial_state,
            final_states,
            transitions,
        })
    }

    fn load_state_list(value: &Value) -> Result<Vec<String>> {
        match value {
            Value::Sequence(sequence) => sequence
                .iter()
                .map(|val| {
                    Self::scalar_to_string(val).ok_or(InvalidDefinition("states must be scalars"))
                })
                .collect(),
            _ => Err(InvalidDefinition("expected a sequence of states")),
        }
    }

    fn load_symbol(value: &Value) -> Result<char> {
        let symbol =
            Self::scalar_to_string(value).ok_or(InvalidDefinition("symbols must be scalars"))?;
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(MultiCharacterSymbol(symbol)),
        }
    }

    fn scalar_to_string(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::Error;
    use crate::error_handling::ValidationError;

    const PARITY_YAML: &str = r#"
states: [even, odd]
alphabet: "ab"
initial_state: even
final_states: [even]
transitions:
  even: { a: odd, b: even }
  odd: { a: even, b: odd }
"#;

    #[test]
    fn test_parse_from_str() -> Result<()> {
        let definition = DfaDefinition::parse_from_str(PARITY_YAML)?;
        assert_eq!(definition.get_states(), &vec!["even".to_string(), "odd".to_string()]);
        assert_eq!(definition.get_alphabet(), &vec!['a', 'b']);
        assert_eq!(definition.get_initial_state(), "even");
        assert_eq!(definition.get_final_states(), &vec!["even".to_string()]);
        assert_eq!(definition.get_transitions().len(), 4);

        let mut simulator = definition.build()?.into_simulator();
        assert_eq!(simulator.run_str("abba")?, Some(&"even".to_string()));
        assert_eq!(simulator.run_str("ab")?, None);
        Ok(())
    }

    #[test]
    fn test_numeric_symbols_and_sequence_alphabet() -> Result<()> {
        let yaml = r#"
states: [S0, S1]
alphabet: [0, 1]
initial_state: S0
final_states: [S1]
transitions:
  S0: { 0: S0, 1: S1 }
  S1: { 0: S1, 1: S1 }
"#;
        let mut simulator = DfaDefinition::parse_from_str(yaml)?.build()?.into_simulator();
        assert_eq!(simulator.run_str("001")?, Some(&"S1".to_string()));
        assert_eq!(simulator.run_str("000")?, None);
        Ok(())
    }

    #[test]
    fn test_unquoted_numeric_alphabet() -> Result<()> {
        let yaml = r#"
states: [S0, S1]
alphabet: 10
initial_state: S0
final_states: [S1]
transitions:
  S0: { "0": S0, "1": S1 }
  S1: { "0": S1, "1": S1 }
"#;
        let definition = DfaDefinition::parse_from_str(yaml)?;
        assert_eq!(definition.get_alphabet(), &vec!['1', '0']);

        let mut simulator = definition.build()?.into_simulator();
        assert_eq!(simulator.run_str("01")?, Some(&"S1".to_string()));
        assert_eq!(simulator.run_str("00")?, None);
        Ok(())
    }

    #[test]
    fn test_missing_final_states_accepts_nothing() -> Result<()> {
        let yaml = r#"
states: [A]
alphabet: "x"
initial_state: A
transitions:
  A: { x: A }
"#;
        let mut simulator = DfaDefinition::parse_from_str(yaml)?.build()?.into_simulator();
        assert_eq!(simulator.run_str("xx")?, None);
        Ok(())
    }

    #[test]
    fn test_missing_key() {
        let yaml = "states: [A]\ninitial_state: A\ntransitions: {}\n";
        assert!(matches!(
            DfaDefinition::parse_from_str(yaml),
            Err(Error::MissingDefinitionKey("alphabet"))
        ));
    }

    #[test]
    fn test_multi_character_symbol() {
        let yaml = "states: [A]\nalphabet: [xy]\ninitial_state: A\ntransitions: {}\n";
        match DfaDefinition::parse_from_str(yaml) {
            Err(Error::MultiCharacterSymbol(symbol)) => assert_eq!(symbol, "xy"),
            other => panic!("expected a multi-character symbol error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_shape() {
        let yaml = "states: A\nalphabet: x\ninitial_state: A\ntransitions: {}\n";
        assert!(matches!(
            DfaDefinition::parse_from_str(yaml),
            Err(Error::InvalidDefinition(_))
        ));
    }

    #[test]
    fn test_build_reports_validation_error() -> Result<()> {
        let yaml = r#"
states: [A, B]
alphabet: "x"
initial_state: A
final_states: [B]
transitions:
  A: { x: C }
"#;
        let definition = DfaDefinition::parse_from_str(yaml)?;
        match definition.build() {
            Err(Error::ValidationError(ValidationError::TransitionTargetNotInStates(state))) => {
                assert_eq!(state, "C")
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_read_demo_definition_file() -> Result<()> {
        let project_root = env!("CARGO_MANIFEST_DIR");
        let definition_path = std::path::Path::new(project_root)
            .join("demos")
            .join("mod_three.yaml");
        let definition = DfaDefinition::parse_from_file(definition_path.to_str().unwrap())?;
        let dfa = definition.build()?;
        assert!(dfa.is_complete());

        let mut simulator = dfa.into_simulator();
        assert_eq!(simulator.run_str("1010")?, Some(&"S1".to_string()));
        assert_eq!(simulator.run_str("1100")?, Some(&"S0".to_string()));
        Ok(())
    }
}

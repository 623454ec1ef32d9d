use dfa_engine::dfa::DFA;
use dfa_engine::error_handling::Error;
use dfa_engine::mod_three::mod_three_dfa;
use proptest::prelude::*;
use std::sync::Arc;

// A complete automaton over `states` states and symbols 'a'.., with targets
// drawn from `targets` (one per state x symbol pair).
fn complete_dfa(states: usize, symbols: usize, targets: &[usize], finals: &[bool]) -> DFA<usize, char> {
    let alphabet: Vec<char> = (0..symbols).map(|i| (b'a' + i as u8) as char).collect();
    let mut transitions = Vec::new();
    for state in 0..states {
        for (symbol_idx, symbol) in alphabet.iter().enumerate() {
            let target = targets[state * symbols + symbol_idx] % states;
            transitions.push(((state, *symbol), target));
        }
    }
    let final_states: Vec<usize> = (0..states).filter(|s| finals[*s]).collect();
    DFA::new(0..states, alphabet, 0, final_states, transitions).expect("valid definition")
}

fn complete_dfa_strategy() -> impl Strategy<Value = (DFA<usize, char>, Vec<char>)> {
    (1usize..6, 1usize..4).prop_flat_map(|(states, symbols)| {
        (
            prop::collection::vec(0usize..states, states * symbols),
            prop::collection::vec(any::<bool>(), states),
            prop::collection::vec(0usize..symbols, 0..64),
        )
            .prop_map(move |(targets, finals, input)| {
                let dfa = complete_dfa(states, symbols, &targets, &finals);
                let input = input.into_iter().map(|i| (b'a' + i as u8) as char).collect();
                (dfa, input)
            })
    })
}

proptest! {
    #[test]
    fn complete_dfa_never_hits_undefined_transition((dfa, input) in complete_dfa_strategy()) {
        prop_assert!(dfa.is_complete());
        let mut simulator = dfa.into_simulator();
        let result = simulator.run(&input);
        let undefined = matches!(result, Err(Error::UndefinedTransitionError { .. }));
        prop_assert!(!undefined);
        prop_assert!(result.is_ok());
    }

    #[test]
    fn reset_then_run_matches_fresh_run((dfa, input) in complete_dfa_strategy(), prefix in "[ab]{0,8}") {
        let dfa = Arc::new(dfa);
        let mut fresh = dfa_engine::dfa::DfaSimulator::new(dfa.clone());
        let expected = fresh.run(&input).map(|s| s.copied()).map_err(|e| e.to_string());

        let mut reused = dfa_engine::dfa::DfaSimulator::new(dfa);
        // Symbols outside the alphabet are skipped so the prefix only moves the state.
        for symbol in prefix.chars() {
            let _ = reused.transition(&symbol);
        }
        reused.reset();
        let actual = reused.run(&input).map(|s| s.copied()).map_err(|e| e.to_string());
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn run_is_repeatable((dfa, input) in complete_dfa_strategy()) {
        let mut simulator = dfa.into_simulator();
        let first = simulator.run(&input).map(|s| s.copied()).map_err(|e| e.to_string());
        let second = simulator.run(&input).map(|s| s.copied()).map_err(|e| e.to_string());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_symbol_fails_from_any_state(bits in "[01]{0,16}", symbol in "[^01]") {
        let mut simulator = mod_three_dfa().expect("valid definition").into_simulator();
        simulator.run_str(&bits).expect("binary input");
        let before = *simulator.current_state();
        let symbol = symbol.chars().next().expect("one character");
        match simulator.transition(&symbol) {
            Err(Error::UnknownSymbolError { symbol: reported, .. }) => {
                prop_assert_eq!(reported, symbol.to_string())
            }
            other => prop_assert!(false, "expected an unknown symbol error, got {:?}", other),
        }
        prop_assert_eq!(*simulator.current_state(), before);
    }

    #[test]
    fn mod_three_matches_arithmetic(n in any::<u64>()) {
        let mut simulator = mod_three_dfa().expect("valid definition").into_simulator();
        let state = simulator.run_str(&format!("{:b}", n)).expect("binary input").copied();
        prop_assert_eq!(state.map(|s| s.remainder() as u64), Some(n % 3));
    }
}

use crate::error_handling::Error::{UndefinedTransitionError, UnknownSymbolError};
use crate::error_handling::ValidationError::{
    DuplicateState, DuplicateSymbol, DuplicateTransition, EmptyAlphabet, EmptyStates,
    FinalStateNotInStates, InitialStateNotInStates, TransitionSourceNotInStates,
    TransitionSymbolNotInAlphabet, TransitionTargetNotInStates,
};
use crate::error_handling::Result;
use indexmap::IndexSet;
use std::borrow::Borrow;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::Arc;

// Index of a state in `DFA::states`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct State(usize);

/// A validated deterministic finite automaton over states `S` and symbols `Sym`.
///
/// States and symbols are interned into dense indices when the automaton is
/// built, so membership is only checked once. The definition is immutable;
/// execution happens on a [`DfaSimulator`].
pub struct DFA<S, Sym> {
    start: State,
    accept: Vec<bool>,
    states: IndexSet<S>,
    alphabet: IndexSet<Sym>,
    transitions: Vec<Vec<Option<State>>>, // from_state -> symbol index -> to_state
}

impl<S, Sym> Debug for DFA<S, Sym>
where
    S: Debug,
    Sym: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accept: Vec<&S> = self
            .states
            .iter()
            .zip(self.accept.iter())
            .filter_map(|(state, is_accept)| is_accept.then_some(state))
            .collect();
        write!(
            f,
            "DFA( start: {:?}, accept: {:?}, states: {:?}, alphabet: {:?}, transitions: {{\n",
            self.states[self.start.0], accept, self.states, self.alphabet
        )?;

        for (state_idx, row) in self.transitions.iter().enumerate() {
            if row.iter().all(Option::is_none) {
                continue;
            }
            write!(f, "\t{:?}:\n", self.states[state_idx])?;
            for (symbol_idx, to_state) in row.iter().enumerate() {
                if let Some(to_state) = to_state {
                    write!(
                        f,
                        "\t\t{:?} -> {:?}\n",
                        self.alphabet[symbol_idx], self.states[to_state.0]
                    )?;
                }
            }
        }

        write!(f, "}} )")
    }
}

impl<S, Sym> DFA<S, Sym>
where
    S: Clone + Display + Eq + Hash,
    Sym: Clone + Display + Eq + Hash,
{
    /// Builds an automaton from its 5-tuple definition.
    ///
    /// Checks run in this order and stop at the first violation: states are
    /// non-empty and unique, the alphabet is non-empty and unique, the initial
    /// state is a state, every final state is a state, and every transition
    /// entry maps a known state and symbol to a known state.
    pub fn new<StateIter, SymbolIter, FinalIter, TransitionIter>(
        states: StateIter,
        alphabet: SymbolIter,
        initial_state: S,
        final_states: FinalIter,
        transition_function: TransitionIter,
    ) -> Result<Self>
    where
        StateIter: IntoIterator<Item = S>,
        SymbolIter: IntoIterator<Item = Sym>,
        FinalIter: IntoIterator<Item = S>,
        TransitionIter: IntoIterator<Item = ((S, Sym), S)>,
    {
        let mut state_set = IndexSet::new();
        for state in states {
            if state_set.contains(&state) {
                return Err(DuplicateState(state.to_string()).into());
            }
            state_set.insert(state);
        }
        if state_set.is_empty() {
            return Err(EmptyStates.into());
        }

        let mut symbol_set = IndexSet::new();
        for symbol in alphabet {
            if symbol_set.contains(&symbol) {
                return Err(DuplicateSymbol(symbol.to_string()).into());
            }
            symbol_set.insert(symbol);
        }
        if symbol_set.is_empty() {
            return Err(EmptyAlphabet.into());
        }

        let start = match state_set.get_index_of(&initial_state) {
            Some(idx) => State(idx),
            None => return Err(InitialStateNotInStates(initial_state.to_string()).into()),
        };

        let mut accept = vec![false; state_set.len()];
        for state in final_states {
            match state_set.get_index_of(&state) {
                Some(idx) => accept[idx] = true,
                None => return Err(FinalStateNotInStates(state.to_string()).into()),
            }
        }

        let mut transitions = vec![vec![None; symbol_set.len()]; state_set.len()];
        for ((from_state, symbol), to_state) in transition_function {
            let from_idx = state_set
                .get_index_of(&from_state)
                .ok_or_else(|| TransitionSourceNotInStates(from_state.to_string()))?;
            let symbol_idx = symbol_set
                .get_index_of(&symbol)
                .ok_or_else(|| TransitionSymbolNotInAlphabet(symbol.to_string()))?;
            let to_idx = state_set
                .get_index_of(&to_state)
                .ok_or_else(|| TransitionTargetNotInStates(to_state.to_string()))?;

            let slot = &mut transitions[from_idx][symbol_idx];
            if slot.is_some() {
                return Err(DuplicateTransition(from_state.to_string(), symbol.to_string()).into());
            }
            *slot = Some(State(to_idx));
        }

        Ok(DFA {
            start,
            accept,
            states: state_set,
            alphabet: symbol_set,
            transitions,
        })
    }

    pub fn into_simulator(self) -> DfaSimulator<S, Sym> {
        DfaSimulator::new(Arc::new(self))
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    pub fn alphabet(&self) -> impl Iterator<Item = &Sym> {
        self.alphabet.iter()
    }

    pub fn initial_state(&self) -> &S {
        self.get_state(self.start)
    }

    pub fn final_states(&self) -> impl Iterator<Item = &S> {
        self.states
            .iter()
            .zip(self.accept.iter())
            .filter_map(|(state, is_accept)| is_accept.then_some(state))
    }

    pub fn is_final(&self, state: &S) -> bool {
        self.states
            .get_index_of(state)
            .map_or(false, |idx| self.accept[idx])
    }

    /// Looks up the transition function without touching any runtime state.
    pub fn next_state(&self, state: &S, symbol: &Sym) -> Option<&S> {
        let from_idx = self.states.get_index_of(state)?;
        let symbol_idx = self.alphabet.get_index_of(symbol)?;
        self.transitions[from_idx][symbol_idx].map(|to_state| self.get_state(to_state))
    }

    /// True when every (state, symbol) pair has a transition.
    pub fn is_complete(&self) -> bool {
        self.transitions
            .iter()
            .all(|row| row.iter().all(Option::is_some))
    }

    fn get_state(&self, state: State) -> &S {
        &self.states[state.0]
    }

    fn symbol_index(&self, symbol: &Sym) -> Result<usize> {
        self.alphabet
            .get_index_of(symbol)
            .ok_or_else(|| UnknownSymbolError {
                symbol: symbol.to_string(),
                alphabet: self.alphabet.iter().map(|s| s.to_string()).collect(),
            })
    }
}

/// Runtime instance of a [`DFA`]: the shared definition plus the current state.
///
/// A simulator is single-owner. Concurrent runs should each use their own
/// simulator over the same `Arc<DFA>`.
pub struct DfaSimulator<S, Sym> {
    dfa: Arc<DFA<S, Sym>>,
    current_state: State,
}

impl<S, Sym> DfaSimulator<S, Sym>
where
    S: Clone + Display + Eq + Hash,
    Sym: Clone + Display + Eq + Hash,
{
    pub fn new(dfa: Arc<DFA<S, Sym>>) -> Self {
        let current_state = dfa.start;
        DfaSimulator { dfa, current_state }
    }

    pub fn dfa(&self) -> &Arc<DFA<S, Sym>> {
        &self.dfa
    }

    pub fn current_state(&self) -> &S {
        self.dfa.get_state(self.current_state)
    }

    pub fn is_accepting(&self) -> bool {
        self.dfa.accept[self.current_state.0]
    }

    pub fn reset(&mut self) {
        self.current_state = self.dfa.start;
    }

    /// Consumes one symbol. On error the current state is left untouched.
    pub fn transition(&mut self, symbol: &Sym) -> Result<()> {
        let symbol_idx = self.dfa.symbol_index(symbol)?;
        let next_state = self.dfa.transitions[self.current_state.0][symbol_idx];
        match next_state {
            Some(next_state) => {
                self.current_state = next_state;
                Ok(())
            }
            None => Err(UndefinedTransitionError {
                state: self.current_state().to_string(),
                symbol: symbol.to_string(),
            }),
        }
    }

    /// Runs the whole input from the initial state.
    ///
    /// Returns the final state if it is accepting and `None` otherwise. The
    /// first failing symbol aborts the run and leaves the simulator in the
    /// state reached before it.
    pub fn run<I>(&mut self, input: I) -> Result<Option<&S>>
    where
        I: IntoIterator,
        I::Item: Borrow<Sym>,
    {
        self.reset();
        for symbol in input {
            self.transition(symbol.borrow())?;
        }
        if self.is_accepting() {
            Ok(Some(self.current_state()))
        } else {
            Ok(None)
        }
    }
}

impl<S> DfaSimulator<S, char>
where
    S: Clone + Display + Eq + Hash,
{
    /// Runs a line of text, one symbol per character.
    pub fn run_str(&mut self, line: &str) -> Result<Option<&S>> {
        self.run(line.chars())
    }
}

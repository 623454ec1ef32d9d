use crate::dfa::{DfaSimulator, DFA};
use crate::error_handling::Result;
use crate::input::read_lines;
use std::fmt::{Display, Formatter};
use std::io::Write;
use tracing::{debug, info};

/// Printed in place of a remainder when a run ends outside the final states.
pub const UNREACHABLE: &str = "Final state unreachable";

/// Remainder of the bits read so far, modulo three.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Residue {
    S0,
    S1,
    S2,
}

impl Residue {
    pub const ALL: [Residue; 3] = [Residue::S0, Residue::S1, Residue::S2];

    pub fn remainder(&self) -> u8 {
        match self {
            Residue::S0 => 0,
            Residue::S1 => 1,
            Residue::S2 => 2,
        }
    }

    // Appending bit b to a number n yields 2n + b.
    fn next(&self, bit: char) -> Residue {
        let bit = if bit == '1' { 1 } else { 0 };
        match (2 * self.remainder() + bit) % 3 {
            0 => Residue::S0,
            1 => Residue::S1,
            _ => Residue::S2,
        }
    }
}

impl Display for Residue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.remainder())
    }
}

/// The binary mod-3 automaton. Every state is final, so any binary string is
/// accepted and the final state is its remainder.
pub fn mod_three_dfa() -> Result<DFA<Residue, char>> {
    let states = Residue::ALL;
    let alphabet = ['0', '1'];
    let transitions = states.iter().flat_map(|state| {
        alphabet
            .iter()
            .map(move |&bit| ((*state, bit), state.next(bit)))
    });
    DFA::new(states, alphabet, Residue::S0, states, transitions)
}

/// Result of running one line through the automaton. `outcome` is `None` when
/// the run did not end in a final state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Evaluation {
    pub input: String,
    pub outcome: Option<u8>,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Some(remainder) => write!(f, "{}  -->  {}", self.input, remainder),
            None => write!(f, "{}  -->  {}", self.input, UNREACHABLE),
        }
    }
}

pub struct ModThree {
    simulator: DfaSimulator<Residue, char>,
}

impl ModThree {
    pub fn new() -> Result<Self> {
        info!("Initializing mod-three automaton");
        Ok(Self {
            simulator: mod_three_dfa()?.into_simulator(),
        })
    }

    pub fn remainder(&mut self, line: &str) -> Result<Option<u8>> {
        let outcome = self.simulator.run_str(line)?.map(Residue::remainder);
        self.simulator.reset();
        Ok(outcome)
    }

    pub fn evaluate(&mut self, line: &str) -> Result<Evaluation> {
        let outcome = self.remainder(line)?;
        debug!(input = line, ?outcome, "Evaluated line");
        Ok(Evaluation {
            input: line.to_string(),
            outcome,
        })
    }
}

/// Evaluates every line in order, stopping at the first line that fails.
pub fn evaluate_all<I>(lines: I) -> Result<Vec<Evaluation>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut mod_three = ModThree::new()?;
    info!("Checking strings");
    lines
        .into_iter()
        .map(|line| mod_three.evaluate(line.as_ref()))
        .collect()
}

/// Evaluates the lines in order and writes each result as soon as it is
/// known, so lines before a failing line still reach `out`. Returns the
/// number of lines written.
pub fn write_evaluations<I, W>(lines: I, out: &mut W) -> Result<usize>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: Write,
{
    let mut mod_three = ModThree::new()?;
    info!("Checking strings");
    let mut written = 0;
    for line in lines {
        let evaluation = mod_three.evaluate(line.as_ref())?;
        writeln!(out, "{}", evaluation)?;
        written += 1;
    }
    Ok(written)
}

/// Where the lines to evaluate come from. An argument containing a `.` is a
/// file path; anything else is a single binary string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
    Literal(String),
    File(String),
}

impl InputSource {
    pub fn from_arg(arg: &str) -> Self {
        if arg.contains('.') {
            InputSource::File(arg.to_string())
        } else {
            InputSource::Literal(arg.to_string())
        }
    }

    pub fn lines(&self) -> Result<Vec<String>> {
        match self {
            InputSource::Literal(line) => Ok(vec![line.clone()]),
            InputSource::File(path) => read_lines(path),
        }
    }
}

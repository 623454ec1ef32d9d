mod mod_three;

pub use mod_three::evaluate_all;
pub use mod_three::mod_three_dfa;
pub use mod_three::Evaluation;
pub use mod_three::InputSource;
pub use mod_three::ModThree;
pub use mod_three::Residue;
pub use mod_three::write_evaluations;
pub use mod_three::UNREACHABLE;

use edo_template::{Boilerplate, Question};

use crate::Result;
use crate::traits::Confirmation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    Provided(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSelection {
    Selected(usize),
    Cancelled,
}

pub trait InitInteraction: Send + Sync {
    /// Asks for another target directory after `rejected` failed validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn prompt_target_dir(&self, initial: &str, rejected: &str) -> Result<TextInput>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_group(&self, groups: &[String]) -> Result<ChoiceSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn select_boilerplate(&self, boilerplates: &[Boilerplate]) -> Result<ChoiceSelection>;

    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn confirm_deprecated(&self, boilerplate: &Boilerplate) -> Result<Confirmation>;

    /// Asks one boilerplate question. Confirm questions answer `true` or `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn ask(&self, key: &str, question: &Question, default: &str) -> Result<TextInput>;
}

use crate::Result;

/// Answers for one package. Also threaded through the workspace as the
/// fallback for the next package's author and license.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageAnswers {
    pub private: bool,
    pub author: String,
    pub license: String,
    pub homepage: String,
    pub bugs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePrompt {
    pub package_name: String,
    pub defaults: PackageAnswers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageAnswersInput {
    Provided(PackageAnswers),
    Cancelled,
}

pub trait PkgInteraction: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the interaction cannot be completed.
    fn ask_package(&self, prompt: &PackagePrompt) -> Result<PackageAnswersInput>;
}

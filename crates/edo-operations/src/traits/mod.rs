mod bundler;
mod commit_interaction;
mod commit_runner;
mod git_provider;
mod init_interaction;
mod pkg_interaction;
mod registry;

pub use bundler::{BundleFormat, BundleJob, BundleOutput, Bundler};
pub use commit_interaction::{
    CommitInteraction, CommitMessageInteraction, CommitPrompt, CommitType, Confirmation,
    ConventionalMessage, FileSelection, MessageInput,
};
pub use commit_runner::{CommitRunOutcome, CommitRunner};
pub use git_provider::GitProvider;
pub use init_interaction::{ChoiceSelection, InitInteraction, TextInput};
pub use pkg_interaction::{PackageAnswers, PackageAnswersInput, PackagePrompt, PkgInteraction};
pub use registry::Registry;

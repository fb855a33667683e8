mod build;
mod commit;
mod conventional;
mod init;
mod pkg;

pub use build::{BuildOperation, BuildOutcome};
pub use commit::{CommitInput, CommitOperation, CommitOutcome, PushSkipReason};
pub use conventional::{ConventionalCommitRunner, MAX_HEADER_WIDTH, MAX_LINE_WIDTH, format_message};
pub use init::{
    InitInput, InitOperation, InitOutcome, NPM_REGISTRY, TAOBAO_REGISTRY, resolve_registry,
};
pub use pkg::{PkgInput, PkgOperation, PkgOutcome, normalize_github};

use std::cell::{Cell, RefCell};

use git2::{Cred, CredentialType, ErrorCode, PushOptions, RemoteCallbacks};

use crate::{GitError, PushAuth, PushOutcome, Repository, Result};

const MAX_CREDENTIAL_ATTEMPTS: u8 = 3;
const TOKEN_USERNAME: &str = "x-access-token";

impl Repository {
    /// # Errors
    ///
    /// Returns an error if the remote lookup fails.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let Ok(remote) = self.inner.find_remote(name) else {
            return Ok(None);
        };

        Ok(remote.url().map(String::from))
    }

    /// Pushes `refs/heads/<branch>` to the same ref on `remote_name`.
    ///
    /// Authentication failures and rejected updates are reported through
    /// [`PushOutcome`]; only transport and setup problems are errors.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RemoteNotFound`] if the remote does not exist, or an
    /// error if the push fails for a reason other than authentication.
    pub fn push(&self, remote_name: &str, branch: &str, auth: &PushAuth) -> Result<PushOutcome> {
        let mut remote =
            self.inner
                .find_remote(remote_name)
                .map_err(|_| GitError::RemoteNotFound {
                    name: remote_name.to_string(),
                })?;
        let config = self.inner.config()?;

        let attempts = Cell::new(0u8);
        let credentials_exhausted = Cell::new(false);
        let rejection: RefCell<Option<String>> = RefCell::new(None);

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|url, username, allowed| {
            attempts.set(attempts.get() + 1);
            if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
                credentials_exhausted.set(true);
                return Err(git2::Error::from_str("credentials rejected by remote"));
            }
            credentials(auth, &config, url, username, allowed)
        });
        callbacks.push_update_reference(|refname, status| {
            if let Some(message) = status {
                *rejection.borrow_mut() = Some(format!("{refname}: {message}"));
            }
            Ok(())
        });

        let mut options = PushOptions::new();
        options.remote_callbacks(callbacks);

        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
        tracing::debug!(remote = remote_name, %refspec, "pushing");

        match remote.push(&[refspec.as_str()], Some(&mut options)) {
            Ok(()) => Ok(rejection
                .borrow()
                .clone()
                .map_or_else(PushOutcome::pushed, PushOutcome::rejected)),
            Err(e) if e.code() == ErrorCode::Auth || credentials_exhausted.get() => {
                Ok(PushOutcome::auth_failed(e.message()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn credentials(
    auth: &PushAuth,
    config: &git2::Config,
    url: &str,
    username: Option<&str>,
    allowed: CredentialType,
) -> std::result::Result<Cred, git2::Error> {
    if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
        return match auth {
            PushAuth::Token(token) => {
                Cred::userpass_plaintext(username.unwrap_or(TOKEN_USERNAME), token)
            }
            PushAuth::Default => Cred::credential_helper(config, url, username),
        };
    }
    if allowed.contains(CredentialType::SSH_KEY) {
        return Cred::ssh_key_from_agent(username.unwrap_or("git"));
    }
    if allowed.contains(CredentialType::USERNAME) {
        return Cred::username(username.unwrap_or("git"));
    }
    Cred::default()
}

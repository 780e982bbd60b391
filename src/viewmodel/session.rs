//! Session state for interactive frontends.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::auth::AuthRepository;
use crate::error::Result;
use crate::models::User;
use crate::usecases::{RegisterUser, SignInUser};
use crate::viewmodel::user_message;

/// Authentication state of the frontend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Startup value, before the first session transition arrives.
    #[default]
    Unknown,
    /// No one is signed in.
    Anonymous,
    /// A user is signed in.
    Authenticated(User),
}

/// Published session state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    /// Current session.
    pub session: SessionState,
    /// Whether a sign-in, registration, or sign-out is in flight.
    pub operation_pending: bool,
    /// Last failure as display-ready text. Cleared when the next
    /// operation starts.
    pub error: Option<String>,
}

impl SessionSnapshot {
    /// Whether the initial session value has not arrived yet.
    #[inline]
    #[must_use]
    pub fn is_initial_loading(&self) -> bool {
        matches!(self.session, SessionState::Unknown)
    }
}

/// Reactive session manager.
///
/// Mirrors the repository's session stream into a published snapshot
/// and runs the credential operations. Dropping the manager stops the
/// mirror task.
#[derive(Debug)]
pub struct SessionViewModel<A> {
    /// Session repository.
    repository: Arc<A>,
    /// Credential validation and sign-in.
    sign_in: SignInUser<A>,
    /// Credential validation and registration.
    register: RegisterUser<A>,
    /// Snapshot publisher.
    state: Arc<watch::Sender<SessionSnapshot>>,
    /// Session stream mirror, aborted on drop.
    watcher: JoinHandle<()>,
}

impl<A> Drop for SessionViewModel<A> {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

impl<A: AuthRepository + 'static> SessionViewModel<A> {
    /// Creates a session manager over the given repository.
    #[must_use]
    pub fn new(repository: Arc<A>) -> Self {
        let state = Arc::new(watch::Sender::new(SessionSnapshot::default()));

        let mut stream = repository.subscribe();
        let mirror = Arc::clone(&state);
        let watcher = tokio::spawn(async move {
            // The first value arrives immediately and flips the state
            // out of `Unknown`.
            while let Some(session) = stream.next().await {
                mirror.send_modify(|snapshot| {
                    snapshot.session = match session {
                        Some(user) => SessionState::Authenticated(user),
                        None => SessionState::Anonymous,
                    };
                });
            }
        });

        Self {
            sign_in: SignInUser::new(Arc::clone(&repository)),
            register: RegisterUser::new(Arc::clone(&repository)),
            repository,
            state,
            watcher,
        }
    }

    /// Subscribes to snapshot changes. The receiver starts at the
    /// current snapshot.
    #[inline]
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Returns the current snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Propagates the underlying failure after recording its
    /// display-ready message in the snapshot.
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<User> {
        self.run_operation(self.sign_in.execute(email, password))
            .await
    }

    /// Creates a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Propagates the underlying failure after recording its
    /// display-ready message in the snapshot.
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<&str>,
    ) -> Result<User> {
        self.run_operation(self.register.execute(email, password, display_name))
            .await
    }

    /// Clears the current session.
    ///
    /// # Errors
    ///
    /// Propagates the underlying failure after recording its
    /// display-ready message in the snapshot.
    pub async fn sign_out(&self) -> Result<()> {
        self.run_operation(self.repository.sign_out()).await
    }

    /// Runs a session operation, maintaining the pending flag and the
    /// error slot around it. The session itself changes only through
    /// the mirrored stream.
    async fn run_operation<T>(&self, operation: impl Future<Output = Result<T>>) -> Result<T> {
        self.publish(|snapshot| {
            snapshot.operation_pending = true;
            snapshot.error = None;
        });

        let result = operation.await;
        match &result {
            Ok(_) => self.publish(|snapshot| {
                snapshot.operation_pending = false;
            }),
            Err(error) => {
                tracing::warn!(%error, code = ?error.provider_code(), "session operation failed");
                let message = user_message(error);
                self.publish(|snapshot| {
                    snapshot.operation_pending = false;
                    snapshot.error = Some(message);
                });
            }
        }
        result
    }

    /// Publishes a snapshot update. `send_modify` runs the closure
    /// under the channel lock, so concurrent publishers cannot lose
    /// each other's writes.
    fn publish<F: FnOnce(&mut SessionSnapshot)>(&self, update: F) {
        self.state.send_modify(update);
    }
}

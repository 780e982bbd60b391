//! Authenticated-session repository and its change stream.
//!
//! [`ProviderAuthRepository`] owns the canonical session state. Every
//! transition (sign-in, registration, sign-out) flows through it and
//! is pushed to all subscribed [`SessionStream`]s. Dropping a stream
//! unsubscribes it.

use secrecy::SecretString;
use tokio::sync::watch;

use crate::auth::IdentityClient;
use crate::error::Result;
use crate::models::User;

/// Abstraction over the session lifecycle.
///
/// Implementations own the current session and broadcast every
/// transition to subscribers.
pub trait AuthRepository: Send + Sync {
    /// Signs in with email and password and establishes a session.
    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<User>> + Send;

    /// Creates a new account and establishes a session for it.
    fn register(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<&str>,
    ) -> impl Future<Output = Result<User>> + Send;

    /// Clears the current session. Idempotent.
    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send;

    /// Returns the currently signed-in user, if any.
    fn current_user(&self) -> impl Future<Output = Option<User>> + Send;

    /// Subscribes to session transitions.
    ///
    /// The first [`SessionStream::next`] call yields the current
    /// session immediately, then each call waits for the next
    /// transition.
    fn subscribe(&self) -> SessionStream;
}

/// Stream of session transitions handed out by
/// [`AuthRepository::subscribe`].
///
/// Yields `Some(session)` per transition, starting with the session
/// current at subscription time, and `None` once the repository is
/// dropped. Drop the stream to unsubscribe.
#[derive(Debug)]
pub struct SessionStream {
    /// Underlying change channel.
    rx: watch::Receiver<Option<User>>,
    /// Whether the subscription-time value was already yielded.
    delivered_initial: bool,
}

impl SessionStream {
    /// Wraps a receiver so the current value is yielded first.
    ///
    /// Intended for [`AuthRepository`] implementations that hold their
    /// session in a watch channel.
    #[inline]
    #[must_use]
    pub fn from_receiver(rx: watch::Receiver<Option<User>>) -> Self {
        Self {
            rx,
            delivered_initial: false,
        }
    }

    /// Waits for the next session value.
    ///
    /// The first call resolves immediately with the session current at
    /// subscription time. Returns `None` when the repository has been
    /// dropped.
    pub async fn next(&mut self) -> Option<Option<User>> {
        if self.delivered_initial {
            self.rx.changed().await.ok()?;
        } else {
            self.delivered_initial = true;
        }
        Some(self.rx.borrow_and_update().clone())
    }

    /// Returns the latest session without waiting.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<User> {
        self.rx.borrow().clone()
    }
}

/// Session repository backed by the hosted identity provider.
///
/// The session itself is held locally. The provider issues no
/// server-side sign-out, so [`AuthRepository::sign_out`] only clears
/// the local state.
#[derive(Debug)]
pub struct ProviderAuthRepository {
    /// Identity provider client.
    client: IdentityClient,
    /// Canonical session state, broadcast to subscribers.
    session: watch::Sender<Option<User>>,
}

impl ProviderAuthRepository {
    /// Creates a repository with no active session.
    #[inline]
    #[must_use]
    pub fn new(client: IdentityClient) -> Self {
        Self {
            client,
            session: watch::Sender::new(None),
        }
    }
}

impl AuthRepository for ProviderAuthRepository {
    fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<User>> + Send {
        async move {
            let user = self.client.sign_in(email, password).await?.into_user();
            let _previous = self.session.send_replace(Some(user.clone()));
            tracing::info!(uid = %user.uid, "session established");
            Ok(user)
        }
    }

    fn register(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<&str>,
    ) -> impl Future<Output = Result<User>> + Send {
        async move {
            let user = self
                .client
                .sign_up(email, password, display_name)
                .await?
                .into_user();
            let _previous = self.session.send_replace(Some(user.clone()));
            tracing::info!(uid = %user.uid, "account created, session established");
            Ok(user)
        }
    }

    fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
        async move {
            let _previous = self.session.send_replace(None);
            tracing::info!("session cleared");
            Ok(())
        }
    }

    fn current_user(&self) -> impl Future<Output = Option<User>> + Send {
        // One-shot read: the first stream value is the current session,
        // and dropping the stream releases the subscription.
        async move {
            let mut stream = self.subscribe();
            stream.next().await.flatten()
        }
    }

    fn subscribe(&self) -> SessionStream {
        SessionStream::from_receiver(self.session.subscribe())
    }
}

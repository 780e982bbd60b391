//! Application use cases.
//!
//! Thin, single-purpose operations over the repositories. Input rules
//! that must hold regardless of the caller (minimum search length,
//! required credentials, active-store filtering) live here.

use std::sync::Arc;

use secrecy::{ExposeSecret as _, SecretString};

use crate::auth::AuthRepository;
use crate::error::{GameDealsError, Result};
use crate::models::{Deal, Store, User};
use crate::repository::GameRepository;

/// Minimum number of characters before a search hits the network.
pub const MIN_SEARCH_LEN: usize = 3;

/// Fetches the most recent deals page.
#[derive(Debug)]
pub struct GetLatestDeals<R> {
    /// Deals source.
    repository: Arc<R>,
}

impl<R: GameRepository> GetLatestDeals<R> {
    /// Creates the use case over the given repository.
    #[inline]
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Runs the fetch.
    ///
    /// # Errors
    ///
    /// Propagates any repository error.
    pub async fn execute(&self) -> Result<Vec<Deal>> {
        self.repository.latest_deals().await
    }
}

/// Searches games by title.
///
/// Terms shorter than [`MIN_SEARCH_LEN`] characters short-circuit to
/// an empty result without touching the repository.
#[derive(Debug)]
pub struct SearchGameOffers<R> {
    /// Deals source.
    repository: Arc<R>,
}

impl<R: GameRepository> SearchGameOffers<R> {
    /// Creates the use case over the given repository.
    #[inline]
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Propagates any repository error.
    pub async fn execute(&self, title: &str) -> Result<Vec<Deal>> {
        if title.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        self.repository.search_game(title).await
    }
}

/// Fetches the store catalog, keeping only active stores.
#[derive(Debug)]
pub struct GetStores<R> {
    /// Deals source.
    repository: Arc<R>,
}

impl<R: GameRepository> GetStores<R> {
    /// Creates the use case over the given repository.
    #[inline]
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Runs the fetch.
    ///
    /// # Errors
    ///
    /// Propagates any repository error.
    pub async fn execute(&self) -> Result<Vec<Store>> {
        let stores = self.repository.stores().await?;
        Ok(stores.into_iter().filter(|store| store.is_active).collect())
    }
}

/// Signs a user in with email and password.
#[derive(Debug)]
pub struct SignInUser<A> {
    /// Session repository.
    repository: Arc<A>,
}

impl<A: AuthRepository> SignInUser<A> {
    /// Creates the use case over the given repository.
    #[inline]
    #[must_use]
    pub const fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Runs the sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::InvalidInput`] when the email or
    /// password is empty, otherwise propagates the repository error.
    pub async fn execute(&self, email: &str, password: &SecretString) -> Result<User> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(GameDealsError::InvalidInput(
                "email and password are required",
            ));
        }
        self.repository.sign_in(email, password).await
    }
}

/// Registers a new user account.
#[derive(Debug)]
pub struct RegisterUser<A> {
    /// Session repository.
    repository: Arc<A>,
}

impl<A: AuthRepository> RegisterUser<A> {
    /// Creates the use case over the given repository.
    #[inline]
    #[must_use]
    pub const fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }

    /// Runs the registration.
    ///
    /// # Errors
    ///
    /// Returns [`GameDealsError::InvalidInput`] when the email or
    /// password is empty, otherwise propagates the repository error.
    pub async fn execute(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<&str>,
    ) -> Result<User> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(GameDealsError::InvalidInput(
                "email and password are required",
            ));
        }
        self.repository.register(email, password, display_name).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::auth::SessionStream;
    use crate::models::{DealId, GameId, StoreId, UserId};

    /// In-memory deals source counting how often each call is made.
    #[derive(Debug, Default)]
    struct FakeGameRepository {
        search_calls: AtomicUsize,
    }

    fn deal(id: &str) -> Deal {
        Deal {
            deal_id: DealId::from(id),
            game_id: GameId::from("612"),
            title: "LEGO Batman".to_owned(),
            sale_price: 9.99_f64,
            normal_price: 19.99_f64,
            savings: 50.0_f64,
            store_id: StoreId::from("1"),
            thumb_url: "https://example.com/thumb.jpg".to_owned(),
            purchase_link: "https://example.com/redirect?dlid=d-1".to_owned(),
        }
    }

    fn store(id: &str, is_active: bool) -> Store {
        Store {
            store_id: StoreId::from(id),
            store_name: format!("Store {id}"),
            is_active,
            icon_url: "https://example.com/icon.png".to_owned(),
        }
    }

    impl GameRepository for FakeGameRepository {
        fn latest_deals(&self) -> impl Future<Output = Result<Vec<Deal>>> + Send {
            async move { Ok(vec![deal("d-1"), deal("d-2")]) }
        }

        fn search_game(&self, _title: &str) -> impl Future<Output = Result<Vec<Deal>>> + Send {
            let _count = self.search_calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(vec![deal("SEARCH-612")]) }
        }

        fn stores(&self) -> impl Future<Output = Result<Vec<Store>>> + Send {
            async move { Ok(vec![store("1", true), store("2", false)]) }
        }
    }

    /// Session repository recording the credentials it received.
    #[derive(Debug, Default)]
    struct FakeAuthRepository {
        sign_in_calls: AtomicUsize,
    }

    fn user() -> User {
        User {
            uid: UserId::from("u-1"),
            email: Some("player@example.com".to_owned()),
            display_name: "Player One".to_owned(),
            created_at: Utc::now(),
        }
    }

    impl AuthRepository for FakeAuthRepository {
        fn sign_in(
            &self,
            _email: &str,
            _password: &SecretString,
        ) -> impl Future<Output = Result<User>> + Send {
            let _count = self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(user()) }
        }

        fn register(
            &self,
            _email: &str,
            _password: &SecretString,
            _display_name: Option<&str>,
        ) -> impl Future<Output = Result<User>> + Send {
            async move { Ok(user()) }
        }

        fn sign_out(&self) -> impl Future<Output = Result<()>> + Send {
            async move { Ok(()) }
        }

        fn current_user(&self) -> impl Future<Output = Option<User>> + Send {
            async move { None }
        }

        fn subscribe(&self) -> SessionStream {
            unimplemented!("not needed for use case tests")
        }
    }

    #[tokio::test]
    async fn latest_deals_returns_full_page() {
        let use_case = GetLatestDeals::new(Arc::new(FakeGameRepository::default()));
        let deals = use_case.execute().await.unwrap();
        assert_eq!(deals.len(), 2);
    }

    #[tokio::test]
    async fn short_search_term_skips_repository() {
        let repository = Arc::new(FakeGameRepository::default());
        let use_case = SearchGameOffers::new(Arc::clone(&repository));

        assert!(use_case.execute("").await.unwrap().is_empty());
        assert!(use_case.execute("ba").await.unwrap().is_empty());
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn three_characters_reach_repository() {
        let repository = Arc::new(FakeGameRepository::default());
        let use_case = SearchGameOffers::new(Arc::clone(&repository));

        let results = use_case.execute("bat").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(repository.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn multibyte_term_is_measured_in_characters() {
        let repository = Arc::new(FakeGameRepository::default());
        let use_case = SearchGameOffers::new(Arc::clone(&repository));

        // Three characters even though it is more than three bytes.
        let results = use_case.execute("ゼルダ").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn inactive_stores_are_filtered_out() {
        let use_case = GetStores::new(Arc::new(FakeGameRepository::default()));
        let stores = use_case.execute().await.unwrap();
        assert_eq!(stores.len(), 1);
        assert!(stores[0].is_active);
    }

    #[tokio::test]
    async fn empty_credentials_are_rejected_before_the_network() {
        let repository = Arc::new(FakeAuthRepository::default());
        let sign_in = SignInUser::new(Arc::clone(&repository));
        let password = SecretString::from("hunter2".to_owned());
        let empty = SecretString::from(String::new());

        assert!(matches!(
            sign_in.execute("", &password).await,
            Err(GameDealsError::InvalidInput(_))
        ));
        assert!(matches!(
            sign_in.execute("player@example.com", &empty).await,
            Err(GameDealsError::InvalidInput(_))
        ));
        assert_eq!(repository.sign_in_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_credentials_sign_in() {
        let sign_in = SignInUser::new(Arc::new(FakeAuthRepository::default()));
        let password = SecretString::from("hunter2".to_owned());
        let user = sign_in.execute("player@example.com", &password).await.unwrap();
        assert_eq!(user.uid.as_inner(), "u-1");
    }

    #[tokio::test]
    async fn registration_requires_credentials() {
        let register = RegisterUser::new(Arc::new(FakeAuthRepository::default()));
        let empty = SecretString::from(String::new());
        assert!(matches!(
            register.execute("player@example.com", &empty, None).await,
            Err(GameDealsError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn registration_passes_display_name_through() {
        let register = RegisterUser::new(Arc::new(FakeAuthRepository::default()));
        let password = SecretString::from("hunter2".to_owned());
        let user = register
            .execute("player@example.com", &password, Some("Player One"))
            .await
            .unwrap();
        assert_eq!(user.display_name, "Player One");
    }
}

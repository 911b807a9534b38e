use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{LoginInput, LoginOutcome, SignupInput, SignupOutcome};
use super::errors::AccountError;
use super::repository::AccountRepository;
use super::validation;

/// Account service configuration
#[derive(Clone, Debug, Default)]
pub struct AccountConfig {
    /// Run the signup form rules on the server as well.
    pub enforce_signup_rules: bool,
}

/// Signup and login, independent of the web framework.
///
/// Passwords are stored and compared as submitted. There is no hashing and no
/// session token; a successful login only reports that the pair matched.
pub struct AccountService<R: AccountRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AccountConfig,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>, cfg: AccountConfig) -> Self { Self { repo, cfg } }

    /// Register an account with a single insert; the store's unique
    /// constraint on `username` decides duplicates.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{service::{AccountService, AccountConfig}, repository::mock::MockAccountRepository};
    /// use service::accounts::domain::{SignupInput, SignupOutcome};
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(MockAccountRepository::default()), AccountConfig::default());
    /// let input = SignupInput { name: "Ann".into(), username: "ann".into(), password: "Passw0rd".into(), confirm_password: None };
    /// assert_eq!(tokio_test::block_on(svc.signup(input.clone())).unwrap(), SignupOutcome::Created);
    /// assert_eq!(tokio_test::block_on(svc.signup(input)).unwrap(), SignupOutcome::UsernameTaken);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn signup(&self, input: SignupInput) -> Result<SignupOutcome, AccountError> {
        if self.cfg.enforce_signup_rules {
            let errs = validation::validate_signup_form(&input);
            if !errs.is_empty() {
                debug!(failed = errs.errors.len(), "signup rejected by form rules");
                return Ok(SignupOutcome::Invalid(errs));
            }
        }

        match self.repo.insert(&input.name, &input.username, &input.password).await {
            Ok(()) => {
                info!("account_created");
                Ok(SignupOutcome::Created)
            }
            Err(AccountError::UsernameTaken) => {
                debug!("username already taken");
                Ok(SignupOutcome::UsernameTaken)
            }
            Err(e) => Err(e),
        }
    }

    /// Check the login gate, then look for an exact username/password match.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{service::{AccountService, AccountConfig}, repository::mock::MockAccountRepository};
    /// use service::accounts::domain::{LoginInput, LoginOutcome, SignupInput};
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(MockAccountRepository::default()), AccountConfig::default());
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { name: "N".into(), username: "user".into(), password: "Passw0rd".into(), confirm_password: None }));
    /// let out = tokio_test::block_on(svc.login(LoginInput { username: "user".into(), password: "Passw0rd".into() })).unwrap();
    /// assert!(matches!(out, LoginOutcome::Authenticated(_)));
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, AccountError> {
        if let Err(errs) = validation::login_gate(&input) {
            debug!(failed = errs.errors.len(), "login rejected by gate");
            return Ok(LoginOutcome::Invalid(errs));
        }

        match self.repo.find_by_credentials(&input.username, &input.password).await? {
            Some(account) => {
                info!("login_succeeded");
                Ok(LoginOutcome::Authenticated(account))
            }
            None => {
                info!("login_failed");
                Ok(LoginOutcome::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::repo::seaorm::SeaOrmAccountRepository;
    use crate::accounts::repository::mock::MockAccountRepository;
    use crate::test_support::get_store;
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    fn signup(name: &str, username: &str, password: &str) -> SignupInput {
        SignupInput { name: name.into(), username: username.into(), password: password.into(), confirm_password: None }
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput { username: username.into(), password: password.into() }
    }

    #[tokio::test]
    async fn signup_creates_exactly_one_row() -> anyhow::Result<()> {
        let repo = Arc::new(MockAccountRepository::default());
        let svc = AccountService::new(repo.clone(), AccountConfig::default());

        assert_eq!(svc.signup(signup("Ann", "ann", "Passw0rd")).await?, SignupOutcome::Created);
        assert_eq!(repo.len(), 1);
        assert_eq!(svc.signup(signup("Other", "ann", "Different1")).await?, SignupOutcome::UsernameTaken);
        assert_eq!(repo.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn signup_rules_only_when_enforced() -> anyhow::Result<()> {
        let lax = AccountService::new(Arc::new(MockAccountRepository::default()), AccountConfig::default());
        assert_eq!(lax.signup(signup("", "x", "weak")).await?, SignupOutcome::Created);

        let repo = Arc::new(MockAccountRepository::default());
        let strict = AccountService::new(repo.clone(), AccountConfig { enforce_signup_rules: true });
        match strict.signup(signup("", "x", "weak")).await? {
            SignupOutcome::Invalid(errs) => {
                assert_eq!(errs.message_for("name"), Some(validation::NAME_EMPTY));
                assert_eq!(errs.message_for("password"), Some(validation::PASSWORD_PATTERN_ERROR));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert!(repo.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn gate_failure_never_reaches_storage() -> anyhow::Result<()> {
        let repo = Arc::new(MockAccountRepository::default());
        let svc = AccountService::new(repo.clone(), AccountConfig::default());

        let out = svc.login(login("bob", "Password123")).await?;
        match out {
            LoginOutcome::Invalid(errs) => assert_eq!(errs.message_for("password"), Some(validation::PASSWORD_LENGTH_ERROR)),
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(repo.lookups(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn single_character_mismatch_fails() -> anyhow::Result<()> {
        let svc = AccountService::new(Arc::new(MockAccountRepository::default()), AccountConfig::default());
        svc.signup(signup("Bob", "bob", "Passw0rd")).await?;

        assert!(matches!(svc.login(login("bob", "Passw0rd")).await?, LoginOutcome::Authenticated(_)));
        assert_eq!(svc.login(login("bob", "Passw0rD")).await?, LoginOutcome::Rejected);
        assert_eq!(svc.login(login("boc", "Passw0rd")).await?, LoginOutcome::Rejected);
        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_surface() {
        let svc = AccountService::new(Arc::new(MockAccountRepository::failing()), AccountConfig::default());
        assert!(matches!(svc.signup(signup("A", "abc", "Passw0rd")).await, Err(AccountError::Repository(_))));
        assert!(matches!(svc.login(login("abc", "Passw0rd")).await, Err(AccountError::Repository(_))));
    }

    #[tokio::test]
    async fn signup_and_login_against_database() -> anyhow::Result<()> {
        let store = get_store().await?;
        let repo = Arc::new(SeaOrmAccountRepository { db: store.conn().clone() });
        let svc = AccountService::new(repo, AccountConfig::default());

        assert_eq!(svc.signup(signup("Carol", "carol_1", "Secr3tPw")).await?, SignupOutcome::Created);
        assert_eq!(svc.signup(signup("Carol B", "carol_1", "Other1Pw")).await?, SignupOutcome::UsernameTaken);
        let rows = models::account::Entity::find()
            .filter(models::account::Column::Username.eq("carol_1"))
            .count(store.conn())
            .await?;
        assert_eq!(rows, 1);

        match svc.login(login("carol_1", "Secr3tPw")).await? {
            LoginOutcome::Authenticated(acc) => assert_eq!(acc.name, "Carol"),
            other => panic!("expected Authenticated, got {:?}", other),
        }
        assert_eq!(svc.login(login("carol_1", "Secr3tPx")).await?, LoginOutcome::Rejected);
        Ok(())
    }
}

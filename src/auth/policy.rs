use crate::config::AuthConfig;
use crate::database::models::UserRole;

/// Sign-in admission policy: who may enter and with which role.
///
/// Admin emails and allowed domains are injected configuration
/// (DEALDESK_ADMIN_EMAILS / DEALDESK_ALLOWED_DOMAINS), held lower-cased so
/// lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    admin_emails: Vec<String>,
    allowed_domains: Vec<String>,
}

/// Why a sign-in was refused. Never shown to the client verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInDenial {
    Blocked,
    NotAllowed,
}

impl AccessPolicy {
    pub fn new(admin_emails: Vec<String>, allowed_domains: Vec<String>) -> Self {
        Self {
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
            allowed_domains: allowed_domains.into_iter().map(|d| d.to_lowercase()).collect(),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(auth.admin_emails.clone(), auth.allowed_domains.clone())
    }

    /// Whether this email may sign in at all: allowed domain, or admin email.
    pub fn allows(&self, email: &str) -> bool {
        let email = email.to_lowercase();

        if self.admin_emails.iter().any(|e| e == &email) {
            return true;
        }

        match email_domain(&email) {
            Some(domain) => self.allowed_domains.iter().any(|d| d == domain),
            None => false,
        }
    }

    /// Role granted on this sign-in. Recomputed every time, so removing an
    /// email from the admin list demotes the account at its next sign-in.
    pub fn role_for(&self, email: &str) -> UserRole {
        let email = email.to_lowercase();

        if self.admin_emails.iter().any(|e| e == &email) {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}

fn email_domain(email: &str) -> Option<&str> {
    let domain = email.rsplit('@').next()?;
    if domain.is_empty() || domain == email {
        return None;
    }
    Some(domain)
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::MailConfig;
use crate::types::{error::AppError, mail::SendEmail};
use crate::utils::mail::MailTransport;

/// Outgoing account mail. Failures come back as `Internal`; callers do not
/// undo whatever they changed before sending.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification_email(&self, email: &str, token: &str) -> Result<(), AppError>;

    async fn send_email_change_confirmation(&self, email: &str, token: &str) -> Result<(), AppError>;

    async fn send_password_reset_link(&self, user_id: Uuid, email: &str, token: &str) -> Result<(), AppError>;
}

/// Renders the templates and hands them to the configured transport.
pub struct MailNotifier {
    transport: MailTransport,
    sender: String,
    web_domain: String,
}

impl MailNotifier {
    pub fn new(transport: MailTransport, sender: String, web_domain: String) -> Self {
        Self { transport, sender, web_domain }
    }

    pub fn from_config(cfg: &MailConfig) -> Result<Self, AppError> {
        Ok(Self::new(MailTransport::from_config(cfg)?, cfg.sender.clone(), cfg.web_domain.clone()))
    }

    fn link(&self, path: &str, token: &str) -> String {
        format!(
            "{}/{}?token={}",
            self.web_domain.trim_end_matches('/'),
            path.trim_start_matches('/'),
            urlencoding::encode(token)
        )
    }

    fn email(&self, to: &str, subject: &str, intro: &str, label: &str, link: &str) -> SendEmail {
        SendEmail {
            from: self.sender.clone(),
            to: vec![to.to_string()],
            subject: subject.to_string(),
            text: Some(format!("{intro} {link}")),
            html: Some(format!("<p>{intro}</p><p><a href=\"{link}\">{label}</a></p>")),
            ..Default::default()
        }
    }

    pub fn verification_email(&self, email: &str, token: &str) -> SendEmail {
        let link = self.link("email-verification", token);
        self.email(email, "Email Verification", "Click the following link to verify your email:", "Verify Email", &link)
    }

    pub fn email_change_email(&self, email: &str, token: &str) -> SendEmail {
        let link = self.link("email-update/verification", token);
        self.email(email, "New Email Confirmation", "Click the following link to confirm your new email:", "Confirm Email", &link)
    }

    pub fn password_reset_email(&self, user_id: Uuid, email: &str, token: &str) -> SendEmail {
        let link = self.link(&format!("{user_id}/password-update"), token);
        self.email(email, "Password Reset", "Click the following link to reset your password:", "Reset Password", &link)
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn send_verification_email(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.transport.send(self.verification_email(email, token)).await
    }

    async fn send_email_change_confirmation(&self, email: &str, token: &str) -> Result<(), AppError> {
        self.transport.send(self.email_change_email(email, token)).await
    }

    async fn send_password_reset_link(&self, user_id: Uuid, email: &str, token: &str) -> Result<(), AppError> {
        self.transport.send(self.password_reset_email(user_id, email, token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> MailNotifier {
        MailNotifier::new(MailTransport::Log, "noreply@timetrack.dev".into(), "https://app.timetrack.dev/".into())
    }

    #[test]
    fn verification_link_embeds_token() {
        let mail = notifier().verification_email("a@x.com", "abc123");
        assert_eq!(mail.to, vec!["a@x.com".to_string()]);
        assert_eq!(mail.from, "noreply@timetrack.dev");
        let text = mail.text.unwrap();
        assert!(text.contains("https://app.timetrack.dev/email-verification?token=abc123"));
        assert!(mail.html.unwrap().contains("href=\"https://app.timetrack.dev/email-verification?token=abc123\""));
    }

    #[test]
    fn email_change_uses_its_own_page() {
        let mail = notifier().email_change_email("new@x.com", "t0k");
        assert!(mail.text.unwrap().contains("/email-update/verification?token=t0k"));
    }

    #[test]
    fn reset_link_carries_user_and_token() {
        let id = Uuid::new_v4();
        let mail = notifier().password_reset_email(id, "a@x.com", "t0k");
        assert!(mail.text.unwrap().contains(&format!("/{id}/password-update?token=t0k")));
    }

    #[tokio::test]
    async fn log_transport_sends_nothing_and_succeeds() {
        assert!(notifier().send_verification_email("a@x.com", "abc").await.is_ok());
    }
}

use crate::config::{DeployMode, MailConfig};
use crate::types::{error::AppError, mail::SendEmail};
use lettre::message::{header::ContentType, Mailbox, MultiPart};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use reqwest::{Client, ClientBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const RESEND_API: &str = "https://api.resend.com/emails";

/// Where outgoing mail goes. Picked once from the deploy mode.
#[derive(Clone)]
pub enum MailTransport {
    /// Local test mailbox (MailHog), plain SMTP without auth.
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    /// Resend HTTP API.
    Resend { client: Client, api_key: String },
    /// Nothing leaves the process.
    Log,
}

impl MailTransport {
    pub fn from_config(cfg: &MailConfig) -> Result<Self, AppError> {
        match cfg.mode {
            DeployMode::Develop => {
                let smtp = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(cfg.smtp_host.as_str())
                    .port(cfg.smtp_port)
                    .timeout(Some(Duration::from_secs(10)))
                    .build();
                Ok(MailTransport::Smtp(smtp))
            }
            DeployMode::Production => {
                let api_key = cfg
                    .resend_key
                    .clone()
                    .ok_or_else(|| AppError::Internal("RESEND_KEY is required in production".into()))?;
                let client = ClientBuilder::new()
                    .user_agent("timetrack/1.0 (+reqwest)")
                    .tcp_nodelay(true)
                    .pool_idle_timeout(Duration::from_secs(30))
                    .timeout(Duration::from_secs(30))
                    .build()
                    .map_err(|e| AppError::Internal(format!("build client failed: {e}")))?;
                Ok(MailTransport::Resend { client, api_key })
            }
            DeployMode::Test => Ok(MailTransport::Log),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::Smtp(_) => "smtp",
            MailTransport::Resend { .. } => "resend",
            MailTransport::Log => "log",
        }
    }

    /// Bodies carry tokens, so only envelope data is logged.
    pub async fn send(&self, email: SendEmail) -> Result<(), AppError> {
        let t0 = Instant::now();
        let subject = email.subject.clone();
        let recipients = email.to.len();

        match self {
            MailTransport::Smtp(smtp) => {
                let message = build_message(email)?;
                smtp.send(message)
                    .await
                    .map_err(|e| AppError::Internal(format!("smtp send failed: {e}")))?;
            }
            MailTransport::Resend { client, api_key } => send_resend(client, api_key, &email).await?,
            MailTransport::Log => {
                info!("[mail] (log transport) \"{subject}\" to {recipients} recipient(s) not delivered");
                return Ok(());
            }
        }

        info!(
            "[mail] sent \"{subject}\" via {} to {recipients} recipient(s) in {} ms",
            self.name(),
            t0.elapsed().as_millis()
        );
        Ok(())
    }
}

fn build_message(email: SendEmail) -> Result<Message, AppError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| AppError::Internal(format!("invalid from address: {e}")))?;

    let mut builder = Message::builder().from(from).subject(email.subject);
    for to in &email.to {
        let mailbox: Mailbox = to
            .parse()
            .map_err(|e| AppError::Internal(format!("invalid to address: {e}")))?;
        builder = builder.to(mailbox);
    }
    for reply_to in email.reply_to.iter().flatten() {
        let mailbox: Mailbox = reply_to
            .parse()
            .map_err(|e| AppError::Internal(format!("invalid reply-to address: {e}")))?;
        builder = builder.reply_to(mailbox);
    }

    let built = match (email.text, email.html) {
        (Some(text), Some(html)) => builder.multipart(MultiPart::alternative_plain_html(text, html)),
        (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text),
        (None, Some(html)) => builder.header(ContentType::TEXT_HTML).body(html),
        (None, None) => builder.header(ContentType::TEXT_PLAIN).body(String::new()),
    };
    built.map_err(|e| AppError::Internal(format!("failed to create email: {e}")))
}

async fn send_resend(client: &Client, api_key: &str, email: &SendEmail) -> Result<(), AppError> {
    debug!("[mail] -> POST {RESEND_API}");

    let res = client
        .post(RESEND_API)
        .bearer_auth(api_key) // do NOT log the key
        .json(email)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("send failed: {e}")))?;

    let status = res.status();
    if status.is_success() {
        return Ok(());
    }

    let body = res.text().await.unwrap_or_default();
    warn!("[mail] <- Resend rejected message: HTTP {status}");
    Err(AppError::Internal(format!("Resend API error: HTTP {status}: {body}")))
}

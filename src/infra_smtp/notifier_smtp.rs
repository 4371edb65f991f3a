use crate::application_port::*;
use crate::domain_port::*;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub from: String,
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn try_new(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let from = cfg
            .from
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("invalid smtp from address: {}", e))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.host)?
            .port(cfg.port)
            .credentials(Credentials::new(cfg.user.clone(), cfg.password.clone()))
            .build();

        Ok(SmtpNotifier { transport, from })
    }
}

#[async_trait::async_trait]
impl WarningNotifier for SmtpNotifier {
    async fn send_warning(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AuthError> {
        let to = to_email
            .parse::<Mailbox>()
            .map_err(|e| AuthError::InternalError(format!("invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        Ok(())
    }
}

//! Outbound email. SMTP in production, file transport for development and
//! tests. Sends are fire-and-forget from the caller's perspective: no
//! delivery receipt is consumed anywhere.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;

use crate::config::{MailConfig, MailTransportConfig};

pub struct Mailer {
    transport: Transport,
    from: Mailbox,
}

enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let transport = match &config.transport {
            MailTransportConfig::Smtp {
                host,
                port,
                username,
                password,
                use_tls,
            } => {
                if !use_tls {
                    tracing::warn!("SMTP TLS is disabled");
                }

                let builder = if *use_tls {
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                        .context("Failed to create SMTP transport")?
                } else {
                    AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                };

                Transport::Smtp(
                    builder
                        .port(*port)
                        .credentials(Credentials::new(username.clone(), password.clone()))
                        .build(),
                )
            }
            MailTransportConfig::File { path } => {
                let outbox = Path::new(path);
                if !outbox.exists() {
                    std::fs::create_dir_all(outbox).context("Failed to create mail outbox")?;
                }
                Transport::File(AsyncFileTransport::<Tokio1Executor>::new(outbox))
            }
        };

        let from = format!("{} <{}>", config.from_name, config.from_email)
            .parse::<Mailbox>()
            .context("Invalid mail.from_email / mail.from_name")?;

        Ok(Self { transport, from })
    }

    /// Emails a password verification code. The code never appears in any
    /// API response, only here.
    pub async fn send_verification_code(&self, to_email: &str, code: &str) -> Result<()> {
        let body = format!(
            "Your password verification code is: {code}\n\n\
             It expires in 10 minutes. If you did not request a password \
             change, you can ignore this message.\n"
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse().context("Invalid recipient address")?)
            .subject("Password verification code")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .context("Failed to build verification email")?;

        match &self.transport {
            Transport::Smtp(t) => {
                t.send(message).await.context("SMTP send failed")?;
            }
            Transport::File(t) => {
                t.send(message).await.context("File transport send failed")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;

    #[tokio::test]
    async fn file_transport_writes_code_to_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let config = MailConfig {
            transport: MailTransportConfig::File {
                path: dir.path().to_string_lossy().into_owned(),
            },
            ..MailConfig::default()
        };

        let mailer = Mailer::new(&config).unwrap();
        mailer
            .send_verification_code("user@example.com", "482913")
            .await
            .unwrap();

        let entry = std::fs::read_dir(dir.path())
            .unwrap()
            .next()
            .expect("one mail file written")
            .unwrap();
        let contents = std::fs::read_to_string(entry.path()).unwrap();
        assert!(contents.contains("482913"));
    }
}

//! Verification-code email delivery behind a swappable transport.

use async_trait::async_trait;

/// Delivery capability the mailer depends on. A real SMTP or provider-API
/// transport slots in here without touching any caller.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

/// Development transport that writes the message to the log instead of
/// sending anything.
#[derive(Debug, Default)]
pub struct LogTransport;

#[async_trait]
impl MailTransport for LogTransport {
    async fn deliver(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        tracing::info!("Mock email to {}: {}", to, subject);
        tracing::debug!("Mock email body: {}", html_body);
        Ok(())
    }
}

/// Sends verification codes for email-based flows.
pub struct CodeMailer {
    transport: Box<dyn MailTransport>,
}

impl CodeMailer {
    pub fn new(transport: Box<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Send a verification code to `email`.
    ///
    /// Returns whether delivery succeeded. Transport failures are logged
    /// and reported as `false`, never raised to the caller.
    pub async fn send_code(&self, email: &str, code: &str, name: Option<&str>) -> bool {
        tracing::info!("Verification code for {}: {}", email, code);

        let body = render_code_email(code, name);

        match self
            .transport
            .deliver(email, "Your AI Playground verification code", &body)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send verification code to {}: {:?}", email, e);
                false
            }
        }
    }
}

fn render_code_email(code: &str, name: Option<&str>) -> String {
    let greeting = match name {
        Some(name) => format!("<p>Hello {},</p>", name),
        None => "<p>Hello,</p>".to_string(),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>Welcome to Multi-Model AI Playground</h2>
  {greeting}
  <p>Your verification code is:</p>
  <div style="background-color: #f5f5f5; padding: 20px; text-align: center; font-size: 24px; font-weight: bold; letter-spacing: 2px; margin: 20px 0;">
    {code}
  </div>
  <p>This code will expire in 10 minutes.</p>
  <p>If you didn't request this code, please ignore this email.</p>
  <hr>
  <p style="color: #666; font-size: 12px;">
    Multi-Model AI Playground Team
  </p>
</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct RecordingTransport {
        deliveries: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn deliver(&self, _to: &str, _subject: &str, _html_body: &str) -> anyhow::Result<()> {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl MailTransport for FailingTransport {
        async fn deliver(&self, _to: &str, _subject: &str, _html_body: &str) -> anyhow::Result<()> {
            anyhow::bail!("smtp connection refused")
        }
    }

    #[tokio::test]
    async fn send_code_delivers_and_reports_success() {
        let deliveries = Arc::new(AtomicUsize::new(0));
        let mailer = CodeMailer::new(Box::new(RecordingTransport {
            deliveries: deliveries.clone(),
        }));

        let sent = mailer
            .send_code("ada@example.com", "123456", Some("Ada"))
            .await;

        assert!(sent);
        assert_eq!(deliveries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_reports_false_without_erroring() {
        let mailer = CodeMailer::new(Box::new(FailingTransport));

        let sent = mailer.send_code("ada@example.com", "123456", None).await;

        assert!(!sent);
    }

    #[tokio::test]
    async fn log_transport_always_succeeds() {
        let mailer = CodeMailer::new(Box::new(LogTransport));

        assert!(mailer.send_code("ada@example.com", "654321", None).await);
    }

    #[test]
    fn template_embeds_code_and_greeting() {
        let body = render_code_email("987654", Some("Ada"));

        assert!(body.contains("987654"));
        assert!(body.contains("Hello Ada,"));
        assert!(body.contains("This code will expire in 10 minutes."));
    }

    #[test]
    fn template_greets_generically_without_a_name() {
        let body = render_code_email("987654", None);

        assert!(body.contains("<p>Hello,</p>"));
        assert!(!body.contains("Hello ,"));
    }
}

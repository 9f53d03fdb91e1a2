//! SMTP delivery of review notifications.
//!
//! Uses `lettre` against Gmail's submission port with STARTTLS. Configured
//! through `GMAIL_USERNAME`, `GMAIL_APP_PASSWORD` and `EMAIL_FROM_NAME`; when
//! the credentials are missing the server falls back to
//! [`LogNotifier`](util::notify::LogNotifier).

use async_trait::async_trait;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use util::config;
use util::notify::{Notification, NotificationError, Notifier};

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 587;

pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// Builds a notifier from the mail settings in the environment.
    ///
    /// Returns `Ok(None)` if no Gmail credentials are configured.
    pub fn from_config() -> Result<Option<Self>, NotificationError> {
        let username = config::gmail_username();
        let password = config::gmail_app_password();
        if username.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let from = format!("{} <{}>", config::email_from_name(), username)
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::Address(e.to_string()))?;

        let tls = TlsParameters::new(SMTP_HOST.to_string())
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)
            .map_err(|e| NotificationError::Transport(e.to_string()))?
            .port(SMTP_PORT)
            .tls(Tls::Required(tls))
            .credentials(Credentials::new(username, password))
            .build();

        Ok(Some(Self { transport, from }))
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        let to = notification
            .to
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::Address(format!("{}: {e}", notification.to)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(notification.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(notification.body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(render_html(&notification.subject, &notification.body)),
                    ),
            )
            .map_err(|e| NotificationError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = self.build_message(notification)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::Transport(e.to_string()))
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps each paragraph of the plain-text body in `<p>`.
fn render_html(subject: &str, body: &str) -> String {
    let paragraphs: String = body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
    <h2>{}</h2>
    {paragraphs}
  </div>
</body>
</html>"#,
        escape_html(subject)
    )
}

//! Assignment notification emails.
//!
//! Dispatch is fire-and-forget: at-most-once attempt, no retry, and the
//! result is never awaited by the caller, so a mail failure can neither
//! block nor roll back the assignment that triggered it.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;

/// Outbound mail handle shared across handlers. Without SMTP settings the
/// notifier runs disabled and dispatch is a logged no-op.
#[derive(Clone)]
pub struct Notifier {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: String,
    frontend_url: String,
}

impl Notifier {
    /// Build the notifier from configuration.
    pub fn from_config(config: &Config) -> Self {
        let (transport, from_address) = match config.smtp {
            Some(ref smtp) => {
                let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host);
                match builder {
                    Ok(builder) => {
                        let transport = builder
                            .port(smtp.port)
                            .credentials(Credentials::new(
                                smtp.username.clone(),
                                smtp.password.expose_secret().to_string(),
                            ))
                            .build();
                        (Some(transport), smtp.from_address.clone())
                    }
                    Err(e) => {
                        warn!("SMTP transport setup failed, mail disabled: {}", e);
                        (None, smtp.from_address.clone())
                    }
                }
            }
            None => (None, "no-reply@caseflow.local".to_string()),
        };

        Notifier {
            transport,
            from_address,
            frontend_url: config.frontend_url.clone(),
        }
    }

    /// Notifier with no transport (tests, mail-less deployments).
    pub fn disabled(frontend_url: &str) -> Self {
        Notifier {
            transport: None,
            from_address: "no-reply@caseflow.local".to_string(),
            frontend_url: frontend_url.to_string(),
        }
    }

    /// Dispatch an assignment email on a spawned task and return
    /// immediately. Failures are logged and never reach the caller.
    pub fn spawn_assignment_email(
        &self,
        to: &str,
        test_case_title: &str,
        assigner_name: &str,
        test_case_id: Uuid,
        project_id: Uuid,
    ) {
        let Some(transport) = self.transport.clone() else {
            info!(
                "Mail disabled; skipping assignment notification to {}",
                to
            );
            return;
        };

        let subject = format!("New Test Case Assigned: {}", test_case_title);
        let body = self.assignment_email_body(
            test_case_title,
            assigner_name,
            test_case_id,
            project_id,
        );

        let message = Message::builder()
            .from(match self.from_address.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    warn!("Invalid from address '{}': {}", self.from_address, e);
                    return;
                }
            })
            .to(match to.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    warn!("Invalid recipient address '{}': {}", to, e);
                    return;
                }
            })
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body);

        let message = match message {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to build assignment email: {}", e);
                return;
            }
        };

        let recipient = to.to_string();
        tokio::spawn(async move {
            match transport.send(message).await {
                Ok(_) => info!("Assignment email sent to {}", recipient),
                Err(e) => warn!("Failed to send assignment email to {}: {}", recipient, e),
            }
        });
    }

    /// HTML body for an assignment email, linking back to the test case in
    /// the frontend.
    pub fn assignment_email_body(
        &self,
        test_case_title: &str,
        assigner_name: &str,
        test_case_id: Uuid,
        project_id: Uuid,
    ) -> String {
        let link = format!(
            "{}/projects/{}/test-cases/{}",
            self.frontend_url, project_id, test_case_id
        );
        format!(
            r#"<div style="font-family: Arial, sans-serif; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
    <h2 style="color: #333;">New Assignment</h2>
    <p>Hello,</p>
    <p>You have been assigned a new test case by <strong>{assigner_name}</strong>.</p>
    <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <h3 style="margin: 0 0 10px 0;">{test_case_title}</h3>
    </div>
    <p>Please log in to the system to review and execute the test case.</p>
    <a href="{link}" style="background-color: #007bff; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px; display: inline-block;">View Test Case</a>
</div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_links_to_the_assigned_case() {
        let notifier = Notifier::disabled("http://localhost:5173");
        let case_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();

        let body = notifier.assignment_email_body("Checkout flow", "admin", case_id, project_id);

        assert!(body.contains("Checkout flow"));
        assert!(body.contains("admin"));
        assert!(body.contains(&format!(
            "http://localhost:5173/projects/{}/test-cases/{}",
            project_id, case_id
        )));
    }

    #[test]
    fn test_disabled_notifier_dispatch_is_a_no_op() {
        let notifier = Notifier::disabled("http://localhost:5173");
        notifier.spawn_assignment_email(
            "tester@example.com",
            "Checkout flow",
            "admin",
            Uuid::new_v4(),
            Uuid::new_v4(),
        );
    }
}

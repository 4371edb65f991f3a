use crate::application_port::*;
use crate::domain_port::*;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct SentWarning {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

/// Records warnings instead of delivering them.
#[derive(Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<SentWarning>>,
    fail_next: Mutex<bool>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentWarning> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Make the next delivery attempt fail, to exercise the advisory-only
    /// contract.
    pub fn fail_next(&self) {
        if let Ok(mut flag) = self.fail_next.lock() {
            *flag = true;
        }
    }
}

#[async_trait::async_trait]
impl WarningNotifier for MemoryNotifier {
    async fn send_warning(
        &self,
        to_email: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), AuthError> {
        if let Ok(mut flag) = self.fail_next.lock() {
            if *flag {
                *flag = false;
                return Err(AuthError::InternalError("simulated delivery failure".into()));
            }
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push(SentWarning {
                to_email: to_email.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
        }
        Ok(())
    }
}

//! Lead-capture tools.
//!
//! Both tools forward a one-line summary to the configured [`Notifier`] and
//! answer the model with `{"recorded":"ok"}` whether or not delivery worked.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;
use crate::notify::Notifier;

use super::types::{optional_str, required_str};
use super::Tool;

const NOT_PROVIDED: &str = "not provided";

fn recorded() -> String {
    json!({ "recorded": "ok" }).to_string()
}

/// Records a visitor who wants to be contacted.
pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetailsTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUserDetailsTool {
    fn name(&self) -> &str {
        "record_user_details"
    }

    fn description(&self) -> &str {
        "Record that a user is interested in being in touch and provided an email address"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of this user"
                },
                "name": {
                    "type": "string",
                    "description": "The user's name, if they provided it"
                },
                "notes": {
                    "type": "string",
                    "description": "Any additional context about the conversation worth recording"
                }
            },
            "required": ["email"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let email = required_str(&args, "email")?;
        let name = optional_str(&args, "name", NOT_PROVIDED);
        let notes = optional_str(&args, "notes", NOT_PROVIDED);

        let text = format!(
            "Recording {} with email {} and notes {}",
            name, email, notes
        );
        self.notifier.notify(&text).await;
        Ok(recorded())
    }
}

/// Records a question the agent could not answer.
pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestionTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUnknownQuestionTool {
    fn name(&self) -> &str {
        "record_unknown_question"
    }

    fn description(&self) -> &str {
        "Record any question that couldn't be answered from the professional summary"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question that couldn't be answered"
                }
            },
            "required": ["question"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let question = required_str(&args, "question")?;
        self.notifier
            .notify(&format!("Recording {}", question))
            .await;
        Ok(recorded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VitaeError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingNotifier {
        sent: Mutex<Vec<String>>,
        deliver: bool,
    }

    #[async_trait]
    impl Notifier for CapturingNotifier {
        async fn notify(&self, text: &str) -> bool {
            self.sent.lock().unwrap().push(text.to_string());
            self.deliver
        }
    }

    #[tokio::test]
    async fn test_record_user_details_formats_message() {
        let notifier = Arc::new(CapturingNotifier {
            deliver: true,
            ..Default::default()
        });
        let tool = RecordUserDetailsTool::new(notifier.clone());

        let out = tool
            .execute(json!({"email": "ada@example.com", "name": "Ada", "notes": "hiring"}))
            .await
            .unwrap();

        assert_eq!(out, r#"{"recorded":"ok"}"#);
        assert_eq!(
            notifier.sent.lock().unwrap().as_slice(),
            ["Recording Ada with email ada@example.com and notes hiring"]
        );
    }

    #[tokio::test]
    async fn test_record_user_details_defaults_optional_fields() {
        let notifier = Arc::new(CapturingNotifier::default());
        let tool = RecordUserDetailsTool::new(notifier.clone());

        tool.execute(json!({"email": "x@y.z"})).await.unwrap();
        assert_eq!(
            notifier.sent.lock().unwrap()[0],
            "Recording not provided with email x@y.z and notes not provided"
        );
    }

    #[tokio::test]
    async fn test_record_user_details_requires_email() {
        let notifier = Arc::new(CapturingNotifier::default());
        let tool = RecordUserDetailsTool::new(notifier.clone());

        let err = tool.execute(json!({"name": "Ada"})).await.unwrap_err();
        assert!(matches!(err, VitaeError::Tool(_)));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_unknown_question_ok_even_if_delivery_fails() {
        let notifier = Arc::new(CapturingNotifier {
            deliver: false,
            ..Default::default()
        });
        let tool = RecordUnknownQuestionTool::new(notifier.clone());

        let out = tool
            .execute(json!({"question": "What is your favourite colour?"}))
            .await
            .unwrap();

        assert_eq!(out, r#"{"recorded":"ok"}"#);
        assert_eq!(
            notifier.sent.lock().unwrap()[0],
            "Recording What is your favourite colour?"
        );
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        let notifier: Arc<dyn Notifier> = Arc::new(CapturingNotifier::default());
        let details = RecordUserDetailsTool::new(notifier.clone());
        let question = RecordUnknownQuestionTool::new(notifier);

        assert_eq!(details.parameters()["required"], json!(["email"]));
        assert_eq!(question.parameters()["required"], json!(["question"]));
    }
}

//! Feedback submission.
//!
//! Collects free-text feedback plus contact info and submits it to the
//! backend via query parameters. Fire-and-forget: nothing is stored locally,
//! the user just gets the server's acknowledgment or an error.

use crate::api::{AgentApi, ApiError, FeedbackAck};
use crate::telemetry::{Tracker, EVENT_FEEDBACK_SENT};
use tracing::info;

/// Feedback submission failures.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// Rejected client-side; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// The submission failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// One feedback submission. Transient.
#[derive(Debug, Clone)]
pub struct Feedback {
    /// Email or name to reach the sender.
    pub contact: String,
    pub feedback: String,
}

impl Feedback {
    /// Both fields are required, matching the backend's own validation.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.contact.trim().is_empty() {
            return Err(FeedbackError::Validation(
                "Contact information is required".to_string(),
            ));
        }
        if self.feedback.trim().is_empty() {
            return Err(FeedbackError::Validation(
                "Feedback content is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate and submit feedback, returning the server acknowledgment.
pub async fn submit(
    api: &dyn AgentApi,
    feedback: &Feedback,
    tracker: &dyn Tracker,
) -> Result<FeedbackAck, FeedbackError> {
    feedback.validate()?;

    let ack = api
        .send_feedback(feedback.contact.trim(), feedback.feedback.trim())
        .await?;
    tracker.track(EVENT_FEEDBACK_SENT, &[]);
    info!(status = %ack.status, "feedback submitted");
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{PdpDocument, PdpUpload, QueryRequest, QueryResponse};
    use crate::telemetry::NoopTracker;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    // =========================================================================
    // Test Doubles
    // =========================================================================

    struct MockFeedbackApi {
        fail: bool,
        submissions: Mutex<Vec<(String, String)>>,
    }

    impl MockFeedbackApi {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                submissions: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AgentApi for MockFeedbackApi {
        async fn query(
            &self,
            _request: &QueryRequest,
            _cancel: &CancellationToken,
        ) -> Result<QueryResponse, ApiError> {
            unimplemented!("not used by feedback tests")
        }

        async fn cancel(&self, _thread_id: &str) -> Result<(), ApiError> {
            unimplemented!("not used by feedback tests")
        }

        async fn send_feedback(
            &self,
            contact: &str,
            feedback: &str,
        ) -> Result<FeedbackAck, ApiError> {
            self.submissions
                .lock()
                .unwrap()
                .push((contact.to_string(), feedback.to_string()));
            if self.fail {
                return Err(ApiError::Server {
                    status: 500,
                    detail: "storage unavailable".to_string(),
                });
            }
            Ok(FeedbackAck {
                status: "success".to_string(),
                message: "Feedback saved successfully".to_string(),
            })
        }

        async fn generate_pdp(&self, _upload: PdpUpload) -> Result<PdpDocument, ApiError> {
            unimplemented!("not used by feedback tests")
        }
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_validate_requires_contact() {
        let feedback = Feedback {
            contact: "  ".to_string(),
            feedback: "Great tool".to_string(),
        };
        let err = feedback.validate().unwrap_err();
        assert_eq!(err.to_string(), "Contact information is required");
    }

    #[test]
    fn test_validate_requires_feedback_body() {
        let feedback = Feedback {
            contact: "jo@example.com".to_string(),
            feedback: String::new(),
        };
        let err = feedback.validate().unwrap_err();
        assert_eq!(err.to_string(), "Feedback content is required");
    }

    #[test]
    fn test_validate_accepts_complete_feedback() {
        let feedback = Feedback {
            contact: "jo@example.com".to_string(),
            feedback: "The PDP flow is great.".to_string(),
        };
        assert!(feedback.validate().is_ok());
    }

    // =========================================================================
    // Submission Tests
    // =========================================================================

    #[tokio::test]
    async fn test_invalid_feedback_issues_no_call() {
        let api = MockFeedbackApi::new(false);
        let feedback = Feedback {
            contact: String::new(),
            feedback: "hello".to_string(),
        };

        let result = submit(&api, &feedback, &NoopTracker).await;
        assert!(matches!(result, Err(FeedbackError::Validation(_))));
        assert!(api.submissions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_trims_fields() {
        let api = MockFeedbackApi::new(false);
        let feedback = Feedback {
            contact: "  jo@example.com ".to_string(),
            feedback: " love it \n".to_string(),
        };

        let ack = submit(&api, &feedback, &NoopTracker).await.unwrap();
        assert_eq!(ack.status, "success");

        let submissions = api.submissions.lock().unwrap();
        assert_eq!(
            submissions.as_slice(),
            [("jo@example.com".to_string(), "love it".to_string())]
        );
    }

    #[tokio::test]
    async fn test_server_failure_is_reported() {
        let api = MockFeedbackApi::new(true);
        let feedback = Feedback {
            contact: "jo".to_string(),
            feedback: "hi".to_string(),
        };

        let result = submit(&api, &feedback, &NoopTracker).await;
        match result {
            Err(FeedbackError::Api(err)) => {
                assert_eq!(err.server_detail(), Some("storage unavailable"));
            }
            other => panic!("expected Api error, got {:?}", other.map(|a| a.status)),
        }
    }
}

//! Conversational Intake Flow
//!
//! A linear question/answer state machine: one question is active at a
//! time (the first incomplete one, in array order), a submitted line is
//! validated against the active question's key, and valid answers advance
//! the flow. Completed questions form an append-only transcript; the only
//! way back is a whole-flow reset.

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::plan::Plan;

/// Identifies a question and selects its validator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKey {
    Email,
    Plan,
}

impl QuestionKey {
    /// Prompt label shown on the input line ("Enter email:")
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKey::Email => "email",
            QuestionKey::Plan => "plan",
        }
    }
}

/// A single scripted question
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: String,
    /// Highlighted tail of the prompt, rendered in an accent color
    pub postfix: Option<String>,
    pub complete: bool,
    pub value: String,
}

impl Question {
    fn new(key: QuestionKey, prompt: &str, postfix: Option<&str>) -> Self {
        Self {
            key,
            prompt: prompt.into(),
            postfix: postfix.map(Into::into),
            complete: false,
            value: String::new(),
        }
    }
}

/// Flow-level state, derived from the questions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStage {
    /// At least one question is still pending
    Collecting,
    /// Every question is answered; awaiting confirm or reset
    Summary,
}

/// Answers extracted from a completed flow
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntakeAnswers {
    pub email: String,
    pub plan: Plan,
}

/// The intake state machine.
///
/// The active question is always computed as the first incomplete question
/// in order; it is never stored separately.
#[derive(Clone, Debug)]
pub struct IntakeFlow {
    questions: Vec<Question>,
    error: Option<IntakeError>,
}

impl Default for IntakeFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeFlow {
    /// Create the shipped two-question flow: email, then plan
    pub fn new() -> Self {
        Self {
            questions: vec![
                Question::new(
                    QuestionKey::Email,
                    "To start, could you give us ",
                    Some("your email?"),
                ),
                Question::new(
                    QuestionKey::Plan,
                    "Great! Which plan would you like to subscribe to? \
                     Choose M (Monthly @2500), A (Annual @1800), or L (Lifetime @60000)",
                    None,
                ),
            ],
            error: None,
        }
    }

    /// All questions, in order
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Completed questions in order, for transcript rendering
    pub fn completed(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.complete)
    }

    /// The active question: first incomplete in order
    pub fn current(&self) -> Option<&Question> {
        self.questions.iter().find(|q| !q.complete)
    }

    /// Last validation error, cleared by the next valid submit or reset
    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    /// Collecting while any question is pending, Summary once all are done
    pub fn stage(&self) -> FlowStage {
        if self.questions.iter().all(|q| q.complete) {
            FlowStage::Summary
        } else {
            FlowStage::Collecting
        }
    }

    /// Submit one line of input against the active question.
    ///
    /// A valid answer marks the question complete and stores the value;
    /// the next pending question becomes active implicitly. An invalid
    /// answer records the error and leaves the flow untouched so the
    /// caller can keep the typed text on screen.
    pub fn submit(&mut self, input: &str) -> Result<(), IntakeError> {
        let Some(current) = self.questions.iter_mut().find(|q| !q.complete) else {
            return Err(IntakeError::FlowComplete);
        };

        if let Err(err) = validate(current.key, input) {
            self.error = Some(err.clone());
            return Err(err);
        }

        current.complete = true;
        current.value = input.to_string();
        self.error = None;
        Ok(())
    }

    /// Clear all completion flags, values, and the error; back to question one
    pub fn reset(&mut self) {
        for q in &mut self.questions {
            q.complete = false;
            q.value.clear();
        }
        self.error = None;
    }

    /// Collected answers, available only once the flow reaches Summary
    pub fn answers(&self) -> Option<IntakeAnswers> {
        if self.stage() != FlowStage::Summary {
            return None;
        }

        let value_of = |key: QuestionKey| {
            self.questions
                .iter()
                .find(|q| q.key == key)
                .map(|q| q.value.clone())
        };

        let email = value_of(QuestionKey::Email)?;
        let plan = Plan::from_code(&value_of(QuestionKey::Plan)?)?;
        Some(IntakeAnswers { email, plan })
    }
}

/// Per-key validation policy. Email must look like local@domain, plan must
/// be an exact plan code; any other key accepts non-empty text.
fn validate(key: QuestionKey, input: &str) -> Result<(), IntakeError> {
    match key {
        QuestionKey::Email => {
            if is_valid_email(input) {
                Ok(())
            } else {
                Err(IntakeError::InvalidEmail)
            }
        }
        QuestionKey::Plan => {
            if Plan::from_code(input).is_some() {
                Ok(())
            } else {
                Err(IntakeError::InvalidPlan)
            }
        }
    }
}

/// local@domain check: non-empty local part, single '@', no whitespace,
/// and a dot with non-empty segments on both sides in the domain.
fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_advances_to_plan() {
        let mut flow = IntakeFlow::new();
        assert_eq!(flow.current().unwrap().key, QuestionKey::Email);

        flow.submit("a@b.com").unwrap();

        assert_eq!(flow.current().unwrap().key, QuestionKey::Plan);
        assert_eq!(flow.stage(), FlowStage::Collecting);
        assert!(flow.error().is_none());
    }

    #[test]
    fn test_invalid_email_does_not_advance() {
        let mut flow = IntakeFlow::new();
        for bad in ["", "plain", "no domain@x", "a@b", "a@.com", "two@@b.com"] {
            assert_eq!(flow.submit(bad), Err(IntakeError::InvalidEmail), "{bad:?}");
            assert_eq!(flow.current().unwrap().key, QuestionKey::Email);
        }
        assert_eq!(flow.error(), Some(&IntakeError::InvalidEmail));
    }

    #[test]
    fn test_plan_accepts_only_exact_codes() {
        let mut flow = IntakeFlow::new();
        flow.submit("a@b.com").unwrap();

        for bad in ["m", "X", "ML", ""] {
            assert_eq!(flow.submit(bad), Err(IntakeError::InvalidPlan), "{bad:?}");
            assert_eq!(flow.stage(), FlowStage::Collecting);
        }

        flow.submit("M").unwrap();
        assert_eq!(flow.stage(), FlowStage::Summary);
    }

    #[test]
    fn test_answers_only_in_summary() {
        let mut flow = IntakeFlow::new();
        assert!(flow.answers().is_none());

        flow.submit("x@y.com").unwrap();
        assert!(flow.answers().is_none());

        flow.submit("L").unwrap();
        let answers = flow.answers().unwrap();
        assert_eq!(answers.email, "x@y.com");
        assert_eq!(answers.plan, Plan::Lifetime);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut flow = IntakeFlow::new();
        flow.submit("x@y.com").unwrap();
        let _ = flow.submit("bogus");

        flow.reset();

        assert_eq!(flow.current().unwrap().key, QuestionKey::Email);
        assert!(flow.error().is_none());
        assert!(flow.questions().iter().all(|q| !q.complete && q.value.is_empty()));
    }

    #[test]
    fn test_submit_after_summary_is_rejected() {
        let mut flow = IntakeFlow::new();
        flow.submit("x@y.com").unwrap();
        flow.submit("A").unwrap();

        assert_eq!(flow.submit("anything"), Err(IntakeError::FlowComplete));
    }

    #[test]
    fn test_transcript_is_ordered() {
        let mut flow = IntakeFlow::new();
        flow.submit("x@y.com").unwrap();
        flow.submit("M").unwrap();

        let keys: Vec<_> = flow.completed().map(|q| q.key).collect();
        assert_eq!(keys, vec![QuestionKey::Email, QuestionKey::Plan]);
    }
}

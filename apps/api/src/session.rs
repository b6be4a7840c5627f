//! Client-side wizard state.
//!
//! The browser flow (intake form, scores with follow-up questions, then the
//! program chat) is modelled as a plain state value advanced by [`update`].
//! `update` never performs I/O: it returns the [`Command`] a client should
//! send, and the client feeds the outcome back in as another [`Event`].
//!
//! Only one analyze / follow-up / chat request may be in flight at a time.
//! Submissions arriving meanwhile are dropped. Suggested-answer lookups are
//! independent and do not block anything.

use bytes::Bytes;

use crate::extraction::manual::{ManualAnswers, ManualField};
use crate::models::analysis::AnalysisResult;
use crate::models::conversation::ConversationMessage;

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Intake,
    Scored,
    Chatting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Upload,
    Questions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Analyze,
    Followup,
    Chat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChosenFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// The resume input a request carries: the chosen file or the typed answers.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Upload(ChosenFile),
    Answers(ManualAnswers),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub stage: Stage,
    pub mode: InputMode,
    pub email: String,
    pub file: Option<ChosenFile>,
    pub answers: ManualAnswers,
    pub analysis: Option<AnalysisResult>,
    pub followup_questions: Vec<String>,
    /// Same length as `followup_questions`.
    pub followup_answers: Vec<String>,
    /// Suggested short answers per follow-up question, once fetched.
    pub answer_suggestions: Vec<Vec<String>>,
    pub conversation: Vec<ConversationMessage>,
    pub suggested_questions: Vec<String>,
    pub in_flight: Option<RequestKind>,
    pub error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Events and commands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EmailEntered(String),
    ModeSelected(InputMode),
    ManualAnswerEdited { field: ManualField, value: String },
    FileChosen(ChosenFile),
    SubmitRequested,
    AnalysisReceived {
        analysis: AnalysisResult,
        followup_questions: Vec<String>,
    },
    FollowupAnswerEdited { index: usize, value: String },
    SuggestionsRequested { index: usize },
    SuggestionsReceived { index: usize, suggestions: Vec<String> },
    SuggestedAnswerPicked { index: usize, answer: String },
    FollowupSubmitted,
    AnalysisUpdated {
        analysis: AnalysisResult,
        followup_questions: Vec<String>,
    },
    ChatMessageSent(String),
    ChatReplyReceived {
        reply: String,
        suggested_questions: Vec<String>,
    },
    /// A tracked request failed. Only clears `in_flight` when `kind` matches it.
    RequestFailed { kind: RequestKind, message: String },
    /// Suggestion fetches are untracked; failing one leaves other requests alone.
    SuggestionsFailed { index: usize },
}

/// An HTTP request for the client to issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// POST /api/analyze
    Analyze {
        email: String,
        submission: Submission,
    },
    /// POST /api/followup
    Followup {
        email: String,
        submission: Submission,
        original_analysis: AnalysisResult,
        questions: Vec<String>,
        responses: Vec<String>,
    },
    /// POST /api/chat
    Chat {
        email: String,
        messages: Vec<ConversationMessage>,
        analysis: Option<AnalysisResult>,
    },
    /// POST /api/suggestAnswers
    SuggestAnswers {
        index: usize,
        question: String,
        original_analysis: Option<AnalysisResult>,
    },
}

pub const MISSING_EMAIL: &str = "Please provide your email.";
pub const MISSING_FILE: &str = "Please provide your resume file.";
pub const UNANSWERED_QUESTIONS: &str = "Please answer all the questions.";

// ────────────────────────────────────────────────────────────────────────────
// Update
// ────────────────────────────────────────────────────────────────────────────

impl WizardState {
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    fn submission(&self) -> Result<Submission, &'static str> {
        match self.mode {
            InputMode::Upload => self
                .file
                .clone()
                .map(Submission::Upload)
                .ok_or(MISSING_FILE),
            InputMode::Questions if !self.answers.unanswered().is_empty() => {
                Err(UNANSWERED_QUESTIONS)
            }
            InputMode::Questions => Ok(Submission::Answers(self.answers.clone())),
        }
    }

    fn set_questions(&mut self, questions: Vec<String>) {
        self.followup_answers = vec![String::new(); questions.len()];
        self.answer_suggestions = vec![Vec::new(); questions.len()];
        self.followup_questions = questions;
    }

    fn start(&mut self, kind: RequestKind) {
        self.in_flight = Some(kind);
        self.error = None;
    }
}

/// Applies one event and returns the request to send, if any.
pub fn update(state: &mut WizardState, event: Event) -> Option<Command> {
    match event {
        Event::EmailEntered(email) => {
            state.email = email;
            None
        }
        Event::ModeSelected(mode) => {
            state.mode = mode;
            None
        }
        Event::ManualAnswerEdited { field, value } => {
            state.answers.set(field, value);
            None
        }
        Event::FileChosen(file) => {
            state.file = Some(file);
            None
        }

        Event::SubmitRequested => {
            if state.is_busy() {
                return None;
            }
            if state.email.trim().is_empty() {
                state.error = Some(MISSING_EMAIL.to_string());
                return None;
            }
            let submission = match state.submission() {
                Ok(submission) => submission,
                Err(message) => {
                    state.error = Some(message.to_string());
                    return None;
                }
            };
            state.start(RequestKind::Analyze);
            Some(Command::Analyze {
                email: state.email.trim().to_string(),
                submission,
            })
        }

        Event::AnalysisReceived {
            analysis,
            followup_questions,
        } => {
            state.in_flight = None;
            state.analysis = Some(analysis);
            state.set_questions(followup_questions);
            state.stage = Stage::Scored;
            None
        }

        Event::FollowupAnswerEdited { index, value }
        | Event::SuggestedAnswerPicked {
            index,
            answer: value,
        } => {
            if let Some(slot) = state.followup_answers.get_mut(index) {
                *slot = value;
            }
            None
        }

        Event::SuggestionsRequested { index } => {
            let question = state.followup_questions.get(index)?.clone();
            Some(Command::SuggestAnswers {
                index,
                question,
                original_analysis: state.analysis.clone(),
            })
        }
        Event::SuggestionsReceived { index, suggestions } => {
            if let Some(slot) = state.answer_suggestions.get_mut(index) {
                *slot = suggestions;
            }
            None
        }

        Event::FollowupSubmitted => {
            if state.is_busy() {
                return None;
            }
            let original_analysis = state.analysis.clone()?;
            let submission = match state.submission() {
                Ok(submission) => submission,
                Err(message) => {
                    state.error = Some(message.to_string());
                    return None;
                }
            };
            state.start(RequestKind::Followup);
            Some(Command::Followup {
                email: state.email.trim().to_string(),
                submission,
                original_analysis,
                questions: state.followup_questions.clone(),
                responses: state.followup_answers.clone(),
            })
        }

        Event::AnalysisUpdated {
            analysis,
            followup_questions,
        } => {
            state.in_flight = None;
            state.analysis = Some(analysis);
            // A re-score without new questions means the current set is done
            state.set_questions(followup_questions);
            if state.stage == Stage::Intake {
                state.stage = Stage::Scored;
            }
            None
        }

        Event::ChatMessageSent(text) => {
            if state.is_busy() || text.trim().is_empty() || state.analysis.is_none() {
                return None;
            }
            state.conversation.push(ConversationMessage::user(text));
            state.stage = Stage::Chatting;
            state.start(RequestKind::Chat);
            Some(Command::Chat {
                email: state.email.trim().to_string(),
                messages: state.conversation.clone(),
                analysis: state.analysis.clone(),
            })
        }

        Event::ChatReplyReceived {
            reply,
            suggested_questions,
        } => {
            state.in_flight = None;
            if !reply.is_empty() {
                state.conversation.push(ConversationMessage::assistant(reply));
            }
            state.suggested_questions = suggested_questions;
            None
        }

        Event::RequestFailed { kind, message } => {
            if state.in_flight == Some(kind) {
                state.in_flight = None;
            }
            state.error = Some(message);
            None
        }

        Event::SuggestionsFailed { index } => {
            if let Some(slot) = state.answer_suggestions.get_mut(index) {
                slot.clear();
            }
            None
        }
    }
}

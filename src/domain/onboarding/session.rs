//! The per-session conversation engine.
//!
//! An `OnboardingSession` owns every piece of state for one onboarding run:
//! the phase, collected fields, the profile draft, the inferred personality,
//! the history, the clock and its own random source. It is synchronous and
//! never reads the wall clock itself; callers pass `now` in.
//!
//! Text generation is not done here. Each turn produces a local fallback reply
//! and a generation prompt; the application layer decides which text to use.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::clock::ConversationClock;
use super::errors::OnboardingError;
use super::extractor::{capitalize, first_valid_age, EntityExtractor, ExtractedEntities};
use super::field::{CollectedFields, MandatoryField};
use super::history::ConversationHistory;
use super::interests::InterestSuggester;
use super::personality::{PersonalityEstimator, PersonalityTraits, TraitDimension};
use super::phase::OnboardingPhase;
use super::policy::OnboardingPolicy;
use super::profile::{ProfileDraft, UserProfile};
use super::question::{OnboardingQuestion, QuestionScript};
use super::replies;
use super::response::AIResponse;
use crate::domain::foundation::{Percentage, SessionId, StateMachine, Timestamp};

/// Why a session finished (or should finish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    AllFieldsCollected,
    TimeNearlyUp,
    TimeExpired,
    Requested,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AllFieldsCollected => "all_fields_collected",
            Self::TimeNearlyUp => "time_nearly_up",
            Self::TimeExpired => "time_expired",
            Self::Requested => "requested",
        };
        f.write_str(s)
    }
}

/// Everything one processed utterance produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Text of the scripted question this utterance answered, empty in open conversation.
    pub answered_question: String,
    /// Local templated reply, always available.
    pub fallback_text: String,
    pub next_question: Option<OnboardingQuestion>,
    pub extracted: ExtractedEntities,
    /// Mandatory fields that became collected during this turn.
    pub newly_collected: Vec<MandatoryField>,
    pub raised_traits: Vec<TraitDimension>,
    pub personality: PersonalityTraits,
    pub suggested_interests: Vec<String>,
    pub missing_fields: Vec<MandatoryField>,
    pub phase: OnboardingPhase,
    pub remaining: Duration,
    pub progress: Percentage,
    pub completion_due: Option<CompletionReason>,
    /// User prompt for an optional generation call.
    pub generation_prompt: String,
}

impl TurnOutcome {
    /// Builds the response with the given text, usually generated or the fallback.
    pub fn response_with_text(&self, text: impl Into<String>) -> AIResponse {
        AIResponse {
            text: text.into(),
            next_question: self.next_question.clone(),
            personality_insight: self.personality,
            suggested_interests: self.suggested_interests.clone(),
        }
    }

    pub fn fallback_response(&self) -> AIResponse {
        self.response_with_text(self.fallback_text.clone())
    }
}

/// Read-only view of a session at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: OnboardingPhase,
    pub current_question: Option<OnboardingQuestion>,
    pub collected_fields: Vec<MandatoryField>,
    pub missing_fields: Vec<MandatoryField>,
    pub remaining_secs: u64,
    pub progress: Percentage,
    pub personality: PersonalityTraits,
    pub draft: ProfileDraft,
    pub turn_count: u32,
    pub completion_due: Option<CompletionReason>,
}

/// One onboarding conversation.
#[derive(Debug)]
pub struct OnboardingSession {
    id: SessionId,
    script: Arc<QuestionScript>,
    policy: OnboardingPolicy,
    phase: OnboardingPhase,
    /// Set once the last scripted question has been answered.
    script_exhausted: bool,
    collected: CollectedFields,
    draft: ProfileDraft,
    personality: PersonalityTraits,
    history: ConversationHistory,
    clock: ConversationClock,
    turn_count: u32,
    completion: Option<CompletionReason>,
    rng: StdRng,
    extractor: EntityExtractor,
    estimator: PersonalityEstimator,
    suggester: InterestSuggester,
}

impl OnboardingSession {
    /// Starts a session at the first scripted question with the clock running from `now`.
    pub fn start(
        script: Arc<QuestionScript>,
        policy: OnboardingPolicy,
        rng: StdRng,
        now: Timestamp,
    ) -> Result<Self, OnboardingError> {
        policy.validate().map_err(OnboardingError::InvalidSettings)?;
        let clock = ConversationClock::start(now, policy.time_limit_secs)
            .map_err(OnboardingError::InvalidSettings)?;

        Ok(Self {
            id: SessionId::new(),
            script,
            policy,
            phase: OnboardingPhase::initial(),
            script_exhausted: false,
            collected: CollectedFields::new(),
            draft: ProfileDraft::new(),
            personality: PersonalityTraits::default(),
            history: ConversationHistory::new(),
            clock,
            turn_count: 0,
            completion: None,
            rng,
            extractor: EntityExtractor::new(),
            estimator: PersonalityEstimator::new(),
            suggester: InterestSuggester::new(),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> OnboardingPhase {
        self.phase
    }

    pub fn policy(&self) -> &OnboardingPolicy {
        &self.policy
    }

    pub fn personality(&self) -> &PersonalityTraits {
        &self.personality
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion
    }

    pub fn is_completed(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The scripted question currently awaiting an answer.
    pub fn current_question(&self) -> Option<&OnboardingQuestion> {
        self.phase.awaiting_index().and_then(|i| self.script.get(i))
    }

    pub fn mark_field_collected(&mut self, field: MandatoryField) -> bool {
        self.collected.mark(field)
    }

    pub fn are_mandatory_fields_collected(&self) -> bool {
        self.collected.is_complete()
    }

    pub fn missing_fields(&self) -> Vec<MandatoryField> {
        self.collected.missing()
    }

    pub fn time_progress(&self, now: Timestamp) -> Percentage {
        self.clock.progress(now)
    }

    pub fn remaining_time(&self, now: Timestamp) -> Duration {
        self.clock.remaining(now)
    }

    pub fn is_time_expired(&self, now: Timestamp) -> bool {
        self.clock.is_expired(now)
    }

    /// A session nobody finished: completed already, or past its time
    /// limit by more than `grace`.
    pub fn is_abandoned(&self, now: Timestamp, grace: Duration) -> bool {
        self.is_completed() || self.clock.is_overdue(now, grace)
    }

    /// Whether the caller should finish the session now, and why.
    ///
    /// An expired clock forces completion in any phase. The other reasons
    /// only apply once the conversation is open.
    pub fn completion_due(&self, now: Timestamp) -> Option<CompletionReason> {
        if self.is_completed() {
            return None;
        }
        if self.clock.is_expired(now) {
            return Some(CompletionReason::TimeExpired);
        }
        if !self.phase.is_open() {
            return None;
        }
        if self.are_mandatory_fields_collected() {
            Some(CompletionReason::AllFieldsCollected)
        } else if self.clock.remaining(now) < self.policy.wrap_up_threshold {
            Some(CompletionReason::TimeNearlyUp)
        } else {
            None
        }
    }

    /// Processes one user utterance and advances the state machine.
    pub fn process_utterance(
        &mut self,
        utterance: &str,
        now: Timestamp,
    ) -> Result<TurnOutcome, OnboardingError> {
        if self.is_completed() {
            return Err(OnboardingError::SessionCompleted);
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(OnboardingError::EmptyUtterance);
        }

        self.turn_count += 1;
        let extracted = self.extractor.extract(utterance);
        let raised_traits = self.estimator.observe(&mut self.personality, utterance);
        let suggested_interests = self.suggester.suggest(utterance);
        self.draft.add_interests(self.suggester.matched(utterance));

        let mut newly_collected = self.collect_extracted(&extracted);

        let (answered_question, fallback_text, next_question) = match self.phase {
            OnboardingPhase::AwaitingScriptedAnswer { index } => {
                self.handle_scripted_answer(index, utterance, &extracted, &mut newly_collected)?
            }
            OnboardingPhase::OpenConversation => {
                self.handle_open_utterance(utterance, &extracted, now)?
            }
            OnboardingPhase::Completed => return Err(OnboardingError::SessionCompleted),
        };

        let missing_fields = self.missing_fields();
        let remaining = self.clock.remaining(now);
        let generation_prompt =
            replies::generation_prompt(&answered_question, utterance, &missing_fields, remaining);

        tracing::debug!(
            session_id = %self.id,
            turn = self.turn_count,
            phase = %self.phase,
            newly_collected = ?newly_collected,
            missing = ?missing_fields,
            "Processed onboarding utterance"
        );

        Ok(TurnOutcome {
            answered_question,
            fallback_text,
            next_question,
            extracted,
            newly_collected,
            raised_traits,
            personality: self.personality,
            suggested_interests,
            missing_fields,
            phase: self.phase,
            remaining,
            progress: self.clock.progress(now),
            completion_due: self.completion_due(now),
            generation_prompt,
        })
    }

    /// Finishes the session and builds the profile, filling gaps with defaults.
    pub fn complete(
        &mut self,
        reason: CompletionReason,
        now: Timestamp,
    ) -> Result<UserProfile, OnboardingError> {
        if self.is_completed() {
            return Err(OnboardingError::SessionCompleted);
        }
        self.transition(OnboardingPhase::Completed)?;
        self.completion = Some(reason);

        tracing::info!(
            session_id = %self.id,
            reason = %reason,
            turns = self.turn_count,
            missing = ?self.missing_fields(),
            "Onboarding session completed"
        );

        Ok(UserProfile::from_draft(
            self.draft.clone(),
            self.personality,
            now,
        ))
    }

    pub fn snapshot(&self, now: Timestamp) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            phase: self.phase,
            current_question: self.current_question().cloned(),
            collected_fields: self.collected.collected(),
            missing_fields: self.missing_fields(),
            remaining_secs: self.clock.remaining(now).as_secs(),
            progress: self.clock.progress(now),
            personality: self.personality,
            draft: self.draft.clone(),
            turn_count: self.turn_count,
            completion_due: self.completion_due(now),
        }
    }

    fn collect_extracted(&mut self, extracted: &ExtractedEntities) -> Vec<MandatoryField> {
        self.draft
            .apply(extracted)
            .into_iter()
            .filter(|field| self.collected.mark(*field))
            .collect()
    }

    fn handle_scripted_answer(
        &mut self,
        index: usize,
        utterance: &str,
        extracted: &ExtractedEntities,
        newly_collected: &mut Vec<MandatoryField>,
    ) -> Result<(String, String, Option<OnboardingQuestion>), OnboardingError> {
        let question = self
            .script
            .get(index)
            .cloned()
            .ok_or(OnboardingError::QuestionOutOfRange(index))?;
        self.history.record(question.text.clone(), utterance);

        if let Some(field) = question.collects {
            if self.record_direct_answer(field, &question, utterance, extracted)
                && self.collected.mark(field)
            {
                newly_collected.push(field);
            }
        }

        let greeting_name = match question.collects {
            Some(MandatoryField::Name) => self.draft.name.clone(),
            _ => None,
        };
        let fallback =
            replies::scripted_acknowledgment(&mut self.rng, index, greeting_name.as_deref());

        let next_index = if self.script_exhausted {
            None
        } else {
            self.script.next_index(index)
        };

        let next_phase = match next_index {
            Some(next) => OnboardingPhase::AwaitingScriptedAnswer { index: next },
            None => {
                self.script_exhausted = true;
                OnboardingPhase::OpenConversation
            }
        };
        self.transition(next_phase)?;

        Ok((question.text, fallback, self.current_question().cloned()))
    }

    /// Stores the value a scripted question asked for. Returns true if a value was found.
    ///
    /// Extractor hits were already applied; otherwise the raw answer is used.
    fn record_direct_answer(
        &mut self,
        field: MandatoryField,
        question: &OnboardingQuestion,
        utterance: &str,
        extracted: &ExtractedEntities,
    ) -> bool {
        if extracted.has(field) {
            return true;
        }
        match field {
            MandatoryField::Age => match first_valid_age(utterance) {
                Some(age) => {
                    self.draft.age = Some(age);
                    true
                }
                None => false,
            },
            MandatoryField::Name | MandatoryField::Location => {
                if !question.meets_min_length(utterance) {
                    return false;
                }
                let value = capitalize_first(utterance);
                if value.is_empty() {
                    return false;
                }
                match field {
                    MandatoryField::Name => self.draft.name = Some(value),
                    _ => self.draft.location = Some(value),
                }
                true
            }
        }
    }

    fn handle_open_utterance(
        &mut self,
        utterance: &str,
        extracted: &ExtractedEntities,
        now: Timestamp,
    ) -> Result<(String, String, Option<OnboardingQuestion>), OnboardingError> {
        self.history.record(String::new(), utterance);

        let missing = self.missing_fields();
        let fallback = replies::conversational_reply(&mut self.rng, extracted, &missing);

        let Some(first_missing) = missing.first().copied() else {
            return Ok((String::new(), fallback, None));
        };

        let urgent = self.clock.remaining(now) < self.policy.urgent_reask_threshold;
        let reask = urgent || self.rng.random_bool(self.policy.reask_probability);
        if !reask {
            return Ok((String::new(), fallback, None));
        }

        let Some(index) = self.script.index_collecting(first_missing) else {
            return Ok((String::new(), fallback, None));
        };
        self.transition(OnboardingPhase::AwaitingScriptedAnswer { index })?;

        tracing::debug!(
            session_id = %self.id,
            field = %first_missing,
            urgent,
            "Re-asking for missing field"
        );

        Ok((String::new(), fallback, self.current_question().cloned()))
    }

    fn transition(&mut self, target: OnboardingPhase) -> Result<(), OnboardingError> {
        self.phase = self
            .phase
            .transition_to(target)
            .map_err(OnboardingError::InvalidTransition)?;
        Ok(())
    }
}

/// Upper-cases the first letter of a raw answer, leaving the rest as typed.
fn capitalize_first(answer: &str) -> String {
    let trimmed = answer.trim().trim_end_matches(['.', '!', '?']);
    if trimmed.split_whitespace().count() == 1 {
        return capitalize(trimmed);
    }
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn start_at(now: Timestamp, policy: OnboardingPolicy) -> OnboardingSession {
        OnboardingSession::start(
            QuestionScript::standard(),
            policy,
            StdRng::seed_from_u64(42),
            now,
        )
        .unwrap()
    }

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn session() -> OnboardingSession {
        start_at(t0(), OnboardingPolicy::default())
    }

    fn never_reask() -> OnboardingPolicy {
        OnboardingPolicy::default().with_reask_probability(0.0)
    }

    fn always_reask() -> OnboardingPolicy {
        OnboardingPolicy::default().with_reask_probability(1.0)
    }

    /// Runs the standard script with one-letter answers.
    ///
    /// Only the location question accepts "x", so name and age stay missing.
    fn bland_open(policy: OnboardingPolicy) -> OnboardingSession {
        let mut session = start_at(t0(), policy);
        for _ in 0..7 {
            session.process_utterance("x", t0()).unwrap();
        }
        assert_eq!(session.phase(), OnboardingPhase::OpenConversation);
        session
    }

    /// A session whose single question collects nothing, already answered.
    fn unscripted_open(policy: OnboardingPolicy) -> OnboardingSession {
        let script = QuestionScript::new(vec![OnboardingQuestion::voice("intro", "Hi there?")]).unwrap();
        let mut session =
            OnboardingSession::start(Arc::new(script), policy, StdRng::seed_from_u64(3), t0()).unwrap();
        session.process_utterance("ok", t0()).unwrap();
        assert_eq!(session.phase(), OnboardingPhase::OpenConversation);
        session
    }

    mod start {
        use super::*;

        #[test]
        fn begins_at_first_question_with_nothing_collected() {
            let session = session();
            assert_eq!(session.phase(), OnboardingPhase::initial());
            assert_eq!(session.current_question().unwrap().id, "q1");
            assert_eq!(session.missing_fields(), MandatoryField::ALL.to_vec());
            assert_eq!(session.time_progress(t0()), Percentage::ZERO);
            assert_eq!(session.turn_count(), 0);
        }

        #[test]
        fn rejects_invalid_policy() {
            let result = OnboardingSession::start(
                QuestionScript::standard(),
                OnboardingPolicy::default().with_time_limit(10),
                StdRng::seed_from_u64(1),
                t0(),
            );
            assert!(matches!(result, Err(OnboardingError::InvalidSettings(_))));
        }
    }

    mod scripted_flow {
        use super::*;

        #[test]
        fn name_answer_collects_name_and_greets() {
            let mut session = session();
            let outcome = session.process_utterance("my name is Alex", t0()).unwrap();
            assert_eq!(outcome.newly_collected, vec![MandatoryField::Name]);
            assert_eq!(session.draft().name.as_deref(), Some("Alex"));
            assert!(outcome.fallback_text.ends_with("Nice to meet you, Alex!"));
            assert_eq!(outcome.next_question.unwrap().id, "q2");
            assert_eq!(outcome.answered_question, session.script.initial().text);
        }

        #[test]
        fn bare_answers_fill_their_own_fields() {
            let mut session = session();
            session.process_utterance("alex", t0()).unwrap();
            session.process_utterance("15", t0()).unwrap();
            session.process_utterance("boston", t0()).unwrap();
            assert!(session.are_mandatory_fields_collected());
            assert_eq!(session.draft().name.as_deref(), Some("Alex"));
            assert_eq!(session.draft().age, Some(15));
            assert_eq!(session.draft().location.as_deref(), Some("Boston"));
        }

        #[test]
        fn adult_age_is_not_collected() {
            let mut session = session();
            session.process_utterance("Alex", t0()).unwrap();
            let outcome = session.process_utterance("I am 25 years old", t0()).unwrap();
            assert!(outcome.newly_collected.is_empty());
            assert_eq!(session.draft().age, None);
            assert!(session.missing_fields().contains(&MandatoryField::Age));
            assert_eq!(outcome.next_question.unwrap().id, "q3");
        }

        #[test]
        fn one_character_name_is_too_short() {
            let mut session = session();
            let outcome = session.process_utterance("a", t0()).unwrap();
            assert!(outcome.newly_collected.is_empty());
            assert!(outcome.fallback_text.ends_with("I'm getting to know you better."));
        }

        #[test]
        fn extractor_collects_fields_outside_the_current_question() {
            let mut session = session();
            let outcome = session
                .process_utterance("I'm Alex, I live in Denver", t0())
                .unwrap();
            assert_eq!(
                outcome.newly_collected,
                vec![MandatoryField::Name, MandatoryField::Location]
            );
        }

        #[test]
        fn answering_all_seven_opens_the_conversation() {
            let mut session = session();
            let answers = [
                "my name is Alex",
                "I'm 15",
                "I live in Boston",
                "I love music and gaming",
                "Japan because I want to explore new places",
                "A mix of both",
                "Kind and friendly, probably",
            ];
            let mut last = None;
            for answer in answers {
                last = Some(session.process_utterance(answer, t0()).unwrap());
            }
            let last = last.unwrap();
            assert!(last.next_question.is_none());
            assert_eq!(session.phase(), OnboardingPhase::OpenConversation);
            assert!(session.current_question().is_none());
            assert_eq!(last.completion_due, Some(CompletionReason::AllFieldsCollected));
            assert_eq!(session.history().len(), 7);
            assert!(session.draft().interests.contains(&"gaming".to_string()));
        }

        #[test]
        fn history_records_question_text_for_scripted_turns() {
            let mut session = session();
            session.process_utterance("Alex", t0()).unwrap();
            let entry = session.history().last().unwrap();
            assert_eq!(entry.question, session.script.initial().text);
            assert_eq!(entry.response, "Alex");
        }
    }

    mod open_conversation {
        use super::*;

        #[test]
        fn never_reask_stays_open() {
            let mut session = bland_open(never_reask());
            assert_eq!(session.draft().location.as_deref(), Some("X"));
            assert_eq!(
                session.missing_fields(),
                vec![MandatoryField::Name, MandatoryField::Age]
            );

            let outcome = session.process_utterance("I like pizza", t0()).unwrap();
            assert!(outcome.next_question.is_none());
            assert_eq!(session.phase(), OnboardingPhase::OpenConversation);
            assert_eq!(outcome.answered_question, "");
        }

        #[test]
        fn always_reask_asks_first_missing_field() {
            let mut session = bland_open(always_reask());
            let outcome = session.process_utterance("I like pizza", t0()).unwrap();
            let question = outcome.next_question.unwrap();
            assert_eq!(question.collects, Some(MandatoryField::Name));
            assert_eq!(
                session.phase(),
                OnboardingPhase::AwaitingScriptedAnswer { index: 0 }
            );
        }

        #[test]
        fn reasked_answer_returns_to_open_conversation() {
            let mut session = bland_open(always_reask());
            session.process_utterance("I like pizza", t0()).unwrap();
            let outcome = session.process_utterance("Jo", t0()).unwrap();
            assert_eq!(outcome.newly_collected, vec![MandatoryField::Name]);
            assert!(outcome.next_question.is_none());
            assert_eq!(session.phase(), OnboardingPhase::OpenConversation);
        }

        #[test]
        fn urgent_time_forces_reask_even_with_zero_probability() {
            let mut session = bland_open(never_reask());
            let late = t0().plus_secs(250);
            let outcome = session.process_utterance("hmm", late).unwrap();
            assert_eq!(outcome.next_question.unwrap().collects, Some(MandatoryField::Name));
        }

        #[test]
        fn extracted_location_gets_a_tailored_reply() {
            let mut session = unscripted_open(never_reask());
            let outcome = session
                .process_utterance("I live in Boston and love music and gaming", t0())
                .unwrap();
            assert_eq!(outcome.newly_collected, vec![MandatoryField::Location]);
            assert!(outcome.fallback_text.starts_with("Boston sounds like a cool place!"));
            assert_eq!(outcome.suggested_interests, vec!["music", "gaming"]);
        }

        #[test]
        fn no_reask_once_everything_is_collected() {
            let mut session = bland_open(always_reask());
            for field in MandatoryField::ALL {
                session.mark_field_collected(field);
            }
            let outcome = session.process_utterance("cool", t0()).unwrap();
            assert!(outcome.next_question.is_none());
            assert_eq!(outcome.completion_due, Some(CompletionReason::AllFieldsCollected));
        }
    }

    mod completion {
        use super::*;

        #[test]
        fn wrap_up_due_when_little_time_remains_in_open_conversation() {
            let mut session = unscripted_open(never_reask());
            let late = t0().plus_secs(275);
            assert_eq!(session.completion_due(late), Some(CompletionReason::TimeNearlyUp));

            let profile = session.complete(CompletionReason::TimeNearlyUp, late).unwrap();
            assert_eq!(profile.name, "User");
            assert_eq!(profile.age, 16);
            assert_eq!(profile.location, "Unknown");
            assert_eq!(profile.interests, vec!["music", "travel", "movies"]);
        }

        #[test]
        fn nothing_due_while_scripted_and_time_remains() {
            let session = session();
            assert_eq!(session.completion_due(t0().plus_secs(290)), None);
        }

        #[test]
        fn expiry_is_due_in_any_phase() {
            let session = session();
            assert_eq!(
                session.completion_due(t0().plus_secs(300)),
                Some(CompletionReason::TimeExpired)
            );
            assert!(session.is_time_expired(t0().plus_secs(300)));
        }

        #[test]
        fn abandoned_once_overdue_or_completed() {
            let grace = Duration::from_secs(120);
            let mut session = session();
            assert!(!session.is_abandoned(t0().plus_secs(300), grace));
            assert!(session.is_abandoned(t0().plus_secs(420), grace));

            session.complete(CompletionReason::Requested, t0()).unwrap();
            assert!(session.is_abandoned(t0(), grace));
        }

        #[test]
        fn completed_session_rejects_further_turns() {
            let mut session = session();
            session.complete(CompletionReason::Requested, t0()).unwrap();
            assert!(session.is_completed());
            assert_eq!(session.completion_reason(), Some(CompletionReason::Requested));
            assert_eq!(
                session.process_utterance("hello", t0()),
                Err(OnboardingError::SessionCompleted)
            );
            assert!(matches!(
                session.complete(CompletionReason::Requested, t0()),
                Err(OnboardingError::SessionCompleted)
            ));
            assert_eq!(session.completion_due(t0().plus_secs(999)), None);
        }

        #[test]
        fn profile_carries_inferred_personality() {
            let mut session = session();
            session.process_utterance("I'm Alex and I love art", t0()).unwrap();
            let profile = session.complete(CompletionReason::Requested, t0()).unwrap();
            assert!(profile.personality.openness > 0.5);
            assert_eq!(profile.name, "Alex");
            assert_eq!(profile.interests, vec!["art"]);
        }
    }

    #[test]
    fn empty_utterance_is_rejected_without_side_effects() {
        let mut session = session();
        assert_eq!(
            session.process_utterance("   ", t0()),
            Err(OnboardingError::EmptyUtterance)
        );
        assert_eq!(session.turn_count(), 0);
        assert!(session.history().is_empty());
    }

    #[test]
    fn progress_is_half_at_half_time() {
        let session = session();
        assert_eq!(session.time_progress(t0().plus_secs(150)).value(), 50);
        assert_eq!(session.time_progress(t0().plus_secs(1_000)), Percentage::HUNDRED);
    }

    #[test]
    fn mandatory_completion_is_order_independent() {
        let mut session = session();
        session.mark_field_collected(MandatoryField::Location);
        session.mark_field_collected(MandatoryField::Name);
        assert!(!session.are_mandatory_fields_collected());
        session.mark_field_collected(MandatoryField::Age);
        assert!(session.are_mandatory_fields_collected());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = session();
        session.process_utterance("my name is Alex", t0()).unwrap();
        let snapshot = session.snapshot(t0().plus_secs(30));
        assert_eq!(snapshot.collected_fields, vec![MandatoryField::Name]);
        assert_eq!(snapshot.remaining_secs, 270);
        assert_eq!(snapshot.current_question.unwrap().id, "q2");
        assert_eq!(snapshot.turn_count, 1);
    }
}

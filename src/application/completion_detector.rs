//! Completion detector - decides whether activity satisfies open actions.
//!
//! Two entry points: a broad scan triggered by any new email or
//! meeting, and a targeted check when an email is sent directly from
//! an action. Both funnel into the same complete-or-suggest decision.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::action::{
    Action, ActionSuggestion, CompletionRecord, CompletionSource, EvidenceRef, SuggestionStatus,
};
use crate::domain::detection::scoring::{
    self, AI_UNAVAILABLE_CONFIDENCE, NO_SUGGESTION_CONFIDENCE, RULES_COMPLETE_THRESHOLD,
    TARGETED_AI_THRESHOLD,
};
use crate::domain::detection::{
    DetectionConfig, DetectionMode, DetectionReport, EvidenceContent, MatchResult,
};
use crate::domain::foundation::{
    ActionId, DealId, DomainError, EmailId, MeetingId, OwnerScope, SuggestionId, Timestamp,
};
use crate::ports::{
    ActionStore, CompletionJudge, CrmReader, DetectionConfigSource, JudgeRequest, SuggestionStore,
};

/// Outcome of the targeted send-from-action check.
#[derive(Debug, Clone)]
pub struct EmailSendOutcome {
    pub action_completed: bool,
    pub confidence: u8,
    pub reasoning: String,
}

pub struct CompletionDetector {
    crm: Arc<dyn CrmReader>,
    actions: Arc<dyn ActionStore>,
    suggestions: Arc<dyn SuggestionStore>,
    config_source: Arc<dyn DetectionConfigSource>,
    judge: Arc<dyn CompletionJudge>,
}

impl CompletionDetector {
    pub fn new(
        crm: Arc<dyn CrmReader>,
        actions: Arc<dyn ActionStore>,
        suggestions: Arc<dyn SuggestionStore>,
        config_source: Arc<dyn DetectionConfigSource>,
        judge: Arc<dyn CompletionJudge>,
    ) -> Self {
        Self { crm, actions, suggestions, config_source, judge }
    }

    /// Broad scan: a new email arrived or went out on some deal.
    pub async fn detect_from_email(
        &self,
        email_id: EmailId,
        scope: &OwnerScope,
    ) -> Result<DetectionReport, DomainError> {
        let config = self.resolve_config(scope).await;
        if !config.is_enabled() || !config.detect_from_emails {
            return Ok(DetectionReport::nothing_scanned());
        }
        let email = self.crm.find_email(email_id, scope).await?;
        let evidence = EvidenceContent::from_email(&email);
        self.scan(email.deal_id, evidence, EvidenceRef::Email { email_id }, &config, scope)
            .await
    }

    /// Broad scan: a meeting on some deal was held.
    pub async fn detect_from_meeting(
        &self,
        meeting_id: MeetingId,
        scope: &OwnerScope,
    ) -> Result<DetectionReport, DomainError> {
        let config = self.resolve_config(scope).await;
        if !config.is_enabled() || !config.detect_from_meetings {
            return Ok(DetectionReport::nothing_scanned());
        }
        let meeting = self.crm.find_meeting(meeting_id, scope).await?;
        let evidence = EvidenceContent::from_meeting(&meeting);
        self.scan(meeting.deal_id, evidence, EvidenceRef::Meeting { meeting_id }, &config, scope)
            .await
    }

    /// Targeted check: the user sent an email from this specific
    /// action, so completion is presumed and the question is only how
    /// confidently.
    pub async fn detect_from_email_for_action(
        &self,
        action_id: ActionId,
        email_id: EmailId,
        scope: &OwnerScope,
    ) -> Result<EmailSendOutcome, DomainError> {
        let config = self.resolve_config(scope).await;
        let action = self.actions.find(action_id, scope).await?;
        let email = self.crm.find_email(email_id, scope).await?;
        let evidence = EvidenceContent::from_email(&email);
        let evidence_ref = EvidenceRef::Email { email_id };
        let now = Timestamp::now();

        // With detection off, sending from the action is the completion.
        if !config.is_enabled() {
            return self
                .complete_targeted(
                    action_id,
                    100,
                    "Sent directly from the action",
                    CompletionSource::SendCompletion,
                    false,
                    evidence_ref,
                    scope,
                    now,
                )
                .await;
        }

        // Without suggested content there is nothing to compare the
        // sent email against; the send itself is the evidence.
        if action.suggested_action.is_none() {
            return self
                .complete_targeted(
                    action_id,
                    NO_SUGGESTION_CONFIDENCE,
                    "No suggested content to compare against; completed on send",
                    CompletionSource::Rules,
                    true,
                    evidence_ref,
                    scope,
                    now,
                )
                .await;
        }

        match self.judge.judge(JudgeRequest::for_action(&action, &evidence)).await {
            Ok(verdict) if verdict.confidence >= TARGETED_AI_THRESHOLD => {
                self.complete_targeted(
                    action_id,
                    verdict.confidence,
                    verdict.reasoning,
                    CompletionSource::AiContentCheck,
                    true,
                    evidence_ref,
                    scope,
                    now,
                )
                .await
            }
            Ok(verdict) => {
                // The sent content does not look like the suggested
                // content; park it for a human instead of completing.
                let suggestion = ActionSuggestion::pending(
                    action_id,
                    evidence_ref,
                    verdict.confidence,
                    verdict.reasoning.clone(),
                    scope.clone(),
                    now,
                );
                self.suggestions.insert_if_absent(&suggestion).await?;
                Ok(EmailSendOutcome {
                    action_completed: false,
                    confidence: verdict.confidence,
                    reasoning: verdict.reasoning,
                })
            }
            Err(err) => {
                warn!(action_id = %action_id, error = %err, "content check unavailable, completing on send");
                self.complete_targeted(
                    action_id,
                    AI_UNAVAILABLE_CONFIDENCE,
                    "AI content check unavailable; completed on send",
                    CompletionSource::SendCompletion,
                    true,
                    evidence_ref,
                    scope,
                    now,
                )
                .await
            }
        }
    }

    /// A human confirmed a pending suggestion; cascade the completion.
    pub async fn accept_suggestion(
        &self,
        id: SuggestionId,
        scope: &OwnerScope,
    ) -> Result<(), DomainError> {
        let mut suggestion = self.suggestions.find(id, scope).await?;
        suggestion.accept()?;
        self.suggestions.set_status(id, SuggestionStatus::Accepted, scope).await?;

        let record = CompletionRecord {
            confidence: suggestion.confidence,
            reasoning: suggestion.reasoning.clone(),
            source: CompletionSource::SuggestionAccepted,
            evidence: Some(suggestion.evidence),
            auto_completed: false,
            completed_at: Timestamp::now(),
        };
        // The action may have completed through another path meanwhile;
        // accepting is still a valid terminal state for the suggestion.
        self.actions.complete_if_open(suggestion.action_id, record, scope).await?;
        Ok(())
    }

    /// A human rejected a pending suggestion; the action stays open.
    pub async fn dismiss_suggestion(
        &self,
        id: SuggestionId,
        scope: &OwnerScope,
    ) -> Result<(), DomainError> {
        let mut suggestion = self.suggestions.find(id, scope).await?;
        suggestion.dismiss()?;
        self.suggestions.set_status(id, SuggestionStatus::Dismissed, scope).await
    }

    async fn resolve_config(&self, scope: &OwnerScope) -> DetectionConfig {
        match self.config_source.detection_config(scope).await {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "detection config lookup failed, using defaults");
                DetectionConfig::default()
            }
        }
    }

    async fn scan(
        &self,
        deal_id: DealId,
        evidence: EvidenceContent,
        evidence_ref: EvidenceRef,
        config: &DetectionConfig,
        scope: &OwnerScope,
    ) -> Result<DetectionReport, DomainError> {
        let now = Timestamp::now();
        let open = self.actions.list_open_for_deal(deal_id, scope).await?;
        let mut report = DetectionReport::default();

        for action in open {
            report.scanned += 1;
            let result = match self.match_action(&action, &evidence, config).await {
                Some(result) => result,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };

            if result.confidence >= config.auto_complete_threshold {
                let record = CompletionRecord {
                    confidence: result.confidence,
                    reasoning: result.reasoning,
                    source: result.source,
                    evidence: Some(evidence_ref),
                    auto_completed: true,
                    completed_at: now,
                };
                // First writer wins; a concurrent scan losing the race
                // is counted as skipped, not an error.
                if self.actions.complete_if_open(action.id, record, scope).await? {
                    report.completed += 1;
                } else {
                    report.skipped += 1;
                }
            } else if result.confidence >= config.confidence_threshold {
                let suggestion = ActionSuggestion::pending(
                    action.id,
                    evidence_ref,
                    result.confidence,
                    result.reasoning,
                    scope.clone(),
                    now,
                );
                if self.suggestions.insert_if_absent(&suggestion).await? {
                    report.suggested += 1;
                } else {
                    report.skipped += 1;
                }
            } else {
                report.skipped += 1;
            }
        }

        info!(
            deal_id = %deal_id,
            scanned = report.scanned,
            completed = report.completed,
            suggested = report.suggested,
            "detection scan finished"
        );
        Ok(report)
    }

    async fn match_action(
        &self,
        action: &Action,
        evidence: &EvidenceContent,
        config: &DetectionConfig,
    ) -> Option<MatchResult> {
        match config.mode {
            DetectionMode::Manual => None,
            DetectionMode::RulesOnly => Some(scoring::score(action, evidence)),
            DetectionMode::AiOnly => {
                match self.judge.judge(JudgeRequest::for_action(action, evidence)).await {
                    Ok(verdict) => Some(MatchResult::from_confidence(
                        verdict.confidence,
                        verdict.reasoning,
                        CompletionSource::AiContentCheck,
                        RULES_COMPLETE_THRESHOLD,
                    )),
                    Err(err) => {
                        warn!(action_id = %action.id, error = %err, "judge unavailable, skipping action");
                        None
                    }
                }
            }
            DetectionMode::Hybrid => {
                let rules_result = scoring::score(action, evidence);
                if !scoring::needs_arbitration(rules_result.confidence) {
                    return Some(rules_result);
                }
                match self.judge.judge(JudgeRequest::for_action(action, evidence)).await {
                    Ok(verdict) => Some(MatchResult::from_confidence(
                        verdict.confidence,
                        verdict.reasoning,
                        CompletionSource::AiArbitration,
                        RULES_COMPLETE_THRESHOLD,
                    )),
                    Err(err) => {
                        warn!(
                            action_id = %action.id,
                            error = %err,
                            rules_confidence = rules_result.confidence,
                            "judge unavailable, trusting rules score"
                        );
                        Some(rules_result)
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn complete_targeted(
        &self,
        action_id: ActionId,
        confidence: u8,
        reasoning: impl Into<String>,
        source: CompletionSource,
        auto_completed: bool,
        evidence: EvidenceRef,
        scope: &OwnerScope,
        now: Timestamp,
    ) -> Result<EmailSendOutcome, DomainError> {
        let reasoning = reasoning.into();
        let record = CompletionRecord {
            confidence,
            reasoning: reasoning.clone(),
            source,
            evidence: Some(evidence),
            auto_completed,
            completed_at: now,
        };
        self.actions.complete_if_open(action_id, record, scope).await?;
        Ok(EmailSendOutcome { action_completed: true, confidence, reasoning })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryActionStore, InMemoryCrm, InMemoryDetectionConfigSource, InMemorySuggestionStore,
    };
    use crate::domain::action::{ActionCandidate, ActionPriority, ActionType, SourceRule};
    use crate::domain::crm::{Deal, DealStage, Email, EmailDirection};
    use crate::domain::foundation::{AccountId, OrgId, UserId};
    use crate::ports::{AiError, JudgeVerdict};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn scope() -> OwnerScope {
        OwnerScope::new(UserId::new("u1").unwrap(), OrgId::new("o1").unwrap())
    }

    enum Script {
        Verdict(u8, &'static str),
        Fail,
    }

    struct MockJudge {
        script: Script,
        calls: Mutex<usize>,
    }

    impl MockJudge {
        fn verdict(confidence: u8) -> Self {
            Self { script: Script::Verdict(confidence, "judged"), calls: Mutex::new(0) }
        }

        fn failing() -> Self {
            Self { script: Script::Fail, calls: Mutex::new(0) }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionJudge for MockJudge {
        async fn judge(&self, _request: JudgeRequest) -> Result<JudgeVerdict, AiError> {
            *self.calls.lock().unwrap() += 1;
            match &self.script {
                Script::Verdict(confidence, reasoning) => Ok(JudgeVerdict {
                    confidence: *confidence,
                    reasoning: reasoning.to_string(),
                }),
                Script::Fail => Err(AiError::Timeout(30)),
            }
        }
    }

    struct Fixture {
        crm: Arc<InMemoryCrm>,
        actions: Arc<InMemoryActionStore>,
        suggestions: Arc<InMemorySuggestionStore>,
        config: Arc<InMemoryDetectionConfigSource>,
        judge: Arc<MockJudge>,
        deal_id: DealId,
    }

    impl Fixture {
        fn new(judge: MockJudge) -> Self {
            let crm = Arc::new(InMemoryCrm::default());
            let now = Timestamp::now();
            let deal = Deal {
                id: DealId::new(),
                account_id: AccountId::new(),
                name: "Acme expansion".to_string(),
                stage: DealStage::new("proposal"),
                value: Some(50_000),
                close_date: Some(now.add_days(30)),
                updated_at: now,
                health_score: None,
                health_breakdown_raw: None,
                scope: scope(),
            };
            let deal_id = deal.id;
            crm.seed_deal(deal);
            Self {
                crm,
                actions: Arc::new(InMemoryActionStore::default()),
                suggestions: Arc::new(InMemorySuggestionStore::default()),
                config: Arc::new(InMemoryDetectionConfigSource::default()),
                judge: Arc::new(judge),
                deal_id,
            }
        }

        fn detector(&self) -> CompletionDetector {
            CompletionDetector::new(
                self.crm.clone(),
                self.actions.clone(),
                self.suggestions.clone(),
                self.config.clone(),
                self.judge.clone(),
            )
        }

        async fn seed_action(
            &self,
            keywords: &[&str],
            suggested: Option<&str>,
        ) -> ActionId {
            let mut candidate = ActionCandidate::new(
                "Send the proposal",
                "Send the proposal to the buyer",
                ActionType::EmailSend,
                ActionPriority::High,
                Timestamp::now(),
                self.deal_id,
                AccountId::new(),
                SourceRule::StageProposalStale,
            )
            .with_keywords(keywords.iter().map(|k| k.to_string()).collect());
            if let Some(text) = suggested {
                candidate = candidate.with_suggested_action(text);
            }
            let action = Action::from_candidate(candidate, scope(), Timestamp::now());
            let id = action.id;
            self.actions.insert(&action).await.unwrap();
            id
        }

        fn seed_email(&self, body: &str, has_attachment: bool) -> EmailId {
            let email = Email {
                id: EmailId::new(),
                deal_id: self.deal_id,
                contact_id: None,
                direction: EmailDirection::Sent,
                subject: "Update".to_string(),
                body: body.to_string(),
                sent_at: Timestamp::now(),
                has_attachment,
            };
            let id = email.id;
            self.crm.seed_email(email);
            id
        }

        async fn action(&self, id: ActionId) -> Action {
            self.actions.find(id, &scope()).await.unwrap()
        }
    }

    #[tokio::test]
    async fn weak_match_skips_the_judge_in_hybrid_mode() {
        let fx = Fixture::new(MockJudge::verdict(99));
        fx.seed_action(&["proposal", "pricing"], None).await;
        // No keywords match and "planning" is negation language:
        // 0 + 20 outbound + 15 channel - 15 = 20, below the band.
        let email_id = fx.seed_email("quick note, still planning internally", false);

        let report = fx.detector().detect_from_email(email_id, &scope()).await.unwrap();
        assert_eq!(fx.judge.call_count(), 0);
        assert_eq!(report.completed, 0);
        assert_eq!(report.suggested, 0);
    }

    #[tokio::test]
    async fn band_score_is_arbitrated_and_high_verdict_completes() {
        let fx = Fixture::new(MockJudge::verdict(95));
        let action_id = fx.seed_action(&["proposal", "pricing"], None).await;
        // Half the keywords: 15 + 20 + 15 + 5 = 55, inside the band.
        let email_id = fx.seed_email("proposal is attached below", false);

        let report = fx.detector().detect_from_email(email_id, &scope()).await.unwrap();
        assert_eq!(fx.judge.call_count(), 1);
        assert_eq!(report.completed, 1);

        let action = fx.action(action_id).await;
        let completion = action.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::AiArbitration);
        assert_eq!(completion.confidence, 95);
        assert!(completion.auto_completed);
    }

    #[tokio::test]
    async fn judge_outage_in_the_band_degrades_to_the_rules_score() {
        let fx = Fixture::new(MockJudge::failing());
        let action_id = fx.seed_action(&["proposal", "pricing"], None).await;
        let email_id = fx.seed_email("proposal is attached below", false);

        let report = fx.detector().detect_from_email(email_id, &scope()).await.unwrap();
        // 55 clears the suggestion threshold but not auto-complete.
        assert_eq!(report.completed, 0);
        assert_eq!(report.suggested, 1);
        assert!(fx.action(action_id).await.is_open());
    }

    #[tokio::test]
    async fn rules_only_strong_match_auto_completes() {
        let fx = Fixture::new(MockJudge::verdict(0));
        fx.config.set(DetectionConfig {
            mode: DetectionMode::RulesOnly,
            ..Default::default()
        });
        let action_id = fx.seed_action(&["proposal", "pricing"], None).await;
        // 30 + 20 attachment + 20 outbound + 15 channel + 5 = 90.
        let email_id = fx.seed_email("final proposal with pricing", true);

        let report = fx.detector().detect_from_email(email_id, &scope()).await.unwrap();
        assert_eq!(fx.judge.call_count(), 0);
        assert_eq!(report.completed, 1);
        let completion = fx.action(action_id).await.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::Rules);
    }

    #[tokio::test]
    async fn rescanning_the_same_evidence_does_not_duplicate_suggestions() {
        let fx = Fixture::new(MockJudge::failing());
        fx.seed_action(&["proposal", "pricing"], None).await;
        let email_id = fx.seed_email("proposal is attached below", false);
        let detector = fx.detector();

        let first = detector.detect_from_email(email_id, &scope()).await.unwrap();
        let second = detector.detect_from_email(email_id, &scope()).await.unwrap();
        assert_eq!(first.suggested, 1);
        assert_eq!(second.suggested, 0);
        assert_eq!(fx.suggestions.pending_count(), 1);
    }

    #[tokio::test]
    async fn manual_mode_scans_nothing() {
        let fx = Fixture::new(MockJudge::verdict(99));
        fx.config.set(DetectionConfig { mode: DetectionMode::Manual, ..Default::default() });
        fx.seed_action(&["proposal"], None).await;
        let email_id = fx.seed_email("final proposal", true);

        let report = fx.detector().detect_from_email(email_id, &scope()).await.unwrap();
        assert_eq!(report.scanned, 0);
    }

    #[tokio::test]
    async fn accepting_a_suggestion_completes_the_action() {
        let fx = Fixture::new(MockJudge::failing());
        let action_id = fx.seed_action(&["proposal", "pricing"], None).await;
        let email_id = fx.seed_email("proposal is attached below", false);
        let detector = fx.detector();
        detector.detect_from_email(email_id, &scope()).await.unwrap();

        let suggestion_id = fx.suggestions.first_pending_id().unwrap();
        detector.accept_suggestion(suggestion_id, &scope()).await.unwrap();

        let action = fx.action(action_id).await;
        assert!(!action.is_open());
        let completion = action.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::SuggestionAccepted);
        assert!(!completion.auto_completed);
    }

    #[tokio::test]
    async fn dismissing_a_suggestion_keeps_the_action_open() {
        let fx = Fixture::new(MockJudge::failing());
        let action_id = fx.seed_action(&["proposal", "pricing"], None).await;
        let email_id = fx.seed_email("proposal is attached below", false);
        let detector = fx.detector();
        detector.detect_from_email(email_id, &scope()).await.unwrap();

        let suggestion_id = fx.suggestions.first_pending_id().unwrap();
        detector.dismiss_suggestion(suggestion_id, &scope()).await.unwrap();
        assert!(fx.action(action_id).await.is_open());

        // Terminal: a second resolution is rejected.
        let err = detector.accept_suggestion(suggestion_id, &scope()).await.unwrap_err();
        assert_eq!(
            err.code,
            crate::domain::foundation::ErrorCode::SuggestionAlreadyResolved
        );
    }

    #[tokio::test]
    async fn targeted_check_without_suggested_content_completes_without_the_judge() {
        let fx = Fixture::new(MockJudge::verdict(0));
        let action_id = fx.seed_action(&["proposal"], None).await;
        let email_id = fx.seed_email("anything at all", false);

        let outcome = fx
            .detector()
            .detect_from_email_for_action(action_id, email_id, &scope())
            .await
            .unwrap();
        assert!(outcome.action_completed);
        assert_eq!(outcome.confidence, NO_SUGGESTION_CONFIDENCE);
        assert_eq!(fx.judge.call_count(), 0);
    }

    #[tokio::test]
    async fn targeted_check_completes_on_a_confident_verdict() {
        let fx = Fixture::new(MockJudge::verdict(82));
        let action_id = fx.seed_action(&["proposal"], Some("Send the full proposal")).await;
        let email_id = fx.seed_email("here is the full proposal", false);

        let outcome = fx
            .detector()
            .detect_from_email_for_action(action_id, email_id, &scope())
            .await
            .unwrap();
        assert!(outcome.action_completed);
        let completion = fx.action(action_id).await.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::AiContentCheck);
        assert_eq!(completion.confidence, 82);
    }

    #[tokio::test]
    async fn targeted_check_parks_a_low_verdict_as_a_suggestion() {
        let fx = Fixture::new(MockJudge::verdict(40));
        let action_id = fx.seed_action(&["proposal"], Some("Send the full proposal")).await;
        let email_id = fx.seed_email("completely unrelated note", false);

        let outcome = fx
            .detector()
            .detect_from_email_for_action(action_id, email_id, &scope())
            .await
            .unwrap();
        assert!(!outcome.action_completed);
        assert!(fx.action(action_id).await.is_open());
        assert_eq!(fx.suggestions.pending_count(), 1);
    }

    #[tokio::test]
    async fn targeted_check_survives_a_judge_outage() {
        let fx = Fixture::new(MockJudge::failing());
        let action_id = fx.seed_action(&["proposal"], Some("Send the full proposal")).await;
        let email_id = fx.seed_email("here is the proposal", false);

        let outcome = fx
            .detector()
            .detect_from_email_for_action(action_id, email_id, &scope())
            .await
            .unwrap();
        assert!(outcome.action_completed);
        assert_eq!(outcome.confidence, AI_UNAVAILABLE_CONFIDENCE);
        let completion = fx.action(action_id).await.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::SendCompletion);
    }

    #[tokio::test]
    async fn targeted_check_with_detection_disabled_completes_on_send() {
        let fx = Fixture::new(MockJudge::verdict(0));
        fx.config.set(DetectionConfig { mode: DetectionMode::Manual, ..Default::default() });
        let action_id = fx.seed_action(&["proposal"], Some("Send the full proposal")).await;
        let email_id = fx.seed_email("anything", false);

        let outcome = fx
            .detector()
            .detect_from_email_for_action(action_id, email_id, &scope())
            .await
            .unwrap();
        assert!(outcome.action_completed);
        assert_eq!(fx.judge.call_count(), 0);
        let completion = fx.action(action_id).await.completion.unwrap();
        assert_eq!(completion.source, CompletionSource::SendCompletion);
        assert!(!completion.auto_completed);
    }
}

use std::fmt;

use content::ScenarioProvider;
use trainer_core::Clock;
use trainer_core::model::{ScenarioId, TrainerSettings};

use crate::error::{CoordinatorError, ScenarioError};
use crate::progress::ProgressTracker;
use crate::quiz::{QuizSession, QuizStep};
use crate::scenario::{ChoiceOutcome, ScenarioResult, ScenarioSession, StepTransition};
use crate::view::{FeedbackView, Renderer, ResultsPresenter};

/// Which screen the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Landing,
    Game,
    Quiz,
    Results,
}

/// Owns the active scenario, the quiz that follows it and the progress tracker,
/// and keeps the renderer and presenter in step with them.
///
/// At most one scenario session is live; selecting another replaces it.
pub struct SessionCoordinator<R, P> {
    provider: Box<dyn ScenarioProvider>,
    renderer: R,
    presenter: P,
    settings: TrainerSettings,
    clock: Clock,
    tracker: ProgressTracker,
    screen: Screen,
    current: Option<ScenarioId>,
    session: Option<ScenarioSession>,
    quiz: Option<QuizSession>,
}

impl<R: Renderer, P: ResultsPresenter> SessionCoordinator<R, P> {
    #[must_use]
    pub fn new(provider: Box<dyn ScenarioProvider>, renderer: R, presenter: P) -> Self {
        let settings = TrainerSettings::default();
        Self {
            provider,
            renderer,
            presenter,
            tracker: ProgressTracker::new(settings.clone()),
            settings,
            clock: Clock::System,
            screen: Screen::Landing,
            current: None,
            session: None,
            quiz: None,
        }
    }

    /// Replace the settings; the tracker starts over with them.
    #[must_use]
    pub fn with_settings(mut self, settings: TrainerSettings) -> Self {
        self.tracker = ProgressTracker::new(settings.clone());
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn current_scenario(&self) -> Option<&ScenarioId> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&ScenarioSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    #[must_use]
    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Identifiers the content provider can load.
    #[must_use]
    pub fn available_scenarios(&self) -> Vec<ScenarioId> {
        self.provider.scenario_ids()
    }

    /// Load `id`, start a fresh session on it and switch to the game screen.
    ///
    /// The previous session is only torn down once the new one has started.
    ///
    /// # Errors
    ///
    /// Returns `CoordinatorError::ScenarioNotFound` for an unknown id, or the
    /// content/scenario error that stopped the new session. Nothing changes on error.
    pub fn select_scenario(&mut self, id: &ScenarioId) -> Result<(), CoordinatorError> {
        let definition = self.provider.load(id).inspect_err(|err| {
            log::warn!("failed to load scenario {id}: {err}");
        })?;

        let now = self.clock.now();
        let mut session = ScenarioSession::new();
        session.start(definition, now)?;

        if let Some(mut previous) = self.session.replace(session) {
            previous.cleanup();
        }
        self.quiz = None;
        self.current = Some(id.clone());
        self.tracker.start_scenario(now);
        self.screen = Screen::Game;
        log::info!("scenario {id} started");

        self.renderer.clear_feedback();
        self.render_step();
        Ok(())
    }

    /// Start the current scenario over. Does nothing when none was selected.
    ///
    /// # Errors
    ///
    /// Propagates errors from reloading the scenario.
    pub fn restart(&mut self) -> Result<(), CoordinatorError> {
        let Some(id) = self.current.clone() else {
            return Ok(());
        };
        log::info!("restarting scenario {id}");
        self.select_scenario(&id)
    }

    /// Route a choice to the active session and show its feedback.
    ///
    /// Returns `Ok(None)` when no session is live or the scenario already finished.
    ///
    /// # Errors
    ///
    /// Returns the session's rejection (`UnknownChoice`, `StepAlreadyAnswered`);
    /// the session is unchanged.
    pub fn handle_choice(
        &mut self,
        choice_id: &str,
    ) -> Result<Option<ChoiceOutcome>, CoordinatorError> {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return Ok(None);
        };
        let outcome = session
            .handle_choice(choice_id, &mut self.tracker, self.clock.now())
            .inspect_err(|err| log::warn!("choice rejected: {err}"))?;

        let delay = self.settings.choice_feedback_delay_ms();
        self.renderer
            .show_feedback(&FeedbackView::from_outcome(&outcome, delay));
        Ok(Some(outcome))
    }

    /// Move the active session to its next step.
    ///
    /// Finishing the last step opens the quiz when the scenario has one, and
    /// otherwise presents the results. Returns `Ok(None)` when no session is live
    /// or the scenario already finished.
    ///
    /// # Errors
    ///
    /// Returns errors from starting the follow-up quiz.
    pub fn advance(&mut self) -> Result<Option<StepTransition>, CoordinatorError> {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return Ok(None);
        };
        let transition = session.advance(self.clock.now())?;
        self.renderer.clear_feedback();

        match &transition {
            StepTransition::Next { step_index } => {
                log::debug!("advanced to step {step_index}");
                self.render_step();
            }
            StepTransition::Completed(result) => self.finish_scenario(result)?,
        }
        Ok(Some(transition))
    }

    fn finish_scenario(&mut self, result: &ScenarioResult) -> Result<(), CoordinatorError> {
        let questions = self
            .session
            .as_ref()
            .and_then(ScenarioSession::definition)
            .map(|d| d.quiz_questions.clone())
            .unwrap_or_default();

        if result.has_quiz && !questions.is_empty() {
            let quiz = QuizSession::start(questions, self.clock.now())?;
            if let Some(view) = quiz.current_question_view() {
                self.renderer.render_question(&view);
            }
            self.quiz = Some(quiz);
            self.screen = Screen::Quiz;
            log::info!("scenario finished, starting quiz");
            return Ok(());
        }

        let id = self.current.clone().ok_or(ScenarioError::NotActive)?;
        let summary = self.tracker.complete_scenario(&id, self.clock.now());
        self.presenter.present_results(&summary, result);
        self.screen = Screen::Results;
        log::info!("scenario {id} finished at {}%", result.final_score);
        Ok(())
    }

    /// Answer the current quiz question; `None` skips it.
    ///
    /// Returns `Ok(None)` when no quiz is running or the quiz already finished.
    ///
    /// # Errors
    ///
    /// Returns `ScenarioError::NotActive` if the quiz has no scenario to credit.
    pub fn submit_quiz_answer(
        &mut self,
        selected: Option<usize>,
    ) -> Result<Option<QuizStep>, CoordinatorError> {
        let Some(quiz) = self.quiz.as_mut().filter(|q| !q.is_complete()) else {
            return Ok(None);
        };
        let step = quiz.submit_answer(selected, self.clock.now())?;

        let delay = self.settings.quiz_feedback_delay_ms();
        self.renderer.show_feedback(&FeedbackView::from_quiz_answer(
            step.answer(),
            step.explanation(),
            delay,
        ));

        match &step {
            QuizStep::Next { .. } => {
                if let Some(view) = self.quiz.as_ref().and_then(QuizSession::current_question_view)
                {
                    self.renderer.render_question(&view);
                }
            }
            QuizStep::Completed { scorecard, .. } => {
                let id = self.current.clone().ok_or(ScenarioError::NotActive)?;
                let summary = self.tracker.complete_scenario(&id, self.clock.now());
                self.presenter.present_scorecard(scorecard, &summary);
                self.screen = Screen::Results;
                log::info!("quiz for {id} finished at {}%", scorecard.score);
            }
        }
        Ok(Some(step))
    }

    /// # Errors
    ///
    /// Same as `submit_quiz_answer`.
    pub fn skip_quiz_question(&mut self) -> Result<Option<QuizStep>, CoordinatorError> {
        self.submit_quiz_answer(None)
    }

    /// Run the current quiz again from its first question.
    pub fn retake_quiz(&mut self) {
        let now = self.clock.now();
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        quiz.retake(now);
        self.screen = Screen::Quiz;
        self.renderer.clear_feedback();
        if let Some(view) = self.quiz.as_ref().and_then(QuizSession::current_question_view) {
            self.renderer.render_question(&view);
        }
        log::info!("quiz retake started");
    }

    /// Abandon everything in flight and return to the landing screen.
    pub fn go_home(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.cleanup();
        }
        self.quiz = None;
        self.current = None;
        self.tracker.reset();
        self.screen = Screen::Landing;
        self.renderer.clear_feedback();
        log::info!("returned to landing");
    }

    fn render_step(&mut self) {
        if let Some(view) = self
            .session
            .as_ref()
            .and_then(ScenarioSession::current_step_view)
        {
            self.renderer.render_step(&view);
        }
    }
}

impl<R, P> fmt::Debug for SessionCoordinator<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCoordinator")
            .field("screen", &self.screen)
            .field("current", &self.current)
            .field("session", &self.session)
            .field("quiz", &self.quiz)
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use content::{ContentError, ScenarioRegistry};
    use trainer_core::model::{Choice, DefinitionError, QuizQuestion, ScenarioDefinition, Step};
    use trainer_core::time::fixed_clock;

    use crate::progress::ResultsSummary;
    use crate::quiz::QuizScorecard;
    use crate::view::{QuestionView, StepView};

    #[derive(Debug, Default)]
    struct Log {
        steps: Vec<String>,
        feedback: Vec<String>,
        questions: Vec<usize>,
        clears: usize,
    }

    impl Renderer for Log {
        fn render_step(&mut self, view: &StepView) {
            self.steps.push(view.title.clone());
        }
        fn show_feedback(&mut self, view: &FeedbackView) {
            self.feedback.push(view.label.clone());
        }
        fn clear_feedback(&mut self) {
            self.clears += 1;
        }
        fn render_question(&mut self, view: &QuestionView) {
            self.questions.push(view.index);
        }
    }

    #[derive(Debug, Default)]
    struct Results {
        summaries: Vec<ResultsSummary>,
        scenario_scores: Vec<u32>,
        quiz_scores: Vec<u32>,
    }

    impl ResultsPresenter for Results {
        fn present_results(&mut self, summary: &ResultsSummary, result: &ScenarioResult) {
            self.summaries.push(summary.clone());
            self.scenario_scores.push(result.final_score);
        }
        fn present_scorecard(&mut self, scorecard: &QuizScorecard, summary: &ResultsSummary) {
            self.summaries.push(summary.clone());
            self.quiz_scores.push(scorecard.score);
        }
    }

    fn plain() -> ScenarioDefinition {
        ScenarioDefinition::new("Plain", "No quiz").with_step(
            Step::new("Only", "")
                .with_choice(Choice::new("bad", "Bad", -20))
                .with_choice(Choice::new("good", "Good", 30)),
        )
    }

    fn quizzed() -> ScenarioDefinition {
        plain()
            .with_step(Step::new("Recap", "read"))
            .with_quiz_question(QuizQuestion::new("Q1", vec!["a".into(), "b".into()], 1))
            .with_quiz_question(QuizQuestion::new("Q2", vec!["a".into(), "b".into()], 0))
    }

    fn coordinator() -> SessionCoordinator<Log, Results> {
        let mut registry = ScenarioRegistry::new();
        registry.register("plain", plain);
        registry.register("quizzed", quizzed);
        SessionCoordinator::new(Box::new(registry), Log::default(), Results::default())
            .with_clock(fixed_clock())
    }

    #[test]
    fn selecting_starts_game_and_renders_first_step() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        assert_eq!(c.screen(), Screen::Game);
        assert_eq!(c.current_scenario().map(ScenarioId::as_str), Some("plain"));
        assert_eq!(c.renderer().steps, vec!["Only"]);
        assert!(c.session().unwrap().is_active());
    }

    #[test]
    fn unknown_scenario_leaves_state_alone() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        c.handle_choice("good").unwrap();

        let err = c.select_scenario(&ScenarioId::new("malware")).unwrap_err();
        assert_eq!(err, CoordinatorError::ScenarioNotFound("malware".into()));
        assert_eq!(c.screen(), Screen::Game);
        assert_eq!(c.current_scenario().map(ScenarioId::as_str), Some("plain"));
        assert_eq!(c.session().unwrap().score(), 30);
    }

    #[test]
    fn invalid_definition_leaves_state_alone() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        c.handle_choice("good").unwrap();
        let tracked = c.tracker().snapshot();

        let mut registry = ScenarioRegistry::new();
        registry.register("plain", plain);
        registry.register("broken", || ScenarioDefinition::new("Broken", "no steps"));
        c.provider = Box::new(registry);

        let err = c.select_scenario(&ScenarioId::new("broken")).unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::Content(ContentError::Definition(DefinitionError::NoSteps))
        ));
        assert_eq!(c.screen(), Screen::Game);
        assert_eq!(c.current_scenario().map(ScenarioId::as_str), Some("plain"));
        assert!(c.session().unwrap().is_active());
        assert_eq!(c.session().unwrap().score(), 30);
        assert_eq!(c.tracker().snapshot(), tracked);
        assert_eq!(c.renderer().steps, vec!["Only"]);
    }

    #[test]
    fn calls_after_completion_are_no_ops() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("quizzed")).unwrap();
        c.handle_choice("good").unwrap();
        c.advance().unwrap();
        c.advance().unwrap();
        assert_eq!(c.screen(), Screen::Quiz);

        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.handle_choice("good").unwrap(), None);
        assert_eq!(c.screen(), Screen::Quiz);

        c.submit_quiz_answer(Some(1)).unwrap();
        c.submit_quiz_answer(Some(0)).unwrap();
        assert_eq!(c.screen(), Screen::Results);
        let feedback = c.renderer().feedback.len();

        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.handle_choice("bad").unwrap(), None);
        assert_eq!(c.submit_quiz_answer(Some(0)).unwrap(), None);
        assert_eq!(c.skip_quiz_question().unwrap(), None);
        assert_eq!(c.screen(), Screen::Results);
        assert_eq!(c.renderer().feedback.len(), feedback);
        assert_eq!(c.presenter().quiz_scores, vec![100]);
        assert_eq!(c.tracker().snapshot().total_completed, 1);
    }

    #[test]
    fn calls_without_a_session_are_no_ops() {
        let mut c = coordinator();
        assert_eq!(c.handle_choice("good").unwrap(), None);
        assert_eq!(c.advance().unwrap(), None);
        assert_eq!(c.submit_quiz_answer(Some(0)).unwrap(), None);
        c.restart().unwrap();
        c.retake_quiz();
        assert_eq!(c.screen(), Screen::Landing);
        assert!(c.renderer().steps.is_empty());
    }

    #[test]
    fn scenario_without_quiz_goes_to_results() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        let outcome = c.handle_choice("good").unwrap().unwrap();
        assert!(outcome.correct);
        assert!(c.advance().unwrap().unwrap().is_completed());

        assert_eq!(c.screen(), Screen::Results);
        assert_eq!(c.presenter().scenario_scores, vec![100]);
        assert_eq!(c.presenter().summaries[0].percentage, 100);
        assert_eq!(c.tracker().level(), 1);
        assert!(c.tracker().has_completed(&ScenarioId::new("plain")));
    }

    #[test]
    fn scenario_with_quiz_moves_to_quiz_then_results() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("quizzed")).unwrap();
        c.handle_choice("bad").unwrap();
        c.advance().unwrap();
        c.advance().unwrap();

        assert_eq!(c.screen(), Screen::Quiz);
        assert_eq!(c.renderer().questions, vec![0]);
        assert!(c.presenter().summaries.is_empty());

        c.submit_quiz_answer(Some(1)).unwrap();
        assert_eq!(c.renderer().questions, vec![0, 1]);
        let step = c.skip_quiz_question().unwrap().unwrap();
        assert!(matches!(step, QuizStep::Completed { .. }));

        assert_eq!(c.screen(), Screen::Results);
        assert_eq!(c.presenter().quiz_scores, vec![50]);
        let summary = &c.presenter().summaries[0];
        assert_eq!(summary.total_questions, 1);
        assert_eq!(summary.correct_answers, 0);
        assert!(c.tracker().has_completed(&ScenarioId::new("quizzed")));
    }

    #[test]
    fn retake_returns_to_quiz() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("quizzed")).unwrap();
        c.advance().unwrap();
        c.advance().unwrap();
        c.skip_quiz_question().unwrap();
        c.skip_quiz_question().unwrap();
        assert_eq!(c.screen(), Screen::Results);

        c.retake_quiz();
        assert_eq!(c.screen(), Screen::Quiz);
        assert!(c.quiz().unwrap().answers().is_empty());
        assert_eq!(c.renderer().questions.last(), Some(&0));
    }

    #[test]
    fn restart_reloads_current_scenario() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        c.handle_choice("good").unwrap();
        c.restart().unwrap();
        assert_eq!(c.session().unwrap().score(), 0);
        assert_eq!(c.tracker().total_questions(), 0);
        assert_eq!(c.renderer().steps, vec!["Only", "Only"]);
    }

    #[test]
    fn go_home_resets_but_remembers_completions() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        c.handle_choice("good").unwrap();
        c.advance().unwrap();

        c.go_home();
        assert_eq!(c.screen(), Screen::Landing);
        assert!(c.session().is_none());
        assert!(c.current_scenario().is_none());
        assert_eq!(c.tracker().score(), 0);
        assert_eq!(c.tracker().snapshot().total_completed, 1);
    }

    #[test]
    fn rejected_choice_surfaces_error() {
        let mut c = coordinator();
        c.select_scenario(&ScenarioId::new("plain")).unwrap();
        let err = c.handle_choice("nope").unwrap_err();
        assert!(matches!(
            err,
            CoordinatorError::Scenario(ScenarioError::UnknownChoice { .. })
        ));
        assert!(c.renderer().feedback.is_empty());
    }

    #[test]
    fn available_scenarios_come_from_provider() {
        let c = coordinator();
        let ids: Vec<String> = c
            .available_scenarios()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["plain", "quizzed"]);
    }
}

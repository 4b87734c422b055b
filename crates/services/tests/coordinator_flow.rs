use content::ScenarioRegistry;
use services::{
    FeedbackView, QuestionView, QuizScorecard, Renderer, ResultsPresenter, ResultsSummary,
    ScenarioResult, Screen, SessionCoordinator, StepView,
};
use trainer_core::model::{ScenarioId, TrainerSettings};
use trainer_core::scoring::Tone;
use trainer_core::time::fixed_clock;

#[derive(Debug, Default)]
struct RecordingRenderer {
    steps: Vec<StepView>,
    feedback: Vec<FeedbackView>,
    questions: Vec<QuestionView>,
}

impl Renderer for RecordingRenderer {
    fn render_step(&mut self, view: &StepView) {
        self.steps.push(view.clone());
    }

    fn show_feedback(&mut self, view: &FeedbackView) {
        self.feedback.push(view.clone());
    }

    fn clear_feedback(&mut self) {}

    fn render_question(&mut self, view: &QuestionView) {
        self.questions.push(view.clone());
    }
}

#[derive(Debug, Default)]
struct RecordingPresenter {
    results: Vec<(ResultsSummary, ScenarioResult)>,
    scorecards: Vec<(QuizScorecard, ResultsSummary)>,
}

impl ResultsPresenter for RecordingPresenter {
    fn present_results(&mut self, summary: &ResultsSummary, result: &ScenarioResult) {
        self.results.push((summary.clone(), result.clone()));
    }

    fn present_scorecard(&mut self, scorecard: &QuizScorecard, summary: &ResultsSummary) {
        self.scorecards.push((scorecard.clone(), summary.clone()));
    }
}

fn coordinator() -> SessionCoordinator<RecordingRenderer, RecordingPresenter> {
    SessionCoordinator::new(
        Box::new(ScenarioRegistry::with_builtin()),
        RecordingRenderer::default(),
        RecordingPresenter::default(),
    )
    .with_clock(fixed_clock())
}

#[test]
fn phishing_best_path_then_perfect_quiz() {
    let mut c = coordinator();
    c.select_scenario(&ScenarioId::new("phishing")).unwrap();
    assert_eq!(c.renderer().steps[0].title, "Suspicious Email Alert");

    c.handle_choice("call_bank").unwrap();
    assert_eq!(c.renderer().feedback[0].tone, Tone::Positive);
    assert_eq!(c.renderer().feedback[0].delay_ms, 1_500);
    c.advance().unwrap();
    c.handle_choice("understand").unwrap();
    c.advance().unwrap();

    let result = c.session().and_then(|s| s.result()).unwrap();
    assert_eq!(result.final_score, 100);
    assert_eq!(c.screen(), Screen::Quiz);

    c.submit_quiz_answer(Some(1)).unwrap();
    c.submit_quiz_answer(Some(2)).unwrap();
    assert_eq!(c.screen(), Screen::Results);

    let (scorecard, summary) = &c.presenter().scorecards[0];
    assert_eq!(scorecard.score, 100);
    assert_eq!(scorecard.title, "Excellent!");
    assert_eq!(summary.percentage, 100);
    assert_eq!(summary.total_questions, 2);
    assert_eq!(c.tracker().score(), 20);
}

#[test]
fn detailed_feedback_is_flagged() {
    let mut c = coordinator();
    c.select_scenario(&ScenarioId::new("phishing")).unwrap();
    let outcome = c.handle_choice("click_link").unwrap().unwrap();
    assert!(outcome.detailed);
    let feedback = &c.renderer().feedback[0];
    assert!(feedback.detailed);
    assert_eq!(feedback.tone, Tone::Negative);
    assert!(feedback.education.is_some());
}

#[test]
fn ransomware_worst_path_scores_zero() {
    let mut c = coordinator();
    c.select_scenario(&ScenarioId::new("ransomware")).unwrap();
    for choice in ["download_anyway", "pay_ransom", "no_backup", "need_help"] {
        c.handle_choice(choice).unwrap();
        c.advance().unwrap();
    }
    let result = c.session().and_then(|s| s.result()).unwrap();
    assert_eq!(result.score, -55);
    assert_eq!(result.final_score, 0);
    assert_eq!(c.quiz().unwrap().questions().len(), 5);
}

#[test]
fn three_distinct_completions_reach_level_two() {
    let mut c = coordinator();
    for id in ["phishing", "ransomware", "databreach"] {
        c.select_scenario(&ScenarioId::new(id)).unwrap();
        while c.session().is_some_and(|s| s.is_active()) {
            c.advance().unwrap();
        }
        while c.screen() == Screen::Quiz {
            c.skip_quiz_question().unwrap();
        }
    }
    assert_eq!(c.tracker().level(), 2);
    assert_eq!(c.presenter().scorecards.len(), 3);
    assert!(c.presenter().scorecards.iter().all(|(card, _)| card.score == 0));
}

#[test]
fn switching_scenarios_mid_run_discards_old_session() {
    let mut c = coordinator();
    c.select_scenario(&ScenarioId::new("phishing")).unwrap();
    c.handle_choice("call_bank").unwrap();

    c.select_scenario(&ScenarioId::new("databreach")).unwrap();
    let session = c.session().unwrap();
    assert_eq!(session.definition().unwrap().title, "Data Breach Response");
    assert_eq!(session.score(), 0);
    assert!(c.handle_choice("call_bank").is_err());
    c.handle_choice("enable_2fa").unwrap();
    assert_eq!(c.session().unwrap().score(), 30);
}

#[test]
fn quiz_feedback_uses_quiz_delay() {
    let settings = TrainerSettings::new(10, 3, 0, 750).unwrap();
    let mut c = coordinator().with_settings(settings);
    c.select_scenario(&ScenarioId::new("phishing")).unwrap();
    c.advance().unwrap();
    c.advance().unwrap();
    c.submit_quiz_answer(Some(0)).unwrap();

    let last = c.renderer().feedback.last().unwrap();
    assert_eq!(last.delay_ms, 750);
    assert_eq!(last.tone, Tone::Negative);
    assert!(last.education.is_some());
    assert_eq!(c.renderer().questions.len(), 2);
}

#[test]
fn results_serialize_for_presenters() {
    let mut c = coordinator();
    c.select_scenario(&ScenarioId::new("databreach")).unwrap();
    c.handle_choice("enable_2fa").unwrap();
    c.advance().unwrap();
    c.handle_choice("credit_freeze").unwrap();
    c.advance().unwrap();
    c.handle_choice("research_legal_options").unwrap();
    c.advance().unwrap();
    c.submit_quiz_answer(Some(1)).unwrap();
    c.submit_quiz_answer(Some(2)).unwrap();
    c.submit_quiz_answer(Some(2)).unwrap();

    let (scorecard, summary) = &c.presenter().scorecards[0];
    let json = serde_json::to_value(scorecard).unwrap();
    assert_eq!(json["score"], 100);
    assert_eq!(json["band"], "excellent");
    assert_eq!(json["reviews"][0]["status"], "correct");

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["percentage"], 100);
    assert_eq!(json["elapsed_formatted"], "0m 0s");

    let snapshot = serde_json::to_value(c.tracker().snapshot()).unwrap();
    assert_eq!(snapshot["completed_scenarios"][0], "databreach");
}

use std::thread;
use std::time::Duration;

use services::{
    FeedbackView, QuestionView, QuizScorecard, Renderer, ResultsPresenter, ResultsSummary,
    ScenarioResult, StepView,
};
use trainer_core::scoring::Tone;

/// Prints steps and feedback to stdout, holding each piece of feedback for its delay.
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render_step(&mut self, view: &StepView) {
        println!();
        println!(
            "[{}] Step {} of {}: {}",
            view.scenario_title,
            view.position(),
            view.step_count,
            view.title
        );
        for line in markup_to_text(&view.content).lines() {
            println!("  {line}");
        }
        for (n, choice) in view.choices.iter().enumerate() {
            println!("  {}. {} ({})", n + 1, choice.text, choice.id);
        }
    }

    fn show_feedback(&mut self, view: &FeedbackView) {
        let marker = match view.tone {
            Tone::Positive => "+",
            Tone::Negative => "-",
            Tone::Neutral => "=",
        };
        println!("  {marker} {}", view.label);
        if let Some(education) = &view.education {
            println!("    {education}");
        }
        if view.delay_ms > 0 {
            thread::sleep(Duration::from_millis(u64::from(view.delay_ms)));
        }
    }

    fn clear_feedback(&mut self) {}

    fn render_question(&mut self, view: &QuestionView) {
        println!();
        println!(
            "Question {} of {} ({}% done): {}",
            view.index + 1,
            view.total,
            view.progress_percent(),
            view.question
        );
        for (n, option) in view.options.iter().enumerate() {
            println!("  {}. {option}", n + 1);
        }
    }
}

pub struct ConsolePresenter;

impl ResultsPresenter for ConsolePresenter {
    fn present_results(&mut self, summary: &ResultsSummary, result: &ScenarioResult) {
        println!();
        println!("== {} ==", summary.title);
        println!("{}", summary.message);
        println!(
            "{}: {}% ({} of {} points), time {}",
            result.title,
            result.final_score,
            result.score,
            result.total_possible_points,
            result.elapsed
        );
        print_summary(summary);
    }

    fn present_scorecard(&mut self, scorecard: &QuizScorecard, summary: &ResultsSummary) {
        println!();
        println!("== {} ==", scorecard.title);
        println!("{}", scorecard.message);
        println!(
            "Quiz: {}% ({} correct, {} incorrect, {} skipped of {}), time {}",
            scorecard.score,
            scorecard.correct,
            scorecard.incorrect,
            scorecard.skipped,
            scorecard.total,
            scorecard.elapsed
        );
        for review in &scorecard.reviews {
            println!(
                "  {:?}: {} -> {}",
                review.status,
                review.preview,
                review.selected.as_deref().unwrap_or("(skipped)")
            );
        }
        print_summary(summary);
    }
}

fn print_summary(summary: &ResultsSummary) {
    println!(
        "Decisions: {}% ({} of {} correct) in {}",
        summary.percentage,
        summary.correct_answers,
        summary.total_questions,
        summary.elapsed_formatted
    );
}

/// Renders step markup as terminal-friendly markdown.
///
/// Entities are decoded by the HTML parser. Trailing spaces are trimmed and
/// runs of blank lines collapse to one.
pub fn markup_to_text(markup: &str) -> String {
    let markdown = html2md::parse_html(markup).replace("\r\n", "\n");
    let mut lines: Vec<&str> = Vec::new();
    for line in markdown.lines().map(|l| l.trim_end_matches([' ', '\t'])) {
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_separate_lines() {
        assert_eq!(markup_to_text("<p>Hello</p>\r\n<p>World</p>"), "Hello\n\nWorld");
        assert_eq!(markup_to_text("plain"), "plain");
        assert_eq!(markup_to_text(""), "");
    }

    #[test]
    fn entities_are_decoded() {
        let text = markup_to_text("<p>Tom &amp; Jerry</p>");
        assert!(text.contains("Tom & Jerry"), "{text}");
        assert!(!text.contains("&amp;"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn angle_bracket_inside_attribute_stays_in_tag() {
        let text = markup_to_text("<a title=\"x>y\">link</a>");
        assert!(text.contains("link"), "{text}");
        assert!(!text.contains("y\""));
    }
}

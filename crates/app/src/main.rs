mod console;

use std::fmt;

use content::{ScenarioProvider, ScenarioRegistry};
use services::{QuizSession, Screen, SessionCoordinator};
use trainer_core::model::{Choice, QuizQuestion, ScenarioId, Step, TrainerSettings};

use console::{ConsolePresenter, ConsoleRenderer};

type Coordinator = SessionCoordinator<ConsoleRenderer, ConsolePresenter>;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidScenario { raw: String },
    InvalidPolicy { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidScenario { raw } => write!(f, "invalid --scenario value: {raw}"),
            ArgsError::InvalidPolicy { raw } => write!(f, "invalid --policy value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play [--scenario <id|all>] [--policy <policy>] [--no-delay]");
    eprintln!("  cargo run -p app -- list");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --scenario phishing");
    eprintln!("  --policy best   (best | worst | first | skip)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAINER_SCENARIO, TRAINER_POLICY, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    List,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// How the autoplayer answers steps and quiz questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    Best,
    Worst,
    First,
    Skip,
}

impl Policy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "best" => Some(Self::Best),
            "worst" => Some(Self::Worst),
            "first" => Some(Self::First),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }

    fn pick_choice(self, step: &Step) -> Option<&Choice> {
        match self {
            Self::Best => step.choices.iter().max_by_key(|c| c.points),
            Self::Worst => step.choices.iter().min_by_key(|c| c.points),
            Self::First => step.choices.first(),
            Self::Skip => None,
        }
    }

    fn pick_answer(self, question: &QuizQuestion) -> Option<usize> {
        match self {
            Self::Best => Some(question.correct_answer),
            Self::Worst => (0..question.options.len()).find(|&i| i != question.correct_answer),
            Self::First => Some(0),
            Self::Skip => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    One(ScenarioId),
    All,
}

impl Target {
    fn parse(raw: &str) -> Result<Self, ArgsError> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        raw.parse::<ScenarioId>()
            .map(Self::One)
            .map_err(|_| ArgsError::InvalidScenario {
                raw: raw.to_string(),
            })
    }
}

struct Args {
    target: Target,
    policy: Policy,
    paced: bool,
}

impl Args {
    fn parse_play(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut target = match std::env::var("TRAINER_SCENARIO") {
            Ok(raw) => Target::parse(&raw)?,
            Err(_) => Target::One(ScenarioId::new("phishing")),
        };
        let mut policy = match std::env::var("TRAINER_POLICY") {
            Ok(raw) => Policy::parse(&raw).ok_or(ArgsError::InvalidPolicy { raw })?,
            Err(_) => Policy::Best,
        };
        let mut paced = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--scenario" => {
                    let value = require_value(args, "--scenario")?;
                    target = Target::parse(&value)?;
                }
                "--policy" => {
                    let value = require_value(args, "--policy")?;
                    policy = Policy::parse(&value)
                        .ok_or(ArgsError::InvalidPolicy { raw: value.clone() })?;
                }
                "--no-delay" => paced = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            target,
            policy,
            paced,
        })
    }
}

fn list(registry: &ScenarioRegistry) -> Result<(), Box<dyn std::error::Error>> {
    for id in registry.scenario_ids() {
        let definition = registry.load(&id)?;
        println!(
            "{id:<12} {} ({} steps, {} quiz questions)",
            definition.title,
            definition.steps.len(),
            definition.quiz_questions.len()
        );
    }
    Ok(())
}

fn play(
    coordinator: &mut Coordinator,
    id: &ScenarioId,
    policy: Policy,
) -> Result<(), Box<dyn std::error::Error>> {
    coordinator.select_scenario(id)?;

    while coordinator.screen() == Screen::Game {
        let pick = coordinator
            .session()
            .and_then(|s| s.current_step())
            .and_then(|step| policy.pick_choice(step))
            .map(|choice| choice.id.to_string());
        if let Some(choice_id) = pick {
            coordinator.handle_choice(&choice_id)?;
        }
        coordinator.advance()?;
    }

    while coordinator.screen() == Screen::Quiz {
        let answer = coordinator
            .quiz()
            .and_then(QuizSession::current_question)
            .and_then(|q| policy.pick_answer(q));
        coordinator.submit_quiz_answer(answer)?;
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let registry = ScenarioRegistry::with_builtin();

    match cmd {
        Command::List => list(&registry),
        Command::Play => {
            let mut iter = argv.into_iter();
            let parsed = Args::parse_play(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;

            let settings = if parsed.paced {
                TrainerSettings::default()
            } else {
                TrainerSettings::default().without_delays()
            };
            let ids = match parsed.target {
                Target::One(id) => vec![id],
                Target::All => registry.scenario_ids(),
            };
            log::info!(
                "playing {} scenario(s) with policy {:?}",
                ids.len(),
                parsed.policy
            );

            let mut coordinator =
                SessionCoordinator::new(Box::new(registry), ConsoleRenderer, ConsolePresenter)
                    .with_settings(settings);
            for id in &ids {
                play(&mut coordinator, id, parsed.policy)?;
            }

            let snapshot = coordinator.tracker().snapshot();
            println!();
            println!(
                "Level {} with {} points; completed {} scenario(s)",
                snapshot.level, snapshot.score, snapshot.total_completed
            );
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Step {
        Step::new("S", "")
            .with_choice(Choice::new("a", "A", 5))
            .with_choice(Choice::new("b", "B", -20))
            .with_choice(Choice::new("c", "C", 30))
    }

    #[test]
    fn policies_pick_expected_choices() {
        let step = step();
        assert_eq!(Policy::Best.pick_choice(&step).unwrap().id.as_str(), "c");
        assert_eq!(Policy::Worst.pick_choice(&step).unwrap().id.as_str(), "b");
        assert_eq!(Policy::First.pick_choice(&step).unwrap().id.as_str(), "a");
        assert!(Policy::Skip.pick_choice(&step).is_none());
    }

    #[test]
    fn worst_answer_avoids_correct_option() {
        let q = QuizQuestion::new("Q", vec!["a".into(), "b".into()], 0);
        assert_eq!(Policy::Worst.pick_answer(&q), Some(1));
        assert_eq!(Policy::Best.pick_answer(&q), Some(0));
        assert_eq!(Policy::Skip.pick_answer(&q), None);
    }

    #[test]
    fn play_args_parse_flags() {
        let mut args = ["--scenario", "ransomware", "--policy", "Worst", "--no-delay"]
            .into_iter()
            .map(String::from);
        let parsed = Args::parse_play(&mut args).unwrap();
        assert_eq!(parsed.target, Target::One(ScenarioId::new("ransomware")));
        assert_eq!(parsed.policy, Policy::Worst);
        assert!(!parsed.paced);
    }

    #[test]
    fn play_args_reject_bad_values() {
        let mut args = ["--policy", "random"].into_iter().map(String::from);
        assert!(matches!(
            Args::parse_play(&mut args),
            Err(ArgsError::InvalidPolicy { .. })
        ));
        let mut args = ["--scenario"].into_iter().map(String::from);
        assert!(matches!(
            Args::parse_play(&mut args),
            Err(ArgsError::MissingValue { flag: "--scenario" })
        ));
        assert_eq!(Target::parse(" ALL ").unwrap(), Target::All);
        assert!(Target::parse("   ").is_err());
    }

    #[test]
    fn autoplay_completes_every_builtin() {
        let mut coordinator = SessionCoordinator::new(
            Box::new(ScenarioRegistry::with_builtin()),
            ConsoleRenderer,
            ConsolePresenter,
        )
        .with_settings(TrainerSettings::default().without_delays());
        for id in ScenarioRegistry::with_builtin().scenario_ids() {
            play(&mut coordinator, &id, Policy::Best).unwrap();
            assert_eq!(coordinator.screen(), Screen::Results);
        }
        assert_eq!(coordinator.tracker().level(), 2);
    }
}

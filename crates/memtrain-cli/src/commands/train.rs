//! The `memtrain train` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use memtrain_core::distractor::MultipleChoice;
use memtrain_core::grader::is_valid_input;
use memtrain_core::model::Level;
use memtrain_core::question::Question;
use memtrain_core::statistics::{format_percentage, SessionStatistics};
use memtrain_core::table::read_table;
use memtrain_core::{Engine, EngineOptions};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{load_config_from, CliConfig};

const INDENT: usize = 6;

pub struct TrainArgs {
    pub csvfile: PathBuf,
    pub tags: Option<String>,
    pub not_tags: Option<String>,
    pub level: Option<String>,
    pub nquestions: Option<i64>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;
    let rows = read_table(&args.csvfile)?;

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let options = EngineOptions {
        level: args.level,
        question_count: args.nquestions,
        tags: args.tags,
        not_tags: args.not_tags,
    };
    let engine = Engine::new(&rows, &options, &mut rng)
        .inspect_err(|e| tracing::debug!(kind = e.kind(), "engine setup failed"))
        .with_context(|| format!("cannot train on {}", args.csvfile.display()))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stats = run_session(&engine, &config, &mut rng, stdin.lock(), stdout.lock())?;

    if let Some(path) = args.summary_json {
        stats.summary(&engine.settings().title).save_json(&path)?;
        tracing::info!(path = %path.display(), "wrote session summary");
    }

    Ok(())
}

/// Ask every question in order, re-prompting on invalid input, then print the summary.
pub fn run_session<R, I, W>(
    engine: &Engine,
    config: &CliConfig,
    rng: &mut R,
    mut input: I,
    mut out: W,
) -> Result<SessionStatistics>
where
    R: Rng + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut stats = engine.session();

    for &(cue_id, response_id) in engine.pairs() {
        let question = engine.question(cue_id, response_id)?;
        let choices = match engine.level() {
            Level::MultipleChoice => Some(engine.choices(&question, rng)?),
            _ => None,
        };

        loop {
            if config.clear_screen {
                queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
            }
            print_header(&mut out, engine, &stats)?;
            print_question(&mut out, &question, choices.as_ref())?;

            let prompt = match engine.level() {
                Level::MultipleChoice => "Enter response choice: ",
                _ => "Enter response: ",
            };
            write!(out, "{prompt}")?;
            out.flush()?;

            let start = Instant::now();
            let answer = read_answer(&mut input)?;
            let elapsed = start.elapsed();

            if !is_valid_input(engine.level(), &answer, choices.as_ref()) {
                writeln!(out, "Please enter a valid response.")?;
                writeln!(out)?;
                continue;
            }

            let grade = engine.grade(&question, &answer, choices.as_ref());
            stats.record(grade.correct, &question.response, elapsed);

            let feedback = question.feedback(&grade);
            writeln!(out, "{}", feedback.verdict)?;
            if let Some(others) = feedback.other_responses {
                writeln!(out, "{}", wrap(&others, config.wrap_width, 0))?;
            }
            writeln!(out)?;
            break;
        }
    }

    print_summary(&mut out, engine, config, &stats)?;
    Ok(stats)
}

fn read_answer<I: BufRead>(input: &mut I) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read response")?;
    if read == 0 {
        anyhow::bail!("input ended before the training session was complete");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_header<W: Write>(out: &mut W, engine: &Engine, stats: &SessionStatistics) -> Result<()> {
    let title = &engine.settings().title;
    if !title.is_empty() {
        writeln!(out, "{title}")?;
    }
    writeln!(out, "{}", engine.level())?;
    writeln!(out, "Response {} of {}", stats.response_number, stats.total)?;
    if stats.answered() > 0 {
        writeln!(
            out,
            "Correct so far: {}/{} ({}%)",
            stats.number_correct,
            stats.answered(),
            format_percentage(stats.running_percentage())
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_question<W: Write>(
    out: &mut W,
    question: &Question,
    choices: Option<&MultipleChoice>,
) -> Result<()> {
    writeln!(out, "{}", question.cue)?;
    writeln!(out)?;

    match question.level {
        Level::MultipleChoice => {
            for (letter, text) in choices.map(MultipleChoice::options).unwrap_or_default() {
                writeln!(out, "{letter})    {text}")?;
            }
            writeln!(out)?;
        }
        Level::Hinted => {
            let mut any = false;
            for hint in question.visible_hints() {
                writeln!(out, "Hint: {hint}")?;
                any = true;
            }
            if any {
                writeln!(out)?;
            }
        }
        Level::Unassisted => {}
    }
    Ok(())
}

fn print_summary<W: Write>(
    out: &mut W,
    engine: &Engine,
    config: &CliConfig,
    stats: &SessionStatistics,
) -> Result<()> {
    let title = &engine.settings().title;
    if !title.is_empty() {
        writeln!(out, "{title}")?;
    }
    writeln!(out)?;
    writeln!(out, "Training session complete.")?;
    writeln!(out)?;
    writeln!(
        out,
        "Correct: {}/{} ({}%)",
        stats.number_correct,
        stats.total,
        format_percentage(stats.final_percentage())
    )?;
    writeln!(
        out,
        "Average response time: {}",
        format_duration(stats.average_time().unwrap_or_default())
    )?;
    writeln!(out)?;

    if stats.number_incorrect > 0 {
        writeln!(out, "Responses for which answers were incorrect:")?;
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            wrap(&stats.incorrect_responses.join(", "), config.wrap_width, INDENT)
        )?;
        writeln!(out)?;
    }
    Ok(())
}

/// `h:mm:ss.s` with hours unpadded.
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let fraction = d.subsec_millis() / 100;
    format!(
        "{}:{:02}:{:02}.{}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        fraction
    )
}

/// Greedy word wrap with every line indented by `indent` spaces.
fn wrap(text: &str, width: usize, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && indent + current.len() + 1 + word.len() > width {
            lines.push(format!("{pad}{current}"));
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(format!("{pad}{current}"));
    }
    lines.join("\n")
}

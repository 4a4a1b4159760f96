//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that formats solver events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end)
//! - **DEBUG**: Phases, progress of the wrappers and every applied move
//! - **TRACE**: Move memory hits
//!
//! The default filter is `cycleforge=info`, which covers every
//! `cycleforge*` crate and the binary; set `RUST_LOG` to override it.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_FILTER: &str = "cycleforge=info";

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CycleForgeConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ____           _      _____
 / ___|   _  ___| | ___|  ___|__  _ __ __ _  ___
| |  | | | |/ __| |/ _ \ |_ / _ \| '__/ _` |/ _ \
| |__| |_| | (__| |  __/  _| (_) | | | (_| |  __/
 \____\__, |\___|_|\___|_|  \___/|_|  \__, |\___|
      |___/                           |___/
"#;

    let version_line = format!(
        "                 v{} - Selective Cycle Local Search\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct CycleForgeConsoleLayer;

impl<S: Subscriber> Layer<S> for CycleForgeConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("cycleforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let level = *metadata.level();
        let output = format_event(&visitor, level);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    solver: Option<String>,
    phase: Option<String>,
    neighborhood: Option<String>,
    kind: Option<String>,
    total_nodes: Option<u64>,
    selection_size: Option<u64>,
    start_node: Option<u64>,
    iterations: Option<u64>,
    iteration: Option<u64>,
    time_limit_ms: Option<u64>,
    runs: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    speed: Option<u64>,
    moves_evaluated: Option<u64>,
    memory_hits: Option<u64>,
    full_scans: Option<u64>,
    remembered: Option<u64>,
    duration_ms: Option<u64>,
    nodes: Option<u64>,
    candidate_count: Option<u64>,
    delta: Option<i64>,
    objective: Option<i64>,
    initial: Option<i64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "solver" => self.solver = Some(s),
            "phase" => self.phase = Some(s),
            "neighborhood" => self.neighborhood = Some(s),
            "kind" => self.kind = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "total_nodes" => self.total_nodes = Some(value),
            "selection_size" => self.selection_size = Some(value),
            "start_node" => self.start_node = Some(value),
            "iterations" => self.iterations = Some(value),
            "iteration" => self.iteration = Some(value),
            "time_limit_ms" => self.time_limit_ms = Some(value),
            "runs" => self.runs = Some(value),
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            "speed" => self.speed = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            "memory_hits" => self.memory_hits = Some(value),
            "full_scans" => self.full_scans = Some(value),
            "remembered" => self.remembered = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "nodes" => self.nodes = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "delta" => self.delta = Some(value),
            "objective" => self.objective = Some(value),
            "initial" => self.initial = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "solver" => self.solver = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "neighborhood" => self.neighborhood = Some(value.to_string()),
            "kind" => self.kind = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "progress" => format_progress(v),
        "step" => format_step(v),
        "memory_hit" => format_memory_hit(v, level),
        "candidate_index" => format_candidate_index(v),
        "" if level == Level::WARN => format_warning(v),
        "" if level == Level::INFO => format_message(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let solver = v.solver.as_deref().unwrap_or("Solver");
    let total = v.total_nodes.unwrap_or(0);
    let selection = v.selection_size.unwrap_or(0);

    let mut output = format!(
        "{} {} {} │ {} of {} nodes",
        format_elapsed(),
        "▶".bright_green().bold(),
        solver.white().bold(),
        format_count(selection).bright_yellow(),
        format_count(total).bright_yellow(),
    );

    if let Some(iterations) = v.iterations {
        output.push_str(&format!(
            " │ {} iterations",
            format_count(iterations).bright_yellow()
        ));
    }

    if let Some(limit) = v.time_limit_ms {
        output.push_str(&format!(
            " │ {} limit",
            format_duration_ms(limit).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let objective = v.objective.map(format_objective);
    let objective = objective.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} steps │ {} moves/s │ objective {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        format_count(v.steps.unwrap_or(0)).white(),
        format_count(v.speed.unwrap_or(0)).bright_magenta().bold(),
        objective.bright_green().bold(),
    );

    if let Some(initial) = v.initial {
        output.push_str(&format!(" (from {})", format_objective(initial)));
    }

    if let Some(runs) = v.runs {
        output.push_str(&format!(" │ {} runs", format_count(runs).white()));
    }

    if let Some(hits) = v.memory_hits.filter(|&hits| hits > 0) {
        output.push_str(&format!(
            " │ {} memory hits / {} scans",
            format_count(hits).bright_cyan(),
            format_count(v.full_scans.unwrap_or(0)).white()
        ));
    }

    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let mut output = format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    );
    if let Some(neighborhood) = &v.neighborhood {
        output.push_str(&format!(" │ {} neighborhood", neighborhood.bright_yellow()));
    }
    output
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let objective = v.objective.map(format_objective).unwrap_or_default();

    format!(
        "{} {} {} ended │ {} steps │ {} scans │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_count(v.steps.unwrap_or(0)).white(),
        format_count(v.full_scans.unwrap_or(0)).white(),
        objective.bright_green(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let objective = v.objective.map(format_objective).unwrap_or_default();
    let counter = match (v.iteration, v.runs) {
        (Some(iteration), _) => format!("iteration {:>8}", format_count(iteration)),
        (None, Some(runs)) => format!("run {:>14}", format_count(runs)),
        (None, None) => String::new(),
    };

    format!(
        "{} {} {} │ new best {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        counter.white(),
        objective.bright_green().bold()
    )
}

fn format_step(v: &EventVisitor) -> String {
    let step = v.step.unwrap_or(0);
    let kind = v.kind.as_deref().unwrap_or("move");
    let delta = v.delta.unwrap_or(0);
    let objective = v.objective.map(format_objective).unwrap_or_default();

    format!(
        "{} {} Step {:>10} │ {:<12} │ {:>8} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        format_count(step).bright_black(),
        kind.bright_black(),
        format_delta(delta),
        objective.bright_black()
    )
}

fn format_memory_hit(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} Memory hit │ {:<12} │ {:>8} │ {} remembered",
        format_elapsed(),
        "↺".bright_cyan(),
        v.kind.as_deref().unwrap_or("move").bright_black(),
        format_delta(v.delta.unwrap_or(0)),
        format_count(v.remembered.unwrap_or(0)).bright_black()
    )
}

fn format_candidate_index(v: &EventVisitor) -> String {
    format!(
        "{} {} Candidate index │ {} nodes │ k = {} │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        format_count(v.nodes.unwrap_or(0)).white(),
        format_count(v.candidate_count.unwrap_or(0)).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let Some(message) = &v.message else {
        return String::new();
    };
    format!(
        "{} {} {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        message.yellow()
    )
}

fn format_message(v: &EventVisitor) -> String {
    let Some(message) = &v.message else {
        return String::new();
    };
    format!("{} {} {}", format_elapsed(), "·".bright_blue(), message.white())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_objective(objective: i64) -> String {
    objective.to_formatted_string(&Locale::en)
}

fn format_delta(delta: i64) -> String {
    let text = delta.to_formatted_string(&Locale::en);
    if delta < 0 {
        text.bright_green().to_string()
    } else if delta > 0 {
        text.bright_red().to_string()
    } else {
        text.white().to_string()
    }
}

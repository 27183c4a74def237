use anyhow::{bail, Context};
use clap::Parser;
use raffle_core::samples::{generate_participants, SampleRoster};
use raffle_core::{
    EasingPreset, Participant, ReelFrame, ReelLayout, SpinEngine, SpinError, SpinnerSettings,
    ThemeConfig, TickOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Spin the raffle reel in the terminal and land on a ticket.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Ticket to land on (e.g. "300000" or "007")
    #[arg(short, long)]
    ticket: String,

    /// Number of generated participants
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// First generated ticket number
    #[arg(long, default_value_t = 1)]
    start_ticket: u64,

    /// Use a standard sample roster (5000, 10000, 25000, 50000 or 100000 entries)
    #[arg(long, conflicts_with_all = ["count", "start_ticket"])]
    sample: Option<usize>,

    /// Minimum spin duration in seconds
    #[arg(short, long, default_value_t = raffle_core::constants::DEFAULT_MIN_SPIN_DURATION_SECS)]
    duration: f64,

    /// Visual laps before landing
    #[arg(short, long, default_value_t = raffle_core::constants::DEFAULT_SPIN_ROTATIONS)]
    rotations: u32,

    /// Easing preset: linear, ease, ease-in, ease-out, ease-in-out, spin
    #[arg(short, long, default_value = "spin")]
    easing: EasingPreset,

    /// Visible reel rows
    #[arg(long, default_value_t = raffle_core::constants::DEFAULT_VISIBLE_ROWS)]
    rows: usize,

    /// Frame rate of the terminal painter
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for generated names
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn build_roster(args: &Args) -> anyhow::Result<Vec<Participant>> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    if let Some(size) = args.sample {
        let preset = SampleRoster::ALL
            .into_iter()
            .find(|s| s.count() == size)
            .with_context(|| format!("no sample roster with {size} entries"))?;
        return Ok(preset.generate(&mut rng));
    }
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    match generate_participants(args.count, args.start_ticket, &mut rng) {
        Some(roster) => Ok(roster),
        None => bail!(
            "--start-ticket {} with --count {} runs past the largest ticket number",
            args.start_ticket,
            args.count
        ),
    }
}

/// Single-line painter: the row under the pointer, rewritten in place.
fn paint_pointer_row(frame: &ReelFrame<'_>, theme: &ThemeConfig) -> anyhow::Result<()> {
    let Some(p) = frame.pointer_participant() else {
        return Ok(());
    };
    let label = if theme.show_ticket_numbers {
        format!("{:<32} #{}", p.display_name(), p.ticket_number)
    } else {
        p.display_name()
    };
    let mut out = std::io::stdout().lock();
    write!(out, "\r  > {label:<48} {:>5.1}%", frame.progress * 100.0)?;
    out.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let roster = build_roster(&args)?;
    log::info!("[native] roster of {} participants", roster.len());

    let settings = SpinnerSettings {
        min_spin_duration_secs: args.duration,
        spin_rotations: args.rotations,
        bezier_curve: args.easing.curve(),
    };
    let theme = ThemeConfig {
        layout: ReelLayout {
            visible_rows: args.rows,
            ..ReelLayout::default()
        },
        ..ThemeConfig::default()
    };

    let mut engine = SpinEngine::new(settings, theme);
    engine.set_participants(roster);

    let winner: Rc<RefCell<Option<Participant>>> = Rc::new(RefCell::new(None));
    let winner_sink = winner.clone();
    engine.set_on_spin_complete(move |p| *winner_sink.borrow_mut() = Some(p.clone()));
    let errors: Rc<RefCell<Vec<SpinError>>> = Rc::new(RefCell::new(Vec::new()));
    let error_sink = errors.clone();
    engine.set_on_error(move |e| error_sink.borrow_mut().push(e.clone()));
    engine.set_on_frame(paint_pointer_row);

    let generation = match engine.spin(&args.ticket) {
        Ok(g) => g,
        Err(e) => {
            if e.is_reported() {
                eprintln!("{e}");
            }
            std::process::exit(2);
        }
    };

    let frame_time = Duration::from_secs_f64(1.0 / args.fps.clamp(1, 240) as f64);
    let epoch = Instant::now();
    loop {
        let frame_start = Instant::now();
        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        match engine.tick(generation, now_ms) {
            TickOutcome::Running { .. } => {}
            TickOutcome::Landed => break,
            TickOutcome::Idle | TickOutcome::Stale => {
                log::warn!("[native] spin stopped without landing");
                break;
            }
        }
        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
    println!();

    for e in errors.borrow().iter() {
        log::warn!("[native] {e}");
    }
    let result = match winner.borrow().as_ref() {
        Some(p) => {
            println!(
                "Winner: {} (ticket {}) after {:.2}s",
                p.display_name(),
                p.ticket_number,
                epoch.elapsed().as_secs_f64()
            );
            Ok(())
        }
        None => bail!("spin ended without a winner"),
    };
    result
}

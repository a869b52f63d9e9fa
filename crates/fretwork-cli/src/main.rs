//! fretwork-cli: fretboard scale explorer for the terminal

use std::env;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fretwork_core::{
    cell_label, classify_board, compute_positions, generate_step_pattern, marker_dots, note_from_name,
    note_name, parse_pattern, permutation_sequence, position_note_range, resolve_key,
    validate_pattern, Accidental, CellClass, DisplayMode, FretCell, Lcg, NoteEvent, PatternReport,
    Position, ResolvedScale, ScaleCatalog, TuningPreset, TOTAL_FRETS,
};

struct Options {
    root: u8,
    scale_key: String,
    preset: TuningPreset,
    position: Option<usize>,
    pattern: Option<String>,
    random_pattern: bool,
    display: DisplayMode,
    accidental: Accidental,
    json: bool,
}

fn usage() -> ! {
    eprintln!("Usage: fretwork <root> <scale> [options]");
    eprintln!();
    eprintln!("  <root>    note name (C, F#, Bb) or pitch class 0-11");
    eprintln!("  <scale>   scale key, e.g. ionian, dorian, pentatonic_minor");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tuning <key>     guitar6 (default), guitar7, bass5, bass4");
    eprintln!("  --position <n>     focus one position by degree number");
    eprintln!("  --pattern <steps>  validate and walk a step pattern, e.g. \"[2,-1]\"");
    eprintln!("  --random-pattern   generate a step pattern and walk it");
    eprintln!("  --intervals        label cells with interval names instead of letters");
    eprintln!("  --flat             spell accidentals flat");
    eprintln!("  --json             emit machine-readable output");
    eprintln!("  --scales           list known scale keys and exit");
    process::exit(1);
}

fn list_scales(catalog: &ScaleCatalog) {
    for group in &catalog.groups {
        if let Some(label) = &group.label {
            println!("{label}:");
        }
        for key in &group.keys {
            if let Some(scale) = catalog.scale(key) {
                println!("  {:<18} {}", scale.key, scale.name);
            }
        }
    }
}

fn parse_root(text: &str) -> Result<u8> {
    if let Ok(n) = text.parse::<u8>() {
        if n < 12 {
            return Ok(n);
        }
    }
    note_from_name(text).ok_or_else(|| anyhow!("unrecognized root note: {text}"))
}

fn parse_args(args: &[String], catalog: &ScaleCatalog) -> Result<Options> {
    let mut positional = Vec::new();
    let mut options = Options {
        root: 4,
        scale_key: String::new(),
        preset: TuningPreset::Guitar6,
        position: None,
        pattern: None,
        random_pattern: false,
        display: DisplayMode::Letters,
        accidental: Accidental::Sharp,
        json: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tuning" => {
                let key = iter.next().ok_or_else(|| anyhow!("--tuning needs a value"))?;
                options.preset = TuningPreset::from_key(key)
                    .ok_or_else(|| anyhow!("unknown tuning preset: {key}"))?;
            }
            "--position" => {
                let n = iter.next().ok_or_else(|| anyhow!("--position needs a value"))?;
                options.position = Some(n.parse()?);
            }
            "--pattern" => {
                let steps = iter.next().ok_or_else(|| anyhow!("--pattern needs a value"))?;
                options.pattern = Some(steps.clone());
            }
            "--random-pattern" => options.random_pattern = true,
            "--intervals" => options.display = DisplayMode::Intervals,
            "--flat" => options.accidental = Accidental::Flat,
            "--json" => options.json = true,
            "--scales" => {
                list_scales(catalog);
                process::exit(0);
            }
            "--help" | "-h" => usage(),
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() != 2 {
        usage();
    }
    options.root = parse_root(&positional[0])?;
    options.scale_key = positional[1].clone();
    Ok(options)
}

fn print_board(board: &[Vec<FretCell>], scale: &ResolvedScale, options: &Options) {
    print!("     ");
    for fret in 0..=TOTAL_FRETS {
        print!("{fret:>4}");
    }
    println!();

    // Highest string on top
    for row in board.iter().rev() {
        print!("{:>4} ", note_name(row[0].pitch_class, options.accidental));
        for cell in row {
            let shown = cell.class != CellClass::OutOfScale || scale.key == "chromatic";
            let dimmed = cell.in_position == Some(false);
            if !shown || dimmed {
                print!("{:>4}", "·");
            } else {
                let label = cell_label(cell, options.display, options.accidental);
                if cell.class == CellClass::Root {
                    print!("{:>4}", format!("[{label}]"));
                } else {
                    print!("{label:>4}");
                }
            }
        }
        println!();
    }

    print!("     ");
    for fret in 0..=TOTAL_FRETS {
        let dots = match marker_dots(fret) {
            2 => "::",
            1 => "·",
            _ => "",
        };
        print!("{dots:>4}");
    }
    println!();
}

fn print_positions(positions: &[Position], accidental: Accidental) {
    if positions.is_empty() {
        println!("No positions for this scale.");
        return;
    }
    println!("Positions:");
    for position in positions {
        let windows: Vec<String> = position
            .windows
            .iter()
            .map(|w| format!("{}-{}", w.start, w.end))
            .collect();
        println!(
            "  {} ({:>2})  frets {}",
            position.degree,
            note_name(position.anchor_pitch, accidental),
            windows.join(", ")
        );
    }
}

fn print_sequence(notes: &[NoteEvent], accidental: Accidental) {
    let rendered: Vec<String> = notes
        .iter()
        .map(|n| format!("{}({})", note_name(n.pitch_class, accidental), n.degree))
        .collect();
    println!("Sequence: {}", rendered.join(" "));
}

fn print_report(report: &PatternReport) {
    println!("Pattern {:?} is not playable:", report.steps);
    for check in &report.checks {
        let mark = if check.passed { "pass" } else { "FAIL" };
        println!("  [{mark}] {:<22} {}", check.rule, check.detail);
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scale: &'a ResolvedScale,
    positions: &'a [Position],
    board: &'a [Vec<FretCell>],
    pattern: Option<&'a PatternReport>,
    sequence: &'a [NoteEvent],
}

fn run(options: &Options, catalog: &ScaleCatalog) -> Result<()> {
    let tuning = options.preset.tuning();
    let scale = resolve_key(catalog, &options.scale_key, options.root)?;
    tracing::debug!(scale = %scale.name, root = scale.root, "resolved scale");

    let positions = compute_positions(&scale, tuning, TOTAL_FRETS);
    let selected = match options.position {
        Some(degree) => Some(
            positions
                .iter()
                .find(|p| p.degree == degree)
                .ok_or_else(|| anyhow!("no position with degree {degree}"))?,
        ),
        None => None,
    };

    let board = classify_board(&scale, tuning, selected, TOTAL_FRETS);

    let mut report = None;
    let mut sequence = Vec::new();
    if options.pattern.is_some() || options.random_pattern {
        let walk_position = selected.or_else(|| positions.first());
        let Some(walk_position) = walk_position else {
            bail!("this scale has no positions to walk");
        };
        let notes = position_note_range(&scale, walk_position, tuning);

        let steps = match &options.pattern {
            Some(text) => {
                let steps = parse_pattern(text)?;
                let checked = validate_pattern(&steps, scale.cardinality());
                let valid = checked.is_valid();
                report = Some(checked);
                if valid { Some(steps) } else { None }
            }
            None => {
                let seed = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(1);
                let mut rng = Lcg::new(seed);
                Some(generate_step_pattern(&mut rng, scale.cardinality()))
            }
        };
        if let Some(steps) = steps {
            tracing::debug!(?steps, notes = notes.len(), "walking pattern");
            sequence = permutation_sequence(&notes, &steps);
            if report.is_none() {
                report = Some(validate_pattern(&steps, scale.cardinality()));
            }
        }
    }

    if options.json {
        let out = JsonReport {
            scale: &scale,
            positions: &positions,
            board: &board,
            pattern: report.as_ref(),
            sequence: &sequence,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{} {} (root {})",
        note_name(scale.root, options.accidental),
        scale.name,
        scale.root
    );
    println!();
    print_board(&board, &scale, options);
    println!();
    print_positions(&positions, options.accidental);

    if let Some(report) = &report {
        println!();
        if report.is_valid() {
            println!("Pattern: {:?}", report.steps);
            print_sequence(&sequence, options.accidental);
        } else {
            print_report(report);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let catalog = ScaleCatalog::standard();
    let options = parse_args(&args, &catalog)?;
    run(&options, &catalog)
}

/// Preview — lay out a markup file and paint it to the terminal.
///
/// Usage: preview <markup-file> [--config <path>] [--width <n>] [--slack <n>]
///
/// The file is read as lines and joined with spaces, exactly as narrative
/// source is before it reaches the engine.

use narrative_shell::core::config::ShellConfig;
use narrative_shell::core::engine::join_narrative;
use narrative_shell::core::layout::{layout, line_count};
use narrative_shell::core::markup::lex;
use narrative_shell::core::session::Frame;
use narrative_shell::core::terminal::paint_frame;
use std::path::Path;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let markup_path = args[1].clone();
    let mut config = ShellConfig::default();
    let mut width = None;
    let mut slack = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config = match ShellConfig::load_from_ron(Path::new(&args[i])) {
                    Ok(c) => c,
                    Err(e) => {
                        eprintln!("Error loading config {}: {}", args[i], e);
                        std::process::exit(1);
                    }
                };
            }
            "--width" if i + 1 < args.len() => {
                i += 1;
                width = args[i].parse::<f32>().ok();
            }
            "--slack" if i + 1 < args.len() => {
                i += 1;
                slack = args[i].parse::<f32>().ok();
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Command-line sizes override the config file
    if let Some(w) = width {
        config.text_box.width = w;
    }
    if let Some(s) = slack {
        config.text_box.slack = s;
    }

    let source = match std::fs::read_to_string(&markup_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", markup_path, e);
            std::process::exit(1);
        }
    };
    let lines: Vec<&str> = source.lines().collect();
    let glyphs = lex(&join_narrative(&lines));
    let placed = layout(&glyphs, &config.text_box);
    let lines_used = line_count(&placed, &config.text_box);

    let below = config.text_box.origin_y + lines_used as f32 * config.text_box.line_height + 1.0;
    let frame = Frame {
        text: placed,
        command_line: format!("{} glyphs, {} lines", glyphs.len(), lines_used),
        command_origin: (config.text_box.origin_x, below),
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = paint_frame(&mut stdout, &frame) {
        eprintln!("Error painting: {}", e);
        std::process::exit(1);
    }
    println!();
}

fn print_usage() {
    println!("Usage: preview <markup-file> [--config <path>] [--width <n>] [--slack <n>]");
    println!();
    println!("Markup:");
    println!("  #text#          bold");
    println!("  ~text~          italic");
    println!("  @rrggbbtext@    coloured");
}

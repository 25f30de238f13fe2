/// Interactive ATR console application

use std::path::PathBuf;

use atrmanager::*;
use clap::Parser;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

#[derive(Parser)]
#[command(name = "atr", version, about = "Explore ATR disk images")]
struct Cli {
    /// ATR images to summarize; starts the interactive console when empty
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "cat", "dir", "exit", "export", "help", "info", "load", "ls", "open", "quit",
                "read", "sector",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".atrmanager_history");
        p
    })
}

/// Set up tracing on stderr, honouring RUST_LOG over the -v count
fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if cli.files.is_empty() {
        run_console();
    } else {
        for path in &cli.files {
            println!("{}", path.display());
            match DiskImage::open(path) {
                Ok(image) => println!("{}", image.describe()),
                Err(e) => println!("Error: {}", e),
            }
        }
    }
}

fn run_console() {
    println!("=== ATRManager ===");
    println!("Interactive console for exploring ATR disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl = match Editor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create editor: {}", e);
            return;
        }
    };
    rl.set_helper(Some(CommandCompleter::new()));

    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut image: Option<DiskImage> = None;

    loop {
        let input = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => print_help(),
            "quit" | "exit" => break,
            "open" | "load" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                match DiskImage::open(&parts[1]) {
                    Ok(img) => {
                        println!("Opened: {}", parts[1]);
                        image = Some(img);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "info" => match image {
                Some(ref img) => print_info(img),
                None => println!("No image loaded. Use 'open <path>' first."),
            },
            "dir" | "ls" | "cat" => match image {
                Some(ref img) => list_files(img),
                None => println!("No image loaded."),
            },
            "read" => {
                let Some(ref mut img) = image else {
                    println!("No image loaded.");
                    continue;
                };
                if parts.len() < 2 {
                    println!("Usage: read <filename>");
                    continue;
                }
                match img.find_file(&parts[1]) {
                    Ok(data) => {
                        println!("File: {} ({} bytes)", parts[1], data.len());
                        print_hex_dump(&data, 256);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "export" => {
                let Some(ref mut img) = image else {
                    println!("No image loaded.");
                    continue;
                };
                if parts.len() < 2 {
                    println!("Usage: export <filename> [output_path]");
                    continue;
                }
                let output = parts.get(2).unwrap_or(&parts[1]);
                match img.find_file(&parts[1]) {
                    Ok(data) => match std::fs::write(output, &data) {
                        Ok(()) => println!("Exported {} bytes to {}", data.len(), output),
                        Err(e) => println!("Error writing {}: {}", output, e),
                    },
                    Err(e) => println!("Error: {}", e),
                }
            }
            "sector" => {
                let Some(ref mut img) = image else {
                    println!("No image loaded.");
                    continue;
                };
                let Some(sector) = parts.get(1).and_then(|s| parse_number(s)) else {
                    println!("Usage: sector <number>");
                    continue;
                };
                match img.read_sector(sector) {
                    Ok(data) => {
                        println!("Sector {} ({} bytes):", sector, data.len());
                        print_hex_dump(&data, 256);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            _ => println!("Unknown command: {}. Type 'help' for available commands.", command),
        }
    }

    if let Some(history_path) = history_path() {
        let _ = rl.save_history(&history_path);
    }
    println!("Goodbye!");
}

/// Parse command line input, respecting quoted strings
fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn parse_number(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>                    - Open an ATR image (use quotes for paths with spaces)");
    println!("  info                           - Show header and geometry");
    println!("  dir                            - List files on disk (ls, cat)");
    println!("  read <filename>                - Read and hex dump a file");
    println!("  export <file> [output_path]    - Export a file to the host filesystem");
    println!("  sector <number>                - Read and hex dump a sector (1-based)");
    println!("  help                           - Show this help");
    println!("  quit, exit                     - Exit");
}

fn print_info(image: &DiskImage) {
    let header = image.header();
    let geometry = image.geometry();
    println!("Header: {}", if header.magic_valid { "ATR" } else { "None (raw sectors)" });
    println!("Image size: {} bytes", image.image_size());
    println!("Density: {}", image.density().name());
    println!("Sector size: {} bytes", geometry.sector_size());
    println!("Sectors: {}", geometry.sector_count());
    println!("Data offset: {}", geometry.data_offset());
    println!("CRC: {}", header.crc);
    println!("Flags: {}", header.flags);
}

fn list_files(image: &DiskImage) {
    let entries = image.list_files();
    if entries.is_empty() {
        println!("No files found.");
        return;
    }

    println!("{:<12} {:>4} {:>5} {:>5} {}", "Name", "Slot", "Secs", "Start", "Flags");
    println!("{}", "-".repeat(48));
    for entry in entries {
        println!(
            "{:<12} {:>4} {:>5} {:>5} {}",
            entry.filename(),
            entry.slot,
            entry.sector_count,
            entry.starting_sector,
            entry.flags
        );
    }
}

fn print_hex_dump(data: &[u8], max_bytes: usize) {
    let len = data.len().min(max_bytes);

    for (i, chunk) in data[..len].chunks(16).enumerate() {
        print!("{:04X}: ", i * 16);

        for (j, byte) in chunk.iter().enumerate() {
            print!("{:02X} ", byte);
            if j == 7 {
                print!(" ");
            }
        }

        // Pad if less than 16 bytes
        for j in chunk.len()..16 {
            print!("   ");
            if j == 7 {
                print!(" ");
            }
        }

        print!(" |");
        for byte in chunk {
            let c = if (32..127).contains(byte) { *byte as char } else { '.' };
            print!("{}", c);
        }
        println!("|");
    }

    if data.len() > max_bytes {
        println!("... ({} more bytes)", data.len() - max_bytes);
    }
}

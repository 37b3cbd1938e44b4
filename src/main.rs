// Wisp: single-pass front end with an interactive AST viewer

use std::fs::File;
use std::io::{self, BufReader};
use std::process;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use wisp::parser::errors::{ErrorCode, ParseError};
use wisp::parser::parse::generate_ast;
use wisp::parser::source::{CommentFilter, ReaderLines};
use wisp::printer;
use wisp::ui::App;

#[derive(ClapParser)]
#[command(name = "wisp")]
#[command(about = "Parse a Wisp source file and print its syntax tree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Source file to parse
    #[arg(default_value = "main.wp")]
    file: String,

    /// Print the full indented tree instead of the summary
    #[arg(long)]
    tree: bool,

    /// Explore the tree in an interactive terminal viewer
    #[arg(long, conflicts_with = "tree")]
    tui: bool,

    /// Log progress and a node histogram to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let file = match File::open(&cli.file) {
        Ok(file) => file,
        Err(e) => fail(
            &cli.file,
            ParseError::new(
                ErrorCode::SourceUnavailable,
                format!("Failed to open {}: {}", cli.file, e),
            ),
        ),
    };

    if cli.verbose {
        eprintln!("Parsing {}...", cli.file);
    }

    let lines = CommentFilter::new(ReaderLines::new(BufReader::new(file)));
    let root = match generate_ast(lines) {
        Ok(root) => root,
        Err(e) => fail(&cli.file, e),
    };

    if cli.verbose {
        eprintln!(
            "Parsed successfully. Found {} top-level nodes.",
            root.children.len()
        );
        let mut histogram: Vec<_> = printer::class_histogram(&root).into_iter().collect();
        histogram.sort();
        for (class, count) in histogram {
            eprintln!("  {:<12} {}", class, count);
        }
    }

    if cli.tui {
        // The reader was consumed line by line; the viewer needs the whole text
        let source = std::fs::read_to_string(&cli.file)?;
        return run_viewer(App::new(root, source, cli.file));
    }

    if cli.tree {
        print!("{}", printer::render_tree(&root));
    } else {
        for line in printer::summary(&root) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Print the diagnostic and exit with the error's code.
fn fail(path: &str, error: ParseError) -> ! {
    eprint!("{}", error.report(path));
    process::exit(error.exit_code());
}

fn run_viewer(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

//! blockfolio CLI - edit and render block documents

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use blockfolio::render::{self, HtmlRenderer};
use blockfolio::{
    detect_shape_from_str, ChannelSpeechSource, CommandGrammar, DocumentKind, EditorSession,
    JsonFilePersistence, JsonFormat, Outcome, Phrase, RenderOptions, SpeechOptions,
    VoiceController,
};

#[derive(Parser)]
#[command(name = "blockfolio")]
#[command(version)]
#[command(about = "Edit and render block-based resumes and portfolios", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Document kind, used to seed new or empty documents
    #[arg(long, global = true, value_enum, env = "BLOCKFOLIO_KIND", default_value = "portfolio")]
    kind: KindArg,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Export to all formats (print page, text, JSON)
    Export {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Page title for the print page
        #[arg(long)]
        title: Option<String>,
    },

    /// Render the preview as HTML
    Html {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a standalone page instead of a fragment
        #[arg(long)]
        page: bool,

        /// Render for the print surface
        #[arg(long)]
        print: bool,

        /// Accent color for link labels
        #[arg(long, value_name = "COLOR")]
        accent: Option<String>,
    },

    /// Render as plain text
    Text {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Line width for centering and dash rows
        #[arg(long, default_value = "72")]
        width: usize,
    },

    /// Re-serialize in the current persisted layout
    Json {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Write the portfolio sections layout
        #[arg(long)]
        sections: bool,
    },

    /// Apply typed commands or dictation, then save
    Apply {
        /// Document to edit (created if missing)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Utterances, applied in order
        #[arg(value_name = "UTTERANCE", required = true)]
        utterances: Vec<String>,

        /// Save to a different file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how utterances are recognized
    Parse {
        /// Utterances to recognize
        #[arg(value_name = "UTTERANCE", required = true)]
        utterances: Vec<String>,
    },

    /// Read phrases from stdin, one per line, and apply them
    Listen {
        /// Document to edit (created if missing)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Dispatch commands from interim lines (prefixed with '~')
        #[arg(long)]
        interim: bool,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Resume, seeded with the resume template
    Resume,
    /// Portfolio, seeded with one empty paragraph
    Portfolio,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Resume => DocumentKind::Resume,
            KindArg::Portfolio => DocumentKind::Portfolio,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let kind = DocumentKind::from(cli.kind);

    let result = match cli.command {
        Some(Commands::Export {
            input,
            output,
            title,
        }) => cmd_export(&input, output.as_deref(), title, kind),
        Some(Commands::Html {
            input,
            output,
            page,
            print,
            accent,
        }) => cmd_html(&input, output.as_deref(), page, print, accent, kind),
        Some(Commands::Text {
            input,
            output,
            width,
        }) => cmd_text(&input, output.as_deref(), width, kind),
        Some(Commands::Json {
            input,
            output,
            compact,
            sections,
        }) => cmd_json(&input, output.as_deref(), compact, sections, kind),
        Some(Commands::Apply {
            input,
            utterances,
            output,
            dry_run,
        }) => cmd_apply(&input, &utterances, output.as_deref(), dry_run, kind),
        Some(Commands::Parse { utterances }) => {
            cmd_parse(&utterances);
            Ok(())
        }
        Some(Commands::Listen { input, interim }) => cmd_listen(&input, interim, kind),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, kind),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: preview if input is provided
            if let Some(input) = cli.input {
                cmd_html(&input, None, false, false, None, kind)
            } else {
                println!("{}", "Usage: blockfolio <FILE>".yellow());
                println!("       blockfolio --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_export(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading document...");
    let store = JsonFilePersistence::new(input);
    let session = EditorSession::open(&store, kind)?;

    let mut options = RenderOptions::new();
    if let Some(title) = title {
        options = options.with_page_title(title);
    }

    pb.set_message("Rendering print page...");
    let page = session.export_html(&options)?;
    fs::write(output_dir.join("document.html"), &page)?;
    pb.inc(1);

    pb.set_message("Rendering text...");
    let text = render::to_text(session.document(), &options)?;
    fs::write(output_dir.join("document.txt"), &text)?;
    pb.inc(1);

    pb.set_message("Writing JSON...");
    let json = match kind {
        DocumentKind::Resume => render::to_json(session.document(), JsonFormat::Pretty)?,
        DocumentKind::Portfolio => {
            render::to_sections_json(session.title(), session.document(), JsonFormat::Pretty)?
        }
    };
    fs::write(output_dir.join("document.json"), &json)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} document.html", "├─".dimmed());
    println!("  {} document.txt", "├─".dimmed());
    println!("  {} document.json", "└─".dimmed());

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    page: bool,
    print: bool,
    accent: Option<String>,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = blockfolio::load_file(input, kind)?;

    let mut options = RenderOptions::new();
    if print {
        options = options.for_print();
    }
    if let Some(color) = accent {
        options = options.with_accent_color(color);
    }

    let html = if page {
        render::to_html_page(&doc, &options)?
    } else {
        render::to_html(&doc, &options)?
    };
    write_or_print(output, &html)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    width: usize,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = blockfolio::load_file(input, kind)?;
    let options = RenderOptions::new().with_text_width(width);
    let text = render::to_text(&doc, &options)?;
    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    sections: bool,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if sections {
        let store = JsonFilePersistence::new(input);
        let session = EditorSession::open(&store, kind)?;
        render::to_sections_json(session.title(), session.document(), format)?
    } else {
        let doc = blockfolio::load_file(input, kind)?;
        render::to_json(&doc, format)?
    };
    write_or_print(output, &json)
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Applied => "applied".green().to_string(),
        Outcome::Unchanged => "unchanged".yellow().to_string(),
        Outcome::Forwarded(hint) => format!("{} {:?}", "ui hint".cyan(), hint),
    }
}

fn cmd_apply(
    input: &Path,
    utterances: &[String],
    output: Option<&Path>,
    dry_run: bool,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFilePersistence::new(input);
    let mut session = EditorSession::open(&store, kind)?;
    let grammar = CommandGrammar::new();

    for utterance in utterances {
        let rule = grammar
            .matching_rule(utterance)
            .map(|(name, _)| name)
            .unwrap_or("dictation");
        let outcome = session.handle_utterance(&grammar, utterance);
        println!("{} {} {}", rule.bold(), "→".dimmed(), describe(outcome));
    }

    if dry_run {
        println!();
        println!("{}", render::to_text(session.document(), &RenderOptions::new())?);
        return Ok(());
    }

    if !session.is_dirty() {
        println!("{}", "No changes to save".yellow());
        return Ok(());
    }

    let mut target = JsonFilePersistence::new(output.unwrap_or(input));
    session.save(&mut target)?;
    println!("{} {}", "Saved to".green(), target.path().display());
    Ok(())
}

fn cmd_parse(utterances: &[String]) {
    let grammar = CommandGrammar::new();
    for utterance in utterances {
        match grammar.matching_rule(utterance) {
            Some((name, command)) => {
                println!("{:?} {} {} ({})", utterance, "→".dimmed(), command, name.cyan())
            }
            None => println!("{:?} {} {}", utterance, "→".dimmed(), "dictation".yellow()),
        }
    }
}

fn cmd_listen(
    input: &Path,
    interim: bool,
    kind: DocumentKind,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = JsonFilePersistence::new(input);
    let mut session = EditorSession::open(&store, kind)?;

    let (mut source, tx) = ChannelSpeechSource::piped();
    let reader = std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let phrase = match line.strip_prefix('~') {
                Some(rest) => Phrase::interim(rest),
                None => Phrase::finalized(line),
            };
            if tx.send(phrase).is_err() {
                break;
            }
        }
    });

    println!("{}", "Listening on stdin (Ctrl-D to stop)...".cyan());
    let options = SpeechOptions::new().with_interim_commands(interim);
    let mut controller = VoiceController::new(options);
    let summary = controller.listen(&mut source, &mut session)?;
    if reader.join().is_err() {
        log::warn!("stdin reader thread panicked");
    }

    println!("{}: {}", "Phrases".bold(), summary.phrases);
    println!("{}: {}", "Commands".bold(), summary.commands);
    println!("{}: {}", "Dictations".bold(), summary.dictations);
    println!("{}: {}", "UI hints".bold(), summary.hints);

    if session.is_dirty() {
        session.save(&mut store)?;
        println!("{} {}", "Saved to".green(), store.path().display());
    }
    Ok(())
}

fn cmd_info(input: &Path, json: bool, kind: DocumentKind) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let shape = detect_shape_from_str(&content)?;
    let doc = blockfolio::parse_json(&content, kind)?;
    let result = HtmlRenderer::new(RenderOptions::new()).render_with_stats(&doc)?;
    let stats = result.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Layout".bold(), shape);
    println!("{}: {}", "Blocks".bold(), doc.block_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Link lists".bold(), stats.link_list_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Dividers".bold(), stats.divider_count);
    println!("{}: {}", "Bullets".bold(), stats.bullet_count);
    println!("{}: {}", "Title rows".bold(), stats.dash_row_count);
    println!("{}: {}", "Words".bold(), doc.word_count());
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "blockfolio".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Block document editor and renderer");
    println!();
    println!("License: MIT");
}

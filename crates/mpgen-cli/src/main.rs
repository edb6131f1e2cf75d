use clap::{Parser, Subcommand};
use mpgen_ast::{GeneratorOptions, Node};
use mpgen_codegen::{Generated, TemplateGenerator};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mpgen")]
#[command(about = "mpgen — mini-program template generator")]
#[command(version)]
struct Cli {
    /// Log generation progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate templates from annotated AST files (.json)
    Build {
        /// Input AST files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Generator options file (.json)
        #[arg(long)]
        options: Option<PathBuf>,

        /// Template name (defaults to the options file value, then the input file stem)
        #[arg(long)]
        name: Option<String>,

        /// Write `<stem>.wxml` files here instead of printing to stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Generate without writing output and report failures
    Check {
        /// Input AST files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Generator options file (.json)
        #[arg(long)]
        options: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ok = match cli.command {
        Command::Build {
            paths,
            options,
            name,
            out_dir,
        } => cmd_build(&paths, options.as_deref(), name.as_deref(), out_dir.as_deref()),
        Command::Check { paths, options } => cmd_check(&paths, options.as_deref()),
    };

    if !ok {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            None
        }
    }
}

fn load_options(path: Option<&Path>) -> Option<GeneratorOptions> {
    let Some(path) = path else {
        return Some(GeneratorOptions::default());
    };
    let source = read_source(path)?;
    match GeneratorOptions::from_json(&source) {
        Ok(options) => Some(options),
        Err(e) => {
            eprintln!("Invalid options in {}: {e}", path.display());
            None
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "template".to_string())
}

/// Load one AST and run one generation pass over it. `None` if the AST
/// could not be loaded at all.
fn generate_file(path: &Path, options: &GeneratorOptions) -> Option<Generated> {
    let source = read_source(path)?;
    let ast = match Node::from_json(&source) {
        Ok(ast) => ast,
        Err(e) => {
            eprintln!("Invalid AST in {}: {e}", path.display());
            return None;
        }
    };
    tracing::debug!(path = %path.display(), "loaded AST");
    Some(TemplateGenerator::new(options).generate_checked(&ast))
}

/// Options for one input: explicit `--name` wins, then a name set in the
/// options file, then the input file stem.
fn options_for(path: &Path, base: &GeneratorOptions, name: Option<&str>, named: bool) -> GeneratorOptions {
    let mut options = base.clone();
    if let Some(name) = name {
        options.template_name = name.to_string();
    } else if !named {
        options.template_name = file_stem(path);
    }
    options
}

fn cmd_build(paths: &[PathBuf], options: Option<&Path>, name: Option<&str>, out_dir: Option<&Path>) -> bool {
    let Some(base) = load_options(options) else {
        return false;
    };
    let named = base.template_name != mpgen_ast::options::DEFAULT_TEMPLATE_NAME;

    if let Some(dir) = out_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error creating {}: {e}", dir.display());
            return false;
        }
    }

    let mut failures = 0;
    for path in paths {
        let options = options_for(path, &base, name, named);
        let Some(generated) = generate_file(path, &options) else {
            failures += 1;
            continue;
        };
        if let Some(err) = &generated.failure {
            eprintln!("Generation failed for {}: {err}", path.display());
            failures += 1;
        }

        match out_dir {
            Some(dir) => {
                let out_path = dir.join(format!("{}.wxml", file_stem(path)));
                if let Err(e) = std::fs::write(&out_path, &generated.document) {
                    eprintln!("Error writing {}: {e}", out_path.display());
                    failures += 1;
                    continue;
                }
                eprintln!("Built: {}", out_path.display());
            }
            None => println!("{}", generated.document),
        }
    }

    tracing::debug!(templates = paths.len(), failures, "batch finished");
    failures == 0
}

fn cmd_check(paths: &[PathBuf], options: Option<&Path>) -> bool {
    let Some(base) = load_options(options) else {
        return false;
    };
    let named = base.template_name != mpgen_ast::options::DEFAULT_TEMPLATE_NAME;

    let mut all_ok = true;
    for path in paths {
        let options = options_for(path, &base, None, named);
        match generate_file(path, &options) {
            Some(generated) if generated.is_ok() => eprintln!("OK: {}", path.display()),
            Some(generated) => {
                all_ok = false;
                if let Some(err) = &generated.failure {
                    eprintln!("FAILED: {}: {err} ({})", path.display(), err.trace());
                }
            }
            None => all_ok = false,
        }
    }
    all_ok
}

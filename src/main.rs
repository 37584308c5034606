mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use oxidized_provenance::annotation::render;
use oxidized_provenance::{audit, config, output, rules};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            path,
            format,
            output: output_path,
            file_patterns,
            exclude_patterns,
            config: config_path,
            verbose,
        } => {
            init_logging(verbose);

            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            config.apply_overrides(file_patterns, exclude_patterns);

            let report = audit::run_audit(&path, &config).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.valid { 0 } else { 1 });
        }

        Commands::Annotate {
            file,
            tool_name,
            tool_version,
            author_id,
            date,
            lines,
            comment_prefix,
            in_place,
            verbose,
        } => {
            init_logging(verbose);

            let range = lines.as_deref().map(render::parse_line_range).transpose();
            let range = range.unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let meta = render::AnnotationMetadata {
                tool_name,
                tool_version,
                date: date
                    .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
                author_id,
            };

            let annotated = render::annotate_file(&file, comment_prefix.as_deref(), &meta, range)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                });

            if in_place {
                std::fs::write(&file, &annotated).unwrap_or_else(|e| {
                    eprintln!("Error writing {}: {e}", file.display());
                    std::process::exit(2);
                });
                eprintln!("Annotated {}", file.display());
            } else {
                print!("{annotated}");
            }
        }

        Commands::ListRules => {
            let rules = rules::all_rules();
            println!("{}", "Built-in Rules".bold().underline());
            println!();

            for rule in rules {
                println!(
                    "  [{severity}] {id:<32} {message}",
                    severity = "ERROR".red().bold(),
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => match rules::find_rule(&rule_id) {
            Some(rule) => {
                println!("{}", rule.id.bold());
                println!();
                println!("  Severity:     error");
                println!("  Description:  {}", rule.message);
                println!("  Remediation:  {}", rule.remediation);
            }
            None => {
                eprintln!("Unknown rule: {rule_id}");
                eprintln!("Use 'oxidized-provenance list-rules' to see all available rules.");
                std::process::exit(2);
            }
        },
    }
}

/// Sends diagnostics to stderr. `RUST_LOG` wins when set; otherwise only
/// warnings, or debug output for this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "oxidized_provenance=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

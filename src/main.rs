mod calendar;
mod canvas;
mod flags;
mod logging;
mod pdf;
mod poster;
mod season;
mod theme;
use crate::flags::{FetchFlag, FlagCache, HttpFetcher, Offline};
use crate::pdf::PdfCanvas;
use crate::poster::{draw_poster, PosterSummary, PAGE_HEIGHT, PAGE_WIDTH};
use crate::season::{Season, YEAR};
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::path::PathBuf;

static DEFAULT_FLAGS_DIR: &str = "flags";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    output: PathBuf,
    flags_dir: PathBuf,
    offline: bool,
    verbosity: u8,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            output: PathBuf::from(format!("Formula-1-{YEAR}-Calendar.pdf")),
            flags_dir: PathBuf::from(DEFAULT_FLAGS_DIR),
            offline: false,
            verbosity: 0,
        }
    }
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('o') | Arg::Long("output") => {
                    opts.output = parser.value()?.into();
                }
                Arg::Long("flags-dir") => {
                    opts.flags_dir = parser.value()?.into();
                }
                Arg::Long("offline") => opts.offline = true,
                Arg::Short('v') | Arg::Long("verbose") => {
                    opts.verbosity = opts.verbosity.saturating_add(1);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                logging::init(opts.verbosity);
                let season = Season::default();
                tracing::info!(
                    year = season.year(),
                    races = season.races().len(),
                    "Rendering season poster"
                );
                let title = format!("{} Formula 1 Calendar", season.year());
                let mut canvas = PdfCanvas::new(&title, PAGE_WIDTH, PAGE_HEIGHT)
                    .context("failed to start PDF document")?;
                let summary = if opts.offline {
                    let flags = FlagCache::new(&opts.flags_dir, Offline);
                    render(&mut canvas, &season, flags)?
                } else {
                    let flags = FlagCache::new(&opts.flags_dir, HttpFetcher::new());
                    render(&mut canvas, &season, flags)?
                };
                canvas.save(&opts.output).with_context(|| {
                    format!("failed to write poster to {}", opts.output.display())
                })?;
                tracing::info!(
                    path = %opts.output.display(),
                    months = summary.months,
                    races = summary.race_lines,
                    "Wrote poster"
                );
                Ok(())
            }
            Command::Help => {
                println!("Usage: race-poster [options]");
                println!();
                println!("Render the {YEAR} Formula 1 calendar as a one-page PDF poster");
                println!();
                println!("Options:");
                println!("  -o, --output <PATH>   Write the poster to PATH");
                println!("                        [default: Formula-1-{YEAR}-Calendar.pdf]");
                println!("      --flags-dir <DIR> Cache flag images in DIR [default: {DEFAULT_FLAGS_DIR}]");
                println!("      --offline         Only use flags already in the cache");
                println!("  -v, --verbose         Log more details; repeat for even more");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn render<F: FetchFlag>(
    canvas: &mut PdfCanvas,
    season: &Season,
    mut flags: FlagCache<F>,
) -> anyhow::Result<PosterSummary> {
    draw_poster(canvas, season, &mut flags).context("failed to lay out poster")
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let Ok(Command::Run(opts)) = parse(&[]) else {
            panic!("no arguments should mean a plain run");
        };
        assert_eq!(opts.output, PathBuf::from("Formula-1-2026-Calendar.pdf"));
        assert_eq!(opts.flags_dir, PathBuf::from("flags"));
        assert!(!opts.offline);
        assert_eq!(opts.verbosity, 0);
    }

    #[test]
    fn test_options() {
        let cmd = parse(&["-o", "out.pdf", "--flags-dir", "/tmp/f", "--offline", "-vv"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                output: PathBuf::from("out.pdf"),
                flags_dir: PathBuf::from("/tmp/f"),
                offline: true,
                verbosity: 2,
            })
        );
    }

    #[test]
    fn test_long_output() {
        let Ok(Command::Run(opts)) = parse(&["--output=poster.pdf"]) else {
            panic!("--output should be accepted");
        };
        assert_eq!(opts.output, PathBuf::from("poster.pdf"));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V", "--offline"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_rejects_positional() {
        assert!(parse(&["poster.pdf"]).is_err());
        assert!(parse(&["--colour"]).is_err());
        assert!(parse(&["-o"]).is_err());
    }
}

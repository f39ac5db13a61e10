use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result, bail, miette};
use turtle_canvas::render::{RecordingSurface, SvgOptions, SvgSurface};
use turtle_canvas::{EnvironmentConfig, Session, Update, Viewport};

const USAGE: &str = "\
Usage: turtle-cli [SCRIPT] [options]

Reads a turtle script (stdin when SCRIPT is omitted) and writes SVG.

Options:
  -o, --output <FILE>       Write to FILE instead of stdout
      --ops                 Write the list of drawing operations instead of SVG
      --updates             Print every update as a JSON line on stderr
      --width <W>           Canvas width (default 768)
      --height <H>          Canvas height (default 400)
      --background <COLOR>  Background color (default black)
      --stroke-width <W>    Line width for the path
  -h, --help                Show this help";

#[derive(Debug, Default)]
struct Args {
    script: Option<PathBuf>,
    output: Option<PathBuf>,
    ops: bool,
    updates: bool,
    config: EnvironmentConfig,
    svg: SvgOptions,
}

fn parse_number(flag: &str, value: Option<String>) -> Result<f64> {
    let value = value.ok_or_else(|| miette!("{flag} needs a value"))?;
    let number = value
        .parse::<f64>()
        .map_err(|_| miette!("{flag}: {value:?} is not a number"))?;
    if !number.is_finite() || number <= 0.0 {
        bail!("{flag} must be a positive number, got {value}");
    }
    Ok(number)
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut args = Args::default();

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-o" | "--output" => {
                let path = argv.next().ok_or_else(|| miette!("{arg} needs a value"))?;
                args.output = Some(path.into());
            }
            "--ops" => args.ops = true,
            "--updates" => args.updates = true,
            "--width" => args.config.width = parse_number(&arg, argv.next())?,
            "--height" => args.config.height = parse_number(&arg, argv.next())?,
            "--background" => {
                args.config.background_color =
                    argv.next().ok_or_else(|| miette!("{arg} needs a value"))?;
            }
            "--stroke-width" => args.svg.stroke_width = parse_number(&arg, argv.next())?,
            flag if flag.starts_with('-') && flag != "-" => bail!("unknown option: {flag}"),
            path => {
                if args.script.is_some() {
                    bail!("only one script may be given");
                }
                if path != "-" {
                    args.script = Some(path.into());
                }
            }
        }
    }

    Ok(Some(args))
}

fn read_script(args: &Args) -> Result<(String, String)> {
    match &args.script {
        Some(path) => {
            let source = fs::read_to_string(path).into_diagnostic()?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).into_diagnostic()?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

fn print_update(update: &Update) {
    match serde_json::to_string(update) {
        Ok(line) => eprintln!("{line}"),
        Err(e) => tracing::warn!(error = %e, "could not serialize update"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let Some(args) = parse_args(std::env::args().skip(1))? else {
        println!("{USAGE}");
        return Ok(());
    };

    let (name, source) = read_script(&args)?;

    let viewport = Viewport::new(args.config.width, args.config.height);
    let mut session = if args.ops {
        Session::with_surface(args.config.clone(), RecordingSurface::new())
    } else {
        Session::with_surface(
            args.config.clone(),
            SvgSurface::new(viewport, args.svg.clone()),
        )
    };
    if args.updates {
        session.subscribe(print_update);
    }

    let applied = session.run_script(&name, &source)?;
    tracing::info!(applied, script = %name, "script finished");

    let mut output = session.render();
    if !output.ends_with('\n') {
        output.push('\n');
    }
    match &args.output {
        Some(path) => fs::write(path, output).into_diagnostic()?,
        None => print!("{output}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Option<Args>> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults() {
        let args = parse(&[]).unwrap().unwrap();
        assert!(args.script.is_none());
        assert_eq!(args.config, EnvironmentConfig::default());
        assert!(!args.ops);
    }

    #[test]
    fn all_flags() {
        let args = parse(&[
            "star.turtle",
            "-o",
            "star.svg",
            "--updates",
            "--width",
            "300",
            "--height",
            "200",
            "--background",
            "navy",
        ])
        .unwrap()
        .unwrap();
        assert_eq!(args.script, Some(PathBuf::from("star.turtle")));
        assert_eq!(args.output, Some(PathBuf::from("star.svg")));
        assert!(args.updates);
        assert_eq!(args.config.width, 300.0);
        assert_eq!(args.config.height, 200.0);
        assert_eq!(args.config.background_color, "navy");
    }

    #[test]
    fn help() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--width", "wide"]).is_err());
        assert!(parse(&["--width", "-3"]).is_err());
        assert!(parse(&["--height"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["a.turtle", "b.turtle"]).is_err());
    }

    #[test]
    fn dash_means_stdin() {
        let args = parse(&["-"]).unwrap().unwrap();
        assert!(args.script.is_none());
    }
}

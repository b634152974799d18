use std::env;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use colored::Colorize;
use order_form::{ConsoleTrace, FormError, FormState, Scenario};

const USAGE: &str = "usage: order_form [SCENARIO.toml] [--json]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    scenario: Option<PathBuf>,
    json: bool,
}

fn parse_args(raw: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    for arg in raw {
        match arg.as_str() {
            "--json" => args.json = true,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            _ if args.scenario.is_some() => {
                return Err(format!("unexpected extra argument '{arg}'"))
            }
            _ => args.scenario = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn run(args: &Args) -> Result<FormState, FormError> {
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    scenario.run(Rc::new(ConsoleTrace))
}

fn render_state(state: &FormState, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(state);
    }
    Ok([
        format!("{}", "Final state".green().bold()),
        format!("  date:          {}", state.date),
        format!("  slots:         [{}]", state.slots.join(", ")),
        format!("  other person:  {}", state.other_person),
        format!("  pickup:        {}", state.pickup),
        format!("  name visible:  {}", state.name_visible),
        format!("  phone visible: {}", state.phone_visible),
    ]
    .join("\n"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {message}", "error:".red().bold());
    process::exit(1);
}

fn main() {
    env_logger::init();
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => fail(format!("{message}\n{USAGE}")),
    };

    println!("{}", "=== Mediator pattern: order form ===".bold());
    println!();

    let state = match run(&args) {
        Ok(state) => state,
        Err(err) => fail(err),
    };

    println!();
    match render_state(&state, args.json) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => fail(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_form::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(raw: &[&str]) -> Result<Args, String> {
        parse_args(raw.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_no_arguments_runs_default() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_scenario_and_json_in_any_order() {
        let expected = Args {
            scenario: Some(PathBuf::from("demo.toml")),
            json: true,
        };
        assert_eq!(args(&["demo.toml", "--json"]).unwrap(), expected);
        assert_eq!(args(&["--json", "demo.toml"]).unwrap(), expected);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = args(&["--help"]).unwrap_err();
        assert!(err.contains("--help"));
        assert!(args(&["--jsn", "demo.toml"]).is_err());
    }

    #[test]
    fn test_extra_positional_rejected() {
        let err = args(&["a.toml", "b.toml"]).unwrap_err();
        assert!(err.contains("b.toml"));
    }

    #[test]
    fn test_run_default_scenario() {
        let state = run(&Args::default()).unwrap();
        assert_eq!(state.date, "Сьогодні");
        assert!(state.slots.is_empty());
    }

    #[test]
    fn test_run_scenario_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[steps]]\naction = \"select_date\"\nvalue = \"Завтра\"").unwrap();
        let state = run(&Args {
            scenario: Some(file.path().to_path_buf()),
            json: false,
        })
        .unwrap();
        assert_eq!(state.slots, vec!["10:00", "12:00", "15:00", "18:00"]);
    }

    #[test]
    fn test_run_missing_file_fails() {
        let err = run(&Args {
            scenario: Some(PathBuf::from("/definitely/not/here.toml")),
            json: false,
        })
        .unwrap_err();
        assert!(matches!(err, FormError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn test_render_json() {
        let state = FormState {
            date: "Завтра".to_string(),
            ..FormState::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&render_state(&state, true).unwrap()).unwrap();
        assert_eq!(json["date"], "Завтра");
        assert_eq!(json["pickup"], false);
    }

    #[test]
    fn test_render_text() {
        let state = FormState {
            slots: vec!["12:00".to_string(), "14:00".to_string()],
            ..FormState::default()
        };
        let text = render_state(&state, false).unwrap();
        assert!(text.contains("slots:         [12:00, 14:00]"));
    }
}

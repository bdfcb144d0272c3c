//! Line-oriented driver for a running module runtime.
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use iconic_core::{COMMAND_HELP, CommandResponse, parse_coordinate};
use iconic_runtime::{DataEvent, Event, ModuleEvent, RuntimeHandle, Topic};

use crate::scenario::ScenarioHost;

const HELP: &str = "\
commands:
  activate              activate the selected module
  click <coord|index>   select a grid cell (e.g. B7 or 38)
  press <coord>         chat command, as a scripted player would send it
  solve <unit>          mark a bomb unit as solved
  autosolve             force-solve the selected module
  focus | defocus       move the pointer onto or off the module
  show                  print module status
  module <id>           select which module the commands address
  help | quit";

/// One parsed terminal line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Activate,
    Click(u32),
    Chat(String),
    Solve(String),
    AutoSolve,
    Focus(bool),
    Show,
    Module(u32),
    Help,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let input = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "activate" => Input::Activate,
            "click" | "select" => Input::Click(parse_cell(rest)?),
            "press" => Input::Chat(line.to_string()),
            "solve" if !rest.is_empty() => Input::Solve(rest.to_string()),
            "solve" => return Err("usage: solve <unit>".to_string()),
            "autosolve" => Input::AutoSolve,
            "focus" => Input::Focus(true),
            "defocus" => Input::Focus(false),
            "show" | "status" => Input::Show,
            "module" => Input::Module(
                rest.parse()
                    .map_err(|_| format!("invalid module id {:?}", rest))?,
            ),
            "help" | "?" => Input::Help,
            "quit" | "exit" => Input::Quit,
            other => return Err(format!("unknown command {:?}, try help", other)),
        };
        Ok(Some(input))
    }
}

fn parse_cell(raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .ok()
        .filter(|index| *index < 32 * 32)
        .or_else(|| parse_coordinate(raw))
        .ok_or_else(|| format!("invalid cell {:?}", raw))
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run(handle: RuntimeHandle, host: Arc<ScenarioHost>) -> Result<()> {
    let printer = tokio::spawn(print_events(handle.clone()));

    let mut module = handle.module_ids().first().copied().unwrap_or_default();
    println!("{}", HELP);
    println!("chat: {}", COMMAND_HELP);
    println!("modules: {:?}, addressing #{}", handle.module_ids(), module);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match Input::parse(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match input {
            Input::Activate => handle.activate(module).await?,
            Input::Click(index) => match handle.select(module, index).await? {
                Some(true) => println!("correct"),
                Some(false) => println!("incorrect"),
                None => println!("nothing to select"),
            },
            Input::Chat(line) => match handle.command(module, &line).await? {
                Some(CommandResponse::Pressed { points }) => println!("pressed (+{} points)", points),
                Some(CommandResponse::Error(message)) => println!("{}", message),
                None => println!("not handled"),
            },
            Input::Solve(unit) => {
                if !host.solve(&unit) {
                    println!("{:?} is not an unsolved unit; unsolved: {:?}", unit, host.unsolved());
                }
            }
            Input::AutoSolve => handle.force_solve(module).await?,
            Input::Focus(true) => handle.focus(module).await?,
            Input::Focus(false) => handle.defocus(module).await?,
            Input::Show => {
                let status = handle.status(module).await?;
                println!(
                    "#{} {} ({}) text={:?} missing={:?} queue={:?} solves={:?} strikes={} passes={}",
                    status.module_id,
                    status.phase,
                    status.stage,
                    status.display.text,
                    status.display.missing_name,
                    status.queue,
                    status.recorded_solves,
                    host.strikes(),
                    host.passes(),
                );
            }
            Input::Module(id) => {
                if handle.module_ids().contains(&id) {
                    module = id;
                } else {
                    println!("no module #{}; modules: {:?}", id, handle.module_ids());
                }
            }
            Input::Help => println!("{}", HELP),
            Input::Quit => break,
        }
    }

    printer.abort();
    Ok(())
}

async fn print_events(handle: RuntimeHandle) {
    let mut module_rx = handle.subscribe(Topic::Module);
    let mut data_rx = handle.subscribe(Topic::Data);

    loop {
        let received = tokio::select! {
            event = module_rx.recv() => event,
            event = data_rx.recv() => event,
        };
        match received {
            Ok(event) => {
                if let Some(line) = describe(&event) {
                    println!("{}", line);
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "Event printer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::Module(ModuleEvent::IconPresented {
            module_id,
            icon,
            part,
            substitute_for,
        }) => match substitute_for {
            Some(missing) => format!("[#{}] {} (for {}): find \"{}\"", module_id, icon, missing, part),
            None => format!("[#{}] {}: find \"{}\"", module_id, icon, part),
        },
        Event::Module(ModuleEvent::Strike { module_id }) => format!("[#{}] strike!", module_id),
        Event::Module(ModuleEvent::Solved { module_id }) => format!("[#{}] GG!", module_id),
        Event::Data(DataEvent::RemoteInstalled { timestamp, icons }) => {
            format!("remote dataset installed: {} icons, {}", icons, timestamp)
        }
        Event::Data(DataEvent::RemoteStale { remote, .. }) => {
            format!("remote dataset ignored ({})", remote)
        }
        Event::Data(DataEvent::RemoteFailed { error }) => format!("remote dataset unavailable: {}", error),
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_terminal_commands() {
        assert_eq!(Input::parse("  "), Ok(None));
        assert_eq!(Input::parse("click B1"), Ok(Some(Input::Click(1))));
        assert_eq!(Input::parse("click 40"), Ok(Some(Input::Click(40))));
        assert_eq!(
            Input::parse("press AA1"),
            Ok(Some(Input::Chat("press AA1".to_string())))
        );
        assert_eq!(
            Input::parse("solve The Button"),
            Ok(Some(Input::Solve("The Button".to_string())))
        );
        assert_eq!(Input::parse("module 3"), Ok(Some(Input::Module(3))));
        assert_eq!(Input::parse("QUIT"), Ok(Some(Input::Quit)));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(Input::parse("click").is_err());
        assert!(Input::parse("click 5000").is_err());
        assert!(Input::parse("solve").is_err());
        assert!(Input::parse("module x").is_err());
        assert!(Input::parse("dance").is_err());
    }

    #[test]
    fn describes_player_facing_events() {
        let line = describe(&Event::Module(ModuleEvent::IconPresented {
            module_id: 2,
            icon: "Blank".into(),
            part: "Whole".into(),
            substitute_for: Some("Souvenir".into()),
        }));
        assert_eq!(line.as_deref(), Some("[#2] Blank (for Souvenir): find \"Whole\""));
        assert_eq!(describe(&Event::Module(ModuleEvent::Activated { module_id: 2 })), None);
    }
}

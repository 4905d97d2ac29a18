//! Interactive shell
//!
//! Drives a [`Dashboard`] one command per line: switch tabs, pick
//! technologies, open rankings and dialogs. Each command prints the
//! affected panel.

use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::dashboard::{ActiveView, Dashboard};
use crate::render;
use crate::state::{RankingToggle, SelectOutcome, StateError, Tab};
use crate::views::ResourceEffectView;

const HELP: &str = "\
Commands:
  tab <resource|carbon|energy>   switch panel
  show                           render the current panel
  compare <on|off>               toggle comparison mode (resource panel)
  select <n|name>                click a technology (resource panel)
  clear                          clear the selection
  source <name>                  select an energy source (energy panel)
  refresh                        fetch the current panel again
  buildings                      list building types
  ranking <building>             open or close a building type's ranking
  entry <n>                      open the justification for rank n
  close                          close the open dialog, then the ranking
  help                           show this help
  quit                           leave the shell
";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Tab(Tab),
    Show,
    Compare(bool),
    /// 1-based grid position or technology name
    Select(String),
    Clear,
    Source(String),
    Refresh,
    Buildings,
    Ranking(String),
    /// 1-based rank
    Entry(usize),
    Close,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        let require = |what: &str| -> Result<String, String> {
            if arg.is_empty() {
                Err(format!("{} requires {}", cmd, what))
            } else {
                Ok(arg.to_string())
            }
        };

        match cmd.to_ascii_lowercase().as_str() {
            "tab" => require("a panel name")?
                .parse::<Tab>()
                .map(ShellCommand::Tab)
                .map_err(|e| e.to_string()),
            "show" => Ok(ShellCommand::Show),
            "compare" => match arg.to_ascii_lowercase().as_str() {
                "on" => Ok(ShellCommand::Compare(true)),
                "off" => Ok(ShellCommand::Compare(false)),
                _ => Err("compare takes on or off".to_string()),
            },
            "select" => require("a number or name").map(ShellCommand::Select),
            "clear" => Ok(ShellCommand::Clear),
            "source" => require("a source name").map(ShellCommand::Source),
            "refresh" => Ok(ShellCommand::Refresh),
            "buildings" => Ok(ShellCommand::Buildings),
            "ranking" => require("a building type").map(ShellCommand::Ranking),
            "entry" => match require("a rank")?.parse::<usize>() {
                Ok(n) if n > 0 => Ok(ShellCommand::Entry(n)),
                _ => Err("entry takes a rank starting at 1".to_string()),
            },
            "close" => Ok(ShellCommand::Close),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command: {} (try help)", other)),
        }
    }
}

/// Render the mounted panel, waiting for a pending fetch to settle
pub async fn render_active(dashboard: &mut Dashboard) -> String {
    let title = dashboard.tab().title();
    let body = match dashboard.active_mut() {
        ActiveView::ResourceEffect(view) => {
            let mut out = render::technology_grid(view.technologies(), view.selection());
            if let Some(cmp) = view.comparison() {
                out.push('\n');
                out.push_str(&render::comparison_table(&cmp));
            } else if let Some(tech) = view.expanded_detail() {
                out.push('\n');
                out.push_str(&render::technology_detail(tech));
            }
            out
        }
        ActiveView::CarbonFootprint(view) => render::carbon_cards(&view.settled().await),
        ActiveView::EnergyUsage(view) => {
            let state = view.settled().await;
            render::energy_chart(&state, view.selected().as_ref())
        }
    };
    format!("[{}]\n{}", title, body)
}

/// Run one command; returns the text to print
pub async fn execute(dashboard: &mut Dashboard, command: ShellCommand) -> String {
    match run_command(dashboard, command).await {
        Ok(text) => text,
        Err(e) => format!("error: {}\n", e),
    }
}

async fn run_command(dashboard: &mut Dashboard, command: ShellCommand) -> Result<String, StateError> {
    match command {
        ShellCommand::Tab(tab) => {
            dashboard.select_tab(tab);
            Ok(render_active(dashboard).await)
        }
        ShellCommand::Show => Ok(render_active(dashboard).await),
        ShellCommand::Compare(enabled) => {
            resource_view(dashboard)?.set_comparison_mode(enabled);
            Ok(render_active(dashboard).await)
        }
        ShellCommand::Select(target) => {
            let view = resource_view(dashboard)?;
            let outcome = match target.parse::<usize>() {
                Ok(n) if n > 0 => view.select(n - 1)?,
                _ => view.select_by_name(&target)?,
            };
            let mut out = String::new();
            if outcome == SelectOutcome::Rejected {
                out.push_str("Two technologies are already selected; deselect one first.\n");
            }
            out.push_str(&render_active(dashboard).await);
            Ok(out)
        }
        ShellCommand::Clear => {
            match dashboard.active_mut() {
                ActiveView::ResourceEffect(view) => view.clear(),
                ActiveView::EnergyUsage(view) => view.clear_source(),
                ActiveView::CarbonFootprint(_) => {}
            }
            Ok(render_active(dashboard).await)
        }
        ShellCommand::Source(name) => {
            match dashboard.active_mut() {
                ActiveView::EnergyUsage(view) => {
                    view.settled().await;
                    view.select_source(&name)?;
                }
                _ => return Err(StateError::NotFound("energy panel is not open".to_string())),
            }
            Ok(render_active(dashboard).await)
        }
        ShellCommand::Refresh => {
            match dashboard.active_mut() {
                ActiveView::CarbonFootprint(view) => view.refresh(),
                ActiveView::EnergyUsage(view) => view.refresh(),
                ActiveView::ResourceEffect(_) => {}
            }
            Ok(render_active(dashboard).await)
        }
        ShellCommand::Buildings => Ok(render::building_types(dashboard.store().building_types())),
        ShellCommand::Ranking(building) => match dashboard.open_ranking(&building)? {
            RankingToggle::Opened => {
                let store = dashboard.store();
                let focus = dashboard.navigation().ranking();
                let text = focus
                    .and_then(|f| {
                        store
                            .ranking(&f.building_type)
                            .map(|entries| render::ranking_list(&f.building_type, entries))
                    })
                    .unwrap_or_default();
                Ok(text)
            }
            RankingToggle::Closed => Ok(format!("Closed ranking for {}\n", building)),
        },
        ShellCommand::Entry(rank) => {
            let entry = dashboard.open_entry(rank - 1)?;
            Ok(render::justification_dialog(rank - 1, entry))
        }
        ShellCommand::Close => {
            let dialog_open = dashboard
                .navigation()
                .ranking()
                .map(|focus| focus.open_entry.is_some());
            match dialog_open {
                Some(true) => {
                    dashboard.close_entry();
                    Ok("Closed dialog\n".to_string())
                }
                Some(false) => {
                    dashboard.close_ranking();
                    Ok("Closed ranking\n".to_string())
                }
                None => Ok("Nothing to close\n".to_string()),
            }
        }
        ShellCommand::Help => Ok(HELP.to_string()),
        ShellCommand::Quit => Ok(String::new()),
    }
}

fn resource_view(dashboard: &mut Dashboard) -> Result<&mut ResourceEffectView, StateError> {
    match dashboard.active_mut() {
        ActiveView::ResourceEffect(view) => Ok(view),
        _ => Err(StateError::NotFound(
            "resource panel is not open (tab resource)".to_string(),
        )),
    }
}

/// Read commands from `input` until EOF or `quit`
pub async fn run<R>(dashboard: &mut Dashboard, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    println!("{}", render_active(dashboard).await);
    println!("Type help for commands.");

    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<ShellCommand>() {
            Ok(cmd) => cmd,
            Err(e) if e.is_empty() => continue,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        print!("{}", execute(dashboard, command).await);
    }
    Ok(())
}

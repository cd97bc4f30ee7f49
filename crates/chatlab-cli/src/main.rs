use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chatlab_store::{ConfigStore, HttpConfigStore, MemoryConfigStore};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{DomainsAction, Session};
use config::StudioConfig;

fn cli() -> Command {
    Command::new("chatlab")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Edit chat widget styling, preview it live and manage embed domains")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to chatlab.toml"),
        )
        .arg(
            Arg::new("widget")
                .long("widget")
                .global(true)
                .help("Widget id to operate on"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Use an empty in-memory store instead of the widget API"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("show").about("Print the widget configuration"))
        .subcommand(
            Command::new("set")
                .about("Edit configuration fields")
                .arg(
                    Arg::new("pairs")
                        .num_args(2..)
                        .required(true)
                        .value_name("FIELD VALUE")
                        .help("Field/value pairs, e.g. botName Nova primaryColor #112233"),
                )
                .arg(
                    Arg::new("save")
                        .long("save")
                        .action(ArgAction::SetTrue)
                        .help("Persist the result"),
                ),
        )
        .subcommand(
            Command::new("domains")
                .about("Manage authorized embedding domains")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List authorized domains"))
                .subcommand(
                    Command::new("add")
                        .about("Authorize a domain")
                        .arg(Arg::new("domain").required(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace the domain at an index")
                        .arg(
                            Arg::new("index")
                                .required(true)
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("domain").required(true)),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove the domain at an index")
                        .arg(
                            Arg::new("index")
                                .required(true)
                                .value_parser(value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(Command::new("snippet").about("Print the embed snippet"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatlab=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn domains_action(matches: &ArgMatches) -> Option<DomainsAction> {
    let domain = |args: &ArgMatches| args.get_one::<String>("domain").cloned().unwrap_or_default();
    let index = |args: &ArgMatches| args.get_one::<usize>("index").copied().unwrap_or_default();
    match matches.subcommand()? {
        ("list", _) => Some(DomainsAction::List),
        ("add", args) => Some(DomainsAction::Add(domain(args))),
        ("edit", args) => Some(DomainsAction::Edit(index(args), domain(args))),
        ("remove", args) => Some(DomainsAction::Remove(index(args))),
        _ => None,
    }
}

fn open_session(matches: &ArgMatches) -> Result<Session> {
    let mut config = StudioConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(widget) = matches.get_one::<String>("widget") {
        config = config.with_widget_id(widget.clone());
    }

    let store: Arc<dyn ConfigStore> = if matches.get_flag("offline") {
        tracing::info!("offline mode, using in-memory store");
        Arc::new(MemoryConfigStore::new())
    } else {
        Arc::new(HttpConfigStore::new(config.http_store()).context("failed to create store client")?)
    };

    tracing::debug!(widget_id = %config.widget_id, base_url = %config.store.base_url, "session ready");
    Ok(Session {
        store,
        widget_id: config.widget_id,
        api_base: config.store.base_url,
        target_origin: config.preview.target_origin,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    let session = open_session(&matches)?;
    let mut out = std::io::stdout().lock();

    match matches.subcommand() {
        Some(("show", _)) => session.show(&mut out).await,
        Some(("set", args)) => {
            let pairs: Vec<String> = args
                .get_many::<String>("pairs")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            session.set(&pairs, args.get_flag("save"), &mut out).await
        }
        Some(("domains", args)) => match domains_action(args) {
            Some(action) => session.domains(action, &mut out).await,
            None => Ok(()),
        },
        Some(("snippet", _)) => session.snippet(&mut out),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_domains_edit() {
        let matches = cli()
            .try_get_matches_from(["chatlab", "--offline", "domains", "edit", "1", "example.com"])
            .unwrap();
        assert!(matches.get_flag("offline"));
        let (_, args) = matches.subcommand().unwrap();
        assert_eq!(
            domains_action(args),
            Some(DomainsAction::Edit(1, "example.com".to_string()))
        );
    }

    #[test]
    fn parses_set_pairs_with_save() {
        let matches = cli()
            .try_get_matches_from(["chatlab", "set", "botName", "Nova", "--save", "--widget", "w9"])
            .unwrap();
        assert_eq!(matches.get_one::<String>("widget").map(String::as_str), Some("w9"));
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "set");
        assert!(args.get_flag("save"));
        assert_eq!(args.get_many::<String>("pairs").unwrap().count(), 2);
    }
}

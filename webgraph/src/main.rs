use clap::ArgMatches;
use commands::command_argument_builder;
use webgraph_store::GraphStore;

mod commands;

use webgraph::handlers;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    let Some((name, args)) = chosen_command.subcommand() else {
        // No subcommand provided; clap already printed usage on bad input
        return;
    };

    if let Err(e) = dispatch(name, args, &chosen_command, quiet).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn dispatch(
    name: &str,
    args: &ArgMatches,
    top_level: &ArgMatches,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = handlers::resolve_config(top_level.get_one::<String>("db"))?;
    let store = GraphStore::open(config)?;

    match name {
        "init" => handlers::handle_init(&store, quiet).await,
        "add-page" => handlers::handle_add_page(args, &store).await,
        "add-edge" => handlers::handle_add_edge(args, &store).await,
        "stats" => handlers::handle_stats(args, &store).await,
        "unscraped" => handlers::handle_unscraped(args, &store).await,
        "connections" => handlers::handle_connections(args, &store).await,
        "top" => handlers::handle_top(args, &store).await,
        "node" => handlers::handle_node(args, &store).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

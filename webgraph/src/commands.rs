use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("webgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("webgraph")
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-d --"db" <PATH>)
                .required(false)
                .help("Database file to use (overrides DATABASE_URL / WEBGRAPH_DB)")
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init").about("Creates the graph database and its tables on your filesystem"),
        )
        .subcommand(
            command!("add-page")
                .about("Records a discovered page. Re-adding a known href is a no-op.")
                .arg(
                    arg!(-u --"href" <URL>)
                        .required(true)
                        .help("The page URL, used as the graph key")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-k --"kind" <KIND>)
                        .required(false)
                        .help("Category label for the page"),
                )
                .arg(
                    arg!(-t --"title" <TITLE>)
                        .required(false)
                        .help("Page title, if known"),
                )
                .arg(
                    arg!(-D --"description" <TEXT>)
                        .required(false)
                        .help("Page description, if known"),
                )
                .arg(
                    arg!(--"scraped")
                        .required(false)
                        .help("Mark the page as already scraped (default: end node)")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("add-edge")
                .about(
                    "Records a directed link between two pages. The target does not need to \
                exist as a page yet.",
                )
                .arg(
                    arg!(-f --"from" <URL>)
                        .required(true)
                        .help("The linking page")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-t --"to" <URL>)
                        .required(true)
                        .help("The link target")
                        .value_parser(clap::value_parser!(Url)),
                ),
        )
        .subcommand(
            command!("stats")
                .about("Prints node and link counts for the whole graph")
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit JSON instead of text")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("unscraped")
                .about("Lists the crawl frontier: pages discovered but not yet scraped")
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Maximum number of pages to list")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("25"),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit JSON instead of text")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("connections")
                .about("Link-popularity statistics around one page")
                .arg(
                    arg!(-u --"href" <URL>)
                        .required(true)
                        .help("The page to inspect")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-D --"direction" <DIRECTION>)
                        .required(false)
                        .help("Group by link targets ('from') or link sources ('to')")
                        .default_value("to"),
                )
                .arg(
                    arg!(-l --"limit" <NUM>)
                        .required(false)
                        .help("Maximum number of rows")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("25"),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit JSON instead of text")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("top")
                .about("Ranks pages by incoming links across the whole graph")
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit JSON instead of text")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            command!("node")
                .about("Shows one page with its outgoing neighbors attached")
                .arg(
                    arg!(-u --"href" <URL>)
                        .required(true)
                        .help("The page to fetch")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-e --"edges" <NUM>)
                        .required(false)
                        .help("Maximum number of neighbors to attach")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("25"),
                )
                .arg(
                    arg!(--"json")
                        .required(false)
                        .help("Emit JSON instead of text")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

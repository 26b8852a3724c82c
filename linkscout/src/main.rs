use clap::ArgMatches;
use commands::command_argument_builder;
use linkscout::server::{self, AppState};
use linkscout_core::catalogue::Catalogue;
use linkscout_core::compare::{CompareRequest, ProductComparator};
use linkscout_core::report::ParityStatus;
use linkscout_scanner::LinkExtractor;
use tracing_subscriber;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    match chosen_command.subcommand() {
        Some(("serve", primary_command)) => handle_serve(primary_command).await,
        Some(("compare", primary_command)) => handle_compare(primary_command).await,
        Some(("compare-all", primary_command)) => handle_compare_all(primary_command).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

fn comparator_with_timeout(args: &ArgMatches) -> ProductComparator {
    let timeout = *args.get_one::<u64>("timeout").unwrap();
    ProductComparator::with_extractor(LinkExtractor::with_timeout(timeout))
}

async fn handle_serve(args: &ArgMatches) {
    let listen = args.get_one::<String>("listen").unwrap();
    let state = AppState::new(Catalogue::default_catalogue(), comparator_with_timeout(args));

    if let Err(e) = server::serve(listen, state).await {
        eprintln!("Error running server: {}", e);
        std::process::exit(1);
    }
}

async fn handle_compare(args: &ArgMatches) {
    let name = args.get_one::<String>("name").unwrap();
    let live = args.get_one::<Url>("live").unwrap();
    let micro = args.get_one::<Url>("micro").unwrap();

    let request = CompareRequest {
        name: name.clone(),
        live: live.to_string(),
        micro: micro.to_string(),
    };

    let comparator = comparator_with_timeout(args);
    let report = match comparator.compare(&request).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error comparing pages: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serialization cannot fail")
    );

    if matches!(report.status, ParityStatus::Mismatch | ParityStatus::Error) {
        std::process::exit(1);
    }
}

async fn handle_compare_all(args: &ArgMatches) {
    let catalogue = Catalogue::default_catalogue();
    let comparator = comparator_with_timeout(args);

    let report = match comparator.compare_catalogue(&catalogue).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error comparing catalogue: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report serialization cannot fail")
    );

    if matches!(
        report.worst_status(),
        Some(ParityStatus::Mismatch | ParityStatus::Error)
    ) {
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("linkscout")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("linkscout")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .subcommand(
            command!("serve")
                .about("Serve the audit page and the JSON comparison API")
                .arg(
                    arg!(-l --"listen" <ADDR>)
                        .required(false)
                        .help("Address and port to listen on")
                        .default_value("127.0.0.1:5000"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                ),
        )
        .subcommand(
            command!("compare")
                .about("Compare one product's live and micro pages, print the report as JSON")
                .arg(
                    arg!(-n --"name" <NAME>)
                        .required(false)
                        .help("Product name carried into the report")
                        .default_value(""),
                )
                .arg(
                    arg!(--"live" <URL>)
                        .required(true)
                        .help("Canonical product page URL")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"micro" <URL>)
                        .required(true)
                        .help("QR-redirect mirror page URL")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                ),
        )
        .subcommand(
            command!("compare-all")
                .about("Compare the whole catalogue, print the report as JSON")
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-fetch timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("15"),
                ),
        )
}

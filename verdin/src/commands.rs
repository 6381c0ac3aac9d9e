use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("verdin")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("verdin")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress non-essential output").required(false))
        .subcommand_required(true)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a fragmented stream by following its relation links and print \
                the accumulated graph as N-Triples.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The stream view URL to start from")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the accumulated graph to a file instead of stdout"),
                )
                .arg(
                    arg!(-t --"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                ),
        )
        .subcommand(
            command!("validate")
                .about("Validate previously crawled content against one relation category.")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("Path to the crawled graph, or '-' for stdin"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Serialization of the input: turtle or ntriples")
                        .default_value("ntriples"),
                )
                .arg(
                    arg!(-c --"category" <CATEGORY>)
                        .required(true)
                        .help("Relation category to check: temporal, lexical or geospatial"),
                )
                .arg(arg!(--"json" "Emit findings as JSON").required(false)),
        )
        .subcommand(
            command!("check")
                .about("Run structural checks over crawled content.")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(true)
                        .help("Path to the crawled graph, or '-' for stdin"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Serialization of the input: turtle or ntriples")
                        .default_value("ntriples"),
                )
                .arg(
                    arg!(-p --"path" <IRI>)
                        .required(false)
                        .help("Property path whose values must match --pattern")
                        .requires("pattern"),
                )
                .arg(
                    arg!(--"pattern" <REGEX>)
                        .required(false)
                        .help("Regular expression every value of --path must match")
                        .requires("path"),
                ),
        )
        .subcommand(
            command!("upload")
                .about("POST dataset files to a stream server before a conformance run.")
                .arg(
                    arg!(-e --"endpoint" <URL>)
                        .required(true)
                        .help("The ingest endpoint to post to")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-t --"content-type" <TYPE>)
                        .required(false)
                        .help("Content type of the dataset files")
                        .default_value("text/turtle"),
                )
                .arg(
                    arg!(<FILES> ... "Dataset files to post, in order")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

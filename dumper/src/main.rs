#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use boxtree::dom::{self, Document};
use boxtree::Options;
use clap::ArgMatches;
use std::fs::{self, File};
use std::io;
use std::process;

enum DumpKind {
    Dom,
    Style,
    Layout,
}

fn input_arg() -> clap::Arg {
    arg!(<input> "The document to build the tree for")
}

fn build_document(input: &str, args: &ArgMatches) -> boxtree::Result<Document> {
    let mut options = Options::default();
    if let Some(path) = args.get_one::<String>("stylesheet") {
        options.user_agent_stylesheet = Some(fs::read_to_string(path)?);
    }

    if args.get_flag("response") {
        let mut file = File::open(input)?;
        boxtree::render_response(&mut file, &options)
    } else {
        let html = fs::read_to_string(input)?;
        boxtree::parse_document(&html, &options)
    }
}

fn main() {
    env_logger::init();

    let args = command!()
        .subcommand(
            clap::Command::new("dom")
                .about("Dumps the DOM tree of an HTML document")
                .arg(input_arg()),
        )
        .subcommand(
            clap::Command::new("style")
                .about("Dumps the cascaded style of every element")
                .arg(input_arg()),
        )
        .subcommand(
            clap::Command::new("layout")
                .about("Dumps the resolved geometry of every element")
                .arg(input_arg()),
        )
        .arg(arg!(--response "Reads the input as a raw HTTP response").global(true))
        .arg(
            arg!(--stylesheet <file> "A user-agent style sheet applied before the document")
                .required(false)
                .global(true),
        )
        .arg_required_else_help(true)
        .get_matches();

    let (kind, sub_args) = match args.subcommand() {
        Some(("dom", sub_args)) => (DumpKind::Dom, sub_args),
        Some(("style", sub_args)) => (DumpKind::Style, sub_args),
        Some(("layout", sub_args)) => (DumpKind::Layout, sub_args),
        _ => {
            error!("Unknown subcommand");
            process::exit(2);
        }
    };
    let input = match sub_args.get_one::<String>("input") {
        Some(input) => input,
        None => {
            error!("Missing input");
            process::exit(2);
        }
    };

    let document = match build_document(input, sub_args) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to render {}: {}", input, e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut dest = stdout.lock();
    let result = match kind {
        DumpKind::Dom => dom::print_dom_to(&document, &mut dest),
        DumpKind::Style => dom::print_styles_to(&document, &mut dest),
        DumpKind::Layout => dom::print_layout_to(&document, &mut dest),
    };
    if let Err(e) = result {
        error!("Failed to write the dump: {}", e);
        process::exit(1);
    }
}

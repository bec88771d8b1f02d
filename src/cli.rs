use clap::{crate_authors, crate_description, crate_version, value_parser, Arg, ArgAction, Command};
use pretty_env_logger::env_logger::Target;
use std::env;
use std::path::PathBuf;
use std::process::exit;

use dnssync_namecheap::common::Domain;
use dnssync_namecheap::yamlfile::RecordFile;
use dnssync_namecheap::Config;

fn setup_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    // stdout is reserved for records and dry run reports
    builder.target(Target::Stderr).init();
}

fn dry_run_arg() -> Arg {
    Arg::new("dryrun")
        .action(ArgAction::SetTrue)
        .long("dryrun")
        .visible_alias("dry-run")
        .help("Preview changes without making them")
}

fn domain_arg() -> Arg {
    Arg::new("domain")
        .required(true)
        .help("Domain to sync, e.g. example.com")
}

pub(crate) fn main() {
    let cli = Command::new("dnssync-namecheap")
        .about(format!(
            "{}\n{}",
            crate_description!(),
            "Credentials may be overridden with NAMECHEAP_* environment variables.",
        ))
        .arg(
            Arg::new("config")
                .long("config")
                .visible_alias("config-file")
                .value_parser(value_parser!(PathBuf))
                .default_value("dns-config.yml")
                .help("Config file"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("export")
                .about("Export records from Namecheap")
                .arg(domain_arg())
                .arg(
                    Arg::new("output-file")
                        .long("output-file")
                        .value_parser(value_parser!(PathBuf))
                        .help("File to write records to (default stdout)"),
                )
                .arg(dry_run_arg()),
        )
        .subcommand(
            Command::new("import")
                .about("Import records to Namecheap, replacing all existing records")
                .arg(domain_arg())
                .arg(
                    Arg::new("input-file")
                        .long("input-file")
                        .value_parser(value_parser!(PathBuf))
                        .help("File to read records from (default stdin)"),
                )
                .arg(dry_run_arg()),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let config_path: &PathBuf = args.get_one("config").expect("config has a default");
    let service = match Config::load(config_path).and_then(Config::get_service) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    let (command, sub_args) = args.subcommand().expect("subcommand is required");
    let domain: Domain = match sub_args
        .get_one::<String>("domain")
        .expect("domain is required")
        .parse()
    {
        Ok(d) => d,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };
    let dry_run = sub_args.get_flag("dryrun");
    let mut stdout = std::io::stdout().lock();

    let result = match command {
        "export" => {
            let file = RecordFile::new(sub_args.get_one::<PathBuf>("output-file").cloned());
            service.export(&domain, &file, dry_run, &mut stdout)
        }
        "import" => {
            let file = RecordFile::new(sub_args.get_one::<PathBuf>("input-file").cloned());
            service.import(&domain, &file, dry_run, &mut stdout)
        }
        _ => unreachable!("unknown subcommand {command}"),
    };

    if let Err(err) = result {
        tracing::error!(domain = %domain, command = command, "{err}");
        exit(1);
    }
}

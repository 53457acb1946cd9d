use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::process;
use std::sync::Arc;
use log::{error, LevelFilter};

use crskit::commands::{CommandFactory, CrskitCommandFactory};
use crskit::errors::CrsResult;
use crskit::store::{CrsManager, CrsStore};
use crskit::utils::logger::Logger;

fn from_to_args(command: ClapCommand) -> ClapCommand {
    command
        .arg(
            Arg::new("from")
                .short('f')
                .long("from")
                .help("Source CRS code (e.g. EPSG:31467)")
                .value_name("CODE")
                .required(true),
        )
        .arg(
            Arg::new("to")
                .short('t')
                .long("to")
                .help("Target CRS code (e.g. EPSG:4258)")
                .value_name("CODE")
                .required(true),
        )
}

fn cli() -> ClapCommand {
    ClapCommand::new("crskit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Look up coordinate reference systems and transform coordinates between them")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Additional CRS definition file, preferred over the built-in definitions")
                .value_name("FILE")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Write log records and results to this file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new("lookup")
                .about("Show the definition behind a CRS code")
                .arg(Arg::new("code").help("CRS code in any supported notation").required(true).index(1)),
        )
        .subcommand(from_to_args(
            ClapCommand::new("transform")
                .about("Transform points given as x,y or x,y,z")
                .arg(
                    Arg::new("points")
                        .help("Points in source axis order and units")
                        .required(true)
                        .num_args(1..)
                        .allow_negative_numbers(true)
                        .index(1),
                )
                .arg(
                    Arg::new("path")
                        .long("path")
                        .help("Print the transformation chain first")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(from_to_args(
            ClapCommand::new("envelope")
                .about("Transform a bounding box given as minx,miny,maxx,maxy")
                .arg(
                    Arg::new("bbox")
                        .help("Envelope in source axis order and units")
                        .required(true)
                        .allow_negative_numbers(true)
                        .index(1),
                ),
        ))
        .subcommand(from_to_args(
            ClapCommand::new("path").about("Show the transformation steps between two systems"),
        ))
        .subcommand(
            ClapCommand::new("list")
                .about("List the known coordinate systems")
                .arg(
                    Arg::new("store")
                        .long("store")
                        .help("Only list the systems of this store")
                        .value_name("ID"),
                ),
        )
}

fn load_manager(matches: &ArgMatches) -> CrsResult<CrsManager> {
    let mut manager = CrsManager::new();
    if let Some(files) = matches.get_many::<String>("config") {
        for file in files {
            manager.register(CrsStore::from_file(file)?)?;
        }
    }
    manager.register(CrsStore::from_default_definitions()?)?;
    Ok(manager)
}

fn main() {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { LevelFilter::Info };
    let logger = match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
            match Logger::new(log_file) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error initializing logger: {}", e);
                    process::exit(1);
                }
            }
        }
        None => {
            env_logger::Builder::new().filter_level(level).parse_default_env().init();
            Logger::console()
        }
    };

    let manager = match load_manager(&matches) {
        Ok(manager) => Arc::new(manager),
        Err(e) => {
            error!("Failed to load CRS definitions: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let factory = CrskitCommandFactory::new(manager);

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => match command.execute() {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}

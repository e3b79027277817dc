use std::{env, process};

use prime_labyrinth::{
    Labyrinth, LabyrinthConfig, LabyrinthError, cli::CommandLineConfig, cli_commands::handle_command,
};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let cli = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let labyrinth = match Labyrinth::from_config(&cli.config) {
        Ok(labyrinth) => labyrinth,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    if let Err(err) = run_command(&labyrinth, &cli.config, &cli.command, &cli.command_args) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}

fn run_command(
    labyrinth: &Labyrinth,
    config: &LabyrinthConfig,
    command: &str,
    args: &[String],
) -> Result<(), LabyrinthError> {
    match handle_command(labyrinth, config, command, args)? {
        Some(output) => println!("{output}"),
        None => {
            println!("unknown command {command}, defaulting to status");
            if let Some(output) = handle_command(labyrinth, config, "status", &[])? {
                println!("{output}");
            }
        }
    }
    Ok(())
}

use crate::{config::LabyrinthConfig, room::Room};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub config: LabyrinthConfig,
    pub command: String,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    /// Global flags may appear anywhere; the first positional argument is the
    /// command and later positionals are passed to it.
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut config = LabyrinthConfig::default();
        let mut command = String::from("status");
        let mut command_args = Vec::new();
        let mut command_set = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--ceiling" => config.ceiling = parse_number(iter.next(), "--ceiling")?,
                "--start-layer" => {
                    config.start.layer = parse_number(iter.next(), "--start-layer")?;
                }
                "--start-room" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| "--start-room requires a value".to_string())?;
                    config.start.room = value.parse::<Room>().map_err(|e| e.to_string())?;
                }
                "--max-steps" => {
                    let steps: u64 = parse_number(iter.next(), "--max-steps")?;
                    config.walk_steps = usize::try_from(steps)
                        .map_err(|_| "--max-steps is too large".to_string())?;
                    config.explore_steps = steps;
                }
                "--max-prime" => {
                    config.explore_ceiling = Some(parse_number(iter.next(), "--max-prime")?);
                }
                "--seed" => config.seed = Some(parse_number(iter.next(), "--seed")?),
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ if command_set => command_args.push(arg.to_string()),
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            config,
            command,
            command_args,
        })
    }

    pub fn help() -> &'static str {
        "Usage: labyrinth [--ceiling N] [--start-layer P] [--start-room a,b,c] \
         [--max-steps N] [--max-prime P] [--seed N] \
         <status|row P|full P|signature P|A-B|walk|random|explore|world>\n"
    }
}

fn parse_number(value: Option<&&str>, flag: &str) -> Result<u64, String> {
    value
        .ok_or_else(|| format!("{flag} requires a value"))?
        .parse::<u64>()
        .map_err(|_| format!("{flag} expects a non-negative integer"))
}

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};

use crate::{
    config::LabyrinthConfig,
    errors::LabyrinthError,
    labyrinth::Labyrinth,
    probe,
    room::{DEFAULT_START_LAYER, Prime, Room, Row},
    walk::Walk,
    world::build_world_graph,
};

const ERR_PREFIX: &str = "cli";
const DEFAULT_WORLD_MAX_PRIME: Prime = 59;

/// Runs `command` and returns its output, or `None` for unknown commands.
pub fn handle_command(
    labyrinth: &Labyrinth,
    config: &LabyrinthConfig,
    command: &str,
    args: &[String],
) -> Result<Option<String>, LabyrinthError> {
    match command {
        "status" => run_status(labyrinth, config).map(Some),
        "row" => run_row(labyrinth, args).map(Some),
        "full" => run_full(labyrinth, args).map(Some),
        "signature" => run_signature(labyrinth, args).map(Some),
        "walk" => {
            let walk = labyrinth.leftmost_walk(config.start, config.walk_steps);
            encode_walk("walk", &walk).map(Some)
        }
        "random" => {
            let mut rng = config.rng();
            let walk = labyrinth.random_walk(config.start, config.walk_steps, &mut rng);
            encode_walk("random", &walk).map(Some)
        }
        "explore" => run_explore(labyrinth, config).map(Some),
        "world" => run_world(labyrinth, config).map(Some),
        _ => Ok(None),
    }
}

fn run_status(labyrinth: &Labyrinth, config: &LabyrinthConfig) -> Result<String, LabyrinthError> {
    let table = labyrinth.table();
    let mut object = Map::new();
    object.insert("command".into(), Value::String("status".into()));
    object.insert("ceiling".into(), json!(table.ceiling()));
    object.insert("primes".into(), json!(table.len()));
    object.insert("largest".into(), json!(table.largest()));
    object.insert("start".into(), to_value(&config.start)?);
    encode(object)
}

fn run_row(labyrinth: &Labyrinth, args: &[String]) -> Result<String, LabyrinthError> {
    let p = parse_prime(args)?;
    let row = labyrinth.build_row(p)?;
    let mut object = Map::new();
    object.insert("command".into(), Value::String("row".into()));
    object.insert("layer".into(), json!(row.layer));
    object.insert("next".into(), json!(row.next));
    object.insert("signature".into(), json!(row.signature()));
    object.insert("rooms".into(), rooms_value(&row, None)?);
    encode(object)
}

fn run_full(labyrinth: &Labyrinth, args: &[String]) -> Result<String, LabyrinthError> {
    let p = parse_prime(args)?;
    let rows = labyrinth.rows();
    let marked = probe::reachable_from_previous(&rows, p)?;
    let row = rows.build_row(p)?;
    let mut object = Map::new();
    object.insert("command".into(), Value::String("full".into()));
    object.insert("layer".into(), json!(row.layer));
    object.insert("next".into(), json!(row.next));
    object.insert("rooms".into(), rooms_value(&row, Some(&marked))?);
    encode(object)
}

fn run_signature(labyrinth: &Labyrinth, args: &[String]) -> Result<String, LabyrinthError> {
    let range = args
        .first()
        .ok_or_else(|| invalid("signature requires a prime or a range like 7-23"))?;
    let cleaned: String = range.chars().filter(|c| !c.is_whitespace()).collect();
    let (lo, hi) = match cleaned.split_once('-') {
        Some((lo, hi)) => (parse_u64(lo)?, parse_u64(hi)?),
        None => {
            let p = parse_u64(&cleaned)?;
            if !labyrinth.table().contains(p) {
                return Err(LabyrinthError::UnknownPrime(p));
            }
            (p, p)
        }
    };
    let lines = probe::signatures(&labyrinth.rows(), lo, hi)?;
    if lines.is_empty() {
        return Err(invalid("no known primes in that range"));
    }
    Ok(lines.join("\n"))
}

fn run_explore(labyrinth: &Labyrinth, config: &LabyrinthConfig) -> Result<String, LabyrinthError> {
    let summary =
        labyrinth.depth_first_explore(config.start, config.explore_steps, config.explore_ceiling);
    let mut object = Map::new();
    object.insert("command".into(), Value::String("explore".into()));
    object.insert("start".into(), to_value(&config.start)?);
    object.insert("max_prime".into(), json!(config.explore_ceiling));
    object.insert("summary".into(), to_value(&summary)?);
    encode(object)
}

fn run_world(labyrinth: &Labyrinth, config: &LabyrinthConfig) -> Result<String, LabyrinthError> {
    let max_prime = config.explore_ceiling.unwrap_or(DEFAULT_WORLD_MAX_PRIME);
    let world = build_world_graph(&labyrinth.rows(), DEFAULT_START_LAYER, max_prime)?;
    let mut object = Map::new();
    object.insert("command".into(), Value::String("world".into()));
    object.insert("max_prime".into(), json!(max_prime));
    object.insert("node_count".into(), json!(world.node_count()));
    object.insert("edge_count".into(), json!(world.edge_count()));
    object.insert("graph".into(), to_value(&world)?);
    encode(object)
}

fn encode_walk(command: &str, walk: &Walk) -> Result<String, LabyrinthError> {
    let mut object = Map::new();
    object.insert("command".into(), Value::String(command.into()));
    object.insert("status".into(), Value::String(walk.status.as_str().into()));
    object.insert("length".into(), json!(walk.path.len()));
    object.insert("path".into(), to_value(&walk.path)?);
    encode(object)
}

fn rooms_value(row: &Row, marked: Option<&BTreeSet<Room>>) -> Result<Value, LabyrinthError> {
    let rooms = row
        .rooms
        .iter()
        .map(|entry| {
            let mut room = Map::new();
            room.insert("room".into(), to_value(&entry.room)?);
            room.insert("doors".into(), to_value(&entry.doors)?);
            if let Some(marked) = marked {
                room.insert("reachable".into(), json!(marked.contains(&entry.room)));
            }
            Ok(Value::Object(room))
        })
        .collect::<Result<Vec<_>, LabyrinthError>>()?;
    Ok(Value::Array(rooms))
}

fn parse_prime(args: &[String]) -> Result<Prime, LabyrinthError> {
    let value = args
        .first()
        .ok_or_else(|| invalid("missing prime argument"))?;
    parse_u64(value)
}

fn parse_u64(value: &str) -> Result<u64, LabyrinthError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid(format!("'{value}' is not a non-negative integer")))
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, LabyrinthError> {
    serde_json::to_value(value).map_err(|e| invalid(format!("{ERR_PREFIX} serialization failed: {e}")))
}

fn encode(object: Map<String, Value>) -> Result<String, LabyrinthError> {
    serde_json::to_string(&Value::Object(object))
        .map_err(|e| invalid(format!("{ERR_PREFIX} serialization failed: {e}")))
}

fn invalid<T: Into<String>>(message: T) -> LabyrinthError {
    LabyrinthError::invalid_input(message.into())
}

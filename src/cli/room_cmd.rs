//! Room CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;

#[derive(Subcommand)]
pub enum RoomCommands {
    /// Create a room below the base directory
    New {
        /// Room name
        name: String,
    },

    /// List rooms below the base directory
    List,
}

pub fn run(cmd: RoomCommands, session: &Session, output: &Output) -> Result<()> {
    match cmd {
        RoomCommands::New { name } => {
            let room = session.base_room()?.enter(&name, true)?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "room": room.name(),
                    "path": room.path().display().to_string(),
                }));
            } else {
                output.success(&format!("Created room {}", room.path().display()));
            }
        }

        RoomCommands::List => {
            let rooms = session.base_room()?.rooms()?;

            if output.is_json() {
                output.data(&rooms);
            } else if rooms.is_empty() {
                println!("No rooms");
            } else {
                for room in &rooms {
                    println!("{}", room);
                }
            }
        }
    }

    Ok(())
}

//! Drawer CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::Session;

#[derive(Subcommand)]
pub enum DrawerCommands {
    /// Create an empty drawer (keeps an existing one)
    New {
        /// Drawer file name
        name: String,
    },

    /// List drawers in the room
    List,

    /// Delete a drawer
    Destroy {
        /// Drawer file name
        name: String,
    },
}

pub fn run(cmd: DrawerCommands, session: &Session, output: &Output) -> Result<()> {
    match cmd {
        DrawerCommands::New { name } => new_drawer(session, output, &name),
        DrawerCommands::List => list_drawers(session, output),
        DrawerCommands::Destroy { name } => destroy_drawer(session, output, &name),
    }
}

fn new_drawer(session: &Session, output: &Output, name: &str) -> Result<()> {
    let store = session.room()?.open(name, true)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "drawer": name,
            "path": store.path().display().to_string(),
        }));
    } else {
        output.success(&format!("Created drawer {}", store.path().display()));
    }

    Ok(())
}

fn list_drawers(session: &Session, output: &Output) -> Result<()> {
    let room = session.room()?;
    let drawers = room.drawers()?;
    output.verbose_ctx("drawer", &format!("Listing {}", room.path().display()));

    if output.is_json() {
        output.data(&drawers);
    } else if drawers.is_empty() {
        println!("No drawers");
    } else {
        for drawer in &drawers {
            println!("{}", drawer);
        }
    }

    Ok(())
}

fn destroy_drawer(session: &Session, output: &Output, name: &str) -> Result<()> {
    session.room()?.destroy(name)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "drawer": name,
            "destroyed": true,
        }));
    } else {
        output.success(&format!("Destroyed drawer {}", name));
    }

    Ok(())
}

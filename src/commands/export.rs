//! JSON export of every project.
//!
//! Writes a versioned snapshot that `pmt import` reads back. Without
//! `--output` the snapshot is printed to stdout.

use super::open_center;
use crate::{libs::messages::Message, msg_success};
use anyhow::Result;
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(short, long, help = "Target file; stdout when omitted")]
    output: Option<PathBuf>,
}

pub async fn cmd(export_args: ExportArgs) -> Result<()> {
    let center = open_center().await?;
    let export = center.export_projects();

    match export_args.output {
        Some(path) => {
            let file = File::create(&path)?;
            serde_json::to_writer_pretty(&file, &export)?;
            msg_success!(Message::ExportCompleted(path.display().to_string(), export.projects.len()));
        }
        None => println!("{}", serde_json::to_string_pretty(&export)?),
    }
    Ok(())
}

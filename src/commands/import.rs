use super::open_center;
use crate::{
    libs::{
        data_center::{ImportOutcome, ProjectExport},
        messages::Message,
    },
    msg_error_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(help = "File written by `pmt export`")]
    file: PathBuf,
    #[arg(long, help = "Replace projects that already exist")]
    overwrite: bool,
}

pub async fn cmd(import_args: ImportArgs) -> Result<()> {
    let text = fs::read_to_string(&import_args.file).map_err(|_| msg_error_anyhow!(Message::ImportFileUnreadable(import_args.file.display().to_string())))?;
    let export: ProjectExport = serde_json::from_str(&text)?;

    let mut center = open_center().await?;
    let outcomes = center.import_projects(export, import_args.overwrite).await?;

    let mut imported = 0;
    let mut skipped = 0;
    for outcome in outcomes {
        match outcome {
            ImportOutcome::Imported { .. } => imported += 1,
            ImportOutcome::Skipped { .. } => skipped += 1,
            ImportOutcome::Failed { name, reason, .. } => {
                skipped += 1;
                msg_warning!(Message::ImportProjectFailed(name, reason));
            }
        }
    }
    msg_success!(Message::ImportCompleted { imported, skipped });
    Ok(())
}

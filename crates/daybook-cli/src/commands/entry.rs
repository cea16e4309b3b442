use std::path::PathBuf;

use daybook_core::gateway::PersistenceGateway;
use daybook_core::media::MediaFile;
use daybook_core::{BlockKind, Command, DashboardSession, Outcome};

use crate::error::CliError;

/// One `BLOCK` argument of `daybook entry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockSpec {
    Text(String),
    Media {
        /// `None` for `file:`, where the kind comes from the file type.
        kind: Option<BlockKind>,
        path: PathBuf,
        caption: Option<String>,
    },
}

pub fn parse_block_spec(raw: &str) -> Result<BlockSpec, CliError> {
    let invalid = |reason: &str| CliError::InvalidBlock {
        spec: raw.to_string(),
        reason: reason.to_string(),
    };

    let (prefix, rest) = raw
        .split_once(':')
        .ok_or_else(|| invalid("expected a kind prefix such as text: or image:"))?;
    let prefix = prefix.trim().to_ascii_lowercase();

    if prefix == "text" {
        return Ok(BlockSpec::Text(rest.to_string()));
    }

    let kind = if prefix == "file" {
        None
    } else {
        let kind = prefix
            .parse::<BlockKind>()
            .map_err(|_| invalid("unknown block kind"))?;
        Some(kind)
    };

    let (path, caption) = match rest.rsplit_once('#') {
        Some((path, caption)) => (path, Some(caption.trim().to_string())),
        None => (rest, None),
    };
    let path = path.trim();
    if path.is_empty() {
        return Err(invalid("missing file path"));
    }

    Ok(BlockSpec::Media {
        kind,
        path: PathBuf::from(path),
        caption: caption.filter(|caption| !caption.is_empty()),
    })
}

pub async fn run_entry<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    title: &str,
    raw_blocks: &[String],
) -> Result<(), CliError> {
    let specs = raw_blocks
        .iter()
        .map(|raw| parse_block_spec(raw))
        .collect::<Result<Vec<_>, _>>()?;

    session.dispatch(Command::SetTitle(title.to_string())).await?;

    // The editor starts with one empty text block; the first text argument fills it.
    let mut initial_block = session.editor().blocks().first().map(|block| block.id);
    for spec in specs {
        match spec {
            BlockSpec::Text(text) => {
                if let Some(id) = initial_block.take() {
                    session.dispatch(Command::UpdateText { id, text }).await?;
                } else {
                    session.dispatch(Command::AddTextBlock(text)).await?;
                }
            }
            BlockSpec::Media {
                kind,
                path,
                caption,
            } => add_media_block(session, kind, path, caption).await?,
        }
    }

    if let Some(id) = initial_block {
        if session.editor().len() > 1 {
            session.dispatch(Command::RemoveBlock(id)).await?;
        }
    }

    if let Outcome::EntrySaved(entry) = session.dispatch(Command::SubmitEntry).await? {
        println!(
            "Saved entry '{}' for {} ({} blocks)",
            entry.title,
            entry.date,
            entry.blocks.len()
        );
    }
    Ok(())
}

async fn add_media_block<G: PersistenceGateway>(
    session: &mut DashboardSession<G>,
    kind: Option<BlockKind>,
    path: PathBuf,
    caption: Option<String>,
) -> Result<(), CliError> {
    let file = MediaFile::read(&path).await?;
    if let Some(expected) = kind {
        if file.kind() != expected {
            return Err(CliError::InvalidBlock {
                spec: path.display().to_string(),
                reason: format!("file looks like {}, not {expected}", file.kind()),
            });
        }
    }
    tracing::debug!(
        file_name = %file.file_name,
        size = %file.formatted_size(),
        "Attaching file"
    );

    let outcome = session.dispatch(Command::AddMedia(file)).await?;
    if let (Outcome::BlockAdded(id), Some(caption)) = (outcome, caption) {
        session
            .dispatch(Command::UpdateCaption { id, caption })
            .await?;
    }
    Ok(())
}

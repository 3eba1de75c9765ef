//! Candidate cards: terminal front end
//!
//! Prompts for a leader and a party name, submits them, and reprints the
//! page after every attempt. With `--render` the card grid is also written
//! to a PNG file after each attempt.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use candidate_cards::api::CandidateClient;
use candidate_cards::app::{CandidateSession, FormController, SubmitOutcome};
use candidate_cards::config::{CardGridConfig, ClientConfig, ConfigError};
use candidate_cards::domain::Field;
use candidate_cards::ui::{CardLayout, CardRenderer, PageView, RendererError};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the candidate service (falls back to CANDIDATE_API_BASE)
    #[arg(long)]
    base_url: Option<String>,

    /// Path of the create endpoint (falls back to CANDIDATE_API_PATH)
    #[arg(long)]
    path: Option<String>,

    /// Write the card grid to this PNG after every attempt
    #[arg(long)]
    render: Option<PathBuf>,

    /// TrueType/OpenType font used for card text in the PNG
    #[arg(long, requires = "render")]
    font: Option<PathBuf>,

    /// Cards per row in the PNG
    #[arg(long, default_value_t = CardGridConfig::DEFAULT_COLUMNS)]
    columns: u32,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Render(#[from] RendererError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Optional PNG export of the card grid
struct Export {
    path: PathBuf,
    grid: CardGridConfig,
    renderer: CardRenderer,
}

impl Export {
    fn write(&self, controller: &FormController) {
        let layout = CardLayout::from_cards(controller.cards(), &self.grid, 1.0);
        match self.renderer.render_to_png(&layout, &self.path) {
            Ok(()) => info!(path = %self.path.display(), cards = layout.cards.len(), "Card grid written"),
            Err(e) => warn!("Could not write card grid: {e}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::from_env_with_overrides(args.base_url, args.path)?;
    info!(endpoint = %config.endpoint(), "Submitting candidates");

    let export = match args.render {
        Some(path) => {
            let renderer = match args.font {
                Some(font) => CardRenderer::with_font_file(font)?,
                None => CardRenderer::new(),
            };
            Some(Export {
                path,
                grid: CardGridConfig::with_columns(args.columns),
                renderer,
            })
        }
        None => None,
    };

    let session = CandidateSession::new(CandidateClient::new(config));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let page = PageView::new(&session.controller()).to_string();
    write_page(&mut stdout, &page).await?;

    loop {
        let Some(leader) = prompt(&mut stdout, &mut lines, Field::LeaderName).await? else {
            break;
        };
        session.edit(Field::LeaderName, leader);

        let Some(party) = prompt(&mut stdout, &mut lines, Field::PartyName).await? else {
            break;
        };
        session.edit(Field::PartyName, party);

        let outcome = session.submit().await;

        let page = PageView::new(&session.controller()).to_string();
        write_page(&mut stdout, &page).await?;

        if let Some(export) = export.as_ref().filter(|_| outcome != SubmitOutcome::Ignored) {
            export.write(&session.controller());
        }
    }

    info!("Input closed, exiting");
    Ok(())
}

async fn write_page(stdout: &mut Stdout, page: &str) -> Result<(), AppError> {
    stdout.write_all(page.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Asks for one field; None once stdin is closed
async fn prompt(
    stdout: &mut Stdout,
    lines: &mut Lines<BufReader<Stdin>>,
    field: Field,
) -> Result<Option<String>, AppError> {
    stdout
        .write_all(format!("{} ({}): ", field.label(), field.placeholder()).as_bytes())
        .await?;
    stdout.flush().await?;

    Ok(lines.next_line().await?)
}

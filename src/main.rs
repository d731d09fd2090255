//! remote-search CLI
//!
//! Drives a remote search widget from stdin. Each line is treated as the new
//! content of the input; `:N` selects row N, `:blur` simulates focus loss and
//! `:q` quits.

use anyhow::{Context, Result, bail};
use clap::Parser;
use remote_search::{
    RemoteSearch, SearchConfig, SearchEvent, SearchOptions, SearchPhase, TerminalRenderer,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Debounced search against a JSON endpoint
#[derive(Parser)]
#[command(name = "remote-search")]
#[command(version)]
#[command(about = "Debounced search against a JSON endpoint", long_about = None)]
struct Cli {
    /// JSON options file; flags below override its values
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Absolute endpoint url
    #[arg(short, long)]
    url: Option<String>,

    /// Extra query parameter, as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Query parameter carrying the typed text
    #[arg(long)]
    search_param: Option<String>,

    /// Minimum number of characters before searching
    #[arg(short, long)]
    min_len: Option<usize>,

    /// Item field used as the row label
    #[arg(short, long)]
    label: Option<String>,

    /// Dotted path to the item array in the response
    #[arg(long)]
    items: Option<String>,

    /// Quiet period after the last line before searching, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Highlight the typed text inside labels
    #[arg(long)]
    highlight: bool,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

impl Cli {
    fn into_config(self) -> Result<SearchConfig> {
        let mut options = match &self.options {
            Some(path) => SearchOptions::from_json_file(path)?,
            None => SearchOptions::default(),
        };

        if options.input_selector.is_empty() {
            options.input_selector = "stdin".to_string();
        }
        if let Some(url) = self.url {
            options.absolute_url = Some(url);
        }
        options.url_query_params.extend(self.params);
        if self.search_param.is_some() {
            options.search_query_param = self.search_param;
        }
        if self.min_len.is_some() {
            options.min_len = self.min_len;
        }
        if self.label.is_some() {
            options.item_label = self.label;
        }
        if self.items.is_some() {
            options.items_field = self.items;
        }
        if self.delay_ms.is_some() {
            options.typing_delay_ms = self.delay_ms;
        }
        if self.highlight {
            options.highlight_match = Some(true);
        }
        if options.absolute_url.is_none() && options.relative_url.is_none() {
            bail!("No url provided. Pass --url or an options file with absolute_url");
        }

        let config = options.into_builder()?.build()?;
        Ok(config)
    }
}

/// Wait for the cycle started by the last line to end
async fn drain(
    events: &mut tokio::sync::broadcast::Receiver<SearchEvent>,
    budget: Duration,
) {
    let wait = async {
        while let Ok(event) = events.recv().await {
            if event.is_terminal() && !matches!(event, SearchEvent::StaleDiscarded { .. }) {
                break;
            }
        }
    };
    if tokio::time::timeout(budget, wait).await.is_err() {
        tracing::debug!("No search cycle completed before exit");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color;
    let config = cli.into_config()?;
    let budget = config.typing_delay() + config.request_timeout();

    let widget = RemoteSearch::mount_http(config, TerminalRenderer::new(color))
        .context("Failed to mount remote search")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.strip_prefix(':') {
            Some("q") => break,
            Some("blur") => widget.on_focus_lost(),
            Some(index) => match index.parse::<usize>() {
                Ok(index) => {
                    if let Err(e) = widget.select(index) {
                        eprintln!("{e}");
                    }
                }
                Err(_) => eprintln!("Unknown command ':{index}'"),
            },
            None => widget.on_input(line),
        }
    }

    let mut events = widget.subscribe();
    if matches!(widget.state().phase(), SearchPhase::Typing | SearchPhase::Loading) {
        drain(&mut events, budget).await;
    }
    Ok(())
}

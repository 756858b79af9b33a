use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use suicard::{
    App, Event, FsEffectHost, JsonCountStore, RenderOptions, SharePlatform,
};

#[derive(Parser, Debug)]
#[command(name = "suicard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a share card PNG.
    Generate(GenerateArgs),
    /// Show how many cards have been generated so far.
    Count(CountArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Phrase for the third line ("Sui is for <TEXT>"). Omitting it renders
    /// the default card, which does not bump the counter.
    text: Option<String>,

    /// Directory the PNG is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Counter store file.
    #[arg(long, default_value = "suicard-count.json")]
    store: PathBuf,

    /// Fix the background seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file override (defaults to the system sans-serif).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Page address embedded in share links.
    #[arg(long, default_value = "https://sui-is-for.example/")]
    page_url: String,

    /// Print share links (X, Telegram, GitHub) for the generated card.
    #[arg(long, default_value_t = false)]
    links: bool,
}

#[derive(Parser, Debug)]
struct CountArgs {
    /// Counter store file.
    #[arg(long, default_value = "suicard-count.json")]
    store: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Count(args) => cmd_count(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let page_url = url::Url::parse(&args.page_url).context("parse --page-url")?;
    let options = RenderOptions {
        seed: args.seed,
        font: args.font.clone(),
    };
    let store = JsonCountStore::new(&args.store);
    let mut app = App::new(page_url, options, Box::new(store))?;
    let mut host = FsEffectHost::new(&args.out_dir);

    let user = args.text.is_some();
    if let Some(text) = args.text {
        app.dispatch(Event::PhraseChanged(text), &mut host)?;
    }
    app.dispatch(Event::RenderRequested { user }, &mut host)?;
    if app.state().current.is_none() {
        anyhow::bail!("card render failed");
    }
    app.dispatch(Event::DownloadRequested, &mut host)?;

    if args.links {
        for platform in [SharePlatform::X, SharePlatform::Telegram, SharePlatform::GitHub] {
            app.dispatch(Event::ShareRequested(platform), &mut host)?;
        }
    }

    for path in &host.saved {
        eprintln!("wrote {}", path.display());
    }
    let count = app.state().count;
    eprintln!(
        "{count} {} generated and counting",
        if count == 1 { "image" } else { "images" }
    );
    Ok(())
}

fn cmd_count(args: CountArgs) -> anyhow::Result<()> {
    use suicard::CountStore as _;

    let count = JsonCountStore::new(&args.store).load()?;
    println!(
        "{count} {} generated and counting",
        if count == 1 { "image" } else { "images" }
    );
    Ok(())
}

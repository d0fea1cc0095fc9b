//! Novela CLI - terminal reading client for the novel catalog API

mod logging;
mod render;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use novela_core::views::{self, ViewState};
use novela_core::{
    normalize_novels, ApiClient, ClientConfig, NovelListQuery, PageQuery, ReqwestTransport, Route,
    SearchParams,
};

#[derive(Parser)]
#[command(name = "novela")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API base URL, including the /api/v1 prefix (default: $NOVELA_API_BASE)
    #[arg(long, global = true)]
    api: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Best-rated and recent novels
    Home,

    /// Paginated novel list
    List {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = 20)]
        limit: u32,

        /// ongoing, completed, hiatus or dropped
        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        min_rate: Option<f64>,
    },

    /// Search novels; without filters, lists recent novels
    Search {
        #[arg(long)]
        q: Option<String>,

        #[arg(long)]
        genre_id: Option<u64>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        min_rating: Option<f64>,
    },

    /// Novel detail and chapter list
    Novel { id: u64 },

    /// Read a chapter
    Read { chapter_id: u64 },

    /// List genres
    Genres {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Show a single genre
    Genre { id: u64 },

    /// Check that the API is up
    Health,

    /// Open a client route such as /novel/3 or "/search?q=lord"
    Open { route: String },
}

type Api = ApiClient<ReqwestTransport>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = match cli.api.as_deref() {
        Some(base) => ClientConfig::new(base),
        None => ClientConfig::from_env(),
    };
    tracing::debug!(api_base = config.api_base(), "using API");
    let api = ApiClient::from_config(config);

    match cli.command {
        Commands::Home => show(views::load_home(&api).await, render::home),
        Commands::List {
            skip,
            limit,
            status,
            min_rate,
        } => {
            let query = NovelListQuery {
                skip,
                limit,
                status,
                min_rate,
            };
            let novels = normalize_novels(api.novels(&query).await?);
            print!("{}", render::novel_list("Novelas", &novels));
            Ok(())
        }
        Commands::Search {
            q,
            genre_id,
            status,
            min_rating,
        } => {
            let params = SearchParams {
                q,
                genre_id,
                status,
                min_rating,
            };
            open(&api, Route::Search(params)).await
        }
        Commands::Novel { id } => open(&api, Route::Novel(id)).await,
        Commands::Read { chapter_id } => open(&api, Route::Chapter(chapter_id)).await,
        Commands::Genres { skip, limit } => {
            let genres = api.genres(&PageQuery { skip, limit }).await?;
            print!("{}", render::genres(&genres));
            Ok(())
        }
        Commands::Genre { id } => {
            let genre = api.genre(id).await?;
            println!("{} ({})", genre.name, genre.id);
            Ok(())
        }
        Commands::Health => {
            let health = api.health().await?;
            println!("{}", render::health(&health));
            Ok(())
        }
        Commands::Open { route } => open(&api, Route::parse(&route)).await,
    }
}

async fn open(api: &Api, route: Route) -> Result<()> {
    tracing::info!(%route, "opening");
    match route {
        Route::Home => show(views::load_home(api).await, render::home),
        Route::Novel(id) => show(views::load_novel_page(api, id).await, render::novel_page),
        Route::Chapter(id) => show(views::load_reader(api, id).await, render::reader),
        Route::Search(params) => show(views::load_search(api, params).await, render::search_page),
        Route::AdvancedSearch => {
            let form = views::load_search_form(api, SearchParams::default()).await;
            print!("{}", render::search_form(&form));
            Ok(())
        }
        Route::NotFound(location) => bail!("no page at {location}"),
    }
}

fn show<T>(state: ViewState<T>, draw: fn(&T) -> String) -> Result<()> {
    match state {
        ViewState::Ready(page) => {
            print!("{}", draw(&page));
            Ok(())
        }
        ViewState::Failed(failure) => {
            eprint!("{}", render::failure(&failure));
            bail!("{}", failure.message)
        }
        ViewState::Loading => bail!("page did not finish loading"),
    }
}

use anyhow::{Context, Result};
use cinefind::{
    App, AppConfig,
    browse::{OperationKind, OperationStatus},
    catalog::{ImageSize, Movie},
    details::{MovieView, format_amount},
    favorites::{FavoritesQuery, SortOption, SortState},
    telemetry,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cinefind")]
#[command(about = "Browse trending movies, search the catalog and keep a favorites list", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, env = "CINEFIND_CONFIG", help = "Path to a config file")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show this week's trending movies")]
    Trending {
        #[arg(long, help = "Only show movies in this genre id")]
        genre: Option<i64>,
    },

    #[command(about = "Search movies by title")]
    Search {
        query: String,

        #[arg(long, default_value = "1", help = "Number of pages to load")]
        pages: u32,
    },

    #[command(about = "Show details and cast for a movie")]
    Details { id: i64 },

    #[command(about = "List movie genres")]
    Genres,

    #[command(about = "Most popular movies in a genre")]
    Discover {
        genre: i64,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    #[command(about = "Manage saved movies")]
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    #[command(about = "Replay the last search")]
    Resume,

    #[command(about = "Forget the remembered search")]
    Forget,
}

#[derive(Subcommand)]
enum FavoritesAction {
    #[command(about = "List saved movies")]
    List {
        #[arg(long, help = "Case-insensitive title filter")]
        filter: Option<String>,

        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,

        #[arg(long, help = "Reverse the default direction")]
        reverse: bool,
    },

    #[command(about = "Save a movie by id")]
    Add { id: i64 },

    #[command(about = "Remove a saved movie by id")]
    Remove { id: i64 },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Title,
    Date,
    Rating,
}

impl From<SortArg> for SortOption {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Title => Self::Title,
            SortArg::Date => Self::ReleaseDate,
            SortArg::Rating => Self::Rating,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = telemetry::init(&config.log)?;

    let app = App::from_config(&config).context("Failed to initialise catalog client")?;

    match cli.command {
        Commands::Trending { genre } => trending(&app, genre).await,
        Commands::Search { query, pages } => search(&app, &query, pages).await,
        Commands::Details { id } => details(&app, id).await,
        Commands::Genres => genres(&app).await,
        Commands::Discover { genre, page } => {
            let results = app
                .gateway()
                .discover_by_genre(genre, page)
                .await
                .context("Failed to fetch movies by genre")?;
            println!("Page {} of {}", results.page, results.total_pages);
            results.results.iter().for_each(|m| print_movie(&app, m));
            Ok(())
        }
        Commands::Favorites { action } => favorites(&app, action).await,
        Commands::Resume => resume(&app).await,
        Commands::Forget => {
            app.search_memory().forget();
            println!("Last search forgotten");
            Ok(())
        }
    }
}

async fn trending(app: &App, genre: Option<i64>) -> Result<()> {
    let browse = app.browse();
    browse.load_trending().await;
    if let Some(genre) = genre {
        browse.select_genre(genre);
    }

    let state = browse.snapshot();
    if state.status(OperationKind::Trending) == OperationStatus::Failed {
        anyhow::bail!("{}", state.error.as_deref().unwrap_or_default());
    }

    let movies = state.filtered_trending();
    if movies.is_empty() {
        println!("No trending movies found.");
    }
    movies.into_iter().for_each(|m| print_movie(app, m));
    Ok(())
}

async fn search(app: &App, query: &str, pages: u32) -> Result<()> {
    let browse = app.browse();
    browse.set_query(query);
    browse.submit_search(query).await;

    for _ in 1..pages {
        if !browse.snapshot().can_load_more() {
            break;
        }
        browse.load_more().await;
    }

    print_search(app)
}

async fn resume(app: &App) -> Result<()> {
    if !app.resume_search().await {
        println!("No previous search to resume.");
        return Ok(());
    }

    print_search(app)
}

fn print_search(app: &App) -> Result<()> {
    let state = app.browse().snapshot();
    if state.status(OperationKind::Search) == OperationStatus::Failed
        || state.status(OperationKind::LoadMore) == OperationStatus::Failed
    {
        anyhow::bail!("{}", state.error.as_deref().unwrap_or_default());
    }

    match &state.search_results {
        Some(results) => {
            println!(
                "Search results for \"{}\": {} movies found (page {} of {})",
                state.last_search, results.total_results, results.page, results.total_pages
            );
            results.results.iter().for_each(|m| print_movie(app, m));
        }
        None => println!("No search results."),
    }
    Ok(())
}

async fn details(app: &App, id: i64) -> Result<()> {
    let view: MovieView = app
        .movie_view(id)
        .await
        .context(cinefind::details::DETAILS_FAILED)?;
    let d = &view.details;

    let year = view.year().map(|y| format!(" ({y})")).unwrap_or_default();
    let favorite = if app.favorites().is_favorite(d.id) { "  ♥" } else { "" };
    println!("{}{}{}", d.title, year, favorite);
    if let Some(tagline) = &d.tagline {
        println!("  \"{tagline}\"");
    }
    println!("  Rating:   {:.1}", d.vote_average);
    if let Some(runtime) = view.runtime_label() {
        println!("  Runtime:  {runtime}");
    }
    if let Some(released) = view.release_label() {
        println!("  Released: {released}");
    }
    if !d.genres.is_empty() {
        let names: Vec<_> = d.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  Genres:   {}", names.join(", "));
    }
    if let Some(director) = view.director() {
        println!("  Director: {}", director.name);
    }
    if let Some(budget) = view.budget() {
        println!("  Budget:   ${}", format_amount(budget));
    }
    if let Some(revenue) = view.revenue() {
        println!("  Revenue:  ${}", format_amount(revenue));
    }
    if let Some(url) = view.trailer().and_then(|t| t.watch_url()) {
        println!("  Trailer:  {url}");
    }
    println!(
        "  Poster:   {}",
        app.gateway().image_url(d.poster_path.as_deref(), ImageSize::Standard)
    );
    if !d.overview.is_empty() {
        println!("\n{}", d.overview);
    }

    let cast = view.top_cast();
    if !cast.is_empty() {
        println!("\nTop cast:");
        for member in cast {
            println!("  {} as {}", member.name, member.character);
        }
    }
    Ok(())
}

async fn genres(app: &App) -> Result<()> {
    let browse = app.browse();
    browse.load_genres().await;

    let genres = browse.snapshot().genres;
    if genres.is_empty() {
        anyhow::bail!("No genres available");
    }
    for genre in genres {
        println!("{:>6}  {}", genre.id, genre.name);
    }
    Ok(())
}

async fn favorites(app: &App, action: FavoritesAction) -> Result<()> {
    let store = app.favorites();

    match action {
        FavoritesAction::List {
            filter,
            sort,
            reverse,
        } => {
            let option = SortOption::from(sort);
            let direction = if reverse {
                option.default_direction().reversed()
            } else {
                option.default_direction()
            };
            let query = FavoritesQuery::new()
                .with_search_term(filter.unwrap_or_default())
                .with_sort(SortState::new(option, direction));

            let movies = store.view(&query);
            if movies.is_empty() {
                println!("No favorites yet.");
            }
            movies.iter().for_each(|m| print_movie(app, m));
        }
        FavoritesAction::Add { id } => {
            let details = app
                .gateway()
                .get_details(id)
                .await
                .context(cinefind::details::DETAILS_FAILED)?;
            if store.add(details.summary()) {
                println!("Added {} to favorites", details.title);
            } else {
                println!("{} is already a favorite", details.title);
            }
        }
        FavoritesAction::Remove { id } => {
            if store.remove(id) {
                println!("Removed {id} from favorites");
            } else {
                println!("{id} is not a favorite");
            }
        }
    }
    Ok(())
}

fn print_movie(app: &App, movie: &Movie) {
    let year = movie
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let favorite = if app.favorites().is_favorite(movie.id) { "♥" } else { " " };
    println!(
        "{} {:>8}  {:>4}  {:>4.1}  {}",
        favorite, movie.id, year, movie.vote_average, movie.title
    );
}


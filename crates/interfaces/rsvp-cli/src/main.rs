use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use rsvp_cli::{commands, hosts, open_store};
use rsvp_core::RsvpDraft;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Directory holding rsvp.redb (defaults to the platform data dir)
    #[arg(long, global = true, env = "RSVP_DATA_DIR")]
    data_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which view an address opens
    Resolve {
        location: String,
        #[arg(long, help = "Boot the page against the store and show what loads")]
        load: bool,
    },
    /// Print the ten-stop scale for a base color
    Palette {
        base: String,
        #[arg(long, help = "Treat BASE as a theme id")]
        theme: bool,
        #[arg(long)]
        json: bool,
    },
    /// List the theme catalog, optionally filtered by name
    Themes { query: Option<String> },
    /// Manage couple pages
    Host {
        #[command(subcommand)]
        command: HostCommands,
    },
    /// Manage guest responses
    Rsvp {
        #[command(subcommand)]
        command: RsvpCommands,
    },
    /// Write a page's responses as CSV
    Export {
        slug: String,
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Print the guest link and QR file name for a page
    Share {
        slug: String,
        #[arg(long, env = "RSVP_BASE_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
}

#[derive(Subcommand)]
enum HostCommands {
    Create {
        couple_names: String,
        #[arg(long, default_value = rsvp_config::DEFAULT_THEME_ID)]
        theme: String,
    },
    Show {
        slug: String,
    },
    Cover {
        slug: String,
        /// Omit to remove the cover image
        url: Option<String>,
    },
}

#[derive(Subcommand)]
enum RsvpCommands {
    Add {
        slug: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        declined: bool,
        #[arg(long, default_value_t = rsvp_config::MIN_PARTY_SIZE)]
        party: u32,
        #[arg(long)]
        message: Option<String>,
    },
    List {
        slug: String,
    },
    Delete {
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Resolve { location, load } => {
            if load {
                let store = open_store(cli.data_dir)?;
                hosts::handle_load(&store, &location)?
            } else {
                commands::cmd_resolve(&location)?
            }
        }
        Commands::Palette { base, theme, json } => commands::cmd_palette(&base, theme, json)?,
        Commands::Themes { query } => commands::cmd_themes(query.as_deref())?,
        Commands::Share { slug, base_url } => commands::cmd_share(&base_url, &slug)?,
        Commands::Host { command } => {
            let store = open_store(cli.data_dir)?;
            match command {
                HostCommands::Create {
                    couple_names,
                    theme,
                } => hosts::handle_create(&store, &couple_names, &theme)?,
                HostCommands::Show { slug } => hosts::handle_show(&store, &slug)?,
                HostCommands::Cover { slug, url } => {
                    hosts::handle_cover(&store, &slug, url.as_deref())?
                }
            }
        }
        Commands::Rsvp { command } => {
            let store = open_store(cli.data_dir)?;
            match command {
                RsvpCommands::Add {
                    slug,
                    name,
                    email,
                    phone,
                    declined,
                    party,
                    message,
                } => {
                    let draft = RsvpDraft {
                        guest_name: name,
                        guest_email: email,
                        guest_phone: phone,
                        attending: !declined,
                        party_size: party,
                        message,
                    };
                    hosts::handle_add(&store, &slug, &draft)?
                }
                RsvpCommands::List { slug } => hosts::handle_list(&store, &slug)?,
                RsvpCommands::Delete { id } => hosts::handle_delete(&store, &id)?,
            }
        }
        Commands::Export { slug, output } => {
            let store = open_store(cli.data_dir)?;
            hosts::handle_export(&store, &slug, output)?
        }
    }

    Ok(())
}

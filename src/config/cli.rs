use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the JAM JOURNAL client.
#[derive(Debug, Parser)]
#[command(
    name = "jamjournal",
    version,
    about = "JAM JOURNAL client: browse the music blog and administer its content"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "JAMJOURNAL_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the backend base URL.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override where the session token and recent searches are kept.
    #[arg(
        long = "state-file",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub state_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Featured, latest and popular sections of the home page.
    Home {
        /// Restrict the latest section to one genre ("All Genres" disables it).
        #[arg(long)]
        genre: Option<String>,
    },
    /// Browse and manage posts.
    Posts {
        #[command(subcommand)]
        action: PostsCmd,
    },
    /// Search posts and manage recent searches.
    Search {
        #[command(subcommand)]
        action: SearchCmd,
    },
    /// Manage genres.
    Genres {
        #[command(subcommand)]
        action: GenresCmd,
    },
    /// Sign in, sign out and manage the admin profile.
    Auth {
        #[command(subcommand)]
        action: AuthCmd,
    },
    /// Read and update site settings.
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
    /// Newsletter subscriptions and campaigns.
    Newsletter {
        #[command(subcommand)]
        action: NewsletterCmd,
    },
    /// Admin analytics dashboard.
    Analytics,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PostsCmd {
    /// List posts, filtered, sorted and paginated client-side.
    List {
        /// Case-insensitive text match.
        #[arg(long)]
        search: Option<String>,
        /// Genre name; "All Genres" disables the filter.
        #[arg(long)]
        genre: Option<String>,
        /// all|featured|recent
        #[arg(long, default_value = "all")]
        highlight: String,
        /// latest|popular|rating|priority|server
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Use the admin content view (priority order, status filter).
        #[arg(long, action = clap::ArgAction::SetTrue)]
        admin: bool,
        /// all|published|draft (admin view only)
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Show one post.
    Get { id: i64 },
    /// Rate a post (+1).
    Rate { id: i64 },
    /// Change a post's priority.
    Priority { id: i64, priority: i64 },
    /// Delete a post.
    Delete {
        id: i64,
        /// Confirm the deletion.
        #[arg(long, action = clap::ArgAction::SetTrue)]
        yes: bool,
    },
    /// Create a post.
    Create(PostFormArgs),
    /// Replace a post.
    Update {
        id: i64,
        #[command(flatten)]
        form: PostFormArgs,
    },
}

#[derive(Debug, Args, Clone)]
pub struct PostFormArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub excerpt: String,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long = "content-file", value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,
    #[arg(long = "genre-id")]
    pub genre_id: Option<i64>,
    /// Comma-separated tags.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub featured: bool,
    #[arg(long = "hero-image", value_hint = ValueHint::FilePath)]
    pub hero_image: Option<PathBuf>,
    /// RFC3339 timestamp; the backend uses the current time when omitted.
    #[arg(long = "created-at")]
    pub created_at: Option<String>,
    /// Comma-separated categories.
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
    /// Local media file: `audio|video;PATH;TITLE;ARTIST`. Repeatable.
    #[arg(long = "local-media")]
    pub local_media: Vec<String>,
    /// External media: `audio|video;URL;PLATFORM;TITLE;ARTIST`. Repeatable.
    #[arg(long = "external-media")]
    pub external_media: Vec<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum SearchCmd {
    /// Search posts on the backend and remember the term.
    Run { term: String },
    /// Show recent search terms, newest first.
    Recent,
    /// Forget recent search terms.
    Clear,
}

#[derive(Debug, Subcommand, Clone)]
pub enum GenresCmd {
    List,
    Create { name: String },
    Update { id: i64, name: String },
    Delete { id: i64 },
}

#[derive(Debug, Subcommand, Clone)]
pub enum AuthCmd {
    /// Exchange credentials for a session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "JAMJOURNAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token.
    Logout,
    /// Show the signed-in administrator.
    Me,
    /// Update the administrator profile.
    Profile {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        bio: String,
        #[arg(long, value_hint = ValueHint::FilePath)]
        avatar: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand, Clone)]
pub enum SettingsCmd {
    /// Show every setting with display fallbacks applied.
    Show,
    /// Set the submit-music redirect URL.
    Redirect { url: String },
    /// Update homepage copy; omitted fields keep their current value.
    Homepage {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "logo-url")]
        logo_url: Option<String>,
    },
    /// Update social links; omitted fields keep their current value.
    Social {
        #[arg(long)]
        x: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        youtube: Option<String>,
    },
    /// Update homepage statistics; omitted fields keep their current value.
    Stats {
        #[arg(long)]
        artists: Option<String>,
        #[arg(long)]
        reviews: Option<String>,
        #[arg(long)]
        readers: Option<String>,
    },
}

#[derive(Debug, Subcommand, Clone)]
pub enum NewsletterCmd {
    Subscribe { email: String },
    Unsubscribe { email: String },
    /// Send a campaign to every subscriber.
    Send {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long = "content-file", value_hint = ValueHint::FilePath)]
        content_file: Option<PathBuf>,
    },
    /// List subscribers, newest first.
    Subscribers {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    Campaigns,
}
